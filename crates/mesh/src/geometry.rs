use serde::{Deserialize, Serialize};

/// Lattice types, i.e. `Square`, `Hex`
///
/// The lattice sets the lateral neighbours of every position in the core map
/// and the side area to volume ratio of a node.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lattice {
    /// Square assemblies with 4 lateral neighbours
    Square,
    /// Hexagonal assemblies on offset rows with 6 lateral neighbours
    Hex,
}

impl Lattice {
    /// Full name i.e. 'Square', 'Hexagonal'
    pub fn long_name(&self) -> &str {
        match self {
            Lattice::Square => "Square",
            Lattice::Hex => "Hexagonal",
        }
    }

    /// Number of lateral faces of a node
    pub fn n_lateral_faces(&self) -> usize {
        match self {
            Lattice::Square => 4,
            Lattice::Hex => 6,
        }
    }

    /// Area of one lateral face over node volume (1/cm)
    ///
    /// For a square node of pitch `p` this is `p·h / (p²·h) = 1/p`. For a
    /// hexagon of flat-to-flat pitch `p` the side is `p/√3` and the area is
    /// `√3/2·p²`, giving `2/(3p)`.
    ///
    /// ```rust
    /// # use ndiff_mesh::Lattice;
    /// assert_eq!(Lattice::Square.side_area_over_volume(20.0), 0.05);
    /// assert_eq!(Lattice::Hex.side_area_over_volume(20.0), 2.0 / 60.0);
    /// ```
    pub fn side_area_over_volume(&self, pitch_cm: f64) -> f64 {
        match self {
            Lattice::Square => 1.0 / pitch_cm,
            Lattice::Hex => 2.0 / (3.0 * pitch_cm),
        }
    }

    /// Signed lateral offsets `(direction, dy, dx)` for a position in row `iy`
    ///
    /// Offsets are in the order faces are accumulated by the solvers. For
    /// hexagonal lattices the diagonal offsets alternate with row parity.
    ///
    /// ```rust
    /// # use ndiff_mesh::{Direction, Lattice};
    /// let odd = Lattice::Hex.lateral_offsets(1);
    /// assert_eq!(odd[2], (Direction::NorthWest, -1, -1));
    ///
    /// let even = Lattice::Hex.lateral_offsets(2);
    /// assert_eq!(even[2], (Direction::NorthWest, -1, 0));
    /// ```
    pub fn lateral_offsets(&self, iy: usize) -> &'static [(Direction, isize, isize)] {
        match (self, iy % 2) {
            (Lattice::Square, _) => &SQUARE_OFFSETS,
            (Lattice::Hex, 0) => &HEX_EVEN_OFFSETS,
            (Lattice::Hex, _) => &HEX_ODD_OFFSETS,
        }
    }
}

impl std::fmt::Display for Lattice {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.long_name())
    }
}

/// Face of a node that a neighbour is found through
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum Direction {
    /// Layer below, `iz-1`
    Bottom,
    /// Layer above, `iz+1`
    Top,
    /// Same row, `ix-1`
    West,
    /// Same row, `ix+1`
    East,
    /// Square lattices only, `iy-1`
    North,
    /// Square lattices only, `iy+1`
    South,
    /// Hexagonal lattices only
    NorthWest,
    /// Hexagonal lattices only
    NorthEast,
    /// Hexagonal lattices only
    SouthWest,
    /// Hexagonal lattices only
    SouthEast,
}

impl Direction {
    /// Check if the face is the top or bottom of a node
    pub const fn is_axial(&self) -> bool {
        matches!(self, Self::Bottom | Self::Top)
    }
}

const SQUARE_OFFSETS: [(Direction, isize, isize); 4] = [
    (Direction::West, 0, -1),
    (Direction::East, 0, 1),
    (Direction::North, -1, 0),
    (Direction::South, 1, 0),
];

const HEX_EVEN_OFFSETS: [(Direction, isize, isize); 6] = [
    (Direction::West, 0, -1),
    (Direction::East, 0, 1),
    (Direction::NorthWest, -1, 0),
    (Direction::NorthEast, -1, 1),
    (Direction::SouthWest, 1, 0),
    (Direction::SouthEast, 1, 1),
];

const HEX_ODD_OFFSETS: [(Direction, isize, isize); 6] = [
    (Direction::West, 0, -1),
    (Direction::East, 0, 1),
    (Direction::NorthWest, -1, -1),
    (Direction::NorthEast, -1, 0),
    (Direction::SouthWest, 1, -1),
    (Direction::SouthEast, 1, 0),
];
