//! Module for node-related data and implementations

// crate modules
use crate::input::BoundaryCondition;

/// Content of a single node in the mesh
///
/// Material nodes hold the index of their mixture in the
/// [Mixtures](ndiff_xs::Mixtures) table. Boundary nodes carry no material and
/// only set the condition seen by their neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Node {
    /// Index into the mixture table
    Mixture(usize),
    /// Vacuum boundary, no incoming current
    Vacuum,
    /// Reflective boundary, no net current
    Reflective,
}

impl Node {
    /// Integer code for the node, `>=0` mixture, `-1` vacuum, `-2` reflective
    ///
    /// ```rust
    /// # use ndiff_mesh::Node;
    /// assert_eq!(Node::Mixture(3).code(), 3);
    /// assert_eq!(Node::Vacuum.code(), -1);
    /// assert_eq!(Node::Reflective.code(), -2);
    /// ```
    pub fn code(&self) -> i64 {
        match self {
            Self::Mixture(index) => *index as i64,
            Self::Vacuum => -1,
            Self::Reflective => -2,
        }
    }

    /// Mixture index of a material node
    #[inline]
    pub const fn mixture(&self) -> Option<usize> {
        match self {
            Self::Mixture(index) => Some(*index),
            _ => None,
        }
    }

    /// Check if the node is a material node
    #[inline]
    pub const fn is_mixture(&self) -> bool {
        matches!(self, Self::Mixture(_))
    }
}

impl From<BoundaryCondition> for Node {
    fn from(bc: BoundaryCondition) -> Self {
        match bc {
            BoundaryCondition::Vacuum => Self::Vacuum,
            BoundaryCondition::Reflective => Self::Reflective,
        }
    }
}

impl std::fmt::Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Mixture(index) => write!(f, "Mixture({index})"),
            Self::Vacuum => write!(f, "Vacuum"),
            Self::Reflective => write!(f, "Reflective"),
        }
    }
}

/// Position of a node as `(iz, iy, ix)` indices
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeIndex {
    /// Axial layer, including the bottom boundary layer at 0
    pub iz: usize,
    /// Core map row
    pub iy: usize,
    /// Core map column
    pub ix: usize,
}

impl NodeIndex {
    /// New index from `(iz, iy, ix)`
    pub const fn new(iz: usize, iy: usize, ix: usize) -> Self {
        Self { iz, iy, ix }
    }
}

impl std::fmt::Display for NodeIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "(iz={}, iy={}, ix={})", self.iz, self.iy, self.ix)
    }
}

/// Pipe and 1-based pipe node that a material node sits in
///
/// Not needed for diffusion, but kept for thermal-hydraulic models that need
/// to map coolant conditions onto the mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PipeNode {
    /// Index into the pipe list
    pub pipe: usize,
    /// 1-based node within the pipe
    pub node: usize,
}

/// A neighbouring node seen through one face
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbour {
    /// Face of the node the neighbour is behind
    pub direction: crate::Direction,
    /// Position of the neighbour, `None` when outside of the mesh
    pub index: Option<NodeIndex>,
    /// Content of the neighbour, [Node::Reflective] when outside of the mesh
    pub node: Node,
}
