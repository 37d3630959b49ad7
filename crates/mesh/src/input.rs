//! Input description of a core, as handed over by an input reader

// crate modules
use crate::error::{Error, Result};
use crate::geometry::Lattice;

// standard library
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

// external crates
use log::info;
use serde::{Deserialize, Serialize};

/// Boundary condition selector, `0` for vacuum and `1` for reflective
///
/// Selectors are numbers in input files, so conversion goes through `f64`.
///
/// ```rust
/// # use ndiff_mesh::BoundaryCondition;
/// assert_eq!(BoundaryCondition::try_from(0.0).unwrap(), BoundaryCondition::Vacuum);
/// assert_eq!(BoundaryCondition::try_from(1.0).unwrap(), BoundaryCondition::Reflective);
/// assert!(BoundaryCondition::try_from(2.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub enum BoundaryCondition {
    /// Zero incoming current
    Vacuum,
    /// Zero net current
    Reflective,
}

impl TryFrom<f64> for BoundaryCondition {
    type Error = Error;

    fn try_from(selector: f64) -> Result<Self> {
        if selector == 0.0 {
            Ok(Self::Vacuum)
        } else if selector == 1.0 {
            Ok(Self::Reflective)
        } else {
            Err(Error::UnknownBoundaryCondition(selector))
        }
    }
}

impl From<BoundaryCondition> for f64 {
    fn from(bc: BoundaryCondition) -> Self {
        match bc {
            BoundaryCondition::Vacuum => 0.0,
            BoundaryCondition::Reflective => 1.0,
        }
    }
}

/// Single core map position, either a stack id or a boundary condition
///
/// ```rust
/// # use ndiff_mesh::{BoundaryCondition, MapEntry};
/// let row: Vec<MapEntry> = serde_json::from_str(r#"[1, "fa", 0]"#).unwrap();
/// assert_eq!(row[0], MapEntry::Boundary(BoundaryCondition::Reflective));
/// assert_eq!(row[1], MapEntry::Stack("fa".to_string()));
/// assert_eq!(row[2], MapEntry::Boundary(BoundaryCondition::Vacuum));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MapEntry {
    /// Id of the stack at this position
    Stack(String),
    /// Boundary condition at this position
    Boundary(BoundaryCondition),
}

impl From<&str> for MapEntry {
    fn from(id: &str) -> Self {
        Self::Stack(id.to_string())
    }
}

impl From<BoundaryCondition> for MapEntry {
    fn from(bc: BoundaryCondition) -> Self {
        Self::Boundary(bc)
    }
}

/// Axial layout of one assembly type, listed from bottom to top
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stack {
    /// Stack id referenced in the core map
    #[serde(alias = "stackid")]
    pub id: String,
    /// Mixture id of every axial layer
    #[serde(alias = "mixid")]
    pub mixtures: Vec<String>,
    /// Pipe id of every axial layer
    #[serde(alias = "pipeid")]
    pub pipes: Vec<String>,
    /// 1-based node within the pipe for every axial layer
    #[serde(alias = "pipenode")]
    pub pipe_nodes: Vec<usize>,
}

/// Coolant channel that sets the axial node thickness
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pipe {
    /// Pipe id referenced by stacks
    pub id: String,
    /// Length (m)
    #[serde(alias = "len")]
    pub length: f64,
    /// Number of nodes along the pipe
    #[serde(alias = "nnodes")]
    pub nodes: usize,
}

impl Pipe {
    /// Thickness of a single pipe node (m)
    pub fn node_length(&self) -> f64 {
        self.length / self.nodes as f64
    }
}

/// Full geometric description of a core
///
/// This is everything [MeshMap::build](crate::MeshMap::build) needs apart
/// from the mixture table. Field aliases allow the legacy input card names
/// (`geom`, `botBC`, `coremap`, ...) to be used in JSON files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoreGeometry {
    /// Lattice type
    #[serde(alias = "geom")]
    pub lattice: Lattice,
    /// Assembly pitch (m)
    pub pitch: f64,
    /// Condition below the bottom layer
    #[serde(alias = "botBC")]
    pub bottom: BoundaryCondition,
    /// Condition above the top layer
    #[serde(alias = "topBC")]
    pub top: BoundaryCondition,
    /// Rows of core map entries
    #[serde(alias = "coremap")]
    pub core_map: Vec<Vec<MapEntry>>,
    /// Every stack that may appear in the core map
    #[serde(alias = "stack")]
    pub stacks: Vec<Stack>,
    /// Every pipe that stacks may refer to
    #[serde(alias = "pipe")]
    pub pipes: Vec<Pipe>,
}

/// Read a JSON core description into a [CoreGeometry]
///
/// ```rust, no_run
/// # use ndiff_mesh::{read_geometry, CoreGeometry};
/// let geometry: CoreGeometry = read_geometry("path/to/core.json").unwrap();
/// ```
pub fn read_geometry<P: AsRef<Path>>(path: P) -> Result<CoreGeometry> {
    info!("Reading core geometry from {}", path.as_ref().display());
    let reader = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(reader)?)
}
