//! Result and Error types for ndiff-mesh

/// Type alias for Result<T, mesh::Error>
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for the `ndiff-mesh` crate
///
/// Every variant is a configuration problem. Construction stops at the first
/// one found and no partial mesh is ever returned.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("failed input/output stream")]
    IOError(#[from] std::io::Error),

    #[error("failed serde JSON operation")]
    JsonError(#[from] serde_json::Error),

    #[error("boundary condition selector {0} is unknown (0 = vacuum, 1 = reflective)")]
    UnknownBoundaryCondition(f64),

    #[error("no stacks defined")]
    NoStacks,

    #[error("stack \"{0}\" has no axial layers")]
    NoAxialLayers(String),

    #[error(
        "all stacks should have the same number of axial nodes (stack \"{stack}\" expected {expected:?}, found {found:?})"
    )]
    InconsistentStackHeight {
        stack: String,
        expected: usize,
        found: usize,
    },

    #[error("stack \"{0}\" mixture, pipe and pipe node lists differ in length")]
    InconsistentStackLists(String),

    #[error("stack id \"{0}\" is defined more than once")]
    DuplicateStack(String),

    #[error("pipe \"{0}\" needs a positive length and at least one node")]
    InvalidPipe(String),

    #[error("pitch must be positive and finite, found {0}")]
    InvalidPitch(f64),

    #[error("core map has no rows or columns")]
    EmptyCoreMap,

    #[error(
        "all core map rows should have the same number of nodes (row {row:?} expected {expected:?}, found {found:?})"
    )]
    NonSquareCoreMap {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("core map contains no stacks")]
    NoStacksInCoreMap,

    #[error("stack id \"{0}\" in core map not specified in stacks")]
    UnknownStack(String),

    #[error("mix id \"{mixture}\" in stack \"{stack}\" not specified in mixtures")]
    UnknownMixture { stack: String, mixture: String },

    #[error("pipe id \"{pipe}\" in stack \"{stack}\" not specified in pipes")]
    UnknownPipe { stack: String, pipe: String },

    #[error(
        "pipe node {node:?} in stack \"{stack}\" is outside of the {nodes:?} nodes in pipe \"{pipe}\""
    )]
    PipeNodeOutOfRange {
        stack: String,
        pipe: String,
        node: usize,
        nodes: usize,
    },
}
