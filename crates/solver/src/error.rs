//! Result and Error types for ndiff-solver

/// Type alias for Result<T, solver::Error>
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for the `ndiff-solver` crate
///
/// Failing to converge is never an error. Inner sweeps accept partial
/// convergence and the outer iteration reports
/// [Status::IterationLimit](crate::Status::IterationLimit) instead.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("failed input/output stream")]
    IOError(#[from] std::io::Error),

    #[error("failed serde JSON operation")]
    JsonError(#[from] serde_json::Error),

    #[error("invalid core geometry")]
    MeshError(#[from] ndiff_mesh::Error),

    #[error("invalid cross sections")]
    XsError(#[from] ndiff_xs::Error),

    #[error("tolerances must be finite and non-negative, and not both zero (rtol={rtol}, atol={atol})")]
    InvalidTolerance { rtol: f64, atol: f64 },

    #[error("at least one {0} is required")]
    ZeroIterations(&'static str),

    #[error("initial {field} must be positive and finite, found {value}")]
    InvalidInitialValue { field: &'static str, value: f64 },

    #[error("mesh refers to mixture index {0}, which is outside of the mixture table")]
    MixtureIndexOutOfRange(usize),

    #[error("node {index} has no removal in group {group}, check the within-group scattering")]
    NonPositiveRemoval {
        index: ndiff_mesh::NodeIndex,
        group: usize,
    },

    #[error("fission source vanished, no fissile material reached by the flux")]
    NoFissionSource,

    #[error("failed to initialise progress bar: {0}")]
    ProgressBar(String),
}
