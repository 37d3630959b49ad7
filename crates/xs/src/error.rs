//! Result and Error types for ndiff-xs

/// Type alias for Result<T, xs::Error>
pub type Result<T> = core::result::Result<T, Error>;

/// The error type for the `ndiff-xs` crate
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Underlying file I/O error
    #[error("failure in file I/O")]
    Io(#[from] std::io::Error),

    /// Failure to deserialise JSON cross section data
    #[error("failed serde JSON operation")]
    Json(#[from] serde_json::Error),

    #[error("no energy groups defined")]
    NoGroups,

    #[error("inconsistent number of groups for {field} (expected {expected:?}, found {found:?})")]
    GroupMismatch {
        field: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("{field} transfer {from} -> {to} is outside of the {n_groups} groups")]
    TransferOutOfRange {
        field: &'static str,
        from: usize,
        to: usize,
        n_groups: usize,
    },

    #[error("total cross section in group {group} must be positive and finite, found {value}")]
    InvalidTotal { group: usize, value: f64 },

    #[error("negative or undefined {field} value in group {group}")]
    InvalidValue { field: &'static str, group: usize },

    #[error("invalid cross sections for mixture \"{id}\"")]
    InvalidMixture {
        id: String,
        #[source]
        source: Box<Error>,
    },

    #[error("no mixtures defined")]
    NoMixtures,

    #[error("mixture id \"{0}\" is defined more than once")]
    DuplicateMixture(String),

    #[error("mixture \"{0}\" not found")]
    MixtureNotFound(String),
}
