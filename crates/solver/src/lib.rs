//! Gauss-Seidel diffusion sweeps and k-effective power iteration
#![doc = include_str!("../readme.md")]

// Split into subfiles for development, but anything important is re-exported
mod case;
mod config;
mod eigen;
mod error;
mod field;
mod observer;
mod operator;
mod sweep;

#[doc(inline)]
pub use case::{read_case, Case};

#[doc(inline)]
pub use config::SolverConfig;

#[doc(inline)]
pub use eigen::{EigenvalueIterator, Solution, Status};

#[doc(inline)]
pub use field::{FissionSource, FluxField};

#[doc(inline)]
pub use observer::{Logger, Observer, OuterStep, ProgressBar, Silent, SweepProgress};

#[doc(inline)]
pub use operator::{Coupling, DiffusionOperator, NodeTerms, EXTRAPOLATION_FACTOR};

#[doc(inline)]
pub use sweep::{DiffusionSweepSolver, SweepSummary};

#[doc(inline)]
pub use error::{Error, Result};
