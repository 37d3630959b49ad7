//! `ndiff` is a small toolkit of libraries for steady-state multigroup neutron
//! diffusion calculations on structured reactor cores
//!
#![doc = include_str!("../readme.md")]
#![deny(missing_docs, missing_debug_implementations)]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

// Re-exports of toolkit crates.
#[doc(inline)]
pub use ndiff_utils as utils;

#[cfg(feature = "mesh")]
#[cfg_attr(docsrs, doc(cfg(feature = "mesh")))]
#[doc(inline)]
pub use ndiff_mesh as mesh;

#[cfg(feature = "solver")]
#[cfg_attr(docsrs, doc(cfg(feature = "solver")))]
#[doc(inline)]
pub use ndiff_solver as solver;

#[cfg(feature = "xs")]
#[cfg_attr(docsrs, doc(cfg(feature = "xs")))]
#[doc(inline)]
pub use ndiff_xs as xs;
