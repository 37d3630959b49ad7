//! Macroscopic cross sections for diffusion mixtures
#![doc = include_str!("../readme.md")]

// Split into subfiles for development, but anything important is re-exported
mod error;
mod mixture;
mod transfer;
mod xs;

#[doc(inline)]
pub use crate::xs::{CrossSectionSet, N2N_YIELD};

#[doc(inline)]
pub use crate::transfer::Transfer;

#[doc(inline)]
pub use crate::mixture::{read_mixtures, Mixture, Mixtures};

#[doc(inline)]
pub use crate::error::{Error, Result};
