//! Common utility for extended `std` types
//!
//! These are left public for convenience.
//!
//! For example, prettier formatting for scientific numbers and the relative
//! plus absolute tolerance test used by every iterative scheme in the
//! toolkit are useful everywhere.

// Alias for the format! macro
pub use std::format as f;

// Modules
mod tolerance;
mod value_ext;

// Flatten
pub use tolerance::Tolerance;
pub use value_ext::ValueExt;
