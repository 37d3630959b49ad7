//! Unit conversions between input lengths and cross section lengths
//!
//! Geometry is given in metres while macroscopic cross sections are per
//! centimetre, so every length used next to a cross section is converted.

/// Centimetres per metre
pub const CM_PER_M: f64 = 100.0;

/// Half of [CM_PER_M], for node centre to face distances from metres
pub const HALF_CM_PER_M: f64 = 0.5 * CM_PER_M;

/// Metres per centimetre
pub const M_PER_CM: f64 = 1.0 / CM_PER_M;
