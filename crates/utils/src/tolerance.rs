use serde::{Deserialize, Serialize};

/// Mixed relative and absolute convergence tolerance
///
/// A new value is accepted when `|new - old| < rtol * |new| + atol`. The same
/// test is applied to individual flux values, fission sources, and the
/// eigenvalue.
///
/// ```rust
/// # use ndiff_utils::Tolerance;
/// let tol = Tolerance::new(1e-6, 1e-6);
///
/// assert!(tol.accepts(1.0000005, 1.0));
/// assert!(!tol.accepts(1.00001, 1.0));
///
/// // The absolute part dominates for values near zero
/// assert!(tol.accepts(5e-7, 0.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tolerance {
    /// Relative tolerance
    pub rtol: f64,
    /// Absolute tolerance
    pub atol: f64,
}

impl Tolerance {
    /// New tolerance from relative and absolute parts
    pub const fn new(rtol: f64, atol: f64) -> Self {
        Self { rtol, atol }
    }

    /// Check if `new` is within tolerance of the `old` value
    #[inline]
    pub fn accepts(&self, new: f64, old: f64) -> bool {
        (new - old).abs() < self.rtol * new.abs() + self.atol
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::new(1e-6, 1e-6)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_inequality() {
        let tol = Tolerance::new(0.0, 1.0);
        assert!(!tol.accepts(1.0, 0.0));
        assert!(tol.accepts(0.5, 0.0));
    }

    #[test]
    fn relative_part_scales_with_new_value() {
        let tol = Tolerance::new(0.1, 0.0);
        assert!(tol.accepts(100.0, 91.0));
        assert!(!tol.accepts(100.0, 89.0));
        // symmetric in the sign of the change
        assert!(tol.accepts(100.0, 109.0));
    }
}
