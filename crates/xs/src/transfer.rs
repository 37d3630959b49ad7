use serde::{Deserialize, Serialize};

/// One entry of a sparse group-to-group matrix
///
/// Used for both scattering and n2n matrices. On disk these are written as
/// `[[from, to], value]`, matching what upstream mixture models produce.
///
/// ```rust
/// # use ndiff_xs::Transfer;
/// let t: Transfer = serde_json::from_str("[[0, 1], 0.02]").unwrap();
/// assert_eq!(t, Transfer::new(0, 1, 0.02));
/// assert!(!t.is_within_group());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "((usize, usize), f64)", into = "((usize, usize), f64)")]
pub struct Transfer {
    /// Source group
    pub from: usize,
    /// Destination group
    pub to: usize,
    /// Macroscopic cross section (1/cm)
    pub value: f64,
}

impl Transfer {
    /// Create a new `from -> to` transfer
    pub const fn new(from: usize, to: usize, value: f64) -> Self {
        Self { from, to, value }
    }

    /// Self-transfer that stays within the same group
    #[inline]
    pub const fn is_within_group(&self) -> bool {
        self.from == self.to
    }
}

impl From<((usize, usize), f64)> for Transfer {
    fn from(((from, to), value): ((usize, usize), f64)) -> Self {
        Self { from, to, value }
    }
}

impl From<Transfer> for ((usize, usize), f64) {
    fn from(t: Transfer) -> Self {
        ((t.from, t.to), t.value)
    }
}
