//! Module for the per-mixture cross section set

// crate modules
use crate::error::{Error, Result};
use crate::transfer::Transfer;

// external crates
use log::warn;
use serde::{Deserialize, Serialize};

/// Number of neutrons emitted per n2n reaction
pub const N2N_YIELD: f64 = 2.0;

/// Macroscopic cross sections of a single homogenised mixture
///
/// All per-group vectors are indexed by energy group, with group 0 being the
/// fastest. The scattering and n2n matrices are sparse lists of [Transfer]s,
/// and any transition not listed is taken to be zero.
///
/// A set is an immutable snapshot for the duration of a solve. Upstream models
/// that change material properties build a new set and hand it over.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CrossSectionSet {
    /// Total cross section per group
    pub sigt: Vec<f64>,
    /// Production (nu-fission) cross section per group
    pub sigp: Vec<f64>,
    /// Fission spectrum per group
    pub chi: Vec<f64>,
    /// Sparse scattering matrix
    #[serde(default)]
    pub sigs: Vec<Transfer>,
    /// Sparse n2n matrix
    #[serde(default)]
    pub sign2n: Vec<Transfer>,
}

impl CrossSectionSet {
    /// Number of energy groups
    pub fn n_groups(&self) -> usize {
        self.sigt.len()
    }

    /// Diffusion coefficient `1/(3 sigt)` for a group (cm)
    ///
    /// ```rust
    /// # use ndiff_xs::CrossSectionSet;
    /// let xs = CrossSectionSet {
    ///     sigt: vec![0.5],
    ///     ..Default::default()
    /// };
    /// assert_eq!(xs.diffusion_coefficient(0), 1.0 / 1.5);
    /// ```
    #[inline]
    pub fn diffusion_coefficient(&self, group: usize) -> f64 {
        1.0 / (3.0 * self.sigt[group])
    }

    /// Effective removal cross section of a group
    ///
    /// The total cross section less any within-group scattering and within-group
    /// n2n, since neither actually removes a neutron from the group.
    ///
    /// ```rust
    /// # use ndiff_xs::{CrossSectionSet, Transfer};
    /// let xs = CrossSectionSet {
    ///     sigt: vec![1.0, 2.0],
    ///     sigs: vec![Transfer::new(0, 0, 0.25), Transfer::new(0, 1, 0.5)],
    ///     sign2n: vec![Transfer::new(0, 0, 0.125)],
    ///     ..Default::default()
    /// };
    /// assert_eq!(xs.removal(0), 0.625);
    /// assert_eq!(xs.removal(1), 2.0);
    /// ```
    pub fn removal(&self, group: usize) -> f64 {
        let within = self
            .sigs
            .iter()
            .chain(self.sign2n.iter())
            .filter(|t| t.is_within_group() && t.to == group)
            .map(|t| t.value)
            .sum::<f64>();
        self.sigt[group] - within
    }

    /// Scattering into `group` from every other group, as `(from, value)`
    pub fn scattering_into(&self, group: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        Self::inflow(&self.sigs, group)
    }

    /// n2n reactions into `group` from every other group, as `(from, value)`
    ///
    /// Values are the raw cross sections, see [N2N_YIELD] for the multiplicity.
    pub fn n2n_into(&self, group: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        Self::inflow(&self.sign2n, group)
    }

    /// Total fission neutron production `sum(sigp * flux)` for a flux spectrum
    ///
    /// ```rust
    /// # use ndiff_xs::CrossSectionSet;
    /// let xs = CrossSectionSet {
    ///     sigp: vec![0.01, 0.2],
    ///     ..Default::default()
    /// };
    /// assert_eq!(xs.production(&[100.0, 10.0]), 3.0);
    /// ```
    pub fn production(&self, flux: &[f64]) -> f64 {
        self.sigp.iter().zip(flux).map(|(p, f)| p * f).sum()
    }

    /// Common sense checks on the set
    ///
    /// Every per-group vector must have the same number of groups, every total
    /// cross section must be positive (the diffusion coefficient divides by
    /// it), and all transfers must stay within the groups defined.
    ///
    /// A fission spectrum that does not sum to one is suspicious but not fatal,
    /// and will only raise a warning.
    pub fn validate(&self) -> Result<()> {
        let n_groups = self.n_groups();
        if n_groups == 0 {
            return Err(Error::NoGroups);
        }

        for (field, values) in [("sigp", &self.sigp), ("chi", &self.chi)] {
            if values.len() != n_groups {
                return Err(Error::GroupMismatch {
                    field,
                    expected: n_groups,
                    found: values.len(),
                });
            }
        }

        for (group, value) in self.sigt.iter().enumerate() {
            if !(value.is_finite() && *value > 0.0) {
                return Err(Error::InvalidTotal {
                    group,
                    value: *value,
                });
            }
        }

        for (field, values) in [("sigp", &self.sigp), ("chi", &self.chi)] {
            if let Some(group) = values.iter().position(|v| !(v.is_finite() && *v >= 0.0)) {
                return Err(Error::InvalidValue { field, group });
            }
        }

        for (field, matrix) in [("sigs", &self.sigs), ("sign2n", &self.sign2n)] {
            for t in matrix {
                if t.from >= n_groups || t.to >= n_groups {
                    return Err(Error::TransferOutOfRange {
                        field,
                        from: t.from,
                        to: t.to,
                        n_groups,
                    });
                }
                if !(t.value.is_finite() && t.value >= 0.0) {
                    return Err(Error::InvalidValue {
                        field,
                        group: t.from,
                    });
                }
            }
        }

        let chi_total = self.chi.iter().sum::<f64>();
        if self.sigp.iter().any(|p| *p > 0.0) && (chi_total - 1.0).abs() > 1e-6 {
            warn!("Fission spectrum sums to {chi_total}, expected 1.0");
        }

        Ok(())
    }

    fn inflow(matrix: &[Transfer], group: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        matrix
            .iter()
            .filter(move |t| t.to == group && t.from != group)
            .map(|t| (t.from, t.value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_group() -> CrossSectionSet {
        CrossSectionSet {
            sigt: vec![0.2, 0.5],
            sigp: vec![0.005, 0.1],
            chi: vec![1.0, 0.0],
            sigs: vec![
                Transfer::new(0, 0, 0.17),
                Transfer::new(0, 1, 0.02),
                Transfer::new(1, 1, 0.4),
            ],
            sign2n: vec![Transfer::new(0, 1, 0.001)],
        }
    }

    #[test]
    fn inflow_skips_within_group() {
        let xs = two_group();
        assert_eq!(xs.scattering_into(1).collect::<Vec<_>>(), vec![(0, 0.02)]);
        assert_eq!(xs.scattering_into(0).count(), 0);
        assert_eq!(xs.n2n_into(1).collect::<Vec<_>>(), vec![(0, 0.001)]);
    }

    #[test]
    fn removal_subtracts_self_scatter() {
        let xs = two_group();
        assert!((xs.removal(0) - 0.03).abs() < 1e-12);
        assert!((xs.removal(1) - 0.1).abs() < 1e-12);
    }

    #[test]
    fn validate_rejects_bad_sets() {
        let mut xs = two_group();
        xs.chi.pop();
        assert!(matches!(
            xs.validate(),
            Err(Error::GroupMismatch { field: "chi", .. })
        ));

        let mut xs = two_group();
        xs.sigt[1] = 0.0;
        assert!(matches!(
            xs.validate(),
            Err(Error::InvalidTotal { group: 1, .. })
        ));

        let mut xs = two_group();
        xs.sigs.push(Transfer::new(2, 0, 0.1));
        assert!(matches!(
            xs.validate(),
            Err(Error::TransferOutOfRange { field: "sigs", .. })
        ));

        let mut xs = two_group();
        xs.sigp[0] = -1.0;
        assert!(matches!(
            xs.validate(),
            Err(Error::InvalidValue { field: "sigp", group: 0 })
        ));

        assert!(matches!(
            CrossSectionSet::default().validate(),
            Err(Error::NoGroups)
        ));
    }
}
