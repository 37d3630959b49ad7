//! Tunable parameters of the solvers

// crate modules
use crate::error::{Error, Result};

// neutronics toolbox
use ndiff_utils::Tolerance;

// external crates
use serde::{Deserialize, Serialize};

/// Solver settings with the reference defaults
///
/// Every field has a default, so any subset may be given in a case file.
///
/// ```rust
/// # use ndiff_solver::SolverConfig;
/// let config: SolverConfig = serde_json::from_str(r#"{"rtol": 1e-8}"#).unwrap();
/// assert_eq!(config.rtol, 1e-8);
/// assert_eq!(config.atol, 1e-6);
/// assert_eq!(config.max_sweeps, 5);
/// assert_eq!(config.max_outer_iterations, 1000);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Relative tolerance for flux, fission source and k
    pub rtol: f64,
    /// Absolute tolerance for flux, fission source and k
    pub atol: f64,
    /// Maximum Gauss-Seidel sweeps per outer iteration
    pub max_sweeps: usize,
    /// Maximum outer iterations per solve
    pub max_outer_iterations: usize,
    /// Uniform starting flux in every node and group
    pub initial_flux: f64,
    /// Uniform starting fission source in every node
    pub initial_source: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            rtol: 1e-6,
            atol: 1e-6,
            max_sweeps: 5,
            max_outer_iterations: 1000,
            initial_flux: 1.0,
            initial_source: 1e-6,
        }
    }
}

impl SolverConfig {
    /// Mixed tolerance used for every convergence test
    pub fn tolerance(&self) -> Tolerance {
        Tolerance::new(self.rtol, self.atol)
    }

    /// Check that the settings can drive a solve
    ///
    /// ```rust
    /// # use ndiff_solver::SolverConfig;
    /// let mut config = SolverConfig::default();
    /// assert!(config.validate().is_ok());
    ///
    /// config.max_sweeps = 0;
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        let usable = |t: f64| t.is_finite() && t >= 0.0;
        if !(usable(self.rtol) && usable(self.atol)) || self.rtol + self.atol == 0.0 {
            return Err(Error::InvalidTolerance {
                rtol: self.rtol,
                atol: self.atol,
            });
        }

        if self.max_sweeps == 0 {
            return Err(Error::ZeroIterations("sweep"));
        }

        if self.max_outer_iterations == 0 {
            return Err(Error::ZeroIterations("outer iteration"));
        }

        for (field, value) in [
            ("flux", self.initial_flux),
            ("fission source", self.initial_source),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::InvalidInitialValue { field, value });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reject_bad_tolerances() {
        let mut config = SolverConfig {
            rtol: 0.0,
            atol: 0.0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidTolerance { .. })));

        config.rtol = -1e-6;
        config.atol = 1e-6;
        assert!(config.validate().is_err());

        config.rtol = f64::NAN;
        assert!(config.validate().is_err());

        // a purely absolute tolerance is fine
        config.rtol = 0.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn reject_bad_initial_values() {
        let config = SolverConfig {
            initial_source: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidInitialValue {
                field: "fission source",
                ..
            })
        ));
    }

    #[test]
    fn reject_zero_caps() {
        let config = SolverConfig {
            max_outer_iterations: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(Error::ZeroIterations("outer iteration"))
        ));
    }
}
