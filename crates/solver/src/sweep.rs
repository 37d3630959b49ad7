//! Gauss-Seidel sweeps of the multigroup diffusion equations

// crate modules
use crate::config::SolverConfig;
use crate::field::{FissionSource, FluxField};
use crate::observer::{Observer, SweepProgress};
use crate::operator::{DiffusionOperator, NodeTerms};

// neutronics toolbox
use ndiff_utils::Tolerance;
use ndiff_xs::{Mixtures, N2N_YIELD};

/// Outcome of the sweeps for one outer iteration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepSummary {
    /// Number of sweeps performed
    pub sweeps: usize,
    /// Last sweep had every update within tolerance
    pub converged: bool,
    /// Largest absolute flux change of the last sweep
    pub max_change: f64,
}

/// Inner solver for the flux at a fixed fission source and eigenvalue
///
/// Every sweep visits material nodes in order of increasing layer, row and
/// column, and updates groups from the slowest to the fastest. New values are
/// used as soon as they are available, so the order changes the result of a
/// single sweep.
///
/// For each node and group the flux is replaced by
///
/// ```text
/// (leakage in + scattering in + n2n in + chi * qf / k) / removal
/// ```
///
/// Sweeping stops at the first sweep where every update is within tolerance,
/// or after the sweep limit. Partial convergence is fine, the outer iteration
/// carries on from whatever flux was reached.
#[derive(Debug, Clone, Copy)]
pub struct DiffusionSweepSolver<'a> {
    operator: &'a DiffusionOperator,
    mixtures: &'a Mixtures,
    tolerance: Tolerance,
    max_sweeps: usize,
}

impl<'a> DiffusionSweepSolver<'a> {
    /// New sweep solver over a precomputed operator
    pub fn new(operator: &'a DiffusionOperator, mixtures: &'a Mixtures, config: &SolverConfig) -> Self {
        Self {
            operator,
            mixtures,
            tolerance: config.tolerance(),
            max_sweeps: config.max_sweeps,
        }
    }

    /// Sweep until converged or out of sweeps
    ///
    /// `outer` is only passed through to the observer.
    pub fn solve<O: Observer + ?Sized>(
        &self,
        flux: &mut FluxField,
        source: &FissionSource,
        k: f64,
        outer: usize,
        observer: &mut O,
    ) -> SweepSummary {
        let mut summary = SweepSummary {
            sweeps: 0,
            converged: false,
            max_change: 0.0,
        };

        while summary.sweeps < self.max_sweeps && !summary.converged {
            let (converged, max_change) = self.sweep(flux, source, k);
            summary = SweepSummary {
                sweeps: summary.sweeps + 1,
                converged,
                max_change,
            };

            observer.on_sweep(&SweepProgress {
                outer,
                sweep: summary.sweeps,
                max_sweeps: self.max_sweeps,
                converged,
                max_change,
            });
        }

        summary
    }

    /// A single pass over every material node
    ///
    /// Returns whether every update was within tolerance, and the largest
    /// absolute change.
    pub fn sweep(&self, flux: &mut FluxField, source: &FissionSource, k: f64) -> (bool, f64) {
        let mut converged = true;
        let mut max_change = 0.0_f64;

        for terms in self.operator.nodes() {
            let fission = source.get(terms.flat) / k;
            for g in (0..self.operator.n_groups()).rev() {
                let old = flux.get(terms.flat, g);
                let new = self.update(terms, flux, fission, g);
                converged &= self.tolerance.accepts(new, old);
                max_change = max_change.max((new - old).abs());
                flux.set(terms.flat, g, new);
            }
        }

        (converged, max_change)
    }

    /// New flux of one group in one node
    #[inline]
    fn update(&self, terms: &NodeTerms, flux: &FluxField, fission: f64, g: usize) -> f64 {
        let xs = self.mixtures.xs(terms.mixture);
        let spectrum = flux.node(terms.flat);

        let leakage = terms
            .couplings
            .iter()
            .map(|c| c.values[g] * flux.get(c.neighbour, g))
            .sum::<f64>();

        let scattering = xs
            .scattering_into(g)
            .map(|(from, value)| value * spectrum[from])
            .sum::<f64>();

        let n2n = N2N_YIELD
            * xs.n2n_into(g)
                .map(|(from, value)| value * spectrum[from])
                .sum::<f64>();

        (leakage + scattering + n2n + xs.chi[g] * fission) / terms.removal[g]
    }
}
