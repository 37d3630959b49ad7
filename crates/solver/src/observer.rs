//! Hooks for reporting iteration progress

// crate modules
use crate::error::{Error, Result};

// neutronics toolbox
use ndiff_utils::{f, ValueExt};

// external crates
use kdam::{Bar, BarBuilder, BarExt};
use log::{debug, info, warn};

/// Report of a single Gauss-Seidel sweep
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepProgress {
    /// Outer iteration the sweep belongs to, starting from 1
    pub outer: usize,
    /// Sweep number within the outer iteration, starting from 1
    pub sweep: usize,
    /// Maximum sweeps allowed per outer iteration
    pub max_sweeps: usize,
    /// Every flux update was within tolerance
    pub converged: bool,
    /// Largest absolute flux change
    pub max_change: f64,
}

/// Report of a single outer iteration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OuterStep {
    /// Outer iteration number, starting from 1
    pub outer: usize,
    /// New eigenvalue estimate
    pub k: f64,
    /// Sweeps performed
    pub sweeps: usize,
    /// Last sweep was converged
    pub sweeps_converged: bool,
    /// Every fission source value was within tolerance of the last
    pub source_converged: bool,
    /// Eigenvalue was within tolerance of the last
    pub k_converged: bool,
    /// Largest absolute fission source change, before normalisation
    pub max_source_change: f64,
}

impl OuterStep {
    /// Both the fission source and the eigenvalue have converged
    pub fn converged(&self) -> bool {
        self.source_converged && self.k_converged
    }
}

/// Receives progress reports from the solvers
///
/// Both hooks do nothing by default. Any `FnMut(&OuterStep)` closure is an
/// observer of outer iterations.
///
/// ```rust
/// # use ndiff_solver::{Observer, OuterStep};
/// let mut history = Vec::new();
/// let mut observer = |step: &OuterStep| history.push(step.k);
/// # fn takes(_: &mut impl Observer) {}
/// # takes(&mut observer);
/// ```
pub trait Observer {
    /// Called after every sweep
    fn on_sweep(&mut self, _progress: &SweepProgress) {}

    /// Called after every outer iteration
    fn on_outer(&mut self, _step: &OuterStep) {}
}

impl<F: FnMut(&OuterStep)> Observer for F {
    fn on_outer(&mut self, step: &OuterStep) {
        self(step)
    }
}

/// Observer that ignores everything
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl Observer for Silent {}

/// Observer that writes progress to the `log` facade
///
/// Sweeps are logged at `debug` level and outer iterations at `info` level.
#[derive(Debug, Default, Clone, Copy)]
pub struct Logger;

impl Observer for Logger {
    fn on_sweep(&mut self, progress: &SweepProgress) {
        debug!(
            "  sweep {}/{}: max change {} {}",
            progress.sweep,
            progress.max_sweeps,
            progress.max_change.sci(3, 2),
            if progress.converged { "(converged)" } else { "" }
        );
    }

    fn on_outer(&mut self, step: &OuterStep) {
        info!(
            "Outer {:>4}: k = {}, {} sweeps, source change {}{}",
            step.outer,
            step.k.keff(),
            step.sweeps,
            step.max_source_change.sci(3, 2),
            if step.converged() { ", converged" } else { "" }
        );
    }
}

/// Terminal progress bar over outer iterations
///
/// The bar counts up to the outer iteration cap and shows the latest
/// eigenvalue as a postfix.
pub struct ProgressBar {
    bar: Bar,
}

impl std::fmt::Debug for ProgressBar {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("ProgressBar").finish_non_exhaustive()
    }
}

impl ProgressBar {
    /// New bar for a solve of at most `max_outer_iterations`
    pub fn new(max_outer_iterations: usize) -> Result<Self> {
        let bar = BarBuilder::default()
            .total(max_outer_iterations)
            .desc("Outer iterations")
            .unit(" it")
            .leave(true)
            .build()
            .map_err(Error::ProgressBar)?;
        Ok(Self { bar })
    }
}

impl Observer for ProgressBar {
    fn on_outer(&mut self, step: &OuterStep) {
        self.bar.set_postfix(f!("k={}", step.k.keff()));
        if let Err(e) = self.bar.update(1) {
            warn!("Warning: Failed to update progress bar: {e}");
        }
        if step.converged() {
            if let Err(e) = self.bar.refresh() {
                warn!("Warning: Failed to refresh progress bar: {e}");
            }
            eprintln!();
        }
    }
}
