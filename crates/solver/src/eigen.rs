//! Outer power iteration for the fission source and k-effective

// crate modules
use crate::config::SolverConfig;
use crate::error::{Error, Result};
use crate::field::{FissionSource, FluxField};
use crate::observer::{Observer, OuterStep};
use crate::operator::DiffusionOperator;
use crate::sweep::DiffusionSweepSolver;

// neutronics toolbox
use ndiff_mesh::{MeshMap, NodeIndex};
use ndiff_utils::{Tolerance, ValueExt};
use ndiff_xs::{CrossSectionSet, Mixtures};

// external crates
use itertools::izip;
use log::{info, trace, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// How an outer iteration loop ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    /// Fission source and eigenvalue converged in the same step
    Converged,
    /// The outer iteration cap was reached first
    IterationLimit,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::Converged => write!(f, "Converged"),
            Self::IterationLimit => write!(f, "Iteration limit reached"),
        }
    }
}

/// Result of an eigenvalue calculation
///
/// The flux and fission source are normalised so that the mean fission source
/// over material nodes is one. Both use the flat node order of the mesh, see
/// [MeshMap::flat_index].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    /// Multigroup flux of every node
    pub flux: FluxField,
    /// Fission source of every node
    pub fission_source: FissionSource,
    /// Every eigenvalue estimate, starting from the initial guess of 1
    pub k: Vec<f64>,
    /// Whether the solve converged
    pub status: Status,
    /// Total outer iterations performed
    pub outer_iterations: usize,
}

impl Solution {
    /// Final estimate of k-effective
    pub fn k_effective(&self) -> f64 {
        // k always holds at least the initial guess
        self.k.last().copied().unwrap_or(1.0)
    }

    /// Check if the solve converged
    pub fn is_converged(&self) -> bool {
        self.status == Status::Converged
    }
}

impl std::fmt::Display for Solution {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        // only material nodes carry flux
        let peak = self.flux.as_slice().iter().copied().fold(0.0, f64::max);
        writeln!(f, "Status:           {}", self.status)?;
        writeln!(f, "Outer iterations: {}", self.outer_iterations)?;
        writeln!(f, "k-effective:      {}", self.k_effective().keff())?;
        writeln!(f, "Peak flux:        {}", peak.sci(5, 2))?;
        write!(f, "Energy groups:    {}", self.flux.n_groups())
    }
}

/// Fission source recompute totals for one axial layer
#[derive(Debug, Clone, Copy)]
struct LayerSource {
    old: f64,
    new: f64,
    max_change: f64,
    converged: bool,
}

impl Default for LayerSource {
    fn default() -> Self {
        Self {
            old: 0.0,
            new: 0.0,
            max_change: 0.0,
            converged: true,
        }
    }
}

/// Power iteration on the fission source
///
/// Owns the mesh, the mixtures, and the evolving flux, fission source and
/// eigenvalue history. Each [step()](EigenvalueIterator::step):
///
/// 1. sweeps the flux for the current source and eigenvalue
/// 2. recomputes the fission source `sum(sigp * flux)` at every material node
/// 3. updates `k = k_old * S_new / S_old`, with `S` the total fission source
/// 4. rescales the flux and source so the mean source is one
///
/// The iteration is converged once the source and the eigenvalue are both
/// within tolerance in the same step.
///
/// ```rust, no_run
/// # use ndiff_solver::{read_case, EigenvalueIterator, Logger};
/// let case = read_case("path/to/case.json").unwrap();
/// let mut iterator = case.iterator().unwrap();
///
/// let solution = iterator.solve(&mut Logger).unwrap();
/// println!("k-effective = {}", solution.k_effective());
/// ```
#[derive(Debug, Clone)]
pub struct EigenvalueIterator {
    mesh: MeshMap,
    mixtures: Mixtures,
    config: SolverConfig,
    operator: DiffusionOperator,
    flux: FluxField,
    source: FissionSource,
    k: Vec<f64>,
    converged: bool,
}

impl EigenvalueIterator {
    /// Set up an iteration with a uniform starting flux and source
    ///
    /// The mesh must have been built against the same mixture table.
    pub fn new(mesh: MeshMap, mixtures: Mixtures, config: SolverConfig) -> Result<Self> {
        config.validate()?;
        let operator = DiffusionOperator::new(&mesh, &mixtures)?;
        let flux = FluxField::for_mesh(&mesh, mixtures.n_groups(), config.initial_flux);
        let source = FissionSource::for_mesh(&mesh, config.initial_source);

        info!(
            "Eigenvalue iteration: {} material nodes, {} groups",
            operator.nodes().len(),
            mixtures.n_groups()
        );

        Ok(Self {
            mesh,
            mixtures,
            config,
            operator,
            flux,
            source,
            k: vec![1.0],
            converged: false,
        })
    }

    /// Perform a single outer iteration
    ///
    /// Fails only if the fission source vanishes, i.e. there is no fissile
    /// material the flux can reach.
    pub fn step<O: Observer + ?Sized>(&mut self, observer: &mut O) -> Result<OuterStep> {
        let outer = self.k.len();
        let k_old = self.k_effective();
        let tolerance = self.config.tolerance();

        let sweeps = DiffusionSweepSolver::new(&self.operator, &self.mixtures, &self.config)
            .solve(&mut self.flux, &self.source, k_old, outer, observer);

        let update = self.update_fission_source(tolerance);
        if !(update.new.is_finite() && update.new > 0.0 && update.old > 0.0) {
            return Err(Error::NoFissionSource);
        }

        let k_new = k_old * update.new / update.old;
        let k_converged = tolerance.accepts(k_new, k_old);
        self.k.push(k_new);

        // mean source over material nodes back to one, other nodes stay zero
        let factor = self.operator.nodes().len() as f64 / update.new;
        self.source.scale(factor);
        self.flux.scale(factor);

        let step = OuterStep {
            outer,
            k: k_new,
            sweeps: sweeps.sweeps,
            sweeps_converged: sweeps.converged,
            source_converged: update.converged,
            k_converged,
            max_source_change: update.max_change,
        };

        self.converged = step.converged();
        observer.on_outer(&step);
        Ok(step)
    }

    /// Iterate until converged or the outer iteration cap is reached
    ///
    /// The cap applies to each call, so a solve that hit the limit may simply
    /// be continued. Calling this again on a converged iterator performs one
    /// more step, which leaves the solution unchanged within tolerance.
    pub fn solve<O: Observer + ?Sized>(&mut self, observer: &mut O) -> Result<Solution> {
        for _ in 0..self.config.max_outer_iterations {
            if self.step(observer)?.converged() {
                info!(
                    "Converged after {} outer iterations, k = {}",
                    self.outer_iterations(),
                    self.k_effective().keff()
                );
                return Ok(self.solution(Status::Converged));
            }
        }

        warn!(
            "Warning: no convergence after {} outer iterations",
            self.config.max_outer_iterations
        );
        warn!("  - Last estimate k = {}", self.k_effective().keff());
        Ok(self.solution(Status::IterationLimit))
    }

    /// Replace the cross sections of one mixture and keep iterating from here
    ///
    /// The operator is rebuilt for the new cross sections while the current
    /// flux, source and eigenvalue are kept as a warm start. Nothing changes
    /// if the new set is rejected.
    pub fn update_mixture(&mut self, id: &str, xs: CrossSectionSet) -> Result<()> {
        let mut mixtures = self.mixtures.clone();
        mixtures.replace(id, xs)?;
        let operator = DiffusionOperator::new(&self.mesh, &mixtures)?;

        self.mixtures = mixtures;
        self.operator = operator;
        self.converged = false;
        info!("Updated cross sections of mixture \"{id}\"");
        Ok(())
    }

    /// Snapshot of the current state as a [Solution]
    pub fn solution(&self, status: Status) -> Solution {
        Solution {
            flux: self.flux.clone(),
            fission_source: self.source.clone(),
            k: self.k.clone(),
            status,
            outer_iterations: self.outer_iterations(),
        }
    }

    /// Recompute the fission source of every material node, layer by layer
    fn update_fission_source(&mut self, tolerance: Tolerance) -> LayerSource {
        let (nz, nx) = (self.mesh.nz, self.mesh.nx);
        let layer_size = self.mesh.ny * nx;
        let n_groups = self.flux.n_groups();
        let mesh = &self.mesh;
        let mixtures = &self.mixtures;

        let layers: Vec<LayerSource> = self
            .source
            .as_mut_slice()
            .par_chunks_mut(layer_size)
            .zip(self.flux.as_slice().par_chunks(layer_size * n_groups))
            .enumerate()
            .filter(|(iz, _)| *iz > 0 && *iz < nz - 1)
            .map(|(iz, (qf, flux))| {
                let mut layer = LayerSource::default();
                for (i, q, spectrum) in izip!(0.., qf.iter_mut(), flux.chunks(n_groups)) {
                    let index = NodeIndex::new(iz, i / nx, i % nx);
                    if let Some(mixture) = mesh.node(index).mixture() {
                        let new = mixtures.xs(mixture).production(spectrum);
                        layer.old += *q;
                        layer.new += new;
                        layer.max_change = layer.max_change.max((new - *q).abs());
                        layer.converged &= tolerance.accepts(new, *q);
                        *q = new;
                    }
                }
                trace!("  layer {iz}: fission source {}", layer.new.sci(5, 2));
                layer
            })
            .collect();

        // reduced in layer order for reproducible sums
        layers
            .into_iter()
            .fold(LayerSource::default(), |total, layer| LayerSource {
                old: total.old + layer.old,
                new: total.new + layer.new,
                max_change: total.max_change.max(layer.max_change),
                converged: total.converged && layer.converged,
            })
    }
}

// State queries
impl EigenvalueIterator {
    /// Latest eigenvalue estimate
    pub fn k_effective(&self) -> f64 {
        self.k.last().copied().unwrap_or(1.0)
    }

    /// Every eigenvalue estimate so far, starting from the initial guess
    pub fn k_history(&self) -> &[f64] {
        &self.k
    }

    /// Outer iterations performed since construction
    pub fn outer_iterations(&self) -> usize {
        self.k.len() - 1
    }

    /// Whether the last step converged
    pub fn is_converged(&self) -> bool {
        self.converged
    }

    /// Current flux
    pub fn flux(&self) -> &FluxField {
        &self.flux
    }

    /// Current fission source
    pub fn fission_source(&self) -> &FissionSource {
        &self.source
    }

    /// Mesh being solved
    pub fn mesh(&self) -> &MeshMap {
        &self.mesh
    }

    /// Current mixture table
    pub fn mixtures(&self) -> &Mixtures {
        &self.mixtures
    }

    /// Precomputed operator for the current mixtures
    pub fn operator(&self) -> &DiffusionOperator {
        &self.operator
    }

    /// Solver settings
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }
}
