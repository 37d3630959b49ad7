//! Complete calculation cases read from JSON

// crate modules
use crate::config::SolverConfig;
use crate::eigen::{EigenvalueIterator, Solution};
use crate::error::Result;
use crate::observer::Observer;

// neutronics toolbox
use ndiff_mesh::{CoreGeometry, MeshMap};
use ndiff_xs::Mixtures;

// standard library
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

// external crates
use log::info;
use serde::{Deserialize, Serialize};

/// Everything needed for an eigenvalue calculation
///
/// The solver settings may be left out of a case file entirely, in which case
/// the defaults are used.
///
/// ```rust
/// # use ndiff_solver::{Case, Silent};
/// let text = r#"{
///     "geometry": {
///         "lattice": "square",
///         "pitch": 0.2,
///         "bottom": 1,
///         "top": 1,
///         "core_map": [["fa"]],
///         "stacks": [{"id": "fa", "mixtures": ["fuel"], "pipes": ["p"], "pipe_nodes": [1]}],
///         "pipes": [{"id": "p", "length": 0.1, "nodes": 1}]
///     },
///     "mixtures": [
///         {"id": "fuel", "sigt": [0.5], "sigp": [0.12], "chi": [1.0], "sigs": [[[0, 0], 0.4]]}
///     ]
/// }"#;
///
/// let case: Case = serde_json::from_str(text).unwrap();
/// let solution = case.solve(&mut Silent).unwrap();
///
/// // infinite medium, k = sigp / (sigt - sigs)
/// assert!((solution.k_effective() - 1.2).abs() < 1e-5);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Case {
    /// Core description
    pub geometry: CoreGeometry,
    /// Cross sections of every mixture
    pub mixtures: Mixtures,
    /// Solver settings
    #[serde(default)]
    pub solver: SolverConfig,
}

impl Case {
    /// Build the mesh for this case
    pub fn mesh(&self) -> Result<MeshMap> {
        Ok(MeshMap::build(&self.geometry, &self.mixtures)?)
    }

    /// Set up an iteration without running it
    pub fn iterator(&self) -> Result<EigenvalueIterator> {
        EigenvalueIterator::new(self.mesh()?, self.mixtures.clone(), self.solver.clone())
    }

    /// Solve the case from scratch
    pub fn solve<O: Observer + ?Sized>(&self, observer: &mut O) -> Result<Solution> {
        self.iterator()?.solve(observer)
    }
}

/// Read a JSON case file
///
/// Mixtures are validated while reading, the geometry is only checked once a
/// mesh is built.
///
/// ```rust, no_run
/// # use ndiff_solver::{read_case, Case};
/// let case: Case = read_case("path/to/case.json").unwrap();
/// ```
pub fn read_case<P: AsRef<Path>>(path: P) -> Result<Case> {
    info!("Reading case from {}", path.as_ref().display());
    let reader = BufReader::new(File::open(path)?);
    let case: Case = serde_json::from_reader(reader)?;
    case.solver.validate()?;
    Ok(case)
}
