//! Flat storage for the flux and fission source fields

// neutronics toolbox
use ndiff_mesh::MeshMap;

// external crates
use serde::{Deserialize, Serialize};

/// Multigroup scalar flux for every node of a mesh
///
/// Values are stored flat in the node order of the [MeshMap], with all groups
/// of a node next to each other. Boundary and empty nodes are allocated but
/// hold zero and are never updated.
///
/// ```rust
/// # use ndiff_solver::FluxField;
/// let mut flux = FluxField::new(3, 2, 1.0);
/// flux.set(1, 0, 4.0);
/// assert_eq!(flux.node(1), &[4.0, 1.0]);
/// assert_eq!(flux.get(2, 1), 1.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FluxField {
    n_groups: usize,
    values: Vec<f64>,
}

impl FluxField {
    /// Uniform flux for `n_nodes` nodes of `n_groups` groups
    pub fn new(n_nodes: usize, n_groups: usize, initial: f64) -> Self {
        Self {
            n_groups,
            values: vec![initial; n_nodes * n_groups],
        }
    }

    /// Flux sized for a mesh, `initial` in material nodes and zero elsewhere
    pub fn for_mesh(mesh: &MeshMap, n_groups: usize, initial: f64) -> Self {
        let mut flux = Self::new(mesh.n_nodes(), n_groups, 0.0);
        for (index, _) in mesh.material_nodes() {
            let flat = mesh.flat_index(index);
            flux.values[flat * n_groups..(flat + 1) * n_groups].fill(initial);
        }
        flux
    }

    /// Number of energy groups
    pub fn n_groups(&self) -> usize {
        self.n_groups
    }

    /// Number of nodes
    pub fn n_nodes(&self) -> usize {
        self.values.len() / self.n_groups
    }

    /// Flux of one group in a node
    #[inline]
    pub fn get(&self, node: usize, group: usize) -> f64 {
        self.values[node * self.n_groups + group]
    }

    /// Set the flux of one group in a node
    #[inline]
    pub fn set(&mut self, node: usize, group: usize, value: f64) {
        self.values[node * self.n_groups + group] = value;
    }

    /// Flux spectrum of a node, one value per group
    #[inline]
    pub fn node(&self, node: usize) -> &[f64] {
        let start = node * self.n_groups;
        &self.values[start..start + self.n_groups]
    }

    /// All values, in node then group order
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Multiply every value by a factor
    pub fn scale(&mut self, factor: f64) {
        self.values.iter_mut().for_each(|v| *v *= factor);
    }
}

/// Fission neutron production rate `sum(sigp * flux)` for every node
///
/// Stored flat in the node order of the [MeshMap]. Only interior mixture nodes
/// are ever updated, every other node holds zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FissionSource {
    values: Vec<f64>,
}

impl FissionSource {
    /// Uniform source for `n_nodes` nodes
    pub fn new(n_nodes: usize, initial: f64) -> Self {
        Self {
            values: vec![initial; n_nodes],
        }
    }

    /// Source sized for a mesh, `initial` in material nodes and zero elsewhere
    pub fn for_mesh(mesh: &MeshMap, initial: f64) -> Self {
        let mut source = Self::new(mesh.n_nodes(), 0.0);
        for (index, _) in mesh.material_nodes() {
            source.values[mesh.flat_index(index)] = initial;
        }
        source
    }

    /// Source in a node
    #[inline]
    pub fn get(&self, node: usize) -> f64 {
        self.values[node]
    }

    /// All values, in node order
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// All values for in-place updates
    pub(crate) fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.values
    }

    /// Multiply every value by a factor
    pub fn scale(&mut self, factor: f64) {
        self.values.iter_mut().for_each(|v| *v *= factor);
    }
}
