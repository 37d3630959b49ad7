//! Module for the structured core mesh and its construction

// crate modules
use crate::error::{Error, Result};
use crate::geometry::Lattice;
use crate::input::{CoreGeometry, MapEntry, Stack};
use crate::node::{Neighbour, Node, NodeIndex, PipeNode};
use crate::units::CM_PER_M;
use crate::Direction;

// neutronics toolbox
use ndiff_utils::ValueExt;
use ndiff_xs::Mixtures;

// standard library
use std::collections::HashMap;

// external crates
use log::{debug, info, warn};

/// Structured `(nz, ny, nx)` grid of nodes for a core
///
/// Layers `iz = 0` and `iz = nz-1` are synthetic boundary layers holding the
/// bottom and top conditions at every lateral position. Every other layer
/// corresponds to one entry of the stacks.
///
/// Nodes are stored flat in `(iz, iy, ix)` order, with `ix` varying fastest.
/// The map is immutable once built.
///
/// ## Lengths
///
/// Axial thicknesses are kept in metres as given, while the pitch is stored in
/// centimetres to match the cross sections. Use
/// [layer_thickness_cm()](MeshMap::layer_thickness_cm) for axial lengths in
/// centimetres.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshMap {
    /// Lattice type of the core map
    pub lattice: Lattice,
    /// Number of axial layers, including both boundary layers
    pub nz: usize,
    /// Number of core map rows
    pub ny: usize,
    /// Number of core map columns
    pub nx: usize,
    /// Assembly pitch (cm)
    pub pitch: f64,
    nodes: Vec<Node>,
    pipe_nodes: Vec<Option<PipeNode>>,
    dz: Vec<f64>,
}

/// Resolved mixture and pipe of one axial layer of a stack
#[derive(Debug, Clone, Copy)]
struct Layer {
    mixture: usize,
    pipe_node: PipeNode,
    dz: f64,
}

impl MeshMap {
    /// Build the mesh for a core description
    ///
    /// Mixture ids in stacks are resolved against the `mixtures` table, so the
    /// resulting [Node::Mixture] indices are valid indices into that table.
    ///
    /// The thickness of an interior layer is taken from the pipe node of the
    /// first stack met in that layer (row by row). Other stacks that disagree
    /// only produce a warning.
    pub fn build(geometry: &CoreGeometry, mixtures: &Mixtures) -> Result<Self> {
        let n_layers = Self::check_stacks(&geometry.stacks)?;
        Self::check_pipes(geometry)?;
        let (ny, nx) = Self::check_core_map(&geometry.core_map)?;

        if !(geometry.pitch.is_finite() && geometry.pitch > 0.0) {
            return Err(Error::InvalidPitch(geometry.pitch));
        }

        // only stacks that actually appear in the core map are resolved
        let mut resolved: HashMap<&str, Vec<Layer>> = HashMap::new();
        for entry in geometry.core_map.iter().flatten() {
            if let MapEntry::Stack(id) = entry {
                if !resolved.contains_key(id.as_str()) {
                    let stack = geometry
                        .stacks
                        .iter()
                        .find(|stack| &stack.id == id)
                        .ok_or_else(|| Error::UnknownStack(id.clone()))?;
                    resolved.insert(id, Self::resolve_stack(geometry, stack, mixtures)?);
                }
            }
        }

        let nz = n_layers + 2;
        let mut nodes = Vec::with_capacity(nz * ny * nx);
        let mut pipe_nodes = Vec::with_capacity(nz * ny * nx);
        let mut dz: Vec<Option<f64>> = vec![None; n_layers];

        for iz in 0..nz {
            for row in &geometry.core_map {
                for entry in row {
                    let (node, pipe_node) = match (iz, entry) {
                        (0, _) => (Node::from(geometry.bottom), None),
                        (iz, _) if iz == nz - 1 => (Node::from(geometry.top), None),
                        (_, MapEntry::Boundary(bc)) => (Node::from(*bc), None),
                        (iz, MapEntry::Stack(id)) => {
                            let layer = resolved
                                .get(id.as_str())
                                .map(|layers| layers[iz - 1])
                                .ok_or_else(|| Error::UnknownStack(id.clone()))?;
                            Self::record_thickness(&mut dz[iz - 1], layer.dz, id, iz);
                            (Node::Mixture(layer.mixture), Some(layer.pipe_node))
                        }
                    };
                    nodes.push(node);
                    pipe_nodes.push(pipe_node);
                }
            }
        }

        // every stack sets all layers, so one missing means there were none
        let dz = dz
            .into_iter()
            .collect::<Option<Vec<f64>>>()
            .ok_or(Error::NoStacksInCoreMap)?;

        let mesh = Self {
            lattice: geometry.lattice,
            nz,
            ny,
            nx,
            pitch: CM_PER_M * geometry.pitch,
            nodes,
            pipe_nodes,
            dz,
        };

        info!(
            "Built {} mesh of {}x{}x{} nodes ({} material)",
            mesh.lattice,
            mesh.nz,
            mesh.ny,
            mesh.nx,
            mesh.material_nodes().count()
        );
        debug!("Layer thicknesses (m): {:?}", mesh.dz);
        Ok(mesh)
    }

    fn check_stacks(stacks: &[Stack]) -> Result<usize> {
        let first = stacks.first().ok_or(Error::NoStacks)?;
        let n_layers = first.mixtures.len();
        if n_layers == 0 {
            return Err(Error::NoAxialLayers(first.id.clone()));
        }

        for (i, stack) in stacks.iter().enumerate() {
            if stack.mixtures.len() != n_layers {
                return Err(Error::InconsistentStackHeight {
                    stack: stack.id.clone(),
                    expected: n_layers,
                    found: stack.mixtures.len(),
                });
            }
            if stack.pipes.len() != n_layers || stack.pipe_nodes.len() != n_layers {
                return Err(Error::InconsistentStackLists(stack.id.clone()));
            }
            if stacks[..i].iter().any(|s| s.id == stack.id) {
                return Err(Error::DuplicateStack(stack.id.clone()));
            }
        }
        Ok(n_layers)
    }

    fn check_pipes(geometry: &CoreGeometry) -> Result<()> {
        match geometry
            .pipes
            .iter()
            .find(|p| p.nodes == 0 || !(p.length.is_finite() && p.length > 0.0))
        {
            Some(pipe) => Err(Error::InvalidPipe(pipe.id.clone())),
            None => Ok(()),
        }
    }

    fn check_core_map(core_map: &[Vec<MapEntry>]) -> Result<(usize, usize)> {
        let ny = core_map.len();
        let nx = core_map.first().map(|row| row.len()).unwrap_or(0);
        if ny == 0 || nx == 0 {
            return Err(Error::EmptyCoreMap);
        }

        match core_map.iter().position(|row| row.len() != nx) {
            Some(row) => Err(Error::NonSquareCoreMap {
                row,
                expected: nx,
                found: core_map[row].len(),
            }),
            None => Ok((ny, nx)),
        }
    }

    fn resolve_stack(geometry: &CoreGeometry, stack: &Stack, mixtures: &Mixtures) -> Result<Vec<Layer>> {
        let mut layers = Vec::with_capacity(stack.mixtures.len());

        for ((mixture_id, pipe_id), node) in stack
            .mixtures
            .iter()
            .zip(&stack.pipes)
            .zip(&stack.pipe_nodes)
        {
            let mixture = mixtures
                .index_of(mixture_id)
                .ok_or_else(|| Error::UnknownMixture {
                    stack: stack.id.clone(),
                    mixture: mixture_id.clone(),
                })?;

            let (pipe, p) = geometry
                .pipes
                .iter()
                .enumerate()
                .find(|(_, p)| &p.id == pipe_id)
                .ok_or_else(|| Error::UnknownPipe {
                    stack: stack.id.clone(),
                    pipe: pipe_id.clone(),
                })?;

            if *node == 0 || *node > p.nodes {
                return Err(Error::PipeNodeOutOfRange {
                    stack: stack.id.clone(),
                    pipe: pipe_id.clone(),
                    node: *node,
                    nodes: p.nodes,
                });
            }

            layers.push(Layer {
                mixture,
                pipe_node: PipeNode { pipe, node: *node },
                dz: p.node_length(),
            });
        }

        Ok(layers)
    }

    fn record_thickness(slot: &mut Option<f64>, dz: f64, stack: &str, iz: usize) {
        match slot {
            None => *slot = Some(dz),
            Some(existing) if (*existing - dz).abs() > 1e-9 * existing.abs() => {
                warn!("Warning: stack \"{stack}\" layer {iz} is {} m thick", dz.sci(5, 2));
                warn!("  - Using {} m set by an earlier stack", existing.sci(5, 2));
            }
            Some(_) => (),
        }
    }
}

// Node queries
impl MeshMap {
    /// Total number of nodes, including boundary layers
    pub fn n_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Find the flat node index from `(iz, iy, ix)` indices
    ///
    /// Loops are `iz`, then `iy`, then `ix`, with `ix` varying fastest.
    #[inline]
    pub fn flat_index(&self, index: NodeIndex) -> usize {
        (index.iz * self.ny + index.iy) * self.nx + index.ix
    }

    /// Find the `(iz, iy, ix)` indices of a flat node index
    ///
    /// The reverse of [flat_index()](MeshMap::flat_index).
    pub fn node_index(&self, flat: usize) -> NodeIndex {
        let layer = self.ny * self.nx;
        NodeIndex {
            iz: flat / layer,
            iy: (flat % layer) / self.nx,
            ix: flat % self.nx,
        }
    }

    /// Content of the node at `(iz, iy, ix)`
    #[inline]
    pub fn node(&self, index: NodeIndex) -> Node {
        self.nodes[self.flat_index(index)]
    }

    /// Integer codes of every node, `>=0` mixture, `-1` vacuum, `-2` reflective
    pub fn codes(&self) -> Vec<i64> {
        self.nodes.iter().map(Node::code).collect()
    }

    /// Pipe node of a material node, `None` for boundary nodes
    pub fn pipe_node(&self, index: NodeIndex) -> Option<PipeNode> {
        self.pipe_nodes[self.flat_index(index)]
    }

    /// Thickness of every interior layer (m), bottom to top
    pub fn layer_thicknesses(&self) -> &[f64] {
        &self.dz
    }

    /// Thickness of interior layer `iz` (cm)
    ///
    /// Only valid for `1 <= iz <= nz-2`, boundary layers have no thickness.
    #[inline]
    pub fn layer_thickness_cm(&self, iz: usize) -> f64 {
        CM_PER_M * self.dz[iz - 1]
    }

    /// Area of one lateral face over node volume (1/cm)
    pub fn side_area_over_volume(&self) -> f64 {
        self.lattice.side_area_over_volume(self.pitch)
    }

    /// Every interior `(iz, iy, ix)` in sweep order
    ///
    /// Layers increase from bottom to top, then rows, then columns. Boundary
    /// layers are skipped, but boundary positions of the core map are not.
    pub fn interior(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        (1..self.nz - 1).flat_map(move |iz| {
            (0..self.ny).flat_map(move |iy| (0..self.nx).map(move |ix| NodeIndex::new(iz, iy, ix)))
        })
    }

    /// Every interior material node in sweep order with its mixture index
    pub fn material_nodes(&self) -> impl Iterator<Item = (NodeIndex, usize)> + '_ {
        self.interior()
            .filter_map(|index| self.node(index).mixture().map(|mixture| (index, mixture)))
    }

    /// Lateral neighbours of a core map position, without bounds checks
    ///
    /// Returns the signed `(iy, ix)` of every lateral neighbour, which may lie
    /// outside of the core map.
    pub fn lateral_positions(&self, iy: usize, ix: usize) -> Vec<(Direction, isize, isize)> {
        self.lattice
            .lateral_offsets(iy)
            .iter()
            .map(|(direction, dy, dx)| (*direction, iy as isize + dy, ix as isize + dx))
            .collect()
    }

    /// Every neighbour of a node, axial faces first
    ///
    /// The order is bottom, top, then the lateral faces of the lattice (see
    /// [Lattice::lateral_offsets]). Anything outside of the mesh is reported as
    /// a reflective neighbour with no index.
    pub fn neighbours(&self, index: NodeIndex) -> Vec<Neighbour> {
        let NodeIndex { iz, iy, ix } = index;
        let mut neighbours = Vec::with_capacity(2 + self.lattice.n_lateral_faces());

        neighbours.push(self.neighbour(Direction::Bottom, iz as isize - 1, iy as isize, ix as isize));
        neighbours.push(self.neighbour(Direction::Top, iz as isize + 1, iy as isize, ix as isize));
        for (direction, y, x) in self.lateral_positions(iy, ix) {
            neighbours.push(self.neighbour(direction, iz as isize, y, x));
        }

        neighbours
    }

    fn neighbour(&self, direction: Direction, iz: isize, iy: isize, ix: isize) -> Neighbour {
        let inside = |i: isize, n: usize| i >= 0 && (i as usize) < n;
        if inside(iz, self.nz) && inside(iy, self.ny) && inside(ix, self.nx) {
            let index = NodeIndex::new(iz as usize, iy as usize, ix as usize);
            Neighbour {
                direction,
                index: Some(index),
                node: self.node(index),
            }
        } else {
            Neighbour {
                direction,
                index: None,
                node: Node::Reflective,
            }
        }
    }
}
