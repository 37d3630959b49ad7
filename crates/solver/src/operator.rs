//! Precomputed finite difference couplings of the diffusion operator

// crate modules
use crate::error::{Error, Result};

// neutronics toolbox
use ndiff_mesh::{Direction, MeshMap, Neighbour, Node, NodeIndex, HALF_CM_PER_M, M_PER_CM};
use ndiff_xs::{CrossSectionSet, Mixtures};

// external crates
use log::debug;

/// Extrapolation distance factor for vacuum faces, in mean free paths
pub const EXTRAPOLATION_FACTOR: f64 = 0.71;

/// Coupling to a neighbouring material node through one face
#[derive(Debug, Clone, PartialEq)]
pub struct Coupling {
    /// Face the neighbour is behind
    pub direction: Direction,
    /// Flat index of the neighbour
    pub neighbour: usize,
    /// Coupling coefficient per group (1/cm)
    pub values: Vec<f64>,
}

/// Everything needed to update the flux of one material node
#[derive(Debug, Clone, PartialEq)]
pub struct NodeTerms {
    /// Position of the node
    pub index: NodeIndex,
    /// Flat index of the node
    pub flat: usize,
    /// Index into the mixture table
    pub mixture: usize,
    /// Diagonal removal coefficient per group, including all face leakage
    pub removal: Vec<f64>,
    /// Material neighbours the node exchanges neutrons with
    pub couplings: Vec<Coupling>,
}

/// Discrete diffusion operator of a mesh and mixture snapshot
///
/// Face couplings only depend on geometry and total cross sections, so they
/// are computed once and reused by every sweep until the mixtures change.
///
/// Every face of a material node is one of:
///
/// | Neighbour  | Axial coupling                                   | Lateral coupling                   |
/// | ---------- | ------------------------------------------------ | ---------------------------------- |
/// | Mixture    | `D_ab / (50(dz_a+dz_b)) · 0.01/dz_a`             | `D_ab / pitch · A/V`               |
/// | Vacuum     | `D_a / (50 dz_a + 0.71/σ_a) · 0.01/dz_a`         | `D_a / (pitch/2 + 0.71/σ_a) · A/V` |
/// | Reflective | none                                             | none                               |
///
/// where `D_a = 1/(3σ_a)`, axial `D_ab = (dz_a+dz_b)/(3σ_a dz_a + 3σ_b dz_b)`,
/// lateral `D_ab = 2/(3σ_a + 3σ_b)` and `A/V` is the side area over volume of
/// the lattice. Thicknesses are in metres and the pitch in centimetres.
///
/// Nodes are stored in sweep order.
#[derive(Debug, Clone, PartialEq)]
pub struct DiffusionOperator {
    n_groups: usize,
    nodes: Vec<NodeTerms>,
}

impl DiffusionOperator {
    /// Precompute the couplings of every material node
    ///
    /// Fails if the mesh refers to mixtures that are not in the table, or if a
    /// node ends up with no way of removing neutrons from a group.
    pub fn new(mesh: &MeshMap, mixtures: &Mixtures) -> Result<Self> {
        let n_groups = mixtures.n_groups();
        let mut nodes = Vec::new();

        for (index, mixture) in mesh.material_nodes() {
            let xs = Self::lookup(mixtures, mixture)?;
            let mut removal: Vec<f64> = (0..n_groups).map(|g| xs.removal(g)).collect();
            let mut couplings = Vec::new();

            for neighbour in mesh.neighbours(index) {
                match (neighbour.node, neighbour.index) {
                    (Node::Mixture(other), Some(other_index)) => {
                        let other_xs = Self::lookup(mixtures, other)?;
                        let values: Vec<f64> = (0..n_groups)
                            .map(|g| Self::interface(mesh, index, xs, &neighbour, other_xs, g))
                            .collect();
                        removal.iter_mut().zip(&values).for_each(|(r, c)| *r += c);
                        couplings.push(Coupling {
                            direction: neighbour.direction,
                            neighbour: mesh.flat_index(other_index),
                            values,
                        });
                    }
                    (Node::Vacuum, _) => {
                        for (g, r) in removal.iter_mut().enumerate() {
                            *r += Self::vacuum(mesh, index, xs, neighbour.direction, g);
                        }
                    }
                    _ => (),
                }
            }

            if let Some(group) = removal.iter().position(|r| !(r.is_finite() && *r > 0.0)) {
                return Err(Error::NonPositiveRemoval { index, group });
            }

            nodes.push(NodeTerms {
                index,
                flat: mesh.flat_index(index),
                mixture,
                removal,
                couplings,
            });
        }

        debug!(
            "Diffusion operator: {} material nodes, {} couplings",
            nodes.len(),
            nodes.iter().map(|n| n.couplings.len()).sum::<usize>()
        );

        Ok(Self { n_groups, nodes })
    }

    /// Number of energy groups
    pub fn n_groups(&self) -> usize {
        self.n_groups
    }

    /// Material nodes in sweep order
    pub fn nodes(&self) -> &[NodeTerms] {
        &self.nodes
    }

    /// Terms of the material node at a flat index, if there is one
    pub fn find(&self, flat: usize) -> Option<&NodeTerms> {
        self.nodes.iter().find(|n| n.flat == flat)
    }

    fn lookup(mixtures: &Mixtures, mixture: usize) -> Result<&CrossSectionSet> {
        if mixture < mixtures.len() {
            Ok(mixtures.xs(mixture))
        } else {
            Err(Error::MixtureIndexOutOfRange(mixture))
        }
    }

    /// Coupling between two material nodes
    fn interface(
        mesh: &MeshMap,
        index: NodeIndex,
        xs: &CrossSectionSet,
        neighbour: &Neighbour,
        other_xs: &CrossSectionSet,
        g: usize,
    ) -> f64 {
        let (sa, sb) = (xs.sigt[g], other_xs.sigt[g]);

        match neighbour.index {
            Some(other) if neighbour.direction.is_axial() => {
                let dz_a = mesh.layer_thicknesses()[index.iz - 1];
                let dz_b = mesh.layer_thicknesses()[other.iz - 1];
                let d = (dz_a + dz_b) / (3.0 * sa * dz_a + 3.0 * sb * dz_b);
                let distance = HALF_CM_PER_M * (dz_a + dz_b);
                d / distance * M_PER_CM / dz_a
            }
            _ => {
                let d = 2.0 / (3.0 * sa + 3.0 * sb);
                d / mesh.pitch * mesh.side_area_over_volume()
            }
        }
    }

    /// Leakage coefficient through a vacuum face, with no return current
    fn vacuum(mesh: &MeshMap, index: NodeIndex, xs: &CrossSectionSet, direction: Direction, g: usize) -> f64 {
        let sigma = xs.sigt[g];
        let extrapolation = EXTRAPOLATION_FACTOR / sigma;

        if direction.is_axial() {
            let dz = mesh.layer_thicknesses()[index.iz - 1];
            xs.diffusion_coefficient(g) / (HALF_CM_PER_M * dz + extrapolation) * M_PER_CM / dz
        } else {
            xs.diffusion_coefficient(g) / (0.5 * mesh.pitch + extrapolation)
                * mesh.side_area_over_volume()
        }
    }
}
