//! Structured core meshes from core maps, stacks and pipes
#![doc = include_str!("../readme.md")]

// Split into subfiles for development, but anything important is re-exported
mod error;
mod geometry;
mod input;
mod mesh;
mod node;
mod units;

// inline important the mesh-related modules for a nice public API
#[doc(inline)]
pub use geometry::{Direction, Lattice};

#[doc(inline)]
pub use input::{read_geometry, BoundaryCondition, CoreGeometry, MapEntry, Pipe, Stack};

#[doc(inline)]
pub use mesh::MeshMap;

#[doc(inline)]
pub use node::{Neighbour, Node, NodeIndex, PipeNode};

#[doc(inline)]
pub use units::{CM_PER_M, HALF_CM_PER_M, M_PER_CM};

#[doc(inline)]
pub use error::{Error, Result};
