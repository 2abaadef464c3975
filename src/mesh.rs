//! Mesh generation with `blockMesh` and `snappyHexMesh`.
//!
//! The usual pipeline is:
//!
//! 1. Write and run a [`BlockMesh`] that bounds the geometry.
//! 2. Import one or more STL surfaces as [`Geometry`].
//! 3. Configure [`SnappyHexMesh`] and call
//!    [`generate_mesh`](SnappyHexMesh::generate_mesh), which extracts surface
//!    features, writes the mesh quality and snappy dictionaries, then runs
//!    `snappyHexMesh`.
//! 4. Unless [`SnappyHexMesh::overwrite`] is set, move the final mesh into
//!    `constant/polyMesh` with [`promote_latest_mesh`].
//!
//! The OpenFOAM executables themselves are external; this module only
//! writes their input and launches them through [`Case::run_tool`](crate::case::Case::run_tool).

mod block;
mod error;
mod geometry;
mod quality;
mod snappy;

pub use block::{BlockMesh, BoxFace, Edge, HexBlock, Patch};
pub use error::MeshError;
pub use geometry::{Geometry, GeometryFormat, add_features, load_multiple_geometries};
pub use quality::MeshQuality;
pub use snappy::{SnappyHexMesh, promote_latest_mesh};

/// Converts a point to a dictionary list, `(x y z)`.
pub(crate) fn point(p: [f64; 3]) -> crate::dict::Value {
    crate::dict::Value::list(p)
}
