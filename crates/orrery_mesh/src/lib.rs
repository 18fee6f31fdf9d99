//! Triangle meshes for the parametric surfaces of the scene: spheres
//! tessellated on a latitude/longitude grid and tori tessellated on a
//! tube/ring grid.
//!
//! Every mesh is a flat list of [`Vertex`] triples, one per triangle, ready to
//! upload to a vertex buffer with [`Mesh::as_bytes()`].

mod error;
mod grid;
mod mesh;
mod sphere;
mod torus;
mod vertex;

pub use error::MeshError;
pub use mesh::Mesh;
pub use sphere::build_sphere;
pub use torus::build_torus;
pub use vertex::{Vertex, VertexAttribute};
