use serde::Serialize;

use crate::Vertex;

/// Triangle list for a surface. Every three consecutive vertices form one
/// triangle.
#[derive(Serialize, Debug, Default, Clone, PartialEq)]
pub struct Mesh {
    vertices: Vec<Vertex>,
}

impl Mesh {
    pub(crate) fn from_triangle_list(vertices: Vec<Vertex>) -> Self {
        debug_assert_eq!(0, vertices.len() % 3, "triangle list length");
        Self { vertices }
    }

    /// Returns the number of vertices, which is three times the number of
    /// triangles.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }
    /// Returns the number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    /// Returns all vertices in draw order.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }
    /// Iterates over triangles.
    pub fn triangles(&self) -> impl Iterator<Item = &[Vertex; 3]> {
        self.vertices.as_chunks::<3>().0.iter()
    }

    /// Returns the vertex buffer as raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}
