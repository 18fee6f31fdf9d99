use cgmath::{Vector2, Vector3};
use serde::Serialize;

/// Vertex of a surface mesh, laid out for a GPU vertex buffer.
#[repr(C)]
#[derive(Serialize, Debug, Default, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Position in model space.
    pub position: [f32; 3],
    /// Unit surface normal.
    pub normal: [f32; 3],
    /// Texture coordinates.
    pub tex_coords: [f32; 2],
}

/// Location and size of one attribute within a [`Vertex`].
#[derive(Serialize, Debug, Copy, Clone, PartialEq, Eq)]
pub struct VertexAttribute {
    /// Shader location.
    pub location: u32,
    /// Offset in bytes from the start of the vertex.
    pub offset: usize,
    /// Number of `f32` components.
    pub components: usize,
}

impl Vertex {
    /// Size of one vertex in bytes.
    pub const STRIDE: usize = std::mem::size_of::<Self>();

    /// Attributes in shader location order: position, normal, texture
    /// coordinates.
    pub const ATTRIBUTES: [VertexAttribute; 3] = [
        VertexAttribute {
            location: 0,
            offset: std::mem::offset_of!(Vertex, position),
            components: 3,
        },
        VertexAttribute {
            location: 1,
            offset: std::mem::offset_of!(Vertex, normal),
            components: 3,
        },
        VertexAttribute {
            location: 2,
            offset: std::mem::offset_of!(Vertex, tex_coords),
            components: 2,
        },
    ];

    /// Constructs a vertex.
    pub fn new(position: Vector3<f32>, normal: Vector3<f32>, tex_coords: Vector2<f32>) -> Self {
        Self {
            position: position.into(),
            normal: normal.into(),
            tex_coords: tex_coords.into(),
        }
    }

    /// Returns the position as a vector.
    pub fn position(&self) -> Vector3<f32> {
        self.position.into()
    }
    /// Returns the normal as a vector.
    pub fn normal(&self) -> Vector3<f32> {
        self.normal.into()
    }
}
