use std::f32::consts::TAU;

use cgmath::{vec2, vec3};

use crate::{Mesh, MeshError, Vertex, grid};

/// Texture coordinate scale along both directions of a torus.
const TEX_COORD_SCALE: f32 = 0.1;

/// Tessellates a flat torus around the `z` axis, used for orbit trajectories
/// and planetary rings.
///
/// `outer_radius` is the distance from the center to the middle of the tube
/// and `inner_radius` is the tube radius. Every vertex lies in the plane
/// `z = inner_radius`, so the result is an annulus lifted by the tube radius
/// rather than a round tube; the normals are still those of a round tube.
///
/// The mesh has exactly `tube_segments * ring_segments * 6` vertices.
pub fn build_torus(
    inner_radius: f32,
    outer_radius: f32,
    tube_segments: u32,
    ring_segments: u32,
) -> Result<Mesh, MeshError> {
    MeshError::check_discretization(tube_segments, ring_segments)?;

    let mut points = Vec::with_capacity((tube_segments as usize + 1) * (ring_segments as usize + 1));
    for j in 0..=ring_segments {
        let beta = TAU * j as f32 / ring_segments as f32;
        let (sin_beta, cos_beta) = beta.sin_cos();
        for i in 0..=tube_segments {
            let alpha = TAU * i as f32 / tube_segments as f32;
            let (sin_alpha, cos_alpha) = alpha.sin_cos();

            let r = outer_radius + inner_radius * cos_beta;
            let position = vec3(r * cos_alpha, r * sin_alpha, inner_radius);
            let normal = vec3(cos_beta * cos_alpha, cos_beta * sin_alpha, sin_beta);
            let tex_coords = vec2(
                i as f32 / tube_segments as f32,
                j as f32 / ring_segments as f32,
            ) * TEX_COORD_SCALE;
            points.push(Vertex::new(position, normal, tex_coords));
        }
    }

    let mesh = Mesh::from_triangle_list(grid::triangulate(&points, tube_segments, ring_segments));
    log::debug!(
        "built torus mesh with radii {inner_radius}/{outer_radius} \
         ({tube_segments}x{ring_segments}, {} vertices)",
        mesh.vertex_count(),
    );
    Ok(mesh)
}
