use std::f32::consts::{FRAC_PI_2, PI, TAU};

use cgmath::{vec2, vec3};

use crate::{Mesh, MeshError, Vertex, grid};

/// Tessellates a sphere of the given radius centered on the origin.
///
/// Longitude rings run from the south pole (`y = -radius`) to the north pole,
/// and latitude segments go around the `y` axis. The poles are not collapsed,
/// so the first and last rows of the grid each contain `lat_segments`
/// degenerate triangles.
///
/// The mesh has exactly `lat_segments * long_segments * 6` vertices.
pub fn build_sphere(radius: f32, lat_segments: u32, long_segments: u32) -> Result<Mesh, MeshError> {
    MeshError::check_discretization(lat_segments, long_segments)?;

    let d_phi = TAU / lat_segments as f32;
    let d_theta = PI / long_segments as f32;

    let mut points = Vec::with_capacity((lat_segments as usize + 1) * (long_segments as usize + 1));
    for j in 0..=long_segments {
        let theta = -FRAC_PI_2 + j as f32 * d_theta;
        let (sin_theta, cos_theta) = theta.sin_cos();
        for i in 0..=lat_segments {
            let (sin_phi, cos_phi) = (i as f32 * d_phi).sin_cos();
            let normal = vec3(sin_phi * cos_theta, sin_theta, cos_phi * cos_theta);
            let tex_coords = vec2(
                i as f32 / lat_segments as f32,
                1.0 - j as f32 / long_segments as f32,
            );
            points.push(Vertex::new(normal * radius, normal, tex_coords));
        }
    }

    let mesh = Mesh::from_triangle_list(grid::triangulate(&points, lat_segments, long_segments));
    log::debug!(
        "built sphere mesh with radius {radius} ({lat_segments}x{long_segments}, {} vertices)",
        mesh.vertex_count(),
    );
    Ok(mesh)
}
