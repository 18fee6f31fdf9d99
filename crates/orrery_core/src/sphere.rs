use orrery_math::{Float, Multivector, NullBlade, util};
use orrery_mesh::Mesh;

use crate::{GeometryError, Transform};

/// Fraction of the dual's magnitude below which its origin component counts
/// as zero.
pub const DEGENERATE_EPSILON: Float = 1e-12;

/// Sphere in conformal geometric algebra.
///
/// The sphere is stored as the outer product of four points on its surface
/// (a grade-4 blade) together with its dual (a grade-1 vector). The blade is
/// the sphere's current pose: transforms replace it in place and no history
/// is kept.
#[derive(Debug, Clone, PartialEq)]
pub struct ConformalSphere {
    blade: Multivector,
    dual: Multivector,
    initial_center: [Float; 3],
}

impl ConformalSphere {
    /// Constructs a sphere of radius `r` centered on the origin from the
    /// points `(0,0,r)`, `(0,0,−r)`, `(r,0,0)`, and `(0,r,0)`.
    pub fn from_radius(r: Float) -> Result<Self, GeometryError> {
        let blade = [[0.0, 0.0, r], [0.0, 0.0, -r], [r, 0.0, 0.0], [0.0, r, 0.0]]
            .into_iter()
            .map(Multivector::point)
            .reduce(|a, b| a ^ b)
            .unwrap_or_default();
        let dual = blade.dual();
        let initial_center = decode_center(&dual)?;
        log::debug!("constructed conformal sphere with radius {r}: {blade}");
        Ok(Self {
            blade,
            dual,
            initial_center,
        })
    }

    /// Returns the current blade.
    pub fn blade(&self) -> &Multivector {
        &self.blade
    }
    /// Replaces the current blade and refreshes the dual.
    pub fn set_blade(&mut self, blade: Multivector) {
        self.dual = blade.dual();
        self.blade = blade;
    }
    /// Returns the dual of the current blade.
    pub fn dual(&self) -> &Multivector {
        &self.dual
    }

    /// Returns the radius of the current pose.
    pub fn radius(&self) -> Result<Float, GeometryError> {
        let origin = origin_weight(&self.dual)?;
        util::try_sqrt(self.dual.dot(&self.dual))
            .and_then(|norm| util::try_div(norm, origin))
            .ok_or(GeometryError::DegenerateSphere)
    }
    /// Returns the center of the current pose.
    pub fn center(&self) -> Result<[Float; 3], GeometryError> {
        decode_center(&self.dual)
    }
    /// Returns the center decoded when the sphere was constructed. Only kept
    /// for inspection; transforms never read it.
    pub fn initial_center(&self) -> [Float; 3] {
        self.initial_center
    }

    /// Applies a transformation to the current pose.
    pub fn apply(&mut self, transform: Transform) -> Result<(), GeometryError> {
        let blade = transform.apply(&self.blade)?;
        self.set_blade(blade);
        Ok(())
    }

    /// Tessellates a sphere mesh with the radius of the current pose.
    pub fn build_mesh(&self, lat_segments: u32, long_segments: u32) -> Result<Mesh, GeometryError> {
        build_sphere_mesh(self, lat_segments, long_segments)
    }
}

/// Tessellates a sphere mesh whose radius is extracted from `sphere`.
pub fn build_sphere_mesh(
    sphere: &ConformalSphere,
    lat_segments: u32,
    long_segments: u32,
) -> Result<Mesh, GeometryError> {
    let radius = sphere.radius()?;
    Ok(orrery_mesh::build_sphere(radius as f32, lat_segments, long_segments)?)
}

/// Returns `|dual[E0]|`, or an error if it is negligible next to the rest of
/// the dual. Planes and other flat objects land here.
fn origin_weight(dual: &Multivector) -> Result<Float, GeometryError> {
    let origin = dual.component(NullBlade::E0).abs();
    let magnitude = dual
        .terms()
        .iter()
        .map(|t| t.coef * t.coef)
        .sum::<Float>()
        .sqrt();
    if origin.is_finite() && origin > DEGENERATE_EPSILON * magnitude {
        Ok(origin)
    } else {
        Err(GeometryError::DegenerateSphere)
    }
}

fn decode_center(dual: &Multivector) -> Result<[Float; 3], GeometryError> {
    let origin = origin_weight(dual)?;
    let decode = |i| util::try_div(dual.component(NullBlade::euclidean(i)), origin);
    match [decode(0), decode(1), decode(2)] {
        [Some(x), Some(y), Some(z)] => Ok([x, y, z]),
        _ => Err(GeometryError::DegenerateSphere),
    }
}
