//! Decoders that turn a transformed sphere blade into offsets for a renderer.
//!
//! The three decoders are not symmetric: each reads the blade the way the
//! renderer expects for that kind of offset.

use cgmath::Vector3;
use orrery_math::{Multivector, NullBlade};

/// Offset decoded from a sphere blade, interpreted by the renderer as a
/// translation, a scale, or a rotation axis.
pub type PlacementOffset = Vector3<f32>;

/// Returns the translation offset `(|s[E0123]| + |s[E123I]| + |s[E0123I]|, 0, 0)`.
pub fn decode_translation_offset(s: &Multivector) -> PlacementOffset {
    let x = [NullBlade::E0123, NullBlade::E123I, NullBlade::E0123I]
        .into_iter()
        .map(|blade| s.component(blade).abs())
        .sum::<f64>();
    Vector3::new(x as f32, 0.0, 0.0)
}

/// Returns the rotation axis `(s[E0123], s[E0123], s[E0123])`.
pub fn decode_rotation_offset(s: &Multivector) -> PlacementOffset {
    let c = s.component(NullBlade::E0123) as f32;
    Vector3::new(c, c, c)
}

/// Returns the scale offset `(s[E0123], s[E0123], s[E0123])`.
pub fn decode_scale_offset(s: &Multivector) -> PlacementOffset {
    let c = s.component(NullBlade::E0123) as f32;
    Vector3::new(c, c, c)
}
