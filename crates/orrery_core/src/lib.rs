//! Conformal sphere model, versor transforms, and scene setup for an animated
//! solar system.
//!
//! A celestial body is a [`ConformalSphere`] posed by a sequence of
//! [`Transform`]s. The placement decoders turn the posed sphere into
//! [`PlacementOffset`]s that a renderer applies to a shared sphere mesh.

mod error;
mod placement;
pub mod scene;
mod sphere;
pub mod versor;

pub use error::GeometryError;
pub use placement::*;
pub use sphere::{ConformalSphere, build_sphere_mesh};
pub use versor::{Transform, Versor, rotate, scale, translate};

#[cfg(test)]
mod tests;
