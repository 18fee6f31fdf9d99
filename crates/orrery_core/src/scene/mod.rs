//! Scene setup: which bodies exist, how each one is posed, and which meshes
//! they are drawn with.
//!
//! Each body owns its own [`ConformalSphere`](crate::ConformalSphere), built
//! from a fresh base sphere by replaying the steps of the body it inherits
//! from followed by its own. No sphere is shared between bodies, so the order
//! of bodies in a [`SceneConfig`] does not affect the result.

mod config;
mod plan;

pub use config::*;
pub use plan::*;
