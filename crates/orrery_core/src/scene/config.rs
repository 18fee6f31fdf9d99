use std::path::Path;

use eyre::{Result, WrapErr};
use orrery_math::Float;
use serde::{Deserialize, Serialize};

use crate::{PlacementOffset, Transform};

const SCENE_FILE_FORMAT: config::FileFormat = config::FileFormat::Yaml;
const DEFAULT_SCENE_STR: &str = include_str!("default.yaml");

/// Description of a scene: the shared sphere, the bodies placed with it, and
/// the tori drawn around them.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SceneConfig {
    /// Base sphere shared by every body.
    pub sphere: SphereConfig,
    /// Celestial bodies.
    pub bodies: Vec<BodyConfig>,
    /// Planetary rings.
    #[serde(default)]
    pub rings: Vec<RingConfig>,
    /// Orbit trajectories.
    #[serde(default)]
    pub trajectories: Option<TrajectoriesConfig>,
}

/// Base sphere and its tessellation.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq)]
pub struct SphereConfig {
    /// Radius of the conformal sphere that every body starts from.
    pub radius: Float,
    /// Latitude segments of the sphere mesh.
    pub lat_segments: u32,
    /// Longitude segments of the sphere mesh.
    pub long_segments: u32,
}

/// Celestial body.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct BodyConfig {
    /// Unique name.
    pub name: String,
    /// Body whose steps are replayed before this body's own.
    #[serde(default)]
    pub inherits: Option<String>,
    /// Body whose offsets fill in step kinds this body does not have.
    /// Defaults to `inherits`.
    #[serde(default)]
    pub offsets_from: Option<String>,
    /// Body that this one orbits in the renderer, such as the planet of a
    /// moon.
    #[serde(default)]
    pub parent: Option<String>,

    /// Distance to translate along `e3`.
    #[serde(default)]
    pub translate: Option<Float>,
    /// Factor to scale by.
    #[serde(default)]
    pub scale: Option<Float>,
    /// Angle to rotate by in the `e1∧e2` plane, in degrees.
    #[serde(default)]
    pub rotate: Option<Float>,

    /// Uniform scale used instead of a decoded scale offset.
    #[serde(default)]
    pub display_scale: Option<f32>,
    /// Angular speed around the orbit axis.
    #[serde(default)]
    pub orbit_speed: f32,
}

impl BodyConfig {
    /// Returns the body's own steps in the order translate, scale, rotate.
    pub fn own_steps(&self) -> Vec<Transform> {
        itertools::chain!(
            self.translate.map(Transform::Translate),
            self.scale.map(Transform::Scale),
            self.rotate.map(Transform::Rotate),
        )
        .collect()
    }
}

/// Planetary ring drawn around a body.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RingConfig {
    /// Body that the ring surrounds.
    pub body: String,
    /// Tube radius.
    pub inner_radius: f32,
    /// Distance from the center of the ring to the middle of the tube.
    pub outer_radius: f32,
    /// Tube segments.
    pub tube_segments: u32,
    /// Ring segments.
    pub ring_segments: u32,
    /// Offset from the body's translation.
    pub offset: PlacementOffset,
    /// Tilt around the X axis, in degrees.
    pub tilt_degrees: f32,
}

/// Orbit trajectories, all drawn with the same tube.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TrajectoriesConfig {
    /// Tube radius.
    pub inner_radius: f32,
    /// Tube segments.
    pub tube_segments: u32,
    /// Ring segments.
    pub ring_segments: u32,
    /// One trajectory per orbiting body.
    pub orbits: Vec<OrbitConfig>,
}

/// Orbit trajectory of one body.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct OrbitConfig {
    /// Body on the orbit.
    pub body: String,
    /// Radius of the orbit.
    pub outer_radius: f32,
}

impl SceneConfig {
    /// Returns the built-in solar system.
    pub fn builtin() -> Result<Self> {
        serde_norway::from_str(DEFAULT_SCENE_STR).wrap_err("error parsing built-in scene")
    }

    /// Loads the built-in scene with a YAML file layered over it.
    pub fn load_file(path: &Path) -> Result<Self> {
        log::info!("loading scene from {}", path.display());
        Self::layered(config::File::from(path).format(SCENE_FILE_FORMAT))
            .wrap_err_with(|| format!("error loading scene from {}", path.display()))
    }

    /// Loads the built-in scene with a YAML string layered over it.
    pub fn load_str(overrides: &str) -> Result<Self> {
        Self::layered(config::File::from_str(overrides, SCENE_FILE_FORMAT))
            .wrap_err("error loading scene overrides")
    }

    fn layered<S>(source: S) -> Result<Self>
    where
        S: config::Source + Send + Sync + 'static,
    {
        Ok(config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_SCENE_STR, SCENE_FILE_FORMAT))
            .add_source(source)
            .build()?
            .try_deserialize()?)
    }
}
