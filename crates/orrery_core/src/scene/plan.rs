use std::collections::HashMap;

use cgmath::Vector3;
use eyre::{OptionExt, Result, WrapErr, bail, ensure};
use itertools::Itertools;
use orrery_math::Float;
use orrery_mesh::Mesh;
use serde::Serialize;

use super::{BodyConfig, SceneConfig};
use crate::{
    ConformalSphere, PlacementOffset, Transform, build_sphere_mesh, decode_rotation_offset,
    decode_scale_offset, decode_translation_offset,
};

/// Index of the shared sphere mesh in [`ScenePlan::meshes`].
pub const SPHERE_MESH: usize = 0;

/// Axis that bodies orbit around in the renderer.
pub fn orbit_axis() -> PlacementOffset {
    Vector3::unit_y()
}

/// Meshes and placements for every object in a scene, computed once at setup.
#[derive(Debug, Clone)]
pub struct ScenePlan {
    /// Distinct meshes, each tessellated once.
    pub meshes: Vec<SceneMesh>,
    /// Celestial bodies.
    pub bodies: Vec<BodyPlacement>,
    /// Planetary rings.
    pub rings: Vec<RingPlacement>,
    /// Orbit trajectories.
    pub trajectories: Vec<TrajectoryPlacement>,
}

/// Named mesh in a scene.
#[derive(Debug, Clone)]
pub struct SceneMesh {
    /// Name of the mesh.
    pub name: String,
    /// Triangles.
    pub mesh: Mesh,
}

/// Placement of a celestial body.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct BodyPlacement {
    /// Name of the body.
    pub name: String,
    /// Index into [`ScenePlan::meshes`].
    pub mesh: usize,
    /// Every step replayed on the base sphere to reach the body's pose.
    pub steps: Vec<Transform>,
    /// Radius of the body's final pose, if it has one.
    pub radius: Option<Float>,
    /// Translation offset.
    pub translation: PlacementOffset,
    /// Scale offset.
    pub scale: PlacementOffset,
    /// Axis for the body's spin.
    pub rotation_axis: PlacementOffset,
    /// Angular speed around the orbit axis.
    pub orbit_speed: f32,
    /// Body that this one orbits in the renderer.
    pub parent: Option<String>,
}

/// Placement of a planetary ring.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct RingPlacement {
    /// Body that the ring surrounds.
    pub body: String,
    /// Index into [`ScenePlan::meshes`].
    pub mesh: usize,
    /// Translation of the ring.
    pub translation: PlacementOffset,
    /// Tilt around the X axis, in degrees.
    pub tilt_degrees: f32,
    /// Angular speed around the orbit axis.
    pub orbit_speed: f32,
}

/// Placement of an orbit trajectory.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct TrajectoryPlacement {
    /// Body on the orbit.
    pub body: String,
    /// Index into [`ScenePlan::meshes`].
    pub mesh: usize,
    /// Radius of the orbit.
    pub outer_radius: f32,
}

/// Offsets of one body.
#[derive(Debug, Copy, Clone, PartialEq)]
struct BodyOffsets {
    translation: PlacementOffset,
    scale: PlacementOffset,
    rotation_axis: PlacementOffset,
}

impl BodyOffsets {
    fn identity() -> Self {
        Self {
            translation: Vector3::new(0.0, 0.0, 0.0),
            scale: Vector3::new(1.0, 1.0, 1.0),
            rotation_axis: orbit_axis(),
        }
    }
}

impl ScenePlan {
    /// Builds every mesh and resolves the placement of every object in the
    /// scene.
    pub fn build(config: &SceneConfig) -> Result<Self> {
        let base = ConformalSphere::from_radius(config.sphere.radius)
            .wrap_err("error constructing base sphere")?;

        let mut meshes = vec![SceneMesh {
            name: "sphere".to_string(),
            mesh: build_sphere_mesh(
                &base,
                config.sphere.lat_segments,
                config.sphere.long_segments,
            )
            .wrap_err("error building sphere mesh")?,
        }];

        let mut resolver = Resolver::new(config, base)?;
        let bodies: Vec<BodyPlacement> = config
            .bodies
            .iter()
            .map(|body| resolver.placement(body))
            .collect::<Result<_>>()?;
        let body_placement = |name: &str| {
            bodies
                .iter()
                .find(|b| b.name == name)
                .ok_or_eyre(format!("unknown body {name:?}"))
        };

        let mut rings = vec![];
        for ring in &config.rings {
            let body = body_placement(&ring.body).wrap_err("error placing ring")?;
            let mesh = orrery_mesh::build_torus(
                ring.inner_radius,
                ring.outer_radius,
                ring.tube_segments,
                ring.ring_segments,
            )
            .wrap_err_with(|| format!("error building ring mesh for {:?}", ring.body))?;
            rings.push(RingPlacement {
                body: ring.body.clone(),
                mesh: meshes.len(),
                translation: body.translation + ring.offset,
                tilt_degrees: ring.tilt_degrees,
                orbit_speed: body.orbit_speed,
            });
            meshes.push(SceneMesh {
                name: format!("ring:{}", ring.body),
                mesh,
            });
        }

        let mut trajectories = vec![];
        if let Some(tube) = &config.trajectories {
            for orbit in &tube.orbits {
                body_placement(&orbit.body).wrap_err("error placing trajectory")?;
                let mesh = orrery_mesh::build_torus(
                    tube.inner_radius,
                    orbit.outer_radius,
                    tube.tube_segments,
                    tube.ring_segments,
                )
                .wrap_err_with(|| format!("error building trajectory mesh for {:?}", orbit.body))?;
                trajectories.push(TrajectoryPlacement {
                    body: orbit.body.clone(),
                    mesh: meshes.len(),
                    outer_radius: orbit.outer_radius,
                });
                meshes.push(SceneMesh {
                    name: format!("trajectory:{}", orbit.body),
                    mesh,
                });
            }
        }

        log::info!(
            "built scene with {} meshes, {} bodies, {} rings, and {} trajectories",
            meshes.len(),
            bodies.len(),
            rings.len(),
            trajectories.len(),
        );

        Ok(Self {
            meshes,
            bodies,
            rings,
            trajectories,
        })
    }

    /// Returns the placement of a body by name.
    pub fn body(&self, name: &str) -> Option<&BodyPlacement> {
        self.bodies.iter().find(|b| b.name == name)
    }
}

/// Resolves step lists and offsets for bodies, memoizing each body so that a
/// chain of `inherits` is only replayed once per body.
struct Resolver<'a> {
    bodies: HashMap<&'a str, &'a BodyConfig>,
    base: ConformalSphere,
    steps: HashMap<&'a str, Vec<Transform>>,
    offsets: HashMap<&'a str, BodyOffsets>,
}

impl<'a> Resolver<'a> {
    fn new(config: &'a SceneConfig, base: ConformalSphere) -> Result<Self> {
        let mut bodies = HashMap::new();
        for body in &config.bodies {
            if bodies.insert(body.name.as_str(), body).is_some() {
                bail!("duplicate body {:?}", body.name);
            }
        }
        for body in &config.bodies {
            if let Some(parent) = &body.parent {
                ensure!(
                    bodies.contains_key(parent.as_str()),
                    "body {:?} has unknown parent {parent:?}",
                    body.name,
                );
            }
        }
        Ok(Self {
            bodies,
            base,
            steps: HashMap::new(),
            offsets: HashMap::new(),
        })
    }

    fn get(&self, name: &str, referenced_by: &str) -> Result<&'a BodyConfig> {
        self.bodies
            .get(name)
            .copied()
            .ok_or_eyre(format!("body {referenced_by:?} references unknown body {name:?}"))
    }

    fn placement(&mut self, body: &'a BodyConfig) -> Result<BodyPlacement> {
        let steps = self.full_steps(body, &mut vec![])?;
        let offsets = self.offsets(body, &mut vec![])?;

        let mut sphere = self.base.clone();
        for &step in &steps {
            sphere.apply(step)?;
        }
        let radius = sphere.radius().ok();

        let scale = match body.display_scale {
            Some(s) => Vector3::new(s, s, s),
            None => offsets.scale,
        };

        log::debug!(
            "placed {:?} at {:?} with scale {:?} after [{}]",
            body.name,
            offsets.translation,
            scale,
            steps.iter().join(", "),
        );

        Ok(BodyPlacement {
            name: body.name.clone(),
            mesh: SPHERE_MESH,
            steps,
            radius,
            translation: offsets.translation,
            scale,
            rotation_axis: offsets.rotation_axis,
            orbit_speed: body.orbit_speed,
            parent: body.parent.clone(),
        })
    }

    /// Returns every step of the inherited chain followed by the body's own.
    fn full_steps(
        &mut self,
        body: &'a BodyConfig,
        chain: &mut Vec<&'a str>,
    ) -> Result<Vec<Transform>> {
        if let Some(steps) = self.steps.get(body.name.as_str()) {
            return Ok(steps.clone());
        }
        ensure_acyclic(chain, &body.name, "inherits")?;

        let mut steps = match &body.inherits {
            Some(name) => {
                let inherited = self.get(name, &body.name)?;
                chain.push(&body.name);
                let steps = self.full_steps(inherited, chain)?;
                chain.pop();
                steps
            }
            None => vec![],
        };
        steps.extend(body.own_steps());

        self.steps.insert(&body.name, steps.clone());
        Ok(steps)
    }

    /// Returns the offsets of a body. Offsets for the body's own steps are
    /// decoded right after each step is replayed; the rest are copied from
    /// `offsets_from` or `inherits`.
    fn offsets(&mut self, body: &'a BodyConfig, chain: &mut Vec<&'a str>) -> Result<BodyOffsets> {
        if let Some(&offsets) = self.offsets.get(body.name.as_str()) {
            return Ok(offsets);
        }
        ensure_acyclic(chain, &body.name, "offsets_from")?;

        let mut ret = match body.offsets_from.as_ref().or(body.inherits.as_ref()) {
            Some(name) => {
                let source = self.get(name, &body.name)?;
                chain.push(&body.name);
                let offsets = self.offsets(source, chain)?;
                chain.pop();
                offsets
            }
            None => BodyOffsets::identity(),
        };

        let mut sphere = self.base.clone();
        if let Some(name) = &body.inherits {
            let inherited = self.get(name, &body.name)?;
            for step in self.full_steps(inherited, &mut vec![])? {
                sphere.apply(step)?;
            }
        }
        for step in body.own_steps() {
            sphere
                .apply(step)
                .wrap_err_with(|| format!("error applying {step} to {:?}", body.name))?;
            let blade = sphere.blade();
            match step {
                Transform::Translate(_) => ret.translation = decode_translation_offset(blade),
                Transform::Scale(_) => ret.scale = decode_scale_offset(blade),
                Transform::Rotate(_) => ret.rotation_axis = decode_rotation_offset(blade),
            }
        }

        self.offsets.insert(&body.name, ret);
        Ok(ret)
    }
}

fn ensure_acyclic(chain: &[&str], name: &str, relation: &str) -> Result<()> {
    if chain.contains(&name) {
        bail!(
            "cyclic `{relation}` reference: {} -> {name}",
            chain.iter().join(" -> "),
        );
    }
    Ok(())
}
