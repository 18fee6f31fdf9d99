use std::io::Write;
use std::path::PathBuf;

use eyre::{Context, Result};
use orrery_core::scene::{
    BodyPlacement, RingPlacement, SceneConfig, ScenePlan, TrajectoryPlacement,
};
use orrery_core::{
    ConformalSphere, PlacementOffset, Transform, decode_rotation_offset, decode_scale_offset,
    decode_translation_offset,
};
use orrery_math::Float;
use orrery_mesh::{Mesh, Vertex};
use serde::Serialize;

/// Orrery command-line interface
///
/// Builds meshes, conformal spheres, and scene placements, and prints them as
/// JSON.
#[derive(Debug, clap::Parser)]
#[command(version)]
pub(crate) struct Args {
    #[command(subcommand)]
    pub subcommand: Subcommand,

    /// File to write JSON output to, use '-' for stdout.
    #[arg(short, long, value_parser, default_value = "-", global = true)]
    pub output: clio::Output,
}

#[derive(clap::Subcommand, Debug)]
pub(crate) enum Subcommand {
    /// Tessellate a sphere and print a summary of the mesh.
    Sphere {
        /// Radius of the sphere.
        #[arg(long, default_value_t = 1.0)]
        radius: f32,
        /// Latitude segments.
        #[arg(long, default_value_t = 32)]
        lat: u32,
        /// Longitude segments.
        #[arg(long, default_value_t = 16)]
        long: u32,
        /// Include every vertex in the output.
        #[arg(long)]
        vertices: bool,
    },
    /// Tessellate a torus and print a summary of the mesh.
    Torus {
        /// Tube radius.
        #[arg(long, default_value_t = 0.2)]
        inner: f32,
        /// Distance from the center of the torus to the middle of the tube.
        #[arg(long, default_value_t = 16.5)]
        outer: f32,
        /// Tube segments.
        #[arg(long, default_value_t = 72)]
        tube: u32,
        /// Ring segments.
        #[arg(long, default_value_t = 36)]
        ring: u32,
        /// Include every vertex in the output.
        #[arg(long)]
        vertices: bool,
    },
    /// Construct a conformal sphere, optionally transform it, and print it.
    ///
    /// Steps are applied in the order translate, scale, rotate.
    Conformal {
        /// Radius of the sphere.
        #[arg(long, default_value_t = 1.0)]
        radius: Float,
        /// Distance to translate along e3.
        #[arg(long, allow_negative_numbers = true)]
        translate: Option<Float>,
        /// Factor to scale by.
        #[arg(long, allow_negative_numbers = true)]
        scale: Option<Float>,
        /// Angle in degrees to rotate by in the e1∧e2 plane.
        #[arg(long, allow_negative_numbers = true)]
        rotate: Option<Float>,
    },
    /// Resolve the placement of every object in a scene.
    Scene {
        /// YAML file layered over the built-in scene.
        #[arg(long)]
        config: Option<PathBuf>,
        /// Print the built-in scene as YAML instead.
        #[arg(long, conflicts_with = "config")]
        dump_default: bool,
    },
}

#[derive(Serialize, Debug)]
struct MeshSummary<'a> {
    vertex_count: usize,
    triangle_count: usize,
    byte_len: usize,
    stride: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    vertices: Option<&'a [Vertex]>,
}

impl<'a> MeshSummary<'a> {
    fn new(mesh: &'a Mesh, include_vertices: bool) -> Self {
        Self {
            vertex_count: mesh.vertex_count(),
            triangle_count: mesh.triangle_count(),
            byte_len: mesh.as_bytes().len(),
            stride: Vertex::STRIDE,
            vertices: include_vertices.then(|| mesh.vertices()),
        }
    }
}

#[derive(Serialize, Debug)]
struct ConformalReport {
    steps: Vec<Transform>,
    blade: String,
    dual: String,
    radius: Option<Float>,
    center: Option<[Float; 3]>,
    initial_center: [Float; 3],
    translation_offset: PlacementOffset,
    scale_offset: PlacementOffset,
    rotation_offset: PlacementOffset,
}

#[derive(Serialize, Debug)]
struct SceneReport<'a> {
    meshes: Vec<NamedMeshSummary<'a>>,
    bodies: &'a [BodyPlacement],
    rings: &'a [RingPlacement],
    trajectories: &'a [TrajectoryPlacement],
}

#[derive(Serialize, Debug)]
struct NamedMeshSummary<'a> {
    name: &'a str,
    #[serde(flatten)]
    summary: MeshSummary<'a>,
}

pub(crate) fn exec(args: Args) -> Result<()> {
    let Args {
        subcommand,
        mut output,
    } = args;

    match subcommand {
        Subcommand::Sphere {
            radius,
            lat,
            long,
            vertices,
        } => {
            let mesh = orrery_mesh::build_sphere(radius, lat, long)?;
            write_json_output(output, &MeshSummary::new(&mesh, vertices))
        }

        Subcommand::Torus {
            inner,
            outer,
            tube,
            ring,
            vertices,
        } => {
            let mesh = orrery_mesh::build_torus(inner, outer, tube, ring)?;
            write_json_output(output, &MeshSummary::new(&mesh, vertices))
        }

        Subcommand::Conformal {
            radius,
            translate,
            scale,
            rotate,
        } => {
            let steps: Vec<Transform> = [
                translate.map(Transform::Translate),
                scale.map(Transform::Scale),
                rotate.map(Transform::Rotate),
            ]
            .into_iter()
            .flatten()
            .collect();

            let mut sphere =
                ConformalSphere::from_radius(radius).context("error constructing sphere")?;
            for &step in &steps {
                sphere
                    .apply(step)
                    .with_context(|| format!("error applying {step}"))?;
            }

            let blade = sphere.blade();
            let report = ConformalReport {
                blade: blade.to_string(),
                dual: sphere.dual().to_string(),
                radius: sphere.radius().ok(),
                center: sphere.center().ok(),
                initial_center: sphere.initial_center(),
                translation_offset: decode_translation_offset(blade),
                scale_offset: decode_scale_offset(blade),
                rotation_offset: decode_rotation_offset(blade),
                steps,
            };
            write_json_output(output, &report)
        }

        Subcommand::Scene {
            config,
            dump_default,
        } => {
            if dump_default {
                let yaml = serde_norway::to_string(&SceneConfig::builtin()?)
                    .context("error serializing scene")?;
                return output
                    .write_all(yaml.as_bytes())
                    .context("error writing scene");
            }

            let scene = match &config {
                Some(path) => SceneConfig::load_file(path)?,
                None => SceneConfig::builtin()?,
            };
            let plan = ScenePlan::build(&scene)?;
            log::info!("resolved {} bodies", plan.bodies.len());

            let report = SceneReport {
                meshes: plan
                    .meshes
                    .iter()
                    .map(|m| NamedMeshSummary {
                        name: &m.name,
                        summary: MeshSummary::new(&m.mesh, false),
                    })
                    .collect(),
                bodies: &plan.bodies,
                rings: &plan.rings,
                trajectories: &plan.trajectories,
            };
            write_json_output(output, &report)
        }
    }
}

fn write_json_output<T: Serialize>(mut output: clio::Output, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut output, value)
        .context("error serializing data and writing output")?;
    writeln!(output).context("error writing output")?;
    Ok(())
}
