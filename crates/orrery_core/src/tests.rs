use orrery_math::{AbsDiffEq, Float, Multivector, assert_approx_eq, relative_eq};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

use crate::scene::{SceneConfig, ScenePlan};
use crate::versor::{ROUNDING_EPSILON, default_direction, default_plane};
use crate::*;

fn assert_offset_eq(expected: [f32; 3], actual: PlacementOffset) {
    let actual: [f32; 3] = actual.into();
    for (e, a) in std::iter::zip(expected, actual) {
        assert!(
            (e - a).abs() <= 1e-4 * e.abs().max(1.0),
            "expected {expected:?}, got {actual:?}",
        );
    }
}

fn magnitude(v: &[Float; 3]) -> Float {
    v.iter().map(|c| c * c).sum::<Float>().sqrt()
}

fn unit_vector() -> impl Strategy<Value = [Float; 3]> {
    prop::array::uniform3(-1.0..1.0_f64)
        .prop_filter("too short", |v| magnitude(v) > 0.1)
        .prop_map(|v| v.map(|c| c / magnitude(&v)))
}

fn unit_sphere() -> ConformalSphere {
    ConformalSphere::from_radius(1.0).expect("unit sphere")
}

#[test]
fn test_sphere_radius_round_trip() {
    for r in [0.5, 1.0, 10.0, 1000.0] {
        let sphere = ConformalSphere::from_radius(r).expect("valid sphere");
        let radius = sphere.radius().expect("nondegenerate sphere");
        assert!(relative_eq(r, radius, 1e-5), "{r} != {radius}");
        assert_approx_eq!(&[0.0, 0.0, 0.0][..], &sphere.initial_center()[..]);
        assert_eq!(Some(4), sphere.blade().homogeneous_grade());
        assert_eq!(Some(1), sphere.dual().homogeneous_grade());
    }
}

#[test]
fn test_degenerate_sphere() {
    assert_eq!(
        Err(GeometryError::DegenerateSphere),
        ConformalSphere::from_radius(0.0),
    );

    let mut sphere = unit_sphere();
    sphere.set_blade(Multivector::ZERO);
    assert_eq!(Err(GeometryError::DegenerateSphere), sphere.radius());
    assert_eq!(Err(GeometryError::DegenerateSphere), sphere.center());
}

#[test]
fn test_coplanar_points_are_degenerate() {
    let p = [0.3, -1.2, 2.5];
    let u = [1.1, 0.4, -0.7];
    let v = [-0.5, 2.0, 0.9];
    let along = |a: Float, b: Float| -> [Float; 3] {
        std::array::from_fn(|i| p[i] + a * u[i] + b * v[i])
    };
    let plane = [
        along(0.0, 0.0),
        along(1.0, 0.0),
        along(0.0, 1.0),
        along(0.37, 1.3),
    ]
    .into_iter()
    .map(Multivector::point)
    .reduce(|a, b| a ^ b)
    .expect("four points");
    assert!(!plane.is_zero());

    let mut sphere = unit_sphere();
    sphere.set_blade(plane);
    assert_eq!(Err(GeometryError::DegenerateSphere), sphere.radius());
    assert_eq!(Err(GeometryError::DegenerateSphere), sphere.center());

    // A large sphere is still far from the threshold.
    let big = ConformalSphere::from_radius(1.0e4).expect("valid sphere");
    assert!(relative_eq(1.0e4, big.radius().expect("radius"), 1e-5));
}

#[test]
fn test_sphere_set_blade_refreshes_dual() {
    let mut sphere = unit_sphere();
    let moved = translate(sphere.blade(), 4.0, &default_direction()).expect("translate");
    sphere.set_blade(moved.clone());
    assert_eq!(&moved.dual(), sphere.dual());

    let [x, y, z] = sphere.center().expect("center");
    assert_approx_eq!(0.0, x);
    assert_approx_eq!(0.0, y);
    assert_approx_eq!(4.0, z);
    assert_approx_eq!(1.0, sphere.radius().expect("radius"));
    // The construction-time center is kept.
    assert_approx_eq!(&[0.0, 0.0, 0.0][..], &sphere.initial_center()[..]);
}

#[test]
fn test_identity_transforms() {
    let s = translate(unit_sphere().blade(), 2.5, &Multivector::e1()).expect("translate");

    let same = scale(&s, 1.0).expect("scale");
    assert_approx_eq!(s, same, epsilon = 1e-10);
    let same = rotate(&s, 0.0, &default_plane()).expect("rotate");
    assert_approx_eq!(s, same, epsilon = 1e-10);
    let same = translate(&s, 0.0, &default_direction()).expect("translate");
    assert_approx_eq!(s, same, epsilon = 1e-10);
}

#[test]
fn test_rotation_about_center_leaves_sphere() {
    let s = unit_sphere();
    for degrees in [30.0, 90.0, 180.0] {
        let rotated = rotate(s.blade(), degrees, &default_plane()).expect("rotate");
        assert_approx_eq!(s.blade(), &rotated, epsilon = 1e-10);
    }
}

#[test]
fn test_transforms_do_not_commute() {
    let s = unit_sphere();
    let e1 = Multivector::e1();

    let translated = translate(s.blade(), 3.0, &e1).expect("translate");
    let a = rotate(&translated, 90.0, &default_plane()).expect("rotate");

    let rotated = rotate(s.blade(), 90.0, &default_plane()).expect("rotate");
    let b = translate(&rotated, 3.0, &e1).expect("translate");

    assert!(!a.abs_diff_eq(&b, 1e-6), "{a} == {b}");

    let mut sphere_a = s.clone();
    sphere_a.set_blade(a);
    let mut sphere_b = s;
    sphere_b.set_blade(b);
    let [ax, ay, _] = sphere_a.center().expect("center");
    let [bx, by, _] = sphere_b.center().expect("center");
    assert_approx_eq!(0.0, ax);
    assert_approx_eq!(3.0, ay);
    assert_approx_eq!(3.0, bx);
    assert_approx_eq!(0.0, by);
}

#[test]
fn test_scale_about_origin() {
    let mut sphere = unit_sphere();
    sphere.apply(Transform::Translate(4.0)).expect("translate");
    sphere.apply(Transform::Scale(5.0)).expect("scale");

    let [_, _, z] = sphere.center().expect("center");
    assert!(relative_eq(20.0, z, 1e-9), "{z}");
    assert!(relative_eq(5.0, sphere.radius().expect("radius"), 1e-9));
}

#[test]
fn test_invalid_scale_factor() {
    let s = unit_sphere();
    assert_eq!(
        Err(GeometryError::InvalidScaleFactor(-1.0)),
        scale(s.blade(), -1.0),
    );
    assert_eq!(
        Err(GeometryError::InvalidScaleFactor(0.0)),
        scale(s.blade(), 0.0),
    );
    assert_eq!(
        Err(GeometryError::NonInvertibleVersor),
        Versor::dilator(0.0).and_then(|d| d.apply(s.blade())),
    );
}

#[test]
fn test_versor_inverse() {
    let t = Versor::translator(2.0, &default_direction());
    let t_inv = t.inverse().expect("translators are invertible");
    assert_approx_eq!(Multivector::identity(), t.multivector() * &t_inv);

    let r = Versor::rotor(45.0, &default_plane());
    let r_inv = r.inverse().expect("rotors are invertible");
    assert_approx_eq!(Multivector::identity(), r.multivector() * &r_inv);

    let d = Versor::dilator(3.0).expect("valid factor");
    let d_inv = d.inverse().expect("dilators are invertible");
    assert_approx_eq!(Multivector::identity(), d.multivector() * &d_inv);
}

#[test]
fn test_translation_offsets() {
    let s = unit_sphere();
    for (distance, expected) in [(0.0, 3.0), (1.0, 2.0), (4.0, 17.0)] {
        let moved = translate(s.blade(), distance, &default_direction()).expect("translate");
        assert_offset_eq([expected, 0.0, 0.0], decode_translation_offset(&moved));
    }
}

#[test]
fn test_mercury_offsets() {
    let mut sphere = unit_sphere();

    sphere.apply(Transform::Translate(4.0)).expect("translate");
    assert_offset_eq([17.0, 0.0, 0.0], decode_translation_offset(sphere.blade()));

    sphere.apply(Transform::Scale(5.0)).expect("scale");
    assert_offset_eq([-0.4, -0.4, -0.4], decode_scale_offset(sphere.blade()));

    sphere.apply(Transform::Rotate(90.0)).expect("rotate");
    assert_offset_eq([-0.4, -0.4, -0.4], decode_rotation_offset(sphere.blade()));

    // Rotation and scaling round tiny coefficients away.
    assert!(
        sphere
            .blade()
            .terms()
            .iter()
            .all(|term| term.coef.abs() >= ROUNDING_EPSILON)
    );
}

#[test]
fn test_build_sphere_mesh_uses_conformal_radius() {
    let mut sphere = ConformalSphere::from_radius(2.0).expect("valid sphere");
    sphere.apply(Transform::Scale(1.5)).expect("scale");
    let mesh = build_sphere_mesh(&sphere, 8, 4).expect("valid mesh");
    assert_eq!(8 * 4 * 6, mesh.vertex_count());
    for v in mesh.vertices() {
        let [x, y, z] = v.position;
        let mag = (x * x + y * y + z * z).sqrt();
        assert!((mag - 3.0).abs() < 1e-4, "{mag}");
    }

    assert_eq!(
        Err(GeometryError::Mesh(orrery_mesh::MeshError::InvalidDiscretization {
            lat_or_tube: 0,
            long_or_ring: 4,
        })),
        build_sphere_mesh(&sphere, 0, 4),
    );
}

#[test]
fn test_default_scene() {
    let config = SceneConfig::builtin().expect("built-in scene");
    let plan = ScenePlan::build(&config).expect("scene plan");

    assert_eq!(11, plan.bodies.len());
    assert_eq!(1, plan.rings.len());
    assert_eq!(8, plan.trajectories.len());
    assert_eq!(10, plan.meshes.len());
    assert_eq!(32 * 16 * 6, plan.meshes[0].mesh.vertex_count());

    for body in &plan.bodies {
        let offsets = [body.translation, body.scale, body.rotation_axis];
        assert!(
            offsets.iter().all(|v| v.x.is_finite() && v.y.is_finite() && v.z.is_finite()),
            "{body:?}",
        );
    }

    let body = |name| plan.body(name).expect("body exists");

    let sun = body("Sun");
    assert_offset_eq([0.0, 0.0, 0.0], sun.translation);
    assert_offset_eq([5.0, 5.0, 5.0], sun.scale);
    assert_offset_eq([0.0, 1.0, 0.0], sun.rotation_axis);
    assert!(sun.steps.is_empty());

    let mercury = body("Mercury");
    assert_offset_eq([17.0, 0.0, 0.0], mercury.translation);
    assert_offset_eq([-0.4, -0.4, -0.4], mercury.scale);
    assert_offset_eq([-0.4, -0.4, -0.4], mercury.rotation_axis);
    assert_eq!(
        vec![
            Transform::Translate(4.0),
            Transform::Scale(5.0),
            Transform::Rotate(90.0),
        ],
        mercury.steps,
    );

    let venus = body("Venus");
    assert_offset_eq([152.2, 0.0, 0.0], venus.translation);
    assert_eq!(mercury.scale, venus.scale);
    assert_eq!(mercury.rotation_axis, venus.rotation_axis);
    assert_eq!(4, venus.steps.len());

    assert_offset_eq([135.85, 0.0, 0.0], body("Earth").translation);
    assert_offset_eq([115.45, 0.0, 0.0], body("Mars").translation);

    let jupiter = body("Jupiter");
    assert_offset_eq([87.85, 0.0, 0.0], jupiter.translation);
    assert_offset_eq([-4.0 / 3.0; 3], jupiter.scale);

    let saturn = body("Saturn");
    assert_offset_eq([-8.0 / 9.0; 3], saturn.scale);

    let uranus = body("Uranus");
    assert_offset_eq([1.036_389, 0.0, 0.0], uranus.translation);
    assert_eq!(mercury.scale, uranus.scale);
    assert_eq!(mercury.scale, body("Neptune").scale);

    let moon = body("Moon");
    assert_eq!(Some("Earth".to_string()), moon.parent);
    assert_offset_eq([219.85, 0.0, 0.0], moon.translation);
    assert_offset_eq([-1.0 / 3.0; 3], moon.scale);
    assert!(relative_eq(6.0, moon.radius.expect("radius"), 1e-6));

    let callisto = body("Callisto");
    assert_eq!(Some("Jupiter".to_string()), callisto.parent);
    assert_offset_eq([87.235, 0.0, 0.0], callisto.translation);
    assert_offset_eq([-4.0 / 15.0; 3], callisto.scale);

    let ring = &plan.rings[0];
    assert_eq!("Saturn", ring.body);
    assert_offset_eq([saturn.translation.x, -2.0, 0.2], ring.translation);
    assert_eq!(saturn.orbit_speed, ring.orbit_speed);
    assert_eq!(72 * 36 * 6, plan.meshes[ring.mesh].mesh.vertex_count());
}

#[test]
fn test_scene_body_order_does_not_matter() {
    let config = SceneConfig::builtin().expect("built-in scene");
    let mut reversed = config.clone();
    reversed.bodies.reverse();

    let plan = ScenePlan::build(&config).expect("scene plan");
    let reversed_plan = ScenePlan::build(&reversed).expect("scene plan");
    for body in &plan.bodies {
        assert_eq!(Some(body), reversed_plan.body(&body.name));
    }
}

#[test]
fn test_scene_reference_errors() {
    let mut config = SceneConfig::builtin().expect("built-in scene");
    config.bodies[1].inherits = Some("Pluto".to_string());
    let err = ScenePlan::build(&config).expect_err("unknown body");
    assert!(format!("{err:#}").contains("Pluto"), "{err:#}");

    let mut config = SceneConfig::builtin().expect("built-in scene");
    let mercury = config
        .bodies
        .iter_mut()
        .find(|b| b.name == "Mercury")
        .expect("Mercury");
    mercury.inherits = Some("Earth".to_string());
    let err = ScenePlan::build(&config).expect_err("cycle");
    assert!(format!("{err:#}").contains("cyclic"), "{err:#}");

    let mut config = SceneConfig::builtin().expect("built-in scene");
    let copy = config.bodies[0].clone();
    config.bodies.push(copy);
    assert!(ScenePlan::build(&config).is_err());
}

#[test]
fn test_scene_overrides() {
    let config = SceneConfig::load_str("sphere:\n  lat_segments: 8\n").expect("layered scene");
    assert_eq!(8, config.sphere.lat_segments);
    assert_eq!(16, config.sphere.long_segments);
    assert_eq!(SceneConfig::builtin().expect("built-in scene").bodies, config.bodies);

    let plan = ScenePlan::build(&config).expect("scene plan");
    assert_eq!(8 * 16 * 6, plan.meshes[0].mesh.vertex_count());
}

proptest! {
    #[test]
    fn proptest_radius_survives_translation(
        r in 0.1..100.0_f64,
        d in -50.0..50.0_f64,
    ) {
        let mut sphere = ConformalSphere::from_radius(r).expect("valid sphere");
        prop_assert!(relative_eq(r, sphere.radius().expect("radius"), 1e-6));

        sphere.apply(Transform::Translate(d)).expect("translate");
        let radius = sphere.radius().expect("radius");
        prop_assert!(relative_eq(r, radius, 1e-6), "{} != {}", r, radius);
        let [_, _, z] = sphere.center().expect("center");
        prop_assert!((z - d).abs() <= 1e-6 * (1.0 + d.abs()), "{} != {}", z, d);
    }

    #[test]
    fn proptest_scale_multiplies_radius(f in 0.1..10.0_f64) {
        let mut sphere = unit_sphere();
        sphere.apply(Transform::Scale(f)).expect("scale");
        let radius = sphere.radius().expect("radius");
        prop_assert!(relative_eq(f, radius, 1e-6), "{} != {}", f, radius);
    }

    #[test]
    fn proptest_zero_rotation_is_identity(
        a in unit_vector(),
        b in unit_vector(),
        offset in unit_vector(),
        d in 0.5..20.0_f64,
    ) {
        let s = translate(unit_sphere().blade(), d, &Multivector::vector(offset))
            .expect("translate");
        let plane = Multivector::vector(a) ^ Multivector::vector(b);
        let same = rotate(&s, 0.0, &plane).expect("rotate");
        prop_assert!(s.abs_diff_eq(&same, 1e-9), "{} != {}", s, same);
    }

    #[test]
    fn proptest_zero_translation_is_identity(
        direction in unit_vector(),
        offset in unit_vector(),
        d in 0.5..20.0_f64,
    ) {
        let s = translate(unit_sphere().blade(), d, &Multivector::vector(offset))
            .expect("translate");
        let same = translate(&s, 0.0, &Multivector::vector(direction)).expect("translate");
        prop_assert!(s.abs_diff_eq(&same, 1e-9), "{} != {}", s, same);
    }
}
