//! Built-in scenes

use crate::{
    cameras::CameraConfig,
    lights::Light,
    materials::Material,
    objects::{Footprint, Plane, Sphere},
    scene::Scene,
    textures::Checker,
    utils::{lerp, lerp_vec, SerdeVector},
    Albedo, Color, Point, Vec3,
};

/// The camera the snowman was composed for
pub fn snowman_camera() -> CameraConfig {
    CameraConfig {
        position: SerdeVector([2.0, 5.0, 8.0]),
        vertical_fov_deg: 60.0,
        width: 1500,
        height: 900,
    }
}

/// A snowman with stick arms and a carrot nose, standing behind a checkered floor tile and lit
/// by three lights
pub fn snowman() -> Scene {
    let mut scene = Scene::new(Vec::new(), Vec::new());

    let snow = Material::solid(
        1.0,
        Albedo::new(0.75, 0.1, 0.0, 0.0),
        Color::new(1.0, 1.0, 1.0),
        50.0,
    );
    scene.add(Sphere::new(Point::new(0.0, 2.4, -16.0), 1.3, snow.clone()));
    scene.add(Sphere::new(Point::new(0.0, 0.0, -16.0), 1.5, snow.clone()));
    scene.add(Sphere::new(Point::new(0.0, -2.0, -16.0), 1.7, snow));

    let eyes = Material::solid(
        1.0,
        Albedo::new(0.6, 0.3, 0.1, 0.0),
        Color::new(0.0, 0.0, 0.0),
        50.0,
    );
    scene.add(Sphere::new(Point::new(-0.45, 3.0, -15.0), 0.2, eyes.clone()));
    scene.add(Sphere::new(Point::new(0.45, 3.0, -15.0), 0.2, eyes));

    let buttons = Material::solid(
        1.0,
        Albedo::new(0.6, 0.3, 0.1, 0.0),
        Color::new(0.8, 0.0, 0.0),
        50.0,
    );
    for center in [
        Point::new(0.0, 1.0, -15.0),
        Point::new(0.0, 0.5, -14.65),
        Point::new(0.0, 0.0, -14.6),
    ] {
        scene.add(Sphere::new(center, 0.2, buttons.clone()));
    }

    add_nose(&mut scene);
    add_arms(&mut scene);
    scene.add(checkered_floor());

    scene.add_light(Light::new(Point::new(-20.0, 20.0, 20.0), 1.5));
    scene.add_light(Light::new(Point::new(30.0, 50.0, -25.0), 1.8));
    scene.add_light(Light::new(Point::new(30.0, 20.0, 30.0), 1.7));
    scene
}

/// A carrot of shrinking spheres; its outer half bends off to the side
fn add_nose(scene: &mut Scene) {
    const PIECES: usize = 6;
    const LENGTH: f64 = 1.0;
    const BASE_RADIUS: f64 = 0.2;
    const TIP_RADIUS: f64 = 0.05;

    let carrot = Material::solid(
        1.0,
        Albedo::new(0.9, 0.1, 0.0, 0.0),
        Color::new(1.0, 0.5, 0.0),
        10.0,
    );
    let start = Point::new(0.0, 2.6, -14.7);
    let end = start + Vec3::new(0.0, 0.0, LENGTH);
    for i in 0..PIECES {
        let progress = i as f64 / (PIECES - 1) as f64;
        let radius = lerp(BASE_RADIUS, TIP_RADIUS, progress);
        let mut center = lerp_vec(&start, &end, progress);
        if progress > 0.5 {
            center[0] += (progress - 0.5) * 2.0 * 0.2;
        }
        scene.add(Sphere::new(center, radius, carrot.clone()));
    }
}

/// Two sticks of small spheres rising away from the middle ball, each with a steeper twig
/// branching off its outer half
fn add_arms(scene: &mut Scene) {
    const SEGMENTS: usize = 20;
    const TWIG_START: usize = 11;
    const RADIUS: f64 = 0.05;

    let stick = Material::solid(
        1.0,
        Albedo::new(0.9, 0.1, 0.0, 0.0),
        Color::new(0.35, 0.16, 0.08),
        10.0,
    );
    // Left arm grows towards -x, right arm towards +x
    for side in [-1.0, 1.0] {
        let shoulder = Point::new(1.5 * side, 0.5, -16.0);
        let twig_root = Point::new(1.5 * side, 0.27, -16.0);
        for i in 0..SEGMENTS {
            let step = i as f64 * 0.06;
            if i >= TWIG_START {
                let twig = twig_root + Vec3::new(step * side, step, 0.0);
                scene.add(Sphere::new(twig, RADIUS, stick.clone()));
            }
            let arm = shoulder + Vec3::new(step * side, step / 2.0, 0.0);
            scene.add(Sphere::new(arm, RADIUS, stick.clone()));
        }
    }
}

/// Black and white tile at `y = -4` covering `|x| < 10`, `-30 < z < -10`
fn checkered_floor() -> Plane {
    Plane::new(
        -4.0,
        Footprint::Rectangle {
            x_min: -10.0,
            x_max: 10.0,
            z_min: -30.0,
            z_max: -10.0,
        },
        Material::new(
            1.0,
            Albedo::new(1.0, 0.0, 0.0, 0.0),
            Box::new(Checker::from_solid_colors(
                Color::new(1.0, 1.0, 1.0),
                Color::new(0.0, 0.0, 0.0),
                0.5,
            )),
            0.0,
        ),
    )
}
