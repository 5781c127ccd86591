//! Recursive shading
//!
//! Each hit combines Phong lighting from the unshadowed lights with one reflected and one
//! refracted ray, weighted by the material albedo. Rays that escape the scene, or go deeper
//! than [`MAX_DEPTH`], take their color from the environment map.

use crate::{
    environment::EnvMap,
    scene::Scene,
    utils::{offset_origin, reflect, refract},
    Color, Ray, MAX_DEPTH,
};

/// Color carried back along `ray`
///
/// The result is unclamped and channels may exceed one; tone mapping happens when the frame
/// is converted to pixels. Both secondary rays are traced even when their albedo weight is
/// zero.
pub fn cast_ray(ray: &Ray, scene: &Scene, envmap: &EnvMap, depth: u32) -> Color {
    if depth > MAX_DEPTH {
        return envmap.sample(&ray.dir);
    }
    let Some(hit) = scene.intersect(ray) else {
        return envmap.sample(&ray.dir);
    };
    let material = hit.material;
    let n = hit.normal;

    let reflect_dir = reflect(&ray.dir, &n).normalize();
    let refract_dir = refract(&ray.dir, &n, material.refractive_index, 1.0).normalize();
    let reflect_ray = Ray::new(offset_origin(&hit.p, &n, &reflect_dir), reflect_dir);
    let refract_ray = Ray::new(offset_origin(&hit.p, &n, &refract_dir), refract_dir);
    let reflect_color = cast_ray(&reflect_ray, scene, envmap, depth + 1);
    let refract_color = cast_ray(&refract_ray, scene, envmap, depth + 1);

    let mut diffuse_intensity = 0.0;
    let mut specular_intensity = 0.0;
    for light in scene.lights() {
        let to_light = light.position - hit.p;
        let light_distance = to_light.norm();
        let light_dir = to_light / light_distance;

        // Any surface between the point and the light blocks it entirely
        let shadow_ray = Ray::new(offset_origin(&hit.p, &n, &light_dir), light_dir);
        if let Some(blocker) = scene.intersect(&shadow_ray) {
            if (blocker.p - shadow_ray.orig).norm() < light_distance {
                continue;
            }
        }

        diffuse_intensity += light.intensity * light_dir.dot(&n).max(0.0);
        specular_intensity += (-reflect(&-light_dir, &n))
            .dot(&ray.dir)
            .max(0.0)
            .powf(material.specular_exponent)
            * light.intensity;
    }

    let albedo = material.albedo;
    material.diffuse_color(&hit.p) * diffuse_intensity * albedo[0]
        + Color::repeat(1.0) * specular_intensity * albedo[1]
        + reflect_color * albedo[2]
        + refract_color * albedo[3]
}
