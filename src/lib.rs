//! Recursive ray tracing of analytic spheres over an environment map

use nalgebra::{Vector3, Vector4};

pub mod cameras;
pub mod environment;
pub mod error;
pub mod lights;
pub mod materials;
pub mod objects;
pub mod presets;
pub mod render;
pub mod scene;
pub mod textures;
pub mod tracer;
pub mod utils;

pub use error::{Error, Result};

pub type Vec3 = Vector3<f64>;
pub type Point = Vec3;
pub type Color = Vec3;
/// Weights of the diffuse, specular, reflected and refracted terms, in that order
pub type Albedo = Vector4<f64>;

/// Deepest recursion level that still intersects the scene; anything deeper samples the
/// environment map
pub const MAX_DEPTH: u32 = 4;

/// Displacement along the normal applied to the origin of every secondary ray
pub const SURFACE_EPSILON: f64 = 1e-3;

/// Hits at or beyond this distance count as the ray escaping the scene
pub const DEFAULT_FAR_LIMIT: f64 = 1000.0;

/// Prelude
pub mod prelude {
    pub use crate::cameras::{Camera, CameraConfig};
    pub use crate::environment::EnvMap;
    pub use crate::lights::Light;
    pub use crate::materials::Material;
    pub use crate::objects::{Footprint, Plane, Primitive, Sphere};
    pub use crate::render::{render, Framebuffer};
    pub use crate::scene::{Scene, SceneConfig};
    pub use crate::textures::{Checker, Rings, SolidColor};
    pub use crate::tracer::cast_ray;
    pub use crate::{Albedo, Color, Point, Ray, Vec3};
}

/// The ray in ray tracing
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub orig: Point,
    pub dir: Vec3,
}
impl Ray {
    pub fn new(orig: Point, dir: Vec3) -> Self {
        Self { orig, dir }
    }

    pub fn get(&self, t: f64) -> Point {
        self.orig + t * self.dir
    }
}
