//! Utils

use image::Rgb;
use serde::{Deserialize, Serialize};

use crate::{Color, Point, Vec3, SURFACE_EPSILON};

/// Reflect `v` about the normal `n`
pub fn reflect(v: &Vec3, n: &Vec3) -> Vec3 {
    v - n * (2.0 * v.dot(n))
}

/// Outcome of bending a ray through an interface
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Refraction {
    /// The transmitted direction given by Snell's law
    Transmitted(Vec3),
    /// The ray cannot leave the denser medium at this angle
    TotalInternalReflection,
}

/// Snell's law at an interface with normal `n`
///
/// `exit_index` is the refractive index of the medium on the far side of the surface and
/// `entry_index` the one the ray travels in. When the ray hits the surface from the back
/// (`v . n > 0`) the normal is flipped and the indices swapped, so the formula always sees a
/// ray entering from the `entry_index` side.
pub fn try_refract(v: &Vec3, n: &Vec3, exit_index: f64, entry_index: f64) -> Refraction {
    let cos_incidence = -v.dot(n).clamp(-1.0, 1.0);
    if cos_incidence < 0.0 {
        return try_refract(v, &-n, entry_index, exit_index);
    }
    let eta = entry_index / exit_index;
    let k = 1.0 - eta * eta * (1.0 - cos_incidence * cos_incidence);
    if k < 0.0 {
        Refraction::TotalInternalReflection
    } else {
        Refraction::Transmitted(v * eta + n * (eta * cos_incidence - k.sqrt()))
    }
}

/// Refracted direction as the tracer consumes it
///
/// Under total internal reflection there is no transmitted ray, but the tracer still follows
/// one: the unit x axis stands in for it. This keeps the refraction term of a material
/// contributing whatever the environment shows in that direction, exactly like the renders
/// this tracer reproduces. Use [`try_refract`] to tell the two cases apart.
pub fn refract(v: &Vec3, n: &Vec3, exit_index: f64, entry_index: f64) -> Vec3 {
    match try_refract(v, n, exit_index, entry_index) {
        Refraction::Transmitted(dir) => dir,
        Refraction::TotalInternalReflection => Vec3::x(),
    }
}

/// Nudge `p` off its surface to the side `dir` leaves towards
pub fn offset_origin(p: &Point, n: &Vec3, dir: &Vec3) -> Point {
    if dir.dot(n) < 0.0 {
        p - n * SURFACE_EPSILON
    } else {
        p + n * SURFACE_EPSILON
    }
}

pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + t * (b - a)
}

pub fn lerp_vec(a: &Vec3, b: &Vec3, t: f64) -> Vec3 {
    a + (b - a) * t
}

/// Convert an unbounded color into an 8-bit pixel
///
/// A color whose brightest channel exceeds one is scaled down uniformly so the hue survives,
/// then every channel is clamped to [0, 1] and truncated to 0..=255.
pub fn tone_map(color: &Color) -> Rgb<u8> {
    let max = color[0].max(color[1]).max(color[2]);
    let color = if max > 1.0 { color / max } else { *color };
    Rgb([
        scale_color(color[0]),
        scale_color(color[1]),
        scale_color(color[2]),
    ])
}

/// scale the color to between 0 and 255
fn scale_color(val: f64) -> u8 {
    (255.0 * val.clamp(0.0, 1.0)) as u8
}

pub(crate) fn is_finite(v: &Vec3) -> bool {
    v.iter().all(|c| c.is_finite())
}

/// A vector as it appears in scene files: `[x, y, z]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SerdeVector(pub [f64; 3]);
impl From<SerdeVector> for Vec3 {
    fn from(v: SerdeVector) -> Self {
        Vec3::new(v.0[0], v.0[1], v.0[2])
    }
}
impl From<Vec3> for SerdeVector {
    fn from(v: Vec3) -> Self {
        Self([v[0], v[1], v[2]])
    }
}
