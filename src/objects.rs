//! Objects
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    materials::{Material, MaterialConfig},
    utils::{self, SerdeVector},
    Point, Ray, Vec3,
};

pub trait Hittable {
    /// Nearest hit strictly closer than `t_max`
    fn try_hit(&self, ray: &Ray, t_max: f64) -> Option<HitRecord<'_>>;
}

/// Represents a hit
pub struct HitRecord<'a> {
    /// Point of intersection
    pub p: Point,
    /// Outward unit normal
    pub normal: Vec3,
    /// Distance along the ray, in units of the ray direction
    pub t: f64,
    /// Material of the surface that was hit
    pub material: &'a Material,
}

pub struct Sphere {
    pub center: Point,
    pub radius: f64,
    pub material: Material,
}
impl Sphere {
    pub fn new(center: Point, radius: f64, material: Material) -> Self {
        Self {
            center,
            radius,
            material,
        }
    }

    pub fn from_config(config: SphereConfig) -> Result<Self> {
        let center: Point = config.center.into();
        if !utils::is_finite(&center) {
            return Err(Error::InvalidScene(format!(
                "sphere center must be finite, got {:?}",
                config.center
            )));
        }
        if !config.radius.is_finite() || config.radius <= 0.0 {
            return Err(Error::InvalidScene(format!(
                "sphere radius must be positive, got {}",
                config.radius
            )));
        }
        Ok(Self::new(
            center,
            config.radius,
            Material::from_config(config.material)?,
        ))
    }

    /// Distance to the first intersection in front of the ray origin
    ///
    /// The near root wins when it lies ahead of the origin. A ray starting inside the sphere
    /// gets the far root, so rays travelling through the interior still find the exit wall.
    pub fn intersect(&self, ray: &Ray) -> Option<f64> {
        let l = self.center - ray.orig;
        let tca = l.dot(&ray.dir);
        let d2 = l.dot(&l) - tca * tca;
        let r2 = self.radius * self.radius;
        if d2 > r2 {
            return None;
        }
        let thc = (r2 - d2).sqrt();
        let t0 = tca - thc;
        let t1 = tca + thc;
        if t0 >= 0.0 {
            Some(t0)
        } else if t1 >= 0.0 {
            Some(t1)
        } else {
            None
        }
    }
}
impl Hittable for Sphere {
    fn try_hit(&self, ray: &Ray, t_max: f64) -> Option<HitRecord<'_>> {
        let t = self.intersect(ray).filter(|t| *t < t_max)?;
        let p = ray.get(t);
        Some(HitRecord {
            p,
            normal: (p - self.center).normalize(),
            t,
            material: &self.material,
        })
    }
}

/// Sphere config
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SphereConfig {
    pub center: SerdeVector,
    pub radius: f64,
    pub material: MaterialConfig,
}

/// Region of the horizontal plane a [`Plane`] actually covers
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Footprint {
    /// Open box `x_min < x < x_max`, `z_min < z < z_max`
    Rectangle {
        x_min: f64,
        x_max: f64,
        z_min: f64,
        z_max: f64,
    },
    /// Open ring around the vertical line through `center`
    Annulus {
        center: Point,
        inner_radius: f64,
        outer_radius: f64,
    },
}
impl Footprint {
    pub fn contains(&self, p: &Point) -> bool {
        match *self {
            Footprint::Rectangle {
                x_min,
                x_max,
                z_min,
                z_max,
            } => p[0] > x_min && p[0] < x_max && p[2] > z_min && p[2] < z_max,
            Footprint::Annulus {
                center,
                inner_radius,
                outer_radius,
            } => {
                let r = (p[0] - center[0]).hypot(p[2] - center[2]);
                r > inner_radius && r < outer_radius
            }
        }
    }

    pub fn from_config(config: FootprintConfig) -> Result<Self> {
        let footprint = match config {
            FootprintConfig::Rectangle {
                x_min,
                x_max,
                z_min,
                z_max,
            } => Footprint::Rectangle {
                x_min,
                x_max,
                z_min,
                z_max,
            },
            FootprintConfig::Annulus {
                center,
                inner_radius,
                outer_radius,
            } => Footprint::Annulus {
                center: center.into(),
                inner_radius,
                outer_radius,
            },
        };
        let valid = match footprint {
            Footprint::Rectangle {
                x_min,
                x_max,
                z_min,
                z_max,
            } => x_min < x_max && z_min < z_max,
            Footprint::Annulus {
                center,
                inner_radius,
                outer_radius,
            } => utils::is_finite(&center) && inner_radius >= 0.0 && inner_radius < outer_radius,
        };
        if !valid {
            return Err(Error::InvalidScene(format!(
                "plane footprint is empty: {footprint:?}"
            )));
        }
        Ok(footprint)
    }
}

/// Footprint config
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FootprintConfig {
    Rectangle {
        x_min: f64,
        x_max: f64,
        z_min: f64,
        z_max: f64,
    },
    Annulus {
        center: SerdeVector,
        inner_radius: f64,
        outer_radius: f64,
    },
}

/// Horizontal plane `y = height`, cut down to a finite footprint
pub struct Plane {
    pub height: f64,
    pub footprint: Footprint,
    pub material: Material,
}
impl Plane {
    /// Rays flatter than this never hit the plane
    const MIN_VERTICAL: f64 = 1e-3;

    pub fn new(height: f64, footprint: Footprint, material: Material) -> Self {
        Self {
            height,
            footprint,
            material,
        }
    }

    pub fn from_config(config: PlaneConfig) -> Result<Self> {
        if !config.height.is_finite() {
            return Err(Error::InvalidScene(format!(
                "plane height must be finite, got {}",
                config.height
            )));
        }
        Ok(Self::new(
            config.height,
            Footprint::from_config(config.footprint)?,
            Material::from_config(config.material)?,
        ))
    }

    pub fn intersect(&self, ray: &Ray) -> Option<f64> {
        if ray.dir[1].abs() <= Self::MIN_VERTICAL {
            return None;
        }
        let t = (self.height - ray.orig[1]) / ray.dir[1];
        if t > 0.0 && t.is_finite() && self.footprint.contains(&ray.get(t)) {
            Some(t)
        } else {
            None
        }
    }
}
impl Hittable for Plane {
    fn try_hit(&self, ray: &Ray, t_max: f64) -> Option<HitRecord<'_>> {
        let t = self.intersect(ray).filter(|t| *t < t_max)?;
        Some(HitRecord {
            p: ray.get(t),
            normal: Vec3::y(),
            t,
            material: &self.material,
        })
    }
}

/// Plane config
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaneConfig {
    pub height: f64,
    pub footprint: FootprintConfig,
    #[serde(default)]
    pub material: MaterialConfig,
}

/// Every kind of surface a scene can hold
pub enum Primitive {
    Sphere(Sphere),
    Plane(Plane),
}
impl Primitive {
    pub fn from_config(config: PrimitiveConfig) -> Result<Self> {
        Ok(match config {
            PrimitiveConfig::Sphere(c) => Primitive::Sphere(Sphere::from_config(c)?),
            PrimitiveConfig::Plane(c) => Primitive::Plane(Plane::from_config(c)?),
        })
    }

    /// Position in the scan order of a scene; lower ranks win exact ties
    pub fn rank(&self) -> u8 {
        match self {
            Primitive::Sphere(_) => 0,
            Primitive::Plane(_) => 1,
        }
    }

    pub fn material(&self) -> &Material {
        match self {
            Primitive::Sphere(s) => &s.material,
            Primitive::Plane(p) => &p.material,
        }
    }
}
impl Hittable for Primitive {
    fn try_hit(&self, ray: &Ray, t_max: f64) -> Option<HitRecord<'_>> {
        match self {
            Primitive::Sphere(s) => s.try_hit(ray, t_max),
            Primitive::Plane(p) => p.try_hit(ray, t_max),
        }
    }
}
impl From<Sphere> for Primitive {
    fn from(s: Sphere) -> Self {
        Primitive::Sphere(s)
    }
}
impl From<Plane> for Primitive {
    fn from(p: Plane) -> Self {
        Primitive::Plane(p)
    }
}

/// Primitive config
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PrimitiveConfig {
    Sphere(SphereConfig),
    Plane(PlaneConfig),
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn unit_sphere_at(center: Point, radius: f64) -> Sphere {
        Sphere::new(center, radius, Material::default())
    }

    fn floor() -> Plane {
        Plane::new(
            -4.0,
            Footprint::Rectangle {
                x_min: -10.0,
                x_max: 10.0,
                z_min: -30.0,
                z_max: -10.0,
            },
            Material::default(),
        )
    }

    #[test]
    fn sphere_head_on_distance() {
        let spheres = [
            (Point::new(0.0, 0.0, -5.0), 1.0, Point::zeros()),
            (Point::new(3.0, -2.0, 7.0), 0.5, Point::new(-1.0, 4.0, 2.0)),
            (Point::new(0.0, 2.4, -16.0), 1.3, Point::new(2.0, 5.0, 8.0)),
        ];
        for (center, radius, origin) in spheres {
            let sphere = unit_sphere_at(center, radius);
            let ray = Ray::new(origin, (center - origin).normalize());
            let t = sphere.intersect(&ray).unwrap();
            assert_relative_eq!(t, (center - origin).norm() - radius, epsilon = 1e-9);
        }
    }

    #[test]
    fn sphere_miss() {
        let sphere = unit_sphere_at(Point::new(0.0, 0.0, -5.0), 1.0);
        let ray = Ray::new(Point::zeros(), Vec3::new(0.0, 1.0, -1.0).normalize());
        assert!(sphere.intersect(&ray).is_none());
    }

    #[test]
    fn sphere_behind_origin() {
        let sphere = unit_sphere_at(Point::new(0.0, 0.0, 5.0), 1.0);
        let ray = Ray::new(Point::zeros(), Vec3::new(0.0, 0.0, -1.0));
        assert!(sphere.intersect(&ray).is_none());
    }

    #[test]
    fn sphere_from_inside_hits_far_wall() {
        let sphere = unit_sphere_at(Point::new(0.0, 0.0, -5.0), 1.0);
        let ray = Ray::new(Point::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, -1.0));
        assert_relative_eq!(sphere.intersect(&ray).unwrap(), 1.0);
        let hit = sphere.try_hit(&ray, f64::MAX).unwrap();
        assert_relative_eq!(hit.p, Point::new(0.0, 0.0, -6.0));
        assert_relative_eq!(hit.normal, Vec3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn sphere_respects_t_max() {
        let sphere = unit_sphere_at(Point::new(0.0, 0.0, -5.0), 1.0);
        let ray = Ray::new(Point::zeros(), Vec3::new(0.0, 0.0, -1.0));
        assert!(sphere.try_hit(&ray, 4.0).is_none());
        assert!(sphere.try_hit(&ray, 4.5).is_some());
    }

    #[test]
    fn plane_hit_inside_footprint() {
        let ray = Ray::new(Point::new(0.0, 0.0, -20.0), Vec3::new(0.0, -1.0, 0.0));
        let floor = floor();
        let hit = floor.try_hit(&ray, f64::MAX).unwrap();
        assert_relative_eq!(hit.t, 4.0);
        assert_eq!(hit.normal, Vec3::new(0.0, 1.0, 0.0));
        assert_relative_eq!(hit.p, Point::new(0.0, -4.0, -20.0));
    }

    #[test]
    fn plane_outside_footprint() {
        let ray = Ray::new(Point::new(0.0, 0.0, -5.0), Vec3::new(0.0, -1.0, 0.0));
        assert!(floor().intersect(&ray).is_none());
    }

    #[test]
    fn plane_ignores_flat_rays() {
        let ray = Ray::new(
            Point::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, -0.0005, -1.0).normalize(),
        );
        assert!(floor().intersect(&ray).is_none());
    }

    #[test]
    fn plane_behind_origin() {
        let ray = Ray::new(Point::new(0.0, 0.0, -20.0), Vec3::new(0.0, 1.0, 0.0));
        assert!(floor().intersect(&ray).is_none());
    }

    #[test]
    fn annulus_footprint() {
        let ring = Footprint::Annulus {
            center: Point::new(0.0, 0.0, -20.0),
            inner_radius: 2.0,
            outer_radius: 5.0,
        };
        assert!(!ring.contains(&Point::new(0.0, -4.0, -20.0)));
        assert!(ring.contains(&Point::new(3.0, -4.0, -20.0)));
        assert!(!ring.contains(&Point::new(0.0, -4.0, -26.0)));
    }

    #[test]
    fn footprint_config_rejects_empty_rectangle() {
        let config = FootprintConfig::Rectangle {
            x_min: 1.0,
            x_max: -1.0,
            z_min: -30.0,
            z_max: -10.0,
        };
        assert!(Footprint::from_config(config).is_err());
    }

    #[test]
    fn primitive_config_from_yaml() {
        let yaml = r#"
type: Sphere
center: [0, 2.4, -16]
radius: 1.3
material:
  albedo: [0.75, 0.1, 0.0, 0.0]
  diffuse: { type: Solid, color: [1, 1, 1] }
  specular_exponent: 50
"#;
        let config: PrimitiveConfig = serde_yaml::from_str(yaml).unwrap();
        let primitive = Primitive::from_config(config).unwrap();
        assert_eq!(primitive.rank(), 0);
        assert_eq!(primitive.material().specular_exponent, 50.0);
    }

    #[test]
    fn sphere_config_rejects_zero_radius() {
        let yaml = "center: [0, 0, 0]\nradius: 0\nmaterial: {}\n";
        let config: SphereConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(Sphere::from_config(config).is_err());
    }
}
