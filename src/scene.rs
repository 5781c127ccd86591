//! Scene: every primitive and light a render sees

use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::{
    cameras::CameraConfig,
    error::{Error, Result},
    lights::{Light, LightConfig},
    objects::{HitRecord, Hittable, Primitive, PrimitiveConfig},
    Ray, DEFAULT_FAR_LIMIT,
};

/// Read-only once built; tracing only ever borrows it
pub struct Scene {
    objects: Vec<Primitive>,
    lights: Vec<Light>,
    far_limit: f64,
}
impl Scene {
    /// Primitives are reordered so every sphere is scanned before any plane; within a kind the
    /// given order is kept
    pub fn new(mut objects: Vec<Primitive>, lights: Vec<Light>) -> Self {
        objects.sort_by_key(Primitive::rank);
        Self {
            objects,
            lights,
            far_limit: DEFAULT_FAR_LIMIT,
        }
    }

    pub fn with_far_limit(mut self, far_limit: f64) -> Self {
        self.far_limit = far_limit;
        self
    }

    pub fn add(&mut self, obj: impl Into<Primitive>) {
        let obj = obj.into();
        let at = self.objects.partition_point(|o| o.rank() <= obj.rank());
        self.objects.insert(at, obj);
    }

    pub fn add_light(&mut self, light: Light) {
        self.lights.push(light)
    }

    pub fn objects(&self) -> &[Primitive] {
        &self.objects
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn far_limit(&self) -> f64 {
        self.far_limit
    }

    /// Nearest surface along the ray, if it is closer than the far limit
    pub fn intersect(&self, ray: &Ray) -> Option<HitRecord<'_>> {
        self.try_hit(ray, self.far_limit)
    }

    pub fn from_config(config: SceneConfig) -> Result<Self> {
        if !config.far_limit.is_finite() || config.far_limit <= 0.0 {
            return Err(Error::InvalidScene(format!(
                "far limit must be positive, got {}",
                config.far_limit
            )));
        }
        let objects = config
            .objects
            .into_iter()
            .map(Primitive::from_config)
            .collect::<Result<Vec<_>>>()?;
        let lights = config
            .lights
            .into_iter()
            .map(Light::from_config)
            .collect::<Result<Vec<_>>>()?;
        debug!(
            "Built scene with {} objects and {} lights",
            objects.len(),
            lights.len()
        );
        Ok(Self::new(objects, lights).with_far_limit(config.far_limit))
    }
}
impl Hittable for Scene {
    fn try_hit(&self, ray: &Ray, t_max: f64) -> Option<HitRecord<'_>> {
        let mut closest_so_far = t_max;
        let mut hr_final = None;

        for obj in &self.objects {
            if let Some(hr) = obj.try_hit(ray, closest_so_far) {
                closest_so_far = hr.t;
                hr_final = Some(hr)
            }
        }
        hr_final
    }
}

/// Scene file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneConfig {
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default = "default_far_limit")]
    pub far_limit: f64,
    #[serde(default)]
    pub lights: Vec<LightConfig>,
    #[serde(default)]
    pub objects: Vec<PrimitiveConfig>,
}
impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            camera: CameraConfig::default(),
            far_limit: default_far_limit(),
            lights: Vec::new(),
            objects: Vec::new(),
        }
    }
}
impl SceneConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&raw)?)
    }
}

fn default_far_limit() -> f64 {
    DEFAULT_FAR_LIMIT
}
