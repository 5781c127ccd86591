//! Implementation of materials

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    textures::{self, SolidColor, Texture, TextureConfig},
    Albedo, Color, Point,
};

/// Surface response of a primitive
///
/// The albedo weights are artistic: nothing requires them to sum to one.
pub struct Material {
    pub refractive_index: f64,
    pub albedo: Albedo,
    pub diffuse: Texture,
    pub specular_exponent: f64,
}
impl Material {
    pub fn new(
        refractive_index: f64,
        albedo: Albedo,
        diffuse: Texture,
        specular_exponent: f64,
    ) -> Self {
        Self {
            refractive_index,
            albedo,
            diffuse,
            specular_exponent,
        }
    }

    /// Material with a single diffuse color
    pub fn solid(
        refractive_index: f64,
        albedo: Albedo,
        color: Color,
        specular_exponent: f64,
    ) -> Self {
        Self::new(
            refractive_index,
            albedo,
            Box::new(SolidColor::new(color)),
            specular_exponent,
        )
    }

    pub fn from_config(config: MaterialConfig) -> Result<Self> {
        let albedo = Albedo::from(config.albedo);
        if !albedo.iter().all(|w| w.is_finite()) {
            return Err(Error::InvalidScene(format!(
                "albedo weights must be finite, got {:?}",
                config.albedo
            )));
        }
        if !config.refractive_index.is_finite() || config.refractive_index <= 0.0 {
            return Err(Error::InvalidScene(format!(
                "refractive index must be positive, got {}",
                config.refractive_index
            )));
        }
        if !config.specular_exponent.is_finite() {
            return Err(Error::InvalidScene(format!(
                "specular exponent must be finite, got {}",
                config.specular_exponent
            )));
        }
        Ok(Self::new(
            config.refractive_index,
            albedo,
            textures::Generator::from_config(config.diffuse)?,
            config.specular_exponent,
        ))
    }

    /// Diffuse color of the surface at `p`
    pub fn diffuse_color(&self, p: &Point) -> Color {
        self.diffuse.value(p)
    }
}
impl Default for Material {
    fn default() -> Self {
        Self::solid(1.0, Albedo::new(1.0, 0.0, 0.0, 0.0), Color::zeros(), 0.0)
    }
}
impl Clone for Material {
    fn clone(&self) -> Self {
        Self {
            refractive_index: self.refractive_index,
            albedo: self.albedo,
            diffuse: dyn_clone::clone_box(&*self.diffuse),
            specular_exponent: self.specular_exponent,
        }
    }
}

/// Material Config
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialConfig {
    #[serde(default = "default_refractive_index")]
    pub refractive_index: f64,
    #[serde(default = "default_albedo")]
    pub albedo: [f64; 4],
    #[serde(default)]
    pub diffuse: TextureConfig,
    #[serde(default)]
    pub specular_exponent: f64,
}

impl Default for MaterialConfig {
    fn default() -> Self {
        Self {
            refractive_index: default_refractive_index(),
            albedo: default_albedo(),
            diffuse: TextureConfig::default(),
            specular_exponent: 0.0,
        }
    }
}

fn default_refractive_index() -> f64 {
    1.0
}

fn default_albedo() -> [f64; 4] {
    [1.0, 0.0, 0.0, 0.0]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_material_is_pure_diffuse_black() {
        let m = Material::default();
        assert_eq!(m.refractive_index, 1.0);
        assert_eq!(m.albedo, Albedo::new(1.0, 0.0, 0.0, 0.0));
        assert_eq!(m.diffuse_color(&Point::zeros()), Color::zeros());
    }

    #[test]
    fn clone_is_independent_copy() {
        let red = Color::new(0.8, 0.0, 0.0);
        let m = Material::solid(1.5, Albedo::new(0.6, 0.3, 0.1, 0.0), red, 50.0);
        let mut copy = m.clone();
        copy.diffuse = Box::new(SolidColor::new(Color::zeros()));
        assert_eq!(m.diffuse_color(&Point::zeros()), red);
        assert_eq!(copy.refractive_index, 1.5);
    }

    #[test]
    fn config_defaults() {
        let config: MaterialConfig = serde_yaml::from_str("specular_exponent: 50").unwrap();
        let m = Material::from_config(config).unwrap();
        assert_eq!(m.refractive_index, 1.0);
        assert_eq!(m.albedo, Albedo::new(1.0, 0.0, 0.0, 0.0));
        assert_eq!(m.specular_exponent, 50.0);
    }

    #[test]
    fn config_rejects_bad_index() {
        let config: MaterialConfig = serde_yaml::from_str("refractive_index: 0").unwrap();
        assert!(Material::from_config(config).is_err());
    }
}
