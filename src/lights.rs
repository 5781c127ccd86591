//! Point lights

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    utils::{self, SerdeVector},
    Point,
};

/// An isotropic point light; its intensity does not fall off with distance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub position: Point,
    pub intensity: f64,
}
impl Light {
    pub fn new(position: Point, intensity: f64) -> Self {
        Self {
            position,
            intensity,
        }
    }

    pub fn from_config(config: LightConfig) -> Result<Self> {
        let position: Point = config.position.into();
        if !utils::is_finite(&position) || !config.intensity.is_finite() {
            return Err(Error::InvalidScene(format!(
                "light must have a finite position and intensity, got {config:?}"
            )));
        }
        Ok(Self::new(position, config.intensity))
    }
}

/// Light config
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LightConfig {
    pub position: SerdeVector,
    pub intensity: f64,
}
