//! Cameras and configs for cameras
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    utils::{self, SerdeVector},
    Point, Ray, Vec3,
};

/// Camera Config
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraConfig {
    #[serde(default = "default_position")]
    pub position: SerdeVector,
    #[serde(default = "default_vertical_fov_deg")]
    pub vertical_fov_deg: f64,
    #[serde(default = "default_width")]
    pub width: usize,
    #[serde(default = "default_height")]
    pub height: usize,
}
impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: default_position(),
            vertical_fov_deg: default_vertical_fov_deg(),
            width: default_width(),
            height: default_height(),
        }
    }
}

fn default_position() -> SerdeVector {
    SerdeVector([0.0, 0.0, 0.0])
}

fn default_vertical_fov_deg() -> f64 {
    60.0
}

fn default_width() -> usize {
    1024
}

fn default_height() -> usize {
    768
}

/// Pinhole camera looking down -z with +y up
///
/// The image plane sits at the distance where `height` pixels span the vertical field of view,
/// so one pixel is one unit on it.
#[derive(Debug, Clone)]
pub struct Camera {
    origin: Point,
    width: usize,
    height: usize,
    focal_length: f64,
}
impl Camera {
    /// Unchecked; [`Camera::from_config`] validates the same inputs
    pub fn new(origin: Point, vertical_fov_deg: f64, width: usize, height: usize) -> Self {
        let theta = vertical_fov_deg.to_radians();
        let focal_length = height as f64 / (2.0 * (theta / 2.0).tan());
        Self {
            origin,
            width,
            height,
            focal_length,
        }
    }

    pub fn from_config(config: &CameraConfig) -> Result<Self> {
        let origin: Point = config.position.into();
        if !utils::is_finite(&origin) {
            return Err(Error::InvalidScene(format!(
                "camera position must be finite, got {:?}",
                config.position
            )));
        }
        if config.width == 0 || config.height == 0 {
            return Err(Error::InvalidScene(format!(
                "image must have pixels, got {}x{}",
                config.width, config.height
            )));
        }
        if !(config.vertical_fov_deg > 0.0 && config.vertical_fov_deg < 180.0) {
            return Err(Error::InvalidScene(format!(
                "vertical field of view must be between 0 and 180 degrees, got {}",
                config.vertical_fov_deg
            )));
        }
        Ok(Self::new(
            origin,
            config.vertical_fov_deg,
            config.width,
            config.height,
        ))
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Primary ray through the center of pixel `(i, j)`; row 0 is the top of the image
    pub fn get_ray(&self, i: usize, j: usize) -> Ray {
        let dir = Vec3::new(
            (i as f64 + 0.5) - self.width as f64 / 2.0,
            -(j as f64 + 0.5) + self.height as f64 / 2.0,
            -self.focal_length,
        );
        Ray::new(self.origin, dir.normalize())
    }
}
