//! Environment map
//!
//! An equirectangular image surrounding the scene. Every ray that leaves the scene, or runs
//! out of bounces, picks up the color the map shows in its direction.

use std::f64::consts::PI;
use std::path::Path;

use image::RgbImage;
use log::debug;

use crate::{
    error::{Error, Result},
    Color, Vec3,
};

/// Linear RGB colors stored row-major, top row first
#[derive(Debug, Clone, PartialEq)]
pub struct EnvMap {
    width: usize,
    height: usize,
    pixels: Vec<Color>,
}
impl EnvMap {
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<Color>) -> Result<Self> {
        if width == 0 || height == 0 || pixels.len() != width * height {
            return Err(Error::EnvMapShape {
                width,
                height,
                len: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// The same color in every direction
    pub fn solid(color: Color) -> Self {
        Self {
            width: 1,
            height: 1,
            pixels: vec![color],
        }
    }

    /// Map 8-bit channels to [0, 1], keeping the image's row order
    pub fn from_image(image: &RgbImage) -> Result<Self> {
        let pixels = image
            .pixels()
            .map(|p| Color::new(p[0] as f64, p[1] as f64, p[2] as f64) / 255.0)
            .collect();
        Self::from_pixels(image.width() as usize, image.height() as usize, pixels)
    }

    /// Decode a three channel image from disk, reduced to 8 bits per channel
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let image = image::open(path).map_err(|source| Error::EnvMap {
            path: path.to_path_buf(),
            source,
        })?;
        if image.color().channel_count() != 3 {
            return Err(Error::EnvMapFormat {
                path: path.to_path_buf(),
                color: image.color(),
            });
        }
        let envmap = Self::from_image(&image.into_rgb8())?;
        debug!(
            "Loaded {}x{} environment map from {}",
            envmap.width,
            envmap.height,
            path.display()
        );
        Ok(envmap)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixel(&self, x: usize, y: usize) -> Color {
        self.pixels[x + y * self.width]
    }

    /// Color seen along the unit direction `dir`
    ///
    /// Longitude comes from `atan2(z, x)` and latitude from `acos(y)`, so straight up reads
    /// the top row. Both indices are clamped to the map.
    pub fn sample(&self, dir: &Vec3) -> Color {
        let u = dir[2].atan2(dir[0]) / (2.0 * PI) + 0.5;
        let v = dir[1].clamp(-1.0, 1.0).acos() / PI;
        let x = ((u * self.width as f64) as i64).clamp(0, self.width as i64 - 1);
        let y = ((v * self.height as f64) as i64).clamp(0, self.height as i64 - 1);
        self.pixel(x as usize, y as usize)
    }
}
