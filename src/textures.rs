//! Textures/colors
//!
//! A texture turns a world-space hit point into the diffuse color of the surface there.

use std::f64::consts::PI;

use dyn_clone::DynClone;
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    utils::SerdeVector,
    Color, Point,
};

pub type Texture = Box<dyn Textured + Send + Sync>;

pub trait Textured: DynClone {
    fn value(&self, p: &Point) -> Color;
}

/// Config for textures
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TextureConfig {
    Solid(SolidColorConfig),
    Checker(CheckerConfig),
    Rings(RingsConfig),
}
impl Default for TextureConfig {
    fn default() -> Self {
        Self::Solid(SolidColorConfig {
            color: SerdeVector([0.0, 0.0, 0.0]),
        })
    }
}

/// Generator from config
pub struct Generator;
impl Generator {
    pub fn from_config(config: TextureConfig) -> Result<Texture> {
        Ok(match config {
            TextureConfig::Solid(c) => Box::new(SolidColor::from_config(c)),
            TextureConfig::Checker(c) => Box::new(Checker::from_config(c)?),
            TextureConfig::Rings(c) => Box::new(Rings::from_config(c)?),
        })
    }
}

/// Solid Color
#[derive(Debug, Clone)]
pub struct SolidColor {
    color_value: Color,
}
impl SolidColor {
    pub fn new(color: Color) -> Self {
        Self { color_value: color }
    }

    pub fn from_config(config: SolidColorConfig) -> Self {
        Self::new(config.color.into())
    }
}
impl Textured for SolidColor {
    fn value(&self, _p: &Point) -> Color {
        self.color_value
    }
}

/// Solid Color Config
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolidColorConfig {
    pub color: SerdeVector,
}

/// Checker Texture
///
/// Squares of side `1 / scale` laid out on the horizontal (x, z) plane. Coordinates are
/// truncated towards zero after scaling; x is biased by a large constant first so the squares
/// on either side of `x = 0` keep alternating.
pub struct Checker {
    odd: Texture,
    even: Texture,
    scale: f64,
}
impl Checker {
    const X_BIAS: f64 = 1000.0;

    pub fn from_solid_colors(c1: Color, c2: Color, scale: f64) -> Self {
        Self {
            even: Box::new(SolidColor::new(c1)),
            odd: Box::new(SolidColor::new(c2)),
            scale,
        }
    }

    pub fn from_config(config: CheckerConfig) -> Result<Self> {
        if !config.scale.is_finite() || config.scale <= 0.0 {
            return Err(Error::InvalidScene(format!(
                "checker scale must be positive, got {}",
                config.scale
            )));
        }
        Ok(Self::from_solid_colors(
            config.even.into(),
            config.odd.into(),
            config.scale,
        ))
    }

    fn is_odd(&self, p: &Point) -> bool {
        let ix = (self.scale * p[0] + Self::X_BIAS) as i64;
        let iz = (self.scale * p[2]) as i64;
        (ix + iz) & 1 == 1
    }
}
impl Clone for Checker {
    fn clone(&self) -> Self {
        Self {
            odd: dyn_clone::clone_box(&*self.odd),
            even: dyn_clone::clone_box(&*self.even),
            scale: self.scale,
        }
    }
}
impl Textured for Checker {
    fn value(&self, p: &Point) -> Color {
        if self.is_odd(p) {
            self.odd.value(p)
        } else {
            self.even.value(p)
        }
    }
}

/// Checker Config
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckerConfig {
    pub even: SerdeVector,
    pub odd: SerdeVector,
    #[serde(default = "default_checker_scale")]
    pub scale: f64,
}

fn default_checker_scale() -> f64 {
    0.5
}

/// Concentric bands crossed with angular sectors around a vertical axis
///
/// A point is odd when exactly one of its band index and sector index is odd.
pub struct Rings {
    odd: Texture,
    even: Texture,
    center: Point,
    band_width: f64,
    sectors: u32,
}
impl Rings {
    pub fn new(even: Texture, odd: Texture, center: Point, band_width: f64, sectors: u32) -> Self {
        Self {
            odd,
            even,
            center,
            band_width,
            sectors,
        }
    }

    pub fn from_config(config: RingsConfig) -> Result<Self> {
        if !config.band_width.is_finite() || config.band_width <= 0.0 {
            return Err(Error::InvalidScene(format!(
                "ring band width must be positive, got {}",
                config.band_width
            )));
        }
        if config.sectors == 0 {
            return Err(Error::InvalidScene("rings need at least one sector".into()));
        }
        Ok(Self::new(
            Box::new(SolidColor::new(config.even.into())),
            Box::new(SolidColor::new(config.odd.into())),
            config.center.into(),
            config.band_width,
            config.sectors,
        ))
    }

    fn is_odd(&self, p: &Point) -> bool {
        let dx = p[0] - self.center[0];
        let dz = p[2] - self.center[2];
        let band = (dx.hypot(dz) / self.band_width).floor() as i64;
        let sector_angle = 2.0 * PI / self.sectors as f64;
        let sector = ((dz.atan2(dx) + PI) / sector_angle).floor() as i64;
        (band ^ sector) & 1 == 1
    }
}
impl Clone for Rings {
    fn clone(&self) -> Self {
        Self {
            odd: dyn_clone::clone_box(&*self.odd),
            even: dyn_clone::clone_box(&*self.even),
            center: self.center,
            band_width: self.band_width,
            sectors: self.sectors,
        }
    }
}
impl Textured for Rings {
    fn value(&self, p: &Point) -> Color {
        if self.is_odd(p) {
            self.odd.value(p)
        } else {
            self.even.value(p)
        }
    }
}

/// Rings Config
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RingsConfig {
    pub even: SerdeVector,
    pub odd: SerdeVector,
    pub center: SerdeVector,
    pub band_width: f64,
    pub sectors: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn white() -> Color {
        Color::new(1.0, 1.0, 1.0)
    }

    fn black() -> Color {
        Color::zeros()
    }

    #[test]
    fn checker_alternates_along_x_and_z() {
        let checker = Checker::from_solid_colors(white(), black(), 0.5);
        let p = Point::new(0.5, -4.0, -10.5);
        let along_x = Point::new(2.5, -4.0, -10.5);
        let along_z = Point::new(0.5, -4.0, -12.5);
        let diagonal = Point::new(2.5, -4.0, -12.5);
        assert_ne!(checker.value(&p), checker.value(&along_x));
        assert_ne!(checker.value(&p), checker.value(&along_z));
        assert_eq!(checker.value(&p), checker.value(&diagonal));
    }

    #[test]
    fn checker_keeps_alternating_across_x_origin() {
        let checker = Checker::from_solid_colors(white(), black(), 0.5);
        let right = Point::new(1.0, -4.0, -11.0);
        let left = Point::new(-1.0, -4.0, -11.0);
        assert_ne!(checker.value(&right), checker.value(&left));
    }

    #[test]
    fn checker_parity_matches_floor_layout() {
        // trunc(0.25 + 1000) + trunc(-5.25) = 1000 - 5, odd
        let checker = Checker::from_solid_colors(white(), black(), 0.5);
        assert_eq!(checker.value(&Point::new(0.5, -4.0, -10.5)), black());
        // trunc(0.25 + 1000) + trunc(-6.25) = 1000 - 6, even
        assert_eq!(checker.value(&Point::new(0.5, -4.0, -12.5)), white());
    }

    #[test]
    fn rings_flip_between_bands_and_sectors() {
        let rings = Rings::new(
            Box::new(SolidColor::new(white())),
            Box::new(SolidColor::new(black())),
            Point::new(0.0, 0.0, -20.0),
            1.0,
            4,
        );
        let inner = Point::new(0.5, -4.0, -19.9);
        let next_band = Point::new(1.5, -4.0, -19.9);
        let next_sector = Point::new(-0.5, -4.0, -19.9);
        assert_ne!(rings.value(&inner), rings.value(&next_band));
        assert_ne!(rings.value(&inner), rings.value(&next_sector));
        assert_eq!(rings.value(&next_band), rings.value(&next_sector));
    }

    #[test]
    fn generator_rejects_degenerate_rings() {
        let config = RingsConfig {
            even: SerdeVector([1.0, 1.0, 1.0]),
            odd: SerdeVector([0.0, 0.0, 0.0]),
            center: SerdeVector([0.0, 0.0, 0.0]),
            band_width: 0.0,
            sectors: 8,
        };
        assert!(Generator::from_config(TextureConfig::Rings(config)).is_err());
    }

    #[test]
    fn texture_config_from_yaml() {
        let yaml = "type: Checker\neven: [1, 1, 1]\nodd: [0, 0, 0]\n";
        let config: TextureConfig = serde_yaml::from_str(yaml).unwrap();
        let texture = Generator::from_config(config).unwrap();
        assert_eq!(texture.value(&Point::new(0.5, -4.0, -10.5)), black());
    }
}
