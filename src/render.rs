//! Frame rendering
//!
//! Rows are traced in parallel; every pixel owns its slot in the frame buffer, so the scene and
//! environment map are only ever read.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use image::{codecs::jpeg::JpegEncoder, ColorType, RgbImage};
use indicatif::ProgressBar;
use log::debug;
use rayon::prelude::*;

use crate::{
    cameras::Camera, environment::EnvMap, error::Result, scene::Scene, tracer::cast_ray,
    utils::tone_map, Color,
};

const JPEG_QUALITY: u8 = 100;

/// Unclamped colors of a finished frame, row-major with the top row first
#[derive(Debug, Clone, PartialEq)]
pub struct Framebuffer {
    width: usize,
    height: usize,
    pixels: Vec<Color>,
}
impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::zeros(); width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, i: usize, j: usize) -> Color {
        self.pixels[i + j * self.width]
    }

    /// Tone map every pixel independently into an 8-bit image
    pub fn to_image(&self) -> RgbImage {
        let mut image = RgbImage::new(self.width as u32, self.height as u32);
        for (pixel, color) in image.pixels_mut().zip(&self.pixels) {
            *pixel = tone_map(color);
        }
        image
    }

    /// Write the tone mapped frame; JPEG goes out at full quality, other formats follow the
    /// extension
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let image = self.to_image();
        let is_jpeg = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map_or(false, |ext| {
                ext.eq_ignore_ascii_case("jpg") || ext.eq_ignore_ascii_case("jpeg")
            });
        if is_jpeg {
            let mut writer = BufWriter::new(File::create(path)?);
            JpegEncoder::new_with_quality(&mut writer, JPEG_QUALITY).encode(
                image.as_raw(),
                image.width(),
                image.height(),
                ColorType::Rgb8,
            )?;
            writer.flush()?;
        } else {
            image.save(path)?;
        }
        debug!("Wrote {}x{} image to {}", self.width, self.height, path.display());
        Ok(())
    }
}

/// Trace one primary ray per pixel
///
/// `bar` advances once per finished row; pass [`ProgressBar::hidden`] to render silently.
/// A camera without pixels yields an empty frame.
pub fn render(
    camera: &Camera,
    scene: &Scene,
    envmap: &EnvMap,
    bar: &ProgressBar,
) -> Framebuffer {
    let mut frame = Framebuffer::new(camera.width(), camera.height());
    if frame.pixels.is_empty() {
        return frame;
    }
    frame
        .pixels
        .par_chunks_mut(camera.width())
        .enumerate()
        .for_each(|(j, row)| {
            for (i, color) in row.iter_mut().enumerate() {
                *color = cast_ray(&camera.get_ray(i, j), scene, envmap, 0);
            }
            bar.inc(1);
        });
    frame
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{lights::Light, materials::Material, objects::Sphere, Albedo, Point};
    use image::Rgb;

    #[test]
    fn empty_scene_is_background() {
        let camera = Camera::new(Point::zeros(), 60.0, 8, 6);
        let scene = Scene::new(Vec::new(), Vec::new());
        let sky = Color::new(0.2, 0.7, 0.8);
        let frame = render(&camera, &scene, &EnvMap::solid(sky), &ProgressBar::hidden());
        assert_eq!(frame.width(), 8);
        assert_eq!(frame.height(), 6);
        for j in 0..6 {
            for i in 0..8 {
                assert_eq!(frame.get(i, j), sky);
            }
        }
    }

    #[test]
    fn rows_match_single_ray_tracing() {
        let camera = Camera::new(Point::zeros(), 60.0, 16, 12);
        let ivory = Material::solid(
            1.5,
            Albedo::new(0.6, 0.3, 0.1, 0.2),
            Color::new(0.4, 0.4, 0.3),
            50.0,
        );
        let scene = Scene::new(
            vec![Sphere::new(Point::new(0.5, 0.3, -4.0), 1.0, ivory).into()],
            vec![Light::new(Point::new(-20.0, 20.0, 20.0), 1.5)],
        );
        let envmap = EnvMap::solid(Color::new(0.2, 0.7, 0.8));
        let frame = render(&camera, &scene, &envmap, &ProgressBar::hidden());
        for j in 0..12 {
            for i in 0..16 {
                let expected = cast_ray(&camera.get_ray(i, j), &scene, &envmap, 0);
                assert_eq!(frame.get(i, j), expected);
            }
        }
    }

    #[test]
    fn to_image_tone_maps_each_pixel() {
        let mut frame = Framebuffer::new(2, 1);
        frame.pixels[0] = Color::new(2.0, 0.5, 0.5);
        frame.pixels[1] = Color::new(0.0, 1.0, -3.0);
        let image = frame.to_image();
        assert_eq!(*image.get_pixel(0, 0), Rgb([255, 63, 63]));
        assert_eq!(*image.get_pixel(1, 0), Rgb([0, 255, 0]));
    }

    #[test]
    fn camera_without_pixels_renders_empty_frame() {
        let scene = Scene::new(Vec::new(), Vec::new());
        let envmap = EnvMap::solid(Color::repeat(1.0));
        for (width, height) in [(0, 4), (4, 0), (0, 0)] {
            let camera = Camera::new(Point::zeros(), 60.0, width, height);
            let frame = render(&camera, &scene, &envmap, &ProgressBar::hidden());
            assert_eq!((frame.width(), frame.height()), (width, height));
            let image = frame.to_image();
            assert_eq!(image.dimensions(), (width as u32, height as u32));
        }
    }

    #[test]
    fn jpeg_output_keeps_flat_colors() {
        let mut frame = Framebuffer::new(16, 8);
        frame.pixels.fill(Color::new(0.2, 0.7, 0.8));
        let path = std::env::temp_dir().join(format!("snow-tracer-{}-flat.jpg", std::process::id()));
        frame.save(&path).unwrap();
        let saved = image::open(&path).unwrap().into_rgb8();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(saved.dimensions(), (16, 8));
        let Rgb(expected) = tone_map(&Color::new(0.2, 0.7, 0.8));
        for pixel in saved.pixels() {
            for c in 0..3 {
                assert!((pixel[c] as i32 - expected[c] as i32).abs() <= 3, "{:?}", pixel);
            }
        }
    }

    #[test]
    fn png_output_is_lossless() {
        let mut frame = Framebuffer::new(3, 2);
        frame.pixels[4] = Color::new(0.5, 2.0, 0.0);
        let path = std::env::temp_dir().join(format!("snow-tracer-{}-exact.png", std::process::id()));
        frame.save(&path).unwrap();
        let saved = image::open(&path).unwrap().into_rgb8();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(saved, frame.to_image());
    }

    #[test]
    fn save_to_missing_directory_is_an_io_error() {
        let frame = Framebuffer::new(2, 2);
        let err = frame.save("no/such/dir/out.jpg").unwrap_err();
        assert!(matches!(err, crate::Error::Io(_)));
    }
}
