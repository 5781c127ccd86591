//! Render a scene of spheres over an environment map
use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;

use snow_tracer::prelude::*;
use snow_tracer::presets;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Scene file (YAML); the built-in snowman is rendered when omitted
    #[arg(short, long)]
    scene: Option<PathBuf>,

    /// Equirectangular 8-bit RGB background image
    #[arg(short, long)]
    envmap: Option<PathBuf>,

    /// Background color used when no environment map is given
    #[arg(long, value_delimiter = ',', default_values_t = [0.2, 0.7, 0.8])]
    background: Vec<f64>,

    /// Output image; the format follows the extension
    #[arg(short, long, default_value = "out.jpg")]
    output: PathBuf,

    /// Override the image width
    #[arg(long)]
    width: Option<usize>,

    /// Override the image height
    #[arg(long)]
    height: Option<usize>,

    /// Override the vertical field of view, in degrees
    #[arg(long)]
    fov: Option<f64>,

    /// Worker threads; defaults to one per core
    #[arg(short, long)]
    threads: Option<usize>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    if args.background.len() != 3 {
        return Err(format!(
            "background needs three comma separated channels, got {:?}",
            args.background
        )
        .into());
    }

    if let Some(threads) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()?;
    }

    let (scene, mut camera_config) = match &args.scene {
        Some(path) => {
            let config = SceneConfig::load(path)?;
            let camera_config = config.camera.clone();
            (Scene::from_config(config)?, camera_config)
        }
        None => (presets::snowman(), presets::snowman_camera()),
    };
    if let Some(width) = args.width {
        camera_config.width = width;
    }
    if let Some(height) = args.height {
        camera_config.height = height;
    }
    if let Some(fov) = args.fov {
        camera_config.vertical_fov_deg = fov;
    }
    let camera = Camera::from_config(&camera_config)?;

    let envmap = match &args.envmap {
        Some(path) => EnvMap::load(path)?,
        None => EnvMap::solid(Color::new(
            args.background[0],
            args.background[1],
            args.background[2],
        )),
    };

    info!(
        "Rendering {}x{} with {} objects and {} lights",
        camera.width(),
        camera.height(),
        scene.objects().len(),
        scene.lights().len()
    );
    let bar = ProgressBar::new(camera.height() as u64);
    bar.set_style(ProgressStyle::with_template(
        "{elapsed_precise} [{bar:40}] {pos}/{len} rows",
    )?);
    let started = Instant::now();
    let frame = render(&camera, &scene, &envmap, &bar);
    bar.finish();
    info!("Rendered in {} ms", started.elapsed().as_millis());

    frame.save(&args.output)?;
    info!("Saved render to {}", args.output.display());
    Ok(())
}
