//! Errors raised while loading inputs and writing the output image
//!
//! Tracing itself never fails; everything here happens before or after a render.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("can not load the environment map {path:?}: {source}")]
    EnvMap {
        path: PathBuf,
        source: image::ImageError,
    },

    #[error("environment map {path:?} must have three color channels, found {color:?}")]
    EnvMapFormat {
        path: PathBuf,
        color: image::ColorType,
    },

    #[error("environment map of {width}x{height} pixels can not hold {len} colors")]
    EnvMapShape {
        width: usize,
        height: usize,
        len: usize,
    },

    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed scene file: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid scene: {0}")]
    InvalidScene(String),

    #[error("can not write image: {0}")]
    Image(#[from] image::ImageError),
}
