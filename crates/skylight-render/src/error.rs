//! Render pipeline error types.

use skylight_atmosphere::IntensityError;
use skylight_config::ConfigError;
use skylight_spectrum::TableError;

/// Anything that can stop a render from producing an image on disk.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to load lookup table")]
    Table(#[from] TableError),

    #[error("failed to evaluate sky")]
    Intensity(#[from] IntensityError),

    #[error("failed to build worker pool")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("failed to encode PNG")]
    Png(#[from] image::ImageError),

    #[error("failed to encode EXR")]
    Exr(#[from] exr::error::Error),

    #[error("failed to create output directory")]
    Io(#[from] std::io::Error),

    /// Pixel buffer does not match the image dimensions.
    #[error("pixel buffer holds {found} values, expected {expected}")]
    BufferSize { expected: usize, found: usize },
}
