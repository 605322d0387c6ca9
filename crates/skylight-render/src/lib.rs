//! Panorama rendering for Skylight.
//!
//! Builds a [`SkyContext`] from a validated config, shades an equirectangular
//! [`Panorama`] tile by tile on a rayon pool, and writes the result as PNG
//! or OpenEXR.

pub mod camera;
pub mod context;
pub mod error;
pub mod output;
pub mod tiles;

pub use camera::Panorama;
pub use context::SkyContext;
pub use error::RenderError;
pub use output::{ImageStats, SkyImage};
pub use tiles::{Tile, render, render_tile, render_with_threads, tile_grid};

use skylight_config::Config;
use tracing::info;

/// Render the panorama described by `config`.
pub fn render_config(config: &Config) -> Result<SkyImage, RenderError> {
    config.validate()?;
    let ctx = SkyContext::from_config(config)?;
    let panorama = Panorama::new(
        config.image.width,
        config.image.resolved_height(),
        config.image.half,
    );
    info!(
        width = panorama.width,
        height = panorama.height,
        half = panorama.half,
        view_samples = ctx.settings.view_samples,
        light_samples = ctx.settings.light_samples,
        ozone = ctx.settings.ozone,
        "rendering sky"
    );
    render_with_threads(
        &ctx,
        &panorama,
        config.image.tiles_per_side,
        config.image.threads,
    )
}
