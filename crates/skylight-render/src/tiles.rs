//! Tiled parallel rendering.
//!
//! The panorama is cut into a grid of rectangular tiles that rayon workers
//! shade independently. Each pixel depends only on its own coordinates, so
//! the assembled image is identical for every tile count and thread count.

use rayon::prelude::*;
use tracing::{debug, info_span, warn};

use crate::camera::Panorama;
use crate::context::SkyContext;
use crate::error::RenderError;
use crate::output::SkyImage;

/// A rectangular block of pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tile {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Tile {
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// Split a `width × height` image into up to `per_side²` tiles.
///
/// The last row and column absorb the remainder. `per_side` is capped by
/// the image size so no tile is empty.
pub fn tile_grid(width: u32, height: u32, per_side: u32) -> Vec<Tile> {
    let columns = split_axis(width, per_side);
    let rows = split_axis(height, per_side);
    rows.iter()
        .flat_map(|&(y, h)| {
            columns.iter().map(move |&(x, w)| Tile {
                x,
                y,
                width: w,
                height: h,
            })
        })
        .collect()
}

fn split_axis(len: u32, parts: u32) -> Vec<(u32, u32)> {
    let parts = parts.clamp(1, len.max(1));
    let base = len / parts;
    (0..parts)
        .map(|i| {
            let start = i * base;
            let size = if i == parts - 1 { len - start } else { base };
            (start, size)
        })
        .collect()
}

/// Shade every pixel of `tile`, row-major.
pub fn render_tile(
    ctx: &SkyContext,
    panorama: &Panorama,
    tile: &Tile,
) -> Result<Vec<[f32; 3]>, RenderError> {
    let mut pixels = Vec::with_capacity(tile.pixel_count());
    for y in tile.y..tile.y + tile.height {
        for x in tile.x..tile.x + tile.width {
            let color = match panorama.direction(x, y) {
                Some(dir) => {
                    let rgb = ctx.shade(dir)?;
                    [rgb.r as f32, rgb.g as f32, rgb.b as f32]
                }
                None => [0.0; 3],
            };
            pixels.push(color);
        }
    }
    Ok(pixels)
}

/// Render the panorama on the current rayon pool.
pub fn render(
    ctx: &SkyContext,
    panorama: &Panorama,
    tiles_per_side: u32,
) -> Result<SkyImage, RenderError> {
    ctx.settings.validate()?;

    if tiles_per_side > panorama.width.min(panorama.height) {
        warn!(
            tiles_per_side,
            width = panorama.width,
            height = panorama.height,
            "more tiles per side than pixels, capping"
        );
    }
    let tiles = tile_grid(panorama.width, panorama.height, tiles_per_side);
    let _span = info_span!("render", tiles = tiles.len()).entered();

    let shaded = tiles
        .par_iter()
        .map(|tile| {
            let pixels = render_tile(ctx, panorama, tile)?;
            debug!(x = tile.x, y = tile.y, w = tile.width, h = tile.height, "tile done");
            Ok((*tile, pixels))
        })
        .collect::<Result<Vec<_>, RenderError>>()?;

    let mut image = SkyImage::new(panorama.width, panorama.height);
    for (tile, pixels) in &shaded {
        image.blit(tile, pixels);
    }
    Ok(image)
}

/// Render with `threads` workers, or the global pool when `threads` is 0.
pub fn render_with_threads(
    ctx: &SkyContext,
    panorama: &Panorama,
    tiles_per_side: u32,
    threads: usize,
) -> Result<SkyImage, RenderError> {
    if threads == 0 {
        return render(ctx, panorama, tiles_per_side);
    }
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .thread_name(|i| format!("skylight-worker-{i}"))
        .build()?;
    pool.install(|| render(ctx, panorama, tiles_per_side))
}
