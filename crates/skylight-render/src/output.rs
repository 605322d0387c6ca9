//! Rendered image buffer and file encoders.

use std::path::Path;

use tracing::info;

use crate::error::RenderError;
use crate::tiles::Tile;

/// Row-major RGB float image.
#[derive(Clone, Debug, PartialEq)]
pub struct SkyImage {
    width: u32,
    height: u32,
    pixels: Vec<[f32; 3]>,
}

/// Per-channel summary used when the image is not written to disk.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ImageStats {
    pub min: [f32; 3],
    pub max: [f32; 3],
    pub mean: [f32; 3],
}

impl SkyImage {
    /// Black image.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0.0; 3]; width as usize * height as usize],
        }
    }

    pub fn from_pixels(width: u32, height: u32, pixels: Vec<[f32; 3]>) -> Result<Self, RenderError> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(RenderError::BufferSize {
                expected,
                found: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[[f32; 3]] {
        &self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> [f32; 3] {
        self.pixels[self.index(x, y)]
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Copy a tile's row-major pixels into place.
    pub fn blit(&mut self, tile: &Tile, pixels: &[[f32; 3]]) {
        debug_assert_eq!(pixels.len(), tile.pixel_count());
        for (row, chunk) in pixels.chunks_exact(tile.width as usize).enumerate() {
            let start = self.index(tile.x, tile.y + row as u32);
            self.pixels[start..start + chunk.len()].copy_from_slice(chunk);
        }
    }

    pub fn stats(&self) -> ImageStats {
        let mut min = [f32::INFINITY; 3];
        let mut max = [f32::NEG_INFINITY; 3];
        let mut sum = [0.0f64; 3];
        for p in &self.pixels {
            for c in 0..3 {
                min[c] = min[c].min(p[c]);
                max[c] = max[c].max(p[c]);
                sum[c] += p[c] as f64;
            }
        }
        let n = self.pixels.len().max(1) as f64;
        ImageStats {
            min,
            max,
            mean: sum.map(|s| (s / n) as f32),
        }
    }

    /// 8-bit RGB bytes, each channel clamped to `[0, 1]`.
    pub fn to_rgb8(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flatten()
            .map(|&v| (v.clamp(0.0, 1.0) * 255.0).round() as u8)
            .collect()
    }

    /// Write a gamma-encoded image as 8-bit PNG.
    pub fn save_png(&self, path: &Path) -> Result<(), RenderError> {
        let bytes = self.to_rgb8();
        let found = bytes.len();
        let buffer = image::RgbImage::from_raw(self.width, self.height, bytes).ok_or(
            RenderError::BufferSize {
                expected: self.pixels.len() * 3,
                found,
            },
        )?;
        buffer.save_with_format(path, image::ImageFormat::Png)?;
        info!(path = %path.display(), "wrote PNG");
        Ok(())
    }

    /// Write linear values unclamped as 32-bit float OpenEXR.
    pub fn save_exr(&self, path: &Path) -> Result<(), RenderError> {
        let width = self.width as usize;
        exr::prelude::write_rgb_file(path, width, self.height as usize, |x, y| {
            let [r, g, b] = self.pixels[y * width + x];
            (r, g, b)
        })?;
        info!(path = %path.display(), "wrote EXR");
        Ok(())
    }

    /// Write to `path`, creating its directory. EXR when `linear`, PNG otherwise.
    pub fn save(&self, path: &Path, linear: bool) -> Result<(), RenderError> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        if linear {
            self.save_exr(path)
        } else {
            self.save_png(path)
        }
    }
}
