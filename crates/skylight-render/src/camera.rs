//! Equirectangular panorama camera.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use glam::DVec3;
use skylight_atmosphere::direction_from_lat_lon;

/// Maps pixel coordinates to view directions.
///
/// Columns sweep longitude through a full turn. Rows sweep latitude from the
/// zenith down to the horizon when `half` is set, or down to the nadir
/// otherwise.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Panorama {
    pub width: u32,
    pub height: u32,
    pub half: bool,
}

impl Panorama {
    pub fn new(width: u32, height: u32, half: bool) -> Self {
        Self {
            width,
            height,
            half,
        }
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Latitude and longitude in radians at the center of pixel `(x, y)`.
    pub fn lat_lon(&self, x: u32, y: u32) -> (f64, f64) {
        let span = if self.half { FRAC_PI_2 } else { PI };
        let lon = TAU * (x as f64 + 0.5) / self.width as f64;
        let lat = FRAC_PI_2 - span * (y as f64 + 0.5) / self.height as f64;
        (lat, lon)
    }

    /// View direction through pixel `(x, y)`, or `None` below the horizon.
    pub fn direction(&self, x: u32, y: u32) -> Option<DVec3> {
        let (lat, lon) = self.lat_lon(x, y);
        (lat >= 0.0).then(|| direction_from_lat_lon(lat, lon))
    }
}
