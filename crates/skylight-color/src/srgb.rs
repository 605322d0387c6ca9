//! XYZ to sRGB, linear or gamma-encoded.

use glam::{DMat3, DVec3};

use crate::Xyz;

/// Linear-light threshold below which the sRGB curve is a straight line.
pub const SRGB_LINEAR_THRESHOLD: f64 = 0.003_130_8;

/// XYZ → linear sRGB for the D65 white point (IEC 61966-2-1).
pub const XYZ_TO_LINEAR_SRGB: DMat3 = DMat3::from_cols(
    DVec3::new(3.240_454_2, -0.969_266_0, 0.055_643_4),
    DVec3::new(-1.537_138_5, 1.876_010_8, -0.204_025_9),
    DVec3::new(-0.498_531_4, 0.041_556_0, 1.057_225_2),
);

/// How to encode the output channels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transfer {
    /// Linear sRGB primaries, no exposure, for HDR export.
    Linear,
    /// Exposure-scaled, gamma-encoded sRGB for display.
    Srgb,
}

/// An RGB triple. Values are not clamped.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    pub fn to_array(self) -> [f64; 3] {
        [self.r, self.g, self.b]
    }

    fn map(self, f: impl Fn(f64) -> f64) -> Self {
        Self::new(f(self.r), f(self.g), f(self.b))
    }
}

/// Convert XYZ to sRGB.
///
/// With [`Transfer::Linear`] the matrix result is returned as-is and
/// `exposure` is ignored. With [`Transfer::Srgb`] the linear values are
/// multiplied by `exposure` and then gamma-encoded per channel. Out-of-range
/// values pass through unclamped.
pub fn xyz_to_srgb(xyz: Xyz, transfer: Transfer, exposure: f64) -> Rgb {
    let linear = XYZ_TO_LINEAR_SRGB * DVec3::new(xyz.x, xyz.y, xyz.z);
    let linear = Rgb::new(linear.x, linear.y, linear.z);
    match transfer {
        Transfer::Linear => linear,
        Transfer::Srgb => linear.map(|v| encode_srgb(v * exposure)),
    }
}

/// The sRGB transfer function for one linear channel value.
pub fn encode_srgb(v: f64) -> f64 {
    if v > SRGB_LINEAR_THRESHOLD {
        1.055 * v.powf(1.0 / 2.4) - 0.055
    } else {
        12.92 * v
    }
}
