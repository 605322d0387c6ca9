//! Spectrum → CIE XYZ → sRGB color conversion.

mod srgb;
mod xyz;

pub use srgb::{Rgb, SRGB_LINEAR_THRESHOLD, Transfer, XYZ_TO_LINEAR_SRGB, encode_srgb, xyz_to_srgb};
pub use xyz::{ColorMatching, LUMINOUS_EFFICACY, Xyz};
