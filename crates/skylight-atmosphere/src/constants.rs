//! Physical parameters of the planet, its atmosphere, and its sun.

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Planck constant in J·s.
pub const PLANCK: f64 = 6.626_070_15e-34;

/// Boltzmann constant in J/K.
pub const BOLTZMANN: f64 = 1.380_649e-23;

/// Speed of light in vacuum in m/s.
pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;

/// The planet sits at the origin of the simulation frame.
pub const PLANET_CENTER: DVec3 = DVec3::ZERO;

/// Physical parameters defining a planet's atmosphere and the light source.
///
/// All lengths are in meters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtmosphereConstants {
    /// Inner radius: the planet's surface.
    pub planet_radius: f64,
    /// Outer radius: top of the atmosphere.
    pub atmosphere_radius: f64,
    /// Rayleigh scale height.
    pub rayleigh_scale_height: f64,
    /// Mie scale height.
    pub mie_scale_height: f64,
    /// Mie asymmetry (preferred scattering direction, `g`).
    pub mie_asymmetry: f64,
    /// Mie scattering coefficient at sea level in m⁻¹.
    pub mie_scattering: f64,
    /// Ratio of Mie extinction to Mie scattering.
    pub mie_extinction_ratio: f64,
    /// Refractive index of air at sea level.
    pub air_refractive_index: f64,
    /// Molecular number density of air at sea level in m⁻³.
    pub molecular_density: f64,
    /// Altitude profile of ozone concentration.
    pub ozone: OzoneProfile,
    /// Effective blackbody temperature of the sun in kelvin.
    pub sun_temperature: f64,
}

impl Default for AtmosphereConstants {
    fn default() -> Self {
        Self {
            planet_radius: 6_360_000.0,
            atmosphere_radius: 6_420_000.0,
            rayleigh_scale_height: 8_000.0,
            mie_scale_height: 1_200.0,
            mie_asymmetry: 0.76,
            mie_scattering: 21e-6,
            mie_extinction_ratio: 1.11,
            air_refractive_index: 1.000_29,
            molecular_density: 2.504e25,
            ozone: OzoneProfile::default(),
            sun_temperature: 5_778.0,
        }
    }
}

impl AtmosphereConstants {
    /// Thickness of the atmosphere shell.
    pub fn atmosphere_height(&self) -> f64 {
        self.atmosphere_radius - self.planet_radius
    }

    /// Mie coefficient applied to every wavelength (scattering times extinction ratio).
    pub fn mie_coefficient(&self) -> f64 {
        self.mie_scattering * self.mie_extinction_ratio
    }
}

/// Empirical three-band fit of ozone concentration against altitude.
///
/// Below `lower_km` the concentration is `floor`; between the two edges it
/// grows linearly (`slope * h + intercept`); above `upper_km` it decays
/// exponentially (`peak * exp(-decay * h)`). Heights are in kilometers and
/// the result is multiplied by `scale`.
///
/// Negative band values are clamped to zero. The bands are not continuous:
/// with the defaults the linear band starts at about -0.37 at `lower_km` and
/// stays at zero up to about 10.78 km, so custom coefficients that dip below
/// zero are flattened the same way.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OzoneProfile {
    pub lower_km: f64,
    pub upper_km: f64,
    pub floor: f64,
    pub slope: f64,
    pub intercept: f64,
    pub peak: f64,
    pub decay: f64,
    pub scale: f64,
}

impl Default for OzoneProfile {
    fn default() -> Self {
        Self {
            lower_km: 9.52,
            upper_km: 37.33,
            floor: 0.1,
            slope: 0.295,
            intercept: -3.18,
            peak: 106.0,
            decay: 0.0729,
            scale: 1e-9,
        }
    }
}
