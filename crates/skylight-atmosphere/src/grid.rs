//! Per-wavelength physical constants derived from [`AtmosphereConstants`].

use std::f64::consts::PI;

use skylight_spectrum::{Spectrum, WAVELENGTH_COUNT, wavelength_m};

use crate::constants::{AtmosphereConstants, BOLTZMANN, PLANCK, SPEED_OF_LIGHT};

/// Conversion from cm² to m².
const CM2_TO_M2: f64 = 1e-4;

/// Everything the integrator needs to know about one wavelength.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WavelengthSample {
    /// Wavelength in meters.
    pub wavelength: f64,
    /// Solar source term in W·m⁻²·nm⁻¹.
    pub solar_irradiance: f64,
    /// Rayleigh scattering coefficient in m⁻¹.
    pub rayleigh: f64,
    /// Mie scattering coefficient in m⁻¹.
    pub mie: f64,
    /// Ozone absorption coefficient in m⁻¹.
    pub ozone: f64,
}

/// Spectral constants sampled on the fixed wavelength grid.
///
/// Built once per render and shared read-only by all workers.
#[derive(Clone, Debug, PartialEq)]
pub struct WavelengthGrid {
    /// Wavelengths in meters.
    pub wavelengths: Spectrum,
    /// Blackbody spectral exitance of the sun's surface, per nanometer.
    pub solar_irradiance: Spectrum,
    /// Rayleigh scattering coefficients.
    pub rayleigh: Spectrum,
    /// Mie scattering coefficients (the same at every wavelength).
    pub mie: Spectrum,
    /// Ozone absorption coefficients.
    pub ozone: Spectrum,
}

impl WavelengthGrid {
    /// Derive all spectral constants.
    ///
    /// `ozone_cross_section` is in cm²/molecule, one value per wavelength.
    pub fn new(constants: &AtmosphereConstants, ozone_cross_section: &Spectrum) -> Self {
        let wavelengths = Spectrum::from_fn(wavelength_m);
        let solar_irradiance = wavelengths.map(|l| planck_exitance(l, constants.sun_temperature));

        let n2 = constants.air_refractive_index.powi(2) - 1.0;
        let rayleigh = wavelengths.map(|l| {
            8.0 * PI.powi(3) * n2 * n2 / (3.0 * constants.molecular_density * l.powi(4))
        });

        let grid = Self {
            wavelengths,
            solar_irradiance,
            rayleigh,
            mie: Spectrum::splat(constants.mie_coefficient()),
            ozone: *ozone_cross_section * (CM2_TO_M2 * constants.molecular_density),
        };
        tracing::debug!(
            rayleigh_blue = grid.rayleigh[0],
            rayleigh_red = grid.rayleigh[WAVELENGTH_COUNT - 1],
            mie = grid.mie[0],
            ozone_max = grid.ozone.max(),
            "derived wavelength grid"
        );
        grid
    }

    /// Constants for wavelength sample `index`.
    pub fn sample(&self, index: usize) -> WavelengthSample {
        WavelengthSample {
            wavelength: self.wavelengths[index],
            solar_irradiance: self.solar_irradiance[index],
            rayleigh: self.rayleigh[index],
            mie: self.mie[index],
            ozone: self.ozone[index],
        }
    }
}

/// Blackbody spectral exitance `2πhc² / (λ⁵ (e^(hc/λkT) − 1))` in W·m⁻²·nm⁻¹.
fn planck_exitance(wavelength: f64, temperature: f64) -> f64 {
    let numerator = 2.0 * PI * PLANCK * SPEED_OF_LIGHT * SPEED_OF_LIGHT;
    let exponent = PLANCK * SPEED_OF_LIGHT / (BOLTZMANN * temperature * wavelength);
    numerator / (wavelength.powi(5) * exponent.exp_m1()) * 1e-9
}
