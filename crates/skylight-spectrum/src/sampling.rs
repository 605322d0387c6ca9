//! The fixed wavelength sampling shared by every spectral quantity.

/// Number of wavelength samples: 380–780 nm inclusive in 5 nm steps.
pub const WAVELENGTH_COUNT: usize = 81;

/// First sampled wavelength in nanometers.
pub const WAVELENGTH_MIN_NM: f64 = 380.0;

/// Spacing between samples in nanometers.
pub const WAVELENGTH_STEP_NM: f64 = 5.0;

/// Spacing between samples in meters.
pub const WAVELENGTH_STEP_M: f64 = WAVELENGTH_STEP_NM * 1e-9;

/// Wavelength of sample `index` in nanometers.
pub fn wavelength_nm(index: usize) -> f64 {
    WAVELENGTH_MIN_NM + index as f64 * WAVELENGTH_STEP_NM
}

/// Wavelength of sample `index` in meters.
pub fn wavelength_m(index: usize) -> f64 {
    wavelength_nm(index) * 1e-9
}
