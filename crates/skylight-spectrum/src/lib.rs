//! Spectral sampling, per-wavelength arrays, and lookup tables for Skylight.

mod error;
mod sampling;
mod spectrum;
mod table;

pub use error::TableError;
pub use sampling::{
    WAVELENGTH_COUNT, WAVELENGTH_MIN_NM, WAVELENGTH_STEP_M, WAVELENGTH_STEP_NM, wavelength_m,
    wavelength_nm,
};
pub use spectrum::Spectrum;
pub use table::LookupTable;
