//! Atmosphere scattering: Rayleigh + Mie (+ optional ozone) single-scattering model.
//!
//! Provides [`AtmosphereConstants`] for configuration, [`WavelengthGrid`] for
//! the derived spectral constants, and [`Atmosphere::intensity`], the ray
//! marcher that turns a view ray into a radiance [`Spectrum`].
//!
//! [`Spectrum`]: skylight_spectrum::Spectrum

mod constants;
mod error;
mod geometry;
mod grid;
mod integrator;
mod model;

pub use constants::{
    AtmosphereConstants, BOLTZMANN, OzoneProfile, PLANCK, PLANET_CENTER, SPEED_OF_LIGHT,
};
pub use error::IntensityError;
pub use geometry::{direction_from_lat_lon, sphere_intersection};
pub use grid::{WavelengthGrid, WavelengthSample};
pub use integrator::{Atmosphere, IntegratorSettings, adaptive_light_samples};
pub use model::{phase_mie, phase_rayleigh};
