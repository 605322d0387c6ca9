//! Integrator error types.

/// Invalid input to [`Atmosphere::intensity`](crate::Atmosphere::intensity).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum IntensityError {
    /// View or light sample count is zero.
    #[error("sample counts must be at least 1 (view: {view}, light: {light})")]
    InvalidSampleCount { view: u32, light: u32 },

    /// The camera is above the top of the atmosphere.
    #[error("camera altitude {altitude} m is above the atmosphere top at {limit} m")]
    CameraOutsideAtmosphere { altitude: f64, limit: f64 },

    /// The camera is below the planet surface.
    #[error("camera altitude {altitude} m is below the planet surface")]
    CameraBelowSurface { altitude: f64 },
}
