//! Density profiles and phase functions of the scattering media.

use std::f64::consts::PI;

use crate::{AtmosphereConstants, OzoneProfile};

impl AtmosphereConstants {
    /// Relative density of air molecules at `height` meters above the surface.
    pub fn density_rayleigh(&self, height: f64) -> f64 {
        (-height / self.rayleigh_scale_height).exp()
    }

    /// Relative density of aerosols at `height` meters above the surface.
    pub fn density_mie(&self, height: f64) -> f64 {
        (-height / self.mie_scale_height).exp()
    }

    /// Ozone concentration at `height` meters above the surface.
    pub fn density_ozone(&self, height: f64) -> f64 {
        self.ozone.density(height)
    }
}

impl OzoneProfile {
    /// Concentration at `height_m` meters, never negative.
    ///
    /// The linear band crosses zero just above `lower_km` with the default
    /// coefficients, so the result is clamped at zero there.
    pub fn density(&self, height_m: f64) -> f64 {
        let h = height_m / 1000.0;
        let p = if h < self.lower_km {
            self.floor
        } else if h < self.upper_km {
            self.slope * h + self.intercept
        } else {
            self.peak * (-self.decay * h).exp()
        };
        p.max(0.0) * self.scale
    }
}

/// Rayleigh phase function for the cosine `mu` of the scattering angle.
pub fn phase_rayleigh(mu: f64) -> f64 {
    3.0 / (16.0 * PI) * (1.0 + mu * mu)
}

/// Cornette–Shanks form of the Henyey–Greenstein phase function with asymmetry `g`.
pub fn phase_mie(mu: f64, g: f64) -> f64 {
    let g2 = g * g;
    let num = 3.0 * (1.0 - g2) * (1.0 + mu * mu);
    let denom = 8.0 * PI * (2.0 + g2) * (1.0 + g2 - 2.0 * g * mu).powf(1.5);
    num / denom
}
