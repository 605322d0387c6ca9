//! Single-scattering ray marcher producing one spectrum per view ray.

use std::ops::{Add, AddAssign, Mul};

use glam::DVec3;
use skylight_spectrum::Spectrum;

use crate::constants::{AtmosphereConstants, PLANET_CENTER};
use crate::error::IntensityError;
use crate::geometry::sphere_intersection;
use crate::grid::WavelengthGrid;
use crate::model::{phase_mie, phase_rayleigh};

/// Tolerance on the length of direction vectors in debug builds.
const UNIT_TOLERANCE: f64 = 1e-6;

/// Quadrature resolution and optional terms for [`Atmosphere::intensity`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IntegratorSettings {
    /// Samples along the view ray.
    pub view_samples: u32,
    /// Nominal samples along each light ray.
    pub light_samples: u32,
    /// Include ozone absorption.
    pub ozone: bool,
}

impl Default for IntegratorSettings {
    fn default() -> Self {
        Self {
            view_samples: 16,
            light_samples: 8,
            ozone: false,
        }
    }
}

impl IntegratorSettings {
    /// Reject zero sample counts.
    pub fn validate(&self) -> Result<(), IntensityError> {
        if self.view_samples == 0 || self.light_samples == 0 {
            return Err(IntensityError::InvalidSampleCount {
                view: self.view_samples,
                light: self.light_samples,
            });
        }
        Ok(())
    }
}

/// Immutable scattering context: atmosphere parameters and their spectral constants.
///
/// Holds no mutable state, so one instance can be shared by reference across
/// any number of threads evaluating independent view rays.
#[derive(Clone, Debug)]
pub struct Atmosphere {
    constants: AtmosphereConstants,
    grid: WavelengthGrid,
}

/// Scalar optical depth (or summed density) of each medium along a path.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct OpticalDepth {
    rayleigh: f64,
    mie: f64,
    ozone: f64,
}

impl Add for OpticalDepth {
    type Output = OpticalDepth;

    fn add(self, rhs: OpticalDepth) -> OpticalDepth {
        OpticalDepth {
            rayleigh: self.rayleigh + rhs.rayleigh,
            mie: self.mie + rhs.mie,
            ozone: self.ozone + rhs.ozone,
        }
    }
}

impl AddAssign for OpticalDepth {
    fn add_assign(&mut self, rhs: OpticalDepth) {
        *self = *self + rhs;
    }
}

impl Mul<f64> for OpticalDepth {
    type Output = OpticalDepth;

    fn mul(self, rhs: f64) -> OpticalDepth {
        OpticalDepth {
            rayleigh: self.rayleigh * rhs,
            mie: self.mie * rhs,
            ozone: self.ozone * rhs,
        }
    }
}

impl Atmosphere {
    pub fn new(constants: AtmosphereConstants, grid: WavelengthGrid) -> Self {
        Self { constants, grid }
    }

    pub fn constants(&self) -> &AtmosphereConstants {
        &self.constants
    }

    pub fn grid(&self) -> &WavelengthGrid {
        &self.grid
    }

    /// Spectral radiance reaching `camera_pos` from direction `camera_dir`.
    ///
    /// `sun_dir` and `camera_dir` must be unit vectors. Marches
    /// `settings.view_samples` midpoints along the view ray to the top of the
    /// atmosphere; at each one, marches toward the sun to estimate the light
    /// ray's optical depth, and accumulates the attenuated in-scattered light.
    pub fn intensity(
        &self,
        sun_dir: DVec3,
        camera_pos: DVec3,
        camera_dir: DVec3,
        settings: &IntegratorSettings,
    ) -> Result<Spectrum, IntensityError> {
        settings.validate()?;
        debug_assert!(
            (sun_dir.length() - 1.0).abs() < UNIT_TOLERANCE,
            "sun direction {sun_dir} is not unit length"
        );
        debug_assert!(
            (camera_dir.length() - 1.0).abs() < UNIT_TOLERANCE,
            "camera direction {camera_dir} is not unit length"
        );
        self.check_camera(camera_pos)?;

        let c = &self.constants;
        let exit = sphere_intersection(camera_pos - PLANET_CENTER, camera_dir, c.atmosphere_radius)
            + PLANET_CENTER;
        let path_length = camera_pos.distance(exit);
        if path_length <= 0.0 {
            return Ok(Spectrum::ZERO);
        }

        let segment = path_length / f64::from(settings.view_samples);
        let mu = camera_dir.dot(sun_dir);

        let mut view_depth = OpticalDepth::default();
        let mut sum_rayleigh = Spectrum::ZERO;
        let mut sum_mie = Spectrum::ZERO;
        let mut sum_ozone = Spectrum::ZERO;

        for i in 0..settings.view_samples {
            let t = f64::from(i) * segment + segment / 2.0;
            let point = camera_pos + camera_dir * t;
            let local = self.density_at(point, settings.ozone) * segment;
            view_depth += local;

            let light_depth = self.light_optical_depth(point, sun_dir, segment, settings);
            let total = view_depth + light_depth;

            let mut tau = self.grid.rayleigh * total.rayleigh + self.grid.mie * total.mie;
            if settings.ozone {
                tau += self.grid.ozone * total.ozone;
            }
            let attenuation = tau.transmittance();

            sum_rayleigh += attenuation * local.rayleigh;
            sum_mie += attenuation * local.mie;
            if settings.ozone {
                sum_ozone += attenuation * local.ozone;
            }
        }

        let mut scattered = sum_rayleigh * self.grid.rayleigh * phase_rayleigh(mu)
            + sum_mie * self.grid.mie * phase_mie(mu, c.mie_asymmetry);
        if settings.ozone {
            scattered += sum_ozone * self.grid.ozone;
        }

        Ok(self.grid.solar_irradiance * scattered)
    }

    fn check_camera(&self, camera_pos: DVec3) -> Result<(), IntensityError> {
        let c = &self.constants;
        let altitude = (camera_pos - PLANET_CENTER).length() - c.planet_radius;
        if altitude < 0.0 {
            return Err(IntensityError::CameraBelowSurface { altitude });
        }
        if altitude > c.atmosphere_height() {
            return Err(IntensityError::CameraOutsideAtmosphere {
                altitude,
                limit: c.atmosphere_height(),
            });
        }
        Ok(())
    }

    /// Relative densities at `point`.
    fn density_at(&self, point: DVec3, ozone: bool) -> OpticalDepth {
        let c = &self.constants;
        let height = (point - PLANET_CENTER).length() - c.planet_radius;
        OpticalDepth {
            rayleigh: c.density_rayleigh(height),
            mie: c.density_mie(height),
            ozone: if ozone { c.density_ozone(height) } else { 0.0 },
        }
    }

    /// Optical depth from `origin` to the top of the atmosphere along `sun_dir`.
    fn light_optical_depth(
        &self,
        origin: DVec3,
        sun_dir: DVec3,
        view_segment: f64,
        settings: &IntegratorSettings,
    ) -> OpticalDepth {
        let exit = sphere_intersection(
            origin - PLANET_CENTER,
            sun_dir,
            self.constants.atmosphere_radius,
        ) + PLANET_CENTER;
        let path_length = origin.distance(exit);
        if path_length <= 0.0 {
            return OpticalDepth::default();
        }

        let samples = adaptive_light_samples(path_length, view_segment, settings.light_samples);
        let segment = path_length / f64::from(samples);

        let mut density = OpticalDepth::default();
        for j in 0..samples {
            let t = f64::from(j) * segment + segment / 2.0;
            density += self.density_at(origin + sun_dir * t, settings.ozone);
        }
        density * segment
    }
}

/// Number of light-ray samples for a light path of `path_length`.
///
/// When the nominal light step (`path_length / light_samples`) is longer
/// than the view step, all `light_samples` are used. Otherwise the count is
/// scaled by the ratio of the two steps, rounded up.
pub fn adaptive_light_samples(path_length: f64, view_segment: f64, light_samples: u32) -> u32 {
    let nominal = path_length / f64::from(light_samples);
    if nominal > view_segment {
        light_samples
    } else {
        ((nominal / view_segment) * f64::from(light_samples))
            .ceil()
            .max(1.0) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::direction_from_lat_lon;
    use skylight_spectrum::{LookupTable, WAVELENGTH_COUNT};

    fn earth() -> Atmosphere {
        let constants = AtmosphereConstants::default();
        let ozone = LookupTable::builtin_ozone();
        let grid = WavelengthGrid::new(&constants, &ozone.column(0));
        Atmosphere::new(constants, grid)
    }

    fn surface_camera(atmosphere: &Atmosphere, altitude: f64) -> DVec3 {
        DVec3::new(0.0, 0.0, atmosphere.constants().planet_radius + altitude)
    }

    fn relative_difference(a: &Spectrum, b: &Spectrum) -> f64 {
        (*a - *b).norm() / a.norm()
    }

    #[test]
    fn test_single_sample_matches_closed_form() {
        let atmosphere = earth();
        let c = atmosphere.constants().clone();
        let grid = atmosphere.grid();
        let altitude = 100.0;
        let camera = surface_camera(&atmosphere, altitude);
        let settings = IntegratorSettings {
            view_samples: 1,
            light_samples: 1,
            ozone: false,
        };

        let spectrum = atmosphere
            .intensity(DVec3::Z, camera, DVec3::Z, &settings)
            .unwrap();

        // Straight up with the sun overhead: the view path is the shell above
        // the camera, sampled once at its midpoint; the light path from there
        // is half as long and sampled once at its own midpoint.
        let ab = c.atmosphere_height() - altitude;
        let h1 = altitude + ab / 2.0;
        let pc = ab / 2.0;
        let h2 = altitude + 3.0 * ab / 4.0;
        let pr = (-h1 / c.rayleigh_scale_height).exp() * ab;
        let pm = (-h1 / c.mie_scale_height).exp() * ab;
        let lr = (-h2 / c.rayleigh_scale_height).exp() * pc;
        let lm = (-h2 / c.mie_scale_height).exp() * pc;

        for k in 0..WAVELENGTH_COUNT {
            let tau = grid.rayleigh[k] * (pr + lr) + grid.mie[k] * (pm + lm);
            let att = (-tau).exp();
            let expected = grid.solar_irradiance[k]
                * (att * pr * grid.rayleigh[k] * phase_rayleigh(1.0)
                    + att * pm * grid.mie[k] * phase_mie(1.0, c.mie_asymmetry));
            let got = spectrum[k];
            assert!(
                (got - expected).abs() <= expected * 1e-9,
                "wavelength {k}: {got} vs {expected}"
            );
        }
        assert!((spectrum[0] - 554.15).abs() < 0.1, "golden value {}", spectrum[0]);
    }

    #[test]
    fn test_deterministic() {
        let atmosphere = earth();
        let camera = surface_camera(&atmosphere, 100.0);
        let sun = direction_from_lat_lon(0.9, 0.2);
        let view = direction_from_lat_lon(0.4, 1.7);
        let settings = IntegratorSettings::default();

        let a = atmosphere.intensity(sun, camera, view, &settings).unwrap();
        let b = atmosphere.intensity(sun, camera, view, &settings).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_spectrum_is_finite_and_non_negative() {
        let atmosphere = earth();
        let camera = surface_camera(&atmosphere, 100.0);
        let sun = direction_from_lat_lon(1.0, 0.0);
        for lat in [0.0, 0.05, 0.5, 1.2, std::f64::consts::FRAC_PI_2] {
            let view = direction_from_lat_lon(lat, 2.0);
            let s = atmosphere
                .intensity(sun, camera, view, &IntegratorSettings::default())
                .unwrap();
            assert!(s.is_finite());
            assert!(s.iter().all(|&v| v >= 0.0));
            assert!(s.sum() > 0.0);
        }
    }

    #[test]
    fn test_zenith_sky_is_blue() {
        let atmosphere = earth();
        let camera = surface_camera(&atmosphere, 100.0);
        let s = atmosphere
            .intensity(
                direction_from_lat_lon(1.0, 0.0),
                camera,
                DVec3::Z,
                &IntegratorSettings::default(),
            )
            .unwrap();
        // 450 nm against 650 nm.
        assert!(s[14] > s[54], "blue {} red {}", s[14], s[54]);
    }

    #[test]
    fn test_forward_scattering_brighter_toward_sun() {
        let atmosphere = earth();
        let camera = surface_camera(&atmosphere, 100.0);
        let sun = direction_from_lat_lon(0.5, 0.0);
        let settings = IntegratorSettings::default();
        let toward = atmosphere.intensity(sun, camera, sun, &settings).unwrap();
        let away = atmosphere
            .intensity(sun, camera, direction_from_lat_lon(0.5, std::f64::consts::PI), &settings)
            .unwrap();
        assert!(toward.sum() > 2.0 * away.sum());
    }

    #[test]
    fn test_camera_on_boundary_looking_out_is_dark() {
        let atmosphere = earth();
        let camera = DVec3::new(0.0, 0.0, atmosphere.constants().atmosphere_radius);
        let s = atmosphere
            .intensity(DVec3::Z, camera, DVec3::Z, &IntegratorSettings::default())
            .unwrap();
        assert_eq!(s, Spectrum::ZERO);
    }

    #[test]
    fn test_camera_outside_atmosphere_rejected() {
        let atmosphere = earth();
        let camera = DVec3::new(0.0, 0.0, atmosphere.constants().atmosphere_radius + 10.0);
        let err = atmosphere
            .intensity(DVec3::Z, camera, DVec3::Z, &IntegratorSettings::default())
            .unwrap_err();
        assert!(matches!(err, IntensityError::CameraOutsideAtmosphere { .. }));
    }

    #[test]
    fn test_camera_below_surface_rejected() {
        let atmosphere = earth();
        let camera = surface_camera(&atmosphere, -5.0);
        let err = atmosphere
            .intensity(DVec3::Z, camera, DVec3::Z, &IntegratorSettings::default())
            .unwrap_err();
        assert!(matches!(err, IntensityError::CameraBelowSurface { .. }));
    }

    #[test]
    fn test_zero_samples_rejected() {
        let atmosphere = earth();
        let camera = surface_camera(&atmosphere, 100.0);
        for (view, light) in [(0, 8), (16, 0)] {
            let settings = IntegratorSettings {
                view_samples: view,
                light_samples: light,
                ozone: false,
            };
            let err = atmosphere
                .intensity(DVec3::Z, camera, DVec3::Z, &settings)
                .unwrap_err();
            assert_eq!(err, IntensityError::InvalidSampleCount { view, light });
        }
    }

    #[test]
    fn test_ozone_term_changes_spectrum() {
        let atmosphere = earth();
        let camera = surface_camera(&atmosphere, 100.0);
        let sun = direction_from_lat_lon(0.05, 0.0);
        let view = direction_from_lat_lon(0.1, 0.0);
        let off = IntegratorSettings::default();
        let on = IntegratorSettings { ozone: true, ..off };

        let without = atmosphere.intensity(sun, camera, view, &off).unwrap();
        let with = atmosphere.intensity(sun, camera, view, &on).unwrap();
        assert!(with.is_finite());
        assert_ne!(with, without);
    }

    #[test]
    fn test_adaptive_light_samples() {
        // Long light path: nominal light step exceeds the view step.
        assert_eq!(adaptive_light_samples(80_000.0, 1_000.0, 8), 8);
        // Short light path: count shrinks with the step ratio, rounded up.
        assert_eq!(adaptive_light_samples(4_000.0, 1_000.0, 8), 4);
        assert_eq!(adaptive_light_samples(4_100.0, 1_000.0, 8), 5);
        // Equal steps take the scaled branch and keep the full count.
        assert_eq!(adaptive_light_samples(8_000.0, 1_000.0, 8), 8);
        assert_eq!(adaptive_light_samples(1e-3, 1_000.0, 8), 1);
    }

    #[test]
    fn test_refinement_shrinks_difference() {
        let atmosphere = earth();
        let camera = surface_camera(&atmosphere, 100.0);
        let sun = direction_from_lat_lon(60f64.to_radians(), 0.0);
        let view = direction_from_lat_lon(45f64.to_radians(), 0.3);

        let spectra: Vec<Spectrum> = [32, 64, 128, 256]
            .iter()
            .map(|&n| {
                let settings = IntegratorSettings {
                    view_samples: n,
                    light_samples: 8,
                    ozone: false,
                };
                atmosphere.intensity(sun, camera, view, &settings).unwrap()
            })
            .collect();

        let diffs: Vec<f64> = spectra
            .windows(2)
            .map(|w| relative_difference(&w[1], &w[0]))
            .collect();
        for pair in diffs.windows(2) {
            assert!(pair[1] < pair[0], "differences not shrinking: {diffs:?}");
        }
    }

    #[test]
    fn test_light_refinement_shrinks_difference() {
        // Low sun and a low view: long view steps put the upper samples on
        // the adaptive branch once the nominal light step gets short.
        let atmosphere = earth();
        let camera = surface_camera(&atmosphere, 100.0);
        let sun = direction_from_lat_lon(5f64.to_radians(), 0.0);
        let view = direction_from_lat_lon(10f64.to_radians(), 0.3);

        let spectra: Vec<Spectrum> = [2, 4, 8, 16, 32]
            .iter()
            .map(|&n| {
                let settings = IntegratorSettings {
                    view_samples: 16,
                    light_samples: n,
                    ozone: false,
                };
                atmosphere.intensity(sun, camera, view, &settings).unwrap()
            })
            .collect();

        let diffs: Vec<f64> = spectra
            .windows(2)
            .map(|w| relative_difference(&w[1], &w[0]))
            .collect();
        for pair in diffs.windows(2) {
            assert!(pair[1] < pair[0], "differences not shrinking: {diffs:?}");
        }
        assert!(diffs[diffs.len() - 1] < 0.01, "{diffs:?}");
    }
}
