//! Immutable render context assembled from a [`Config`].

use glam::DVec3;
use skylight_atmosphere::{
    Atmosphere, IntegratorSettings, IntensityError, PLANET_CENTER, WavelengthGrid,
    direction_from_lat_lon,
};
use skylight_color::{ColorMatching, Rgb, Transfer, xyz_to_srgb};
use skylight_config::Config;
use skylight_spectrum::LookupTable;

use crate::error::RenderError;

/// Everything needed to shade a view direction, shared read-only by all workers.
#[derive(Clone, Debug)]
pub struct SkyContext {
    pub atmosphere: Atmosphere,
    pub cmf: ColorMatching,
    pub settings: IntegratorSettings,
    pub camera_pos: DVec3,
    pub sun_dir: DVec3,
    pub transfer: Transfer,
    pub exposure: f64,
}

impl SkyContext {
    /// Load the lookup tables and derive spectral constants for `config`.
    ///
    /// The config should already have passed [`Config::validate`].
    pub fn from_config(config: &Config) -> Result<Self, RenderError> {
        let cmf = match &config.tables.cmf {
            Some(path) => ColorMatching::load(path)?,
            None => ColorMatching::cie_1931(),
        };
        let ozone = match &config.tables.ozone {
            Some(path) => LookupTable::load(path, 1)?,
            None => LookupTable::builtin_ozone(),
        };

        let constants = config.atmosphere.clone();
        let grid = WavelengthGrid::new(&constants, &ozone.column(0));
        let camera_pos = PLANET_CENTER
            + DVec3::Z * (constants.planet_radius + config.scene.camera_altitude_m);
        let sun_dir = direction_from_lat_lon(
            config.scene.sun_latitude_deg.to_radians(),
            config.scene.sun_longitude_deg.to_radians(),
        );

        Ok(Self {
            atmosphere: Atmosphere::new(constants, grid),
            cmf,
            settings: IntegratorSettings {
                view_samples: config.sampling.view_samples,
                light_samples: config.sampling.light_samples,
                ozone: config.sampling.ozone,
            },
            camera_pos,
            sun_dir,
            transfer: if config.output.linear {
                Transfer::Linear
            } else {
                Transfer::Srgb
            },
            exposure: config.output.exposure,
        })
    }

    /// Color seen along unit direction `view_dir`.
    pub fn shade(&self, view_dir: DVec3) -> Result<Rgb, IntensityError> {
        let spectrum =
            self.atmosphere
                .intensity(self.sun_dir, self.camera_pos, view_dir, &self.settings)?;
        let xyz = self.cmf.spectrum_to_xyz(&spectrum);
        Ok(xyz_to_srgb(xyz, self.transfer, self.exposure))
    }
}
