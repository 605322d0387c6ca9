//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use skylight_atmosphere::AtmosphereConstants;

use crate::error::ConfigError;

/// Top-level render configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Camera and sun placement.
    pub scene: SceneConfig,
    /// Ray-marching resolution.
    pub sampling: SamplingConfig,
    /// Panorama size and parallelism.
    pub image: ImageConfig,
    /// Output encoding and destination.
    pub output: OutputConfig,
    /// Planet, atmosphere and sun parameters.
    pub atmosphere: AtmosphereConstants,
    /// Lookup table overrides.
    pub tables: TableConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Camera and sun placement.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SceneConfig {
    /// Camera altitude above the surface in meters.
    pub camera_altitude_m: f64,
    /// Sun elevation in degrees.
    pub sun_latitude_deg: f64,
    /// Sun azimuth in degrees.
    pub sun_longitude_deg: f64,
}

/// Ray-marching resolution.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SamplingConfig {
    /// Samples along each view ray.
    pub view_samples: u32,
    /// Samples along each light ray toward the sun.
    pub light_samples: u32,
    /// Include ozone absorption.
    pub ozone: bool,
}

/// Panorama size and parallelism.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ImageConfig {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels (defaults to half the width).
    pub height: Option<u32>,
    /// Render only the upper hemisphere over the full image height.
    pub half: bool,
    /// Worker threads (0 = one per logical core).
    pub threads: usize,
    /// The image is split into `tiles_per_side²` tiles.
    pub tiles_per_side: u32,
}

/// Output encoding and destination.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Write linear sRGB to OpenEXR instead of gamma-encoded PNG.
    pub linear: bool,
    /// Write the image to disk.
    pub save: bool,
    /// Exposure multiplier before gamma encoding.
    pub exposure: f64,
    /// File name without extension.
    pub name: String,
    /// Output directory.
    pub directory: PathBuf,
}

/// Lookup table overrides. `None` uses the bundled tables.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TableConfig {
    /// CIE color-matching function table (wavelength, x̄, ȳ, z̄).
    pub cmf: Option<PathBuf>,
    /// Ozone cross-section table (wavelength, cm²/molecule).
    pub ozone: Option<PathBuf>,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            camera_altitude_m: 100.0,
            sun_latitude_deg: 60.0,
            sun_longitude_deg: 0.0,
        }
    }
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            view_samples: 16,
            light_samples: 8,
            ozone: false,
        }
    }
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            width: 64,
            height: None,
            half: true,
            threads: 0,
            tiles_per_side: 3,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            linear: false,
            save: true,
            exposure: 2.0,
            name: "sky".to_string(),
            directory: PathBuf::from("."),
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

impl ImageConfig {
    /// Configured height, or half the width (at least one pixel).
    pub fn resolved_height(&self) -> u32 {
        self.height.unwrap_or((self.width / 2).max(1))
    }
}

impl OutputConfig {
    /// Full output path, with the extension chosen by the encoding.
    pub fn path(&self) -> PathBuf {
        let ext = if self.linear { "exr" } else { "png" };
        self.directory.join(format!("{}.{ext}", self.name))
    }
}

// --- Validation ---

fn invalid(setting: &'static str, reason: String) -> Result<(), ConfigError> {
    Err(ConfigError::Invalid { setting, reason })
}

impl Config {
    /// Check that every setting is usable before any rendering starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let sampling = &self.sampling;
        if sampling.view_samples == 0 || sampling.light_samples == 0 {
            return invalid(
                "sampling",
                format!(
                    "sample counts must be at least 1 (view: {}, light: {})",
                    sampling.view_samples, sampling.light_samples
                ),
            );
        }
        if self.image.width == 0 || self.image.resolved_height() == 0 {
            return invalid(
                "image",
                format!(
                    "size must be non-zero ({}x{})",
                    self.image.width,
                    self.image.resolved_height()
                ),
            );
        }
        if self.image.tiles_per_side == 0 {
            return invalid("image.tiles_per_side", "must be at least 1".to_string());
        }
        if !self.output.exposure.is_finite() || self.output.exposure < 0.0 {
            return invalid(
                "output.exposure",
                format!("must be finite and non-negative, got {}", self.output.exposure),
            );
        }
        if self.output.name.is_empty() {
            return invalid("output.name", "must not be empty".to_string());
        }

        let atmosphere = &self.atmosphere;
        if !(atmosphere.planet_radius > 0.0 && atmosphere.atmosphere_radius > atmosphere.planet_radius)
        {
            return invalid(
                "atmosphere",
                format!(
                    "atmosphere radius {} must exceed planet radius {} > 0",
                    atmosphere.atmosphere_radius, atmosphere.planet_radius
                ),
            );
        }
        if atmosphere.rayleigh_scale_height <= 0.0 || atmosphere.mie_scale_height <= 0.0 {
            return invalid("atmosphere", "scale heights must be positive".to_string());
        }
        if !(-1.0..1.0).contains(&atmosphere.mie_asymmetry) {
            return invalid(
                "atmosphere.mie_asymmetry",
                format!("must lie in (-1, 1), got {}", atmosphere.mie_asymmetry),
            );
        }

        let scene = &self.scene;
        if !scene.sun_latitude_deg.is_finite() {
            return invalid(
                "scene.sun_latitude_deg",
                format!("must be finite, got {}", scene.sun_latitude_deg),
            );
        }
        if !scene.sun_longitude_deg.is_finite() {
            return invalid(
                "scene.sun_longitude_deg",
                format!("must be finite, got {}", scene.sun_longitude_deg),
            );
        }

        let altitude = scene.camera_altitude_m;
        if !(0.0..atmosphere.atmosphere_height()).contains(&altitude) {
            return invalid(
                "scene.camera_altitude_m",
                format!(
                    "{altitude} m is outside [0, {}) m",
                    atmosphere.atmosphere_height()
                ),
            );
        }
        Ok(())
    }
}

// --- Load / Save ---

/// File name of the persisted config inside its directory.
pub const CONFIG_FILE_NAME: &str = "config.ron";

/// Whether [`Config::open`] read an existing file or wrote the defaults.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigOrigin {
    Loaded,
    Created,
}

impl Config {
    /// Platform config directory for Skylight (e.g. `~/.config/skylight`).
    pub fn default_dir() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .map(|dir| dir.join("skylight"))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Load `config.ron` from `config_dir`, writing the defaults there first if it is missing.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let (config, origin) = Self::open(config_dir)?;
        let path = config_dir.join(CONFIG_FILE_NAME);
        match origin {
            ConfigOrigin::Loaded => log::info!("Loaded config from {}", path.display()),
            ConfigOrigin::Created => log::info!("Wrote default config to {}", path.display()),
        }
        Ok(config)
    }

    /// Like [`Config::load_or_create`] but silent, reporting where the
    /// config came from so the caller can log it once logging is up.
    pub fn open(config_dir: &Path) -> Result<(Self, ConfigOrigin), ConfigError> {
        let path = config_dir.join(CONFIG_FILE_NAME);
        if path.exists() {
            Ok((Self::read(&path)?, ConfigOrigin::Loaded))
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            Ok((config, ConfigOrigin::Created))
        }
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        ron::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write `config.ron` into `config_dir`, creating the directory.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        let path = config_dir.join(CONFIG_FILE_NAME);
        let write_error = |source| ConfigError::Write {
            path: path.clone(),
            source,
        };

        std::fs::create_dir_all(config_dir).map_err(write_error)?;
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .enumerate_arrays(false);
        let serialized = ron::ser::to_string_pretty(self, pretty)?;
        std::fs::write(&path, serialized).map_err(write_error)
    }
}
