//! Command-line argument parsing for Skylight.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Skylight command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "skylight", about = "Physically based sky renderer")]
pub struct CliArgs {
    /// Image width in pixels.
    #[arg(long)]
    pub width: Option<u32>,

    /// Image height in pixels.
    #[arg(long)]
    pub height: Option<u32>,

    /// Camera altitude in meters.
    #[arg(long)]
    pub altitude: Option<f64>,

    /// Sun elevation in degrees.
    #[arg(long, allow_hyphen_values = true)]
    pub sun_lat: Option<f64>,

    /// Sun azimuth in degrees.
    #[arg(long, allow_hyphen_values = true)]
    pub sun_lon: Option<f64>,

    /// Samples along each view ray.
    #[arg(long)]
    pub view_samples: Option<u32>,

    /// Samples along each light ray.
    #[arg(long)]
    pub light_samples: Option<u32>,

    /// Include ozone absorption.
    #[arg(long)]
    pub ozone: Option<bool>,

    /// Write linear EXR instead of PNG.
    #[arg(long)]
    pub linear: Option<bool>,

    /// Exposure multiplier.
    #[arg(long)]
    pub exposure: Option<f64>,

    /// Output file name without extension.
    #[arg(long)]
    pub output: Option<String>,

    /// Worker threads (0 = one per logical core).
    #[arg(long)]
    pub threads: Option<usize>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(w) = args.width {
            self.image.width = w;
        }
        if let Some(h) = args.height {
            self.image.height = Some(h);
        }
        if let Some(alt) = args.altitude {
            self.scene.camera_altitude_m = alt;
        }
        if let Some(lat) = args.sun_lat {
            self.scene.sun_latitude_deg = lat;
        }
        if let Some(lon) = args.sun_lon {
            self.scene.sun_longitude_deg = lon;
        }
        if let Some(n) = args.view_samples {
            self.sampling.view_samples = n;
        }
        if let Some(n) = args.light_samples {
            self.sampling.light_samples = n;
        }
        if let Some(ozone) = args.ozone {
            self.sampling.ozone = ozone;
        }
        if let Some(linear) = args.linear {
            self.output.linear = linear;
        }
        if let Some(exposure) = args.exposure {
            self.output.exposure = exposure;
        }
        if let Some(ref name) = args.output {
            self.output.name = name.clone();
        }
        if let Some(threads) = args.threads {
            self.image.threads = threads;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
