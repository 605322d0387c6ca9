//! `skylight` command-line renderer.

use std::error::Error;
use std::time::Instant;

use clap::Parser;
use skylight_config::{CONFIG_FILE_NAME, CliArgs, Config, ConfigOrigin};
use skylight_render::{RenderError, render_config};
use tracing::info;

fn main() {
    let args = CliArgs::parse();
    if let Err(e) = run(&args) {
        eprintln!("skylight: {e}");
        let mut source = e.source();
        while let Some(cause) = source {
            eprintln!("  caused by: {cause}");
            source = cause.source();
        }
        std::process::exit(1);
    }
}

fn run(args: &CliArgs) -> Result<(), RenderError> {
    let config_dir = match &args.config {
        Some(dir) => dir.clone(),
        None => Config::default_dir()?,
    };
    let (mut config, origin) = Config::open(&config_dir)?;
    config.apply_cli_overrides(args);

    skylight_log::init_logging(
        Some(&config_dir.join("logs")),
        cfg!(debug_assertions),
        Some(&config),
    );
    info!(config_dir = %config_dir.display(), "Skylight starting");
    let config_path = config_dir.join(CONFIG_FILE_NAME);
    match origin {
        ConfigOrigin::Loaded => info!(path = %config_path.display(), "loaded config"),
        ConfigOrigin::Created => info!(path = %config_path.display(), "wrote default config"),
    }

    let start = Instant::now();
    let image = render_config(&config)?;
    info!(elapsed_ms = start.elapsed().as_millis() as u64, "render finished");

    if config.output.save {
        image.save(&config.output.path(), config.output.linear)?;
    } else {
        let stats = image.stats();
        info!(min = ?stats.min, max = ?stats.max, mean = ?stats.mean, "image not saved");
    }
    Ok(())
}
