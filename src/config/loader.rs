// src/config/loader.rs

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::cli::CliArgs;
use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::Result;

/// Config file picked up from the working directory when `--config` is not
/// given. Its absence is not an error.
pub const DEFAULT_CONFIG_FILE: &str = "Buildwatch.toml";

/// Load a configuration file from a given path and return the raw `RawConfigFile`.
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;

    let config: RawConfigFile = toml::from_str(&contents)?;

    Ok(config)
}

/// Load a configuration file from path and run validation.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let raw_config = load_from_path(&path)?;
    let config = ConfigFile::try_from(raw_config)?;
    Ok(config)
}

/// Build the effective configuration for a command line.
///
/// - An explicit `--config` file must exist.
/// - Otherwise `Buildwatch.toml` is read if present, and built-in defaults
///   are used if not.
/// - CLI flags are applied on top before validation.
pub fn load_for_cli(args: &CliArgs) -> Result<ConfigFile> {
    let mut raw = match args.config.as_deref() {
        Some(path) => load_from_path(path)?,
        None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
            debug!(path = DEFAULT_CONFIG_FILE, "using default config file");
            load_from_path(DEFAULT_CONFIG_FILE)?
        }
        None => RawConfigFile::default(),
    };

    apply_cli_overrides(&mut raw, args);
    ConfigFile::try_from(raw)
}

/// Overlay command-line flags onto a raw config.
///
/// Boolean flags can only switch a feature on; a config file setting
/// `run = true` is not undone by omitting `-r`.
pub fn apply_cli_overrides(raw: &mut RawConfigFile, args: &CliArgs) {
    if let Some(ref program) = args.tool {
        raw.tool.program = program.clone();
    }
    if !args.extensions.is_empty() {
        raw.tool.extensions = args.extensions.clone();
    }
    if let Some(interval) = args.interval {
        raw.watch.interval_secs = interval;
    }

    raw.pipeline.run |= args.run;
    raw.pipeline.test |= args.test;
    raw.pipeline.strict_exit_status |= args.strict_exit_status;
    raw.output.quiet |= args.quiet;
}
