// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{BuildwatchError, Result};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = BuildwatchError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_tool(cfg)?;
    validate_watch(cfg)?;
    validate_output(cfg)?;
    Ok(())
}

fn validate_tool(cfg: &RawConfigFile) -> Result<()> {
    if cfg.tool.program.trim().is_empty() {
        return Err(BuildwatchError::ConfigError(
            "[tool].program must not be empty".to_string(),
        ));
    }

    if cfg.tool.extensions.is_empty() {
        return Err(BuildwatchError::ConfigError(
            "[tool].extensions must contain at least one extension".to_string(),
        ));
    }

    if let Some(bad) = cfg
        .tool
        .extensions
        .iter()
        .find(|e| e.trim().trim_start_matches('.').is_empty())
    {
        return Err(BuildwatchError::ConfigError(format!(
            "[tool].extensions contains an empty extension ({bad:?})"
        )));
    }

    Ok(())
}

fn validate_watch(cfg: &RawConfigFile) -> Result<()> {
    if cfg.watch.interval_secs == 0 {
        return Err(BuildwatchError::ConfigError(
            "[watch].interval_secs must be >= 1 (got 0)".to_string(),
        ));
    }
    Ok(())
}

fn validate_output(cfg: &RawConfigFile) -> Result<()> {
    if cfg.output.max_listed_changes < 2 {
        return Err(BuildwatchError::ConfigError(format!(
            "[output].max_listed_changes must be >= 2 (got {})",
            cfg.output.max_listed_changes
        )));
    }
    Ok(())
}
