// src/config/mod.rs

//! Configuration loading and validation for buildwatch.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk and overlay CLI flags (`loader.rs`).
//! - Validate basic invariants like a non-zero interval (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{
    DEFAULT_CONFIG_FILE, apply_cli_overrides, load_and_validate, load_for_cli, load_from_path,
};
pub use model::{
    ConfigFile, OutputSection, PipelineSection, RawConfigFile, ToolSection, WatchSection,
};
