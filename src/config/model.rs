// src/config/model.rs

use std::time::Duration;

use serde::Deserialize;

/// Configuration as read from a TOML file, before validation.
///
/// ```toml
/// [tool]
/// program = "go"
/// extensions = ["go"]
///
/// [watch]
/// interval_secs = 1
///
/// [pipeline]
/// test = true
/// run = false
///
/// [output]
/// quiet = false
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConfigFile {
    #[serde(default)]
    pub tool: ToolSection,

    #[serde(default)]
    pub watch: WatchSection,

    #[serde(default)]
    pub pipeline: PipelineSection,

    #[serde(default)]
    pub output: OutputSection,
}

/// Validated configuration.
///
/// Only constructed through `TryFrom<RawConfigFile>`, so every value here
/// has passed [`validate`](super::validate).
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub tool: ToolSection,
    pub watch: WatchSection,
    pub pipeline: PipelineSection,
    pub output: OutputSection,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(raw: RawConfigFile) -> Self {
        Self {
            tool: raw.tool,
            watch: raw.watch,
            pipeline: raw.pipeline,
            output: raw.output,
        }
    }

    /// Sleep between two poll cycles.
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.watch.interval_secs)
    }
}

/// `[tool]` section: what to run and which files count as sources.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolSection {
    /// Executable invoked as `<program> <verb> <target>`.
    #[serde(default = "default_program")]
    pub program: String,

    /// File suffixes watched in directory mode, case-insensitive, with or
    /// without the leading dot.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

fn default_program() -> String {
    "go".to_string()
}

fn default_extensions() -> Vec<String> {
    vec!["go".to_string()]
}

impl Default for ToolSection {
    fn default() -> Self {
        Self {
            program: default_program(),
            extensions: default_extensions(),
        }
    }
}

/// `[watch]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct WatchSection {
    /// Polling interval in seconds; must be at least 1.
    #[serde(default = "default_interval_secs")]
    pub interval_secs: u64,
}

fn default_interval_secs() -> u64 {
    1
}

impl Default for WatchSection {
    fn default() -> Self {
        Self {
            interval_secs: default_interval_secs(),
        }
    }
}

/// `[pipeline]` section: which stages follow a successful build.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PipelineSection {
    /// Invoke `<program> test <target>` after a clean build.
    #[serde(default)]
    pub test: bool,

    /// Invoke `<program> run <target>` after a clean build.
    #[serde(default)]
    pub run: bool,

    /// Also treat a non-zero exit code as a failed stage.
    ///
    /// Off by default: only output on stderr marks a stage as failed.
    #[serde(default)]
    pub strict_exit_status: bool,
}

/// `[output]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputSection {
    /// Reduce narration to a bare change marker.
    #[serde(default)]
    pub quiet: bool,

    /// Longest change list printed in full; longer lists are shortened.
    #[serde(default = "default_max_listed_changes")]
    pub max_listed_changes: usize,
}

fn default_max_listed_changes() -> usize {
    3
}

impl Default for OutputSection {
    fn default() -> Self {
        Self {
            quiet: false,
            max_listed_changes: default_max_listed_changes(),
        }
    }
}
