#![allow(dead_code)]

use buildwatch::config::{ConfigFile, RawConfigFile};

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile::default(),
        }
    }

    pub fn program(mut self, program: &str) -> Self {
        self.config.tool.program = program.to_string();
        self
    }

    pub fn extensions(mut self, exts: &[&str]) -> Self {
        self.config.tool.extensions = exts.iter().map(|e| e.to_string()).collect();
        self
    }

    pub fn interval_secs(mut self, secs: u64) -> Self {
        self.config.watch.interval_secs = secs;
        self
    }

    pub fn test(mut self, val: bool) -> Self {
        self.config.pipeline.test = val;
        self
    }

    pub fn run(mut self, val: bool) -> Self {
        self.config.pipeline.run = val;
        self
    }

    pub fn strict_exit_status(mut self, val: bool) -> Self {
        self.config.pipeline.strict_exit_status = val;
        self
    }

    pub fn quiet(mut self, val: bool) -> Self {
        self.config.output.quiet = val;
        self
    }

    pub fn raw(self) -> RawConfigFile {
        self.config
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}
