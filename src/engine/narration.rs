// src/engine/narration.rs

//! Console narration of the watch loop.
//!
//! Narration goes to stdout, interleaved with the tool's own output; logs go
//! to stderr through `tracing`.

use crate::types::Verb;
use crate::watch::{ChangeReport, WatchTarget};

#[derive(Debug, Clone, Copy)]
pub struct Narrator {
    quiet: bool,
    max_listed: usize,
}

impl Narrator {
    pub fn new(quiet: bool, max_listed: usize) -> Self {
        Self { quiet, max_listed }
    }

    pub fn watching(&self, target: &WatchTarget) {
        println!("Watching: {target}");
    }

    pub fn changes_detected(&self, report: &ChangeReport) {
        if self.quiet {
            println!("  --->>");
        } else {
            println!(
                "  --->> File change detected:  {}",
                report.summary(self.max_listed)
            );
        }
    }

    pub fn stage_starting(&self, verb: Verb) {
        if self.quiet {
            return;
        }
        match verb {
            Verb::Build => println!("     >> starting build"),
            other => println!("     >> {other} starting"),
        }
    }

    pub fn stage_finished(&self, verb: Verb, failed: bool) {
        if self.quiet {
            return;
        }
        match verb {
            Verb::Build if failed => println!("     >> build finished with errors"),
            Verb::Build => println!("     >> build ok"),
            other => println!("     >> {other} finished"),
        }
    }
}
