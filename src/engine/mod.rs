// src/engine/mod.rs

//! Orchestration engine for buildwatch.
//!
//! One cycle walks through these stages:
//!
//! ```text
//! Idle -> Detecting -> (no changes) -> Idle
//!                   -> (changes)    -> Building -> (failed) -> Idle
//!                                               -> (ok) -> [Testing] -> [Running] -> Idle
//! ```
//!
//! The pure stage machine lives in [`core`]; the async/IO shell that polls,
//! spawns the tool and sleeps is implemented in [`runtime`]. Console
//! narration of the stages is in [`narration`], and Ctrl-C handling in
//! [`interrupt`].

use crate::types::Verb;

/// Where the current cycle is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Idle,
    Detecting,
    Building,
    Testing,
    Running,
}

impl Stage {
    /// Stage in which `verb` runs.
    pub fn for_verb(verb: Verb) -> Self {
        match verb {
            Verb::Build => Stage::Building,
            Verb::Test => Stage::Testing,
            Verb::Run => Stage::Running,
        }
    }
}

/// Which optional stages follow a clean build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineOptions {
    pub test: bool,
    pub run: bool,
}

/// Events fed into the core by the IO shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleEvent {
    /// The interval elapsed; start a new cycle.
    Tick,
    /// The detector finished a poll.
    Polled { changed: bool },
    /// A tool invocation returned.
    ToolFinished { verb: Verb, failed: bool },
}

/// What the IO shell should do next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreCommand {
    /// Poll the change detector.
    Poll,
    /// Invoke the tool with this verb.
    Invoke(Verb),
    /// The cycle is over; sleep until the next tick.
    Sleep,
}

pub mod core;
pub mod interrupt;
pub mod narration;
pub mod runtime;

pub use core::CoreRuntime;
pub use interrupt::{FORCED_EXIT_CODE, InterruptOutcome, watch_interrupts};
pub use narration::Narrator;
pub use runtime::{CycleSummary, Runtime};
