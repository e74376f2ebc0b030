// src/engine/core.rs

//! Pure core stage machine.
//!
//! This module contains a synchronous, deterministic "core" that consumes
//! [`CycleEvent`]s and answers with the next [`CoreCommand`]. The async
//! shell (`engine::runtime::Runtime`) is responsible for polling, spawning
//! the tool and sleeping.
//!
//! The core is intended to be unit tested without any Tokio, filesystem, or
//! processes.

use tracing::{debug, warn};

use crate::engine::{CoreCommand, CycleEvent, PipelineOptions, Stage};
use crate::types::Verb;

#[derive(Debug)]
pub struct CoreRuntime {
    stage: Stage,
    options: PipelineOptions,
}

impl CoreRuntime {
    pub fn new(options: PipelineOptions) -> Self {
        Self {
            stage: Stage::Idle,
            options,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Handle a single event, updating the stage and returning the command
    /// for the IO shell.
    pub fn step(&mut self, event: CycleEvent) -> CoreCommand {
        let from = self.stage;
        let command = match event {
            CycleEvent::Tick => {
                if from != Stage::Idle {
                    warn!(?from, "new cycle started before the previous one finished");
                }
                self.stage = Stage::Detecting;
                CoreCommand::Poll
            }
            CycleEvent::Polled { changed } => self.handle_polled(changed),
            CycleEvent::ToolFinished { verb, failed } => self.handle_tool_finished(verb, failed),
        };
        debug!(?event, ?from, to = ?self.stage, ?command, "core step");
        command
    }

    fn handle_polled(&mut self, changed: bool) -> CoreCommand {
        if self.stage != Stage::Detecting {
            return self.unexpected("poll result");
        }
        if changed {
            self.invoke(Verb::Build)
        } else {
            self.idle()
        }
    }

    fn handle_tool_finished(&mut self, verb: Verb, failed: bool) -> CoreCommand {
        if self.stage != Stage::for_verb(verb) {
            return self.unexpected("tool result");
        }

        match verb {
            // Only the build gates the later stages; a failing test run does
            // not stop `run`.
            Verb::Build if failed => self.idle(),
            Verb::Build if self.options.test => self.invoke(Verb::Test),
            Verb::Build | Verb::Test if self.options.run => self.invoke(Verb::Run),
            _ => self.idle(),
        }
    }

    fn invoke(&mut self, verb: Verb) -> CoreCommand {
        self.stage = Stage::for_verb(verb);
        CoreCommand::Invoke(verb)
    }

    fn idle(&mut self) -> CoreCommand {
        self.stage = Stage::Idle;
        CoreCommand::Sleep
    }

    fn unexpected(&mut self, what: &str) -> CoreCommand {
        warn!(stage = ?self.stage, what, "unexpected event for current stage; ending cycle");
        self.idle()
    }
}
