// src/exec/backend.rs

//! Pluggable tool backend abstraction.
//!
//! The engine talks to a `ToolBackend` instead of a `ToolRunner` directly.
//! This makes it easy to swap in a fake backend in tests while keeping the
//! production process handling in [`tool_runner`](super::tool_runner).

use std::future::Future;
use std::path::Path;
use std::pin::Pin;

use crate::errors::Result;
use crate::exec::sink::{ConsoleSink, OutputSink};
use crate::exec::tool_runner::{ToolInvocation, ToolRunner};
use crate::types::Verb;

/// Trait abstracting how a tool invocation is carried out.
///
/// Production code uses [`RealToolBackend`]; tests can provide their own
/// implementation that returns scripted results.
pub trait ToolBackend: Send {
    /// Run the tool with `verb` against `target` and wait for it to finish.
    fn invoke<'a>(
        &'a mut self,
        verb: Verb,
        target: &'a Path,
    ) -> Pin<Box<dyn Future<Output = Result<ToolInvocation>> + Send + 'a>>;
}

/// Real backend: spawns the tool and streams its output into a sink.
pub struct RealToolBackend {
    runner: ToolRunner,
    sink: Box<dyn OutputSink>,
}

impl std::fmt::Debug for RealToolBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RealToolBackend")
            .field("runner", &self.runner)
            .finish_non_exhaustive()
    }
}

impl RealToolBackend {
    pub fn new(runner: ToolRunner, sink: Box<dyn OutputSink>) -> Self {
        Self { runner, sink }
    }

    /// Backend printing tool output straight to the console.
    pub fn console(program: impl Into<String>) -> Self {
        Self::new(ToolRunner::new(program), Box::new(ConsoleSink))
    }
}

impl ToolBackend for RealToolBackend {
    fn invoke<'a>(
        &'a mut self,
        verb: Verb,
        target: &'a Path,
    ) -> Pin<Box<dyn Future<Output = Result<ToolInvocation>> + Send + 'a>> {
        Box::pin(async move { self.runner.run(verb, target, self.sink.as_mut()).await })
    }
}
