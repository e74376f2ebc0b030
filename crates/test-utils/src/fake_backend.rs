use std::collections::HashMap;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use buildwatch::errors::Result;
use buildwatch::exec::{ToolBackend, ToolInvocation};
use buildwatch::types::Verb;

/// Scripted outcome for one verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FakeOutcome {
    pub had_error_output: bool,
    pub exit_code: Option<i32>,
}

impl FakeOutcome {
    pub const OK: FakeOutcome = FakeOutcome {
        had_error_output: false,
        exit_code: Some(0),
    };

    pub const STDERR: FakeOutcome = FakeOutcome {
        had_error_output: true,
        exit_code: Some(2),
    };

    /// Quiet on stderr but exits non-zero.
    pub const SILENT_FAILURE: FakeOutcome = FakeOutcome {
        had_error_output: false,
        exit_code: Some(1),
    };
}

/// A fake backend that:
/// - records which verbs were invoked, against which target
/// - immediately returns the scripted outcome for the verb (default: OK)
#[derive(Debug, Clone, Default)]
pub struct FakeToolBackend {
    outcomes: HashMap<Verb, FakeOutcome>,
    invoked: Arc<Mutex<Vec<(Verb, PathBuf)>>>,
}

impl FakeToolBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_outcome(mut self, verb: Verb, outcome: FakeOutcome) -> Self {
        self.outcomes.insert(verb, outcome);
        self
    }

    /// Shared handle to the invocation log.
    pub fn invoked(&self) -> Arc<Mutex<Vec<(Verb, PathBuf)>>> {
        Arc::clone(&self.invoked)
    }

    pub fn verbs(&self) -> Vec<Verb> {
        self.invoked.lock().unwrap().iter().map(|(v, _)| *v).collect()
    }
}

impl ToolBackend for FakeToolBackend {
    fn invoke<'a>(
        &'a mut self,
        verb: Verb,
        target: &'a Path,
    ) -> Pin<Box<dyn Future<Output = Result<ToolInvocation>> + Send + 'a>> {
        let outcome = self.outcomes.get(&verb).copied().unwrap_or(FakeOutcome::OK);
        self.invoked
            .lock()
            .unwrap()
            .push((verb, target.to_path_buf()));

        Box::pin(async move {
            Ok(ToolInvocation {
                verb,
                target: target.to_path_buf(),
                had_error_output: outcome.had_error_output,
                stdout_lines: 0,
                stderr_lines: usize::from(outcome.had_error_output),
                exit_code: outcome.exit_code,
            })
        })
    }
}
