// src/engine/runtime.rs

use std::fmt;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::errors::Result;
use crate::exec::{ToolBackend, ToolInvocation};
use crate::watch::{ChangeDetector, ChangeReport};

use super::core::CoreRuntime;
use super::narration::Narrator;
use super::{CoreCommand, CycleEvent};

/// What happened during one [`Runtime::run_cycle`].
#[derive(Debug, Clone, Default)]
pub struct CycleSummary {
    pub changes: ChangeReport,
    /// Tool invocations in the order they ran.
    pub invocations: Vec<ToolInvocation>,
}

impl CycleSummary {
    pub fn verbs(&self) -> Vec<crate::types::Verb> {
        self.invocations.iter().map(|i| i.verb).collect()
    }
}

/// Drives the stage machine: polls the detector, invokes the tool through a
/// `ToolBackend`, narrates, and sleeps between cycles.
///
/// This is the IO shell around `CoreRuntime`, which decides what happens
/// next after every poll or tool invocation.
pub struct Runtime<B: ToolBackend> {
    core: CoreRuntime,
    detector: ChangeDetector,
    backend: B,
    narrator: Narrator,
    interval: Duration,
    strict_exit_status: bool,
    shutdown_rx: Option<mpsc::Receiver<()>>,
}

impl<B: ToolBackend> fmt::Debug for Runtime<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("core", &self.core)
            .field("detector", &self.detector)
            .field("interval", &self.interval)
            .finish_non_exhaustive()
    }
}

impl<B: ToolBackend> Runtime<B> {
    pub fn new(
        core: CoreRuntime,
        detector: ChangeDetector,
        backend: B,
        narrator: Narrator,
        interval: Duration,
    ) -> Self {
        Self {
            core,
            detector,
            backend,
            narrator,
            interval,
            strict_exit_status: false,
            shutdown_rx: None,
        }
    }

    /// Also fail a stage on a non-zero exit code.
    pub fn with_strict_exit_status(mut self, strict: bool) -> Self {
        self.strict_exit_status = strict;
        self
    }

    /// Stop the loop when a message arrives on `rx`.
    ///
    /// The channel is only checked while sleeping between cycles; a tool
    /// that is already running is waited for.
    pub fn with_shutdown(mut self, rx: mpsc::Receiver<()>) -> Self {
        self.shutdown_rx = Some(rx);
        self
    }

    /// Main loop.
    ///
    /// Runs cycles until a poll or spawn fails (returned as an error) or a
    /// shutdown request arrives (returns `Ok`).
    pub async fn run(mut self) -> Result<()> {
        info!(
            target = %self.detector.target(),
            interval = ?self.interval,
            "buildwatch runtime started"
        );
        self.narrator.watching(self.detector.target());

        loop {
            self.run_cycle().await?;

            if self.sleep_or_shutdown().await {
                info!("shutdown requested; exiting");
                return Ok(());
            }
        }
    }

    /// Run one detect / build / test / run pass without sleeping.
    pub async fn run_cycle(&mut self) -> Result<CycleSummary> {
        let mut summary = CycleSummary::default();
        let mut command = self.core.step(CycleEvent::Tick);

        loop {
            command = match command {
                CoreCommand::Poll => {
                    let report = self.detector.poll()?;
                    let changed = report.changed();
                    if changed {
                        self.narrator.changes_detected(&report);
                    }
                    summary.changes = report;
                    self.core.step(CycleEvent::Polled { changed })
                }
                CoreCommand::Invoke(verb) => {
                    self.narrator.stage_starting(verb);
                    let invocation = self
                        .backend
                        .invoke(verb, self.detector.target().path())
                        .await?;
                    let failed = invocation.failed(self.strict_exit_status);
                    self.narrator.stage_finished(verb, failed);
                    summary.invocations.push(invocation);
                    self.core.step(CycleEvent::ToolFinished { verb, failed })
                }
                CoreCommand::Sleep => {
                    debug!(
                        changes = summary.changes.len(),
                        invocations = summary.invocations.len(),
                        "cycle finished"
                    );
                    return Ok(summary);
                }
            };
        }
    }

    /// Sleep for one interval. Returns `true` if shutdown was requested.
    async fn sleep_or_shutdown(&mut self) -> bool {
        let interval = self.interval;
        match self.shutdown_rx.as_mut() {
            Some(rx) => tokio::select! {
                Some(()) = rx.recv() => true,
                _ = tokio::time::sleep(interval) => false,
            },
            None => {
                tokio::time::sleep(interval).await;
                false
            }
        }
    }
}
