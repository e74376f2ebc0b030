// src/exec/tool_runner.rs

//! Runs one tool invocation and multiplexes its output.

use std::io;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::Command;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::errors::{BuildwatchError, Result};
use crate::exec::sink::OutputSink;
use crate::types::{StreamKind, Verb};

/// Result of a single `<program> <verb> <target>` run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    pub verb: Verb,
    pub target: PathBuf,
    /// Set as soon as one line arrives on stderr; never reset.
    pub had_error_output: bool,
    pub stdout_lines: usize,
    pub stderr_lines: usize,
    /// Exit code of the child, `None` if it was killed by a signal or could
    /// not be waited on. Informational unless strict exit checking is on.
    pub exit_code: Option<i32>,
}

impl ToolInvocation {
    /// Whether the stage should count as failed.
    ///
    /// By default only stderr activity matters; with `strict_exit_status`
    /// a non-zero (or unknown) exit code fails the stage as well.
    pub fn failed(&self, strict_exit_status: bool) -> bool {
        self.had_error_output || (strict_exit_status && self.exit_code != Some(0))
    }
}

/// Line counters produced by [`merge_lines`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    pub stdout_lines: usize,
    pub stderr_lines: usize,
    pub had_error_output: bool,
}

/// Spawns the external tool.
#[derive(Debug, Clone)]
pub struct ToolRunner {
    program: String,
}

impl ToolRunner {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Run `<program> <verb> <target>` to completion.
    ///
    /// Every output line is written to `sink` before this returns. Only a
    /// failure to start the child (or to obtain its pipes) is an error; a
    /// non-zero exit or a failed `wait` is logged and recorded in
    /// [`ToolInvocation::exit_code`] but otherwise ignored.
    ///
    /// There is no timeout: a tool that never exits blocks the caller.
    pub async fn run(
        &self,
        verb: Verb,
        target: &Path,
        sink: &mut dyn OutputSink,
    ) -> Result<ToolInvocation> {
        info!(program = %self.program, %verb, target = ?target, "starting tool");

        let mut cmd = Command::new(&self.program);
        cmd.arg(verb.as_str())
            .arg(target)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = cmd.spawn().map_err(|source| self.spawn_error(source))?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| self.spawn_error(missing_pipe("stdout")))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| self.spawn_error(missing_pipe("stderr")))?;

        let (out_tx, out_rx) = mpsc::unbounded_channel();
        let (err_tx, err_rx) = mpsc::unbounded_channel();
        let readers = [
            spawn_line_reader(StreamKind::Stdout, stdout, out_tx),
            spawn_line_reader(StreamKind::Stderr, stderr, err_tx),
        ];

        let stats = merge_lines(out_rx, err_rx, sink).await;

        for reader in readers {
            if let Err(e) = reader.await {
                warn!(error = %e, "output reader task failed");
            }
        }

        let exit_code = match child.wait().await {
            Ok(status) => {
                debug!(
                    %verb,
                    exit_code = ?status.code(),
                    success = status.success(),
                    "tool exited"
                );
                status.code()
            }
            Err(e) => {
                warn!(%verb, error = %e, "waiting for tool failed; ignoring");
                None
            }
        };

        info!(
            %verb,
            stdout_lines = stats.stdout_lines,
            stderr_lines = stats.stderr_lines,
            had_error_output = stats.had_error_output,
            "tool finished"
        );

        Ok(ToolInvocation {
            verb,
            target: target.to_path_buf(),
            had_error_output: stats.had_error_output,
            stdout_lines: stats.stdout_lines,
            stderr_lines: stats.stderr_lines,
            exit_code,
        })
    }

    fn spawn_error(&self, source: io::Error) -> BuildwatchError {
        BuildwatchError::Spawn {
            program: self.program.clone(),
            source,
        }
    }
}

fn missing_pipe(name: &str) -> io::Error {
    io::Error::new(io::ErrorKind::BrokenPipe, format!("{name} pipe unavailable"))
}

/// Read `reader` line by line and forward each line over `tx`.
///
/// Lines are split on `\n` (a trailing `\r` is dropped) and decoded lossily.
/// The channel is closed when the task ends: at EOF, when the receiver is
/// gone, or after a read error, which is logged rather than propagated.
/// An unterminated last line is only delivered at EOF; bytes buffered when a
/// read error hits are dropped.
pub fn spawn_line_reader<R>(
    stream: StreamKind,
    reader: R,
    tx: mpsc::UnboundedSender<String>,
) -> JoinHandle<()>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut segments = BufReader::new(reader).split(b'\n');
        loop {
            match segments.next_segment().await {
                Ok(Some(mut bytes)) => {
                    if bytes.last() == Some(&b'\r') {
                        bytes.pop();
                    }
                    let line = String::from_utf8_lossy(&bytes).into_owned();
                    if tx.send(line).is_err() {
                        debug!(%stream, "line receiver dropped; stopping reader");
                        break;
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    warn!(%stream, error = %e, "read error on tool output; stopping reader");
                    break;
                }
            }
        }
        debug!(%stream, "reader finished");
    })
}

/// Drain both channels into `sink` in arrival order.
///
/// Neither stream has priority: when both have a line ready, either may be
/// taken first. Returns only once both channels are closed and empty.
pub async fn merge_lines(
    mut stdout_rx: mpsc::UnboundedReceiver<String>,
    mut stderr_rx: mpsc::UnboundedReceiver<String>,
    sink: &mut dyn OutputSink,
) -> MergeStats {
    let mut stats = MergeStats::default();
    let mut stdout_open = true;
    let mut stderr_open = true;

    while stdout_open || stderr_open {
        tokio::select! {
            line = stdout_rx.recv(), if stdout_open => match line {
                Some(line) => {
                    stats.stdout_lines += 1;
                    sink.write_line(StreamKind::Stdout, &line);
                }
                None => stdout_open = false,
            },
            line = stderr_rx.recv(), if stderr_open => match line {
                Some(line) => {
                    stats.stderr_lines += 1;
                    stats.had_error_output = true;
                    sink.write_line(StreamKind::Stderr, &line);
                }
                None => stderr_open = false,
            },
        }
    }

    stats
}
