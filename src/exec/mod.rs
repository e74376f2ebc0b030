// src/exec/mod.rs

//! Process execution layer.
//!
//! This module is responsible for running the external tool as
//! `<program> <verb> <target>` using `tokio::process::Command`, streaming its
//! output to the user and reporting whether anything appeared on stderr.
//!
//! - [`tool_runner`] spawns the child, fans its two pipes out to reader tasks
//!   and merges them back into one line stream.
//! - [`sink`] defines where merged lines end up (the console in production).
//! - [`backend`] provides the `ToolBackend` trait the engine talks to, and a
//!   concrete `RealToolBackend`; tests replace it with a fake that never
//!   spawns processes.

pub mod backend;
pub mod sink;
pub mod tool_runner;

pub use backend::{RealToolBackend, ToolBackend};
pub use sink::{ConsoleSink, OutputSink};
pub use tool_runner::{merge_lines, spawn_line_reader, MergeStats, ToolInvocation, ToolRunner};
