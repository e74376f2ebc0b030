// src/exec/sink.rs

use std::io::Write;

use crate::types::StreamKind;

/// Destination for the merged output lines of a tool invocation.
pub trait OutputSink: Send {
    fn write_line(&mut self, stream: StreamKind, line: &str);
}

/// Prints every line, from either stream, to stdout as it arrives.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

impl OutputSink for ConsoleSink {
    fn write_line(&mut self, _stream: StreamKind, line: &str) {
        let mut out = std::io::stdout().lock();
        // A closed stdout must not take the watcher down.
        let _ = writeln!(out, "{line}");
    }
}
