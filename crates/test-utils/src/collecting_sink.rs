use std::sync::{Arc, Mutex};

use buildwatch::exec::OutputSink;
use buildwatch::types::StreamKind;

/// Sink that records every line it receives.
///
/// Clones share the same buffer, so a test can keep one handle while the
/// backend owns another.
#[derive(Debug, Clone, Default)]
pub struct CollectingSink {
    lines: Arc<Mutex<Vec<(StreamKind, String)>>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<(StreamKind, String)> {
        self.lines.lock().unwrap().clone()
    }

    /// Just the text, in arrival order.
    pub fn texts(&self) -> Vec<String> {
        self.lines().into_iter().map(|(_, l)| l).collect()
    }

    /// Text of the lines from one stream, in arrival order.
    pub fn texts_from(&self, stream: StreamKind) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter(|(s, _)| *s == stream)
            .map(|(_, l)| l)
            .collect()
    }
}

impl OutputSink for CollectingSink {
    fn write_line(&mut self, stream: StreamKind, line: &str) {
        self.lines.lock().unwrap().push((stream, line.to_string()));
    }
}
