// src/watch/mod.rs

//! Polling change detection.
//!
//! This module is responsible for:
//! - Resolving the watch target once at startup ([`WatchTarget`]).
//! - Remembering the last observed modification time per path
//!   ([`ModTimeIndex`]).
//! - Walking the target on every poll and reporting which source files are
//!   new or newer ([`ChangeDetector`], [`ChangeReport`]).
//!
//! There is no OS event API involved; everything is driven by the engine
//! calling [`ChangeDetector::poll`] on a fixed interval.

pub mod detector;
pub mod index;
pub mod report;
pub mod target;

pub use detector::ChangeDetector;
pub use index::ModTimeIndex;
pub use report::{ChangeReport, ChangeSummary};
pub use target::WatchTarget;
