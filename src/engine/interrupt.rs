// src/engine/interrupt.rs

//! Ctrl-C handling for the watch loop.
//!
//! The first interrupt asks the runtime to stop at its next sleep. A second
//! one means the user does not want to wait for the tool in flight.

use std::future::Future;
use std::io;

use tokio::sync::mpsc;
use tracing::{info, warn};

/// Exit status used when a second interrupt forces the process down.
pub const FORCED_EXIT_CODE: i32 = 130;

/// How [`watch_interrupts`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterruptOutcome {
    /// A second interrupt arrived; the caller should exit immediately.
    Forced,
    /// The interrupt source failed, so nothing more will arrive.
    Unavailable,
}

/// Wait for interrupts from `next_interrupt` (normally
/// `tokio::signal::ctrl_c`).
///
/// On the first one a graceful shutdown is requested through `shutdown_tx`;
/// the listener is then re-armed and the function returns
/// [`InterruptOutcome::Forced`] on the second.
pub async fn watch_interrupts<F, Fut>(
    mut next_interrupt: F,
    shutdown_tx: mpsc::Sender<()>,
) -> InterruptOutcome
where
    F: FnMut() -> Fut,
    Fut: Future<Output = io::Result<()>>,
{
    if let Err(e) = next_interrupt().await {
        warn!(error = %e, "cannot listen for Ctrl-C");
        return InterruptOutcome::Unavailable;
    }

    info!("interrupt received; stopping after the current cycle");
    // Full or closed both mean a shutdown is already under way.
    let _ = shutdown_tx.try_send(());

    match next_interrupt().await {
        Ok(()) => {
            warn!("second interrupt received; exiting without waiting for the tool");
            InterruptOutcome::Forced
        }
        Err(e) => {
            warn!(error = %e, "lost the Ctrl-C listener");
            InterruptOutcome::Unavailable
        }
    }
}
