// src/lib.rs

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod types;
pub mod watch;

use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::{ConfigFile, load_for_cli};
use crate::engine::{
    CoreRuntime, FORCED_EXIT_CODE, InterruptOutcome, Narrator, PipelineOptions, Runtime,
    watch_interrupts,
};
use crate::exec::RealToolBackend;
use crate::fs::{FileSystem, RealFileSystem};
use crate::watch::{ChangeDetector, WatchTarget};

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading (file + CLI overlay)
/// - watch target resolution and the change detector
/// - the tool backend
/// - the runtime loop
/// - Ctrl-C handling
pub async fn run(args: CliArgs) -> Result<()> {
    let Some(target) = args.target.clone() else {
        println!("Error! No arguments given.\n");
        cli::print_usage();
        return Ok(());
    };

    let cfg = load_for_cli(&args)?;
    debug!(?cfg, "effective configuration");

    let fs: Arc<dyn FileSystem> = Arc::new(RealFileSystem);
    let target = WatchTarget::resolve(fs.as_ref(), target)?;
    let detector = ChangeDetector::new(fs, target, &cfg.tool.extensions);

    let backend = RealToolBackend::console(cfg.tool.program.clone());

    // Ctrl-C → stop at the next sleep; a second Ctrl-C exits right away.
    let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>(1);
    tokio::spawn(async move {
        let outcome = watch_interrupts(tokio::signal::ctrl_c, shutdown_tx).await;
        if outcome == InterruptOutcome::Forced {
            std::process::exit(FORCED_EXIT_CODE);
        }
    });

    info!(program = %cfg.tool.program, extensions = ?cfg.tool.extensions, "starting watch loop");

    let runtime = build_runtime(&cfg, detector, backend).with_shutdown(shutdown_rx);
    runtime.run().await?;
    Ok(())
}

/// Assemble a runtime from a validated config.
///
/// Split out from [`run`] so tests can plug in a fake backend and a mock
/// filesystem.
pub fn build_runtime<B: exec::ToolBackend>(
    cfg: &ConfigFile,
    detector: ChangeDetector,
    backend: B,
) -> Runtime<B> {
    let options = PipelineOptions {
        test: cfg.pipeline.test,
        run: cfg.pipeline.run,
    };
    let core = CoreRuntime::new(options);
    let narrator = Narrator::new(cfg.output.quiet, cfg.output.max_listed_changes);

    Runtime::new(core, detector, backend, narrator, cfg.interval())
        .with_strict_exit_status(cfg.pipeline.strict_exit_status)
}
