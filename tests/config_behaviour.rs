mod common;
use crate::common::builders::ConfigFileBuilder;
use crate::common::init_tracing;

use std::error::Error;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use buildwatch::cli::CliArgs;
use buildwatch::config::{
    apply_cli_overrides, load_and_validate, load_for_cli, load_from_path, ConfigFile,
    RawConfigFile,
};
use buildwatch::errors::BuildwatchError;

type TestResult = Result<(), Box<dyn Error>>;

fn expect_config_error(raw: RawConfigFile, needle: &str) {
    match ConfigFile::try_from(raw) {
        Err(BuildwatchError::ConfigError(msg)) => {
            assert!(msg.contains(needle), "unexpected message: {msg}");
        }
        other => panic!("Expected ConfigError, got: {:?}", other),
    }
}

#[test]
fn demo_config_drives_pipeline() -> TestResult {
    init_tracing();

    let manifest = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let cfg = load_and_validate(manifest.join("demos/buildwatch.toml"))?;

    assert_eq!(cfg.tool.program, "go");
    assert_eq!(cfg.tool.extensions, vec!["go", ".mod"]);
    assert_eq!(cfg.interval(), Duration::from_secs(2));
    assert!(cfg.pipeline.test);
    assert!(cfg.pipeline.run);
    assert!(!cfg.pipeline.strict_exit_status);
    assert_eq!(cfg.output.max_listed_changes, 5);

    Ok(())
}

#[test]
fn empty_file_yields_defaults() -> TestResult {
    init_tracing();

    let dir = tempfile::tempdir()?;
    let path = dir.path().join("Buildwatch.toml");
    std::fs::write(&path, "")?;

    let cfg = load_and_validate(&path)?;

    assert_eq!(cfg.tool.program, "go");
    assert_eq!(cfg.tool.extensions, vec!["go"]);
    assert_eq!(cfg.interval(), Duration::from_secs(1));
    assert!(!cfg.pipeline.test);
    assert!(!cfg.pipeline.run);
    assert!(!cfg.output.quiet);
    assert_eq!(cfg.output.max_listed_changes, 3);

    Ok(())
}

#[test]
fn malformed_toml_is_a_toml_error() -> TestResult {
    init_tracing();

    let dir = tempfile::tempdir()?;
    let path = dir.path().join("broken.toml");
    std::fs::write(&path, "[watch]\ninterval_secs = \"soon\"\n")?;

    assert!(matches!(
        load_from_path(&path),
        Err(BuildwatchError::TomlError(_))
    ));

    Ok(())
}

#[test]
fn zero_interval_is_rejected() {
    init_tracing();
    expect_config_error(
        ConfigFileBuilder::new().interval_secs(0).raw(),
        "interval_secs must be >= 1",
    );
}

#[test]
fn empty_program_is_rejected() {
    init_tracing();
    expect_config_error(ConfigFileBuilder::new().program("  ").raw(), "program");
}

#[test]
fn missing_or_blank_extensions_are_rejected() {
    init_tracing();
    expect_config_error(
        ConfigFileBuilder::new().extensions(&[]).raw(),
        "at least one extension",
    );
    expect_config_error(
        ConfigFileBuilder::new().extensions(&["go", "."]).raw(),
        "empty extension",
    );
}

#[test]
fn change_list_limit_below_two_is_rejected() {
    init_tracing();
    let mut raw = ConfigFileBuilder::new().raw();
    raw.output.max_listed_changes = 1;
    expect_config_error(raw, "max_listed_changes");
}

#[test]
fn cli_flags_override_file_values() -> TestResult {
    init_tracing();

    let mut raw = ConfigFileBuilder::new()
        .program("go")
        .interval_secs(5)
        .test(true)
        .raw();
    let args = CliArgs::try_parse_from([
        "buildwatch",
        "--tool",
        "cargo",
        "--ext",
        "rs",
        "--ext",
        "toml",
        "-i",
        "3",
        "-r",
        "-s",
        "src",
    ])?;

    apply_cli_overrides(&mut raw, &args);
    let cfg = ConfigFile::try_from(raw)?;

    assert_eq!(cfg.tool.program, "cargo");
    assert_eq!(cfg.tool.extensions, vec!["rs", "toml"]);
    assert_eq!(cfg.watch.interval_secs, 3);
    // Flags only switch features on.
    assert!(cfg.pipeline.test);
    assert!(cfg.pipeline.run);
    assert!(cfg.output.quiet);

    Ok(())
}

#[test]
fn absent_flags_keep_file_values() -> TestResult {
    init_tracing();

    let mut raw = ConfigFileBuilder::new()
        .extensions(&["c", "h"])
        .run(true)
        .strict_exit_status(true)
        .raw();
    let args = CliArgs::try_parse_from(["buildwatch", "main.c"])?;

    apply_cli_overrides(&mut raw, &args);

    assert_eq!(raw.tool.extensions, vec!["c", "h"]);
    assert!(raw.pipeline.run);
    assert!(raw.pipeline.strict_exit_status);

    Ok(())
}

#[test]
fn cli_zero_interval_fails_validation() -> TestResult {
    init_tracing();

    let args = CliArgs::try_parse_from(["buildwatch", "-i", "0", "hello.go"])?;
    let mut raw = RawConfigFile::default();
    apply_cli_overrides(&mut raw, &args);

    expect_config_error(raw, "interval_secs");

    Ok(())
}

#[test]
fn explicit_config_path_must_exist() -> TestResult {
    init_tracing();

    let dir = tempfile::tempdir()?;
    let missing = dir.path().join("nope.toml");
    let args = CliArgs {
        target: Some("hello.go".to_string()),
        config: Some(missing.to_string_lossy().into_owned()),
        ..CliArgs::default()
    };

    assert!(matches!(
        load_for_cli(&args),
        Err(BuildwatchError::IoError(_))
    ));

    Ok(())
}

#[test]
fn explicit_config_is_combined_with_flags() -> TestResult {
    init_tracing();

    let dir = tempfile::tempdir()?;
    let path = dir.path().join("custom.toml");
    std::fs::write(&path, "[tool]\nprogram = \"zig\"\nextensions = [\"zig\"]\n")?;

    let args = CliArgs::try_parse_from([
        "buildwatch",
        "--config",
        path.to_str().ok_or("non-utf8 temp path")?,
        "-t",
        "src/main.zig",
    ])?;
    let cfg = load_for_cli(&args)?;

    assert_eq!(cfg.tool.program, "zig");
    assert!(cfg.pipeline.test);
    assert!(!cfg.pipeline.run);

    Ok(())
}

#[test]
fn silent_is_an_alias_for_quiet() -> TestResult {
    let args = CliArgs::try_parse_from(["buildwatch", "--silent", "x.go"])?;
    assert!(args.quiet);
    assert_eq!(args.target.as_deref(), Some("x.go"));

    let args = CliArgs::try_parse_from(["buildwatch"])?;
    assert!(args.target.is_none());

    Ok(())
}
