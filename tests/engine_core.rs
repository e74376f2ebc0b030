// tests/engine_core.rs

use buildwatch::engine::{CoreCommand, CoreRuntime, CycleEvent, PipelineOptions, Stage};
use buildwatch::types::Verb;

fn core(test: bool, run: bool) -> CoreRuntime {
    CoreRuntime::new(PipelineOptions { test, run })
}

fn finished(verb: Verb, failed: bool) -> CycleEvent {
    CycleEvent::ToolFinished { verb, failed }
}

#[test]
fn no_changes_goes_back_to_idle() {
    let mut core = core(true, true);

    assert_eq!(core.step(CycleEvent::Tick), CoreCommand::Poll);
    assert_eq!(core.stage(), Stage::Detecting);

    assert_eq!(
        core.step(CycleEvent::Polled { changed: false }),
        CoreCommand::Sleep
    );
    assert_eq!(core.stage(), Stage::Idle);
}

#[test]
fn changes_start_a_build() {
    let mut core = core(false, false);
    core.step(CycleEvent::Tick);

    assert_eq!(
        core.step(CycleEvent::Polled { changed: true }),
        CoreCommand::Invoke(Verb::Build)
    );
    assert_eq!(core.stage(), Stage::Building);

    assert_eq!(core.step(finished(Verb::Build, false)), CoreCommand::Sleep);
    assert_eq!(core.stage(), Stage::Idle);
}

#[test]
fn failed_build_skips_test_and_run() {
    let mut core = core(true, true);
    core.step(CycleEvent::Tick);
    core.step(CycleEvent::Polled { changed: true });

    assert_eq!(core.step(finished(Verb::Build, true)), CoreCommand::Sleep);
    assert_eq!(core.stage(), Stage::Idle);
}

#[test]
fn clean_build_runs_test_then_run() {
    let mut core = core(true, true);
    core.step(CycleEvent::Tick);
    core.step(CycleEvent::Polled { changed: true });

    assert_eq!(
        core.step(finished(Verb::Build, false)),
        CoreCommand::Invoke(Verb::Test)
    );
    assert_eq!(core.stage(), Stage::Testing);

    assert_eq!(
        core.step(finished(Verb::Test, false)),
        CoreCommand::Invoke(Verb::Run)
    );
    assert_eq!(core.stage(), Stage::Running);

    assert_eq!(core.step(finished(Verb::Run, false)), CoreCommand::Sleep);
    assert_eq!(core.stage(), Stage::Idle);
}

#[test]
fn failing_tests_do_not_prevent_run() {
    let mut core = core(true, true);
    core.step(CycleEvent::Tick);
    core.step(CycleEvent::Polled { changed: true });
    core.step(finished(Verb::Build, false));

    assert_eq!(
        core.step(finished(Verb::Test, true)),
        CoreCommand::Invoke(Verb::Run)
    );
}

#[test]
fn run_only_pipeline_skips_testing() {
    let mut core = core(false, true);
    core.step(CycleEvent::Tick);
    core.step(CycleEvent::Polled { changed: true });

    assert_eq!(
        core.step(finished(Verb::Build, false)),
        CoreCommand::Invoke(Verb::Run)
    );
}

#[test]
fn test_only_pipeline_ends_after_testing() {
    let mut core = core(true, false);
    core.step(CycleEvent::Tick);
    core.step(CycleEvent::Polled { changed: true });
    core.step(finished(Verb::Build, false));

    assert_eq!(core.step(finished(Verb::Test, false)), CoreCommand::Sleep);
    assert_eq!(core.stage(), Stage::Idle);
}

#[test]
fn out_of_order_events_end_the_cycle() {
    let mut core = core(true, true);

    // A tool result while idle.
    assert_eq!(core.step(finished(Verb::Build, false)), CoreCommand::Sleep);
    assert_eq!(core.stage(), Stage::Idle);

    // A result for the wrong stage.
    core.step(CycleEvent::Tick);
    core.step(CycleEvent::Polled { changed: true });
    assert_eq!(core.step(finished(Verb::Run, false)), CoreCommand::Sleep);
    assert_eq!(core.stage(), Stage::Idle);
}

#[test]
fn tick_always_restarts_detection() {
    let mut core = core(false, false);
    core.step(CycleEvent::Tick);

    assert_eq!(core.step(CycleEvent::Tick), CoreCommand::Poll);
    assert_eq!(core.stage(), Stage::Detecting);
}
