mod common;
use crate::common::init_tracing;

use std::time::Duration;

use raptor_dev::engine::{CoordinatorEvent, CoordinatorState, CoreCommand, CoreCoordinator, CoreStep};
use raptor_dev::exec::{BuildFailure, BuildOutcome};
use raptor_dev::types::{ChangeKind, FileChange};

fn build_ok() -> CoordinatorEvent {
    CoordinatorEvent::BuildFinished(BuildOutcome::succeeded(Duration::from_millis(120)))
}

fn build_failed() -> CoordinatorEvent {
    CoordinatorEvent::BuildFinished(BuildOutcome::failed(
        Duration::from_millis(80),
        BuildFailure::ExitStatus(Some(1)),
    ))
}

fn changed(path: &str, kind: ChangeKind) -> CoordinatorEvent {
    CoordinatorEvent::FileChanged(FileChange::new(path, kind))
}

/// Drive a core through startup until it is idle.
fn idle_core() -> CoreCoordinator {
    let mut core = CoreCoordinator::new();
    core.step(CoordinatorEvent::Startup);
    core.step(build_ok());
    core.step(CoordinatorEvent::ProcessStarted);
    core.step(CoordinatorEvent::WatcherArmed);
    assert_eq!(core.state(), CoordinatorState::Idle);
    core
}

#[test]
fn startup_builds_then_stops_starts_and_arms() {
    init_tracing();
    let mut core = CoreCoordinator::new();

    let step = core.step(CoordinatorEvent::Startup);
    assert_eq!(step, CoreStep::run(vec![CoreCommand::RunBuild]));
    assert_eq!(core.state(), CoordinatorState::Cycling);

    let step = core.step(build_ok());
    assert_eq!(
        step.commands,
        vec![CoreCommand::StopProcess, CoreCommand::StartProcess]
    );
    assert!(step.keep_running);

    let step = core.step(CoordinatorEvent::ProcessStarted);
    assert_eq!(step.commands, vec![CoreCommand::ArmWatcher]);

    let step = core.step(CoordinatorEvent::WatcherArmed);
    assert!(step.commands.is_empty());
    assert_eq!(core.state(), CoordinatorState::Idle);
    assert_eq!(core.cycles(), 1);
}

#[test]
fn duplicate_startup_is_ignored() {
    init_tracing();
    let mut core = CoreCoordinator::new();
    core.step(CoordinatorEvent::Startup);

    let step = core.step(CoordinatorEvent::Startup);
    assert_eq!(step, CoreStep::none());
    assert_eq!(core.cycles(), 1);
}

#[test]
fn qualifying_change_disarms_before_building() {
    init_tracing();
    let mut core = idle_core();

    for kind in [ChangeKind::Write, ChangeKind::Create] {
        let step = core.step(changed("app/controllers/home.go", kind));
        assert_eq!(
            step.commands,
            vec![CoreCommand::DisarmWatcher, CoreCommand::RunBuild]
        );
        assert_eq!(core.state(), CoordinatorState::Cycling);

        core.step(build_ok());
        core.step(CoordinatorEvent::ProcessStarted);
        core.step(CoordinatorEvent::WatcherArmed);
    }

    assert_eq!(core.cycles(), 3);
}

#[test]
fn non_qualifying_changes_are_dropped() {
    init_tracing();
    let mut core = idle_core();

    for kind in [
        ChangeKind::Remove,
        ChangeKind::Rename,
        ChangeKind::Chmod,
        ChangeKind::Other,
    ] {
        let step = core.step(changed("main.go", kind));
        assert_eq!(step, CoreStep::none(), "{kind} should not rebuild");
        assert_eq!(core.state(), CoordinatorState::Idle);
    }
    assert_eq!(core.cycles(), 1);
}

#[test]
fn changes_during_a_cycle_are_dropped() {
    init_tracing();
    let mut core = idle_core();
    core.step(changed("main.go", ChangeKind::Write));

    let step = core.step(changed("main.go", ChangeKind::Write));
    assert_eq!(step, CoreStep::none());
    assert_eq!(core.cycles(), 2);
}

#[test]
fn failed_build_stops_old_app_and_rearms_without_starting() {
    init_tracing();
    let mut core = idle_core();
    core.step(changed("main.go", ChangeKind::Write));

    let step = core.step(build_failed());
    assert_eq!(
        step.commands,
        vec![CoreCommand::StopProcess, CoreCommand::ArmWatcher]
    );
    assert!(!step.commands.contains(&CoreCommand::StartProcess));

    core.step(CoordinatorEvent::WatcherArmed);
    assert_eq!(core.state(), CoordinatorState::Idle);

    // Fixing the code rebuilds normally.
    let step = core.step(changed("main.go", ChangeKind::Write));
    assert_eq!(
        step.commands,
        vec![CoreCommand::DisarmWatcher, CoreCommand::RunBuild]
    );
}

#[test]
fn failed_initial_build_still_arms() {
    init_tracing();
    let mut core = CoreCoordinator::new();
    core.step(CoordinatorEvent::Startup);

    let step = core.step(build_failed());
    assert_eq!(
        step.commands,
        vec![CoreCommand::StopProcess, CoreCommand::ArmWatcher]
    );
    core.step(CoordinatorEvent::WatcherArmed);
    assert_eq!(core.state(), CoordinatorState::Idle);
}

#[test]
fn stray_build_result_is_ignored_when_idle() {
    init_tracing();
    let mut core = idle_core();

    assert_eq!(core.step(build_ok()), CoreStep::none());
    assert_eq!(core.state(), CoordinatorState::Idle);
}

#[test]
fn watch_error_does_not_change_state() {
    init_tracing();
    let mut core = idle_core();

    let step = core.step(CoordinatorEvent::WatchError("queue overflow".into()));
    assert_eq!(step, CoreStep::none());
    assert_eq!(core.state(), CoordinatorState::Idle);
}

#[test]
fn start_failure_is_fatal() {
    init_tracing();
    let mut core = CoreCoordinator::new();
    core.step(CoordinatorEvent::Startup);
    core.step(build_ok());

    let step = core.step(CoordinatorEvent::ProcessStartFailed("no such file".into()));
    assert_eq!(step.commands, vec![CoreCommand::Exit { success: false }]);
    assert!(!step.keep_running);
    assert_eq!(core.state(), CoordinatorState::Terminal);
}

#[test]
fn arm_failure_stops_app_and_exits() {
    init_tracing();
    let mut core = CoreCoordinator::new();
    core.step(CoordinatorEvent::Startup);
    core.step(build_ok());
    core.step(CoordinatorEvent::ProcessStarted);

    let step = core.step(CoordinatorEvent::WatcherArmFailed("too many open files".into()));
    assert_eq!(
        step.commands,
        vec![CoreCommand::StopProcess, CoreCommand::Exit { success: false }]
    );
    assert!(!step.keep_running);
    assert_eq!(core.state(), CoordinatorState::Terminal);
}

#[test]
fn shutdown_disarms_and_stops() {
    init_tracing();
    let mut core = idle_core();

    let step = core.step(CoordinatorEvent::ShutdownRequested);
    assert_eq!(
        step,
        CoreStep::exit(
            vec![CoreCommand::DisarmWatcher, CoreCommand::StopProcess],
            true
        )
    );
    assert_eq!(core.state(), CoordinatorState::Stopped);
}

#[test]
fn state_names_are_lowercase() {
    assert_eq!(CoordinatorState::Idle.to_string(), "idle");
    assert_eq!(CoordinatorState::Cycling.to_string(), "cycling");
    assert_eq!(CoordinatorState::Terminal.to_string(), "terminal");
    assert_eq!(CoordinatorState::Stopped.to_string(), "stopped");
}
