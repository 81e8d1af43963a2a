//! Start preconditions and marker persistence.

mod common;

use actsrv::config::Settings;
use actsrv::error::Error;
use actsrv::interrupt::CancelToken;
use actsrv::server::{ServerSupervisor, WaitOutcome};
use std::fs;

fn supervisor_for(settings: &Settings) -> ServerSupervisor {
    ServerSupervisor::new(settings, actsrv::platform::native().expect("platform"))
}

#[test]
fn missing_entry_point_fails_before_launch() {
    let dir = common::temp_dir();
    let settings = Settings::rooted(dir.path());
    let supervisor = supervisor_for(&settings);

    let err = supervisor.start(18080, &settings.doc_root).unwrap_err();
    assert!(matches!(err, Error::MissingEntryPoint(_)));
    assert!(!settings.pid_file.is_file(), "no marker without a launch");
}

#[test]
fn unknown_runtime_is_launch_failed() {
    let dir = common::temp_dir();
    let mut settings = Settings::rooted(dir.path());
    settings.runtime = "actsrv-no-such-runtime".to_string();
    fs::write(settings.doc_root.join(&settings.entry_point), "<?php ?>").unwrap();

    let supervisor = supervisor_for(&settings);
    let err = supervisor.start(18080, &settings.doc_root.clone()).unwrap_err();
    assert!(matches!(err, Error::LaunchFailed(_)));
}

#[cfg(unix)]
#[test]
fn start_writes_marker_with_child_pid() {
    let dir = common::temp_dir();
    let mut settings = Settings::rooted(dir.path());
    // Stand-in runtime: rejects the server flags and exits immediately, but
    // spawns fine, which is all marker persistence needs.
    settings.runtime = "true".to_string();
    fs::write(settings.doc_root.join(&settings.entry_point), "<?php ?>").unwrap();

    let supervisor = supervisor_for(&settings);
    let mut handle = supervisor.start(18080, &settings.doc_root.clone()).unwrap();

    let recorded = fs::read_to_string(&settings.pid_file).unwrap();
    assert_eq!(recorded.trim(), handle.pid().to_string());

    let cancel = CancelToken::new();
    match supervisor.await_termination(&mut handle, &cancel).unwrap() {
        WaitOutcome::Exited(_) => {}
        WaitOutcome::Interrupted => panic!("token was never cancelled"),
    }
}

#[test]
fn cancel_token_round_trip() {
    let token = CancelToken::new();
    assert!(!token.is_cancelled());
    token.cancel();
    assert!(token.is_cancelled());
    assert!(token.clone().is_cancelled(), "clones share the flag");
}
