//! Concurrency tests for MissionControl
//!
//! Robot polls, operator commands and telemetry race on a multi-threaded
//! runtime; one-shot values must still be delivered exactly once.

use std::sync::Arc;

use mission_relay::{ControlCommand, MissionControl, MissionTrigger};

const POLLERS: usize = 64;

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_control_polls_observe_command_once() {
    let control = Arc::new(MissionControl::new());
    control.set_control_command(ControlCommand::Abort);

    let handles: Vec<_> = (0..POLLERS)
        .map(|_| {
            let control = Arc::clone(&control);
            tokio::spawn(async move { control.poll_control_command() })
        })
        .collect();

    let mut observed = 0;
    for handle in handles {
        if let Some(command) = handle.await.unwrap() {
            assert_eq!(command, ControlCommand::Abort);
            observed += 1;
        }
    }
    assert_eq!(observed, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_start_polls_observe_trigger_once() {
    let control = Arc::new(MissionControl::new());
    control.start_mission();

    let handles: Vec<_> = (0..POLLERS)
        .map(|_| {
            let control = Arc::clone(&control);
            tokio::spawn(async move { control.poll_mission_start() })
        })
        .collect();

    let mut starts = 0;
    for handle in handles {
        if handle.await.unwrap() == MissionTrigger::Start {
            starts += 1;
        }
    }
    assert_eq!(starts, 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_image_registration_single_mission() {
    let control = Arc::new(MissionControl::new());

    let handles: Vec<_> = (0..POLLERS)
        .map(|_| {
            let control = Arc::clone(&control);
            tokio::spawn(async move { control.register_image() })
        })
        .collect();

    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.unwrap());
    }
    ids.dedup();
    assert_eq!(ids.len(), 1);

    let missions = control.list_missions();
    assert_eq!(missions.len(), 1);
    assert_eq!(missions[0].images_count, POLLERS as u64);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 8)]
async fn test_concurrent_waypoint_reports_all_recorded() {
    let control = Arc::new(MissionControl::new());
    let id = control.start_mission();
    control.ingest_status_report(br#"{"status": "mission_started"}"#);

    let handles: Vec<_> = (0..POLLERS)
        .map(|index| {
            let control = Arc::clone(&control);
            tokio::spawn(async move {
                let body = format!(r#"{{"status": "waypoint_reached", "index": {index}}}"#);
                control.ingest_status_report(body.as_bytes());
            })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap();
    }

    let summary = control.summarize(&id).unwrap();
    let expected: Vec<i64> = (0..POLLERS as i64).collect();
    assert_eq!(summary.waypoints_reached, expected);
}
