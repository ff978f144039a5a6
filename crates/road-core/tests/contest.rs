//! Integration tests for the contest solver and schedule replay.
//!
//! These use the schedule fixtures to check solving, replaying and the
//! notice log end to end.

use road_core::{ContestSolver, NoticeLogger, RoadConfig, Simulation};
use road_events::{fixtures, EntityRef, RoadNotice, Schedule, ScheduleError};
use std::fs;
use std::path::Path;
use tempfile::tempdir;

fn load_sample_schedule() -> Schedule {
    Schedule::from_file(Path::new("tests/fixtures/sample_schedule.json"))
        .expect("Failed to read schedule")
}

#[test]
fn test_solve_fixture_schedules() {
    assert_eq!(ContestSolver::solve(&fixtures::basic_schedule()), vec![0, 95]);
    assert_eq!(
        ContestSolver::solve(&fixtures::multi_day_schedule()),
        vec![0, 95, 95]
    );
    assert_eq!(
        ContestSolver::solve(&fixtures::overwrite_schedule()),
        vec![0, 95, 95, 195]
    );
}

#[test]
fn test_solve_sample_file() {
    let schedule = load_sample_schedule();
    assert_eq!(schedule.len(), 6);
    assert_eq!(
        ContestSolver::solve(&schedule),
        vec![0, 56, 56, 83, 156, 159]
    );
}

#[test]
fn test_solve_result_is_flat_after_best() {
    let schedule = load_sample_schedule();
    let result = ContestSolver::solve(&schedule);
    let best = *result.iter().max().unwrap();
    let first_best = result.iter().position(|&p| p == best).unwrap();
    assert!(result[first_best..].iter().all(|&p| p == best));
    assert!(result.windows(2).all(|w| w[0] <= w[1]));
}

#[test]
fn test_bad_schedule_file() {
    let err = Schedule::from_file(Path::new("tests/fixtures/bad_schedule.json")).unwrap_err();
    assert!(matches!(err, ScheduleError::UnknownEventType { row: 2, kind: 3 }));
}

#[test]
fn test_simulate_matches_final_estimate() {
    let schedule = load_sample_schedule();
    let profit = ContestSolver::simulate(&schedule, false).unwrap();
    assert_eq!(profit, 159);
    assert_eq!(
        ContestSolver::simulate(&fixtures::complex_schedule(), true).unwrap(),
        240
    );
}

#[test]
fn test_simulate_empty_schedule() {
    let schedule = Schedule::from_json("[[0]]").unwrap();
    assert_eq!(ContestSolver::simulate(&schedule, false).unwrap(), 0);
}

#[test]
fn test_header_beyond_rows_is_rejected() {
    let err = Schedule::from_json("[[4611686018427387904],[1,0]]").unwrap_err();
    assert!(matches!(err, ScheduleError::MissingEvents { found: 1, .. }));
}

fn replay_notices(config: &RoadConfig) -> (i64, Vec<RoadNotice>) {
    let dir = tempdir().unwrap();
    let path = dir.path().join("notices.jsonl");

    let simulation = Simulation::from_schedule(fixtures::basic_schedule())
        .with_config(config)
        .with_sink(NoticeLogger::new(&path).unwrap());
    let outcome = ContestSolver::replay(simulation).unwrap();
    assert_eq!(outcome.snapshot.agent_at(5).unwrap().tenges, 95);

    let notices = fs::read_to_string(&path)
        .unwrap()
        .lines()
        .map(|line| RoadNotice::from_jsonl(line).expect("Failed to parse notice"))
        .collect();
    (outcome.profit, notices)
}

#[test]
fn test_replay_writes_notice_log() {
    let (profit, notices) = replay_notices(&RoadConfig::default());
    assert_eq!(profit, 95);

    // Default config walks robots
    assert!(notices
        .iter()
        .any(|n| matches!(n, RoadNotice::Walk { from: 0, to: 5, .. })));
    // The final advance ends the schedule and hides the road
    assert!(matches!(
        notices.last(),
        Some(RoadNotice::Hide { .. })
    ));
}

#[test]
fn test_replay_follows_configured_speed() {
    let mut config = RoadConfig::default();
    config.simulation.fast_movement = true;
    let (profit, notices) = replay_notices(&config);
    assert_eq!(profit, 95);

    assert!(!notices.iter().any(|n| matches!(n, RoadNotice::Walk { .. })));
    assert!(notices.contains(&RoadNotice::Reposition {
        entity: EntityRef::agent("robot_0001"),
        cell: 5,
    }));
}
