//! Replay Tests
//!
//! Plays a short game through a GameSession with debug logging enabled, then
//! feeds the log back through the ReplayEngine and expects every tick to match.

use snakepit_bot::bot::Bot;
use snakepit_bot::config::Config;
use snakepit_bot::debug_logger::DebugLogger;
use snakepit_bot::grid;
use snakepit_bot::replay::ReplayEngine;
use snakepit_bot::session::GameSession;
use snakepit_bot::types::{Coord, Direction, HostEvent, MapSnapshot, SnakeInfo};
use std::path::PathBuf;

fn temp_log(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("snakepit_{}_{}.jsonl", name, std::process::id()))
}

fn index(x: i32, y: i32) -> i32 {
    grid::to_index(Coord { x, y }, 11) as i32
}

fn map_update(tick: i64, my_body: Vec<i32>, other_body: Vec<i32>) -> HostEvent {
    HostEvent::MapUpdated {
        game_tick: tick,
        receiving_player_id: "me".to_string(),
        map: MapSnapshot {
            width: 11,
            height: 11,
            world_tick: tick,
            snake_infos: vec![
                SnakeInfo {
                    id: "me".to_string(),
                    name: "snakepit-bot".to_string(),
                    points: 0,
                    positions: my_body,
                },
                SnakeInfo {
                    id: "other".to_string(),
                    name: "other".to_string(),
                    points: 0,
                    positions: other_body,
                },
            ],
            food_positions: vec![index(5, 5)],
            obstacle_positions: vec![index(0, 10), index(10, 0)],
        },
    }
}

/// Writes a three tick game to `path` and returns the moves the session made
fn record_game(path: &PathBuf) -> Vec<Direction> {
    let logger = DebugLogger::new(true, path.to_str().unwrap());
    let mut session = GameSession::new(Bot::new(Config::default_hardcoded()), logger);

    let ticks = vec![
        map_update(1, vec![index(2, 2), index(2, 3)], vec![index(8, 8), index(8, 9)]),
        map_update(
            2,
            vec![index(2, 1), index(2, 2), index(2, 3)],
            vec![index(8, 7), index(8, 8), index(8, 9)],
        ),
        map_update(
            3,
            vec![index(3, 1), index(2, 1), index(2, 2)],
            vec![index(7, 7), index(8, 7), index(8, 8)],
        ),
    ];

    ticks
        .iter()
        .map(|event| session.handle(event).unwrap().unwrap().direction)
        .collect()
}

#[test]
fn test_logged_game_replays_identically() {
    let path = temp_log("replay_identical");
    let played = record_game(&path);

    let engine = ReplayEngine::new(Config::default_hardcoded(), false);
    let entries = engine.load_log_file(&path).expect("log should load");
    assert_eq!(entries.len(), 3);
    assert_eq!(
        entries.iter().map(|e| e.chosen_move).collect::<Vec<_>>(),
        played
    );

    let results = engine.replay_all(&entries, None).expect("replay should run");
    let stats = ReplayEngine::stats(&results);
    std::fs::remove_file(&path).ok();

    assert_eq!(stats.total_ticks, 3);
    assert_eq!(stats.mismatches, 0);
    assert_eq!(stats.match_rate, 1.0);
}

#[test]
fn test_replay_selected_ticks_and_validation() {
    let path = temp_log("replay_selected");
    let played = record_game(&path);

    let engine = ReplayEngine::new(Config::default_hardcoded(), true);
    let entries = engine.load_log_file(&path).expect("log should load");
    std::fs::remove_file(&path).ok();

    let wanted: [i64; 1] = [2];
    let results = engine
        .replay_all(&entries, Some(&wanted[..]))
        .expect("replay should run");
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].tick, 2);
    assert!(results[0].matches);

    assert!(engine
        .validate_expected_moves(&entries, &[(1, vec![played[0]])])
        .is_ok());

    let wrong: Vec<Direction> = Direction::all()
        .into_iter()
        .filter(|d| *d != played[0])
        .collect();
    assert!(engine
        .validate_expected_moves(&entries, &[(1, wrong)])
        .is_err());
    assert!(engine
        .validate_expected_moves(&entries, &[(99, vec![Direction::Up])])
        .is_err());
}

#[test]
fn test_missing_log_file_is_an_error() {
    let engine = ReplayEngine::new(Config::default_hardcoded(), false);
    assert!(engine.load_log_file("does_not_exist.jsonl").is_err());
}

#[test]
fn test_malformed_line_reports_line_number() {
    let path = temp_log("replay_malformed");
    std::fs::write(&path, "\n{not json}\n").unwrap();

    let engine = ReplayEngine::new(Config::default_hardcoded(), false);
    let err = engine.load_log_file(&path).unwrap_err();
    std::fs::remove_file(&path).ok();

    assert!(err.contains("line 2"), "{}", err);
}
