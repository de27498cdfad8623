// Snakepit API Types
// Map snapshots and lifecycle events as delivered by the game host

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::grid;

/// 2D coordinate on the map, 0-indexed from the top-left corner
#[derive(Deserialize, Serialize, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub fn new(x: i32, y: i32) -> Self {
        Coord { x, y }
    }
}

/// Represents the four possible movement directions for a snake
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns all directions in evaluation order
    pub fn all() -> [Direction; 4] {
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right]
    }

    /// Converts direction to the string the game host expects
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "UP",
            Direction::Down => "DOWN",
            Direction::Left => "LEFT",
            Direction::Right => "RIGHT",
        }
    }

    /// Unit delta applied by one step in this direction (y grows downwards)
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// The two directions at right angles to this one
    pub fn perpendicular(&self) -> [Direction; 2] {
        match self {
            Direction::Up | Direction::Down => [Direction::Left, Direction::Right],
            Direction::Left | Direction::Right => [Direction::Up, Direction::Down],
        }
    }

    pub fn parse(s: &str) -> Result<Direction, String> {
        match s.to_uppercase().as_str() {
            "UP" => Ok(Direction::Up),
            "DOWN" => Ok(Direction::Down),
            "LEFT" => Ok(Direction::Left),
            "RIGHT" => Ok(Direction::Right),
            _ => Err(format!("Invalid direction '{}'", s)),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification of a single map cell
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum Tile {
    Empty,
    Food,
    SnakeBody,
    Obstacle,
    OutOfBounds,
}

impl Tile {
    /// Only empty cells and food can be moved onto
    pub fn is_safe(&self) -> bool {
        matches!(self, Tile::Empty | Tile::Food)
    }
}

/// Carry-over flags read at the start of a tick and written once a move is chosen
#[derive(Deserialize, Serialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TickState {
    pub in_corridor: bool,
    pub trapped: bool,
}

/// Read-only view over the map consumed by the engine
pub trait GameMap {
    fn width(&self) -> i32;
    fn height(&self) -> i32;
    /// Head of the snake with the given id, `None` if it is not on the map
    fn self_position(&self, self_id: &str) -> Option<Coord>;
    /// Heads of all live snakes other than `self_id`
    fn opponent_heads(&self, self_id: &str) -> Vec<Coord>;
    /// Non-empty cells keyed by flattened index
    fn occupied_tiles(&self) -> HashMap<usize, Tile>;
}

/// Snake as reported in a map update; positions are flattened indices, head first
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SnakeInfo {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub points: i32,
    pub positions: Vec<i32>,
}

impl SnakeInfo {
    pub fn is_alive(&self) -> bool {
        !self.positions.is_empty()
    }
}

/// Map snapshot for one tick
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MapSnapshot {
    pub width: i32,
    pub height: i32,
    #[serde(default)]
    pub world_tick: i64,
    pub snake_infos: Vec<SnakeInfo>,
    #[serde(default)]
    pub food_positions: Vec<i32>,
    #[serde(default)]
    pub obstacle_positions: Vec<i32>,
}

impl MapSnapshot {
    fn head_of(&self, snake: &SnakeInfo) -> Option<Coord> {
        if self.width <= 0 {
            return None;
        }
        snake
            .positions
            .first()
            .filter(|&&p| self.in_range(p))
            .map(|&p| grid::to_coord(p as usize, self.width))
    }

    fn in_range(&self, position: i32) -> bool {
        position >= 0 && (position as i64) < (self.width as i64) * (self.height as i64)
    }
}

impl GameMap for MapSnapshot {
    fn width(&self) -> i32 {
        self.width
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn self_position(&self, self_id: &str) -> Option<Coord> {
        self.snake_infos
            .iter()
            .find(|s| s.id == self_id)
            .and_then(|s| self.head_of(s))
    }

    fn opponent_heads(&self, self_id: &str) -> Vec<Coord> {
        self.snake_infos
            .iter()
            .filter(|s| s.id != self_id && s.is_alive())
            .filter_map(|s| self.head_of(s))
            .collect()
    }

    fn occupied_tiles(&self) -> HashMap<usize, Tile> {
        let mut tiles = HashMap::new();

        for &p in self.food_positions.iter().filter(|&&p| self.in_range(p)) {
            tiles.insert(p as usize, Tile::Food);
        }
        for &p in self.obstacle_positions.iter().filter(|&&p| self.in_range(p)) {
            tiles.insert(p as usize, Tile::Obstacle);
        }
        for snake in &self.snake_infos {
            for &p in snake.positions.iter().filter(|&&p| self.in_range(p)) {
                tiles.insert(p as usize, Tile::SnakeBody);
            }
        }

        tiles
    }
}

/// Final standing of one player, reported in a game result
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRank {
    pub player_name: String,
    #[serde(default)]
    pub player_id: String,
    #[serde(default)]
    pub rank: i32,
    #[serde(default)]
    pub points: i32,
    pub is_alive: bool,
}

/// Messages the game host sends to the bot
#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum HostEvent {
    #[serde(rename_all = "camelCase")]
    MapUpdated {
        game_tick: i64,
        receiving_player_id: String,
        map: MapSnapshot,
    },
    #[serde(rename_all = "camelCase")]
    GameStarted {
        game_id: String,
        #[serde(default)]
        no_of_snakes: i32,
        #[serde(default)]
        width: i32,
        #[serde(default)]
        height: i32,
    },
    #[serde(rename_all = "camelCase")]
    GameEnded {
        game_id: String,
        #[serde(default)]
        player_winner_id: String,
        #[serde(default)]
        game_tick: i64,
    },
    #[serde(rename_all = "camelCase")]
    SnakeDied {
        player_id: String,
        #[serde(default)]
        death_reason: String,
        #[serde(default)]
        game_tick: i64,
    },
    #[serde(rename_all = "camelCase")]
    TournamentEnded {
        tournament_id: String,
        #[serde(default)]
        player_winner_id: String,
    },
    #[serde(rename_all = "camelCase")]
    GameResult {
        game_id: String,
        player_ranks: Vec<PlayerRank>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> MapSnapshot {
        // 5x4 map: self at (1,1) heading right, opponent head at (3,2)
        MapSnapshot {
            width: 5,
            height: 4,
            world_tick: 3,
            snake_infos: vec![
                SnakeInfo {
                    id: "me".to_string(),
                    name: "me".to_string(),
                    points: 0,
                    positions: vec![6, 5],
                },
                SnakeInfo {
                    id: "other".to_string(),
                    name: "other".to_string(),
                    points: 0,
                    positions: vec![13, 14],
                },
                SnakeInfo {
                    id: "dead".to_string(),
                    name: "dead".to_string(),
                    points: 0,
                    positions: vec![],
                },
            ],
            food_positions: vec![0, 6],
            obstacle_positions: vec![19, 99],
        }
    }

    #[test]
    fn test_self_position_and_opponent_heads() {
        let map = snapshot();
        assert_eq!(map.self_position("me"), Some(Coord::new(1, 1)));
        assert_eq!(map.self_position("ghost"), None);
        assert_eq!(map.opponent_heads("me"), vec![Coord::new(3, 2)]);
    }

    #[test]
    fn test_occupied_tiles_prefers_snakes_and_skips_out_of_range() {
        let tiles = snapshot().occupied_tiles();
        assert_eq!(tiles.get(&0), Some(&Tile::Food));
        assert_eq!(tiles.get(&6), Some(&Tile::SnakeBody));
        assert_eq!(tiles.get(&19), Some(&Tile::Obstacle));
        assert!(!tiles.contains_key(&99));
    }

    #[test]
    fn test_direction_round_trips_through_wire_string() {
        for dir in Direction::all() {
            assert_eq!(Direction::parse(dir.as_str()), Ok(dir));
        }
        assert!(Direction::parse("north").is_err());
        assert_eq!(serde_json::to_string(&Direction::Left).unwrap(), "\"LEFT\"");
    }

    #[test]
    fn test_host_event_parses_map_update() {
        let raw = r#"{
            "type": "mapUpdated",
            "gameTick": 7,
            "receivingPlayerId": "me",
            "map": {
                "width": 3, "height": 3, "worldTick": 7,
                "snakeInfos": [{"id": "me", "name": "me", "points": 1, "positions": [4]}],
                "foodPositions": [0], "obstaclePositions": []
            }
        }"#;
        match serde_json::from_str::<HostEvent>(raw).unwrap() {
            HostEvent::MapUpdated { game_tick, map, .. } => {
                assert_eq!(game_tick, 7);
                assert_eq!(map.self_position("me"), Some(Coord::new(1, 1)));
            }
            other => panic!("unexpected event {:?}", other),
        }
    }
}
