// Snakepit bot
//
// `Bot::decide_move` is called once per tick with the map snapshot and our own
// id. It builds the tile lookup, projects the opponents, scores all four
// directions and returns the best one together with the tick state the caller
// should hand back on the next tick.
//
// The lifecycle hooks only log; none of them feed anything back to the engine.

use log::{debug, info, warn};
use serde::Serialize;
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::grid::Grid;
use crate::reachability::Deadline;
use crate::scorer::{self, CandidateMove, MoveScorer};
use crate::types::{Coord, Direction, GameMap, PlayerRank, TickState};

/// Diagnostics for one decision, serialisable for the debug log
#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DebugInfo {
    pub my_coords: Coord,
    pub nemesis: Option<Coord>,
    pub nemesis_room: u32,
    pub candidates: Vec<CandidateMove>,
    pub elapsed_ms: u128,
}

/// Result of one tick
#[derive(Debug, Clone)]
pub struct MoveDecision {
    pub direction: Direction,
    pub score: i64,
    /// State to pass into the next call
    pub tick_state: TickState,
    pub debug: DebugInfo,
}

/// Snakepit bot with OOP-style API
/// Takes static configuration and exposes one method per host callback
pub struct Bot {
    config: Config,
}

impl Bot {
    /// Creates a new Bot instance with the given configuration
    pub fn new(config: Config) -> Self {
        Bot { config }
    }

    pub fn game_started(&self, game_id: &str, no_of_snakes: i32, width: i32, height: i32) {
        info!(
            "GAME START {} ({} snakes, {}x{})",
            game_id, no_of_snakes, width, height
        );
    }

    pub fn game_ended(&self, game_id: &str, winner_id: &str) {
        info!("GAME OVER {} (winner: {})", game_id, winner_id);
    }

    pub fn snake_died(&self, player_id: &str, reason: &str, tick: i64) {
        info!("Snake {} died on tick {}: {}", player_id, tick, reason);
    }

    pub fn tournament_ended(&self, tournament_id: &str, winner_id: &str) {
        info!("TOURNAMENT OVER {} (winner: {})", tournament_id, winner_id);
    }

    /// Logs our own outcome; returns whether we were still alive, `None` if we
    /// are not among the ranked players
    pub fn game_result(&self, game_id: &str, ranks: &[PlayerRank]) -> Option<bool> {
        let name = &self.config.player.name;
        match ranks.iter().find(|r| &r.player_name == name) {
            Some(rank) => {
                info!(
                    "Game {} result: {} (rank {}, {} points)",
                    game_id,
                    if rank.is_alive { "YOU WIN" } else { "YOU LOST" },
                    rank.rank,
                    rank.points
                );
                Some(rank.is_alive)
            }
            None => {
                warn!("Game {} result does not list player '{}'", game_id, name);
                None
            }
        }
    }

    /// Chooses a move for this tick
    ///
    /// # Arguments
    /// * `map` - Map snapshot for the tick, treated as immutable
    /// * `self_id` - Our own snake id
    /// * `state` - Tick state returned by the previous call
    ///
    /// # Returns
    /// * `Result<MoveDecision, String>` - Always a direction unless our own
    ///   snake is missing from the map, which no move can fix
    pub fn decide_move<M: GameMap>(
        &self,
        map: &M,
        self_id: &str,
        state: TickState,
    ) -> Result<MoveDecision, String> {
        let start_time = Instant::now();
        let deadline = Deadline::after(
            start_time,
            Duration::from_millis(self.config.timing.effective_budget_ms()),
        );

        let my_head = map
            .self_position(self_id)
            .ok_or_else(|| format!("Snake with id '{}' not found in map", self_id))?;
        let opponent_heads = map.opponent_heads(self_id);
        let grid = Grid::from_map(map);

        let move_scorer = MoveScorer::new(
            &grid,
            &self.config,
            state,
            my_head,
            &opponent_heads,
            deadline,
        );
        let candidates = move_scorer.evaluate_all();

        for c in &candidates {
            debug!(
                "{:>5}: score={} space={} width={} removed={}/{} tags={:?}",
                c.direction.as_str(),
                c.score,
                c.reachable_space,
                c.corridor_width,
                c.nemesis_space_removed,
                c.nemesis_space_removed_second,
                c.tags
            );
        }

        let best = scorer::pick_best(&candidates)
            .ok_or_else(|| "No candidate moves were evaluated".to_string())?;
        let direction = best.direction;
        let score = best.score;
        let tick_state = scorer::next_tick_state(best);

        if deadline.expired() {
            warn!("Tick budget exhausted, space estimates may be shallow");
        }

        let nemesis = move_scorer.nemesis();
        let elapsed_ms = start_time.elapsed().as_millis();
        info!(
            "Chose {} (score: {}, state: {:?}, time: {}ms)",
            direction.as_str(),
            score,
            tick_state,
            elapsed_ms
        );

        Ok(MoveDecision {
            direction,
            score,
            tick_state,
            debug: DebugInfo {
                my_coords: my_head,
                nemesis: if nemesis.is_present() {
                    Some(nemesis.head)
                } else {
                    None
                },
                nemesis_room: nemesis.baseline_room,
                candidates,
                elapsed_ms,
            },
        })
    }
}
