// Host-side game session
//
// Owns everything that lives longer than one tick: the bot, the carry-over
// tick state and the debug logger. Host events are dispatched here; map
// updates produce a move response, lifecycle events only log.

use serde::Serialize;

use crate::bot::Bot;
use crate::debug_logger::DebugLogger;
use crate::types::{Direction, HostEvent, TickState};

/// Reply to a map update
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MoveResponse {
    pub direction: Direction,
    pub game_tick: i64,
}

pub struct GameSession {
    bot: Bot,
    state: TickState,
    logger: DebugLogger,
}

impl GameSession {
    pub fn new(bot: Bot, logger: DebugLogger) -> Self {
        GameSession {
            bot,
            state: TickState::default(),
            logger,
        }
    }

    pub fn tick_state(&self) -> TickState {
        self.state
    }

    /// Handles one host event
    ///
    /// # Returns
    /// * `Ok(Some(_))` for map updates, `Ok(None)` for lifecycle events
    /// * `Err(_)` when our snake is missing from a map update
    pub fn handle(&mut self, event: &HostEvent) -> Result<Option<MoveResponse>, String> {
        match event {
            HostEvent::MapUpdated {
                game_tick,
                receiving_player_id,
                map,
            } => {
                let state_before = self.state;
                let decision = self.bot.decide_move(map, receiving_player_id, state_before)?;
                self.state = decision.tick_state;

                self.logger.log_move(
                    *game_tick,
                    receiving_player_id,
                    state_before,
                    decision.direction,
                    decision.score,
                    map,
                );

                Ok(Some(MoveResponse {
                    direction: decision.direction,
                    game_tick: *game_tick,
                }))
            }
            HostEvent::GameStarted {
                game_id,
                no_of_snakes,
                width,
                height,
            } => {
                self.state = TickState::default();
                self.bot.game_started(game_id, *no_of_snakes, *width, *height);
                Ok(None)
            }
            HostEvent::GameEnded {
                game_id,
                player_winner_id,
                ..
            } => {
                self.state = TickState::default();
                self.bot.game_ended(game_id, player_winner_id);
                Ok(None)
            }
            HostEvent::SnakeDied {
                player_id,
                death_reason,
                game_tick,
            } => {
                self.bot.snake_died(player_id, death_reason, *game_tick);
                Ok(None)
            }
            HostEvent::TournamentEnded {
                tournament_id,
                player_winner_id,
            } => {
                self.bot.tournament_ended(tournament_id, player_winner_id);
                Ok(None)
            }
            HostEvent::GameResult {
                game_id,
                player_ranks,
            } => {
                self.bot.game_result(game_id, player_ranks);
                Ok(None)
            }
        }
    }
}
