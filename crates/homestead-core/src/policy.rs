//! Deterministic AI policy.
//!
//! The policy is a stateless greedy scan: it takes the first legal option in
//! the board's fixed scan order, preferring settlement over road over city,
//! and passes when nothing is affordable. Two games with the same state
//! always produce the same decision.

use crate::actions::{GameAction, GameEvent};
use crate::board::PlayerId;
use crate::game::{GameError, GamePhase, GameState, SetupPlacing};

#[derive(Debug, Clone, Copy, Default)]
pub struct AiPolicy;

impl AiPolicy {
    pub fn new() -> Self {
        Self
    }

    /// Pick a single action for the player in the current state.
    ///
    /// Setup: the first free vertex, then the first legal road. Main phase:
    /// first legal settlement, else first legal road, else the oldest own
    /// settlement that can be upgraded, else pass.
    pub fn decide(&self, game: &GameState, player: PlayerId) -> GameAction {
        match game.phase {
            GamePhase::Setup {
                placing: SetupPlacing::Settlement,
            } => {
                for &vertex in game.board.vertex_scan_order() {
                    if game.can_place_settlement(player, vertex) {
                        return GameAction::PlaceSettlement(vertex);
                    }
                }
                GameAction::EndTurn
            }

            GamePhase::Setup {
                placing: SetupPlacing::Road,
            } => {
                for &edge in game.board.edge_scan_order() {
                    if game.can_place_road(player, edge) {
                        return GameAction::PlaceRoad(edge);
                    }
                }
                GameAction::EndTurn
            }

            GamePhase::Main => {
                for &vertex in game.board.vertex_scan_order() {
                    if game.can_place_settlement(player, vertex) {
                        return GameAction::PlaceSettlement(vertex);
                    }
                }
                for &edge in game.board.edge_scan_order() {
                    if game.can_place_road(player, edge) {
                        return GameAction::PlaceRoad(edge);
                    }
                }
                if let Some(p) = game.get_player(player) {
                    // Oldest settlement first
                    for &vertex in &p.settlements {
                        if game.can_upgrade_city(player, vertex) {
                            return GameAction::UpgradeCity(vertex);
                        }
                    }
                }
                GameAction::EndTurn
            }

            GamePhase::GameOver { .. } => GameAction::EndTurn,
        }
    }

    /// Drive one full main-phase turn: roll and distribute, apply the single
    /// decided build (or pass), end the turn. Stops early if a build wins
    /// the game.
    pub fn take_turn(
        &self,
        game: &mut GameState,
        player: PlayerId,
    ) -> Result<Vec<GameEvent>, GameError> {
        let mut events = game.request_action(player, GameAction::RollAndDistribute)?;

        let action = self.decide(game, player);
        if action != GameAction::EndTurn {
            events.extend(game.request_action(player, action)?);
        }
        if game.is_finished() {
            return Ok(events);
        }

        events.extend(game.request_action(player, GameAction::EndTurn)?);
        Ok(events)
    }
}
