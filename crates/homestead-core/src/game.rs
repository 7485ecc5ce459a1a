//! Core game state machine.
//!
//! `GameState` owns the board, the players, and the phase, and is the only
//! place legality is decided. Every mutation goes through `request_action`,
//! which validates completely before touching any state: a rejected action
//! leaves the game exactly as it was.

use crate::actions::{GameAction, GameEvent};
use crate::board::{Board, EdgeId, PlayerId, Resource, VertexId};
use crate::player::{Player, PlayerColor, ResourceHand};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Victory points needed to win
const VICTORY_POINTS_TO_WIN: u32 = 10;

/// Game phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Initial placement: one free settlement and one road per player,
    /// in turn order
    Setup { placing: SetupPlacing },

    /// Normal turns: roll, build, end turn
    Main,

    /// Game is over. Terminal: every further request fails.
    GameOver { winner: PlayerId },
}

/// What the current player is placing during setup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SetupPlacing {
    Settlement,
    Road,
}

/// Errors that can occur when applying actions
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum GameError {
    #[error("Not your turn")]
    NotYourTurn,

    #[error("Position is not on the board")]
    InvalidPosition,

    #[error("Position is already occupied")]
    AlreadyOccupied,

    #[error("Cannot afford this")]
    InsufficientResources,

    #[error("Not connected to your network")]
    NotConnected,

    #[error("Invalid action for current phase")]
    WrongPhase,

    #[error("Game is over")]
    GameAlreadyOver,
}

/// Roster entry for creating a game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerSpec {
    pub name: String,
    pub is_ai: bool,
}

impl PlayerSpec {
    pub fn human(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_ai: false,
        }
    }

    pub fn ai(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_ai: true,
        }
    }
}

/// The complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// The game board
    pub board: Board,
    /// All players, indexed by `PlayerId`
    pub players: Vec<Player>,
    /// Current player index
    pub current_player: PlayerId,
    /// Current game phase
    pub phase: GamePhase,
    /// Turn number (0 during setup, 1 from the first main-phase turn)
    pub turn_number: u32,
    /// Last dice roll of the current turn, cleared on end of turn
    pub last_roll: Option<(u8, u8)>,
    /// Setup tracking: the settlement the current player just placed
    setup_settlement: Option<VertexId>,
    /// Dice source. Seeded for deterministic replays.
    rng: StdRng,
}

impl GameState {
    /// Create a new game with a random dice seed
    pub fn new(board: Board, roster: Vec<PlayerSpec>) -> Self {
        Self::with_rng(board, roster, StdRng::from_entropy())
    }

    /// Create a game with a fixed dice seed (deterministic replays)
    pub fn with_seed(board: Board, roster: Vec<PlayerSpec>, seed: u64) -> Self {
        Self::with_rng(board, roster, StdRng::seed_from_u64(seed))
    }

    fn with_rng(board: Board, roster: Vec<PlayerSpec>, rng: StdRng) -> Self {
        assert!(
            (2..=4).contains(&roster.len()),
            "Must have 2-4 players"
        );

        let players: Vec<Player> = roster
            .into_iter()
            .enumerate()
            .map(|(i, spec)| Player::new(i as PlayerId, spec.name, spec.is_ai))
            .collect();

        Self {
            board,
            players,
            current_player: 0,
            phase: GamePhase::Setup {
                placing: SetupPlacing::Settlement,
            },
            turn_number: 0,
            last_roll: None,
            setup_settlement: None,
            rng,
        }
    }

    /// Get the number of players
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Get a player by ID
    pub fn get_player(&self, id: PlayerId) -> Option<&Player> {
        self.players.get(id as usize)
    }

    fn get_player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.get_mut(id as usize)
    }

    /// Check if the game is finished
    pub fn is_finished(&self) -> bool {
        matches!(self.phase, GamePhase::GameOver { .. })
    }

    /// Get the winner if the game is finished
    pub fn get_winner(&self) -> Option<PlayerId> {
        if let GamePhase::GameOver { winner } = self.phase {
            Some(winner)
        } else {
            None
        }
    }

    /// The settlement awaiting its road during setup
    pub fn pending_setup_settlement(&self) -> Option<VertexId> {
        self.setup_settlement
    }

    // ==================== Legality ====================

    /// Whether any player has a settlement or city on the vertex
    fn vertex_occupied(&self, vertex: VertexId) -> bool {
        self.players.iter().any(|p| p.occupies_vertex(vertex))
    }

    /// Settlement legality for the current phase. Cost is waived during
    /// setup; occupancy is checked against every player.
    fn check_settlement(&self, player: PlayerId, vertex: VertexId) -> Result<(), GameError> {
        if !self.board.contains_vertex(vertex) {
            return Err(GameError::InvalidPosition);
        }
        if self.vertex_occupied(vertex) {
            return Err(GameError::AlreadyOccupied);
        }
        if matches!(self.phase, GamePhase::Main) {
            let p = self.get_player(player).ok_or(GameError::NotYourTurn)?;
            if !p.can_afford_settlement() {
                return Err(GameError::InsufficientResources);
            }
        }
        Ok(())
    }

    /// Road legality. The duplicate check is against the player's own roads
    /// only; connectivity is the edge-endpoint rule. During setup the road
    /// must touch the settlement just placed.
    fn check_road(&self, player: PlayerId, edge: EdgeId) -> Result<(), GameError> {
        if !self.board.contains_edge(edge) {
            return Err(GameError::InvalidPosition);
        }
        let p = self.get_player(player).ok_or(GameError::NotYourTurn)?;
        if p.has_road(edge) {
            return Err(GameError::AlreadyOccupied);
        }
        let connected = match self.phase {
            GamePhase::Setup { .. } => match self.setup_settlement {
                Some(settlement) => edge.touches(settlement),
                None => false,
            },
            _ => p.network_touches(edge),
        };
        if !connected {
            return Err(GameError::NotConnected);
        }
        if !p.can_afford_road() {
            return Err(GameError::InsufficientResources);
        }
        Ok(())
    }

    /// City legality: the vertex must hold one of the player's own
    /// settlements.
    fn check_city(&self, player: PlayerId, vertex: VertexId) -> Result<(), GameError> {
        if !self.board.contains_vertex(vertex) {
            return Err(GameError::InvalidPosition);
        }
        let p = self.get_player(player).ok_or(GameError::NotYourTurn)?;
        if !p.has_settlement(vertex) {
            // A city (own or foreign) or another player's settlement is
            // occupied; anything else is just not upgradable.
            return if self.vertex_occupied(vertex) {
                Err(GameError::AlreadyOccupied)
            } else {
                Err(GameError::InvalidPosition)
            };
        }
        if !p.can_afford_city() {
            return Err(GameError::InsufficientResources);
        }
        Ok(())
    }

    /// Whether a settlement placement would succeed right now
    pub fn can_place_settlement(&self, player: PlayerId, vertex: VertexId) -> bool {
        self.check_settlement(player, vertex).is_ok()
    }

    /// Whether a road placement would succeed right now
    pub fn can_place_road(&self, player: PlayerId, edge: EdgeId) -> bool {
        self.check_road(player, edge).is_ok()
    }

    /// Whether a city upgrade would succeed right now
    pub fn can_upgrade_city(&self, player: PlayerId, vertex: VertexId) -> bool {
        self.check_city(player, vertex).is_ok()
    }

    // ==================== Actions ====================

    /// Apply an action for a player. Validates fully before mutating.
    pub fn request_action(
        &mut self,
        player: PlayerId,
        action: GameAction,
    ) -> Result<Vec<GameEvent>, GameError> {
        if self.is_finished() {
            return Err(GameError::GameAlreadyOver);
        }
        if player != self.current_player {
            return Err(GameError::NotYourTurn);
        }

        match self.phase {
            GamePhase::Setup { placing } => self.apply_setup(player, placing, action),
            GamePhase::Main => self.apply_main(player, action),
            GamePhase::GameOver { .. } => Err(GameError::GameAlreadyOver),
        }
    }

    fn apply_setup(
        &mut self,
        player: PlayerId,
        placing: SetupPlacing,
        action: GameAction,
    ) -> Result<Vec<GameEvent>, GameError> {
        match (placing, action) {
            (SetupPlacing::Settlement, GameAction::PlaceSettlement(vertex)) => {
                self.check_settlement(player, vertex)?;

                if let Some(p) = self.get_player_mut(player) {
                    p.place_free_settlement(vertex);
                }
                self.setup_settlement = Some(vertex);
                self.phase = GamePhase::Setup {
                    placing: SetupPlacing::Road,
                };

                Ok(vec![GameEvent::SettlementBuilt {
                    player,
                    vertex,
                    free: true,
                }])
            }

            (SetupPlacing::Road, GameAction::PlaceRoad(edge)) => {
                self.check_road(player, edge)?;

                if let Some(p) = self.get_player_mut(player) {
                    p.buy_road(edge);
                }
                self.setup_settlement = None;

                let mut events = vec![GameEvent::RoadBuilt { player, edge }];
                events.push(self.advance_setup(player));
                Ok(events)
            }

            _ => Err(GameError::WrongPhase),
        }
    }

    /// Move setup to the next player, or into the main phase after the last
    /// player's road. Turn order restarts at player 0 for the main phase.
    fn advance_setup(&mut self, player: PlayerId) -> GameEvent {
        let next = if (player as usize + 1) < self.player_count() {
            self.phase = GamePhase::Setup {
                placing: SetupPlacing::Settlement,
            };
            player + 1
        } else {
            self.phase = GamePhase::Main;
            self.turn_number = 1;
            0
        };
        self.current_player = next;
        GameEvent::TurnEnded {
            player,
            next_player: next,
        }
    }

    fn apply_main(
        &mut self,
        player: PlayerId,
        action: GameAction,
    ) -> Result<Vec<GameEvent>, GameError> {
        match action {
            GameAction::RollAndDistribute => {
                // One roll per turn
                if self.last_roll.is_some() {
                    return Err(GameError::WrongPhase);
                }

                let die1 = self.rng.gen_range(1..=6u8);
                let die2 = self.rng.gen_range(1..=6u8);
                let total = die1 + die2;
                self.last_roll = Some((die1, die2));

                let mut events = vec![GameEvent::DiceRolled {
                    player,
                    roll: (die1, die2),
                    total,
                }];

                let distributions = self.distribute(total);
                if !distributions.is_empty() {
                    events.push(GameEvent::ResourcesDistributed { distributions });
                }
                Ok(events)
            }

            GameAction::PlaceSettlement(vertex) => {
                self.check_settlement(player, vertex)?;

                if let Some(p) = self.get_player_mut(player) {
                    p.buy_settlement(vertex);
                }

                let mut events = vec![GameEvent::SettlementBuilt {
                    player,
                    vertex,
                    free: false,
                }];
                if let Some(event) = self.check_win(player) {
                    events.push(event);
                }
                Ok(events)
            }

            GameAction::PlaceRoad(edge) => {
                self.check_road(player, edge)?;

                if let Some(p) = self.get_player_mut(player) {
                    p.buy_road(edge);
                }
                Ok(vec![GameEvent::RoadBuilt { player, edge }])
            }

            GameAction::UpgradeCity(vertex) => {
                self.check_city(player, vertex)?;

                if let Some(p) = self.get_player_mut(player) {
                    p.buy_city(vertex);
                }

                let mut events = vec![GameEvent::CityBuilt { player, vertex }];
                if let Some(event) = self.check_win(player) {
                    events.push(event);
                }
                Ok(events)
            }

            GameAction::EndTurn => {
                self.last_roll = None;
                let next = ((player as usize + 1) % self.player_count()) as PlayerId;
                self.current_player = next;
                self.turn_number += 1;
                Ok(vec![GameEvent::TurnEnded {
                    player,
                    next_player: next,
                }])
            }
        }
    }

    /// Credit production for a dice total: every settlement or city vertex
    /// on a tile whose number matches yields 1 unit of that tile's resource.
    /// Tiles are visited in position order, vertices in corner order, so the
    /// distribution list is deterministic.
    fn distribute(&mut self, total: u8) -> Vec<(PlayerId, Resource, u32)> {
        let mut matching: Vec<(u8, Resource, [VertexId; 6])> = Vec::new();
        for tile in self.board.tiles() {
            if tile.number != Some(total) {
                continue;
            }
            let Some(resource) = tile.resource() else {
                continue;
            };
            if let Some(vertices) = self.board.tile_vertices(tile.position) {
                matching.push((tile.position, resource, *vertices));
            }
        }
        matching.sort_by_key(|(position, _, _)| *position);

        let mut distributions = Vec::new();
        for (_, resource, vertices) in matching {
            for vertex in vertices {
                for player in &mut self.players {
                    if player.occupies_vertex(vertex) {
                        player.resources.add(resource, 1);
                        distributions.push((player.id, resource, 1));
                    }
                }
            }
        }
        distributions
    }

    /// Freeze the game if the player reached the victory threshold
    fn check_win(&mut self, player: PlayerId) -> Option<GameEvent> {
        let vp = self.get_player(player)?.victory_points();
        if vp >= VICTORY_POINTS_TO_WIN {
            self.phase = GamePhase::GameOver { winner: player };
            Some(GameEvent::GameWon {
                player,
                victory_points: vp,
            })
        } else {
            None
        }
    }

    /// Serializable snapshot for frontends
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            board: self.board.snapshot(),
            players: self
                .players
                .iter()
                .map(|p| PlayerSnapshot {
                    id: p.id,
                    name: p.name.clone(),
                    color: p.color,
                    is_ai: p.is_ai,
                    resources: p.resources.clone(),
                    settlements: p.settlements.clone(),
                    cities: p.cities.clone(),
                    roads: p.roads.clone(),
                    victory_points: p.victory_points(),
                })
                .collect(),
            current_player: self.current_player,
            phase: self.phase,
            turn_number: self.turn_number,
            last_roll: self.last_roll,
        }
    }
}

/// JSON-friendly view of the whole game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub board: crate::board::BoardSnapshot,
    pub players: Vec<PlayerSnapshot>,
    pub current_player: PlayerId,
    pub phase: GamePhase,
    pub turn_number: u32,
    pub last_roll: Option<(u8, u8)>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub id: PlayerId,
    pub name: String,
    pub color: PlayerColor,
    pub is_ai: bool,
    pub resources: ResourceHand,
    pub settlements: Vec<VertexId>,
    pub cities: Vec<VertexId>,
    pub roads: Vec<EdgeId>,
    pub victory_points: u32,
}
