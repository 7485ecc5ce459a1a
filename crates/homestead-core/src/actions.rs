//! Actions players can request and events the engine emits.

use crate::board::{EdgeId, PlayerId, Resource, VertexId};
use serde::{Deserialize, Serialize};

/// An action a player requests from the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameAction {
    /// Place a settlement on a vertex (free during setup, paid in the main
    /// phase)
    PlaceSettlement(VertexId),
    /// Place a road on an edge
    PlaceRoad(EdgeId),
    /// Upgrade one of your own settlements to a city
    UpgradeCity(VertexId),
    /// Roll two dice and distribute production (main phase, once per turn)
    RollAndDistribute,
    /// Pass the turn to the next player
    EndTurn,
}

/// Events emitted by successful actions. These carry everything a frontend
/// needs to narrate or animate the change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    SettlementBuilt {
        player: PlayerId,
        vertex: VertexId,
        /// Whether the setup phase waived the cost
        free: bool,
    },
    RoadBuilt {
        player: PlayerId,
        edge: EdgeId,
    },
    CityBuilt {
        player: PlayerId,
        vertex: VertexId,
    },
    DiceRolled {
        player: PlayerId,
        roll: (u8, u8),
        total: u8,
    },
    ResourcesDistributed {
        /// One entry per (player, resource) credit, in board scan order
        distributions: Vec<(PlayerId, Resource, u32)>,
    },
    TurnEnded {
        player: PlayerId,
        next_player: PlayerId,
    },
    GameWon {
        player: PlayerId,
        victory_points: u32,
    },
}
