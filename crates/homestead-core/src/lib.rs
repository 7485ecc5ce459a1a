//! Homestead - a hex-grid settlement game engine
//!
//! This crate provides the core game logic for Homestead, including:
//! - Hexagon geometry for the staggered board grid
//! - Board representation with tiles, interned vertices, and edges
//! - Player state and resource management
//! - Game state machine with full rule enforcement
//! - A deterministic AI policy
//!
//! # Architecture
//!
//! The engine is headless and platform-agnostic: it never draws, reads
//! input, or talks to a network. Frontends consume `GameState::snapshot()`
//! and feed player intents in through `GameState::request_action`.
//!
//! # Modules
//!
//! - [`geometry`]: Pure hexagon math for the staggered grid
//! - [`board`]: Tiles, vertex/edge identity, and board queries
//! - [`player`]: Player state, resource hands, and building costs
//! - [`actions`]: Requestable actions and emitted events
//! - [`game`]: Game state machine
//! - [`policy`]: Deterministic AI turn policy

pub mod actions;
pub mod board;
pub mod game;
pub mod geometry;
pub mod player;
pub mod policy;

// Re-export commonly used types
pub use actions::{GameAction, GameEvent};
pub use board::{
    Board, BoardError, BoardSnapshot, EdgeId, PlayerId, Resource, Tile, TileKind, TilePos,
    VertexId,
};
pub use game::{
    GameError, GamePhase, GameSnapshot, GameState, PlayerSpec, SetupPlacing,
};
pub use player::{costs, Player, PlayerColor, ResourceHand};
pub use policy::AiPolicy;
