//! Player state and resource management.
//!
//! This module contains:
//! - Player struct with resources and placed pieces
//! - ResourceHand for managing resource counts
//! - Building costs
//!
//! Mutators here apply effects only. Legality (occupancy, connectivity,
//! phase) is decided by the game state before any of these are called.

use crate::board::{EdgeId, PlayerId, Resource, VertexId};
use serde::{Deserialize, Serialize};

/// Player color for UI rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerColor {
    Red,
    Blue,
    Green,
    Yellow,
}

impl PlayerColor {
    /// Get color for a player index
    pub fn for_player(id: PlayerId) -> Self {
        match id % 4 {
            0 => PlayerColor::Red,
            1 => PlayerColor::Blue,
            2 => PlayerColor::Green,
            _ => PlayerColor::Yellow,
        }
    }

    /// RGB triple for rendering
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            PlayerColor::Red => (255, 0, 0),
            PlayerColor::Blue => (0, 0, 255),
            PlayerColor::Green => (0, 200, 0),
            PlayerColor::Yellow => (230, 200, 0),
        }
    }
}

/// A hand of resources
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceHand {
    pub wood: u32,
    pub brick: u32,
    pub sheep: u32,
    pub wheat: u32,
    pub ore: u32,
}

impl ResourceHand {
    /// Create an empty hand
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a hand with specific amounts
    pub fn with_amounts(wood: u32, brick: u32, sheep: u32, wheat: u32, ore: u32) -> Self {
        Self {
            wood,
            brick,
            sheep,
            wheat,
            ore,
        }
    }

    /// The starting inventory: 3 of each resource
    pub fn starting() -> Self {
        Self::with_amounts(3, 3, 3, 3, 3)
    }

    /// Total number of resource cards
    pub fn total(&self) -> u32 {
        self.wood + self.brick + self.sheep + self.wheat + self.ore
    }

    /// Get count of a specific resource
    pub fn get(&self, resource: Resource) -> u32 {
        match resource {
            Resource::Wood => self.wood,
            Resource::Brick => self.brick,
            Resource::Sheep => self.sheep,
            Resource::Wheat => self.wheat,
            Resource::Ore => self.ore,
        }
    }

    /// Add resources to hand
    pub fn add(&mut self, resource: Resource, amount: u32) {
        match resource {
            Resource::Wood => self.wood += amount,
            Resource::Brick => self.brick += amount,
            Resource::Sheep => self.sheep += amount,
            Resource::Wheat => self.wheat += amount,
            Resource::Ore => self.ore += amount,
        }
    }

    /// Check if can afford a cost
    pub fn can_afford(&self, cost: &ResourceHand) -> bool {
        self.wood >= cost.wood
            && self.brick >= cost.brick
            && self.sheep >= cost.sheep
            && self.wheat >= cost.wheat
            && self.ore >= cost.ore
    }

    /// Subtract a cost (panics if insufficient)
    pub fn subtract(&mut self, cost: &ResourceHand) {
        assert!(self.can_afford(cost), "Cannot afford this cost");
        self.wood -= cost.wood;
        self.brick -= cost.brick;
        self.sheep -= cost.sheep;
        self.wheat -= cost.wheat;
        self.ore -= cost.ore;
    }
}

/// Building costs
pub mod costs {
    use super::ResourceHand;

    /// Cost to build a road: 1 wood, 1 brick
    pub fn road() -> ResourceHand {
        ResourceHand::with_amounts(1, 1, 0, 0, 0)
    }

    /// Cost to build a settlement: 1 wood, 1 brick, 1 sheep, 1 wheat
    pub fn settlement() -> ResourceHand {
        ResourceHand::with_amounts(1, 1, 1, 1, 0)
    }

    /// Cost to upgrade to city: 2 wheat, 3 ore
    pub fn city() -> ResourceHand {
        ResourceHand::with_amounts(0, 0, 0, 2, 3)
    }
}

/// A single player's state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Player ID (index into the game's player list)
    pub id: PlayerId,
    /// Display name
    pub name: String,
    /// Player color
    pub color: PlayerColor,
    /// Whether the AI policy drives this player
    pub is_ai: bool,
    /// Current resources
    pub resources: ResourceHand,
    /// Settlement vertices, in placement order (the AI upgrades the oldest
    /// first, so order is meaningful)
    pub settlements: Vec<VertexId>,
    /// City vertices, in upgrade order
    pub cities: Vec<VertexId>,
    /// Placed road edges
    pub roads: Vec<EdgeId>,
}

impl Player {
    /// Create a new player with the starting inventory
    pub fn new(id: PlayerId, name: String, is_ai: bool) -> Self {
        Self {
            id,
            name,
            color: PlayerColor::for_player(id),
            is_ai,
            resources: ResourceHand::starting(),
            settlements: Vec::new(),
            cities: Vec::new(),
            roads: Vec::new(),
        }
    }

    /// Victory points: 1 per settlement, 2 per city. Always recomputed,
    /// never cached.
    pub fn victory_points(&self) -> u32 {
        self.settlements.len() as u32 + 2 * self.cities.len() as u32
    }

    /// Whether this player has a settlement on the vertex
    pub fn has_settlement(&self, vertex: VertexId) -> bool {
        self.settlements.contains(&vertex)
    }

    /// Whether this player has a city on the vertex
    pub fn has_city(&self, vertex: VertexId) -> bool {
        self.cities.contains(&vertex)
    }

    /// Whether this player has a settlement or city on the vertex
    pub fn occupies_vertex(&self, vertex: VertexId) -> bool {
        self.has_settlement(vertex) || self.has_city(vertex)
    }

    /// Whether this player already placed a road on the edge
    pub fn has_road(&self, edge: EdgeId) -> bool {
        self.roads.contains(&edge)
    }

    /// Whether the edge touches this player's network: shares an endpoint
    /// with one of their settlements, cities, or roads.
    pub fn network_touches(&self, edge: EdgeId) -> bool {
        self.settlements.iter().any(|&v| edge.touches(v))
            || self.cities.iter().any(|&v| edge.touches(v))
            || self.roads.iter().any(|r| r.shares_endpoint(&edge))
    }

    /// Can this player afford a road?
    pub fn can_afford_road(&self) -> bool {
        self.resources.can_afford(&costs::road())
    }

    /// Can this player afford a settlement?
    pub fn can_afford_settlement(&self) -> bool {
        self.resources.can_afford(&costs::settlement())
    }

    /// Can this player afford a city upgrade?
    pub fn can_afford_city(&self) -> bool {
        self.resources.can_afford(&costs::city())
    }

    /// Build a settlement: deduct the cost and record the vertex
    pub fn buy_settlement(&mut self, vertex: VertexId) {
        self.resources.subtract(&costs::settlement());
        self.settlements.push(vertex);
    }

    /// Place a settlement without paying (initial placement)
    pub fn place_free_settlement(&mut self, vertex: VertexId) {
        self.settlements.push(vertex);
    }

    /// Build a road: deduct the cost and record the edge
    pub fn buy_road(&mut self, edge: EdgeId) {
        self.resources.subtract(&costs::road());
        self.roads.push(edge);
    }

    /// Upgrade a settlement to a city: deduct the cost and move the vertex
    /// from settlements to cities. The vertex must be one of the player's
    /// settlements.
    pub fn buy_city(&mut self, vertex: VertexId) {
        self.resources.subtract(&costs::city());
        if let Some(pos) = self.settlements.iter().position(|&v| v == vertex) {
            self.settlements.remove(pos);
        }
        self.cities.push(vertex);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_hand_total() {
        let hand = ResourceHand::with_amounts(1, 2, 3, 4, 5);
        assert_eq!(hand.total(), 15);
    }

    #[test]
    fn test_starting_hand() {
        let hand = ResourceHand::starting();
        for resource in Resource::ALL {
            assert_eq!(hand.get(resource), 3);
        }
    }

    #[test]
    fn test_resource_hand_can_afford() {
        let hand = ResourceHand::with_amounts(2, 2, 2, 2, 2);
        let cost = ResourceHand::with_amounts(1, 1, 1, 1, 1);
        assert!(hand.can_afford(&cost));

        let expensive = ResourceHand::with_amounts(3, 0, 0, 0, 0);
        assert!(!hand.can_afford(&expensive));
    }

    #[test]
    fn test_resource_hand_subtract() {
        let mut hand = ResourceHand::with_amounts(3, 3, 3, 3, 3);
        let cost = ResourceHand::with_amounts(1, 1, 1, 1, 1);
        hand.subtract(&cost);
        assert_eq!(hand, ResourceHand::with_amounts(2, 2, 2, 2, 2));
    }

    #[test]
    fn test_building_costs() {
        assert_eq!(costs::road().total(), 2);
        assert_eq!(costs::settlement().total(), 4);
        assert_eq!(costs::city().total(), 5);
        assert_eq!(costs::city().wheat, 2);
        assert_eq!(costs::city().ore, 3);
    }

    #[test]
    fn test_victory_points() {
        let mut player = Player::new(0, "Test".to_string(), false);
        assert_eq!(player.victory_points(), 0);

        player.settlements.push(VertexId(0));
        player.settlements.push(VertexId(1));
        assert_eq!(player.victory_points(), 2);

        player.cities.push(VertexId(2));
        assert_eq!(player.victory_points(), 4);
    }

    #[test]
    fn test_buy_settlement_debits_cost() {
        let mut player = Player::new(0, "Test".to_string(), false);

        player.buy_settlement(VertexId(4));
        assert_eq!(player.resources, ResourceHand::with_amounts(2, 2, 2, 2, 3));
        assert!(player.has_settlement(VertexId(4)));
    }

    #[test]
    fn test_free_settlement_keeps_resources() {
        let mut player = Player::new(0, "Test".to_string(), false);

        player.place_free_settlement(VertexId(4));
        assert_eq!(player.resources, ResourceHand::starting());
        assert!(player.occupies_vertex(VertexId(4)));
    }

    #[test]
    fn test_buy_city_moves_vertex() {
        let mut player = Player::new(0, "Test".to_string(), false);
        player.place_free_settlement(VertexId(4));

        player.buy_city(VertexId(4));
        assert!(!player.has_settlement(VertexId(4)));
        assert!(player.has_city(VertexId(4)));
        assert!(player.occupies_vertex(VertexId(4)));
        assert_eq!(player.victory_points(), 2);
        assert_eq!(player.resources, ResourceHand::with_amounts(3, 3, 3, 1, 0));
    }

    #[test]
    fn test_network_touches() {
        let mut player = Player::new(0, "Test".to_string(), false);
        player.place_free_settlement(VertexId(4));

        // Edge with the settlement as an endpoint
        assert!(player.network_touches(EdgeId::new(VertexId(4), VertexId(5))));
        // Disconnected edge
        assert!(!player.network_touches(EdgeId::new(VertexId(7), VertexId(8))));

        // Road extends the network
        player.roads.push(EdgeId::new(VertexId(4), VertexId(5)));
        assert!(player.network_touches(EdgeId::new(VertexId(5), VertexId(6))));
    }
}
