//! Headless Homestead simulation.
//!
//! Runs a full AI-vs-AI game on the classic board and narrates every event
//! through tracing. `GAME_SEED` fixes the dice for reproducible runs,
//! `MAX_TURNS` caps the main phase, and `DUMP_STATE=1` prints the final
//! game snapshot as JSON on stdout.

use anyhow::Context;
use homestead_core::{AiPolicy, Board, GameEvent, GamePhase, GameState, PlayerSpec};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_MAX_TURNS: u32 = 500;

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let max_turns: u32 = match std::env::var("MAX_TURNS") {
        Ok(raw) => raw.parse().context("MAX_TURNS must be a number")?,
        Err(_) => DEFAULT_MAX_TURNS,
    };

    let roster = vec![
        PlayerSpec::ai("Player 1"),
        PlayerSpec::ai("AI 1"),
        PlayerSpec::ai("AI 2"),
    ];

    let mut game = match std::env::var("GAME_SEED") {
        Ok(raw) => {
            let seed: u64 = raw.parse().context("GAME_SEED must be a number")?;
            info!(seed, "starting seeded game");
            GameState::with_seed(Board::classic(), roster, seed)
        }
        Err(_) => {
            info!("starting game with random dice");
            GameState::new(Board::classic(), roster)
        }
    };

    let policy = AiPolicy::new();

    // Initial placements: one settlement and one road per player
    while matches!(game.phase, GamePhase::Setup { .. }) {
        let player = game.current_player;
        let action = policy.decide(&game, player);
        let events = game
            .request_action(player, action)
            .context("setup placement failed")?;
        log_events(&game, &events);
    }
    info!("setup complete, entering main phase");

    while !game.is_finished() && game.turn_number <= max_turns {
        let player = game.current_player;
        let events = policy
            .take_turn(&mut game, player)
            .context("turn failed")?;
        log_events(&game, &events);
    }

    match game.get_winner() {
        Some(winner) => {
            let name = player_name(&game, winner);
            info!(winner = %name, "game over");
        }
        None => warn!(max_turns, "turn cap reached without a winner"),
    }
    for player in &game.players {
        info!(
            name = %player.name,
            victory_points = player.victory_points(),
            settlements = player.settlements.len(),
            cities = player.cities.len(),
            roads = player.roads.len(),
            resources = player.resources.total(),
            "final standing"
        );
    }

    if std::env::var("DUMP_STATE").as_deref() == Ok("1") {
        println!("{}", serde_json::to_string_pretty(&game.snapshot())?);
    }

    Ok(())
}

fn player_name(game: &GameState, id: u8) -> String {
    game.get_player(id)
        .map(|p| p.name.clone())
        .unwrap_or_else(|| format!("player {id}"))
}

fn log_events(game: &GameState, events: &[GameEvent]) {
    for event in events {
        match event {
            GameEvent::SettlementBuilt {
                player,
                vertex,
                free,
            } => {
                info!(
                    player = %player_name(game, *player),
                    vertex = vertex.index(),
                    free,
                    "settlement built"
                );
            }
            GameEvent::RoadBuilt { player, edge } => {
                let [a, b] = edge.endpoints();
                info!(
                    player = %player_name(game, *player),
                    from = a.index(),
                    to = b.index(),
                    "road built"
                );
            }
            GameEvent::CityBuilt { player, vertex } => {
                info!(
                    player = %player_name(game, *player),
                    vertex = vertex.index(),
                    "city built"
                );
            }
            GameEvent::DiceRolled { player, roll, total } => {
                info!(
                    player = %player_name(game, *player),
                    die1 = roll.0,
                    die2 = roll.1,
                    total,
                    "dice rolled"
                );
            }
            GameEvent::ResourcesDistributed { distributions } => {
                for (player, resource, amount) in distributions {
                    info!(
                        player = %player_name(game, *player),
                        resource = ?resource,
                        amount,
                        "resources gained"
                    );
                }
            }
            GameEvent::TurnEnded { player, next_player } => {
                info!(
                    player = %player_name(game, *player),
                    next = %player_name(game, *next_player),
                    turn = game.turn_number,
                    "turn ended"
                );
            }
            GameEvent::GameWon {
                player,
                victory_points,
            } => {
                info!(
                    player = %player_name(game, *player),
                    victory_points,
                    "victory"
                );
            }
        }
    }
}
