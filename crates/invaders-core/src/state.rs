//! Game state snapshot: the visible state after each frame.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::enums::GamePhase;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub frame: u64,
    pub phase: GamePhase,
    pub round: u32,
    pub score: u32,
    pub lives: i32,
    /// Frames between formation steps.
    pub enemy_speed: i32,
    pub enemies: usize,
    pub projectiles: usize,
    pub player: Option<Vec2>,
}
