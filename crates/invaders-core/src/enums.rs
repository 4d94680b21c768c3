//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Entity categories with their own secondary index in the manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Group {
    Players,
    Enemies,
    Map,
    Projectiles,
}

impl Group {
    pub const COUNT: usize = 4;

    pub const ALL: [Group; Group::COUNT] =
        [Group::Players, Group::Enemies, Group::Map, Group::Projectiles];

    /// Slot in per-group index arrays.
    pub fn index(self) -> usize {
        match self {
            Group::Players => 0,
            Group::Enemies => 1,
            Group::Map => 2,
            Group::Projectiles => 3,
        }
    }
}

/// Collider tag; the simulation branches collision response on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ColliderTag {
    Player,
    Wall,
    Enemy,
    #[serde(rename = "Projectile_P")]
    PlayerProjectile,
    #[serde(rename = "Projectile_E")]
    EnemyProjectile,
}

impl ColliderTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColliderTag::Player => "Player",
            ColliderTag::Wall => "Wall",
            ColliderTag::Enemy => "Enemy",
            ColliderTag::PlayerProjectile => "Projectile_P",
            ColliderTag::EnemyProjectile => "Projectile_E",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Player" => Some(ColliderTag::Player),
            "Wall" => Some(ColliderTag::Wall),
            "Enemy" => Some(ColliderTag::Enemy),
            "Projectile_P" => Some(ColliderTag::PlayerProjectile),
            "Projectile_E" => Some(ColliderTag::EnemyProjectile),
            _ => None,
        }
    }
}

impl std::fmt::Display for ColliderTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Top-level game phase. `GameOver` is terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Playing,
    GameOver,
}
