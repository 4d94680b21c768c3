//! Per-frame systems.
//!
//! Systems are free functions over the [`crate::ecs::Manager`] and the
//! [`crate::state::RoundState`]. They hold no state of their own.

pub mod collisions;
pub mod enemy_fire;
pub mod formation;
pub mod player_fire;
pub mod round;
