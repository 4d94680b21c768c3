//! Simulation engine for the invaders game.
//!
//! Owns the entity-component runtime, runs the per-frame systems and
//! produces `GameStateSnapshot`s. Rendering, input and frame timing are
//! supplied by the driver.

pub mod collision;
pub mod ecs;
pub mod engine;
pub mod factory;
pub mod layout;
pub mod state;
pub mod systems;

pub use engine::Game;
pub use invaders_core as core;

#[cfg(test)]
mod tests;
