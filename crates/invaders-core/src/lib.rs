//! Core types and definitions for the invaders simulation.
//!
//! This crate defines the vocabulary shared across the other crates:
//! geometry, groups and tags, input frames, draw commands, state
//! snapshots, configuration and constants. It has no runtime behaviour.

pub mod config;
pub mod constants;
pub mod enums;
pub mod input;
pub mod render;
pub mod state;
pub mod types;

pub use glam::{vec2, Vec2};
