//! Headless driver for the invaders simulation.
//!
//! Runs the `Game` entry points at a fixed frame rate with a scripted input
//! source and a draw-call counting backend.

pub mod game_loop;

pub use invaders_core as core;
