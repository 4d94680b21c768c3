//! Per-frame input sample handed to the simulation.
//!
//! Device polling and key translation live in the input backend; the
//! simulation only ever sees an [`InputFrame`].

use serde::{Deserialize, Serialize};

/// What the player asked for this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InputFrame {
    /// Horizontal intent: -1.0 left, 0.0 idle, 1.0 right.
    pub move_x: f32,
    /// Fire button pressed this frame.
    pub fire: bool,
    /// Quit requested (window closed or escape).
    pub quit: bool,
}

impl InputFrame {
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn fire() -> Self {
        Self {
            fire: true,
            ..Self::default()
        }
    }

    pub fn moving(move_x: f32) -> Self {
        Self {
            move_x: move_x.clamp(-1.0, 1.0),
            ..Self::default()
        }
    }
}

/// Source of input frames, one call per frame.
pub trait InputSource {
    fn poll(&mut self) -> InputFrame;
}
