//! Rendering backend boundary.
//!
//! The simulation decides what is drawn and in which order; a backend
//! turns the calls into pixels. `Vec<DrawCommand>` is a recording backend.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::types::Rect;

/// RGB colour.
pub type Colour = [u8; 3];

/// A single recorded draw call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DrawCommand {
    Clear,
    Sprite {
        texture: String,
        frame: u32,
        dest: Rect,
    },
    Text {
        text: String,
        font: String,
        origin: Vec2,
        colour: Colour,
    },
    Present,
}

/// Draw-call sink implemented by the rendering backend.
pub trait RenderBackend {
    fn clear_screen(&mut self);
    fn draw_sprite(&mut self, texture: &str, frame: u32, dest: Rect);
    fn draw_text(&mut self, text: &str, font: &str, origin: Vec2, colour: Colour);
    fn present(&mut self);
}

impl RenderBackend for Vec<DrawCommand> {
    fn clear_screen(&mut self) {
        self.push(DrawCommand::Clear);
    }

    fn draw_sprite(&mut self, texture: &str, frame: u32, dest: Rect) {
        self.push(DrawCommand::Sprite {
            texture: texture.to_owned(),
            frame,
            dest,
        });
    }

    fn draw_text(&mut self, text: &str, font: &str, origin: Vec2, colour: Colour) {
        self.push(DrawCommand::Text {
            text: text.to_owned(),
            font: font.to_owned(),
            origin,
            colour,
        });
    }

    fn present(&mut self) {
        self.push(DrawCommand::Present);
    }
}
