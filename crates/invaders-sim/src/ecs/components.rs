//! Concrete component types.

use glam::Vec2;

use invaders_core::enums::ColliderTag;
use invaders_core::render::{Colour, RenderBackend};
use invaders_core::types::Rect;

use super::component::{Component, ComponentKind, Siblings};

/// Position, velocity and sprite box of an entity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Unscaled box size.
    pub width: f32,
    pub height: f32,
    pub scale: f32,
}

impl Transform {
    pub fn new(x: f32, y: f32, width: f32, height: f32, scale: f32) -> Self {
        Self {
            position: Vec2::new(x, y),
            velocity: Vec2::ZERO,
            width,
            height,
            scale,
        }
    }

    pub fn scaled_size(&self) -> Vec2 {
        Vec2::new(self.width * self.scale, self.height * self.scale)
    }

    /// Screen-space box at the current position.
    pub fn rect(&self) -> Rect {
        let size = self.scaled_size();
        Rect::from_origin(self.position, size.x, size.y)
    }

    pub(crate) fn update(&mut self) {
        self.position += self.velocity;
    }
}

/// Axis-aligned hit box that follows the sibling [`Transform`].
///
/// Only the size is stored; the box origin is read from the transform on
/// every query so it can never lag behind a position change.
#[derive(Debug, Clone, PartialEq)]
pub struct Collider {
    pub tag: ColliderTag,
    pub width: f32,
    pub height: f32,
    transform: Option<usize>,
}

impl Collider {
    pub fn new(tag: ColliderTag) -> Self {
        Self {
            tag,
            width: 0.0,
            height: 0.0,
            transform: None,
        }
    }

    pub(crate) fn init(&mut self, siblings: &mut Siblings<'_>) {
        let at = siblings.require::<Transform>(Self::NAME);
        if let Some(transform) = siblings.get::<Transform>(at) {
            let size = transform.scaled_size();
            self.width = size.x;
            self.height = size.y;
        }
        self.transform = Some(at);
    }

    /// Slot of the transform this collider follows.
    pub fn transform_slot(&self) -> Option<usize> {
        self.transform
    }

    pub fn bounds(&self, transform: &Transform) -> Rect {
        Rect::from_origin(transform.position, self.width, self.height)
    }
}

/// Straight-line shot. Pushes its velocity into the transform at init and
/// destroys its entity once it leaves the playfield vertically.
#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub velocity: Vec2,
    /// Lower edge of the playfield; the upper edge is 0.
    pub max_y: f32,
    collided: bool,
    transform: Option<usize>,
}

impl Projectile {
    pub fn new(velocity: Vec2, max_y: f32) -> Self {
        Self {
            velocity,
            max_y,
            collided: false,
            transform: None,
        }
    }

    pub fn has_collided(&self) -> bool {
        self.collided
    }

    /// One-way: there is no way to clear the flag.
    pub fn set_collided(&mut self) {
        self.collided = true;
    }

    pub(crate) fn init(&mut self, siblings: &mut Siblings<'_>) {
        let at = siblings.require::<Transform>(Self::NAME);
        if let Some(transform) = siblings.get_mut::<Transform>(at) {
            transform.velocity = self.velocity;
        }
        self.transform = Some(at);
    }

    pub(crate) fn update(&mut self, siblings: &mut Siblings<'_>) {
        let Some(y) = self
            .transform
            .and_then(|at| siblings.get::<Transform>(at))
            .map(|t| t.position.y)
        else {
            return;
        };
        if y < 0.0 || y > self.max_y {
            siblings.destroy();
        }
    }
}

/// Textured quad drawn at the sibling transform. Animated sprites step
/// through `frames` every `speed` simulation frames.
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    pub texture: String,
    pub frames: u32,
    speed: i32,
    frame_count: u64,
    transform: Option<usize>,
}

impl Sprite {
    pub fn new(texture: impl Into<String>) -> Self {
        Self {
            texture: texture.into(),
            frames: 1,
            speed: 1,
            frame_count: 0,
            transform: None,
        }
    }

    pub fn animated(texture: impl Into<String>, frames: u32, speed: i32) -> Self {
        Self {
            frames: frames.max(1),
            speed,
            ..Self::new(texture)
        }
    }

    pub fn set_frame_count(&mut self, frame_count: u64) {
        self.frame_count = frame_count;
    }

    pub fn set_speed(&mut self, speed: i32) {
        self.speed = speed;
    }

    pub fn current_frame(&self) -> u32 {
        if self.frames <= 1 || self.speed <= 0 {
            return 0;
        }
        ((self.frame_count / self.speed as u64) % self.frames as u64) as u32
    }

    pub(crate) fn init(&mut self, siblings: &mut Siblings<'_>) {
        self.transform = Some(siblings.require::<Transform>(Self::NAME));
    }

    pub(crate) fn draw(&self, components: &[Component], out: &mut dyn RenderBackend) {
        let Some(transform) = self
            .transform
            .and_then(|at| components.get(at))
            .and_then(Transform::from_component)
        else {
            return;
        };
        out.draw_sprite(&self.texture, self.current_frame(), transform.rect());
    }
}

/// On-screen text.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub position: Vec2,
    pub text: String,
    pub font: String,
    pub colour: Colour,
}

impl Label {
    pub fn new(
        x: f32,
        y: f32,
        text: impl Into<String>,
        font: impl Into<String>,
        colour: Colour,
    ) -> Self {
        Self {
            position: Vec2::new(x, y),
            text: text.into(),
            font: font.into(),
            colour,
        }
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub(crate) fn draw(&self, out: &mut dyn RenderBackend) {
        out.draw_text(&self.text, &self.font, self.position, self.colour);
    }
}

/// Player steering: turns the sampled horizontal intent into transform
/// velocity.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyboardController {
    pub speed: f32,
    intent: f32,
    transform: Option<usize>,
}

impl KeyboardController {
    pub fn new(speed: f32) -> Self {
        Self {
            speed,
            intent: 0.0,
            transform: None,
        }
    }

    pub fn set_intent(&mut self, move_x: f32) {
        self.intent = move_x.clamp(-1.0, 1.0);
    }

    pub(crate) fn init(&mut self, siblings: &mut Siblings<'_>) {
        self.transform = Some(siblings.require::<Transform>(Self::NAME));
    }

    pub(crate) fn update(&mut self, siblings: &mut Siblings<'_>) {
        let velocity = Vec2::new(self.intent * self.speed, 0.0);
        let Some(at) = self.transform else {
            return;
        };
        if let Some(transform) = siblings.get_mut::<Transform>(at) {
            transform.velocity = velocity;
        }
    }
}
