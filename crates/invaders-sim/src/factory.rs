//! Entity factories for each archetype.
//!
//! Components go on in a fixed order (Transform first) so that sibling
//! lookups in `init` always succeed.

use glam::Vec2;

use invaders_core::config::SimConfig;
use invaders_core::constants::*;
use invaders_core::enums::{ColliderTag, Group};

use crate::ecs::{
    Collider, EntityId, KeyboardController, Label, Manager, Projectile, Sprite, Transform,
};

/// Frames in every enemy sprite sheet.
const ENEMY_ANIMATION_FRAMES: u32 = 2;

/// Player ship at its spawn point.
pub fn create_player(manager: &mut Manager, config: &SimConfig) -> EntityId {
    let (x, y) = PLAYER_START;
    let id = manager.create_entity();
    manager.add_component(id, Transform::new(x, y, SPRITE_SIZE, SPRITE_SIZE, SPRITE_SCALE));
    manager.add_component(id, Sprite::new("player"));
    manager.add_component(id, KeyboardController::new(config.player_speed));
    manager.add_component(id, Collider::new(ColliderTag::Player));
    manager.add_to_group(id, Group::Players);
    id
}

/// Ungrouped text entity in the default font and colour.
pub fn create_label(manager: &mut Manager, (x, y): (f32, f32), text: &str) -> EntityId {
    let id = manager.create_entity();
    manager.add_component(id, Label::new(x, y, text, LABEL_FONT, LABEL_COLOUR));
    id
}

pub fn create_wall(
    manager: &mut Manager,
    pos: Vec2,
    width: f32,
    height: f32,
    texture: &str,
) -> EntityId {
    let id = manager.create_entity();
    manager.add_component(id, Transform::new(pos.x, pos.y, width, height, 1.0));
    manager.add_component(id, Sprite::new(texture));
    manager.add_component(id, Collider::new(ColliderTag::Wall));
    manager.add_to_group(id, Group::Map);
    log::trace!("wall {id} at {pos}");
    id
}

/// Enemy with an animated sprite. `width`/`height` are the unscaled sprite
/// size; enemies are drawn at [`SPRITE_SCALE`].
pub fn create_enemy(
    manager: &mut Manager,
    pos: Vec2,
    width: f32,
    height: f32,
    texture: &str,
) -> EntityId {
    let id = manager.create_entity();
    manager.add_component(id, Transform::new(pos.x, pos.y, width, height, SPRITE_SCALE));
    manager.add_component(
        id,
        Sprite::animated(texture, ENEMY_ANIMATION_FRAMES, BASE_ENEMY_SPEED),
    );
    manager.add_component(id, Collider::new(ColliderTag::Enemy));
    manager.add_to_group(id, Group::Enemies);
    id
}

/// Projectile travelling at `velocity`; despawns when it leaves
/// `[0, max_y]` vertically.
pub fn create_projectile(
    manager: &mut Manager,
    pos: Vec2,
    velocity: Vec2,
    tag: ColliderTag,
    max_y: f32,
) -> EntityId {
    let id = manager.create_entity();
    manager.add_component(
        id,
        Transform::new(pos.x, pos.y, PROJECTILE_WIDTH, PROJECTILE_HEIGHT, 1.0),
    );
    manager.add_component(id, Sprite::new("projectile"));
    manager.add_component(id, Projectile::new(velocity, max_y));
    manager.add_component(id, Collider::new(tag));
    manager.add_to_group(id, Group::Projectiles);
    log::debug!("{tag} {id} spawned at {pos}");
    id
}
