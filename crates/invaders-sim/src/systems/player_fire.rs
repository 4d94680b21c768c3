//! Player shots: one in flight at a time.

use glam::Vec2;

use invaders_core::config::SimConfig;
use invaders_core::constants::MUZZLE_OFFSET_X;
use invaders_core::enums::{ColliderTag, Group};

use crate::ecs::{Collider, EntityId, Manager, Transform};

/// A live player projectile is still in flight.
pub fn shot_in_flight(manager: &Manager) -> bool {
    manager.group(Group::Projectiles).iter().any(|&id| {
        let entity = manager.entity(id);
        entity.is_alive() && entity.get::<Collider>().tag == ColliderTag::PlayerProjectile
    })
}

/// Consume a pending fire request. While a shot is in flight the request is
/// dropped rather than queued.
pub fn run(
    manager: &mut Manager,
    fire_requested: &mut bool,
    player: EntityId,
    config: &SimConfig,
) -> Option<EntityId> {
    if shot_in_flight(manager) {
        *fire_requested = false;
    }
    if !*fire_requested {
        return None;
    }
    *fire_requested = false;

    let origin = manager.entity(player).get::<Transform>().position;
    Some(crate::factory::create_projectile(
        manager,
        Vec2::new(origin.x + MUZZLE_OFFSET_X, origin.y),
        Vec2::new(0.0, config.player_projectile_speed),
        ColliderTag::PlayerProjectile,
        config.playfield_height,
    ))
}
