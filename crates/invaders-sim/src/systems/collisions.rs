//! Collision response.
//!
//! One pass over the collider index in registration order:
//! - walls push the player back to where it stood before this frame's update;
//! - enemy shots that hit the player cost a life;
//! - a player shot destroys the first live enemy it overlaps.
//!
//! A projectile flagged as collided is skipped, so a shot already queued for
//! removal can never hit twice before refresh.

use glam::Vec2;

use invaders_core::constants::ENEMY_KILL_SCORE;
use invaders_core::enums::{ColliderTag, Group};

use crate::collision::aabb;
use crate::ecs::{Collider, EntityId, Manager, Projectile, Transform};
use crate::state::RoundState;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollisionResult {
    pub player_blocked: bool,
    pub player_hits: u32,
    pub enemies_destroyed: Vec<EntityId>,
}

pub fn run(
    manager: &mut Manager,
    state: &mut RoundState,
    player: EntityId,
    player_before_update: Vec2,
) -> CollisionResult {
    let mut result = CollisionResult::default();
    let colliders = manager.colliders().to_vec();

    for id in colliders {
        let Some(entity) = manager.get(id) else {
            continue;
        };
        let tag = entity.get::<Collider>().tag;
        let spent = entity
            .try_get::<Projectile>()
            .is_some_and(Projectile::has_collided)
            || !entity.is_alive();

        match tag {
            ColliderTag::Wall if !spent => {
                if overlaps(manager, player, id) {
                    manager.entity_mut(player).get_mut::<Transform>().position =
                        player_before_update;
                    result.player_blocked = true;
                }
            }
            ColliderTag::EnemyProjectile if !spent => {
                if overlaps(manager, player, id) {
                    spend_projectile(manager, id);
                    state.lives -= 1;
                    result.player_hits += 1;
                    log::debug!("player hit by {id}, lives {}", state.lives);
                    if state.lives <= 0 {
                        state.end_game();
                    }
                }
            }
            ColliderTag::PlayerProjectile if !spent => {
                let target = manager
                    .group(Group::Enemies)
                    .iter()
                    .copied()
                    .find(|&enemy| manager.is_alive(enemy) && overlaps(manager, enemy, id));
                if let Some(enemy) = target {
                    spend_projectile(manager, id);
                    manager.destroy(enemy);
                    state.score += ENEMY_KILL_SCORE;
                    result.enemies_destroyed.push(enemy);
                    log::debug!("{id} destroyed enemy {enemy}, score {}", state.score);
                }
            }
            _ => {}
        }
    }

    result
}

fn overlaps(manager: &Manager, a: EntityId, b: EntityId) -> bool {
    match (manager.collider_bounds(a), manager.collider_bounds(b)) {
        (Some(a), Some(b)) => aabb(&a, &b),
        _ => false,
    }
}

fn spend_projectile(manager: &mut Manager, id: EntityId) {
    let entity = manager.entity_mut(id);
    entity.destroy();
    entity.get_mut::<Projectile>().set_collided();
}
