//! Enemy AI fire.
//!
//! Shots come at random intervals that shorten with the round. The shooter
//! is picked by repeated passes over the formation where each enemy fires
//! with probability `1/chance`, `chance` counting down from
//! [`ENEMY_FIRE_MAX_CHANCE`]. Earlier enemies in group order are favoured.

use glam::Vec2;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use invaders_core::config::SimConfig;
use invaders_core::constants::*;
use invaders_core::enums::{ColliderTag, Group};

use crate::ecs::{EntityId, Manager, Transform};
use crate::factory;
use crate::state::RoundState;

/// Span of the random increment added to the fire threshold.
pub fn fire_interval_span(round: u32) -> i64 {
    (ENEMY_FIRE_BASE_SPAN - round as i64 * ENEMY_FIRE_SPAN_PER_ROUND).max(ENEMY_FIRE_MIN_SPAN)
}

/// Fire at most one enemy projectile. Returns the new projectile.
pub fn run(
    manager: &mut Manager,
    state: &mut RoundState,
    rng: &mut ChaCha8Rng,
    config: &SimConfig,
) -> Option<EntityId> {
    if state.frame_count < state.next_enemy_fire_tick {
        return None;
    }
    state.next_enemy_fire_tick += rng.gen_range(0..fire_interval_span(state.round)) as u64;

    let candidates: Vec<EntityId> = manager
        .group(Group::Enemies)
        .iter()
        .copied()
        .filter(|&id| manager.is_alive(id))
        .collect();
    let shooter = pick_shooter(&candidates, rng)?;

    let origin = manager.entity(shooter).get::<Transform>().position;
    let projectile = factory::create_projectile(
        manager,
        Vec2::new(origin.x + MUZZLE_OFFSET_X, origin.y),
        Vec2::new(0.0, config.enemy_projectile_speed),
        ColliderTag::EnemyProjectile,
        config.playfield_height,
    );
    Some(projectile)
}

/// Weighted retry over `enemies`. `None` only when `enemies` is empty,
/// since the last pass fires with certainty.
pub fn pick_shooter(enemies: &[EntityId], rng: &mut ChaCha8Rng) -> Option<EntityId> {
    for chance in (1..=ENEMY_FIRE_MAX_CHANCE).rev() {
        for &id in enemies {
            if rng.gen_range(0..chance) == 0 {
                return Some(id);
            }
        }
    }
    None
}
