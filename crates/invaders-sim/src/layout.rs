//! Level layout: the enemy formation and the walls for a round.

use glam::Vec2;

use invaders_core::config::SimConfig;
use invaders_core::constants::*;
use invaders_core::enums::Group;

use crate::ecs::Manager;
use crate::factory;

/// Sprite for each formation row, top to bottom.
const ROW_TEXTURES: [&str; FORMATION_ROWS] =
    ["enemy_top", "enemy_mid", "enemy_mid", "enemy_bottom"];

/// Replace the map and spawn a fresh formation for `round`.
///
/// Leftover map entities are destroyed first; refresh removes them along
/// with anything else destroyed this frame.
pub fn build(manager: &mut Manager, round: u32, config: &SimConfig) {
    let old_map: Vec<_> = manager.group(Group::Map).to_vec();
    for id in old_map {
        manager.destroy(id);
    }

    build_walls(manager, config);

    let top = formation_top(round);
    for (row, texture) in ROW_TEXTURES.iter().enumerate() {
        for col in 0..FORMATION_COLUMNS {
            let pos = Vec2::new(
                FORMATION_ORIGIN_X + col as f32 * FORMATION_SPACING,
                top + row as f32 * FORMATION_SPACING,
            );
            factory::create_enemy(manager, pos, SPRITE_SIZE, SPRITE_SIZE, texture);
        }
    }

    log::debug!(
        "round {round} layout: {} enemies, top row at y={top}",
        FORMATION_ROWS * FORMATION_COLUMNS
    );
}

/// Walls along the left and right playfield edges.
fn build_walls(manager: &mut Manager, config: &SimConfig) {
    let height = config.playfield_height;
    factory::create_wall(manager, Vec2::ZERO, WALL_THICKNESS, height, "wall");
    factory::create_wall(
        manager,
        Vec2::new(config.playfield_width - WALL_THICKNESS, 0.0),
        WALL_THICKNESS,
        height,
        "wall",
    );
}

/// Later rounds start lower, up to a cap.
pub fn formation_top(round: u32) -> f32 {
    let descent = round.saturating_sub(1).min(FORMATION_MAX_DESCENT_ROUNDS);
    FORMATION_ORIGIN_Y + descent as f32 * FORMATION_ROUND_DESCENT
}
