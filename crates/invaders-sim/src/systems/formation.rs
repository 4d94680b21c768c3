//! Enemy formation movement.
//!
//! Every `enemy_speed` frames the formation either steps sideways or, if
//! the previous step reached a bound, drops one row, speeds up and turns.

use glam::Vec2;

use invaders_core::config::SimConfig;
use invaders_core::enums::Group;

use crate::ecs::{EntityId, Manager, Transform};
use crate::state::RoundState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormationStep {
    Idle,
    Lateral,
    Drop,
}

pub fn run(manager: &mut Manager, state: &mut RoundState, config: &SimConfig) -> FormationStep {
    let interval = state.enemy_speed.max(1) as u64;
    if state.frame_count % interval != 0 {
        return FormationStep::Idle;
    }

    let enemies: Vec<EntityId> = manager
        .group(Group::Enemies)
        .iter()
        .copied()
        .filter(|&id| manager.is_alive(id))
        .collect();

    if state.reverse_check {
        shift(manager, &enemies, Vec2::new(0.0, config.formation_drop_y));
        state.enemy_speed = faster(state.enemy_speed);
        state.reverse_direction = !state.reverse_direction;
        state.reverse_check = false;
        log::debug!("formation dropped, speed now {}", state.enemy_speed);
        return FormationStep::Drop;
    }

    let dx = if state.reverse_direction {
        -config.formation_step_x
    } else {
        config.formation_step_x
    };
    for x in shift(manager, &enemies, Vec2::new(dx, 0.0)) {
        if x <= config.formation_min_x || x >= config.formation_max_x {
            state.reverse_check = true;
        }
    }
    FormationStep::Lateral
}

/// Move every enemy by `delta`; returns their new x positions.
fn shift(manager: &mut Manager, enemies: &[EntityId], delta: Vec2) -> Vec<f32> {
    enemies
        .iter()
        .map(|&id| {
            let transform = manager.entity_mut(id).get_mut::<Transform>();
            transform.position += delta;
            transform.position.x
        })
        .collect()
}

/// Step interval after a bounce.
fn faster(speed: i32) -> i32 {
    if speed > 20 {
        speed - 10
    } else if speed > 10 {
        speed - 5
    } else {
        speed
    }
}
