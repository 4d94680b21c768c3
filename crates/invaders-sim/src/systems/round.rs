//! Round-advance and invasion-landed checks.

use invaders_core::config::SimConfig;
use invaders_core::constants::ROUND_CLEAR_SCORE;
use invaders_core::enums::Group;

use crate::ecs::{Manager, Transform};
use crate::layout;
use crate::state::RoundState;

/// What the round check decided this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundOutcome {
    Continue,
    Advanced,
    Landed,
}

/// Start the next round when the formation is gone, or end the game when
/// any enemy has reached the loss line.
pub fn run(manager: &mut Manager, state: &mut RoundState, config: &SimConfig) -> RoundOutcome {
    if manager.group_size(Group::Enemies) == 0 {
        state.advance_round(ROUND_CLEAR_SCORE);
        layout::build(manager, state.round, config);
        log::info!(
            "round {} begins: score {}, enemy speed {}",
            state.round,
            state.score,
            state.enemy_speed
        );
        return RoundOutcome::Advanced;
    }

    let landed = manager.group(Group::Enemies).iter().any(|&id| {
        let enemy = manager.entity(id);
        enemy.is_alive() && enemy.get::<Transform>().position.y >= config.loss_line_y
    });
    if landed {
        state.end_game();
        return RoundOutcome::Landed;
    }

    RoundOutcome::Continue
}
