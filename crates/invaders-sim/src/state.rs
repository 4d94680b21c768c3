//! Round and game state owned by the simulation.

use invaders_core::config::SimConfig;
use invaders_core::constants::{BASE_ENEMY_SPEED, ENEMY_SPEED_PER_ROUND, MIN_ENEMY_SPEED};
use invaders_core::enums::GamePhase;

/// Everything the per-frame systems read and write besides the entities.
/// Passed explicitly into each system.
#[derive(Debug, Clone, PartialEq)]
pub struct RoundState {
    pub phase: GamePhase,
    pub round: u32,
    pub score: u32,
    pub lives: i32,
    /// Frames between formation steps.
    pub enemy_speed: i32,
    /// A formation member reached a bound on the last lateral step.
    pub reverse_check: bool,
    /// Formation is moving left.
    pub reverse_direction: bool,
    pub frame_count: u64,
    /// Frame at which the next enemy shot is due.
    pub next_enemy_fire_tick: u64,
    /// Player asked to fire and no shot has consumed the request yet.
    pub fire_requested: bool,
    /// One-time terminal setup has run.
    pub game_end_check: bool,
}

impl RoundState {
    pub fn new(config: &SimConfig, first_fire_tick: u64) -> Self {
        Self {
            phase: GamePhase::Playing,
            round: 1,
            score: 0,
            lives: config.starting_lives,
            enemy_speed: config.initial_enemy_speed,
            reverse_check: false,
            reverse_direction: false,
            frame_count: 0,
            next_enemy_fire_tick: first_fire_tick,
            fire_requested: false,
            game_end_check: false,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// One-way transition into `GameOver`.
    pub fn end_game(&mut self) {
        if self.phase != GamePhase::GameOver {
            log::info!(
                "game over: round {}, score {}, lives {}",
                self.round,
                self.score,
                self.lives
            );
        }
        self.phase = GamePhase::GameOver;
    }

    /// Formation speed slows to the round-start value for the new round.
    pub fn advance_round(&mut self, bonus: u32) {
        self.round += 1;
        self.score += bonus;
        self.enemy_speed = enemy_speed_for_round(self.round);
        self.reverse_check = false;
        self.reverse_direction = false;
    }

    pub fn score_text(&self) -> String {
        format!("Score: {}", self.score)
    }

    pub fn lives_text(&self) -> String {
        format!("Lives: {}", self.lives)
    }
}

/// Frames between formation steps at the start of `round`.
pub fn enemy_speed_for_round(round: u32) -> i32 {
    let round = i32::try_from(round).unwrap_or(i32::MAX);
    BASE_ENEMY_SPEED
        .saturating_sub(ENEMY_SPEED_PER_ROUND.saturating_mul(round))
        .max(MIN_ENEMY_SPEED)
}
