//! Simulation configuration.
//!
//! Every field has a default from [`crate::constants`]; a JSON file only
//! needs to name the values it overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::*;

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Configuration for starting a new game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimConfig {
    /// RNG seed. Same seed and same inputs give the same game.
    pub seed: u64,
    pub playfield_width: f32,
    pub playfield_height: f32,
    pub loss_line_y: f32,
    pub formation_min_x: f32,
    pub formation_max_x: f32,
    pub formation_step_x: f32,
    pub formation_drop_y: f32,
    /// Frames between formation steps in round one.
    pub initial_enemy_speed: i32,
    pub player_speed: f32,
    pub player_projectile_speed: f32,
    pub enemy_projectile_speed: f32,
    pub starting_lives: i32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            playfield_width: PLAYFIELD_WIDTH,
            playfield_height: PLAYFIELD_HEIGHT,
            loss_line_y: LOSS_LINE_Y,
            formation_min_x: FORMATION_MIN_X,
            formation_max_x: FORMATION_MAX_X,
            formation_step_x: FORMATION_STEP_X,
            formation_drop_y: FORMATION_DROP_Y,
            initial_enemy_speed: BASE_ENEMY_SPEED - ENEMY_SPEED_PER_ROUND,
            player_speed: PLAYER_SPEED,
            player_projectile_speed: PLAYER_PROJECTILE_SPEED,
            enemy_projectile_speed: ENEMY_PROJECTILE_SPEED,
            starting_lives: STARTING_LIVES,
        }
    }
}

impl SimConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.playfield_width <= 0.0 || self.playfield_height <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "playfield must be positive, got {}x{}",
                self.playfield_width, self.playfield_height
            )));
        }
        if self.formation_min_x >= self.formation_max_x {
            return Err(ConfigError::Invalid(format!(
                "formation bounds inverted: [{}, {}]",
                self.formation_min_x, self.formation_max_x
            )));
        }
        if self.loss_line_y <= 0.0 || self.loss_line_y > self.playfield_height {
            return Err(ConfigError::Invalid(format!(
                "loss line {} outside playfield",
                self.loss_line_y
            )));
        }
        if self.formation_step_x <= 0.0 || self.formation_drop_y <= 0.0 {
            return Err(ConfigError::Invalid(
                "formation steps must be positive".into(),
            ));
        }
        if self.initial_enemy_speed <= 0 {
            return Err(ConfigError::Invalid(format!(
                "initial enemy speed must be positive, got {}",
                self.initial_enemy_speed
            )));
        }
        if self.player_projectile_speed >= 0.0 || self.enemy_projectile_speed <= 0.0 {
            return Err(ConfigError::Invalid(
                "player shots must travel up and enemy shots down".into(),
            ));
        }
        if self.starting_lives <= 0 {
            return Err(ConfigError::Invalid(format!(
                "starting lives must be positive, got {}",
                self.starting_lives
            )));
        }
        Ok(())
    }
}
