//! Simulation constants and tuning defaults.
//!
//! Values here seed [`crate::config::SimConfig`]; code that needs a value
//! the player could tune reads it from the config instead.

/// Frame rate the driver targets (Hz).
pub const FRAME_RATE: u32 = 60;

// --- Playfield ---

/// Playfield width in pixels.
pub const PLAYFIELD_WIDTH: f32 = 480.0;

/// Playfield height in pixels. Projectiles outside `[0, height]` despawn.
pub const PLAYFIELD_HEIGHT: f32 = 640.0;

/// Enemy y at or below which the invasion has landed.
pub const LOSS_LINE_Y: f32 = 568.0;

/// Left formation bounce bound.
pub const FORMATION_MIN_X: f32 = 8.0;

/// Right formation bounce bound.
pub const FORMATION_MAX_X: f32 = 438.0;

// --- Formation ---

/// Lateral distance covered by one formation step.
pub const FORMATION_STEP_X: f32 = 8.0;

/// Vertical drop applied on a bounce tick.
pub const FORMATION_DROP_Y: f32 = 48.0;

/// Frames between formation steps at round 0.
pub const BASE_ENEMY_SPEED: i32 = 60;

/// Frames shaved off the step interval per round.
pub const ENEMY_SPEED_PER_ROUND: i32 = 5;

/// Fastest the formation ever steps (frames).
pub const MIN_ENEMY_SPEED: i32 = 10;

// --- Sprites ---

/// Native sprite edge length in pixels.
pub const SPRITE_SIZE: f32 = 16.0;

/// Scale applied to player and enemy sprites.
pub const SPRITE_SCALE: f32 = 2.0;

/// Player spawn point.
pub const PLAYER_START: (f32, f32) = (240.0, 600.0);

/// Horizontal pixels per frame while a direction is held.
pub const PLAYER_SPEED: f32 = 3.0;

/// Horizontal offset from a shooter's origin to its muzzle.
pub const MUZZLE_OFFSET_X: f32 = 15.0;

/// Projectile box width.
pub const PROJECTILE_WIDTH: f32 = 2.0;

/// Projectile box height.
pub const PROJECTILE_HEIGHT: f32 = 8.0;

/// Player projectile vertical velocity (negative is up).
pub const PLAYER_PROJECTILE_SPEED: f32 = -3.0;

/// Enemy projectile vertical velocity.
pub const ENEMY_PROJECTILE_SPEED: f32 = 2.0;

// --- Enemy fire ---

/// Upper bound of the first enemy fire threshold and of the increment at round 0.
pub const ENEMY_FIRE_BASE_SPAN: i64 = 240;

/// Increment span removed per round.
pub const ENEMY_FIRE_SPAN_PER_ROUND: i64 = 10;

/// Floor for the increment span so late rounds still space shots out.
pub const ENEMY_FIRE_MIN_SPAN: i64 = 10;

/// Starting chance denominator for the weighted firing-enemy pick.
pub const ENEMY_FIRE_MAX_CHANCE: u32 = 20;

// --- Scoring ---

pub const STARTING_LIVES: i32 = 3;
pub const ENEMY_KILL_SCORE: u32 = 10;
pub const ROUND_CLEAR_SCORE: u32 = 100;

// --- Layout ---

pub const FORMATION_ROWS: usize = 4;
pub const FORMATION_COLUMNS: usize = 8;

/// Distance between neighbouring enemy origins.
pub const FORMATION_SPACING: f32 = 40.0;

/// x of the first formation column.
pub const FORMATION_ORIGIN_X: f32 = 80.0;

/// y of the top formation row in round 1.
pub const FORMATION_ORIGIN_Y: f32 = 64.0;

/// Extra starting depth per round after the first.
pub const FORMATION_ROUND_DESCENT: f32 = 16.0;

/// Rounds after which the starting depth stops growing.
pub const FORMATION_MAX_DESCENT_ROUNDS: u32 = 6;

/// Width of the boundary walls that confine the player.
pub const WALL_THICKNESS: f32 = 8.0;

// --- Labels ---

pub const LABEL_FONT: &str = "verdana";
pub const LABEL_COLOUR: [u8; 3] = [255, 255, 255];
pub const SCORE_LABEL_POS: (f32, f32) = (8.0, 8.0);
pub const LIVES_LABEL_POS: (f32, f32) = (408.0, 8.0);
pub const GAME_OVER_LABEL_POS: (f32, f32) = (190.0, 256.0);
pub const QUIT_LABEL_POS: (f32, f32) = (190.0, 272.0);
