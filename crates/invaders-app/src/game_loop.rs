//! Fixed-rate frame loop over the simulation engine.
//!
//! Each frame runs `handle_input`, `update`, `render` and `check_terminal`
//! in order, then sleeps out the rest of the frame budget.

use std::thread;
use std::time::{Duration, Instant};

use invaders_core::constants::FRAME_RATE;
use invaders_core::enums::GamePhase;
use invaders_core::input::{InputFrame, InputSource};
use invaders_core::render::{Colour, RenderBackend};
use invaders_core::state::GameStateSnapshot;
use invaders_core::types::Rect;
use invaders_core::Vec2;
use invaders_sim::Game;

/// Nominal duration of one frame.
pub const FRAME_DURATION: Duration = Duration::from_nanos(1_000_000_000 / FRAME_RATE as u64);

/// How the loop is paced and when it gives up.
#[derive(Debug, Clone, Copy)]
pub struct LoopOptions {
    /// Sleep to hold the frame rate. Off for as-fast-as-possible runs.
    pub realtime: bool,
    /// Stop after this many frames even if nobody quit.
    pub max_frames: Option<u64>,
    /// Log a snapshot every this many frames (0 disables).
    pub snapshot_every: u64,
    /// Keep the end screen up this many frames after game over, then stop.
    pub game_over_frames: u64,
}

impl Default for LoopOptions {
    fn default() -> Self {
        Self {
            realtime: true,
            max_frames: None,
            snapshot_every: FRAME_RATE as u64,
            game_over_frames: FRAME_RATE as u64,
        }
    }
}

/// Render backend that only counts what it is asked to draw.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadlessRenderer {
    pub frames: u64,
    pub sprites: u64,
    pub texts: u64,
}

impl RenderBackend for HeadlessRenderer {
    fn clear_screen(&mut self) {}

    fn draw_sprite(&mut self, _texture: &str, _frame: u32, _dest: Rect) {
        self.sprites += 1;
    }

    fn draw_text(&mut self, _text: &str, _font: &str, _origin: Vec2, _colour: Colour) {
        self.texts += 1;
    }

    fn present(&mut self) {
        self.frames += 1;
    }
}

/// Scripted player: sweeps across the field firing steadily.
#[derive(Debug, Clone)]
pub struct Autopilot {
    frame: u64,
    sweep_frames: u64,
}

impl Autopilot {
    pub fn new(sweep_frames: u64) -> Self {
        Self {
            frame: 0,
            sweep_frames: sweep_frames.max(1),
        }
    }
}

impl InputSource for Autopilot {
    fn poll(&mut self) -> InputFrame {
        let frame = self.frame;
        self.frame += 1;

        let direction = if (frame / self.sweep_frames) % 2 == 0 { 1.0 } else { -1.0 };
        InputFrame {
            move_x: direction,
            fire: frame % 4 == 0,
            quit: false,
        }
    }
}

/// Run frames until input asks to quit, the end screen has been shown for
/// `game_over_frames`, or `max_frames` is reached. Returns the last snapshot.
pub fn run_game_loop(
    game: &mut Game,
    input: &mut impl InputSource,
    out: &mut dyn RenderBackend,
    options: LoopOptions,
) -> GameStateSnapshot {
    let mut snapshot = game.snapshot();
    let mut next_frame_time = Instant::now();
    let mut frames = 0u64;
    let mut game_over_at: Option<u64> = None;

    while game.running() {
        if options.max_frames.is_some_and(|max| frames >= max) {
            log::info!("frame limit {frames} reached");
            break;
        }

        snapshot = game.tick(input.poll(), out);
        frames += 1;
        if snapshot.phase == GamePhase::GameOver {
            let since = *game_over_at.get_or_insert(frames);
            if frames - since >= options.game_over_frames {
                log::info!("game over shown for {} frames, stopping", frames - since);
                break;
            }
        }

        if options.snapshot_every > 0 && snapshot.frame % options.snapshot_every == 0 {
            match serde_json::to_string(&snapshot) {
                Ok(json) => log::debug!("snapshot {json}"),
                Err(err) => log::warn!("snapshot not serialisable: {err}"),
            }
        }

        if options.realtime {
            next_frame_time += FRAME_DURATION;
            let now = Instant::now();
            if next_frame_time > now {
                thread::sleep(next_frame_time - now);
            } else if now - next_frame_time > FRAME_DURATION * 2 {
                // Too far behind; skip ahead instead of catching up.
                next_frame_time = now;
            }
        }
    }

    snapshot
}

#[cfg(test)]
mod tests {
    use super::*;
    use invaders_core::config::SimConfig;

    fn fast(max_frames: u64) -> LoopOptions {
        LoopOptions {
            realtime: false,
            max_frames: Some(max_frames),
            snapshot_every: 0,
            game_over_frames: FRAME_RATE as u64,
        }
    }

    /// Idles, then asks to quit on the given frame.
    struct QuitOn(u64);

    impl InputSource for QuitOn {
        fn poll(&mut self) -> InputFrame {
            let quit = self.0 == 0;
            self.0 = self.0.saturating_sub(1);
            InputFrame {
                quit,
                ..InputFrame::idle()
            }
        }
    }

    #[test]
    fn test_frame_duration_constant() {
        // 60Hz = 16.666ms per frame
        let expected_nanos = 1_000_000_000u64 / 60;
        assert_eq!(FRAME_DURATION.as_nanos(), expected_nanos as u128);
    }

    #[test]
    fn test_autopilot_sweeps_and_fires() {
        let mut pilot = Autopilot::new(10);
        let frames: Vec<InputFrame> = (0..20).map(|_| pilot.poll()).collect();
        assert_eq!(frames[0].move_x, 1.0);
        assert_eq!(frames[10].move_x, -1.0);
        assert!(frames[0].fire);
        assert!(!frames[1].fire);
        assert!(frames.iter().all(|f| !f.quit));
    }

    #[test]
    fn test_loop_stops_at_frame_limit() {
        let mut game = Game::new(SimConfig::default());
        let mut pilot = Autopilot::new(90);
        let mut out = HeadlessRenderer::default();

        let snap = run_game_loop(&mut game, &mut pilot, &mut out, fast(120));
        assert_eq!(snap.frame, 120);
        assert_eq!(out.frames, 120);
        // Score and lives labels every frame, plus sprites while playing.
        assert!(out.texts >= 240);
        assert!(out.sprites > 0);
    }

    #[test]
    fn test_loop_stops_after_game_over_screen() {
        let mut game = Game::new(SimConfig::default());
        game.state_mut().end_game();
        let mut pilot = Autopilot::new(90);
        let mut out = HeadlessRenderer::default();

        let snap = run_game_loop(&mut game, &mut pilot, &mut out, fast(10_000));
        assert_eq!(snap.phase, GamePhase::GameOver);
        assert_eq!(snap.frame, 1 + FRAME_RATE as u64);
        assert!(game.running());
    }

    #[test]
    fn test_loop_ends_on_quit_input() {
        let mut game = Game::new(SimConfig::default());
        let mut input = QuitOn(5);
        let mut out: Vec<invaders_core::render::DrawCommand> = Vec::new();

        let snap = run_game_loop(&mut game, &mut input, &mut out, fast(10_000));
        assert!(!game.running());
        assert_eq!(snap.frame, 6);
        assert_eq!(snap.phase, GamePhase::Playing);
    }
}
