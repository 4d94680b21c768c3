use std::path::PathBuf;

use anyhow::Context;

use invaders_app::game_loop::{self, Autopilot, HeadlessRenderer, LoopOptions};
use invaders_core::config::SimConfig;
use invaders_sim::Game;

/// Usage: `invaders [config.json] [max-frames]`
fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => {
            let path = PathBuf::from(path);
            SimConfig::load(&path)
                .with_context(|| format!("loading config from {}", path.display()))?
        }
        None => SimConfig::default(),
    };
    let max_frames = args
        .next()
        .map(|n| n.parse::<u64>())
        .transpose()
        .context("max-frames must be a frame count")?;

    let mut game = Game::new(config);
    let mut pilot = Autopilot::new(90);
    let mut out = HeadlessRenderer::default();
    let options = LoopOptions {
        max_frames,
        ..LoopOptions::default()
    };

    let snapshot = game_loop::run_game_loop(&mut game, &mut pilot, &mut out, options);
    log::info!(
        "finished after {} frames: round {}, score {}, lives {}, {} sprites drawn",
        snapshot.frame,
        snapshot.round,
        snapshot.score,
        snapshot.lives,
        out.sprites
    );
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}
