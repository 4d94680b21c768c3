//! The game engine.
//!
//! `Game` owns the entity manager, the round state and the RNG, and exposes
//! the four per-frame entry points a driver calls in order:
//! [`Game::handle_input`], [`Game::update`], [`Game::render`],
//! [`Game::check_terminal`]. It is headless and deterministic for a given
//! seed and input sequence.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use invaders_core::config::SimConfig;
use invaders_core::constants::*;
use invaders_core::enums::{GamePhase, Group};
use invaders_core::input::InputFrame;
use invaders_core::render::RenderBackend;
use invaders_core::state::GameStateSnapshot;

use crate::ecs::{EntityId, KeyboardController, Label, Manager, Sprite, Transform};
use crate::state::RoundState;
use crate::systems;
use crate::systems::round::RoundOutcome;
use crate::{factory, layout};

/// Label entities making up the HUD.
#[derive(Debug, Clone, Copy)]
struct Hud {
    score: EntityId,
    lives: EntityId,
    game_over: Option<EntityId>,
    quit: Option<EntityId>,
}

pub struct Game {
    manager: Manager,
    config: SimConfig,
    rng: ChaCha8Rng,
    state: RoundState,
    player: EntityId,
    hud: Hud,
    running: bool,
}

impl Game {
    /// Set up the player, HUD and the round-one formation.
    pub fn new(config: SimConfig) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
        let first_fire_tick = rng.gen_range(0..ENEMY_FIRE_BASE_SPAN) as u64;
        let state = RoundState::new(&config, first_fire_tick);

        let mut manager = Manager::new();
        let player = factory::create_player(&mut manager, &config);
        let hud = Hud {
            score: factory::create_label(&mut manager, SCORE_LABEL_POS, &state.score_text()),
            lives: factory::create_label(&mut manager, LIVES_LABEL_POS, &state.lives_text()),
            game_over: None,
            quit: None,
        };
        layout::build(&mut manager, state.round, &config);

        log::info!(
            "new game: seed {}, {} entities, first enemy shot at frame {first_fire_tick}",
            config.seed,
            manager.len()
        );

        Self {
            manager,
            config,
            rng,
            state,
            player,
            hud,
            running: true,
        }
    }

    pub fn running(&self) -> bool {
        self.running
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn state(&self) -> &RoundState {
        &self.state
    }

    /// Direct state access for scripted scenarios and tools.
    pub fn state_mut(&mut self) -> &mut RoundState {
        &mut self.state
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn manager(&self) -> &Manager {
        &self.manager
    }

    /// Direct entity access for scripted scenarios and tools.
    pub fn manager_mut(&mut self) -> &mut Manager {
        &mut self.manager
    }

    pub fn player(&self) -> EntityId {
        self.player
    }

    pub fn label_text(&self, label: EntityId) -> &str {
        &self.manager.entity(label).get::<Label>().text
    }

    pub fn score_label(&self) -> EntityId {
        self.hud.score
    }

    pub fn lives_label(&self) -> EntityId {
        self.hud.lives
    }

    /// Sample input, then run the round check and enemy fire.
    pub fn handle_input(&mut self, input: InputFrame) {
        if input.quit {
            log::info!("quit requested");
            self.running = false;
        }
        self.manager
            .entity_mut(self.player)
            .get_mut::<KeyboardController>()
            .set_intent(input.move_x);
        if input.fire {
            self.state.fire_requested = true;
        }

        if !self.state.is_playing() {
            return;
        }
        let outcome = systems::round::run(&mut self.manager, &mut self.state, &self.config);
        if outcome == RoundOutcome::Advanced {
            let text = self.state.score_text();
            self.set_label(self.hud.score, text);
        }
        if self.state.is_playing() {
            systems::enemy_fire::run(
                &mut self.manager,
                &mut self.state,
                &mut self.rng,
                &self.config,
            );
        }
    }

    /// Refresh and update entities, then run the simulation systems.
    pub fn update(&mut self) {
        let playing = self.state.is_playing();
        let player_before_update = self.player_position();

        if playing {
            self.sync_enemy_animation();
        }

        self.manager.refresh();
        self.manager.update();

        if playing {
            systems::player_fire::run(
                &mut self.manager,
                &mut self.state.fire_requested,
                self.player,
                &self.config,
            );
            systems::formation::run(&mut self.manager, &mut self.state, &self.config);

            let result = systems::collisions::run(
                &mut self.manager,
                &mut self.state,
                self.player,
                player_before_update,
            );
            if result.player_blocked {
                log::trace!("player blocked by a wall");
            }
            if !result.enemies_destroyed.is_empty() {
                let text = self.state.score_text();
                self.set_label(self.hud.score, text);
            }
            if result.player_hits > 0 {
                let text = self.state.lives_text();
                self.set_label(self.hud.lives, text);
            }
        }

        self.state.frame_count += 1;
    }

    /// Draw the frame. Projectiles, player, enemies and map are drawn only
    /// while playing, in that order, followed by the HUD.
    pub fn render(&self, out: &mut dyn RenderBackend) {
        out.clear_screen();

        if self.state.is_playing() {
            for group in [Group::Projectiles, Group::Players, Group::Enemies, Group::Map] {
                self.manager.draw_group(group, out);
            }
        }

        self.manager.entity(self.hud.score).draw(out);
        self.manager.entity(self.hud.lives).draw(out);

        if !self.state.is_playing() {
            for label in [self.hud.game_over, self.hud.quit].into_iter().flatten() {
                self.manager.entity(label).draw(out);
            }
        }

        out.present();
    }

    /// One-time terminal setup on entering `GameOver`: clear the field and
    /// put up the end-of-game labels.
    pub fn check_terminal(&mut self) {
        if self.state.is_playing() || self.state.game_end_check {
            return;
        }

        for group in [Group::Projectiles, Group::Enemies] {
            let ids = self.manager.group(group).to_vec();
            for id in ids {
                self.manager.destroy(id);
            }
        }

        self.hud.game_over = Some(factory::create_label(
            &mut self.manager,
            GAME_OVER_LABEL_POS,
            "Game Over",
        ));
        self.hud.quit = Some(factory::create_label(
            &mut self.manager,
            QUIT_LABEL_POS,
            "Esc to Quit",
        ));
        self.state.game_end_check = true;
    }

    /// Run one whole frame and return the resulting snapshot.
    pub fn tick(&mut self, input: InputFrame, out: &mut dyn RenderBackend) -> GameStateSnapshot {
        self.handle_input(input);
        self.update();
        self.render(out);
        self.check_terminal();
        self.snapshot()
    }

    pub fn snapshot(&self) -> GameStateSnapshot {
        GameStateSnapshot {
            frame: self.state.frame_count,
            phase: self.state.phase,
            round: self.state.round,
            score: self.state.score,
            lives: self.state.lives,
            enemy_speed: self.state.enemy_speed,
            enemies: self.manager.group_size(Group::Enemies),
            projectiles: self.manager.group_size(Group::Projectiles),
            player: self
                .manager
                .get(self.player)
                .and_then(|p| p.try_get::<Transform>())
                .map(|t| t.position),
        }
    }

    fn player_position(&self) -> glam::Vec2 {
        self.manager.entity(self.player).get::<Transform>().position
    }

    /// Enemy sprites animate at the formation's pace.
    fn sync_enemy_animation(&mut self) {
        let frame_count = self.state.frame_count;
        let speed = self.state.enemy_speed;
        let enemies = self.manager.group(Group::Enemies).to_vec();
        for id in enemies {
            let sprite = self.manager.entity_mut(id).get_mut::<Sprite>();
            sprite.set_frame_count(frame_count);
            sprite.set_speed(speed);
        }
    }

    fn set_label(&mut self, label: EntityId, text: String) {
        log::debug!("label {label}: {text}");
        self.manager.entity_mut(label).get_mut::<Label>().set_text(text);
    }
}
