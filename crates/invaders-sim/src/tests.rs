//! Frame-level tests for the game engine and its systems.

use glam::Vec2;

use invaders_core::config::SimConfig;
use invaders_core::enums::{ColliderTag, GamePhase, Group};
use invaders_core::input::InputFrame;
use invaders_core::render::DrawCommand;

use crate::ecs::{Collider, EntityId, Manager, Projectile, Transform};
use crate::engine::Game;
use crate::factory;
use crate::state::RoundState;
use crate::systems::collisions;

/// Game with enemy fire pushed out of reach and the formation between steps.
fn quiet_game() -> Game {
    let mut game = Game::new(SimConfig::default());
    game.state_mut().next_enemy_fire_tick = u64::MAX;
    game.state_mut().frame_count = 1;
    game
}

/// Replace the formation with enemies at the given positions.
fn set_formation(game: &mut Game, positions: &[(f32, f32)]) -> Vec<EntityId> {
    let manager = game.manager_mut();
    for id in manager.group(Group::Enemies).to_vec() {
        manager.destroy(id);
    }
    manager.refresh();
    positions
        .iter()
        .map(|&(x, y)| factory::create_enemy(manager, Vec2::new(x, y), 16.0, 16.0, "enemy"))
        .collect()
}

fn shot(manager: &mut Manager, x: f32, y: f32, velocity: Vec2, tag: ColliderTag) -> EntityId {
    factory::create_projectile(manager, Vec2::new(x, y), velocity, tag, 640.0)
}

fn live_shots(game: &Game, tag: ColliderTag) -> Vec<EntityId> {
    let manager = game.manager();
    manager
        .group(Group::Projectiles)
        .iter()
        .copied()
        .filter(|&id| manager.is_alive(id) && manager.entity(id).get::<Collider>().tag == tag)
        .collect()
}

fn player_x(game: &Game) -> f32 {
    game.manager()
        .entity(game.player())
        .get::<Transform>()
        .position
        .x
}

// ---- Start of game ----

#[test]
fn test_new_game_state() {
    let game = Game::new(SimConfig::default());
    let state = game.state();
    assert_eq!(state.round, 1);
    assert_eq!(state.lives, 3);
    assert_eq!(state.score, 0);
    assert_eq!(state.enemy_speed, 55);
    assert!(state.next_enemy_fire_tick < 240);
    assert_eq!(game.phase(), GamePhase::Playing);
    assert!(game.running());
    assert_eq!(game.label_text(game.score_label()), "Score: 0");
    assert_eq!(game.label_text(game.lives_label()), "Lives: 3");
    assert_eq!(game.manager().group_size(Group::Players), 1);
    assert_eq!(game.manager().group_size(Group::Enemies), 32);
    assert_eq!(game.manager().group_size(Group::Map), 2);
}

#[test]
fn test_initial_enemy_speed_from_config() {
    let config = SimConfig::from_json_str(r#"{ "initial_enemy_speed": 30 }"#).unwrap();
    let mut game = Game::new(config);
    assert_eq!(game.state().enemy_speed, 30);

    // Later rounds use the per-round schedule.
    set_formation(&mut game, &[]);
    game.handle_input(InputFrame::idle());
    assert_eq!(game.state().enemy_speed, 50);
}

// ---- Player shots ----

#[test]
fn test_player_shot_destroys_enemy() {
    let mut game = quiet_game();
    let enemies = set_formation(&mut game, &[(200.0, 300.0), (300.0, 100.0)]);
    let projectile = shot(
        game.manager_mut(),
        210.0,
        310.0,
        Vec2::ZERO,
        ColliderTag::PlayerProjectile,
    );

    game.update();

    let manager = game.manager();
    assert!(!manager.is_alive(enemies[0]));
    assert!(manager.is_alive(enemies[1]));
    assert!(!manager.is_alive(projectile));
    assert!(manager.entity(projectile).get::<Projectile>().has_collided());
    assert_eq!(game.state().score, 10);
    assert_eq!(game.label_text(game.score_label()), "Score: 10");

    // Both are gone from every index after the next refresh.
    game.update();
    let manager = game.manager();
    assert!(!manager.contains(enemies[0]));
    assert!(!manager.contains(projectile));
    assert!(!manager.colliders().contains(&projectile));
    assert_eq!(manager.group(Group::Enemies), &[enemies[1]]);
}

#[test]
fn test_player_shot_first_hit_wins() {
    let mut game = quiet_game();
    let enemies = set_formation(&mut game, &[(200.0, 300.0), (205.0, 305.0)]);
    shot(
        game.manager_mut(),
        210.0,
        310.0,
        Vec2::ZERO,
        ColliderTag::PlayerProjectile,
    );

    game.update();

    assert!(!game.manager().is_alive(enemies[0]));
    assert!(game.manager().is_alive(enemies[1]));
    assert_eq!(game.state().score, 10);
}

#[test]
fn test_collided_projectile_is_not_matched_again() {
    let config = SimConfig::default();
    let mut manager = Manager::new();
    let mut state = RoundState::new(&config, u64::MAX);
    let player = factory::create_player(&mut manager, &config);
    let first = factory::create_enemy(&mut manager, Vec2::new(200.0, 300.0), 16.0, 16.0, "enemy");
    let projectile = shot(
        &mut manager,
        210.0,
        310.0,
        Vec2::ZERO,
        ColliderTag::PlayerProjectile,
    );

    let result = collisions::run(&mut manager, &mut state, player, Vec2::new(240.0, 600.0));
    assert_eq!(result.enemies_destroyed, vec![first]);

    // A fresh enemy under the spent shot, before any refresh.
    let second = factory::create_enemy(&mut manager, Vec2::new(200.0, 300.0), 16.0, 16.0, "enemy");
    let result = collisions::run(&mut manager, &mut state, player, Vec2::new(240.0, 600.0));
    assert!(result.enemies_destroyed.is_empty());
    assert!(manager.is_alive(second));
    assert!(manager.entity(projectile).get::<Projectile>().has_collided());
    assert_eq!(state.score, 10);
}

#[test]
fn test_fire_lockout_while_shot_in_flight() {
    let mut game = quiet_game();

    game.handle_input(InputFrame::fire());
    game.update();
    let in_flight = live_shots(&game, ColliderTag::PlayerProjectile);
    assert_eq!(in_flight.len(), 1);
    assert!(!game.state().fire_requested);

    let origin = game
        .manager()
        .entity(in_flight[0])
        .get::<Transform>()
        .position;
    assert_eq!(origin.x, 240.0 + 15.0);

    game.handle_input(InputFrame::fire());
    game.update();
    assert_eq!(live_shots(&game, ColliderTag::PlayerProjectile), in_flight);
    assert!(!game.state().fire_requested);

    // Once the shot is gone a new request fires again.
    game.manager_mut().destroy(in_flight[0]);
    game.handle_input(InputFrame::fire());
    game.update();
    let next = live_shots(&game, ColliderTag::PlayerProjectile);
    assert_eq!(next.len(), 1);
    assert_ne!(next, in_flight);
}

#[test]
fn test_shot_leaving_playfield_is_removed() {
    let mut game = quiet_game();
    let projectile = shot(
        game.manager_mut(),
        100.0,
        1.0,
        Vec2::new(0.0, -3.0),
        ColliderTag::PlayerProjectile,
    );

    game.update();
    assert!(!game.manager().is_alive(projectile));
    game.update();
    assert!(!game.manager().contains(projectile));
    assert_eq!(game.state().score, 0);
}

// ---- Enemy shots and lives ----

#[test]
fn test_enemy_shot_costs_a_life() {
    let mut game = quiet_game();
    let projectile = shot(
        game.manager_mut(),
        250.0,
        610.0,
        Vec2::ZERO,
        ColliderTag::EnemyProjectile,
    );

    game.update();

    assert_eq!(game.state().lives, 2);
    assert_eq!(game.label_text(game.lives_label()), "Lives: 2");
    assert!(!game.manager().is_alive(projectile));
    assert!(game
        .manager()
        .entity(projectile)
        .get::<Projectile>()
        .has_collided());
    assert_eq!(game.phase(), GamePhase::Playing);

    // Spent shot does not hit again on the next frame.
    game.update();
    assert_eq!(game.state().lives, 2);
}

#[test]
fn test_last_life_ends_game_on_same_frame() {
    let mut game = quiet_game();
    game.state_mut().lives = 1;
    shot(
        game.manager_mut(),
        250.0,
        610.0,
        Vec2::ZERO,
        ColliderTag::EnemyProjectile,
    );

    game.update();
    assert_eq!(game.state().lives, 0);
    assert_eq!(game.phase(), GamePhase::GameOver);
    assert_eq!(game.label_text(game.lives_label()), "Lives: 0");
}

#[test]
fn test_game_over_is_terminal() {
    let mut game = quiet_game();
    game.state_mut().end_game();
    let round = game.state().round;
    let mut frames: Vec<DrawCommand> = Vec::new();

    game.check_terminal();
    assert!(game.state().game_end_check);
    let entities = game.manager().len();
    game.check_terminal();
    assert_eq!(game.manager().len(), entities, "terminal setup ran twice");

    // The formation is cleared; an empty formation must not start a round.
    for _ in 0..5 {
        let snap = game.tick(InputFrame::fire(), &mut frames);
        assert_eq!(snap.phase, GamePhase::GameOver);
    }
    assert_eq!(game.state().round, round);
    assert_eq!(game.manager().group(Group::Enemies).len(), 0);
    assert!(live_shots(&game, ColliderTag::PlayerProjectile).is_empty());
}

#[test]
fn test_enemy_fire_spawns_downward_shot() {
    let mut game = quiet_game();
    let enemies = set_formation(&mut game, &[(120.0, 200.0)]);
    let now = game.state().frame_count;
    game.state_mut().next_enemy_fire_tick = now;

    game.handle_input(InputFrame::idle());

    let shots = live_shots(&game, ColliderTag::EnemyProjectile);
    assert_eq!(shots.len(), 1);
    let transform = *game.manager().entity(shots[0]).get::<Transform>();
    let shooter = game.manager().entity(enemies[0]).get::<Transform>().position;
    assert_eq!(transform.position, shooter + Vec2::new(15.0, 0.0));
    assert_eq!(transform.velocity, Vec2::new(0.0, 2.0));
    assert!(game.state().next_enemy_fire_tick >= game.state().frame_count);
}

// ---- Rounds ----

#[test]
fn test_round_advance_when_formation_cleared() {
    let mut game = quiet_game();
    game.state_mut().score = 40;
    game.state_mut().reverse_check = true;
    game.state_mut().reverse_direction = true;
    set_formation(&mut game, &[]);
    assert_eq!(game.manager().group_size(Group::Enemies), 0);

    game.handle_input(InputFrame::idle());

    let state = game.state();
    assert_eq!(state.round, 2);
    assert_eq!(state.score, 140);
    assert_eq!(state.enemy_speed, 50);
    assert!(!state.reverse_check);
    assert!(!state.reverse_direction);
    assert_eq!(game.manager().group_size(Group::Enemies), 32);
    assert_eq!(game.phase(), GamePhase::Playing);
    assert_eq!(game.label_text(game.score_label()), "Score: 140");
}

#[test]
fn test_enemy_reaching_loss_line_ends_game() {
    let mut game = quiet_game();
    set_formation(&mut game, &[(100.0, 100.0), (200.0, 568.0)]);

    game.handle_input(InputFrame::idle());
    assert_eq!(game.phase(), GamePhase::GameOver);

    let mut frames: Vec<DrawCommand> = Vec::new();
    game.render(&mut frames);
    game.check_terminal();
    game.update();
    assert_eq!(game.manager().group(Group::Enemies).len(), 0);
}

// ---- Walls and movement ----

#[test]
fn test_wall_rolls_player_back() {
    let mut game = quiet_game();
    let player = game.player();
    game.manager_mut()
        .entity_mut(player)
        .get_mut::<Transform>()
        .position
        .x = 10.0;

    game.handle_input(InputFrame::moving(-1.0));
    game.update();
    assert_eq!(player_x(&game), 10.0);

    // Velocity is now -3: the step to x=7 overlaps the left wall.
    game.update();
    assert_eq!(player_x(&game), 10.0);
}

#[test]
fn test_wall_overlap_reports_blocked_player() {
    let config = SimConfig::default();
    let mut manager = Manager::new();
    let mut state = RoundState::new(&config, u64::MAX);
    let player = factory::create_player(&mut manager, &config);
    factory::create_wall(&mut manager, Vec2::ZERO, 8.0, 640.0, "wall");
    manager.entity_mut(player).get_mut::<Transform>().position = Vec2::new(4.0, 600.0);

    let result = collisions::run(&mut manager, &mut state, player, Vec2::new(20.0, 600.0));
    assert!(result.player_blocked);
    assert_eq!(
        manager.entity(player).get::<Transform>().position,
        Vec2::new(20.0, 600.0)
    );

    let result = collisions::run(&mut manager, &mut state, player, Vec2::new(20.0, 600.0));
    assert!(!result.player_blocked);
}

#[test]
fn test_player_moves_freely_in_open_field() {
    let mut game = quiet_game();
    game.handle_input(InputFrame::moving(1.0));
    game.update();
    game.update();
    game.update();
    assert_eq!(player_x(&game), 246.0);
}

// ---- Rendering ----

#[test]
fn test_render_order() {
    let mut game = quiet_game();
    shot(
        game.manager_mut(),
        100.0,
        300.0,
        Vec2::ZERO,
        ColliderTag::EnemyProjectile,
    );
    let mut out: Vec<DrawCommand> = Vec::new();
    game.render(&mut out);

    assert_eq!(out.first(), Some(&DrawCommand::Clear));
    assert_eq!(out.last(), Some(&DrawCommand::Present));

    let kinds: Vec<&str> = out
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Sprite { texture, .. } => Some(texture.as_str()),
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(kinds[0], "projectile");
    assert_eq!(kinds[1], "player");
    assert!(kinds[2..34].iter().all(|k| k.starts_with("enemy_")));
    assert_eq!(&kinds[34..], &["wall", "wall", "Score: 0", "Lives: 3"]);
}

#[test]
fn test_render_game_over_shows_end_labels_only() {
    let mut game = quiet_game();
    game.state_mut().end_game();
    game.check_terminal();

    let mut out: Vec<DrawCommand> = Vec::new();
    game.render(&mut out);
    let texts: Vec<&str> = out
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(texts, vec!["Score: 0", "Lives: 3", "Game Over", "Esc to Quit"]);
    assert!(!out.iter().any(|c| matches!(c, DrawCommand::Sprite { .. })));
}

#[test]
fn test_quit_stops_the_game() {
    let mut game = quiet_game();
    game.handle_input(InputFrame {
        quit: true,
        ..InputFrame::default()
    });
    assert!(!game.running());
}

// ---- Determinism ----

#[test]
fn test_same_seed_same_game() {
    let config = SimConfig {
        seed: 12345,
        ..Default::default()
    };
    let mut game_a = Game::new(config.clone());
    let mut game_b = Game::new(config);
    let mut out: Vec<DrawCommand> = Vec::new();

    for frame in 0..900u32 {
        let input = InputFrame {
            move_x: if (frame / 90) % 2 == 0 { 1.0 } else { -1.0 },
            fire: frame % 7 == 0,
            quit: false,
        };
        let snap_a = game_a.tick(input, &mut out);
        let snap_b = game_b.tick(input, &mut out);
        out.clear();

        let json_a = serde_json::to_string(&snap_a).unwrap();
        let json_b = serde_json::to_string(&snap_b).unwrap();
        assert_eq!(json_a, json_b, "diverged at frame {frame}");
    }
}
