use std::collections::HashMap;
use std::time::Duration;

use alien_invasion::entities::{Bullet, Enemy, SpriteSizes};
use alien_invasion::formation::FleetDirection;
use alien_invasion::frontend::Frontend;
use alien_invasion::game::Game;
use alien_invasion::geometry::{Point, Size};
use alien_invasion::input::{Flow, InputEvent, KeyState};
use alien_invasion::scoreboard::score_label;
use alien_invasion::settings::Settings;
use alien_invasion::stats::LifeLoss;

const ALIEN: Size = Size { width: 60.0, height: 58.0 };
const SHOT: Size = Size { width: 3.0, height: 15.0 };

fn menu_game() -> Game {
    Game::new(Settings::default(), SpriteSizes::default())
}

fn active_game() -> Game {
    let mut g = menu_game();
    g.start_new_game();
    g
}

fn enemy(x: f64, y: f64) -> Enemy {
    Enemy::at(Point::new(x, y), ALIEN)
}

fn bullet(x: f64, y: f64) -> Bullet {
    Bullet { position: Point::new(x, y), size: SHOT }
}

fn click_play(g: &mut Game) -> Flow {
    let center = g.play_button.rect.center();
    g.handle_event(InputEvent::Click(center))
}

// ── Construction & menu ───────────────────────────────────────────────────────

#[test]
fn new_game_waits_at_menu() {
    let g = menu_game();
    assert!(!g.is_active());
    assert!(g.cursor_visible);
    assert_eq!(g.fleet.len(), 21);
    assert_eq!(g.stats.lives_remaining, 3);
    assert_eq!(g.stats.level, 1);
    assert_eq!(g.play_button.rect.center(), Point::new(500.0, 300.0));
}

#[test]
fn tick_at_menu_changes_nothing() {
    let mut g = menu_game();
    let before = g.fleet.clone();
    let outcome = g.tick();
    assert_eq!(outcome, Default::default());
    assert_eq!(g.fleet, before);
}

#[test]
fn fire_is_ignored_at_menu() {
    let mut g = menu_game();
    g.handle_event(InputEvent::Fire);
    assert!(g.bullets.is_empty());
}

#[test]
fn clicking_play_starts_the_game() {
    let mut g = menu_game();
    assert_eq!(click_play(&mut g), Flow::Continue);
    assert!(g.is_active());
    assert!(!g.cursor_visible);
}

#[test]
fn clicking_outside_play_does_nothing() {
    let mut g = menu_game();
    g.handle_event(InputEvent::Click(Point::new(10.0, 10.0)));
    assert!(!g.is_active());
    // Right/bottom edges of the button are outside it
    let r = g.play_button.rect;
    g.handle_event(InputEvent::Click(Point::new(r.right(), r.bottom())));
    assert!(!g.is_active());
}

#[test]
fn clicking_play_while_active_does_not_restart() {
    let mut g = active_game();
    g.stats.score = 300;
    assert!(!g.check_play_button(g.play_button.rect.center()));
    assert_eq!(g.stats.score, 300);
}

// ── Input ─────────────────────────────────────────────────────────────────────

#[test]
fn movement_events_set_and_clear_intents() {
    let mut g = active_game();
    g.handle_event(InputEvent::MoveRight(KeyState::Pressed));
    g.handle_event(InputEvent::MoveLeft(KeyState::Pressed));
    assert!(g.player.moving_right && g.player.moving_left);
    g.handle_event(InputEvent::MoveLeft(KeyState::Released));
    assert!(g.player.moving_right && !g.player.moving_left);

    g.tick();
    assert_eq!(g.player.position.x, 471.5);
}

#[test]
fn quit_and_unrecognized_events() {
    let mut g = active_game();
    let before = g.clone();
    assert_eq!(g.handle_event(InputEvent::Unrecognized), Flow::Continue);
    assert_eq!(g.bullets, before.bullets);
    assert_eq!(g.stats, before.stats);
    assert_eq!(g.handle_event(InputEvent::Quit), Flow::Quit);
}

#[test]
fn fourth_bullet_is_dropped() {
    let mut g = active_game();
    assert!(g.fire_bullet());
    assert!(g.fire_bullet());
    assert!(g.fire_bullet());
    assert!(!g.fire_bullet());
    g.handle_event(InputEvent::Fire);
    assert_eq!(g.bullets.len(), 3);
}

#[test]
fn bullet_slot_frees_when_it_leaves_the_screen() {
    let mut g = active_game();
    g.bullets = vec![bullet(10.0, 400.0), bullet(20.0, 400.0), bullet(30.0, -12.0)];
    let outcome = g.tick();
    assert_eq!(outcome.bullets_expired, 1);
    assert_eq!(g.bullets.len(), 2);
    assert!(g.fire_bullet());
}

// ── Bullet / enemy resolution ─────────────────────────────────────────────────

#[test]
fn hit_removes_both_and_scores_alien_points() {
    let mut g = active_game();
    g.fleet.enemies = vec![enemy(300.0, 200.0), enemy(100.0, 100.0)];
    g.bullets = vec![bullet(320.0, 220.0)];

    let outcome = g.tick();

    assert_eq!(outcome.enemies_destroyed, 1);
    assert!(!outcome.wave_cleared);
    assert!(g.bullets.is_empty());
    assert_eq!(g.fleet.len(), 1);
    assert_eq!(g.fleet.enemies[0].position, Point::new(101.0, 100.0));
    assert_eq!(g.stats.score, 50);
    assert_eq!(g.stats.high_score, 50);
}

#[test]
fn stacked_enemies_score_per_enemy() {
    let mut g = active_game();
    g.fleet.enemies = vec![enemy(300.0, 200.0), enemy(300.0, 230.0), enemy(100.0, 100.0)];
    g.bullets = vec![bullet(320.0, 238.0)];

    let outcome = g.tick();

    assert_eq!(outcome.enemies_destroyed, 2);
    assert_eq!(g.stats.score, 100);
    assert_eq!(g.fleet.len(), 1);
}

#[test]
fn score_uses_scaled_points() {
    let mut g = active_game();
    g.dynamic.alien_points = 112;
    g.stats.score = 1000;
    g.stats.high_score = 5000;
    g.fleet.enemies = vec![enemy(300.0, 200.0), enemy(100.0, 100.0)];
    g.bullets = vec![bullet(320.0, 220.0)];

    g.tick();

    assert_eq!(g.stats.score, 1112);
    assert_eq!(g.stats.high_score, 5000);
}

#[test]
fn last_enemy_clears_the_wave() {
    let mut g = active_game();
    g.fleet.enemies = vec![enemy(300.0, 200.0)];
    g.bullets = vec![bullet(320.0, 220.0), bullet(800.0, 400.0)];
    let before = g.dynamic;

    let outcome = g.tick();

    assert!(outcome.wave_cleared);
    assert_eq!(g.stats.level, 2);
    assert!(g.bullets.is_empty());
    assert_eq!(g.fleet.len(), 21);
    // Points were credited at the old rate
    assert_eq!(g.stats.score, 50);
    assert!(g.dynamic.alien_speed > before.alien_speed);
    assert_eq!(g.dynamic.alien_speed, 1.0 * 1.1);
    assert_eq!(g.dynamic.ship_speed, 1.5 * 1.1);
    assert_eq!(g.dynamic.bullet_speed, 3.0 * 1.1);
    assert_eq!(g.dynamic.alien_points, 75);
    // The new fleet already took its first step at the new speed
    assert_eq!(g.fleet.enemies[0].position, Point::new(60.0 + 1.0 * 1.1, 58.0));
}

#[test]
fn empty_fleet_without_kills_is_not_a_wave_clear() {
    let mut g = active_game();
    g.fleet.enemies.clear();
    let outcome = g.tick();
    assert!(!outcome.wave_cleared);
    assert_eq!(g.stats.level, 1);
}

#[test]
fn huge_score_scale_saturates_instead_of_overflowing() {
    let settings = Settings::from_json(r#"{ "score_scale": 1000000.0 }"#).unwrap();
    let mut g = Game::new(settings, SpriteSizes::default());
    g.start_new_game();

    for wave in 1..=8 {
        g.fleet.enemies = vec![enemy(400.0, 100.0)];
        g.bullets = vec![bullet(430.0, 120.0)];
        let outcome = g.tick();
        assert!(outcome.wave_cleared, "wave {} was not cleared", wave);
    }

    assert_eq!(g.stats.level, 9);
    assert_eq!(g.dynamic.alien_points, u64::MAX);
    assert_eq!(g.stats.score, u64::MAX);
    assert_eq!(g.stats.high_score, u64::MAX);
    assert_eq!(score_label(g.stats.score), "18,446,744,073,709,551,615");
}

// ── Formation ─────────────────────────────────────────────────────────────────

#[test]
fn edge_contact_reverses_once_and_drops_everyone() {
    let mut g = active_game();
    g.fleet.enemies = vec![enemy(945.0, 100.0), enemy(942.0, 200.0), enemy(500.0, 100.0)];

    let outcome = g.tick();

    assert!(outcome.fleet_reversed);
    assert_eq!(g.fleet.direction, FleetDirection::Left);
    let positions: Vec<Point> = g.fleet.enemies.iter().map(|e| e.position).collect();
    assert_eq!(
        positions,
        vec![
            Point::new(944.0, 110.0),
            Point::new(941.0, 210.0),
            Point::new(499.0, 110.0),
        ]
    );
}

// ── Life loss ─────────────────────────────────────────────────────────────────

#[test]
fn floor_contact_with_ships_left_resets_the_board() {
    let mut g = active_game();
    g.stats.lives_remaining = 2;
    g.player.position.x = 10.0;
    g.fleet.enemies = vec![enemy(300.0, 545.0)];
    g.bullets = vec![bullet(800.0, 300.0)];

    let outcome = g.tick();

    assert_eq!(outcome.life_lost, Some(LifeLoss::ShipsRemaining));
    assert_eq!(g.stats.lives_remaining, 1);
    assert!(g.is_active());
    assert!(g.bullets.is_empty());
    assert_eq!(g.fleet.len(), 21);
    assert_eq!(g.fleet.enemies[0].position, Point::new(60.0, 58.0));
    assert_eq!(g.player.position, Point::new(470.0, 552.0));
}

#[test]
fn floor_contact_on_last_ship_ends_the_game() {
    let mut g = active_game();
    g.stats.lives_remaining = 1;
    g.fleet.enemies = vec![enemy(100.0, 545.0)];

    let outcome = g.tick();

    assert_eq!(outcome.life_lost, Some(LifeLoss::GameOver));
    assert_eq!(g.stats.lives_remaining, 0);
    assert!(!g.is_active());
    assert!(g.cursor_visible);

    // Frozen until a new game starts
    let frozen = g.fleet.clone();
    g.tick();
    assert_eq!(g.fleet, frozen);
}

#[test]
fn ramming_the_ship_costs_a_life() {
    let mut g = active_game();
    g.fleet.enemies = vec![enemy(480.0, 500.0)];
    let outcome = g.tick();
    assert_eq!(outcome.life_lost, Some(LifeLoss::ShipsRemaining));
    assert_eq!(g.stats.lives_remaining, 2);
}

#[test]
fn ship_and_floor_hit_together_cost_one_life() {
    let mut g = active_game();
    g.fleet.enemies = vec![enemy(480.0, 545.0), enemy(100.0, 560.0)];
    g.tick();
    assert_eq!(g.stats.lives_remaining, 2);
}

// ── New game after game over ──────────────────────────────────────────────────

#[test]
fn restart_resets_score_and_level_but_keeps_high_score() {
    let mut g = active_game();
    g.stats.score = 830;
    g.stats.high_score = 830;
    g.stats.level = 4;
    g.dynamic.alien_speed = 5.0;
    g.fleet.direction = FleetDirection::Left;
    g.stats.lives_remaining = 1;
    g.fleet.enemies = vec![enemy(100.0, 545.0)];
    g.tick();
    assert!(!g.is_active());

    click_play(&mut g);

    assert!(g.is_active());
    assert_eq!(g.stats.score, 0);
    assert_eq!(g.stats.level, 1);
    assert_eq!(g.stats.lives_remaining, 3);
    assert_eq!(g.stats.high_score, 830);
    assert_eq!(g.dynamic, g.settings.baseline);
    assert_eq!(g.fleet.direction, FleetDirection::Right);
    assert_eq!(g.fleet.len(), 21);
    assert!(g.bullets.is_empty());
}

#[test]
fn entities_lists_everything_live() {
    let mut g = active_game();
    g.fire_bullet();
    assert_eq!(g.entities().count(), 1 + 1 + 21);
}

// ── run() with a scripted frontend ────────────────────────────────────────────

/// Replays a fixed list of events keyed by frame number, like a recorded
/// input tape.
struct ScriptedFrontend {
    frame: u64,
    script: HashMap<u64, Vec<InputEvent>>,
    renders: usize,
    frames_ended: usize,
    pauses: Vec<Duration>,
}

impl ScriptedFrontend {
    fn new(script: Vec<(u64, Vec<InputEvent>)>) -> Self {
        ScriptedFrontend {
            frame: 0,
            script: script.into_iter().collect(),
            renders: 0,
            frames_ended: 0,
            pauses: Vec::new(),
        }
    }
}

impl Frontend for ScriptedFrontend {
    fn poll_events(&mut self) -> std::io::Result<Vec<InputEvent>> {
        let events = self.script.remove(&self.frame).unwrap_or_default();
        self.frame += 1;
        Ok(events)
    }

    fn render(&mut self, _game: &Game) -> std::io::Result<()> {
        self.renders += 1;
        Ok(())
    }

    fn pause(&mut self, duration: Duration) {
        self.pauses.push(duration);
    }

    fn end_frame(&mut self) {
        self.frames_ended += 1;
    }
}

#[test]
fn run_plays_until_quit() {
    let mut g = menu_game();
    let center = g.play_button.rect.center();
    let mut frontend = ScriptedFrontend::new(vec![
        (0, vec![InputEvent::Click(center)]),
        (1, vec![InputEvent::Fire, InputEvent::Unrecognized]),
        (5, vec![InputEvent::Quit, InputEvent::Fire]),
    ]);

    g.run(&mut frontend).unwrap();

    assert_eq!(frontend.renders, 5);
    assert_eq!(frontend.frames_ended, 5);
    assert!(frontend.pauses.is_empty());
    assert!(g.is_active());
    // The fire after the quit was never processed
    assert_eq!(g.bullets.len(), 1);
    // Fired on frame 1, advanced on frames 1..=4
    assert_eq!(g.bullets[0].position.y, 552.0 - 4.0 * 3.0);
}

#[test]
fn run_pauses_after_losing_a_life() {
    let mut g = active_game();
    g.fleet.enemies = vec![enemy(100.0, 545.0)];
    let mut frontend = ScriptedFrontend::new(vec![(1, vec![InputEvent::Quit])]);

    g.run(&mut frontend).unwrap();

    assert_eq!(frontend.pauses, vec![Duration::from_millis(500)]);
    assert_eq!(frontend.renders, 1);
    assert_eq!(g.stats.lives_remaining, 2);
}
