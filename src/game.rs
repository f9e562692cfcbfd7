//! The game-loop controller.
//!
//! `Game` owns every piece of mutable state. Each tick runs in a fixed order:
//! drain input → advance ship → advance bullets → drop expired bullets →
//! bullet/enemy collisions → fleet edge check and advance → ship/floor checks
//! → render. Lower modules only hold state and apply local rules; this is the
//! one place that sequences them.

use log::{debug, info};

use crate::button::Button;
use crate::collision::{self, Collisions};
use crate::entities::{Bullet, Entity, EntityRef, Motion, Player, SpriteSizes};
use crate::error::GameError;
use crate::formation::{Fleet, FleetLayout};
use crate::frontend::Frontend;
use crate::geometry::Point;
use crate::input::{Flow, InputEvent, KeyState};
use crate::settings::{DynamicSettings, Settings};
use crate::stats::{GameStats, LifeLoss};

/// What happened during one tick. Purely informational; the state has
/// already been updated when it is returned.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickOutcome {
    pub bullets_expired: usize,
    pub enemies_destroyed: usize,
    pub wave_cleared: bool,
    pub fleet_reversed: bool,
    pub life_lost: Option<LifeLoss>,
}

#[derive(Clone, Debug)]
pub struct Game {
    pub settings: Settings,
    pub sprites: SpriteSizes,
    pub dynamic: DynamicSettings,
    pub stats: GameStats,
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub fleet: Fleet,
    pub play_button: Button,
    /// Whether the frontend should show its pointer.
    pub cursor_visible: bool,
}

impl Game {
    /// A game sitting at the menu, with a fleet already on screen behind the
    /// Play button.
    pub fn new(settings: Settings, sprites: SpriteSizes) -> Self {
        let screen = settings.screen_size();
        let play_button = Button::centered(&settings.screen_rect(), settings.play_button, "Play");
        let mut game = Game {
            dynamic: settings.baseline,
            stats: GameStats::new(settings.ship_limit),
            player: Player::new(sprites.ship, screen),
            bullets: Vec::new(),
            fleet: Fleet::default(),
            play_button,
            cursor_visible: true,
            settings,
            sprites,
        };
        let layout = game.fleet_layout();
        game.fleet.reset(&layout);
        game
    }

    pub fn is_active(&self) -> bool {
        self.stats.active
    }

    pub fn fleet_layout(&self) -> FleetLayout {
        FleetLayout::compute(
            self.settings.screen_size(),
            self.sprites.alien,
            self.sprites.ship.height,
        )
    }

    /// Every live entity, for drawing.
    pub fn entities(&self) -> impl Iterator<Item = EntityRef<'_>> {
        std::iter::once(EntityRef::Player(&self.player))
            .chain(self.bullets.iter().map(EntityRef::Bullet))
            .chain(self.fleet.enemies.iter().map(EntityRef::Enemy))
    }

    // ── Input ────────────────────────────────────────────────────────────────

    pub fn handle_event(&mut self, event: InputEvent) -> Flow {
        match event {
            InputEvent::MoveLeft(state) => self.player.moving_left = state == KeyState::Pressed,
            InputEvent::MoveRight(state) => self.player.moving_right = state == KeyState::Pressed,
            InputEvent::Fire => {
                if self.is_active() {
                    self.fire_bullet();
                }
            }
            InputEvent::Click(at) => {
                self.check_play_button(at);
            }
            InputEvent::Quit => {
                info!("Quit requested.");
                return Flow::Quit;
            }
            InputEvent::Unrecognized => {}
        }
        Flow::Continue
    }

    /// Fire from the ship if fewer than `bullets_allowed` are in flight.
    /// Returns whether a bullet was created; requests over the cap are dropped.
    pub fn fire_bullet(&mut self) -> bool {
        if self.bullets.len() >= self.settings.bullets_allowed {
            return false;
        }
        self.bullets
            .push(Bullet::fired_from(&self.player, self.settings.bullet_size()));
        debug!("Bullet fired ({} in flight).", self.bullets.len());
        true
    }

    /// Start a new game if the click landed on the Play button while at the
    /// menu. Returns whether a game was started.
    pub fn check_play_button(&mut self, at: Point) -> bool {
        if self.play_button.contains(at) && !self.is_active() {
            self.start_new_game();
            true
        } else {
            false
        }
    }

    pub fn start_new_game(&mut self) {
        self.dynamic.reset_to(&self.settings.baseline);
        self.stats.reset(self.settings.ship_limit);
        self.stats.active = true;

        self.bullets.clear();
        let layout = self.fleet_layout();
        self.fleet.reset(&layout);
        self.player.recenter(self.settings.screen_size());

        self.cursor_visible = false;
        info!(
            "New game: {} ships, fleet of {} ({}x{}), high score {}.",
            self.stats.lives_remaining,
            self.fleet.len(),
            layout.columns,
            layout.rows,
            self.stats.high_score
        );
    }

    // ── Per-frame update ─────────────────────────────────────────────────────

    fn motion(&self) -> Motion {
        Motion {
            ship_speed: self.dynamic.ship_speed,
            bullet_speed: self.dynamic.bullet_speed,
            alien_speed: self.dynamic.alien_speed,
            fleet_direction: self.fleet.direction,
            screen_width: self.settings.screen_width,
        }
    }

    /// Advance one frame. Does nothing at the menu.
    pub fn tick(&mut self) -> TickOutcome {
        let mut outcome = TickOutcome::default();
        if !self.is_active() {
            return outcome;
        }

        let motion = self.motion();
        self.player.advance(&motion);
        self.update_bullets(&motion, &mut outcome);
        self.update_aliens(&mut outcome);

        outcome
    }

    fn update_bullets(&mut self, motion: &Motion, outcome: &mut TickOutcome) {
        for bullet in &mut self.bullets {
            bullet.advance(motion);
        }

        let expired = collision::expired_bullets(&self.bullets);
        outcome.bullets_expired = expired.len();
        collision::remove_indices(&mut self.bullets, &expired);

        let hits = collision::bullet_enemy_collisions(&self.bullets, &self.fleet.enemies);
        self.apply_bullet_hits(&hits, outcome);
    }

    fn apply_bullet_hits(&mut self, hits: &Collisions, outcome: &mut TickOutcome) {
        if hits.is_empty() {
            return;
        }
        collision::remove_indices(&mut self.bullets, &hits.bullets());
        collision::remove_indices(&mut self.fleet.enemies, &hits.enemies());

        let destroyed = hits.enemies_destroyed();
        outcome.enemies_destroyed = destroyed;
        self.stats.record_kills(destroyed, self.dynamic.alien_points);

        if self.fleet.is_empty() {
            self.clear_wave();
            outcome.wave_cleared = true;
        }
    }

    fn clear_wave(&mut self) {
        self.bullets.clear();
        let layout = self.fleet_layout();
        self.fleet.rebuild(&layout);
        self.dynamic
            .increase_speed(self.settings.speedup_scale, self.settings.score_scale);
        self.stats.level += 1;
        info!(
            "Wave cleared, level {} (alien speed {:.3}, {} points each).",
            self.stats.level, self.dynamic.alien_speed, self.dynamic.alien_points
        );
    }

    fn update_aliens(&mut self, outcome: &mut TickOutcome) {
        outcome.fleet_reversed = self
            .fleet
            .update_formation(self.settings.screen_width, self.settings.fleet_drop_speed);

        // Read the direction after any reversal so the fleet moves away from
        // the edge in the same tick.
        let motion = self.motion();
        for enemy in &mut self.fleet.enemies {
            enemy.advance(&motion);
        }

        let rammed = collision::player_collides(&self.player, &self.fleet.enemies);
        let landed =
            collision::enemies_reached_floor(&self.fleet.enemies, self.settings.screen_height);
        if rammed || landed {
            outcome.life_lost = Some(self.ship_hit());
        }
    }

    /// One life-loss transition, however many enemies triggered it.
    fn ship_hit(&mut self) -> LifeLoss {
        let result = self.stats.lose_life();
        match result {
            LifeLoss::ShipsRemaining => {
                self.bullets.clear();
                let layout = self.fleet_layout();
                self.fleet.rebuild(&layout);
                self.player.recenter(self.settings.screen_size());
                info!("Ship lost, {} left.", self.stats.lives_remaining);
            }
            LifeLoss::GameOver => {
                self.stats.active = false;
                self.cursor_visible = true;
                info!(
                    "Game over at level {} with score {} (high score {}).",
                    self.stats.level, self.stats.score, self.stats.high_score
                );
            }
        }
        result
    }

    // ── Main loop ────────────────────────────────────────────────────────────

    /// Drive the game until a quit event arrives.
    pub fn run<F: Frontend>(&mut self, frontend: &mut F) -> Result<(), GameError> {
        loop {
            for event in frontend.poll_events()? {
                if self.handle_event(event) == Flow::Quit {
                    return Ok(());
                }
            }

            if self.is_active() {
                let outcome = self.tick();
                if outcome.life_lost.is_some() {
                    frontend.pause(self.settings.life_loss_pause());
                }
            }

            frontend.render(self)?;
            frontend.end_frame();
        }
    }
}
