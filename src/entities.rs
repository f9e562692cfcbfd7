//! Player ship, bullets and enemies.
//!
//! Each entity owns a continuous position; its bounds are derived from that
//! position on every read and never stored.

use crate::formation::FleetDirection;
use crate::geometry::{Point, Rect, Size};

// ── Sprite metadata ──────────────────────────────────────────────────────────

/// Fixed sprite dimensions supplied by the asset side at construction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpriteSizes {
    pub ship: Size,
    pub alien: Size,
}

impl Default for SpriteSizes {
    fn default() -> Self {
        SpriteSizes {
            ship: Size::new(60.0, 48.0),
            alien: Size::new(60.0, 58.0),
        }
    }
}

// ── Per-tick motion parameters ───────────────────────────────────────────────

/// Everything an entity reads while advancing one tick. Built fresh by the
/// game loop each tick; entities never mutate it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Motion {
    pub ship_speed: f64,
    pub bullet_speed: f64,
    pub alien_speed: f64,
    pub fleet_direction: FleetDirection,
    pub screen_width: f64,
}

pub trait Entity {
    fn position(&self) -> Point;
    fn size(&self) -> Size;
    fn advance(&mut self, motion: &Motion);

    fn bounds(&self) -> Rect {
        Rect::new(self.position(), self.size())
    }
}

// ── Player ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub position: Point,
    pub size: Size,
    pub moving_left: bool,
    pub moving_right: bool,
}

impl Player {
    /// A ship resting at the middle of the bottom edge.
    pub fn new(size: Size, screen: Size) -> Self {
        let mut player = Player {
            position: Point::default(),
            size,
            moving_left: false,
            moving_right: false,
        };
        player.recenter(screen);
        player
    }

    /// Move back to the middle of the bottom edge. Movement intents are kept.
    pub fn recenter(&mut self, screen: Size) {
        self.position = Point::new(
            (screen.width - self.size.width) / 2.0,
            screen.height - self.size.height,
        );
    }
}

impl Entity for Player {
    fn position(&self) -> Point {
        self.position
    }

    fn size(&self) -> Size {
        self.size
    }

    /// Both intents are applied independently; each is gated only by the
    /// edge it moves toward, checked against the bounds before the move.
    fn advance(&mut self, motion: &Motion) {
        let bounds = self.bounds();
        if self.moving_right && bounds.right() < motion.screen_width {
            self.position.x += motion.ship_speed;
        }
        if self.moving_left && bounds.left() > 0.0 {
            self.position.x -= motion.ship_speed;
        }
    }
}

// ── Bullet ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub position: Point,
    pub size: Size,
}

impl Bullet {
    /// A bullet whose top edge is centred on the top edge of the ship.
    pub fn fired_from(player: &Player, size: Size) -> Self {
        let ship = player.bounds();
        Bullet {
            position: Point::new(ship.center().x - size.width / 2.0, ship.top()),
            size,
        }
    }
}

impl Entity for Bullet {
    fn position(&self) -> Point {
        self.position
    }

    fn size(&self) -> Size {
        self.size
    }

    fn advance(&mut self, motion: &Motion) {
        self.position.y -= motion.bullet_speed;
    }
}

// ── Enemy ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub position: Point,
    pub size: Size,
}

impl Enemy {
    pub fn at(position: Point, size: Size) -> Self {
        Enemy { position, size }
    }
}

impl Entity for Enemy {
    fn position(&self) -> Point {
        self.position
    }

    fn size(&self) -> Size {
        self.size
    }

    fn advance(&mut self, motion: &Motion) {
        self.position.x += motion.alien_speed * motion.fleet_direction.sign();
    }
}

// ── Read-only view for renderers ─────────────────────────────────────────────

#[derive(Clone, Copy, Debug)]
pub enum EntityRef<'a> {
    Player(&'a Player),
    Bullet(&'a Bullet),
    Enemy(&'a Enemy),
}

impl<'a> EntityRef<'a> {
    pub fn bounds(&self) -> Rect {
        match self {
            EntityRef::Player(p) => p.bounds(),
            EntityRef::Bullet(b) => b.bounds(),
            EntityRef::Enemy(e) => e.bounds(),
        }
    }
}
