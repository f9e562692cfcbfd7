//! The fleet: every live enemy plus the one horizontal direction they share.

use log::debug;

use crate::entities::{Enemy, Entity};
use crate::geometry::{Point, Size};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FleetDirection {
    Right,
    Left,
}

impl FleetDirection {
    pub fn sign(self) -> f64 {
        match self {
            FleetDirection::Right => 1.0,
            FleetDirection::Left => -1.0,
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            FleetDirection::Right => FleetDirection::Left,
            FleetDirection::Left => FleetDirection::Right,
        }
    }
}

// ── Layout ───────────────────────────────────────────────────────────────────

/// Grid dimensions for a fresh fleet. Each enemy is separated from its
/// neighbours by one sprite width horizontally and one sprite height
/// vertically.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FleetLayout {
    pub columns: usize,
    pub rows: usize,
    pub alien: Size,
}

impl FleetLayout {
    pub fn compute(screen: Size, alien: Size, ship_height: f64) -> Self {
        let columns = floor_div(screen.width - 2.0 * alien.width, 2.0 * alien.width);
        let rows = floor_div(
            screen.height - 3.0 * alien.height - ship_height,
            2.0 * alien.height,
        );
        FleetLayout {
            columns,
            rows,
            alien,
        }
    }

    pub fn len(&self) -> usize {
        self.columns * self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Initial top-left corners, row by row.
    pub fn positions(&self) -> impl Iterator<Item = Point> + '_ {
        let alien = self.alien;
        (0..self.rows).flat_map(move |row| {
            (0..self.columns).map(move |column| {
                Point::new(
                    alien.width + 2.0 * alien.width * column as f64,
                    alien.height + 2.0 * alien.height * row as f64,
                )
            })
        })
    }
}

/// Floor division of two world lengths; anything that would not fit a single
/// whole slot yields zero.
fn floor_div(space: f64, slot: f64) -> usize {
    if slot <= 0.0 || space <= 0.0 {
        return 0;
    }
    (space / slot).floor() as usize
}

// ── Fleet ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Fleet {
    pub enemies: Vec<Enemy>,
    pub direction: FleetDirection,
}

impl Default for Fleet {
    fn default() -> Self {
        Fleet {
            enemies: Vec::new(),
            direction: FleetDirection::Right,
        }
    }
}

impl Fleet {
    /// Replace every enemy with a freshly laid out fleet. The direction is
    /// left as it was.
    pub fn rebuild(&mut self, layout: &FleetLayout) {
        self.enemies = layout
            .positions()
            .map(|p| Enemy::at(p, layout.alien))
            .collect();
    }

    /// Rebuild and point the fleet rightward again, as at the start of a game.
    pub fn reset(&mut self, layout: &FleetLayout) {
        self.direction = FleetDirection::Right;
        self.rebuild(layout);
    }

    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
    }

    pub fn len(&self) -> usize {
        self.enemies.len()
    }

    pub fn check_edges(enemy: &Enemy, screen_width: f64) -> bool {
        let bounds = enemy.bounds();
        bounds.right() >= screen_width || bounds.left() <= 0.0
    }

    /// Scan until the first enemy at a horizontal edge, then drop and reverse
    /// the whole fleet once. Returns whether that happened.
    pub fn update_formation(&mut self, screen_width: f64, drop_speed: f64) -> bool {
        let at_edge = self
            .enemies
            .iter()
            .any(|enemy| Fleet::check_edges(enemy, screen_width));
        if at_edge {
            self.drop_and_reverse(drop_speed);
        }
        at_edge
    }

    pub fn drop_and_reverse(&mut self, drop_speed: f64) {
        for enemy in &mut self.enemies {
            enemy.position.y += drop_speed;
        }
        self.direction = self.direction.reversed();
        debug!("Fleet reversed, now heading {:?}", self.direction);
    }
}
