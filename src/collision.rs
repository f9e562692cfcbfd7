//! Overlap tests between projectiles, the fleet, the ship and the floor.
//!
//! Every function here is a read-only pass. Removals are applied afterwards
//! with [`remove_indices`], so nothing is tested against a collection that is
//! shrinking underneath it.

use std::collections::{BTreeMap, BTreeSet};

use crate::entities::{Bullet, Enemy, Entity, Player};

/// Result of a bullet/enemy scan: bullet index → indices of the enemies it
/// destroyed. Both index sets refer to the collections as they were when
/// the scan ran.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Collisions {
    pub by_bullet: BTreeMap<usize, Vec<usize>>,
}

impl Collisions {
    pub fn is_empty(&self) -> bool {
        self.by_bullet.is_empty()
    }

    pub fn bullets(&self) -> BTreeSet<usize> {
        self.by_bullet.keys().copied().collect()
    }

    pub fn enemies(&self) -> BTreeSet<usize> {
        self.by_bullet.values().flatten().copied().collect()
    }

    /// Scoring unit: one per enemy destroyed, however many a bullet took out.
    pub fn enemies_destroyed(&self) -> usize {
        self.by_bullet.values().map(Vec::len).sum()
    }
}

/// Pair every bullet with every enemy it overlaps. An enemy already claimed
/// by an earlier bullet is not credited again; a bullet whose only overlaps
/// were already claimed stays in flight.
pub fn bullet_enemy_collisions(bullets: &[Bullet], enemies: &[Enemy]) -> Collisions {
    let mut claimed: BTreeSet<usize> = BTreeSet::new();
    let mut by_bullet = BTreeMap::new();

    for (bi, bullet) in bullets.iter().enumerate() {
        let shot = bullet.bounds();
        let hit: Vec<usize> = enemies
            .iter()
            .enumerate()
            .filter(|(ei, enemy)| !claimed.contains(ei) && shot.overlaps(&enemy.bounds()))
            .map(|(ei, _)| ei)
            .collect();
        if !hit.is_empty() {
            claimed.extend(hit.iter().copied());
            by_bullet.insert(bi, hit);
        }
    }

    Collisions { by_bullet }
}

/// Bullets that have fully left the top of the screen.
pub fn expired_bullets(bullets: &[Bullet]) -> BTreeSet<usize> {
    bullets
        .iter()
        .enumerate()
        .filter(|(_, b)| b.bounds().bottom() <= 0.0)
        .map(|(i, _)| i)
        .collect()
}

pub fn player_collides(player: &Player, enemies: &[Enemy]) -> bool {
    let ship = player.bounds();
    enemies.iter().any(|e| e.bounds().overlaps(&ship))
}

pub fn enemies_reached_floor(enemies: &[Enemy], screen_height: f64) -> bool {
    enemies.iter().any(|e| e.bounds().bottom() >= screen_height)
}

/// Drop the items at `doomed` (indices into `items` as it is now),
/// preserving the order of the survivors.
pub fn remove_indices<T>(items: &mut Vec<T>, doomed: &BTreeSet<usize>) {
    if doomed.is_empty() {
        return;
    }
    let mut index = 0;
    items.retain(|_| {
        let keep = !doomed.contains(&index);
        index += 1;
        keep
    });
}
