//! Lives, score, level and the active flag.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LifeLoss {
    /// Ships remain: the board is reset and play resumes.
    ShipsRemaining,
    /// That was the last ship.
    GameOver,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameStats {
    pub lives_remaining: u32,
    pub score: u64,
    /// Survives new games; only lost when the process exits.
    pub high_score: u64,
    pub level: u32,
    pub active: bool,
}

impl GameStats {
    pub fn new(ship_limit: u32) -> Self {
        GameStats {
            lives_remaining: ship_limit,
            score: 0,
            high_score: 0,
            level: 1,
            active: false,
        }
    }

    /// Per-game values back to their starting point. `high_score` and
    /// `active` are untouched.
    pub fn reset(&mut self, ship_limit: u32) {
        self.lives_remaining = ship_limit;
        self.score = 0;
        self.level = 1;
    }

    /// Scoring saturates at `u64::MAX` instead of wrapping.
    pub fn record_kills(&mut self, enemies: usize, points: u64) {
        let earned = (enemies as u64).saturating_mul(points);
        self.score = self.score.saturating_add(earned);
        self.check_high_score();
    }

    pub fn check_high_score(&mut self) {
        if self.score > self.high_score {
            self.high_score = self.score;
        }
    }

    /// Spend one ship. The count never goes below zero and the game ends once
    /// it reaches zero.
    pub fn lose_life(&mut self) -> LifeLoss {
        if self.lives_remaining > 0 {
            self.lives_remaining -= 1;
        }
        if self.lives_remaining == 0 {
            LifeLoss::GameOver
        } else {
            LifeLoss::ShipsRemaining
        }
    }
}
