//! Game configuration: fixed base values plus the dynamic subset that is
//! reset at every new game and scaled up after every wave clear.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::GameError;
use crate::geometry::{Rect, Size};

/// RGB triple; only the renderer interprets it.
pub type Rgb = (u8, u8, u8);

// ── Dynamic settings ─────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct DynamicSettings {
    pub ship_speed: f64,
    pub bullet_speed: f64,
    pub alien_speed: f64,
    /// Points credited per enemy destroyed.
    pub alien_points: u64,
}

impl Default for DynamicSettings {
    fn default() -> Self {
        DynamicSettings {
            ship_speed: 1.5,
            bullet_speed: 3.0,
            alien_speed: 1.0,
            alien_points: 50,
        }
    }
}

impl DynamicSettings {
    pub fn reset_to(&mut self, baseline: &DynamicSettings) {
        *self = *baseline;
    }

    /// Speeds scale by `speedup_scale`; points scale by `score_scale` and
    /// are truncated toward zero, saturating at `u64::MAX`.
    pub fn increase_speed(&mut self, speedup_scale: f64, score_scale: f64) {
        self.ship_speed *= speedup_scale;
        self.bullet_speed *= speedup_scale;
        self.alien_speed *= speedup_scale;
        self.alien_points = (self.alien_points as f64 * score_scale) as u64;
    }
}

// ── Base settings ────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub screen_width: f64,
    pub screen_height: f64,
    pub bg_color: Rgb,

    pub ship_limit: u32,

    pub bullet_width: f64,
    pub bullet_height: f64,
    pub bullet_color: Rgb,
    pub bullets_allowed: usize,

    pub fleet_drop_speed: f64,

    pub speedup_scale: f64,
    pub score_scale: f64,

    /// Freeze after a life is lost, before the next wave appears.
    pub life_loss_pause_ms: u64,

    pub play_button: Size,

    /// Values the dynamic subset returns to at each new game.
    pub baseline: DynamicSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            screen_width: 1000.0,
            screen_height: 600.0,
            bg_color: (230, 230, 230),
            ship_limit: 3,
            bullet_width: 3.0,
            bullet_height: 15.0,
            bullet_color: (60, 60, 60),
            bullets_allowed: 3,
            fleet_drop_speed: 10.0,
            speedup_scale: 1.1,
            score_scale: 1.5,
            life_loss_pause_ms: 500,
            play_button: Size::new(200.0, 50.0),
            baseline: DynamicSettings::default(),
        }
    }
}

impl Settings {
    /// Parse a (possibly partial) JSON configuration. Missing fields keep
    /// their defaults.
    pub fn from_json(text: &str) -> Result<Settings, GameError> {
        let settings: Settings = serde_json::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load(path: &Path) -> Result<Settings, GameError> {
        let text = std::fs::read_to_string(path)?;
        Settings::from_json(&text)
    }

    pub fn validate(&self) -> Result<(), GameError> {
        let reals = [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("bullet_width", self.bullet_width),
            ("bullet_height", self.bullet_height),
            ("fleet_drop_speed", self.fleet_drop_speed),
            ("speedup_scale", self.speedup_scale),
            ("score_scale", self.score_scale),
            ("play_button.width", self.play_button.width),
            ("play_button.height", self.play_button.height),
            ("baseline.ship_speed", self.baseline.ship_speed),
            ("baseline.bullet_speed", self.baseline.bullet_speed),
            ("baseline.alien_speed", self.baseline.alien_speed),
        ];
        if let Some((name, value)) = reals.iter().find(|(_, v)| !v.is_finite()) {
            return Err(GameError::Config(format!(
                "{} must be a finite number, got {}",
                name, value
            )));
        }
        if self.screen_width <= 0.0 || self.screen_height <= 0.0 {
            return Err(GameError::Config(format!(
                "screen must have a positive size, got {}x{}",
                self.screen_width, self.screen_height
            )));
        }
        if self.bullets_allowed == 0 {
            return Err(GameError::Config("bullets_allowed must be at least 1".into()));
        }
        if self.speedup_scale < 1.0 || self.score_scale < 1.0 {
            return Err(GameError::Config(format!(
                "scales must not shrink the game (speedup_scale={}, score_scale={})",
                self.speedup_scale, self.score_scale
            )));
        }
        Ok(())
    }

    pub fn screen_size(&self) -> Size {
        Size::new(self.screen_width, self.screen_height)
    }

    pub fn screen_rect(&self) -> Rect {
        Rect {
            x: 0.0,
            y: 0.0,
            width: self.screen_width,
            height: self.screen_height,
        }
    }

    pub fn bullet_size(&self) -> Size {
        Size::new(self.bullet_width, self.bullet_height)
    }

    pub fn life_loss_pause(&self) -> Duration {
        Duration::from_millis(self.life_loss_pause_ms)
    }
}
