//! Game configuration
//!
//! Every tunable of the simulation lives here. Values are validated once,
//! before a [`Game`](crate::Game) is built, so the tick loop never has to
//! guard against a zero fire rate or an empty invader grid.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Tunable game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Bombs ===
    /// Chance per second that a front invader drops a bomb
    pub bomb_rate: f32,
    /// Bomb fall speed range (pixels/s)
    pub bomb_min_velocity: f32,
    pub bomb_max_velocity: f32,

    // === Invader swarm ===
    /// Horizontal swarm speed at the start of a level (pixels/s)
    pub invader_initial_velocity: f32,
    /// Speed added to the swarm every time it bounces off a side
    pub invader_acceleration: f32,
    /// Distance the swarm spends in its drop phase after a bounce
    pub invader_drop_distance: f32,
    /// Grid size
    pub invader_ranks: u32,
    pub invader_files: u32,

    // === Rockets ===
    /// Rocket climb speed (pixels/s)
    pub rocket_velocity: f32,
    /// Maximum rockets per second
    pub rocket_max_fire_rate: f32,

    // === Play area ===
    /// Play area size, centered on the screen
    pub game_width: f32,
    pub game_height: f32,
    /// Fixed tick rate
    pub fps: u32,
    /// Hand play bounds to the renderer for an overlay
    pub debug_mode: bool,

    // === Player & difficulty ===
    /// Horizontal ship speed at level 1 (pixels/s)
    pub ship_speed: f32,
    /// Per-level scaling applied to invader and bomb parameters
    pub level_difficulty_multiplier: f32,
    /// Wall strength awarded per invader destroyed
    pub points_per_invader: i32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            bomb_rate: 0.05,
            bomb_min_velocity: 50.0,
            bomb_max_velocity: 50.0,

            invader_initial_velocity: 25.0,
            invader_acceleration: 0.0,
            invader_drop_distance: 20.0,
            invader_ranks: 5,
            invader_files: 10,

            rocket_velocity: 120.0,
            rocket_max_fire_rate: 2.0,

            game_width: 700.0,
            game_height: 300.0,
            fps: 50,
            debug_mode: false,

            ship_speed: 150.0,
            level_difficulty_multiplier: 0.3,
            points_per_invader: 5,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON config. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Seconds simulated by one tick
    pub fn tick_dt(&self) -> f32 {
        1.0 / self.fps as f32
    }

    /// Wall-clock interval between ticks
    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.fps))
    }

    /// Minimum milliseconds between two rockets
    pub fn rocket_cooldown_ms(&self) -> f64 {
        1000.0 / f64::from(self.rocket_max_fire_rate)
    }

    /// Reject configurations the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.fps == 0 {
            return Err(ConfigError::NonPositiveFps { fps: self.fps });
        }
        // Written this way so NaN is rejected too
        if !(self.rocket_max_fire_rate > 0.0) {
            return Err(ConfigError::NonPositiveFireRate {
                rate: self.rocket_max_fire_rate,
            });
        }
        if self.invader_ranks == 0 || self.invader_files == 0 {
            return Err(ConfigError::EmptyInvaderGrid {
                ranks: self.invader_ranks,
                files: self.invader_files,
            });
        }

        let non_negative = [
            ("bomb_rate", self.bomb_rate),
            ("bomb_min_velocity", self.bomb_min_velocity),
            ("invader_initial_velocity", self.invader_initial_velocity),
            ("invader_acceleration", self.invader_acceleration),
            ("ship_speed", self.ship_speed),
            ("level_difficulty_multiplier", self.level_difficulty_multiplier),
        ];
        for (field, value) in non_negative {
            if !(value >= 0.0) {
                return Err(ConfigError::NegativeValue { field, value });
            }
        }

        let positive = [
            ("invader_drop_distance", self.invader_drop_distance),
            ("rocket_velocity", self.rocket_velocity),
            ("game_width", self.game_width),
            ("game_height", self.game_height),
            ("points_per_invader", self.points_per_invader as f32),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(ConfigError::NonPositiveValue { field, value });
            }
        }

        if self.bomb_min_velocity > self.bomb_max_velocity {
            return Err(ConfigError::BombVelocityRange {
                min: self.bomb_min_velocity,
                max: self.bomb_max_velocity,
            });
        }

        Ok(())
    }
}
