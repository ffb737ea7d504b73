//! Invader Wall - a wall-defence arcade game
//!
//! Core modules:
//! - `sim`: Per-tick simulation (entities, swarm movement, collisions, difficulty)
//! - `states`: Screen state machine (welcome, level intro, play, pause, game over)
//! - `game`: Game object owning the state stack and session counters
//! - `platform`: Input keys and wall-clock abstraction
//! - `audio`: Fire-and-forget sound cues
//! - `render`: Read-only frame handed to an external renderer
//! - `config`: Tunable, validated game configuration

pub mod audio;
pub mod config;
pub mod error;
pub mod game;
pub mod platform;
pub mod render;
pub mod sim;
pub mod states;

pub use config::GameConfig;
pub use error::ConfigError;
pub use game::{Game, Session};

/// Game constants that are not part of the tunable configuration
pub mod consts {
    /// Ship sprite box
    pub const SHIP_WIDTH: f32 = 50.0;
    pub const SHIP_HEIGHT: f32 = 50.0;
    /// Jump impulse and gravity, in pixels per tick (not scaled by dt)
    pub const SHIP_JUMP_VELOCITY: f32 = 20.0;
    pub const SHIP_GRAVITY: f32 = 2.5;
    /// Ship speed bonus granted for every level won
    pub const SHIP_SPEED_INCREMENT: f32 = 8.0;

    /// Invader sprite box
    pub const INVADER_WIDTH: f32 = 40.0;
    pub const INVADER_HEIGHT: f32 = 40.0;
    /// Horizontal span the invader files are spread over
    pub const INVADER_GRID_SPAN: f32 = 510.0;
    /// Vertical distance between invader ranks
    pub const INVADER_RANK_SPACING: f32 = 40.0;
    /// Rocket hit box is squeezed vertically by this divisor (sprite offset)
    pub const INVADER_HIT_Y_DIVISOR: f32 = 1.2;

    /// Wall strip layout
    pub const WALL_RANKS: u32 = 3;
    pub const WALL_FILES: u32 = 50;
    pub const WALL_SPAN: f32 = 780.0;
    pub const WALL_OFFSET_BELOW_GROUND: f32 = 70.0;
    pub const WALL_BLOCK_WIDTH: f32 = 18.0;
    pub const WALL_BLOCK_HEIGHT: f32 = 30.0;

    /// Rockets spawn this far above the ship center
    pub const ROCKET_SPAWN_OFFSET: f32 = 12.0;

    /// Wall strength at the start of a session
    pub const STARTING_SCORE: i32 = 50;
    /// Wall strength needed to win a level
    pub const WINNING_SCORE: i32 = 100;
    /// Cost of firing one rocket
    pub const ROCKET_COST: i32 = 1;
    /// Wall strength lost when a bomb hits the wall
    pub const WALL_HIT_PENALTY: i32 = 5;
    /// Score rebase after a level win: 50 - 5 * level, floored
    pub const REBASE_STEP: i32 = 5;
    pub const REBASE_MAX_LEVEL: u32 = 9;
    pub const REBASE_FLOOR: i32 = 5;

    /// Level intro countdown (seconds)
    pub const LEVEL_COUNTDOWN: f32 = 3.0;
    /// Walk animation frame toggle period (seconds)
    pub const ANIMATION_PACE: f32 = 0.1;
}
