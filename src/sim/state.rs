//! Play field state
//!
//! Everything a single level owns: the ship and its controller, the invader
//! swarm, projectiles, and the wall. A fresh play field is built every time
//! a level starts and dropped when the level ends.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::difficulty::LevelParams;
use super::entities::{Bomb, Invader, Layout, Rocket, Ship, WallBlock};
use crate::config::GameConfig;
use crate::consts::*;

/// Something that happened during a tick that the session or audio cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A rocket left the ship
    RocketFired,
    /// A rocket destroyed the invader at (rank, file)
    InvaderDestroyed { rank: u32, file: u32 },
    /// The ship caught a bomb
    BombCaught,
    /// A bomb knocked out a wall block
    WallHit,
    /// An invader touched the ship
    ShipOverrun,
}

/// Sprite selector for the ship
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShipPose {
    #[default]
    Idle,
    /// Walking, alternating between two frames
    Walk { frame: u8 },
    JumpLeft,
    JumpRight,
    JumpUp,
    /// Just threw a rocket
    Throw,
}

/// Jump/walk/animation bookkeeping for the ship
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShipController {
    pub airborne: bool,
    pub walking: bool,
    /// Set by any fire attempt, cleared once the throw pose is shown
    pub throwing: bool,
    /// Up key state last tick, for jump edge detection
    pub up_held: bool,
    /// Which walk frame is current
    pub second_frame: bool,
    pace_clock: f32,
}

impl ShipController {
    /// Advance the walk animation clock
    pub fn advance_pace(&mut self, dt: f32) {
        self.pace_clock += dt;
        while self.pace_clock >= ANIMATION_PACE {
            self.pace_clock -= ANIMATION_PACE;
            self.second_frame = !self.second_frame;
        }
    }
}

/// Shared movement of the invader swarm
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Swarm {
    /// Current velocity (pixels/s); purely horizontal or purely vertical
    pub velocity: Vec2,
    /// Current speed magnitude, grows on every bounce
    pub speed: f32,
    pub dropping: bool,
    /// Distance covered in the current drop phase
    pub drop_progress: f32,
    /// Horizontal velocity to resume once the drop phase ends
    pub next_velocity: Option<Vec2>,
}

impl Swarm {
    /// Swarm starts moving left
    pub fn new(initial_speed: f32) -> Self {
        Self {
            velocity: Vec2::new(-initial_speed, 0.0),
            speed: initial_speed,
            dropping: false,
            drop_progress: 0.0,
            next_velocity: None,
        }
    }
}

/// Complete per-level state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Playfield {
    pub level: u32,
    pub params: LevelParams,
    pub ship: Ship,
    pub controller: ShipController,
    pub pose: ShipPose,
    /// Rank-major order
    pub invaders: Vec<Invader>,
    pub rockets: Vec<Rocket>,
    pub bombs: Vec<Bomb>,
    pub wall: Vec<WallBlock>,
    pub swarm: Swarm,
    /// Wall-clock time of the last rocket, if any
    pub last_fire_ms: Option<f64>,
}

impl Playfield {
    /// Lay out a fresh level
    pub fn new(config: &GameConfig, layout: &Layout, level: u32, ship_speed: f32) -> Self {
        let params = LevelParams::resolve(config, level, ship_speed);
        let center_x = layout.width / 2.0;
        let bounds = layout.bounds;

        let ranks = config.invader_ranks;
        let files = config.invader_files;
        let file_spacing = INVADER_GRID_SPAN / files as f32;
        let mut invaders = Vec::with_capacity((ranks * files) as usize);
        for rank in 0..ranks {
            for file in 0..files {
                let x = center_x + (files as f32 / 2.0 - file as f32) * file_spacing;
                let y = bounds.top + rank as f32 * INVADER_RANK_SPACING;
                invaders.push(Invader::new(Vec2::new(x, y), rank, file));
            }
        }

        let block_spacing = WALL_SPAN / WALL_FILES as f32;
        let mut wall = Vec::with_capacity((WALL_RANKS * WALL_FILES) as usize);
        for rank in 0..WALL_RANKS {
            for file in 0..WALL_FILES {
                let x = center_x + (WALL_FILES as f32 / 2.0 - file as f32) * block_spacing;
                let y = bounds.bottom + WALL_OFFSET_BELOW_GROUND + rank as f32 * WALL_BLOCK_HEIGHT;
                wall.push(WallBlock::new(Vec2::new(x, y)));
            }
        }

        Self {
            level,
            params,
            ship: Ship::new(Vec2::new(center_x, bounds.bottom)),
            controller: ShipController::default(),
            pose: ShipPose::Idle,
            invaders,
            rockets: Vec::new(),
            bombs: Vec::new(),
            wall,
            swarm: Swarm::new(params.invader_initial_velocity),
            last_fire_ms: None,
        }
    }
}
