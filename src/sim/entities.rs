//! Entity records
//!
//! Plain value types owned by the play field. Positions are sprite centers
//! in screen pixels, y growing downward.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Play-area rectangle inside the screen
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Bounds {
    /// Center a `width` x `height` play area on the screen
    pub fn centered(screen_width: f32, screen_height: f32, width: f32, height: f32) -> Self {
        Self {
            left: screen_width / 2.0 - width / 2.0,
            right: screen_width / 2.0 + width / 2.0,
            top: screen_height / 2.0 - height / 2.0,
            bottom: screen_height / 2.0 + height / 2.0,
        }
    }

    #[inline]
    pub fn clamp_x(&self, x: f32) -> f32 {
        x.clamp(self.left, self.right)
    }
}

/// Screen size plus the play bounds derived from it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub width: f32,
    pub height: f32,
    pub bounds: Bounds,
}

impl Layout {
    pub fn new(width: f32, height: f32, game_width: f32, game_height: f32) -> Self {
        Self {
            width,
            height,
            bounds: Bounds::centered(width, height, game_width, game_height),
        }
    }
}

/// The player's ship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ship {
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
    /// Upward speed in pixels per tick while airborne
    pub vertical_velocity: f32,
}

impl Ship {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            width: SHIP_WIDTH,
            height: SHIP_HEIGHT,
            vertical_velocity: 0.0,
        }
    }

    /// Half extents of the ship's box
    #[inline]
    pub fn half_size(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// An invader in the swarm
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invader {
    pub pos: Vec2,
    /// Row index; higher ranks are closer to the ship
    pub rank: u32,
    /// Column index
    pub file: u32,
    pub width: f32,
    pub height: f32,
}

impl Invader {
    pub fn new(pos: Vec2, rank: u32, file: u32) -> Self {
        Self {
            pos,
            rank,
            file,
            width: INVADER_WIDTH,
            height: INVADER_HEIGHT,
        }
    }

    #[inline]
    pub fn half_size(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}

/// A rocket fired by the ship; `velocity` is the upward speed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rocket {
    pub pos: Vec2,
    pub velocity: f32,
}

impl Rocket {
    pub fn new(pos: Vec2, velocity: f32) -> Self {
        Self { pos, velocity }
    }
}

/// A bomb dropped by an invader; `velocity` is the downward speed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bomb {
    pub pos: Vec2,
    pub velocity: f32,
}

impl Bomb {
    pub fn new(pos: Vec2, velocity: f32) -> Self {
        Self { pos, velocity }
    }
}

/// One brick of the wall strip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WallBlock {
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
}

impl WallBlock {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            width: WALL_BLOCK_WIDTH,
            height: WALL_BLOCK_HEIGHT,
        }
    }

    #[inline]
    pub fn half_size(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }
}
