//! Renderer boundary
//!
//! Drawing is done by the host. Each draw call hands it a read-only
//! [`Frame`] describing the active screen; nothing in a frame can mutate
//! the simulation.

use crate::sim::{Bomb, Bounds, Invader, Rocket, Ship, ShipPose, WallBlock};

/// Session counters shown on the HUD
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hud {
    /// Wall strength percentage
    pub score: i32,
    /// Enemies caught this session
    pub lives: u32,
    pub level: u32,
}

/// Everything needed to draw the play screen
#[derive(Debug, Clone, Copy)]
pub struct PlayView<'a> {
    pub ship: &'a Ship,
    pub pose: ShipPose,
    pub invaders: &'a [Invader],
    pub rockets: &'a [Rocket],
    pub bombs: &'a [Bomb],
    pub wall: &'a [WallBlock],
    pub hud: Hud,
    /// Present when debug mode is on
    pub debug_bounds: Option<Bounds>,
}

/// What to draw this tick
#[derive(Debug, Clone, Copy)]
pub enum Frame<'a> {
    Welcome,
    LevelIntro { level: u32, countdown: &'a str },
    Play(PlayView<'a>),
    Paused,
    GameOver { caught: u32, level: u32 },
}

impl Frame<'_> {
    /// Short screen name, for logs
    pub fn screen(&self) -> &'static str {
        match self {
            Frame::Welcome => "welcome",
            Frame::LevelIntro { .. } => "level-intro",
            Frame::Play(_) => "play",
            Frame::Paused => "paused",
            Frame::GameOver { .. } => "game-over",
        }
    }
}

/// Host-side drawing
pub trait Renderer {
    fn draw(&mut self, frame: &Frame<'_>, dt: f32);
}

/// Renderer that draws nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn draw(&mut self, _frame: &Frame<'_>, _dt: f32) {}
}
