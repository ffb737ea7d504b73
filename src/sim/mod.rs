//! Simulation module
//!
//! All gameplay logic for a running level lives here:
//! - Fixed timestep only (`dt` per tick)
//! - Seeded RNG only (bomb drops and bomb speed)
//! - Stable iteration order (rank-major invaders, file-ordered bombing)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod difficulty;
pub mod entities;
pub mod state;
pub mod tick;

pub use collision::{Outcome, evaluate_outcome, resolve_collisions};
pub use difficulty::{LevelParams, rebased_score};
pub use entities::{Bomb, Bounds, Invader, Layout, Rocket, Ship, WallBlock};
pub use state::{GameEvent, Playfield, ShipController, ShipPose, Swarm};
pub use tick::{TickEnv, TickInput, fire_rocket, tick};
