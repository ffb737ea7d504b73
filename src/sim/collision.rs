//! Collision detection and response
//!
//! All tests are axis-aligned boxes around sprite centers. Projectiles are
//! points. Every projectile is consumed by at most one hit.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entities::Invader;
use super::state::{GameEvent, Playfield};
use crate::consts::*;

/// How a level stands after a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Continue,
    Lost,
    Won,
}

/// Point inside a box, edges included
#[inline]
pub fn point_in_box(point: Vec2, center: Vec2, half: Vec2) -> bool {
    point.x >= center.x - half.x
        && point.x <= center.x + half.x
        && point.y >= center.y - half.y
        && point.y <= center.y + half.y
}

/// Two boxes overlap with positive area (touching edges do not count)
#[inline]
pub fn boxes_overlap(a_center: Vec2, a_half: Vec2, b_center: Vec2, b_half: Vec2) -> bool {
    a_center.x + a_half.x > b_center.x - b_half.x
        && a_center.x - a_half.x < b_center.x + b_half.x
        && a_center.y + a_half.y > b_center.y - b_half.y
        && a_center.y - a_half.y < b_center.y + b_half.y
}

/// Rocket hit box: a full sprite width either side of the center, and a
/// vertical band squeezed by the sprite offset divisor.
pub fn rocket_hits_invader(rocket: Vec2, invader: &Invader) -> bool {
    let top = (invader.pos.y - invader.height) / INVADER_HIT_Y_DIVISOR;
    let bottom = (invader.pos.y + invader.height) / INVADER_HIT_Y_DIVISOR;
    rocket.x >= invader.pos.x - invader.width
        && rocket.x <= invader.pos.x + invader.width
        && rocket.y >= top
        && rocket.y <= bottom
}

/// Rockets against invaders, rank-major. The first rocket found inside an
/// invader's box takes it out; both are removed.
pub fn resolve_rocket_hits(field: &mut Playfield) -> Vec<GameEvent> {
    let Playfield {
        invaders, rockets, ..
    } = field;
    let mut events = Vec::new();

    invaders.retain(|invader| {
        match rockets
            .iter()
            .position(|rocket| rocket_hits_invader(rocket.pos, invader))
        {
            Some(hit) => {
                rockets.remove(hit);
                events.push(GameEvent::InvaderDestroyed {
                    rank: invader.rank,
                    file: invader.file,
                });
                false
            }
            None => true,
        }
    });

    events
}

/// Bombs landing on the ship are caught
pub fn resolve_bomb_catches(field: &mut Playfield) -> Vec<GameEvent> {
    let Playfield { ship, bombs, .. } = field;
    let half = ship.half_size();
    let mut events = Vec::new();

    bombs.retain(|bomb| {
        if point_in_box(bomb.pos, ship.pos, half) {
            events.push(GameEvent::BombCaught);
            false
        } else {
            true
        }
    });

    events
}

/// Bombs knock out the first wall block they touch
pub fn resolve_wall_hits(field: &mut Playfield) -> Vec<GameEvent> {
    let Playfield { wall, bombs, .. } = field;
    let mut events = Vec::new();

    bombs.retain(|bomb| {
        match wall
            .iter()
            .position(|block| point_in_box(bomb.pos, block.pos, block.half_size()))
        {
            Some(hit) => {
                wall.remove(hit);
                events.push(GameEvent::WallHit);
                false
            }
            None => true,
        }
    });

    events
}

/// Any invader touching the ship
pub fn ship_overrun(field: &Playfield) -> bool {
    let ship_half = field.ship.half_size();
    field
        .invaders
        .iter()
        .any(|invader| boxes_overlap(invader.pos, invader.half_size(), field.ship.pos, ship_half))
}

/// Run every collision pass for a tick, in order
pub fn resolve_collisions(field: &mut Playfield) -> Vec<GameEvent> {
    let mut events = resolve_rocket_hits(field);
    // Ship first: a caught bomb never reaches the wall
    events.extend(resolve_bomb_catches(field));
    events.extend(resolve_wall_hits(field));
    if ship_overrun(field) {
        events.push(GameEvent::ShipOverrun);
    }
    events
}

/// End-of-tick verdict.
///
/// An overrun loses outright. Otherwise the three failure terms are OR-ed:
/// wall gone, swarm cleared short of the target, or not enough invaders left
/// to reach it. Reaching the target overrides them, so a last kill that lands
/// exactly on it with the swarm cleared still wins.
pub fn evaluate_outcome(
    score: i32,
    invaders_left: usize,
    points_per_invader: i32,
    overrun: bool,
) -> Outcome {
    if overrun {
        return Outcome::Lost;
    }

    let wall_gone = score <= 0;
    let cleared_short = score < WINNING_SCORE && invaders_left == 0;
    let unwinnable = invaders_left as i32 * points_per_invader <= WINNING_SCORE - score;
    let failed = wall_gone || cleared_short || unwinnable;

    if score >= WINNING_SCORE {
        Outcome::Won
    } else if failed {
        Outcome::Lost
    } else {
        Outcome::Continue
    }
}
