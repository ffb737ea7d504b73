//! Fixed timestep simulation tick
//!
//! Advances one level by one tick: ship control, projectiles, swarm,
//! bombs, then collisions. Session counters are never touched here; the
//! tick reports [`GameEvent`]s and the caller applies them.

use std::collections::BTreeMap;

use glam::Vec2;
use rand::Rng;

use super::collision::resolve_collisions;
use super::entities::{Bomb, Bounds, Invader, Layout, Rocket};
use super::state::{GameEvent, Playfield, ShipPose, Swarm};
use crate::config::GameConfig;
use crate::consts::*;
use crate::platform::{Key, PressedKeys};

/// Reaching the bottom of the play area would end the game. The check is
/// kept as a hook but switched off.
const SWARM_BOTTOM_LOSS: bool = false;

/// Held-key snapshot for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub fire: bool,
}

impl TickInput {
    pub fn from_keys(keys: &PressedKeys) -> Self {
        Self {
            left: keys.is_pressed(Key::Left),
            right: keys.is_pressed(Key::Right),
            up: keys.is_pressed(Key::Up),
            fire: keys.is_pressed(Key::Fire),
        }
    }
}

/// Read-only inputs every tick needs besides the keys
#[derive(Debug, Clone, Copy)]
pub struct TickEnv<'a> {
    pub config: &'a GameConfig,
    pub layout: &'a Layout,
    /// Wall-clock time for the fire-rate limiter
    pub now_ms: f64,
}

/// Advance the play field by one fixed timestep
pub fn tick<R: Rng>(
    field: &mut Playfield,
    input: &TickInput,
    env: &TickEnv<'_>,
    rng: &mut R,
    dt: f32,
) -> Vec<GameEvent> {
    let mut events = Vec::new();
    let bounds = env.layout.bounds;

    control_ship(field, input, &bounds, dt);
    if input.fire {
        events.extend(fire_rocket(field, env.config, env.now_ms));
    }

    advance_projectiles(field, env.layout.height, dt);

    if advance_swarm(field, &bounds, env.config, dt) {
        log::debug!(
            "Swarm bounced, speed now {:.1}, resuming at {:?}",
            field.swarm.speed,
            field.swarm.next_velocity
        );
    }

    drop_bombs(field, dt, rng);

    events.extend(resolve_collisions(field));

    field.pose = select_pose(field, input, dt);

    events
}

/// Walk, jump and clamp the ship
pub fn control_ship(field: &mut Playfield, input: &TickInput, bounds: &Bounds, dt: f32) {
    let ship = &mut field.ship;
    let controller = &mut field.controller;
    let speed = field.params.ship_speed;

    controller.walking = false;
    if input.left {
        ship.pos.x -= speed * dt;
        controller.walking = true;
    }
    if input.right {
        ship.pos.x += speed * dt;
        controller.walking = true;
    }

    let jump_pressed = input.up && !controller.up_held;
    controller.up_held = input.up;
    if jump_pressed && !controller.airborne {
        controller.airborne = true;
        ship.vertical_velocity = SHIP_JUMP_VELOCITY;
    }

    if controller.airborne {
        ship.pos.y -= ship.vertical_velocity;
        ship.vertical_velocity -= SHIP_GRAVITY;
        if ship.pos.y >= bounds.bottom {
            ship.pos.y = bounds.bottom;
            ship.vertical_velocity = 0.0;
            controller.airborne = false;
        }
    }

    ship.pos.x = bounds.clamp_x(ship.pos.x);
}

/// Fire a rocket if the fire-rate limit allows it.
///
/// Any attempt puts the ship in its throwing pose, even a rate-limited one.
pub fn fire_rocket(field: &mut Playfield, config: &GameConfig, now_ms: f64) -> Option<GameEvent> {
    field.controller.throwing = true;

    let ready = match field.last_fire_ms {
        None => true,
        Some(last) => now_ms - last > config.rocket_cooldown_ms(),
    };
    if !ready {
        return None;
    }

    let nose = field.ship.pos - Vec2::new(0.0, ROCKET_SPAWN_OFFSET);
    field.rockets.push(Rocket::new(nose, config.rocket_velocity));
    field.last_fire_ms = Some(now_ms);
    Some(GameEvent::RocketFired)
}

/// Move bombs down and rockets up, dropping any that leave the screen
pub fn advance_projectiles(field: &mut Playfield, screen_height: f32, dt: f32) {
    for bomb in &mut field.bombs {
        bomb.pos.y += bomb.velocity * dt;
    }
    field.bombs.retain(|bomb| bomb.pos.y <= screen_height);

    for rocket in &mut field.rockets {
        rocket.pos.y -= rocket.velocity * dt;
    }
    field.rockets.retain(|rocket| rocket.pos.y >= 0.0);
}

/// Move the swarm in lockstep. Returns true if it bounced off a side.
///
/// If any invader would cross a side bound, nobody moves and the swarm
/// switches to its drop phase with a faster, reversed velocity queued.
/// A grid wider than the play area can cross both sides at once; both
/// bounces then apply, left first.
pub fn advance_swarm(field: &mut Playfield, bounds: &Bounds, config: &GameConfig, dt: f32) -> bool {
    let swarm = &mut field.swarm;
    let step = swarm.velocity * dt;

    let mut hit_left = false;
    let mut hit_right = false;
    for invader in &field.invaders {
        let new_x = invader.pos.x + step.x;
        hit_left |= new_x < bounds.left;
        hit_right |= new_x > bounds.right;
    }
    let hit_bottom = SWARM_BOTTOM_LOSS
        && field
            .invaders
            .iter()
            .any(|invader| invader.pos.y + step.y > bounds.bottom);

    if !hit_left && !hit_right && !hit_bottom {
        for invader in &mut field.invaders {
            invader.pos.x += step.x;
        }
    }

    if swarm.dropping {
        swarm.drop_progress += swarm.velocity.y * dt;
        if swarm.drop_progress >= config.invader_drop_distance {
            swarm.dropping = false;
            swarm.drop_progress = 0.0;
            if let Some(next) = swarm.next_velocity.take() {
                swarm.velocity = next;
            }
        }
    }

    if hit_left {
        bounce(swarm, config.invader_acceleration, 1.0);
    }
    if hit_right {
        bounce(swarm, config.invader_acceleration, -1.0);
    }
    hit_left || hit_right
}

/// Speed up, start a drop, and queue the horizontal velocity to resume with
fn bounce(swarm: &mut Swarm, acceleration: f32, direction: f32) {
    swarm.speed += acceleration;
    swarm.velocity = Vec2::new(0.0, swarm.speed);
    swarm.dropping = true;
    swarm.next_velocity = Some(Vec2::new(direction * swarm.speed, 0.0));
}

/// Surviving invader with the highest rank in each file, by file index
pub fn front_invaders(invaders: &[Invader]) -> BTreeMap<u32, usize> {
    let mut front: BTreeMap<u32, usize> = BTreeMap::new();
    for (idx, invader) in invaders.iter().enumerate() {
        let entry = front.entry(invader.file).or_insert(idx);
        if invaders[*entry].rank < invader.rank {
            *entry = idx;
        }
    }
    front
}

/// Give every front invader an independent chance to drop a bomb
pub fn drop_bombs<R: Rng>(field: &mut Playfield, dt: f32, rng: &mut R) {
    let params = field.params;
    let chance = params.bomb_rate * dt;
    for idx in front_invaders(&field.invaders).into_values() {
        if chance > rng.random::<f32>() {
            let invader = &field.invaders[idx];
            let velocity = params.bomb_min_velocity
                + rng.random::<f32>() * (params.bomb_max_velocity - params.bomb_min_velocity);
            let pos = invader.pos + Vec2::new(0.0, invader.height / 2.0);
            field.bombs.push(Bomb::new(pos, velocity));
        }
    }
}

/// Pick the ship sprite for this tick
fn select_pose(field: &mut Playfield, input: &TickInput, dt: f32) -> ShipPose {
    let controller = &mut field.controller;
    controller.advance_pace(dt);

    if controller.walking {
        let (held, jump_pose, frame) = if controller.second_frame {
            (input.right, ShipPose::JumpRight, 1)
        } else {
            (input.left, ShipPose::JumpLeft, 0)
        };
        if held && controller.airborne {
            jump_pose
        } else if held && controller.throwing {
            controller.throwing = false;
            ShipPose::Throw
        } else {
            ShipPose::Walk { frame }
        }
    } else if controller.airborne {
        ShipPose::JumpUp
    } else if controller.throwing {
        controller.throwing = false;
        ShipPose::Throw
    } else {
        ShipPose::Idle
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entities::Ship;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const DT: f32 = 0.02;

    fn layout() -> Layout {
        Layout::new(800.0, 600.0, 700.0, 300.0)
    }

    fn field_with(config: &GameConfig) -> Playfield {
        Playfield::new(config, &layout(), 1, config.ship_speed)
    }

    #[test]
    fn test_ship_walks_and_clamps() {
        let config = GameConfig::default();
        let mut field = field_with(&config);
        let bounds = layout().bounds;
        let left = TickInput {
            left: true,
            ..Default::default()
        };

        control_ship(&mut field, &left, &bounds, DT);
        assert!((field.ship.pos.x - (400.0 - 150.0 * DT)).abs() < 1e-3);
        assert!(field.controller.walking);

        for _ in 0..1000 {
            control_ship(&mut field, &left, &bounds, DT);
        }
        assert_eq!(field.ship.pos.x, bounds.left);
    }

    #[test]
    fn test_jump_arc_lands_on_ground() {
        let config = GameConfig::default();
        let mut field = field_with(&config);
        let bounds = layout().bounds;
        let up = TickInput {
            up: true,
            ..Default::default()
        };

        control_ship(&mut field, &up, &bounds, DT);
        assert!(field.controller.airborne);
        assert_eq!(field.ship.pos.y, bounds.bottom - SHIP_JUMP_VELOCITY);

        let mut ticks = 1;
        while field.controller.airborne {
            // Holding up does not re-trigger a jump
            control_ship(&mut field, &up, &bounds, DT);
            ticks += 1;
            assert!(ticks < 100, "ship never landed");
        }
        assert_eq!(field.ship.pos.y, bounds.bottom);
        assert_eq!(field.ship.vertical_velocity, 0.0);

        // Still holding: no new jump until released and pressed again
        control_ship(&mut field, &up, &bounds, DT);
        assert!(!field.controller.airborne);
        control_ship(&mut field, &TickInput::default(), &bounds, DT);
        control_ship(&mut field, &up, &bounds, DT);
        assert!(field.controller.airborne);
    }

    #[test]
    fn test_projectiles_leave_screen() {
        let config = GameConfig::default();
        let mut field = field_with(&config);
        field.bombs = vec![
            Bomb::new(Vec2::new(100.0, 599.5), 50.0),
            Bomb::new(Vec2::new(110.0, 300.0), 50.0),
            Bomb::new(Vec2::new(120.0, 599.9), 50.0),
        ];
        field.rockets = vec![
            Rocket::new(Vec2::new(100.0, 0.5), 120.0),
            Rocket::new(Vec2::new(200.0, 200.0), 120.0),
        ];

        advance_projectiles(&mut field, 600.0, DT);

        assert_eq!(field.bombs.len(), 1);
        assert_eq!(field.bombs[0].pos.x, 110.0);
        assert_eq!(field.rockets.len(), 1);
        assert_eq!(field.rockets[0].pos.x, 200.0);
    }

    #[test]
    fn test_fire_rate_limit() {
        let config = GameConfig::default();
        let mut field = field_with(&config);

        assert_eq!(fire_rocket(&mut field, &config, 1000.0), Some(GameEvent::RocketFired));
        assert_eq!(fire_rocket(&mut field, &config, 1400.0), None);
        // Exactly at the cooldown is still too soon
        assert_eq!(fire_rocket(&mut field, &config, 1500.0), None);
        assert_eq!(fire_rocket(&mut field, &config, 1500.5), Some(GameEvent::RocketFired));
        assert_eq!(field.rockets.len(), 2);
        assert_eq!(field.rockets[0].pos, Vec2::new(400.0, 450.0 - ROCKET_SPAWN_OFFSET));
        assert!(field.controller.throwing);
    }

    #[test]
    fn test_swarm_bounce_reverses_and_accelerates() {
        let config = GameConfig {
            invader_acceleration: 5.0,
            ..Default::default()
        };
        let mut field = field_with(&config);
        let bounds = layout().bounds;
        let old_speed = field.swarm.speed;

        // Put the leftmost invader right at the left bound
        let shift = field
            .invaders
            .iter()
            .map(|i| i.pos.x)
            .fold(f32::INFINITY, f32::min)
            - bounds.left;
        for invader in &mut field.invaders {
            invader.pos.x -= shift;
        }
        let before: Vec<Vec2> = field.invaders.iter().map(|i| i.pos).collect();

        assert!(advance_swarm(&mut field, &bounds, &config, DT));
        assert!(field.swarm.dropping);
        assert_eq!(field.swarm.velocity.x, 0.0);
        assert_eq!(field.swarm.speed, old_speed + 5.0);

        // Frozen for the whole drop phase
        let mut ticks = 0;
        while field.swarm.dropping {
            let positions: Vec<Vec2> = field.invaders.iter().map(|i| i.pos).collect();
            assert_eq!(positions, before);
            advance_swarm(&mut field, &bounds, &config, DT);
            ticks += 1;
            assert!(ticks < 1000, "drop phase never ended");
        }

        assert_eq!(field.swarm.velocity, Vec2::new(old_speed + 5.0, 0.0));
        assert_eq!(field.swarm.drop_progress, 0.0);

        advance_swarm(&mut field, &bounds, &config, DT);
        assert!(field.invaders[0].pos.x > before[0].x);
        // Only x ever moves
        assert_eq!(field.invaders[0].pos.y, before[0].y);
    }

    #[test]
    fn test_swarm_wider_than_play_area_bounces_twice() {
        let config = GameConfig {
            invader_acceleration: 5.0,
            game_width: 400.0,
            ..Default::default()
        };
        let layout = Layout::new(800.0, 600.0, 400.0, 300.0);
        let mut field = Playfield::new(&config, &layout, 1, config.ship_speed);
        let bounds = layout.bounds;
        let old_speed = field.swarm.speed;
        // The 510 px grid overhangs a 400 px play area on both sides
        assert!(field.invaders.iter().any(|i| i.pos.x < bounds.left));
        assert!(field.invaders.iter().any(|i| i.pos.x > bounds.right));

        assert!(advance_swarm(&mut field, &bounds, &config, DT));
        assert_eq!(field.swarm.speed, old_speed + 10.0);
        assert_eq!(field.swarm.velocity, Vec2::new(0.0, old_speed + 10.0));
        assert_eq!(
            field.swarm.next_velocity,
            Some(Vec2::new(-(old_speed + 10.0), 0.0))
        );
    }

    #[test]
    fn test_front_invaders() {
        let config = GameConfig {
            invader_ranks: 3,
            invader_files: 4,
            ..Default::default()
        };
        let mut field = field_with(&config);
        // Knock out (2, 1) and (2, 3), (1, 3)
        field
            .invaders
            .retain(|i| !matches!((i.rank, i.file), (2, 1) | (2, 3) | (1, 3)));

        let front = front_invaders(&field.invaders);
        let ranks: Vec<(u32, u32)> = front
            .iter()
            .map(|(file, idx)| (*file, field.invaders[*idx].rank))
            .collect();
        assert_eq!(ranks, vec![(0, 2), (1, 1), (2, 2), (3, 0)]);
    }

    #[test]
    fn test_bombs_only_from_front_rank() {
        let config = GameConfig {
            bomb_rate: 1000.0,
            bomb_min_velocity: 40.0,
            bomb_max_velocity: 60.0,
            level_difficulty_multiplier: 0.0,
            ..Default::default()
        };
        let mut field = field_with(&config);
        let mut rng = Pcg32::seed_from_u64(7);

        drop_bombs(&mut field, DT, &mut rng);

        // Chance is 20 per tick: every file drops exactly one bomb
        assert_eq!(field.bombs.len(), config.invader_files as usize);
        let front_y = field.invaders.iter().map(|i| i.pos.y).fold(f32::MIN, f32::max);
        for bomb in &field.bombs {
            assert_eq!(bomb.pos.y, front_y + INVADER_HEIGHT / 2.0);
            assert!((40.0..=60.0).contains(&bomb.velocity));
        }
    }

    #[test]
    fn test_no_bombs_at_zero_rate() {
        let config = GameConfig {
            bomb_rate: 0.0,
            ..Default::default()
        };
        let mut field = field_with(&config);
        let mut rng = Pcg32::seed_from_u64(1);
        for _ in 0..500 {
            drop_bombs(&mut field, DT, &mut rng);
        }
        assert!(field.bombs.is_empty());
    }

    #[test]
    fn test_tick_determinism() {
        let config = GameConfig {
            bomb_rate: 5.0,
            ..Default::default()
        };
        let layout = layout();
        let env = TickEnv {
            config: &config,
            layout: &layout,
            now_ms: 0.0,
        };
        let mut a = field_with(&config);
        let mut b = field_with(&config);
        let mut rng_a = Pcg32::seed_from_u64(99);
        let mut rng_b = Pcg32::seed_from_u64(99);
        let input = TickInput {
            right: true,
            ..Default::default()
        };

        for _ in 0..200 {
            tick(&mut a, &input, &env, &mut rng_a, DT);
            tick(&mut b, &input, &env, &mut rng_b, DT);
        }
        assert_eq!(a.bombs, b.bombs);
        assert_eq!(a.invaders, b.invaders);
        assert_eq!(a.ship, b.ship);
    }

    #[test]
    fn test_pose_selection() {
        let config = GameConfig::default();
        let mut field = field_with(&config);
        let idle = TickInput::default();
        assert_eq!(select_pose(&mut field, &idle, DT), ShipPose::Idle);

        field.controller.throwing = true;
        assert_eq!(select_pose(&mut field, &idle, DT), ShipPose::Throw);
        // Throw pose is shown once
        assert_eq!(select_pose(&mut field, &idle, DT), ShipPose::Idle);

        field.controller.airborne = true;
        assert_eq!(select_pose(&mut field, &idle, DT), ShipPose::JumpUp);

        field.controller.airborne = false;
        field.controller.walking = true;
        let pose = select_pose(&mut field, &idle, DT);
        assert!(matches!(pose, ShipPose::Walk { .. }));
    }

    proptest! {
        #[test]
        fn ship_stays_in_bounds(moves in prop::collection::vec((any::<bool>(), any::<bool>(), any::<bool>()), 1..300)) {
            let config = GameConfig { ship_speed: 900.0, ..Default::default() };
            let mut field = field_with(&config);
            let bounds = layout().bounds;
            for (left, right, up) in moves {
                let input = TickInput { left, right, up, fire: false };
                control_ship(&mut field, &input, &bounds, DT);
                prop_assert!(field.ship.pos.x >= bounds.left && field.ship.pos.x <= bounds.right);
                prop_assert!(field.ship.pos.y <= bounds.bottom);
            }
        }

        #[test]
        fn projectiles_never_linger_offscreen(ys in prop::collection::vec(-50.0f32..700.0, 0..40)) {
            let config = GameConfig::default();
            let mut field = field_with(&config);
            field.bombs = ys.iter().map(|&y| Bomb::new(Vec2::new(10.0, y), 50.0)).collect();
            field.rockets = ys.iter().map(|&y| Rocket::new(Vec2::new(10.0, y), 120.0)).collect();
            advance_projectiles(&mut field, 600.0, DT);
            prop_assert!(field.bombs.iter().all(|b| b.pos.y <= 600.0));
            prop_assert!(field.rockets.iter().all(|r| r.pos.y >= 0.0));
        }
    }

    #[test]
    fn test_ship_helper_box() {
        let ship = Ship::new(Vec2::ZERO);
        assert_eq!(ship.half_size(), Vec2::new(25.0, 25.0));
    }
}
