//! The play state
//!
//! Owns one level's [`Playfield`]. Each tick runs the simulation, applies
//! the reported events to the session, then decides whether the level is
//! lost, won, or still going.

use super::{State, Transition};
use crate::audio::SoundEffect;
use crate::consts::*;
use crate::game::Context;
use crate::platform::Key;
use crate::render::{Hud, PlayView};
use crate::sim::{self, GameEvent, Outcome, Playfield, TickEnv, TickInput};

#[derive(Debug)]
pub struct PlayState {
    level: u32,
    /// Built on enter, dropped on leave
    field: Option<Playfield>,
}

impl PlayState {
    pub fn new(level: u32) -> Self {
        Self { level, field: None }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn field(&self) -> Option<&Playfield> {
        self.field.as_ref()
    }

    pub fn field_mut(&mut self) -> Option<&mut Playfield> {
        self.field.as_mut()
    }

    pub fn enter(&mut self, ctx: &mut Context<'_>) {
        let field = Playfield::new(ctx.config, ctx.layout, self.level, ctx.session.ship_speed);
        log::info!(
            "Entering level {}: {} invaders, swarm speed {:.1}, bomb rate {:.3}/s",
            self.level,
            field.invaders.len(),
            field.params.invader_initial_velocity,
            field.params.bomb_rate
        );
        self.field = Some(field);
    }

    pub fn leave(&mut self, _ctx: &mut Context<'_>) {
        log::debug!("Leaving level {}", self.level);
        self.field = None;
    }

    pub fn update(&mut self, ctx: &mut Context<'_>, dt: f32) -> Option<Transition> {
        let field = self.field.as_mut()?;

        let input = TickInput::from_keys(ctx.keys);
        let env = TickEnv {
            config: ctx.config,
            layout: ctx.layout,
            now_ms: ctx.clock.now_ms(),
        };
        let events = sim::tick(field, &input, &env, &mut *ctx.rng, dt);
        let overrun = apply_events(ctx, &events);

        let outcome = sim::evaluate_outcome(
            ctx.session.score,
            field.invaders.len(),
            ctx.config.points_per_invader,
            overrun,
        );
        match outcome {
            Outcome::Continue => None,
            Outcome::Lost => {
                log::info!(
                    "Game over on level {}: wall {}%, {} caught, {} invaders left",
                    self.level,
                    ctx.session.score,
                    ctx.session.lives,
                    field.invaders.len()
                );
                Some(Transition::Replace(State::GameOver))
            }
            Outcome::Won => {
                ctx.session.advance_level();
                log::info!(
                    "Level {} cleared, next level {} starts at {}%",
                    self.level,
                    ctx.session.level,
                    ctx.session.score
                );
                Some(Transition::Replace(State::level_intro(ctx.session.level)))
            }
        }
    }

    pub fn on_key_down(&mut self, ctx: &mut Context<'_>, key: Key) -> Option<Transition> {
        match key {
            Key::Fire => {
                let field = self.field.as_mut()?;
                if let Some(event) = sim::fire_rocket(field, ctx.config, ctx.clock.now_ms()) {
                    apply_events(ctx, &[event]);
                }
                None
            }
            Key::Pause => Some(Transition::Push(State::Pause)),
            _ => None,
        }
    }

    pub fn view<'a>(&'a self, ctx: &Context<'_>) -> Option<PlayView<'a>> {
        let field = self.field.as_ref()?;
        Some(PlayView {
            ship: &field.ship,
            pose: field.pose,
            invaders: &field.invaders,
            rockets: &field.rockets,
            bombs: &field.bombs,
            wall: &field.wall,
            hud: Hud {
                score: ctx.session.score,
                lives: ctx.session.lives,
                level: ctx.session.level,
            },
            debug_bounds: ctx.config.debug_mode.then_some(ctx.layout.bounds),
        })
    }
}

/// Apply tick events to the session and play their cues.
/// Returns true if an invader reached the ship.
fn apply_events(ctx: &mut Context<'_>, events: &[GameEvent]) -> bool {
    let mut overrun = false;
    for event in events {
        match event {
            GameEvent::RocketFired => {
                ctx.session.score -= ROCKET_COST;
                ctx.audio.play(SoundEffect::Shoot);
            }
            GameEvent::InvaderDestroyed { rank, file } => {
                ctx.session.score += ctx.config.points_per_invader;
                log::debug!("Invader ({rank}, {file}) destroyed");
                ctx.audio.play(SoundEffect::Bang);
            }
            GameEvent::BombCaught => {
                ctx.session.lives += 1;
                ctx.audio.play(SoundEffect::Explosion);
            }
            GameEvent::WallHit => {
                ctx.session.score -= WALL_HIT_PENALTY;
                ctx.audio.play(SoundEffect::Explosion);
            }
            GameEvent::ShipOverrun => {
                ctx.session.lives = 0;
                overrun = true;
                ctx.audio.play(SoundEffect::Explosion);
            }
        }
    }
    overrun
}
