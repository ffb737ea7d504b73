//! Screen states
//!
//! The game keeps a stack of these. Each variant supports a subset of
//! {enter, leave, update, draw, key down, key up}; a missing capability is
//! simply a no-op for that variant. Handlers never touch the stack
//! themselves, they return a [`Transition`] for the game to apply.

mod intro;
mod play;

pub use intro::LevelIntro;
pub use play::PlayState;

use crate::game::Context;
use crate::platform::Key;
use crate::render::{Frame, Renderer};

/// Stack change requested by a state
#[derive(Debug)]
pub enum Transition {
    /// Leave and pop the current state, then enter and push this one
    Replace(State),
    /// Enter and push this one on top of the current state
    Push(State),
    /// Leave and pop the current state
    Pop,
}

/// One screen of the game
#[derive(Debug)]
pub enum State {
    Welcome,
    LevelIntro(LevelIntro),
    Play(Box<PlayState>),
    Pause,
    GameOver,
}

impl State {
    pub fn level_intro(level: u32) -> Self {
        State::LevelIntro(LevelIntro::new(level))
    }

    pub fn play(level: u32) -> Self {
        State::Play(Box::new(PlayState::new(level)))
    }

    pub fn name(&self) -> &'static str {
        match self {
            State::Welcome => "welcome",
            State::LevelIntro(_) => "level-intro",
            State::Play(_) => "play",
            State::Pause => "pause",
            State::GameOver => "game-over",
        }
    }

    pub fn enter(&mut self, ctx: &mut Context<'_>) {
        match self {
            State::Welcome => ctx.audio.load_all(),
            State::Play(play) => play.enter(ctx),
            _ => {}
        }
    }

    pub fn leave(&mut self, ctx: &mut Context<'_>) {
        if let State::Play(play) = self {
            play.leave(ctx);
        }
    }

    pub fn update(&mut self, ctx: &mut Context<'_>, dt: f32) -> Option<Transition> {
        match self {
            State::LevelIntro(intro) => intro.update(dt),
            State::Play(play) => play.update(ctx, dt),
            _ => None,
        }
    }

    pub fn draw(&self, ctx: &Context<'_>, renderer: &mut dyn Renderer, dt: f32) {
        let frame = match self {
            State::Welcome => Frame::Welcome,
            State::LevelIntro(intro) => Frame::LevelIntro {
                level: intro.level(),
                countdown: intro.countdown_message(),
            },
            State::Play(play) => match play.view(ctx) {
                Some(view) => Frame::Play(view),
                None => return,
            },
            State::Pause => Frame::Paused,
            State::GameOver => Frame::GameOver {
                caught: ctx.session.lives,
                level: ctx.session.level,
            },
        };
        renderer.draw(&frame, dt);
    }

    pub fn on_key_down(&mut self, ctx: &mut Context<'_>, key: Key) -> Option<Transition> {
        match self {
            State::Welcome | State::GameOver if key == Key::Enter => {
                ctx.session.reset(ctx.config);
                Some(Transition::Replace(State::level_intro(ctx.session.level)))
            }
            State::Play(play) => play.on_key_down(ctx, key),
            State::Pause if key == Key::Pause => Some(Transition::Pop),
            _ => None,
        }
    }

    /// No state reacts to key releases beyond the pressed-key map
    pub fn on_key_up(&mut self, _ctx: &mut Context<'_>, _key: Key) -> Option<Transition> {
        None
    }
}
