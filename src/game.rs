//! Game object
//!
//! Owns the session counters, the state stack, the pressed-key map and the
//! collaborators (audio, clock, RNG). An external driver calls [`Game::tick`]
//! once per fixed interval and forwards key events in between.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::audio::AudioManager;
use crate::config::GameConfig;
use crate::consts::*;
use crate::error::ConfigError;
use crate::platform::{Clock, Key, PressedKeys, SystemClock};
use crate::render::Renderer;
use crate::sim::{Layout, rebased_score};
use crate::states::{State, Transition};

/// Counters that persist across levels of one playthrough
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    /// Enemies caught this session
    pub lives: u32,
    /// Wall strength percentage
    pub score: i32,
    pub level: u32,
    /// Ship speed, grows with every level won
    pub ship_speed: f32,
}

impl Session {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            lives: 0,
            score: STARTING_SCORE,
            level: 1,
            ship_speed: config.ship_speed,
        }
    }

    /// Back to a fresh playthrough
    pub fn reset(&mut self, config: &GameConfig) {
        *self = Self::new(config);
    }

    /// Move on after a won level: rebase the wall and speed up the ship
    pub fn advance_level(&mut self) {
        self.level += 1;
        self.score = rebased_score(self.level);
        self.ship_speed += SHIP_SPEED_INCREMENT;
    }
}

/// What a state handler gets to see and change
pub struct Context<'a> {
    pub config: &'a GameConfig,
    pub layout: &'a Layout,
    pub session: &'a mut Session,
    pub keys: &'a PressedKeys,
    pub audio: &'a mut AudioManager,
    pub rng: &'a mut Pcg32,
    pub clock: &'a dyn Clock,
}

/// A game instance
pub struct Game {
    config: GameConfig,
    layout: Layout,
    session: Session,
    stack: Vec<State>,
    keys: PressedKeys,
    audio: AudioManager,
    clock: Box<dyn Clock>,
    rng: Pcg32,
    running: bool,
}

/// Build a [`Context`] from disjoint fields of a [`Game`], leaving the
/// state stack free to borrow.
macro_rules! context {
    ($game:expr) => {
        Context {
            config: &$game.config,
            layout: &$game.layout,
            session: &mut $game.session,
            keys: &$game.keys,
            audio: &mut $game.audio,
            rng: &mut $game.rng,
            clock: &*$game.clock,
        }
    };
}

impl Game {
    /// Create a game for a `screen_width` x `screen_height` screen. The play
    /// area from the config is centered on the screen.
    pub fn new(config: GameConfig, screen_width: f32, screen_height: f32) -> Result<Self, ConfigError> {
        config.validate()?;
        if !(screen_width > 0.0 && screen_height > 0.0) {
            return Err(ConfigError::InvalidScreen {
                width: screen_width,
                height: screen_height,
            });
        }
        if screen_width < config.game_width || screen_height < config.game_height {
            log::warn!(
                "Play area {}x{} is larger than the {}x{} screen",
                config.game_width,
                config.game_height,
                screen_width,
                screen_height
            );
        }

        let layout = Layout::new(screen_width, screen_height, config.game_width, config.game_height);
        let session = Session::new(&config);
        Ok(Self {
            config,
            layout,
            session,
            stack: Vec::new(),
            keys: PressedKeys::new(),
            audio: AudioManager::silent(),
            clock: Box::new(SystemClock::new()),
            rng: Pcg32::seed_from_u64(rand::random()),
            running: false,
        })
    }

    pub fn with_audio(mut self, audio: AudioManager) -> Self {
        self.audio = audio;
        self
    }

    pub fn with_clock(mut self, clock: Box<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Fix the bomb RNG so runs replay identically
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Pcg32::seed_from_u64(seed);
        self
    }

    /// Move to the welcome screen and mark the game as running. Keys held
    /// from an earlier run are forgotten.
    pub fn start(&mut self) {
        self.keys.clear();
        self.session.reset(&self.config);
        self.replace_state(State::Welcome);
        self.running = true;
        log::info!(
            "Game started on a {}x{} screen, {} ticks/s",
            self.layout.width,
            self.layout.height,
            self.config.fps
        );
    }

    /// The driver's only cancellation primitive
    pub fn stop(&mut self) {
        self.running = false;
        log::info!("Game stopped");
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    pub fn keys(&self) -> &PressedKeys {
        &self.keys
    }

    pub fn audio_mut(&mut self) -> &mut AudioManager {
        &mut self.audio
    }

    /// Mute (`Some(true)`), unmute (`Some(false)`) or toggle (`None`)
    pub fn mute(&mut self, mute: Option<bool>) {
        match mute {
            Some(muted) => self.audio.set_muted(muted),
            None => self.audio.toggle_muted(),
        }
    }

    pub fn current_state(&self) -> Option<&State> {
        self.stack.last()
    }

    pub fn current_state_mut(&mut self) -> Option<&mut State> {
        self.stack.last_mut()
    }

    pub fn stack_depth(&self) -> usize {
        self.stack.len()
    }

    /// Leave and pop the current state (if any), then enter and push `state`
    pub fn replace_state(&mut self, mut state: State) {
        let mut ctx = context!(self);
        if let Some(mut current) = self.stack.pop() {
            current.leave(&mut ctx);
            log::debug!("Leaving {}", current.name());
        }
        state.enter(&mut ctx);
        log::debug!("Entering {}", state.name());
        self.stack.push(state);
    }

    /// Enter and push `state` on top of the current one
    pub fn push_state(&mut self, mut state: State) {
        let mut ctx = context!(self);
        state.enter(&mut ctx);
        log::debug!("Pushing {}", state.name());
        self.stack.push(state);
    }

    /// Leave and pop the current state, exposing the one below
    pub fn pop_state(&mut self) {
        let mut ctx = context!(self);
        if let Some(mut current) = self.stack.pop() {
            current.leave(&mut ctx);
            log::debug!("Popped {}", current.name());
        }
    }

    /// Update then draw the current state, once each, then apply whatever
    /// transition the update asked for.
    pub fn tick(&mut self, dt: f32, renderer: &mut dyn Renderer) {
        let mut ctx = context!(self);
        let Some(state) = self.stack.last_mut() else {
            return;
        };
        let transition = state.update(&mut ctx, dt);
        state.draw(&ctx, renderer, dt);
        if let Some(transition) = transition {
            self.apply(transition);
        }
    }

    /// Record a key press and forward it to the current state
    pub fn key_down(&mut self, key: Key) {
        self.keys.press(key);
        let mut ctx = context!(self);
        let transition = self
            .stack
            .last_mut()
            .and_then(|state| state.on_key_down(&mut ctx, key));
        if let Some(transition) = transition {
            self.apply(transition);
        }
    }

    /// Record a key release and forward it to the current state
    pub fn key_up(&mut self, key: Key) {
        self.keys.release(key);
        let mut ctx = context!(self);
        let transition = self
            .stack
            .last_mut()
            .and_then(|state| state.on_key_up(&mut ctx, key));
        if let Some(transition) = transition {
            self.apply(transition);
        }
    }

    fn apply(&mut self, transition: Transition) {
        match transition {
            Transition::Replace(state) => self.replace_state(state),
            Transition::Push(state) => self.push_state(state),
            Transition::Pop => self.pop_state(),
        }
    }
}
