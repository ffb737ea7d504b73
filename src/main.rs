//! Invader Wall headless driver
//!
//! Runs the game at its fixed tick rate against a scripted autopilot, a
//! logging renderer and a recording sound backend. Usage:
//!
//! ```text
//! invader-wall [config.json] [seconds]
//! ```

use std::error::Error;

use invader_wall::audio::{AudioManager, SoundEffect, SoundLog};
use invader_wall::platform::{Key, ManualClock};
use invader_wall::render::{Frame, Renderer};
use invader_wall::states::State;
use invader_wall::{Game, GameConfig};

const SCREEN_WIDTH: f32 = 800.0;
const SCREEN_HEIGHT: f32 = 600.0;
const DEFAULT_SECONDS: u32 = 120;
const SEED: u64 = 0x1DEA_F00D;

/// Logs screen changes, and the HUD once a second while playing
#[derive(Default)]
struct LogRenderer {
    screen: &'static str,
    since_hud: f32,
}

impl Renderer for LogRenderer {
    fn draw(&mut self, frame: &Frame<'_>, dt: f32) {
        if frame.screen() != self.screen {
            self.screen = frame.screen();
            match frame {
                Frame::LevelIntro { level, .. } => log::info!("Screen: level {level} intro"),
                Frame::GameOver { caught, level } => {
                    log::info!("Screen: game over on level {level}, {caught} caught")
                }
                _ => log::info!("Screen: {}", self.screen),
            }
        }

        self.since_hud += dt;
        if self.since_hud < 1.0 {
            return;
        }
        if let Frame::Play(view) = frame {
            self.since_hud = 0.0;
            log::debug!(
                "wall {}% | caught {} | level {} | invaders {} | bombs {} | rockets {}",
                view.hud.score,
                view.hud.lives,
                view.hud.level,
                view.invaders.len(),
                view.bombs.len(),
                view.rockets.len()
            );
        }
    }
}

/// Scripted player: starts games, chases the lowest bomb, keeps firing
#[derive(Default)]
struct Autopilot {
    held: Option<Key>,
}

impl Autopilot {
    fn steer(&mut self, game: &mut Game) {
        if matches!(game.current_state(), Some(State::Welcome | State::GameOver)) {
            game.key_down(Key::Enter);
            game.key_up(Key::Enter);
        }

        let wanted = match game.current_state() {
            Some(State::Play(play)) => play.field().and_then(|field| {
                let target = field
                    .bombs
                    .iter()
                    .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
                    .map(|bomb| bomb.pos.x)
                    .or_else(|| field.invaders.last().map(|invader| invader.pos.x))?;
                let dx = target - field.ship.pos.x;
                if dx.abs() < field.ship.width / 4.0 {
                    None
                } else if dx < 0.0 {
                    Some(Key::Left)
                } else {
                    Some(Key::Right)
                }
            }),
            _ => None,
        };

        if wanted != self.held {
            if let Some(key) = self.held.take() {
                game.key_up(key);
            }
            if let Some(key) = wanted {
                game.key_down(key);
            }
            self.held = wanted;
        }

        let playing = matches!(game.current_state(), Some(State::Play(_)));
        if playing != game.keys().is_pressed(Key::Fire) {
            if playing {
                game.key_down(Key::Fire);
            } else {
                game.key_up(Key::Fire);
            }
        }
    }
}

fn load_config(path: Option<&String>) -> Result<GameConfig, Box<dyn Error>> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)?;
            let config = GameConfig::from_json(&json)?;
            log::info!("Loaded config from {path}");
            Ok(config)
        }
        None => Ok(GameConfig::default()),
    }
}

/// Ticks in a run of `seconds`, rejecting runs too long to count
fn tick_count(seconds: u32, fps: u32) -> Result<u32, String> {
    seconds
        .checked_mul(fps)
        .ok_or_else(|| format!("{seconds}s at {fps} ticks/s is too long a run"))
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    log::info!("Invader Wall (headless) starting...");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = load_config(args.first())?;
    let seconds = match args.get(1) {
        Some(s) => s.parse::<u32>()?,
        None => DEFAULT_SECONDS,
    };

    let dt = config.tick_dt();
    let interval_ms = config.tick_interval().as_secs_f64() * 1000.0;
    let ticks = tick_count(seconds, config.fps)?;

    let sounds = SoundLog::new();
    let clock = ManualClock::new();
    let mut game = Game::new(config, SCREEN_WIDTH, SCREEN_HEIGHT)?
        .with_audio(AudioManager::new(Box::new(sounds.clone())))
        .with_clock(Box::new(clock.clone()))
        .with_seed(SEED);
    game.start();

    let mut renderer = LogRenderer::default();
    let mut pilot = Autopilot::default();
    let mut best_level = 1;
    for _ in 0..ticks {
        if !game.is_running() {
            break;
        }
        pilot.steer(&mut game);
        game.tick(dt, &mut renderer);
        clock.advance_ms(interval_ms);
        best_level = best_level.max(game.session().level);
    }
    game.stop();

    let session = game.session();
    log::info!(
        "Simulated {seconds}s: reached level {best_level}, final wall {}%, {} caught",
        session.score,
        session.lives
    );
    log::info!(
        "Sounds played: {} shoot, {} bang, {} explosion",
        sounds.count(SoundEffect::Shoot),
        sounds.count(SoundEffect::Bang),
        sounds.count(SoundEffect::Explosion)
    );
    Ok(())
}
