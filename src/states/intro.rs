//! Level intro countdown

use super::{State, Transition};
use crate::consts::LEVEL_COUNTDOWN;

/// Shows "Level N" with a 3-2-1 countdown, then starts the level
#[derive(Debug, Clone, PartialEq)]
pub struct LevelIntro {
    level: u32,
    /// Seconds left; counted down by `dt`, never by timestamps
    remaining: f32,
    message: &'static str,
}

impl LevelIntro {
    pub fn new(level: u32) -> Self {
        Self {
            level,
            remaining: LEVEL_COUNTDOWN,
            message: "3",
        }
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    pub fn countdown_message(&self) -> &'static str {
        self.message
    }

    pub fn update(&mut self, dt: f32) -> Option<Transition> {
        self.remaining -= dt;

        if self.remaining < 2.0 {
            self.message = "2";
        }
        if self.remaining < 1.0 {
            self.message = "1";
        }
        if self.remaining <= 1.0 {
            log::info!("Level {} starting", self.level);
            return Some(Transition::Replace(State::play(self.level)));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_countdown_messages() {
        let mut intro = LevelIntro::new(4);
        assert_eq!(intro.countdown_message(), "3");

        assert!(intro.update(0.5).is_none());
        assert_eq!(intro.countdown_message(), "3");

        assert!(intro.update(0.75).is_none());
        assert_eq!(intro.countdown_message(), "2");
    }

    #[test]
    fn test_countdown_hands_over_to_play() {
        let mut intro = LevelIntro::new(2);
        let mut ticks = 0;
        let transition = loop {
            ticks += 1;
            if let Some(t) = intro.update(0.02) {
                break t;
            }
            assert!(ticks < 1000);
        };
        // Two seconds of 20ms ticks, give or take float drift
        assert!((99..=101).contains(&ticks), "took {ticks} ticks");
        match transition {
            Transition::Replace(State::Play(play)) => assert_eq!(play.level(), 2),
            other => panic!("unexpected transition {other:?}"),
        }
    }

    #[test]
    fn test_variable_tick_length() {
        let mut intro = LevelIntro::new(1);
        assert!(intro.update(0.9).is_none());
        assert!(intro.update(0.05).is_none());
        assert!(intro.update(1.2).is_some());
        assert_eq!(intro.countdown_message(), "1");
        assert!(intro.remaining() <= 1.0);
    }
}
