//! Sound cues
//!
//! Decoding and playback belong to the host. The game only asks for a named
//! cue; a cue that has not finished loading, or any cue while muted, plays
//! nothing. Missing sounds never block or fail a tick.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Rocket fired
    Shoot,
    /// Invader destroyed
    Bang,
    /// Bomb caught, bomb hit the wall, or invader reached the ship
    Explosion,
}

impl SoundEffect {
    pub const ALL: [SoundEffect; 3] = [SoundEffect::Shoot, SoundEffect::Bang, SoundEffect::Explosion];

    /// Logical sound name
    pub fn name(&self) -> &'static str {
        match self {
            SoundEffect::Shoot => "shoot",
            SoundEffect::Bang => "bang",
            SoundEffect::Explosion => "explosion",
        }
    }

    /// Asset path the host is expected to load the sound from
    pub fn asset_path(&self) -> &'static str {
        match self {
            SoundEffect::Shoot => "sounds/shoot.wav",
            SoundEffect::Bang => "sounds/bang.wav",
            SoundEffect::Explosion => "sounds/explosion.wav",
        }
    }
}

/// Host-side audio playback
pub trait SoundBackend {
    /// Start loading a sound. Returns true if it is ready to play right away;
    /// asynchronous hosts return false and later call
    /// [`AudioManager::mark_loaded`].
    fn load(&mut self, name: &str, path: &str) -> bool;

    /// Play a loaded sound
    fn play(&mut self, name: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoadState {
    Pending,
    Ready,
}

/// Audio manager for the game
pub struct AudioManager {
    backend: Option<Box<dyn SoundBackend>>,
    sounds: HashMap<SoundEffect, LoadState>,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::silent()
    }
}

impl AudioManager {
    pub fn new(backend: Box<dyn SoundBackend>) -> Self {
        Self {
            backend: Some(backend),
            sounds: HashMap::new(),
            muted: false,
        }
    }

    /// No backend at all - every cue is dropped
    pub fn silent() -> Self {
        Self {
            backend: None,
            sounds: HashMap::new(),
            muted: false,
        }
    }

    /// Request a sound from the backend
    pub fn load(&mut self, effect: SoundEffect) {
        let Some(backend) = self.backend.as_mut() else {
            return;
        };
        let ready = backend.load(effect.name(), effect.asset_path());
        let state = if ready { LoadState::Ready } else { LoadState::Pending };
        self.sounds.insert(effect, state);
    }

    /// Request every sound the game uses
    pub fn load_all(&mut self) {
        for effect in SoundEffect::ALL {
            self.load(effect);
        }
    }

    /// Completion callback for asynchronous loads
    pub fn mark_loaded(&mut self, effect: SoundEffect) {
        if let Some(state) = self.sounds.get_mut(&effect) {
            *state = LoadState::Ready;
        } else {
            log::warn!("Sound '{}' finished loading but was never requested", effect.name());
        }
    }

    pub fn is_loaded(&self, effect: SoundEffect) -> bool {
        self.sounds.get(&effect) == Some(&LoadState::Ready)
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn toggle_muted(&mut self) {
        self.muted = !self.muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        if self.muted || !self.is_loaded(effect) {
            return;
        }
        let Some(backend) = self.backend.as_mut() else {
            return;
        };
        backend.play(effect.name());
    }
}

/// Backend that records every played sound name. Clones share the record.
#[derive(Debug, Clone, Default)]
pub struct SoundLog {
    played: Rc<RefCell<Vec<String>>>,
}

impl SoundLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn played(&self) -> Vec<String> {
        self.played.borrow().clone()
    }

    pub fn count(&self, effect: SoundEffect) -> usize {
        self.played
            .borrow()
            .iter()
            .filter(|name| name.as_str() == effect.name())
            .count()
    }
}

impl SoundBackend for SoundLog {
    fn load(&mut self, _name: &str, _path: &str) -> bool {
        true
    }

    fn play(&mut self, name: &str) {
        log::debug!("sound: {name}");
        self.played.borrow_mut().push(name.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Backend whose loads complete later
    struct SlowBackend(SoundLog);

    impl SoundBackend for SlowBackend {
        fn load(&mut self, _name: &str, _path: &str) -> bool {
            false
        }

        fn play(&mut self, name: &str) {
            self.0.play(name);
        }
    }

    #[test]
    fn test_unloaded_sound_is_silent() {
        let log = SoundLog::new();
        let mut audio = AudioManager::new(Box::new(log.clone()));
        audio.play(SoundEffect::Bang);
        assert!(log.played().is_empty());

        audio.load(SoundEffect::Bang);
        audio.play(SoundEffect::Bang);
        assert_eq!(log.played(), vec!["bang".to_string()]);
    }

    #[test]
    fn test_async_load_completes_later() {
        let log = SoundLog::new();
        let mut audio = AudioManager::new(Box::new(SlowBackend(log.clone())));
        audio.load_all();
        audio.play(SoundEffect::Shoot);
        assert_eq!(log.count(SoundEffect::Shoot), 0);

        audio.mark_loaded(SoundEffect::Shoot);
        audio.play(SoundEffect::Shoot);
        assert_eq!(log.count(SoundEffect::Shoot), 1);
    }

    #[test]
    fn test_mute_toggle() {
        let log = SoundLog::new();
        let mut audio = AudioManager::new(Box::new(log.clone()));
        audio.load_all();

        audio.toggle_muted();
        audio.play(SoundEffect::Explosion);
        assert!(log.played().is_empty());

        audio.set_muted(false);
        audio.play(SoundEffect::Explosion);
        assert_eq!(log.count(SoundEffect::Explosion), 1);
    }

    #[test]
    fn test_silent_manager_never_panics() {
        let mut audio = AudioManager::silent();
        audio.load_all();
        audio.mark_loaded(SoundEffect::Bang);
        audio.play(SoundEffect::Bang);
        assert!(!audio.is_loaded(SoundEffect::Bang));
    }
}
