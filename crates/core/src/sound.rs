//! Sound capability consumed by the engine
//!
//! The engine never plays audio itself. It emits [`SoundKind`] cues and hands
//! them to whatever [`SoundPlayer`] it was given.

use crate::types::SoundKind;

/// Audio sink for engine cues
pub trait SoundPlayer {
    fn play_sound(&mut self, kind: SoundKind);

    fn set_enabled(&mut self, enabled: bool);
}

impl<P: SoundPlayer + ?Sized> SoundPlayer for Box<P> {
    fn play_sound(&mut self, kind: SoundKind) {
        (**self).play_sound(kind);
    }

    fn set_enabled(&mut self, enabled: bool) {
        (**self).set_enabled(enabled);
    }
}

/// Discards every cue
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSoundPlayer;

impl SoundPlayer for NullSoundPlayer {
    fn play_sound(&mut self, _kind: SoundKind) {}

    fn set_enabled(&mut self, _enabled: bool) {}
}

/// Logs cues at debug level instead of playing them
#[derive(Debug, Clone, Copy)]
pub struct TracingSoundPlayer {
    enabled: bool,
}

impl TracingSoundPlayer {
    pub fn new() -> Self {
        Self { enabled: true }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }
}

impl Default for TracingSoundPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl SoundPlayer for TracingSoundPlayer {
    fn play_sound(&mut self, kind: SoundKind) {
        if self.enabled {
            tracing::debug!(sound = kind.asset_name(), "play sound");
        }
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}
