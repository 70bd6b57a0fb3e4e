//! Sound effect collaborator
//!
//! The engine only names the effect; whoever implements [`SoundSink`] plays
//! it. Sinks are fire-and-forget: a failing sink is logged and ignored.

use std::io::Write;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    TileSelect,
    TileDeselect,
    WordComplete,
    GameComplete,
    Hint,
    Error,
}

impl SoundEffect {
    pub fn name(&self) -> &'static str {
        match self {
            SoundEffect::TileSelect => "blockSelect",
            SoundEffect::TileDeselect => "blockDeselect",
            SoundEffect::WordComplete => "wordComplete",
            SoundEffect::GameComplete => "gameComplete",
            SoundEffect::Hint => "hint",
            SoundEffect::Error => "error",
        }
    }
}

#[derive(Debug, Error)]
pub enum SoundError {
    #[error("sound output unavailable: {0}")]
    Unavailable(String),

    #[error("failed to play {effect}")]
    Playback {
        effect: &'static str,
        #[source]
        source: std::io::Error,
    },
}

pub trait SoundSink {
    fn play(&mut self, effect: SoundEffect) -> Result<(), SoundError>;
}

/// Sink that discards every effect.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl SoundSink for Silent {
    fn play(&mut self, _effect: SoundEffect) -> Result<(), SoundError> {
        Ok(())
    }
}

/// Rings the terminal bell for the effects worth interrupting for.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalBell;

impl SoundSink for TerminalBell {
    fn play(&mut self, effect: SoundEffect) -> Result<(), SoundError> {
        if !matches!(effect, SoundEffect::GameComplete | SoundEffect::Error) {
            return Ok(());
        }
        let mut out = std::io::stdout();
        out.write_all(b"\x07")
            .and_then(|_| out.flush())
            .map_err(|source| SoundError::Playback {
                effect: effect.name(),
                source,
            })
    }
}
