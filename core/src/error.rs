use alloc::string::String;
use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("A round needs at least one hole")]
    NoHoles,
    #[error("Round duration must be at least one second")]
    ZeroDuration,
    #[error("Winning score must be positive")]
    InvalidWinScore,
    #[error("Timer periods must be non-zero")]
    ZeroPeriod,
}

pub type Result<T> = core::result::Result<T, GameError>;

/// Failure reported by an [`AudioSink`](crate::AudioSink), only ever logged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AudioError {
    #[error("Audio output is not available")]
    Unavailable,
    #[error("Playback was rejected: {0}")]
    Rejected(String),
}
