#![no_std]

extern crate alloc;

use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

pub use audio::*;
pub use driver::*;
pub use engine::*;
pub use error::*;
pub use hole::*;
pub use schedule::*;
pub use spawn::*;
pub use types::*;

mod audio;
mod driver;
mod engine;
mod error;
mod hole;
mod schedule;
mod spawn;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundConfig {
    pub hole_count: usize,
    pub duration_secs: Seconds,
    pub win_score: Score,
    pub countdown_period_ms: Millis,
    pub spawn_period_ms: Millis,
    /// Grace period before a whacked mole disappears, zero hides it right away.
    pub hide_delay_ms: Millis,
    pub spawn_policy: SpawnPolicy,
}

impl RoundConfig {
    pub const fn new_unchecked(
        hole_count: usize,
        duration_secs: Seconds,
        win_score: Score,
        spawn_policy: SpawnPolicy,
    ) -> Self {
        Self {
            hole_count,
            duration_secs,
            win_score,
            countdown_period_ms: TICK_PERIOD_MS,
            spawn_period_ms: TICK_PERIOD_MS,
            hide_delay_ms: HIDE_DELAY_MS,
            spawn_policy,
        }
    }

    pub fn new(
        hole_count: usize,
        duration_secs: Seconds,
        win_score: Score,
        spawn_policy: SpawnPolicy,
    ) -> Result<Self> {
        Self::new_unchecked(hole_count, duration_secs, win_score, spawn_policy).validate()
    }

    /// Single mole on screen at a time, whacked moles vanish immediately.
    pub const fn classic() -> Self {
        let mut config =
            Self::new_unchecked(HOLE_COUNT, GAME_DURATION, WIN_SCORE, SpawnPolicy::ResetGrid);
        config.hide_delay_ms = 0;
        config
    }

    pub const fn with_hide_delay(mut self, hide_delay_ms: Millis) -> Self {
        self.hide_delay_ms = hide_delay_ms;
        self
    }

    pub fn validate(self) -> Result<Self> {
        if self.hole_count == 0 {
            return Err(GameError::NoHoles);
        }
        if self.duration_secs == 0 {
            return Err(GameError::ZeroDuration);
        }
        if self.win_score <= 0 {
            return Err(GameError::InvalidWinScore);
        }
        if self.countdown_period_ms == 0 || self.spawn_period_ms == 0 {
            return Err(GameError::ZeroPeriod);
        }
        Ok(self)
    }

    pub const fn has_grace_period(&self) -> bool {
        self.hide_delay_ms > 0
    }
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self::new_unchecked(HOLE_COUNT, GAME_DURATION, WIN_SCORE, SpawnPolicy::FillEmpty)
    }
}

/// How a finished round ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Won,
    TimeUp,
}

/// Read-only view handed to the presentation layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundSnapshot {
    pub holes: Vec<Hole>,
    pub score: Score,
    pub time_left: Seconds,
    pub phase: Phase,
    pub verdict: Option<Verdict>,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TickOutcome {
    NoChange,
    Ticked,
    RoundOver,
}

impl TickOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SpawnOutcome {
    NoChange,
    Spawned(Spawn),
}

impl SpawnOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Spawned(_))
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ClickOutcome {
    NoChange,
    Whacked {
        variant: MoleVariant,
        /// Hole stays up marked `hit` until [`RoundEngine::clear_hit`].
        pending_hide: bool,
        round_over: bool,
    },
}

impl ClickOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Whacked { .. })
    }

    pub const fn ended_round(self) -> bool {
        matches!(
            self,
            Self::Whacked {
                round_over: true,
                ..
            }
        )
    }
}
