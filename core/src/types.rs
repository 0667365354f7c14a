/// Position of a hole in the grid, row-major.
pub type HoleIndex = usize;

/// Net score, may go negative.
pub type Score = i32;

/// Whole seconds left on the round clock.
pub type Seconds = u32;

/// Milliseconds on the scheduler clock.
pub type Millis = u64;

pub const HOLE_COUNT: usize = 9;
pub const GAME_DURATION: Seconds = 60;
pub const WIN_SCORE: Score = 10;
pub const TICK_PERIOD_MS: Millis = 1000;
pub const HIDE_DELAY_MS: Millis = 400;
