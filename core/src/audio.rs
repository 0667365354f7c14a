use crate::*;

/// Output for the whack sound cues.
///
/// Implementations report failures instead of panicking; the driver logs them and carries on, a round
/// plays the same whether a cue was heard or not.
pub trait AudioSink {
    /// Unlocks playback on platforms that only allow audio after a user gesture.
    fn prime(&mut self) -> core::result::Result<(), AudioError>;

    /// Plays `cue` from the beginning, cutting off a previous playback of the same cue.
    fn play(&mut self, cue: Cue) -> core::result::Result<(), AudioError>;
}

/// Sink that stays silent.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct NullAudio;

impl AudioSink for NullAudio {
    fn prime(&mut self) -> core::result::Result<(), AudioError> {
        Ok(())
    }

    fn play(&mut self, _cue: Cue) -> core::result::Result<(), AudioError> {
        Ok(())
    }
}
