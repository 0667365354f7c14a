use wasm_bindgen_futures::{JsFuture, spawn_local};
use web_sys::HtmlAudioElement;
use whack_core::{AudioError, AudioSink, Cue};

/// Cue playback through plain `<audio>` elements.
#[derive(Debug, Default)]
pub(crate) struct WebAudio {
    clap: Option<HtmlAudioElement>,
    scream: Option<HtmlAudioElement>,
}

impl WebAudio {
    const CLAP_SRC: &'static str = "assets/clap.mp3";
    const SCREAM_SRC: &'static str = "assets/scream.mp3";

    pub(crate) fn load() -> Self {
        Self {
            clap: load_element(Self::CLAP_SRC),
            scream: load_element(Self::SCREAM_SRC),
        }
    }

    fn element(&self, cue: Cue) -> Option<&HtmlAudioElement> {
        match cue {
            Cue::Clap => self.clap.as_ref(),
            Cue::Scream => self.scream.as_ref(),
        }
    }
}

fn load_element(src: &str) -> Option<HtmlAudioElement> {
    match HtmlAudioElement::new_with_src(src) {
        Ok(element) => Some(element),
        Err(err) => {
            log::warn!("could not load {}: {:?}", src, err);
            None
        }
    }
}

fn rejected(err: wasm_bindgen::JsValue) -> AudioError {
    AudioError::Rejected(format!("{:?}", err))
}

/// Primes every cue even when some fail, reporting the last failure.
fn prime_each(mut prime_one: impl FnMut(Cue) -> Result<(), AudioError>) -> Result<(), AudioError> {
    let mut result = Ok(());
    for cue in Cue::ALL {
        if let Err(err) = prime_one(cue) {
            log::warn!("could not prime {:?} cue: {}", cue, err);
            result = Err(err);
        }
    }
    result
}

impl AudioSink for WebAudio {
    fn prime(&mut self) -> Result<(), AudioError> {
        prime_each(|cue| {
            let Some(element) = self.element(cue) else {
                return Ok(());
            };
            let promise = element.play().map_err(rejected)?;
            element.pause().map_err(rejected)?;
            // pausing right away usually aborts the play request, that is expected here
            spawn_local(async move {
                if let Err(err) = JsFuture::from(promise).await {
                    log::trace!("priming {:?} interrupted: {:?}", cue, err);
                }
            });
            Ok(())
        })
    }

    fn play(&mut self, cue: Cue) -> Result<(), AudioError> {
        let element = self.element(cue).ok_or(AudioError::Unavailable)?;
        element.set_current_time(0.0);
        let promise = element.play().map_err(rejected)?;
        spawn_local(async move {
            if let Err(err) = JsFuture::from(promise).await {
                log::warn!("{:?} cue rejected: {:?}", cue, err);
            }
        });
        Ok(())
    }
}
