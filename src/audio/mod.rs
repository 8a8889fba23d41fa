//! Microphone capture, analysis and the mapping from volume to lift, plus
//! sound effects.

pub mod analyser;
pub mod control;
pub mod meter;
pub mod mic;
pub mod sfx;

use std::fmt;

use tracing::{info, warn};

use mic::Microphone;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioError {
    NoInputDevice,
    Config(String),
    UnsupportedFormat(String),
    Stream(String),
    Output(String),
}

impl fmt::Display for AudioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AudioError::NoInputDevice => write!(f, "no input device available"),
            AudioError::Config(e) => write!(f, "cannot read input config: {e}"),
            AudioError::UnsupportedFormat(name) => write!(f, "unsupported sample format {name}"),
            AudioError::Stream(e) => write!(f, "cannot start input stream: {e}"),
            AudioError::Output(e) => write!(f, "cannot open output device: {e}"),
        }
    }
}

impl std::error::Error for AudioError {}

/// Anything that yields one normalized volume reading per frame.
pub trait VolumeSource {
    fn sample(&mut self) -> f64;
}

impl<F: FnMut() -> f64> VolumeSource for F {
    fn sample(&mut self) -> f64 {
        self()
    }
}

impl VolumeSource for Microphone {
    fn sample(&mut self) -> f64 {
        self.read_volume()
    }
}

type Opener = Box<dyn FnMut() -> Result<Box<dyn VolumeSource>, AudioError>>;

/// Voice input for the session. The source is asked for on every start
/// until one opens; after that it stays live for the rest of the run.
/// Without an opener (`--no-mic`) nothing is ever asked for.
pub struct Voice {
    opener: Option<Opener>,
    source: Option<Box<dyn VolumeSource>>,
}

impl Voice {
    pub fn disabled() -> Self {
        Self {
            opener: None,
            source: None,
        }
    }

    pub fn with_opener(
        open: impl FnMut() -> Result<Box<dyn VolumeSource>, AudioError> + 'static,
    ) -> Self {
        Self {
            opener: Some(Box::new(open)),
            source: None,
        }
    }

    /// The default input device.
    pub fn microphone() -> Self {
        Self::with_opener(|| Microphone::open().map(|mic| Box::new(mic) as Box<dyn VolumeSource>))
    }

    /// A source that is live from the start, e.g. a scripted one.
    pub fn from_source(source: impl VolumeSource + 'static) -> Self {
        let mut source = Some(Box::new(source) as Box<dyn VolumeSource>);
        Self::with_opener(move || source.take().ok_or(AudioError::NoInputDevice))
    }

    /// Asks for the input unless it is already live. Returns true when it
    /// just went live; a failure leaves the game on keyboard only and is
    /// asked again on the next start.
    pub fn request(&mut self) -> bool {
        if self.source.is_some() {
            return false;
        }
        let Some(open) = self.opener.as_mut() else {
            return false;
        };
        match open() {
            Ok(source) => {
                info!("voice control enabled");
                self.source = Some(source);
                true
            }
            Err(err) => {
                warn!("error accessing microphone: {err}; continuing with keyboard only");
                false
            }
        }
    }

    /// One volume reading per frame, if the input is live.
    pub fn sample(&mut self) -> Option<f64> {
        self.source.as_mut().map(|source| source.sample())
    }

    pub fn is_live(&self) -> bool {
        self.source.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_request_degrades_then_retries_on_next_start() {
        let mut attempts = 0;
        let mut voice = Voice::with_opener(move || {
            attempts += 1;
            if attempts == 1 {
                Err(AudioError::NoInputDevice)
            } else {
                Ok(Box::new(|| 0.25) as Box<dyn VolumeSource>)
            }
        });
        assert!(!voice.request());
        assert!(!voice.is_live());
        assert_eq!(voice.sample(), None);

        assert!(voice.request());
        assert_eq!(voice.sample(), Some(0.25));
        // Already live: nothing more to ask for.
        assert!(!voice.request());
    }

    #[test]
    fn disabled_never_asks() {
        let mut voice = Voice::disabled();
        assert!(!voice.request());
        assert!(!voice.is_live());
        assert_eq!(voice.sample(), None);
    }

    #[test]
    fn scripted_source_goes_live_on_first_request() {
        let mut level = 0.0;
        let mut voice = Voice::from_source(move || {
            level += 0.5;
            level
        });
        assert!(!voice.is_live());
        assert!(voice.request());
        assert_eq!(voice.sample(), Some(0.5));
        assert_eq!(voice.sample(), Some(1.0));
    }

    #[test]
    fn errors_read_well() {
        let err = AudioError::UnsupportedFormat("I64".into());
        assert_eq!(err.to_string(), "unsupported sample format I64");
    }
}
