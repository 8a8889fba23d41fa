use fundsp::prelude64::*;
use rodio::buffer::SamplesBuffer;
use rodio::{OutputStream, OutputStreamHandle, Sink};
use tracing::{debug, warn};

use super::AudioError;

const SAMPLE_RATE: u32 = 44_100;

/// Pulls `seconds` of mono output out of a generator graph.
fn render(mut sound: impl AudioUnit, seconds: f64) -> SamplesBuffer<f32> {
    let n = (SAMPLE_RATE as f64 * seconds) as usize;
    let samples: Vec<f32> = (0..n).map(|_| sound.get_mono() as f32).collect();
    SamplesBuffer::new(1, SAMPLE_RATE, samples)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    Jump,
    Point,
    Death,
}

impl Cue {
    fn samples(self) -> SamplesBuffer<f32> {
        match self {
            // Short upward chirp.
            Cue::Jump => {
                let freq = lfo(|t: f64| lerp(300.0, 600.0, (t / 0.08).min(1.0)));
                let gain = lfo(|t: f64| lerp(0.08, 0.0, (t / 0.1).min(1.0)));
                render((freq >> sine()) * gain, 0.1)
            }
            Cue::Point => {
                let gain = lfo(|t: f64| if t < 0.06 { 0.08 } else { 0.04 });
                render(sine_hz(880.0) * gain, 0.12)
            }
            // 400 Hz down to 80 Hz over 0.4 s while the gain fades out.
            Cue::Death => {
                let freq = lfo(|t: f64| lerp(400.0, 80.0, (t / 0.4).min(1.0)));
                let gain = lfo(|t: f64| lerp(0.15, 0.0, (t / 0.5).min(1.0)));
                render((freq >> saw()) * gain, 0.5)
            }
        }
    }
}

/// Fire-and-forget sound effects. Without an output device every cue is a
/// no-op.
pub struct Sfx {
    output: Option<(OutputStream, OutputStreamHandle)>,
}

impl Sfx {
    pub fn silent() -> Self {
        Self { output: None }
    }

    pub fn open() -> Result<Self, AudioError> {
        let output = OutputStream::try_default().map_err(|e| AudioError::Output(e.to_string()))?;
        Ok(Self {
            output: Some(output),
        })
    }

    /// Opens the default output, falling back to silence.
    pub fn open_or_silent() -> Self {
        Self::open().unwrap_or_else(|err| {
            warn!("sound disabled: {err}");
            Self::silent()
        })
    }

    pub fn play(&self, cue: Cue) {
        let Some((_, handle)) = &self.output else {
            return;
        };
        let sink = match Sink::try_new(handle) {
            Ok(sink) => sink,
            Err(err) => {
                debug!("cannot play {cue:?}: {err}");
                return;
            }
        };
        sink.append(cue.samples());
        sink.detach(); // Play in background
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rodio::Source;

    #[test]
    fn cues_have_expected_length() {
        let death = Cue::Death.samples();
        assert_eq!(death.sample_rate(), SAMPLE_RATE);
        assert_eq!(death.channels(), 1);
        assert_eq!(death.count(), (SAMPLE_RATE as f32 * 0.5) as usize);
    }

    #[test]
    fn cues_stay_quiet() {
        for cue in [Cue::Jump, Cue::Point, Cue::Death] {
            // Band-limited saw overshoots a little past full scale.
            assert!(cue.samples().all(|s| s.abs() <= 0.2), "{cue:?}");
        }
    }
}
