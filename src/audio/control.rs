use crate::constants::{AUDIO_MAX_VELOCITY, GRAVITY, MAX_INPUT_VOLUME, NOISE_GATE, VOLUME_GAIN};

/// What the mapper remembers between frames.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AudioState {
    pub last_volume: f64,
}

/// Log curve over the gated range, 0 at the gate and 1 at `MAX_INPUT_VOLUME`.
/// Loud input gets compressed so shouting does not launch the bird.
pub fn sensitivity(volume: f64) -> f64 {
    let span = MAX_INPUT_VOLUME - NOISE_GATE;
    (volume.min(MAX_INPUT_VOLUME) - NOISE_GATE + 1.0).ln() / (span + 1.0).ln()
}

/// Velocity change for a volume sample, or `None` when the sample is under
/// the noise gate. Positive values push the bird up.
pub fn velocity_delta(volume: f64, last_volume: f64) -> Option<f64> {
    if volume <= NOISE_GATE {
        return None;
    }
    Some((volume - last_volume) * VOLUME_GAIN * sensitivity(volume))
}

impl AudioState {
    /// Feeds one normalized sample into `velocity`. The remembered volume is
    /// updated even when the sample is gated.
    pub fn apply(&mut self, volume: f64, velocity: f64) -> f64 {
        let out = match velocity_delta(volume, self.last_volume) {
            Some(delta) => {
                (velocity - delta).clamp(-AUDIO_MAX_VELOCITY, AUDIO_MAX_VELOCITY) + GRAVITY
            }
            None => velocity,
        };
        self.last_volume = volume;
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sensitivity_spans_zero_to_one() {
        assert!(sensitivity(NOISE_GATE).abs() < 1e-12);
        assert!((sensitivity(MAX_INPUT_VOLUME) - 1.0).abs() < 1e-12);
        assert!((sensitivity(1.0) - 1.0).abs() < 1e-12);
        let mid = sensitivity(0.3);
        assert!(mid > 0.0 && mid < 1.0);
    }

    #[test]
    fn gated_sample_leaves_velocity_alone() {
        let mut audio = AudioState::default();
        assert_eq!(audio.apply(0.05, 1.5), 1.5);
        assert_eq!(audio.last_volume, 0.05);
    }

    #[test]
    fn rising_volume_pushes_up() {
        let mut audio = AudioState { last_volume: 0.1 };
        let v = audio.apply(0.5, 0.0);
        assert!(v < 0.0, "velocity {v}");
        assert_eq!(audio.last_volume, 0.5);
    }

    #[test]
    fn falling_volume_lets_the_bird_drop() {
        let mut audio = AudioState { last_volume: 0.5 };
        assert!(audio.apply(0.2, 0.0) > GRAVITY);
    }

    #[test]
    fn correction_is_clamped_before_gravity() {
        let mut audio = AudioState::default();
        let v = audio.apply(1.0, 0.0);
        assert_eq!(v, -AUDIO_MAX_VELOCITY + GRAVITY);
    }
}
