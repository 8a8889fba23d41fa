//! Byte-valued frequency snapshot of the most recent input, shaped after a
//! browser `AnalyserNode` with `fftSize = 32`.

use std::collections::VecDeque;
use std::f32::consts::PI;
use std::sync::Arc;

use rustfft::{Fft, FftPlanner, num_complex::Complex32};

use crate::constants::{
    FFT_SIZE, FREQUENCY_BIN_COUNT, MAX_DECIBELS, MIN_DECIBELS, SMOOTHING_TIME_CONSTANT,
};

/// Blackman window with alpha = 0.16.
fn blackman_window(n: usize) -> Vec<f32> {
    let a0 = 0.42_f32;
    let a1 = 0.5_f32;
    let a2 = 0.08_f32;
    (0..n)
        .map(|i| {
            let phi = 2.0 * PI * i as f32 / n as f32;
            a0 - a1 * phi.cos() + a2 * (2.0 * phi).cos()
        })
        .collect()
}

/// Mean byte value scaled into `[0, 1]`.
pub fn normalized_volume(bins: &[u8]) -> f64 {
    if bins.is_empty() {
        return 0.0;
    }
    let sum: u32 = bins.iter().map(|&b| b as u32).sum();
    sum as f64 / bins.len() as f64 / 255.0
}

fn to_byte(magnitude: f32) -> u8 {
    let db = 20.0 * magnitude.max(f32::MIN_POSITIVE).log10();
    let scaled = 255.0 / (MAX_DECIBELS - MIN_DECIBELS) * (db - MIN_DECIBELS);
    scaled.floor().clamp(0.0, 255.0) as u8
}

pub struct Analyser {
    window: Vec<f32>,
    fft: Arc<dyn Fft<f32>>,
    history: VecDeque<f32>,
    smoothed: [f32; FREQUENCY_BIN_COUNT],
    scratch: Vec<Complex32>,
}

impl Default for Analyser {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyser {
    pub fn new() -> Self {
        let mut planner = FftPlanner::<f32>::new();
        Self {
            window: blackman_window(FFT_SIZE),
            fft: planner.plan_fft_forward(FFT_SIZE),
            history: VecDeque::from(vec![0.0; FFT_SIZE]),
            smoothed: [0.0; FREQUENCY_BIN_COUNT],
            scratch: vec![Complex32::new(0.0, 0.0); FFT_SIZE],
        }
    }

    /// Appends mono samples, keeping only the newest `FFT_SIZE`.
    pub fn push_samples(&mut self, samples: impl IntoIterator<Item = f32>) {
        for s in samples {
            if self.history.len() == FFT_SIZE {
                self.history.pop_front();
            }
            self.history.push_back(s);
        }
    }

    /// Transforms the current window, folds it into the smoothed spectrum and
    /// returns it as bytes. Every call advances the smoothing.
    pub fn byte_frequency_data(&mut self) -> [u8; FREQUENCY_BIN_COUNT] {
        for ((slot, &sample), &w) in self.scratch.iter_mut().zip(&self.history).zip(&self.window) {
            *slot = Complex32::new(sample * w, 0.0);
        }
        self.fft.process(&mut self.scratch);

        let tau = SMOOTHING_TIME_CONSTANT;
        let mut bytes = [0u8; FREQUENCY_BIN_COUNT];
        for (k, byte) in bytes.iter_mut().enumerate() {
            let magnitude = self.scratch[k].norm() / FFT_SIZE as f32;
            let smoothed = tau * self.smoothed[k] + (1.0 - tau) * magnitude;
            self.smoothed[k] = if smoothed.is_finite() { smoothed } else { 0.0 };
            *byte = to_byte(self.smoothed[k]);
        }
        bytes
    }

    pub fn volume(&mut self) -> f64 {
        normalized_volume(&self.byte_frequency_data())
    }
}
