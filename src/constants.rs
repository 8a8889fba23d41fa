//! Gameplay constants. Everything here is per-frame at the 60 Hz cadence.

// Playfield (logical units, not terminal pixels)
pub const CANVAS_WIDTH: f64 = 400.0;
pub const CANVAS_HEIGHT: f64 = 600.0;

// Bird
pub const BIRD_X: f64 = 50.0;
pub const BIRD_RADIUS: f64 = 20.0;
pub const GRAVITY: f64 = 0.1;
pub const JUMP_VELOCITY: f64 = -10.0;
pub const TERMINAL_VELOCITY: f64 = 3.0;

// Pipes
pub const PIPE_WIDTH: f64 = 50.0;
pub const PIPE_SPEED: f64 = 1.5;
pub const PIPE_GAP: f64 = 200.0;
pub const PIPE_MARGIN: f64 = 100.0; // reserved above and below every gap
pub const SPAWN_MARGIN: f64 = 250.0;

// Voice control
pub const NOISE_GATE: f64 = 0.08;
pub const MAX_INPUT_VOLUME: f64 = 0.6;
pub const VOLUME_GAIN: f64 = 25.0;
pub const AUDIO_MAX_VELOCITY: f64 = 4.0;

// Analyser, modelled on a browser AnalyserNode with fftSize = 32
pub const FFT_SIZE: usize = 32;
pub const FREQUENCY_BIN_COUNT: usize = FFT_SIZE / 2;
pub const SMOOTHING_TIME_CONSTANT: f32 = 0.8;
pub const MIN_DECIBELS: f32 = -100.0;
pub const MAX_DECIBELS: f32 = -30.0;

// Timing
pub const FRAME_MILLIS: u64 = 16; // ~60 fps
