//! The game proper: a plain state value and a pure per-frame update.
//!
//! Nothing in here knows about terminals or sound cards. The frame loop in
//! [`crate::app`] feeds [`tick`] with the frame's input and acts on the
//! returned events.

pub mod bird;
pub mod collision;
pub mod pipes;

use rand::Rng;
use tracing::{debug, info};

use crate::audio::control::AudioState;
use bird::Bird;
use pipes::{Pipe, Pipes};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Ready,
    Playing,
    GameOver,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct GameState {
    pub phase: Phase,
    pub score: u32,
    pub bird: Bird,
    pub pipes: Pipes,
    pub audio: AudioState,
}

/// Everything the outside world contributes to one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    pub jump: bool,
    /// Normalized microphone volume, absent while no microphone is live.
    pub volume: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    Jumped,
    Spawned(Pipe),
    Scored(u32),
    Crashed { score: u32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub state: GameState,
    pub events: Vec<GameEvent>,
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start and restart are the same reset: a fresh field, already playing.
    pub fn start(&mut self) {
        *self = GameState {
            phase: Phase::Playing,
            ..GameState::default()
        };
        info!("game started");
    }

    /// The loop was stopped mid-run.
    pub fn cancel(&mut self) {
        if self.phase == Phase::Playing {
            self.phase = Phase::GameOver;
            info!(score = self.score, "game cancelled");
        }
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::GameOver
    }
}

/// Advance a playing game by one frame. Any other phase comes back untouched.
///
/// Order within a frame: voice correction, jump, gravity and bounds, pipe
/// scroll with scoring, collision, spawning.
pub fn tick<R: Rng + ?Sized>(mut state: GameState, input: &TickInput, rng: &mut R) -> Step {
    let mut events = Vec::new();
    if state.phase != Phase::Playing {
        return Step { state, events };
    }

    if let Some(volume) = input.volume {
        state.bird.velocity = state.audio.apply(volume, state.bird.velocity);
    }
    if input.jump {
        state.bird.jump();
        events.push(GameEvent::Jumped);
    }
    state.bird.integrate();

    let exited = pipes::advance(&mut state.pipes);
    for _ in 0..exited {
        state.score += 1;
        debug!(score = state.score, "pipe passed");
        events.push(GameEvent::Scored(state.score));
    }

    if collision::hits_any(&state.bird, &state.pipes) {
        state.phase = Phase::GameOver;
        info!(score = state.score, "bird crashed");
        events.push(GameEvent::Crashed { score: state.score });
        return Step { state, events };
    }

    if let Some(pipe) = pipes::maybe_spawn(&mut state.pipes, rng) {
        debug!(top = pipe.top, bottom = pipe.bottom, "pipe spawned");
        events.push(GameEvent::Spawned(pipe));
    }

    Step { state, events }
}
