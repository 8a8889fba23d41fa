//! flappy-voice: a Flappy Bird clone for the terminal that you can fly with
//! your voice.
//!
//! The game itself ([`game`]) is a plain state value advanced by a pure
//! [`game::tick`], so it can be driven and tested without a terminal or a
//! sound card.

pub mod app;
pub mod audio;
pub mod cli;
pub mod constants;
pub mod game;
pub mod logging;
pub mod render;
