use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about)]
pub struct Args {
    /// Never ask for the microphone; jump with the keyboard only
    #[arg(long, default_value_t = false)]
    pub no_mic: bool,

    /// Disable sound effects
    #[arg(long, default_value_t = false)]
    pub mute: bool,

    /// Seed for pipe placement (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Where to write the log; the terminal belongs to the game
    #[arg(long, default_value = "flappy-voice.log")]
    pub log_file: PathBuf,

    /// Log filter, e.g. "info" or "flappy_voice=debug" (RUST_LOG wins)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
