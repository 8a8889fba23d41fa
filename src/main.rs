use std::io;

use clap::Parser;

use flappy_voice::{app, cli::Args, logging};

fn main() -> io::Result<()> {
    let args = Args::parse();

    // Report this before the terminal is taken over.
    if let Err(err) = logging::init(&args.log_file, &args.log_level) {
        eprintln!("logging disabled: {err}");
    }

    app::run(&args)
}
