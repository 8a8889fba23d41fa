//! The frame loop: input, one `tick`, sound cues, redraw, pacing.

use std::io::{self, Stdout, Write, stdout};
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind},
    execute, terminal,
};
use rand::{SeedableRng, rngs::StdRng};
use tracing::{debug, info};

use crate::audio::Voice;
use crate::audio::meter::VolumeMeter;
use crate::audio::sfx::{Cue, Sfx};
use crate::cli::Args;
use crate::constants::FRAME_MILLIS;
use crate::game::{self, GameEvent, GameState, Phase, TickInput};
use crate::render::Screen;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Start from the title screen or restart after game over.
    Start,
    Jump,
    StopMeter,
    Quit,
}

pub fn command_for(key: KeyCode, phase: Phase) -> Option<Command> {
    match (key, phase) {
        (KeyCode::Char('q') | KeyCode::Esc, _) => Some(Command::Quit),
        (KeyCode::Char('m'), _) => Some(Command::StopMeter),
        (KeyCode::Char(' ') | KeyCode::Up, Phase::Playing) => Some(Command::Jump),
        (KeyCode::Char(' ') | KeyCode::Up | KeyCode::Enter, Phase::Ready) => Some(Command::Start),
        (KeyCode::Enter | KeyCode::Char('r'), Phase::GameOver) => Some(Command::Start),
        _ => None,
    }
}

/// Everything that lives for one run of the program.
pub struct Session {
    pub state: GameState,
    pub best: u32,
    pub meter: VolumeMeter,
    rng: StdRng,
    voice: Voice,
    sfx: Sfx,
    jump_pending: bool,
    quit: bool,
}

impl Session {
    pub fn new(seed: Option<u64>, voice: Voice, sfx: Sfx) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            state: GameState::new(),
            best: 0,
            meter: VolumeMeter::default(),
            rng,
            voice,
            sfx,
            jump_pending: false,
            quit: false,
        }
    }

    /// No microphone, no sound; for tests and headless use.
    pub fn offline(seed: u64) -> Self {
        Self::new(Some(seed), Voice::disabled(), Sfx::silent())
    }

    pub fn voice_live(&self) -> bool {
        self.voice.is_live()
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn command(&mut self, cmd: Command) {
        match cmd {
            Command::Start => {
                self.state.start();
                self.jump_pending = false;
                if self.voice.request() {
                    self.meter.activate();
                }
            }
            Command::Jump => self.jump_pending = true,
            Command::StopMeter => {
                self.meter.stop();
                info!("volume meter stopped");
            }
            Command::Quit => {
                self.state.cancel();
                self.meter.stop();
                self.quit = true;
            }
        }
    }

    /// One frame. The meter samples whatever the phase; the game only moves
    /// while playing.
    pub fn frame(&mut self) {
        let volume = self.voice.sample();
        if let Some(v) = volume {
            self.meter.update(v);
            debug!(volume = v, "audio input");
        }

        let input = TickInput {
            jump: std::mem::take(&mut self.jump_pending),
            volume,
        };
        let step = game::tick(std::mem::take(&mut self.state), &input, &mut self.rng);
        self.state = step.state;

        for event in step.events {
            match event {
                GameEvent::Jumped => self.sfx.play(Cue::Jump),
                GameEvent::Scored(_) => self.sfx.play(Cue::Point),
                GameEvent::Crashed { score } => {
                    self.best = self.best.max(score);
                    self.sfx.play(Cue::Death);
                }
                GameEvent::Spawned(_) => {}
            }
        }
    }
}

/// Puts the terminal back however the loop ends.
struct TerminalGuard {
    out: Stdout,
}

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut out = stdout();
        execute!(
            out,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::DisableLineWrap,
        )?;
        Ok(Self { out })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = execute!(
            self.out,
            terminal::LeaveAlternateScreen,
            cursor::Show,
            terminal::EnableLineWrap,
        );
        let _ = terminal::disable_raw_mode();
    }
}

pub fn run(args: &Args) -> io::Result<()> {
    let voice = if args.no_mic {
        info!("microphone disabled by flag");
        Voice::disabled()
    } else {
        Voice::microphone()
    };
    let sfx = if args.mute { Sfx::silent() } else { Sfx::open_or_silent() };
    let mut session = Session::new(args.seed, voice, sfx);

    let mut term = TerminalGuard::enter()?;
    let (cols, rows) = terminal::size()?;
    let mut screen = Screen::new(cols, rows);
    let frame_dur = Duration::from_millis(FRAME_MILLIS);

    while !session.should_quit() {
        let frame_start = Instant::now();

        // Input
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if let Some(cmd) = command_for(key.code, session.state.phase) {
                        session.command(cmd);
                    }
                }
                Event::Resize(c, r) => screen.resize(c, r),
                _ => {}
            }
        }
        if session.should_quit() {
            break;
        }

        // Update
        session.frame();

        // Render
        screen.draw(
            &mut term.out,
            &session.state,
            session.best,
            &session.meter,
            session.voice_live(),
        )?;
        term.out.flush()?;

        // Frame pacing
        let elapsed = frame_start.elapsed();
        if elapsed < frame_dur {
            std::thread::sleep(frame_dur - elapsed);
        }
    }

    info!(best = session.best, "bye");
    Ok(())
}
