//! Terminal output: the playfield as half-block pixels plus two text rows.

pub mod pixels;
pub mod scene;

use std::io::{self, Write};

use crossterm::{cursor, queue, style, terminal};

use crate::audio::meter::VolumeMeter;
use crate::game::{GameState, Phase};
use pixels::{PixelBuf, Rgb};

/// Text rows reserved under the playfield.
pub const STATUS_ROWS: u16 = 2;

const METER_WIDTH: usize = 20;

/// Score line and the meter / help line, already padded to `cols`.
pub fn status_lines(
    state: &GameState,
    meter: &VolumeMeter,
    mic_live: bool,
    cols: usize,
) -> [String; 2] {
    let prompt = match state.phase {
        Phase::Ready => "SPACE start".to_string(),
        Phase::Playing => "SPACE jump  Q quit".to_string(),
        Phase::GameOver => format!("GAME OVER  Final score: {}  ENTER restart", state.score),
    };
    let score = format!("Score: {}", state.score);
    let first = if state.phase == Phase::GameOver {
        prompt
    } else {
        format!("{score}  {prompt}")
    };
    let second = match (meter.is_running(), mic_live) {
        (true, _) => meter.label(METER_WIDTH),
        (false, true) => "Mic on, meter stopped".to_string(),
        (false, false) => "Mic off".to_string(),
    };
    [fit(&first, cols), fit(&second, cols)]
}

fn fit(s: &str, cols: usize) -> String {
    let mut line: String = s.chars().take(cols).collect();
    let len = line.chars().count();
    line.extend(std::iter::repeat_n(' ', cols - len));
    line
}

pub struct Screen {
    cols: u16,
    rows: u16,
    buf: PixelBuf,
}

impl Screen {
    pub fn new(cols: u16, rows: u16) -> Self {
        let (w, h) = Self::pixel_size(cols, rows);
        Self {
            cols,
            rows,
            buf: PixelBuf::new(w, h, Rgb(0, 0, 0)),
        }
    }

    fn pixel_size(cols: u16, rows: u16) -> (usize, usize) {
        (cols as usize, rows.saturating_sub(STATUS_ROWS) as usize * 2)
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols;
        self.rows = rows;
        let (w, h) = Self::pixel_size(cols, rows);
        self.buf.resize(w, h, Rgb(0, 0, 0));
    }

    pub fn draw(
        &mut self,
        out: &mut impl Write,
        state: &GameState,
        best: u32,
        meter: &VolumeMeter,
        mic_live: bool,
    ) -> io::Result<()> {
        scene::draw(&mut self.buf, state, best);
        self.buf.render(out)?;

        let field_rows = self.rows.saturating_sub(STATUS_ROWS);
        for (i, line) in status_lines(state, meter, mic_live, self.cols as usize).iter().enumerate() {
            queue!(
                out,
                cursor::MoveTo(0, field_rows + i as u16),
                terminal::Clear(terminal::ClearType::CurrentLine),
                style::Print(line)
            )?;
        }
        out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_line_leads_with_the_score() {
        let mut state = GameState::new();
        state.start();
        state.score = 7;
        let [first, second] = status_lines(&state, &VolumeMeter::default(), false, 40);
        assert!(first.starts_with("Score: 7"));
        assert_eq!(first.len(), 40);
        assert_eq!(second.trim_end(), "Mic off");
    }

    #[test]
    fn game_over_shows_final_score() {
        let mut state = GameState::new();
        state.start();
        state.score = 3;
        state.cancel();
        let mut meter = VolumeMeter::default();
        meter.activate();
        meter.update(0.25);
        let [first, second] = status_lines(&state, &meter, true, 80);
        assert!(first.contains("Final score: 3"));
        assert!(second.starts_with("Mic ["));
    }

    #[test]
    fn stopped_meter_with_live_mic_says_so() {
        let state = GameState::new();
        let [_, second] = status_lines(&state, &VolumeMeter::default(), true, 40);
        assert_eq!(second.trim_end(), "Mic on, meter stopped");
    }

    #[test]
    fn narrow_terminals_truncate() {
        let state = GameState::new();
        let [first, _] = status_lines(&state, &VolumeMeter::default(), false, 5);
        assert_eq!(first, "Score");
    }

    #[test]
    fn screen_reserves_status_rows() {
        let screen = Screen::new(80, 24);
        assert_eq!(screen.buf.width(), 80);
        assert_eq!(screen.buf.height(), 44);
    }
}
