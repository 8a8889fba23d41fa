use crate::constants::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::game::bird::Bird;
use crate::game::pipes::Pipe;
use crate::game::{GameState, Phase};

use super::pixels::{PixelBuf, Rgb, draw_number};

const BACKDROP: Rgb = Rgb(24, 24, 32);
const SKY_TOP: Rgb = Rgb(70, 180, 200);
const SKY_BOT: Rgb = Rgb(190, 232, 245);
const PIPE_L: Rgb = Rgb(74, 122, 26);
const PIPE_M: Rgb = Rgb(100, 170, 40);
const PIPE_R: Rgb = Rgb(115, 191, 46);
const PIPE_HI: Rgb = Rgb(145, 215, 62);
const CAP_DARK: Rgb = Rgb(60, 100, 20);
const BIRD_Y: Rgb = Rgb(255, 215, 0);
const BIRD_RIM: Rgb = Rgb(215, 165, 35);
const BIRD_EYE: Rgb = Rgb(255, 255, 255);
const BIRD_PUPIL: Rgb = Rgb(20, 20, 20);
const PANEL: Rgb = Rgb(210, 185, 110);
const PANEL_IN: Rgb = Rgb(220, 195, 120);
const WHITE: Rgb = Rgb(255, 255, 255);
const SHADOW: Rgb = Rgb(30, 30, 30);

/// Maps the logical playfield onto the pixel buffer: uniform scale,
/// centred horizontally, top-aligned.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub scale: f64,
    pub offset_x: f64,
}

impl Viewport {
    pub fn fit(pw: usize, ph: usize) -> Self {
        let scale = (pw as f64 / CANVAS_WIDTH).min(ph as f64 / CANVAS_HEIGHT);
        Self {
            scale,
            offset_x: ((pw as f64 - CANVAS_WIDTH * scale) / 2.0).max(0.0),
        }
    }

    pub fn x(&self, world_x: f64) -> i32 {
        (self.offset_x + world_x * self.scale).round() as i32
    }

    pub fn y(&self, world_y: f64) -> i32 {
        (world_y * self.scale).round() as i32
    }

    pub fn len(&self, world: f64) -> i32 {
        (world * self.scale).round() as i32
    }
}

fn pipe_shade(x: i32, total_w: i32) -> Rgb {
    if total_w <= 1 {
        return PIPE_M;
    }
    let t = (x as f64 / (total_w - 1) as f64 * 256.0) as u16;
    if t < 64 {
        Rgb::lerp(PIPE_L, PIPE_M, (t * 4).min(256))
    } else if t < 100 {
        Rgb::lerp(PIPE_M, PIPE_HI, ((t - 64) * 7).min(256))
    } else if t < 160 {
        Rgb::lerp(PIPE_HI, PIPE_R, ((t - 100) * 4).min(256))
    } else {
        Rgb::lerp(PIPE_R, PIPE_L, ((t - 160) * 3).min(256))
    }
}

fn draw_sky(buf: &mut PixelBuf, vp: &Viewport) {
    buf.clear(BACKDROP);
    let x0 = vp.x(0.0);
    let w = vp.len(CANVAS_WIDTH);
    let h = vp.len(CANVAS_HEIGHT).max(1);
    for y in 0..h {
        let t = (y as u32 * 256 / h as u32) as u16;
        let c = Rgb::lerp(SKY_TOP, SKY_BOT, t);
        buf.fill_rect(x0, y, w, 1, c);
    }
}

fn draw_pipe(buf: &mut PixelBuf, vp: &Viewport, pipe: &Pipe) {
    let x = vp.x(pipe.x);
    let w = vp.len(pipe.width).max(1);
    let top = vp.y(pipe.top);
    let bottom = vp.y(pipe.bottom);
    let floor = vp.y(CANVAS_HEIGHT);

    // Clip to the field so pipes slide under the letterbox.
    let field_l = vp.x(0.0);
    let field_r = vp.x(CANVAS_WIDTH);
    let (cx, cw) = {
        let l = x.max(field_l);
        let r = (x + w).min(field_r);
        (l, (r - l).max(0))
    };
    if cw == 0 {
        return;
    }
    let skip = cx - x;

    for dx in 0..cw {
        let c = pipe_shade(dx + skip, w);
        for y in 0..top {
            buf.set(cx + dx, y, c);
        }
        for y in bottom..floor {
            buf.set(cx + dx, y, c);
        }
        buf.set(cx + dx, top - 1, CAP_DARK);
        buf.set(cx + dx, bottom, CAP_DARK);
    }
}

fn draw_bird(buf: &mut PixelBuf, vp: &Viewport, bird: &Bird) {
    let cx = vp.offset_x + bird.x * vp.scale;
    let cy = bird.y * vp.scale;
    let r = (bird.radius * vp.scale).max(1.0);
    let rim = (r - 1.0).max(0.0);

    let (x0, x1) = ((cx - r).floor() as i32, (cx + r).ceil() as i32);
    let (y0, y1) = ((cy - r).floor() as i32, (cy + r).ceil() as i32);
    for y in y0..=y1 {
        for x in x0..=x1 {
            let dx = x as f64 + 0.5 - cx;
            let dy = y as f64 + 0.5 - cy;
            let d2 = dx * dx + dy * dy;
            if d2 <= r * r {
                buf.set(x, y, if d2 >= rim * rim { BIRD_RIM } else { BIRD_Y });
            }
        }
    }

    // Eye, looking ahead, nudged by vertical speed.
    let ex = (cx + r * 0.4) as i32;
    let ey = (cy - r * 0.3 + bird.velocity.signum() * r * 0.1) as i32;
    let eye = (r * 0.25).max(1.0) as i32;
    buf.fill_rect(ex, ey, eye + 1, eye + 1, BIRD_EYE);
    buf.set(ex + eye, ey + eye / 2, BIRD_PUPIL);
}

fn draw_title(buf: &mut PixelBuf, vp: &Viewport) {
    let cx = vp.x(CANVAS_WIDTH / 2.0);
    let cy = vp.y(CANVAS_HEIGHT / 4.0);
    let text = "FLAPPY";
    let char_w = vp.len(32.0).max(3);
    let char_h = vp.len(48.0).max(4);
    let total_w = text.len() as i32 * char_w;
    let sx = cx - total_w / 2;
    for i in 0..text.len() as i32 {
        let bx = sx + i * char_w;
        buf.fill_rect(bx, cy, char_w - 1, char_h, BIRD_Y);
        buf.fill_rect(bx, cy, char_w - 1, 1, WHITE);
    }
}

fn draw_game_over(buf: &mut PixelBuf, vp: &Viewport, score: u32, best: u32) {
    buf.dim_all();

    let cx = vp.x(CANVAS_WIDTH / 2.0);
    let cy = vp.y(CANVAS_HEIGHT / 2.0);
    let panel_w = vp.len(200.0).max(20);
    let panel_h = vp.len(100.0).max(16);
    let px = cx - panel_w / 2;
    let py = cy - panel_h / 2;
    buf.fill_rect(px - 1, py - 1, panel_w + 2, panel_h + 2, SHADOW);
    buf.fill_rect(px, py, panel_w, panel_h, PANEL);
    buf.fill_rect(px + 1, py + 1, panel_w - 2, panel_h - 2, PANEL_IN);

    draw_number(buf, cx, py + panel_h / 4 - 2, score, WHITE, SHADOW);
    draw_number(buf, cx, py + panel_h * 3 / 4 - 3, best, BIRD_Y, SHADOW);
}

/// Full redraw of one frame.
pub fn draw(buf: &mut PixelBuf, state: &GameState, best: u32) {
    let vp = Viewport::fit(buf.width(), buf.height());
    draw_sky(buf, &vp);
    for pipe in &state.pipes {
        draw_pipe(buf, &vp, pipe);
    }
    draw_bird(buf, &vp, &state.bird);

    match state.phase {
        Phase::Ready => draw_title(buf, &vp),
        Phase::Playing => draw_number(buf, vp.x(CANVAS_WIDTH / 2.0), 2, state.score, WHITE, SHADOW),
        Phase::GameOver => draw_game_over(buf, &vp, state.score, best),
    }
}
