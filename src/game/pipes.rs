use std::collections::VecDeque;

use rand::Rng;

use crate::constants::{
    CANVAS_HEIGHT, CANVAS_WIDTH, PIPE_GAP, PIPE_MARGIN, PIPE_SPEED, PIPE_WIDTH, SPAWN_MARGIN,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pipe {
    pub x: f64,
    pub width: f64,
    /// Lower edge of the top rectangle.
    pub top: f64,
    /// Upper edge of the bottom rectangle.
    pub bottom: f64,
}

impl Pipe {
    /// A pipe entering at the right edge with its gap starting at `top`.
    pub fn entering(top: f64) -> Self {
        Self {
            x: CANVAS_WIDTH,
            width: PIPE_WIDTH,
            top,
            bottom: top + PIPE_GAP,
        }
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }
}

/// Front is the oldest (leftmost) pipe.
pub type Pipes = VecDeque<Pipe>;

/// Scroll every pipe left and drop the ones that have fully left the screen.
/// Returns how many were dropped; each one is a point.
pub fn advance(pipes: &mut Pipes) -> u32 {
    for pipe in pipes.iter_mut() {
        pipe.x -= PIPE_SPEED;
    }

    let mut exited = 0;
    while pipes.front().is_some_and(|p| p.right() < 0.0) {
        pipes.pop_front();
        exited += 1;
    }
    exited
}

pub fn spawn_due(pipes: &Pipes) -> bool {
    match pipes.back() {
        None => true,
        Some(last) => last.x < CANVAS_WIDTH - SPAWN_MARGIN,
    }
}

/// Top edge of a fresh gap, uniform over the playable band.
pub fn random_gap_top<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    let range = CANVAS_HEIGHT - PIPE_GAP - PIPE_MARGIN * 2.0;
    (rng.r#gen::<f64>() * range).floor() + PIPE_MARGIN
}

/// Pushes a new pipe if the spacing rule allows one. Returns the spawned pipe.
pub fn maybe_spawn<R: Rng + ?Sized>(pipes: &mut Pipes, rng: &mut R) -> Option<Pipe> {
    if !spawn_due(pipes) {
        return None;
    }
    let pipe = Pipe::entering(random_gap_top(rng));
    pipes.push_back(pipe);
    Some(pipe)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    fn pipe_at(x: f64) -> Pipe {
        Pipe {
            x,
            ..Pipe::entering(150.0)
        }
    }

    #[test]
    fn spawns_when_empty() {
        assert!(spawn_due(&Pipes::new()));
    }

    #[test]
    fn spawn_threshold_is_strict() {
        let at = |x| spawn_due(&Pipes::from(vec![pipe_at(x)]));
        assert!(!at(150.0));
        assert!(at(149.9));
        assert!(!at(300.0));
    }

    #[test]
    fn gap_stays_inside_margins() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let top = random_gap_top(&mut rng);
            assert!(top >= PIPE_MARGIN);
            assert!(top + PIPE_GAP <= CANVAS_HEIGHT - PIPE_MARGIN);
            assert_eq!(top, top.floor());
        }
    }

    #[test]
    fn drops_every_offscreen_pipe_in_one_step() {
        let mut pipes = Pipes::from(vec![pipe_at(-60.0), pipe_at(-55.0), pipe_at(100.0)]);
        assert_eq!(advance(&mut pipes), 2);
        assert_eq!(pipes.len(), 1);
        assert_eq!(pipes[0].x, 100.0 - PIPE_SPEED);
    }

    #[test]
    fn keeps_a_pipe_whose_edge_is_exactly_at_zero() {
        let mut pipes = Pipes::from(vec![pipe_at(-PIPE_WIDTH + PIPE_SPEED)]);
        assert_eq!(advance(&mut pipes), 0);
        assert_eq!(advance(&mut pipes), 1);
    }
}
