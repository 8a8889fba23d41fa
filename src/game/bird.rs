use crate::constants::{
    BIRD_RADIUS, BIRD_X, CANVAS_HEIGHT, GRAVITY, JUMP_VELOCITY, TERMINAL_VELOCITY,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bird {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub velocity: f64,
}

impl Default for Bird {
    fn default() -> Self {
        Self {
            x: BIRD_X,
            y: CANVAS_HEIGHT / 2.0,
            radius: BIRD_RADIUS,
            velocity: 0.0,
        }
    }
}

impl Bird {
    pub fn jump(&mut self) {
        self.velocity = JUMP_VELOCITY;
    }

    /// One physics step: gravity, terminal clamp, move, then the soft
    /// floor/ceiling. Touching a boundary stops the bird but never kills it.
    pub fn integrate(&mut self) {
        self.velocity = (self.velocity + GRAVITY).clamp(-TERMINAL_VELOCITY, TERMINAL_VELOCITY);
        self.y += self.velocity;

        if self.y + self.radius > CANVAS_HEIGHT {
            self.y = CANVAS_HEIGHT - self.radius;
            self.velocity = 0.0;
        }
        if self.y - self.radius < 0.0 {
            self.y = self.radius;
            self.velocity = 0.0;
        }
    }

    pub fn top(&self) -> f64 {
        self.y - self.radius
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.radius
    }
}
