use rand::{Rng, SeedableRng, rngs::StdRng};

use flappy_voice::constants::{BIRD_RADIUS, CANVAS_HEIGHT, PIPE_SPEED, TERMINAL_VELOCITY};
use flappy_voice::game::{GameState, Phase, TickInput, tick};

#[test]
fn velocity_and_height_stay_in_bounds_under_any_input() {
    let mut world = StdRng::seed_from_u64(11);
    let mut noise = StdRng::seed_from_u64(12);
    let mut state = GameState::new();
    state.start();

    for _ in 0..20_000 {
        let input = TickInput {
            jump: noise.gen_bool(0.05),
            volume: noise.gen_bool(0.7).then(|| noise.r#gen::<f64>()),
        };
        state = tick(state, &input, &mut world).state;

        let bird = &state.bird;
        assert!(bird.velocity.abs() <= TERMINAL_VELOCITY, "velocity {}", bird.velocity);
        assert!(bird.y >= BIRD_RADIUS && bird.y <= CANVAS_HEIGHT - BIRD_RADIUS, "y {}", bird.y);

        if state.phase == Phase::GameOver {
            state.start();
        }
    }
}

#[test]
fn score_never_moves_without_a_pipe_leaving() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut noise = StdRng::seed_from_u64(6);
    let mut state = GameState::new();
    state.start();

    for _ in 0..5_000 {
        let before = state.clone();
        let input = TickInput {
            jump: noise.gen_bool(0.04),
            volume: None,
        };
        state = tick(state, &input, &mut rng).state;

        if before.phase == Phase::Playing {
            let left = before
                .pipes
                .iter()
                .filter(|p| p.right() - PIPE_SPEED < 0.0)
                .count() as u32;
            assert_eq!(state.score, before.score + left);
        } else {
            state.start();
        }
    }
}
