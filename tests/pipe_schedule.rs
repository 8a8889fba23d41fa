use rand::{SeedableRng, rngs::StdRng};

use flappy_voice::constants::{CANVAS_WIDTH, PIPE_GAP, PIPE_WIDTH};
use flappy_voice::game::pipes::Pipe;
use flappy_voice::game::{GameEvent, GameState, Phase, TickInput, tick};

fn playing_with(pipes: &[Pipe]) -> GameState {
    let mut state = GameState::new();
    state.start();
    state.pipes.extend(pipes.iter().copied());
    state
}

fn far_pipe(x: f64) -> Pipe {
    Pipe {
        x,
        width: PIPE_WIDTH,
        top: 200.0,
        bottom: 200.0 + PIPE_GAP,
    }
}

#[test]
fn spawns_once_the_last_pipe_is_left_of_150() {
    let mut rng = StdRng::seed_from_u64(1);

    // 151.4 - 1.5 = 149.9
    let step = tick(playing_with(&[far_pipe(151.4)]), &TickInput::default(), &mut rng);
    assert_eq!(step.state.pipes.len(), 2);
    let spawned = step.state.pipes[1];
    assert_eq!(spawned.x, CANVAS_WIDTH);
    assert_eq!(spawned.bottom - spawned.top, PIPE_GAP);
    assert!(matches!(step.events.last(), Some(GameEvent::Spawned(_))));

    // 151.6 - 1.5 = 150.1
    let step = tick(playing_with(&[far_pipe(151.6)]), &TickInput::default(), &mut rng);
    assert_eq!(step.state.pipes.len(), 1);
}

#[test]
fn collision_from_the_reference_layout_ends_the_game() {
    let mut rng = StdRng::seed_from_u64(1);
    // Lands at x = 40 after this frame's scroll.
    let pipe = Pipe {
        x: 41.5,
        width: 50.0,
        top: 100.0,
        bottom: 300.0,
    };
    let step = tick(playing_with(&[pipe]), &TickInput::default(), &mut rng);
    assert_eq!(step.state.phase, Phase::GameOver);
    assert_eq!(step.state.pipes[0].x, 40.0);
    assert!(step.events.contains(&GameEvent::Crashed { score: 0 }));
}

#[test]
fn passing_pipes_scores_one_each() {
    let mut rng = StdRng::seed_from_u64(1);
    // Both leave on the next frame; the third stays.
    let mut state = playing_with(&[far_pipe(-50.5), far_pipe(-49.0), far_pipe(300.0)]);
    state.bird.y = 300.0;

    let step = tick(state, &TickInput::default(), &mut rng);
    assert_eq!(step.state.score, 2);
    assert_eq!(step.state.pipes.len(), 1);
    let scored: Vec<_> = step
        .events
        .iter()
        .filter_map(|e| match e {
            GameEvent::Scored(n) => Some(*n),
            _ => None,
        })
        .collect();
    assert_eq!(scored, vec![1, 2]);
}
