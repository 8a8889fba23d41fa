use super::bird::Bird;
use super::pipes::Pipe;

/// Bird bounding box against the pipe column, then against the gap.
pub fn hits_pipe(bird: &Bird, pipe: &Pipe) -> bool {
    let overlaps_column = bird.x + bird.radius > pipe.x && bird.x - bird.radius < pipe.right();
    overlaps_column && (bird.top() < pipe.top || bird.bottom() > pipe.bottom)
}

pub fn hits_any<'a>(bird: &Bird, pipes: impl IntoIterator<Item = &'a Pipe>) -> bool {
    pipes.into_iter().any(|pipe| hits_pipe(bird, pipe))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pipe(x: f64, top: f64, bottom: f64) -> Pipe {
        Pipe {
            x,
            width: 50.0,
            top,
            bottom,
        }
    }

    fn bird_at(y: f64) -> Bird {
        Bird {
            y,
            ..Bird::default()
        }
    }

    #[test]
    fn lower_edge_below_gap() {
        assert!(hits_pipe(&bird_at(300.0), &pipe(40.0, 100.0, 300.0)));
    }

    #[test]
    fn upper_edge_above_gap() {
        assert!(hits_pipe(&bird_at(110.0), &pipe(40.0, 100.0, 300.0)));
    }

    #[test]
    fn inside_gap_is_safe() {
        assert!(!hits_pipe(&bird_at(200.0), &pipe(40.0, 100.0, 300.0)));
        // Exactly touching both edges is still inside.
        assert!(!hits_pipe(&bird_at(200.0), &pipe(40.0, 180.0, 220.0)));
    }

    #[test]
    fn no_horizontal_overlap_means_no_hit() {
        // Column 70..120 only touches the bird's right edge.
        assert!(!hits_pipe(&bird_at(300.0), &pipe(70.0, 100.0, 150.0)));
        // Column -20..30 only touches the left edge.
        assert!(!hits_pipe(&bird_at(300.0), &pipe(-20.0, 100.0, 150.0)));
        assert!(hits_pipe(&bird_at(300.0), &pipe(69.0, 100.0, 150.0)));
    }

    #[test]
    fn any_pipe_counts() {
        let pipes = [pipe(300.0, 0.0, 10.0), pipe(40.0, 100.0, 300.0)];
        assert!(hits_any(&bird_at(300.0), &pipes));
        assert!(!hits_any(&bird_at(200.0), &pipes));
    }
}
