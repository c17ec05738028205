//! Curve smoothing of raw pointer samples.
//!
//! Samples are buffered in a [`PointWindow`]. Once five samples are present,
//! the fourth one is replaced by the midpoint of the third and fifth and a
//! cubic is emitted from the first sample to that corrected point, using the
//! second and third samples as control points. The corrected point and the
//! fifth sample then seed the next window, so consecutive cubics share an
//! endpoint. Tangents are not matched across that joint.

mod window;

pub use window::{PointWindow, WINDOW_LEN};

use crate::stroke::PathSegment;
use kurbo::Point;

/// Number of samples carried into the next window after an emission.
const SEED_LEN: usize = 2;

/// Apply the mid-gesture rule.
///
/// With exactly [`WINDOW_LEN`] samples buffered, emits `MoveTo(p0)` and the
/// smoothed cubic, then truncates the window to its seed. Otherwise leaves
/// the window untouched and emits nothing.
pub fn smooth(window: &mut PointWindow) -> Option<[PathSegment; 2]> {
    if window.count() != WINDOW_LEN {
        return None;
    }

    let points = window.points_mut();
    points[3] = midpoint(points[2], points[4]);

    let segments = [
        PathSegment::MoveTo(points[0]),
        PathSegment::CubicTo {
            end: points[3],
            control1: points[1],
            control2: points[2],
        },
    ];

    window.truncate_keeping_last(SEED_LEN);
    Some(segments)
}

/// Apply the end-of-gesture rule to a partial window.
///
/// The number of buffered samples picks the closing segment: four close with
/// a cubic, three with a quadratic, two with a line and one leaves a lone
/// `MoveTo` (a dot). An empty window emits nothing.
pub fn finish(window: &PointWindow) -> Vec<PathSegment> {
    let points = window.points();
    let Some(&start) = points.first() else {
        return Vec::new();
    };

    let mut segments = vec![PathSegment::MoveTo(start)];
    match *points {
        [_, control1, control2, end, ..] => segments.push(PathSegment::CubicTo {
            end,
            control1,
            control2,
        }),
        [_, control, end] => segments.push(PathSegment::QuadraticTo { end, control }),
        [_, end] => segments.push(PathSegment::LineTo(end)),
        _ => {}
    }
    segments
}

fn midpoint(a: Point, b: Point) -> Point {
    Point::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window_of(points: &[(f64, f64)]) -> PointWindow {
        let mut window = PointWindow::new();
        for &(x, y) in points {
            window.append(Point::new(x, y));
        }
        window
    }

    #[test]
    fn test_smooth_needs_five_points() {
        let mut window = window_of(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (3.0, 3.0)]);
        assert!(smooth(&mut window).is_none());
        assert_eq!(window.count(), 4);
    }

    #[test]
    fn test_smooth_emits_corrected_cubic() {
        let mut window = window_of(&[
            (0.0, 0.0),
            (10.0, 3.0),
            (20.0, 7.0),
            (31.0, 50.0), // jittery sample, replaced
            (40.0, 11.0),
        ]);

        let segments = smooth(&mut window).unwrap();
        assert_eq!(segments[0], PathSegment::MoveTo(Point::new(0.0, 0.0)));
        assert_eq!(
            segments[1],
            PathSegment::CubicTo {
                end: Point::new(30.0, 9.0),
                control1: Point::new(10.0, 3.0),
                control2: Point::new(20.0, 7.0),
            }
        );
    }

    #[test]
    fn test_smooth_seeds_next_window() {
        let mut window = window_of(&[
            (0.0, 0.0),
            (1.0, 5.0),
            (2.0, 4.0),
            (3.0, 9.0),
            (6.0, 2.0),
        ]);

        smooth(&mut window).unwrap();
        assert_eq!(window.points(), &[Point::new(4.0, 3.0), Point::new(6.0, 2.0)]);

        // The next cubic starts where the previous one ended
        window.append(Point::new(7.0, 1.0));
        window.append(Point::new(8.0, 0.0));
        window.append(Point::new(9.0, 1.0));
        let next = smooth(&mut window).unwrap();
        assert_eq!(next[0], PathSegment::MoveTo(Point::new(4.0, 3.0)));
    }

    #[test]
    fn test_finish_selects_terminal_segment() {
        let four = finish(&window_of(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0)]));
        assert_eq!(four.len(), 2);
        assert_eq!(
            four[1],
            PathSegment::CubicTo {
                end: Point::new(3.0, 0.0),
                control1: Point::new(1.0, 0.0),
                control2: Point::new(2.0, 0.0),
            }
        );

        let three = finish(&window_of(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]));
        assert_eq!(
            three[1],
            PathSegment::QuadraticTo {
                end: Point::new(2.0, 0.0),
                control: Point::new(1.0, 0.0),
            }
        );

        let two = finish(&window_of(&[(0.0, 0.0), (1.0, 0.0)]));
        assert_eq!(two[1], PathSegment::LineTo(Point::new(1.0, 0.0)));

        let one = finish(&window_of(&[(5.0, 5.0)]));
        assert_eq!(one, vec![PathSegment::MoveTo(Point::new(5.0, 5.0))]);

        assert!(finish(&PointWindow::new()).is_empty());
    }
}
