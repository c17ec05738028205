//! Stroke path segments accumulated during a gesture.

use kurbo::{BezPath, Point, Rect};
use serde::{Deserialize, Serialize};

/// A single drawing command of a stroke path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathSegment {
    /// Start a new subpath at the point.
    MoveTo(Point),
    /// Straight line to the point.
    LineTo(Point),
    /// Quadratic curve to `end`.
    QuadraticTo { end: Point, control: Point },
    /// Cubic curve to `end`.
    CubicTo {
        end: Point,
        control1: Point,
        control2: Point,
    },
}

impl PathSegment {
    /// The point the segment ends on.
    pub fn end_point(&self) -> Point {
        match *self {
            PathSegment::MoveTo(p) | PathSegment::LineTo(p) => p,
            PathSegment::QuadraticTo { end, .. } | PathSegment::CubicTo { end, .. } => end,
        }
    }

    /// Whether this segment only moves the pen.
    pub fn is_move(&self) -> bool {
        matches!(self, PathSegment::MoveTo(_))
    }
}

/// The accumulated path of the gesture in progress.
///
/// Segments are only ever appended while a gesture is active; the path is
/// cleared when the gesture ends.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StrokePath {
    segments: Vec<PathSegment>,
}

impl StrokePath {
    /// Create an empty path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one segment.
    pub fn push(&mut self, segment: PathSegment) {
        self.segments.push(segment);
    }

    /// Get the segments in emission order.
    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Get the number of segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Check if the path is empty.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Remove all segments.
    pub fn clear(&mut self) {
        self.segments.clear();
    }

    /// Convert to a kurbo path for rasterization.
    pub fn to_bez_path(&self) -> BezPath {
        let mut path = BezPath::new();
        for segment in &self.segments {
            match *segment {
                PathSegment::MoveTo(p) => path.move_to(p),
                PathSegment::LineTo(p) => path.line_to(p),
                PathSegment::QuadraticTo { end, control } => path.quad_to(control, end),
                PathSegment::CubicTo {
                    end,
                    control1,
                    control2,
                } => path.curve_to(control1, control2, end),
            }
        }
        path
    }

    /// Bounding box of all end and control points.
    pub fn bounds(&self) -> Rect {
        let mut points = self.segments.iter().flat_map(|segment| match *segment {
            PathSegment::MoveTo(p) | PathSegment::LineTo(p) => vec![p],
            PathSegment::QuadraticTo { end, control } => vec![control, end],
            PathSegment::CubicTo {
                end,
                control1,
                control2,
            } => vec![control1, control2, end],
        });

        let Some(first) = points.next() else {
            return Rect::ZERO;
        };
        points.fold(Rect::from_points(first, first), |rect, p| {
            rect.union_pt(p)
        })
    }
}

impl Extend<PathSegment> for StrokePath {
    fn extend<T: IntoIterator<Item = PathSegment>>(&mut self, iter: T) {
        self.segments.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::PathEl;

    #[test]
    fn test_to_bez_path_preserves_order() {
        let mut path = StrokePath::new();
        path.push(PathSegment::MoveTo(Point::new(0.0, 0.0)));
        path.push(PathSegment::CubicTo {
            end: Point::new(3.0, 3.0),
            control1: Point::new(1.0, 1.0),
            control2: Point::new(2.0, 2.0),
        });
        path.push(PathSegment::QuadraticTo {
            end: Point::new(5.0, 5.0),
            control: Point::new(4.0, 4.0),
        });
        path.push(PathSegment::LineTo(Point::new(6.0, 6.0)));

        let elements: Vec<PathEl> = path.to_bez_path().elements().to_vec();
        assert_eq!(
            elements,
            vec![
                PathEl::MoveTo(Point::new(0.0, 0.0)),
                PathEl::CurveTo(Point::new(1.0, 1.0), Point::new(2.0, 2.0), Point::new(3.0, 3.0)),
                PathEl::QuadTo(Point::new(4.0, 4.0), Point::new(5.0, 5.0)),
                PathEl::LineTo(Point::new(6.0, 6.0)),
            ]
        );
    }

    #[test]
    fn test_bounds() {
        let mut path = StrokePath::new();
        assert_eq!(path.bounds(), Rect::ZERO);

        path.push(PathSegment::MoveTo(Point::new(10.0, 20.0)));
        path.push(PathSegment::QuadraticTo {
            end: Point::new(30.0, 5.0),
            control: Point::new(-4.0, 40.0),
        });

        let bounds = path.bounds();
        assert!((bounds.x0 + 4.0).abs() < f64::EPSILON);
        assert!((bounds.y0 - 5.0).abs() < f64::EPSILON);
        assert!((bounds.x1 - 30.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_end_point() {
        let segment = PathSegment::CubicTo {
            end: Point::new(9.0, 8.0),
            control1: Point::ZERO,
            control2: Point::ZERO,
        };
        assert_eq!(segment.end_point(), Point::new(9.0, 8.0));
        assert!(!segment.is_move());
        assert!(PathSegment::MoveTo(Point::ZERO).is_move());
    }
}
