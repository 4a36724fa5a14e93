//! Segment tracing, bounding-box coverage and centroid

use crate::action::{Action, ActionKind};
use crate::layout::{Canvas, Point};

/// Geometry visited while the mouse button was held
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StrokeTrace {
    /// Number of mouseDown→mouseUp segments
    pub segments: usize,
    /// Canvas-relative in-canvas points carried by actions inside a segment
    pub points: Vec<Point>,
    /// Canvas-relative positions of bare mouseDowns, taken from the last known pointer
    pub pen_down: Vec<Point>,
}

/// Replay the button state.
///
/// A mouseDown opens the segment before its own point is considered, and a
/// mouseUp closes it before its own point is considered.
pub fn trace(actions: &[Action], canvas: &Canvas) -> StrokeTrace {
    let mut out = StrokeTrace::default();
    let mut in_segment = false;
    let mut last_known: Option<Point> = None;

    for action in actions {
        let point = action.point();
        match action.kind {
            ActionKind::MouseDown => {
                if !in_segment {
                    out.segments += 1;
                    in_segment = true;
                }
                if point.is_none() {
                    if let Some(rel) = last_known.map(|p| canvas.to_canvas(p)) {
                        if canvas.contains(rel) {
                            out.pen_down.push(rel);
                        }
                    }
                }
            }
            ActionKind::MouseUp => in_segment = false,
            _ => {}
        }

        if let Some(p) = point {
            last_known = Some(p);
            let rel = canvas.to_canvas(p);
            if in_segment && canvas.contains(rel) {
                out.points.push(rel);
            }
        }
    }
    out
}

impl StrokeTrace {
    /// Bounding-box area of the stroke points over the canvas area, rounded to 4 decimals
    pub fn bounding_box_coverage(&self, canvas: &Canvas) -> f64 {
        let Some(first) = self.points.first() else {
            return 0.0;
        };
        let (min, max) = self.points.iter().fold((*first, *first), |(lo, hi), p| {
            (
                Point::new(lo.x.min(p.x), lo.y.min(p.y)),
                Point::new(hi.x.max(p.x), hi.y.max(p.y)),
            )
        });
        crate::round_to((max.x - min.x) * (max.y - min.y) / canvas.area(), 4)
    }

    /// Mean position of everything drawn, in canvas coordinates
    pub fn centroid(&self) -> Option<Point> {
        let count = self.points.len() + self.pen_down.len();
        if count == 0 {
            return None;
        }
        let (sx, sy) = self
            .points
            .iter()
            .chain(&self.pen_down)
            .fold((0.0, 0.0), |(sx, sy), p| (sx + p.x, sy + p.y));
        Some(Point::new(sx / count as f64, sy / count as f64))
    }
}
