//! Density-grid coverage estimation
//!
//! The canvas is divided into a fixed 20x20 grid of boolean cells. Freehand
//! tools mark the cell under every visited point; shape tools are rasterized
//! once at mouse-up from their two control points. The sampling densities
//! below are part of the scoring contract and must not change.

use crate::action::{Action, ActionKind};
use crate::layout::{Canvas, Layout, Point};

use super::selection::Selection;

pub const GRID_SIZE: usize = 20;

/// Angular samples used to sweep a circle
pub const CIRCLE_ANGULAR_STEPS: usize = 50;

/// Pixels per radial sample when sweeping a circle
pub const CIRCLE_RADIAL_SPACING: f64 = 20.0;

/// Slack, in pixels, around the canvas when skipping shape samples.
///
/// Lines and circles keep their nominal sample positions, but only samples
/// that can land within this distance of the canvas are generated. A line is
/// clipped to the canvas crossing and a circle's radii to the band between its
/// nearest and farthest canvas points. Sample counts are also capped by the
/// canvas size, which only binds when f64 precision blurs the window.
const SAMPLE_MARGIN: f64 = 1.0;

/// How a tool deposits ink on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stroke {
    Freehand,
    Rectangle,
    Circle,
    Line,
    /// Tools that leave no trace (or are unknown)
    None,
}

impl Stroke {
    pub fn for_tool(name: &str) -> Self {
        match name {
            "pen" | "eraser" => Stroke::Freehand,
            "rectangle" => Stroke::Rectangle,
            "circle" => Stroke::Circle,
            "line" => Stroke::Line,
            _ => Stroke::None,
        }
    }
}

/// Saturating boolean coverage grid over the canvas
#[derive(Debug, Clone)]
pub struct CoverageGrid {
    cells: [[bool; GRID_SIZE]; GRID_SIZE],
    canvas: Canvas,
}

impl CoverageGrid {
    pub fn new(canvas: Canvas) -> Self {
        Self {
            cells: [[false; GRID_SIZE]; GRID_SIZE],
            canvas,
        }
    }

    /// Mark the cell under a canvas-relative point; points off the canvas are ignored
    pub fn mark_point(&mut self, rel: Point) {
        if !self.canvas.contains(rel) {
            return;
        }
        let gx = self.cell_index(rel.x, self.canvas.width).min(GRID_SIZE as i64 - 1);
        let gy = self.cell_index(rel.y, self.canvas.height).min(GRID_SIZE as i64 - 1);
        self.cells[gy as usize][gx as usize] = true;
    }

    /// Mark every cell whose pixel range intersects the rectangle spanned by `a` and `b`
    pub fn mark_rectangle(&mut self, a: Point, b: Point) {
        let last = GRID_SIZE as i64 - 1;
        let min_gx = self.cell_index(a.x.min(b.x), self.canvas.width).max(0);
        let max_gx = self.cell_index(a.x.max(b.x), self.canvas.width).min(last);
        let min_gy = self.cell_index(a.y.min(b.y), self.canvas.height).max(0);
        let max_gy = self.cell_index(a.y.max(b.y), self.canvas.height).min(last);
        for gy in min_gy..=max_gy {
            for gx in min_gx..=max_gx {
                self.cells[gy as usize][gx as usize] = true;
            }
        }
    }

    /// Polar sweep centered at `center` out to `edge`
    pub fn mark_circle(&mut self, center: Point, edge: Point) {
        let radius = center.distance_to(edge);
        if !radius.is_finite() {
            return;
        }
        let radial_steps = (radius / CIRCLE_RADIAL_SPACING).floor() + 1.0;
        let (near, far) = self.radial_reach(center);
        let diagonal = self.canvas.width.hypot(self.canvas.height);
        let max_radii =
            ((diagonal + 2.0 * SAMPLE_MARGIN) / CIRCLE_RADIAL_SPACING).ceil() as usize + 3;
        for angle in linspace(0.0, 2.0 * std::f64::consts::PI, CIRCLE_ANGULAR_STEPS) {
            let (sin, cos) = angle.sin_cos();
            let radii = linspace_within(
                0.0,
                radius,
                radial_steps,
                near - SAMPLE_MARGIN,
                far + SAMPLE_MARGIN,
            );
            for r in radii.take(max_radii) {
                self.mark_point(Point::new(center.x + r * cos, center.y + r * sin));
            }
        }
    }

    /// Unit-pixel samples along the dominant axis from `a` to `b`
    pub fn mark_line(&mut self, a: Point, b: Point) {
        let dx = b.x - a.x;
        let dy = b.y - a.y;
        let span = dx.abs().max(dy.abs());
        if !span.is_finite() {
            return;
        }
        let steps = span.floor() + 1.0;
        let denom = (steps - 1.0).max(1.0);
        let Some((t0, t1)) = self.clip_segment(a, dx, dy) else {
            return;
        };
        let first = ((t0 * denom).floor() - 1.0).max(0.0);
        let last = ((t1 * denom).ceil() + 1.0).min(steps - 1.0);
        if last < first {
            return;
        }
        let extent = self.canvas.width.max(self.canvas.height);
        let max_steps = (extent + 2.0 * SAMPLE_MARGIN).ceil() as u64 + 5;
        for k in 0..=((last - first) as u64).min(max_steps) {
            let t = (first + k as f64) / denom;
            self.mark_point(Point::new(a.x + t * dx, a.y + t * dy));
        }
    }

    pub fn filled_cells(&self) -> usize {
        self.cells.iter().flatten().filter(|&&c| c).count()
    }

    /// Fraction of filled cells, rounded to 4 decimals
    pub fn coverage(&self) -> f64 {
        crate::round_to(
            self.filled_cells() as f64 / (GRID_SIZE * GRID_SIZE) as f64,
            4,
        )
    }

    fn cell_index(&self, value: f64, extent: f64) -> i64 {
        (value / extent * GRID_SIZE as f64) as i64
    }

    /// Parameter range `[t0, t1]` of `a + t * (dx, dy)` inside the widened canvas
    fn clip_segment(&self, a: Point, dx: f64, dy: f64) -> Option<(f64, f64)> {
        let (mut t0, mut t1) = (0.0f64, 1.0f64);
        for (p, q) in [
            (-dx, a.x + SAMPLE_MARGIN),
            (dx, self.canvas.width + SAMPLE_MARGIN - a.x),
            (-dy, a.y + SAMPLE_MARGIN),
            (dy, self.canvas.height + SAMPLE_MARGIN - a.y),
        ] {
            if p == 0.0 {
                if q < 0.0 {
                    return None;
                }
            } else if p < 0.0 {
                t0 = t0.max(q / p);
            } else {
                t1 = t1.min(q / p);
            }
        }
        (t0 <= t1).then_some((t0, t1))
    }

    /// Distances from `center` to the nearest and farthest canvas points
    fn radial_reach(&self, center: Point) -> (f64, f64) {
        let (w, h) = (self.canvas.width, self.canvas.height);
        let near_x = (-center.x).max(center.x - w).max(0.0);
        let near_y = (-center.y).max(center.y - h).max(0.0);
        let far_x = center.x.abs().max((center.x - w).abs());
        let far_y = center.y.abs().max((center.y - h).abs());
        (near_x.hypot(near_y), far_x.hypot(far_y))
    }
}

/// `num` evenly spaced samples over `[start, stop]`, both ends included
fn linspace(start: f64, stop: f64, num: usize) -> impl Iterator<Item = f64> {
    let step = if num > 1 {
        (stop - start) / (num - 1) as f64
    } else {
        0.0
    };
    (0..num).map(move |k| {
        if num > 1 && k == num - 1 {
            stop
        } else {
            start + k as f64 * step
        }
    })
}

/// The samples of `linspace(start, stop, num)` lying in `[lo, hi]`, skipping
/// the rest without visiting them. `num` is a float so huge counts stay exact
/// enough to position the window.
fn linspace_within(
    start: f64,
    stop: f64,
    num: f64,
    lo: f64,
    hi: f64,
) -> impl Iterator<Item = f64> {
    let last = num - 1.0;
    let step = if num > 1.0 { (stop - start) / last } else { 0.0 };
    let (first, end) = if step > 0.0 {
        (
            ((lo - start) / step).floor().max(0.0),
            ((hi - start) / step).ceil().min(last),
        )
    } else {
        (0.0, 0.0)
    };
    let count = if end >= first { (end - first) as u64 + 1 } else { 0 };
    (0..count).map(move |k| {
        let i = first + k as f64;
        if num > 1.0 && i == last {
            stop
        } else {
            start + i * step
        }
    })
}

/// Scratch state for one replay of the log
struct DrawingState<'a> {
    is_drawing: bool,
    current_tool: &'a str,
    mouse_down: Option<Point>,
    last_known: Option<Point>,
}

/// Replay the log onto a fresh grid and return the rounded coverage.
pub fn accurate_coverage(actions: &[Action], selections: &[Selection], layout: &Layout) -> f64 {
    let mut grid = CoverageGrid::new(layout.canvas);
    let mut state = DrawingState {
        is_drawing: false,
        current_tool: "pen",
        mouse_down: None,
        last_known: None,
    };
    let mut pending = selections.iter().peekable();

    for (i, action) in actions.iter().enumerate() {
        let point = action.point();
        if point.is_some() {
            state.last_known = point;
        }

        while let Some(sel) = pending.next_if(|s| s.index <= i) {
            if let Some(tool) = layout.tool_at(sel.point) {
                state.current_tool = &tool.name;
            }
        }

        match action.kind {
            ActionKind::MouseDown => {
                state.is_drawing = true;
                state.mouse_down = point.or(state.last_known);
            }
            ActionKind::MouseUp => {
                if state.is_drawing {
                    if let Some(down) = state.mouse_down {
                        let up = point.or(state.last_known).unwrap_or(down);
                        let a = layout.canvas.to_canvas(down);
                        let b = layout.canvas.to_canvas(up);
                        match Stroke::for_tool(state.current_tool) {
                            Stroke::Rectangle => grid.mark_rectangle(a, b),
                            Stroke::Circle => grid.mark_circle(a, b),
                            Stroke::Line => grid.mark_line(a, b),
                            Stroke::Freehand | Stroke::None => {}
                        }
                    }
                }
                state.is_drawing = false;
                state.mouse_down = None;
            }
            _ => {}
        }

        if state.is_drawing && Stroke::for_tool(state.current_tool) == Stroke::Freehand {
            if let Some(p) = point {
                grid.mark_point(layout.canvas.to_canvas(p));
            }
        }
    }

    grid.coverage()
}
