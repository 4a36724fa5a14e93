//! Spatial analyzer
//!
//! Reconstructs what was drawn purely from action geometry: which tools and
//! colors were picked, how many strokes were made, how much of the canvas
//! they cover and where their mass sits.

pub mod grid;
pub mod selection;
pub mod stroke;

pub use grid::{accurate_coverage, CoverageGrid, Stroke, GRID_SIZE};
pub use selection::{Selection, ToolUsage};
pub use stroke::StrokeTrace;

use indexmap::IndexMap;

use crate::action::Action;
use crate::layout::{Layout, Point};

/// Everything the analyzer derives from one action log
#[derive(Debug, Clone, PartialEq)]
pub struct DrawingAnalysis {
    pub tool_changes: usize,
    pub color_changes: usize,
    pub drawing_segments: usize,
    /// Bounding-box estimate
    pub canvas_coverage: f64,
    /// Density-grid estimate
    pub canvas_coverage_accurate: f64,
    pub exact_colors_used: Vec<String>,
    pub tools_selected: Vec<String>,
    pub centroid: Option<Point>,
    /// Usage check for every tool declared in the layout, in declaration order
    pub tool_usage: IndexMap<String, ToolUsage>,
}

impl DrawingAnalysis {
    /// Usage of a tool by name; tools the layout does not declare were never selected
    pub fn usage_of(&self, tool: &str) -> ToolUsage {
        self.tool_usage.get(tool).copied().unwrap_or_default()
    }
}

pub fn analyze(actions: &[Action], layout: &Layout) -> DrawingAnalysis {
    let selections = selection::selections(actions);
    let trace = stroke::trace(actions, &layout.canvas);

    let tool_usage = layout
        .tools
        .iter()
        .map(|t| {
            let usage = selection::tool_usage(actions, &selections, layout, &t.name);
            (t.name.clone(), usage)
        })
        .collect();

    DrawingAnalysis {
        tool_changes: selection::count_tool_changes(actions, layout),
        color_changes: selection::count_color_changes(actions, layout),
        drawing_segments: trace.segments,
        canvas_coverage: trace.bounding_box_coverage(&layout.canvas),
        canvas_coverage_accurate: grid::accurate_coverage(actions, &selections, layout),
        exact_colors_used: selection::exact_colors(&selections, layout),
        tools_selected: selection::tool_sequence(&selections, layout),
        centroid: trace.centroid(),
        tool_usage,
    }
}
