//! The evaluation record returned for every action log

use indexmap::IndexMap;
use serde::Serialize;

use crate::action::{Action, ActionKind};
use crate::analysis::{DrawingAnalysis, ToolUsage};
use crate::classify::ErrorClassification;
use crate::criteria::CriteriaReport;
use crate::layout::Point;
use crate::region::Region;
use crate::validate::Diagnostic;

/// Per-kind action counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ActionBreakdown {
    #[serde(rename = "moveTo")]
    pub move_to: usize,
    pub click: usize,
    #[serde(rename = "mouseDown")]
    pub mouse_down: usize,
    #[serde(rename = "mouseUp")]
    pub mouse_up: usize,
    /// Unrecognized or missing action kinds
    pub unknown: usize,
}

impl ActionBreakdown {
    pub fn count(actions: &[Action]) -> Self {
        actions.iter().fold(Self::default(), |mut acc, a| {
            match a.kind {
                ActionKind::MoveTo => acc.move_to += 1,
                ActionKind::Click => acc.click += 1,
                ActionKind::MouseDown => acc.mouse_down += 1,
                ActionKind::MouseUp => acc.mouse_up += 1,
                ActionKind::Unknown(_) | ActionKind::Missing => acc.unknown += 1,
            }
            acc
        })
    }

    pub fn total(&self) -> usize {
        self.move_to + self.click + self.mouse_down + self.mouse_up + self.unknown
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Metrics {
    pub tool_changes: usize,
    pub color_changes: usize,
    pub drawing_segments: usize,
    pub canvas_coverage: f64,
    pub canvas_coverage_accurate: f64,
    pub exact_colors_used: Vec<String>,
    pub tools_selected: Vec<String>,
    /// Canvas-relative mean of the drawn points
    pub centroid: Option<Point>,
    pub tool_usage: IndexMap<String, ToolUsage>,
    pub spatial_accuracy: Option<f64>,
    pub spatial_constraints: Option<Region>,
    pub action_efficiency: Option<f64>,
}

impl Metrics {
    pub(crate) fn from_analysis(analysis: DrawingAnalysis) -> Self {
        Self {
            tool_changes: analysis.tool_changes,
            color_changes: analysis.color_changes,
            drawing_segments: analysis.drawing_segments,
            canvas_coverage: analysis.canvas_coverage,
            canvas_coverage_accurate: analysis.canvas_coverage_accurate,
            exact_colors_used: analysis.exact_colors_used,
            tools_selected: analysis.tools_selected,
            centroid: analysis.centroid,
            tool_usage: analysis.tool_usage,
            spatial_accuracy: None,
            spatial_constraints: None,
            action_efficiency: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvaluationResult {
    pub total_actions: usize,
    pub action_breakdown: ActionBreakdown,
    pub errors: Vec<Diagnostic>,
    pub warnings: Vec<Diagnostic>,
    pub metrics: Metrics,
    /// Present only when criteria were supplied
    #[serde(skip_serializing_if = "Option::is_none")]
    pub criteria_met: Option<CriteriaReport>,
    pub score: f64,
    pub error_classification: ErrorClassification,
}

impl EvaluationResult {
    /// Result for input that is not a list of actions
    pub fn not_a_list() -> Self {
        let errors = vec![Diagnostic::not_a_list()];
        Self {
            total_actions: 0,
            action_breakdown: ActionBreakdown::default(),
            error_classification: ErrorClassification {
                syntax_errors: errors.clone(),
                ..Default::default()
            },
            errors,
            warnings: Vec::new(),
            metrics: Metrics::default(),
            criteria_met: None,
            score: 0.0,
        }
    }

    /// Whether every criterion passed and the validator found no errors
    pub fn passed(&self) -> bool {
        self.errors.is_empty()
            && self
                .criteria_met
                .as_ref()
                .map_or(true, |r| r.checks().iter().all(|(_, ok)| *ok))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_breakdown_counts_unknown_kinds() {
        let actions = crate::action::parse_actions(&json!([
            {"action": "moveTo", "x": 1, "y": 2},
            {"action": "click"},
            {"action": "scroll"},
            {"x": 5},
            {"action": "mouseDown"},
        ]))
        .expect("list");
        let b = ActionBreakdown::count(&actions);
        assert_eq!(
            b,
            ActionBreakdown {
                move_to: 1,
                click: 1,
                mouse_down: 1,
                mouse_up: 0,
                unknown: 2,
            }
        );
        assert_eq!(b.total(), actions.len());
    }

    #[test]
    fn test_breakdown_serializes_with_action_names() {
        let json = serde_json::to_value(ActionBreakdown::default()).expect("serialize");
        assert_eq!(
            json,
            json!({"moveTo": 0, "click": 0, "mouseDown": 0, "mouseUp": 0, "unknown": 0})
        );
    }

    #[test]
    fn test_degenerate_result() {
        let r = EvaluationResult::not_a_list();
        assert_eq!(r.score, 0.0);
        assert_eq!(r.errors.len(), 1);
        assert_eq!(r.error_classification.syntax_errors, r.errors);
        assert!(!r.passed());
        assert!(serde_json::to_value(&r)
            .expect("serialize")
            .get("criteria_met")
            .is_none());
    }
}
