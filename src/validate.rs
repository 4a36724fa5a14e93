//! Action stream validator.
//!
//! Runs three independent passes over the decoded log: structural syntax,
//! coordinate bounds, and efficiency/logic advisories. Every problem is
//! collected; nothing short-circuits.

use std::fmt;

use serde::Serialize;

use crate::action::{Action, ActionKind};
use crate::layout::{Layout, Point};

/// Actions beyond this count trigger an efficiency warning
pub const MAX_REASONABLE_ACTIONS: usize = 1000;

/// Number of actions shown on each side of an offending coordinate
const CONTEXT_RANGE: usize = 2;

/// Category of a diagnostic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DiagnosticKind {
    SyntaxError,
    CoordinateError,
    EfficiencyWarning,
    LogicError,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiagnosticKind::SyntaxError => write!(f, "SYNTAX_ERROR"),
            DiagnosticKind::CoordinateError => write!(f, "COORDINATE_ERROR"),
            DiagnosticKind::EfficiencyWarning => write!(f, "EFFICIENCY_WARNING"),
            DiagnosticKind::LogicError => write!(f, "LOGIC_ERROR"),
        }
    }
}

/// A problem found in the action log
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    #[serde(rename = "type")]
    pub kind: DiagnosticKind,
    /// Offending action index; absent for log-level problems
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<CoordinateContext>,
}

impl Diagnostic {
    fn new(kind: DiagnosticKind, index: Option<usize>, message: impl Into<String>) -> Self {
        Self {
            kind,
            index,
            message: message.into(),
            action_detail: None,
            context: None,
        }
    }

    fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.action_detail = Some(detail.into());
        self
    }

    /// The single error reported when the log is not an array
    pub fn not_a_list() -> Self {
        Self::new(
            DiagnosticKind::SyntaxError,
            None,
            "Actions must be a list/array",
        )
    }
}

/// Which rectangle a coordinate error was checked against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundsKind {
    Screen,
    Canvas,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
        }
    }
}

/// One axis of a point that fell outside its valid range
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AxisViolation {
    pub axis: Axis,
    pub value: f64,
    pub valid_min: f64,
    pub valid_max: f64,
    pub problem: String,
    pub suggestion: String,
}

/// One entry of the surrounding action sequence
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContextLine {
    pub index: usize,
    pub action: String,
    pub is_error: bool,
}

/// Structured explanation attached to every coordinate error
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoordinateContext {
    pub bounds: BoundsKind,
    pub violations: Vec<AxisViolation>,
    pub sequence: Vec<ContextLine>,
}

/// Output of the validator
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    /// Syntax errors in action order, followed by coordinate errors in action order
    pub errors: Vec<Diagnostic>,
    pub warnings: Vec<Diagnostic>,
}

/// Run all validation passes over a decoded log.
pub fn validate(actions: &[Action], layout: &Layout) -> ValidationReport {
    let mut errors = check_syntax(actions);
    errors.extend(check_coordinates(actions, layout));
    ValidationReport {
        errors,
        warnings: check_efficiency(actions),
    }
}

// ── Syntax ────────────────────────────────────────────────────────

fn check_syntax(actions: &[Action]) -> Vec<Diagnostic> {
    let mut errors = Vec::new();
    for (i, action) in actions.iter().enumerate() {
        match &action.kind {
            ActionKind::Missing => {
                errors.push(Diagnostic::new(
                    DiagnosticKind::SyntaxError,
                    Some(i),
                    "Missing 'action' field",
                ));
            }
            ActionKind::MoveTo if !action.has_coordinates() => {
                errors.push(Diagnostic::new(
                    DiagnosticKind::SyntaxError,
                    Some(i),
                    "moveTo requires 'x' and 'y' coordinates",
                ));
            }
            ActionKind::Unknown(name) => {
                errors.push(Diagnostic::new(
                    DiagnosticKind::SyntaxError,
                    Some(i),
                    format!("Unknown action type: {name}"),
                ));
            }
            _ => {}
        }
    }
    errors
}

// ── Coordinates ───────────────────────────────────────────────────

fn check_coordinates(actions: &[Action], layout: &Layout) -> Vec<Diagnostic> {
    let mut errors = Vec::new();
    for (i, action) in actions.iter().enumerate() {
        if !action.has_coordinates() {
            continue;
        }
        let Some(point) = action.point() else {
            errors.push(
                Diagnostic::new(
                    DiagnosticKind::SyntaxError,
                    Some(i),
                    format!(
                        "Invalid coordinate types at index {i}: x={}, y={}",
                        action.x, action.y
                    ),
                )
                .with_detail(action.kind.to_string()),
            );
            continue;
        };

        if !layout.screen.contains(point) {
            errors.push(coordinate_error(
                actions,
                i,
                point,
                BoundsKind::Screen,
                screen_violations(point, layout),
                layout,
            ));
        }

        if action.kind == ActionKind::MouseDown {
            let rel = layout.canvas.to_canvas(point);
            if !layout.canvas.contains(rel) {
                errors.push(coordinate_error(
                    actions,
                    i,
                    point,
                    BoundsKind::Canvas,
                    canvas_violations(point, rel, layout),
                    layout,
                ));
            }
        }
    }
    errors
}

fn screen_violations(p: Point, layout: &Layout) -> Vec<AxisViolation> {
    let screen = layout.screen;
    let canvas = layout.canvas;
    let mut out = Vec::new();
    for (axis, value, limit, edge, extent) in [
        (Axis::X, p.x, screen.width, canvas.right(), "width"),
        (Axis::Y, p.y, screen.height, canvas.bottom(), "height"),
    ] {
        if value < 0.0 {
            out.push(AxisViolation {
                axis,
                value,
                valid_min: 0.0,
                valid_max: limit,
                problem: format!("{axis}={value} is negative"),
                suggestion: format!("Use {axis} >= 0"),
            });
        } else if value > limit {
            out.push(AxisViolation {
                axis,
                value,
                valid_min: 0.0,
                valid_max: limit,
                problem: format!("{axis}={value} exceeds screen {extent} ({limit})"),
                suggestion: format!("For canvas drawing, use {axis} <= {edge}"),
            });
        }
    }
    out
}

fn canvas_violations(p: Point, rel: Point, layout: &Layout) -> Vec<AxisViolation> {
    let canvas = layout.canvas;
    let mut out = Vec::new();
    for (axis, value, rel_value, start, end, size, before, after) in [
        (Axis::X, p.x, rel.x, canvas.offset_x, canvas.right(), canvas.width, "left of", "right of"),
        (Axis::Y, p.y, rel.y, canvas.offset_y, canvas.bottom(), canvas.height, "above", "below"),
    ] {
        if rel_value < 0.0 {
            out.push(AxisViolation {
                axis,
                value,
                valid_min: start,
                valid_max: end,
                problem: format!(
                    "{axis}={value} is {before} canvas (canvas starts at {axis}={start})"
                ),
                suggestion: format!("Use {axis} >= {start}"),
            });
        } else if rel_value > size {
            out.push(AxisViolation {
                axis,
                value,
                valid_min: start,
                valid_max: end,
                problem: format!("{axis}={value} is {after} canvas (canvas ends at {axis}={end})"),
                suggestion: format!("Use {axis} <= {end}"),
            });
        }
    }
    out
}

fn coordinate_error(
    actions: &[Action],
    index: usize,
    point: Point,
    bounds: BoundsKind,
    violations: Vec<AxisViolation>,
    layout: &Layout,
) -> Diagnostic {
    let kind = &actions[index].kind;
    let sequence = sequence_context(actions, index);

    let mut message = match bounds {
        BoundsKind::Screen => format!(
            "Action at index {index}: {kind}(x={}, y={}) - Coordinates out of screen bounds.\n",
            point.x, point.y
        ),
        BoundsKind::Canvas => format!(
            "Action at index {index}: {kind}(x={}, y={}) - Drawing outside canvas area.\n  Canvas area: x ∈ [{}, {}], y ∈ [{}, {}]\n",
            point.x,
            point.y,
            layout.canvas.offset_x,
            layout.canvas.right(),
            layout.canvas.offset_y,
            layout.canvas.bottom()
        ),
    };
    let explained: Vec<String> = violations
        .iter()
        .map(|v| {
            format!(
                "  Problem: {}\n  Valid range: {} ∈ [{}, {}]\n  Suggestion: {}",
                v.problem, v.axis, v.valid_min, v.valid_max, v.suggestion
            )
        })
        .collect();
    message.push_str(&explained.join("\n"));
    message.push_str("\n  Action sequence:\n");
    for line in &sequence {
        if line.is_error {
            message.push_str(&format!("    [{}] {} ← ERROR\n", line.index, line.action));
        } else {
            message.push_str(&format!("    [{}] {}\n", line.index, line.action));
        }
    }

    Diagnostic {
        kind: DiagnosticKind::CoordinateError,
        index: Some(index),
        message,
        action_detail: Some(format!("{kind}(x={}, y={})", point.x, point.y)),
        context: Some(CoordinateContext {
            bounds,
            violations,
            sequence,
        }),
    }
}

fn sequence_context(actions: &[Action], index: usize) -> Vec<ContextLine> {
    let start = index.saturating_sub(CONTEXT_RANGE);
    let end = (index + CONTEXT_RANGE + 1).min(actions.len());
    (start..end)
        .map(|i| ContextLine {
            index: i,
            action: actions[i].describe(),
            is_error: i == index,
        })
        .collect()
}

// ── Efficiency / logic ────────────────────────────────────────────

fn check_efficiency(actions: &[Action]) -> Vec<Diagnostic> {
    let mut warnings = Vec::new();

    if actions.len() > MAX_REASONABLE_ACTIONS {
        warnings.push(Diagnostic::new(
            DiagnosticKind::EfficiencyWarning,
            None,
            format!("Very high action count: {} actions", actions.len()),
        ));
    }

    if let Some(i) = actions
        .windows(3)
        .position(|w| w.iter().all(|a| a.kind == ActionKind::MoveTo))
    {
        warnings.push(Diagnostic::new(
            DiagnosticKind::EfficiencyWarning,
            Some(i),
            format!("Multiple consecutive moveTo actions at index {i}"),
        ));
    }

    let downs = count_kind(actions, &ActionKind::MouseDown);
    let ups = count_kind(actions, &ActionKind::MouseUp);
    if downs != ups {
        warnings.push(Diagnostic::new(
            DiagnosticKind::LogicError,
            None,
            format!("Unmatched mouseDown ({downs}) and mouseUp ({ups})"),
        ));
    }

    warnings
}

fn count_kind(actions: &[Action], kind: &ActionKind) -> usize {
    actions.iter().filter(|a| &a.kind == kind).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::parse_actions;
    use serde_json::json;

    fn run(value: serde_json::Value) -> ValidationReport {
        let actions = parse_actions(&value).expect("array input");
        validate(&actions, &Layout::default())
    }

    #[test]
    fn test_clean_log() {
        let report = run(json!([
            {"action": "moveTo", "x": 500, "y": 400},
            {"action": "mouseDown"},
            {"action": "moveTo", "x": 520, "y": 400},
            {"action": "mouseUp"}
        ]));
        assert!(report.errors.is_empty());
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_syntax_errors() {
        let report = run(json!([
            {"x": 1, "y": 1},
            {"action": "moveTo", "x": 10},
            {"action": "scroll"}
        ]));
        let messages: Vec<&str> = report.errors.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(
            messages,
            [
                "Missing 'action' field",
                "moveTo requires 'x' and 'y' coordinates",
                "Unknown action type: scroll"
            ]
        );
        assert!(report.errors.iter().all(|e| e.kind == DiagnosticKind::SyntaxError));
        assert_eq!(report.errors[2].index, Some(2));
    }

    #[test]
    fn test_invalid_coordinate_types() {
        let report = run(json!([{"action": "click", "x": "abc", "y": 5}]));
        assert_eq!(report.errors.len(), 1);
        let err = &report.errors[0];
        assert_eq!(err.kind, DiagnosticKind::SyntaxError);
        assert!(err.message.contains("x=\"abc\""));
        assert_eq!(err.action_detail.as_deref(), Some("click"));
    }

    #[test]
    fn test_screen_bounds_are_inclusive() {
        let report = run(json!([{"action": "moveTo", "x": 1500, "y": 900}]));
        assert!(report.errors.is_empty());

        let report = run(json!([{"action": "moveTo", "x": 1500.0001, "y": 900}]));
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].kind, DiagnosticKind::CoordinateError);
    }

    #[test]
    fn test_coordinate_error_context() {
        let report = run(json!([
            {"action": "moveTo", "x": 100, "y": 100},
            {"action": "click"},
            {"action": "moveTo", "x": -5, "y": 950},
            {"action": "click"},
            {"action": "moveTo", "x": 100, "y": 100},
            {"action": "click"}
        ]));
        let err = &report.errors[0];
        let ctx = err.context.as_ref().expect("coordinate errors carry context");
        assert_eq!(ctx.bounds, BoundsKind::Screen);
        let axes: Vec<Axis> = ctx.violations.iter().map(|v| v.axis).collect();
        assert_eq!(axes, [Axis::X, Axis::Y]);
        let indices: Vec<usize> = ctx.sequence.iter().map(|l| l.index).collect();
        assert_eq!(indices, [0, 1, 2, 3, 4]);
        assert!(ctx.sequence[2].is_error);
        assert!(err.message.contains("[2] moveTo(x=-5, y=950) ← ERROR"));
        assert!(err.message.contains("x=-5 is negative"));
        assert!(err.message.contains("For canvas drawing, use y <= 770"));
    }

    #[test]
    fn test_mouse_down_outside_canvas() {
        let report = run(json!([
            {"action": "mouseDown", "x": 50, "y": 400},
            {"action": "mouseUp"}
        ]));
        assert_eq!(report.errors.len(), 1);
        let ctx = report.errors[0].context.as_ref().expect("context");
        assert_eq!(ctx.bounds, BoundsKind::Canvas);
        assert_eq!(ctx.violations[0].valid_min, 90.0);
        assert_eq!(ctx.violations[0].valid_max, 1090.0);
        assert!(report.errors[0].message.contains("is left of canvas"));
    }

    #[test]
    fn test_mouse_down_off_screen_reports_twice() {
        let report = run(json!([
            {"action": "mouseDown", "x": 1600, "y": 400},
            {"action": "mouseUp"}
        ]));
        let bounds: Vec<BoundsKind> = report
            .errors
            .iter()
            .filter_map(|e| e.context.as_ref().map(|c| c.bounds))
            .collect();
        assert_eq!(bounds, [BoundsKind::Screen, BoundsKind::Canvas]);
    }

    #[test]
    fn test_consecutive_move_warning_only_once() {
        let moves: Vec<_> = (0..7)
            .map(|i| json!({"action": "moveTo", "x": 100 + i, "y": 100}))
            .collect();
        let report = run(serde_json::Value::Array(moves));
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].kind, DiagnosticKind::EfficiencyWarning);
        assert_eq!(
            report.warnings[0].message,
            "Multiple consecutive moveTo actions at index 0"
        );
    }

    #[test]
    fn test_high_action_count() {
        let clicks: Vec<_> = (0..1001).map(|_| json!({"action": "click"})).collect();
        let report = run(serde_json::Value::Array(clicks));
        assert_eq!(report.warnings.len(), 1);
        assert!(report.warnings[0].message.contains("1001"));
    }

    #[test]
    fn test_unmatched_mouse_buttons() {
        let report = run(json!([
            {"action": "mouseDown"},
            {"action": "mouseDown"},
            {"action": "mouseUp"}
        ]));
        let logic: Vec<_> = report
            .warnings
            .iter()
            .filter(|w| w.kind == DiagnosticKind::LogicError)
            .collect();
        assert_eq!(logic.len(), 1);
        assert_eq!(logic[0].message, "Unmatched mouseDown (2) and mouseUp (1)");
    }
}
