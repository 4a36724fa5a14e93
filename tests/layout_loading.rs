//! Layout descriptor loading from files

use std::path::PathBuf;

use pretty_assertions::assert_eq;
use serde_json::json;
use sketch_eval::{ConfigError, DiagnosticKind, Evaluator, Layout, Point};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn test_toml_and_json_descriptors_agree() {
    let from_toml = Layout::from_file(&fixture("compact_layout.toml")).expect("Should load TOML");
    let from_json = Layout::from_file(&fixture("compact_layout.json")).expect("Should load JSON");
    assert_eq!(from_toml, from_json);

    assert_eq!(from_toml.canvas.width, 400.0);
    assert_eq!(from_toml.screen.width, 800.0);
    assert_eq!(from_toml.tolerance.tool, 20.0);
    let tools: Vec<&str> = from_toml.tools.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(tools, ["pen", "line"]);
}

#[test]
fn test_hit_windows_follow_tolerance() {
    let layout = Layout::from_file(&fixture("compact_layout.toml")).expect("Should load");
    assert_eq!(
        layout.tool_at(Point::new(35.0, 20.0)).map(|t| t.name.as_str()),
        Some("pen")
    );
    assert!(layout.tool_at(Point::new(40.0, 20.0)).is_none());
    assert_eq!(
        layout.color_at(Point::new(230.0, 28.0)).map(|c| c.hex.as_str()),
        Some("#0000FF")
    );
}

#[test]
fn test_missing_file_is_io_error() {
    let err = Layout::from_file(&fixture("does_not_exist.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("does_not_exist.toml"));
}

#[test]
fn test_zero_canvas_rejected() {
    let err = Layout::from_file(&fixture("zero_canvas.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { .. }));
    assert!(err.to_string().contains("canvas dimensions must be positive"));
}

#[test]
fn test_malformed_json_rejected() {
    let err = Layout::from_json_str(r#"{"canvas": {"width": 10}}"#).unwrap_err();
    assert!(matches!(err, ConfigError::Json(_)));
}

#[test]
fn test_custom_screen_bounds_drive_validation() {
    let compact = Evaluator::new(
        Layout::from_file(&fixture("compact_layout.toml")).expect("Should load"),
    );
    let log = json!([{"action": "moveTo", "x": 900, "y": 100}]);

    let result = compact.evaluate(&log, None, None);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(result.errors[0].kind, DiagnosticKind::CoordinateError);

    let default = Evaluator::default().evaluate(&log, None, None);
    assert!(default.errors.is_empty());
}

#[test]
fn test_drawing_on_compact_canvas() {
    let evaluator = Evaluator::new(
        Layout::from_file(&fixture("compact_layout.json")).expect("Should load"),
    );
    let log = json!([
        {"action": "click", "x": 20, "y": 20},
        {"action": "moveTo", "x": 100, "y": 150},
        {"action": "mouseDown"},
        {"action": "moveTo", "x": 300, "y": 150},
        {"action": "mouseUp"}
    ]);
    let result = evaluator.evaluate(&log, None, None);
    assert!(result.errors.is_empty());
    assert_eq!(result.metrics.drawing_segments, 1);
    assert_eq!(result.metrics.tools_selected, ["pen"]);
    assert_eq!(result.metrics.centroid, Some(Point::new(200.0, 90.0)));
    assert!(result.metrics.tool_usage["pen"].actually_used);
}
