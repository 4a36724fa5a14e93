//! Plain-text report of an evaluation

use crate::result::EvaluationResult;

const MAX_ERRORS_SHOWN: usize = 5;
const MAX_WARNINGS_SHOWN: usize = 3;

/// Render a result as a human-readable report.
///
/// Sections are separated by a blank line; empty diagnostic sections and the
/// criteria section (without criteria) are omitted.
pub fn generate_feedback(result: &EvaluationResult) -> String {
    let mut sections: Vec<Vec<String>> = Vec::new();

    if !result.errors.is_empty() {
        let mut lines = vec!["ERRORS FOUND:".to_string()];
        lines.extend(
            result
                .errors
                .iter()
                .take(MAX_ERRORS_SHOWN)
                .map(|e| format!("  - [{}] {}", e.kind, e.message)),
        );
        sections.push(lines);
    }

    if !result.warnings.is_empty() {
        let mut lines = vec!["WARNINGS:".to_string()];
        lines.extend(
            result
                .warnings
                .iter()
                .take(MAX_WARNINGS_SHOWN)
                .map(|w| format!("  - [{}] {}", w.kind, w.message)),
        );
        sections.push(lines);
    }

    let m = &result.metrics;
    let mut metrics = vec![
        "METRICS:".to_string(),
        format!("  - Total actions: {}", result.total_actions),
        format!("  - Tool changes: {}", m.tool_changes),
        format!("  - Color changes: {}", m.color_changes),
        format!("  - Drawing segments: {}", m.drawing_segments),
        format!("  - Canvas coverage: {}", percent(m.canvas_coverage)),
        format!("  - Grid coverage: {}", percent(m.canvas_coverage_accurate)),
    ];
    if let (Some(accuracy), Some(region)) = (m.spatial_accuracy, m.spatial_constraints) {
        metrics.push(format!("  - Spatial accuracy: {accuracy:.2} ({region})"));
    }
    if let Some(efficiency) = m.action_efficiency {
        metrics.push(format!("  - Action efficiency: {efficiency:.2}"));
    }
    sections.push(metrics);

    if let Some(report) = &result.criteria_met {
        let mut lines = vec!["CRITERIA:".to_string()];
        lines.extend(report.checks().into_iter().map(|(name, ok)| {
            format!("  - {name}: {}", if ok { "PASS" } else { "FAIL" })
        }));
        sections.push(lines);
    }

    sections.push(vec![format!("OVERALL SCORE: {:.2}/1.00", result.score)]);

    sections
        .into_iter()
        .map(|lines| lines.join("\n"))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn percent(fraction: f64) -> String {
    format!("{:.2}%", fraction * 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent() {
        assert_eq!(percent(0.0027), "0.27%");
        assert_eq!(percent(0.0), "0.00%");
        assert_eq!(percent(1.0), "100.00%");
    }

    #[test]
    fn test_degenerate_report() {
        let text = generate_feedback(&EvaluationResult::not_a_list());
        assert_eq!(
            text,
            "ERRORS FOUND:\n  - [SYNTAX_ERROR] Actions must be a list/array\n\n\
             METRICS:\n  - Total actions: 0\n  - Tool changes: 0\n  - Color changes: 0\n  \
             - Drawing segments: 0\n  - Canvas coverage: 0.00%\n  - Grid coverage: 0.00%\n\n\
             OVERALL SCORE: 0.00/1.00"
        );
    }

    #[test]
    fn test_empty_log_reports_both_coverages() {
        let result = crate::Evaluator::default().evaluate(&serde_json::json!([]), None, None);
        let text = generate_feedback(&result);
        assert!(text.contains("  - Canvas coverage: 0.00%\n  - Grid coverage: 0.00%\n"));
    }
}
