//! Groups failed checks into error categories

use serde::Serialize;

use crate::criteria::CriteriaReport;
use crate::region::Region;
use crate::validate::Diagnostic;

/// Placement accuracy below this is reported as a spatial error
pub const SPATIAL_ACCURACY_THRESHOLD: f64 = 0.7;

/// A single classified failure
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClassifiedError {
    MissingRequiredTool {
        tool: String,
    },
    MissingRequiredColor {
        color: String,
    },
    InsufficientCoverage {
        actual: f64,
        required: f64,
        deficit: f64,
    },
    IncorrectSpatialPlacement {
        accuracy: f64,
        expected_region: Region,
    },
    InsufficientSegments {
        actual: usize,
        required: usize,
        deficit: usize,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ErrorClassification {
    pub spatial_errors: Vec<ClassifiedError>,
    pub tool_errors: Vec<ClassifiedError>,
    pub color_errors: Vec<ClassifiedError>,
    pub planning_errors: Vec<ClassifiedError>,
    /// Validator errors, passed through unchanged
    pub syntax_errors: Vec<Diagnostic>,
}

impl ErrorClassification {
    pub fn is_empty(&self) -> bool {
        self.spatial_errors.is_empty()
            && self.tool_errors.is_empty()
            && self.color_errors.is_empty()
            && self.planning_errors.is_empty()
            && self.syntax_errors.is_empty()
    }
}

/// Classify failures from the criteria report, the placement check and the validator.
///
/// `placement` is the requested region with the measured accuracy, present
/// only when both exist.
pub fn classify(
    report: Option<&CriteriaReport>,
    placement: Option<(Region, f64)>,
    errors: &[Diagnostic],
) -> ErrorClassification {
    let mut out = ErrorClassification {
        syntax_errors: errors.to_vec(),
        ..Default::default()
    };

    if let Some(report) = report {
        out.tool_errors = report
            .tools
            .iter()
            .filter(|t| t.strict.is_some_and(|s| !s.actually_used))
            .map(|t| ClassifiedError::MissingRequiredTool {
                tool: t.tool.clone(),
            })
            .collect();

        if let Some(exact) = report.colors.as_ref().and_then(|c| c.exact.as_ref()) {
            out.color_errors = exact
                .missing
                .iter()
                .map(|color| ClassifiedError::MissingRequiredColor {
                    color: color.clone(),
                })
                .collect();
        }

        if let Some(coverage) = &report.coverage {
            let actual = coverage
                .accurate
                .as_ref()
                .map_or(coverage.coarse, |a| a.value);
            if actual < coverage.required {
                out.spatial_errors.push(ClassifiedError::InsufficientCoverage {
                    actual,
                    required: coverage.required,
                    deficit: coverage.required - actual,
                });
            }
        }

        if let Some(segments) = report.segments.as_ref().filter(|s| s.actual < s.required) {
            out.planning_errors.push(ClassifiedError::InsufficientSegments {
                actual: segments.actual,
                required: segments.required,
                deficit: segments.required - segments.actual,
            });
        }
    }

    if let Some((region, accuracy)) = placement {
        if accuracy < SPATIAL_ACCURACY_THRESHOLD {
            out.spatial_errors.push(ClassifiedError::IncorrectSpatialPlacement {
                accuracy,
                expected_region: region,
            });
        }
    }

    out
}
