//! Success criteria and the checks run against them
//!
//! Every check here is a pure function of the analyzer output and the
//! criteria; nothing re-reads the action log.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::analysis::{DrawingAnalysis, ToolUsage};
use crate::layout::Canvas;
use crate::region::{self, Region};

/// The pass/fail contract an attempt is judged against
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Criteria {
    #[serde(default)]
    pub required_tools: IndexSet<String>,
    #[serde(default)]
    pub required_colors: IndexSet<String>,
    #[serde(default)]
    pub min_segments: Option<usize>,
    /// Fraction of the canvas in `[0, 1]`
    #[serde(default)]
    pub min_coverage: Option<f64>,
    /// Task prompt; source of the spatial constraint
    #[serde(default)]
    pub prompt: Option<String>,
}

impl Criteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tools<I, S>(mut self, tools: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_tools.extend(tools.into_iter().map(Into::into));
        self
    }

    pub fn with_colors<I, S>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.required_colors.extend(colors.into_iter().map(Into::into));
        self
    }

    pub fn with_min_segments(mut self, segments: usize) -> Self {
        self.min_segments = Some(segments);
        self
    }

    pub fn with_min_coverage(mut self, coverage: f64) -> Self {
        self.min_coverage = Some(coverage);
        self
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    /// Lower bound on the actions needed: one click per tool and color, three per segment
    pub fn minimum_actions(&self) -> usize {
        self.required_tools.len()
            + self.required_colors.len()
            + 3 * self.min_segments.unwrap_or(0)
    }
}

/// Results of checking each criterion
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CriteriaReport {
    pub tools: Vec<ToolCheck>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segments: Option<SegmentCheck>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<ColorCheck>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coverage: Option<CoverageCheck>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolCheck {
    pub tool: String,
    /// The tool's button was clicked at some point
    pub used: bool,
    /// Selection followed by drawing; `None` when no strict check was run
    pub strict: Option<ToolUsage>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentCheck {
    pub required: usize,
    pub actual: usize,
    pub met: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorCheck {
    pub required: Vec<String>,
    /// Clicks on the swatch row
    pub colors_changed: usize,
    pub min_colors_met: bool,
    pub exact: Option<ExactColorCheck>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExactColorCheck {
    /// Distinct resolved colors, in order of first use
    pub used: Vec<String>,
    pub matched: usize,
    pub missing: Vec<String>,
    pub met: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoverageCheck {
    pub required: f64,
    pub coarse: f64,
    pub coarse_met: bool,
    pub accurate: Option<AccurateCoverageCheck>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccurateCoverageCheck {
    pub value: f64,
    pub met: bool,
}

impl CriteriaReport {
    /// Labelled pass/fail flags in report order
    pub fn checks(&self) -> Vec<(String, bool)> {
        let mut out = Vec::new();
        for t in &self.tools {
            out.push((format!("tool_{}_used", t.tool), t.used));
            if let Some(strict) = t.strict {
                out.push((format!("tool_{}_selected", t.tool), strict.selected));
                out.push((format!("tool_{}_actually_used", t.tool), strict.actually_used));
            }
        }
        if let Some(s) = &self.segments {
            out.push(("min_segments_met".to_string(), s.met));
        }
        if let Some(c) = &self.colors {
            out.push(("min_colors_met".to_string(), c.min_colors_met));
            if let Some(exact) = &c.exact {
                out.push(("min_colors_exact_met".to_string(), exact.met));
            }
        }
        if let Some(c) = &self.coverage {
            out.push(("min_coverage_met".to_string(), c.coarse_met));
            if let Some(accurate) = &c.accurate {
                out.push(("min_coverage_accurate_met".to_string(), accurate.met));
            }
        }
        out
    }
}

pub fn check(analysis: &DrawingAnalysis, criteria: &Criteria) -> CriteriaReport {
    let tools = criteria
        .required_tools
        .iter()
        .map(|tool| {
            let usage = analysis.usage_of(tool);
            ToolCheck {
                tool: tool.clone(),
                used: usage.selected,
                strict: Some(usage),
            }
        })
        .collect();

    let segments = criteria.min_segments.map(|required| SegmentCheck {
        required,
        actual: analysis.drawing_segments,
        met: analysis.drawing_segments >= required,
    });

    let colors = (!criteria.required_colors.is_empty()).then(|| {
        let required: Vec<String> = criteria.required_colors.iter().cloned().collect();
        ColorCheck {
            colors_changed: analysis.color_changes,
            min_colors_met: analysis.color_changes >= required.len(),
            exact: Some(check_exact_colors(&required, &analysis.exact_colors_used)),
            required,
        }
    });

    let coverage = criteria.min_coverage.map(|required| CoverageCheck {
        required,
        coarse: analysis.canvas_coverage,
        coarse_met: analysis.canvas_coverage >= required,
        accurate: Some(AccurateCoverageCheck {
            value: analysis.canvas_coverage_accurate,
            met: analysis.canvas_coverage_accurate >= required,
        }),
    });

    CriteriaReport {
        tools,
        segments,
        colors,
        coverage,
    }
}

fn check_exact_colors(required: &[String], used: &[String]) -> ExactColorCheck {
    let mut distinct: Vec<String> = Vec::new();
    for hex in used {
        if !distinct.iter().any(|d| d.eq_ignore_ascii_case(hex)) {
            distinct.push(hex.clone());
        }
    }
    let missing: Vec<String> = required
        .iter()
        .filter(|r| !distinct.iter().any(|d| d.eq_ignore_ascii_case(r)))
        .cloned()
        .collect();
    let matched = required.len() - missing.len();
    ExactColorCheck {
        used: distinct,
        matched,
        met: missing.is_empty(),
        missing,
    }
}

/// Region requested by the prompt and how close the drawing's centroid lies to it.
///
/// Accuracy is `None` when no region is named or nothing was drawn on the canvas.
pub fn spatial(
    analysis: &DrawingAnalysis,
    criteria: &Criteria,
    canvas: &Canvas,
) -> (Option<Region>, Option<f64>) {
    let region = criteria.prompt.as_deref().and_then(Region::from_prompt);
    let accuracy = match (region, analysis.centroid) {
        (Some(region), Some(centroid)) => Some(region::spatial_accuracy(centroid, region, canvas)),
        _ => None,
    };
    (region, accuracy)
}

/// Banded ratio of actual to minimum action count; `None` when the minimum is zero
pub fn action_efficiency(total_actions: usize, criteria: &Criteria) -> Option<f64> {
    let minimum = criteria.minimum_actions();
    if minimum == 0 {
        return None;
    }
    let ratio = total_actions as f64 / minimum as f64;
    let band = if ratio <= 1.5 {
        1.0
    } else if ratio <= 2.0 {
        0.8
    } else if ratio <= 3.0 {
        0.6
    } else {
        0.4
    };
    Some(band)
}
