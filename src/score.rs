//! Penalty-based scoring

use serde::Serialize;

use crate::criteria::CriteriaReport;

/// Penalty weights and the bonus window applied by [`score`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoringConfig {
    /// Per required tool that was not actually used
    pub tool_penalty: f64,

    /// Per required color that was not matched
    pub color_penalty: f64,

    /// Applied once when the segment minimum is missed
    pub segment_penalty: f64,

    /// Full penalty for zero coverage; scaled by the shortfall when the accurate value is known
    pub coverage_penalty: f64,

    /// Per validator error
    pub error_penalty: f64,

    /// Per validator warning
    pub warning_penalty: f64,

    pub completion_bonus: f64,

    /// Inclusive action-count range eligible for the bonus
    pub bonus_actions: (usize, usize),

    /// Running score required before the bonus applies
    pub bonus_floor: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            tool_penalty: 0.15,
            color_penalty: 0.05,
            segment_penalty: 0.15,
            coverage_penalty: 0.12,
            error_penalty: 0.08,
            warning_penalty: 0.02,
            completion_bonus: 0.05,
            bonus_actions: (10, 500),
            bonus_floor: 0.2,
        }
    }
}

impl ScoringConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tool_penalty(mut self, penalty: f64) -> Self {
        self.tool_penalty = penalty;
        self
    }

    pub fn with_color_penalty(mut self, penalty: f64) -> Self {
        self.color_penalty = penalty;
        self
    }

    pub fn with_segment_penalty(mut self, penalty: f64) -> Self {
        self.segment_penalty = penalty;
        self
    }

    pub fn with_coverage_penalty(mut self, penalty: f64) -> Self {
        self.coverage_penalty = penalty;
        self
    }

    /// Set the per-error and per-warning penalties
    pub fn with_diagnostic_penalties(mut self, error: f64, warning: f64) -> Self {
        self.error_penalty = error;
        self.warning_penalty = warning;
        self
    }

    /// Set the bonus amount and the action-count range it applies to
    pub fn with_completion_bonus(mut self, bonus: f64, min_actions: usize, max_actions: usize) -> Self {
        self.completion_bonus = bonus;
        self.bonus_actions = (min_actions, max_actions);
        self
    }
}

/// Diagnostic counts feeding the score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiagnosticCounts {
    pub errors: usize,
    pub warnings: usize,
    pub total_actions: usize,
}

/// Score an attempt in `[0, 1]`, rounded to 3 decimals
pub fn score(
    report: Option<&CriteriaReport>,
    counts: DiagnosticCounts,
    config: &ScoringConfig,
) -> f64 {
    let mut score = 1.0;

    if let Some(report) = report {
        for tool in &report.tools {
            let failed = match tool.strict {
                Some(strict) => !strict.actually_used,
                None => !tool.used,
            };
            if failed {
                score -= config.tool_penalty;
            }
        }

        if let Some(colors) = &report.colors {
            let required = colors.required.len();
            let shortfall = match &colors.exact {
                Some(exact) if !exact.met => required.saturating_sub(exact.matched),
                Some(_) => 0,
                None if !colors.min_colors_met => required.saturating_sub(colors.colors_changed),
                None => 0,
            };
            score -= config.color_penalty * shortfall as f64;
        }

        if report.segments.as_ref().is_some_and(|s| !s.met) {
            score -= config.segment_penalty;
        }

        if let Some(coverage) = &report.coverage {
            match &coverage.accurate {
                Some(accurate) if !accurate.met => {
                    if coverage.required > 0.0 {
                        let deficit = (coverage.required - accurate.value) / coverage.required;
                        score -= deficit * config.coverage_penalty;
                    }
                }
                Some(_) => {}
                None if !coverage.coarse_met => score -= config.coverage_penalty,
                None => {}
            }
        }
    }

    score -= config.error_penalty * counts.errors as f64;
    score -= config.warning_penalty * counts.warnings as f64;

    let (lo, hi) = config.bonus_actions;
    if (lo..=hi).contains(&counts.total_actions) && score >= config.bonus_floor {
        score += config.completion_bonus;
    }

    crate::round_to(score, 3).clamp(0.0, 1.0)
}
