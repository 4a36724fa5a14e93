//! Sketch Eval - scores pointer-action logs produced by drawing agents
//!
//! An action log is a JSON array of `moveTo` / `click` / `mouseDown` /
//! `mouseUp` records aimed at a paint application. The evaluator validates
//! the log, reconstructs what was drawn from its geometry alone, checks it
//! against optional success criteria and folds everything into a score.
//!
//! # Example
//!
//! ```rust
//! use sketch_eval::{Criteria, Evaluator};
//! use serde_json::json;
//!
//! let evaluator = Evaluator::default();
//! let actions = json!([
//!     {"action": "moveTo", "x": 245, "y": 25},
//!     {"action": "click"},
//!     {"action": "moveTo", "x": 590, "y": 420},
//!     {"action": "mouseDown"},
//!     {"action": "moveTo", "x": 640, "y": 420},
//!     {"action": "mouseUp"}
//! ]);
//! let criteria = Criteria::new().with_tools(["pen"]).with_min_segments(1);
//!
//! let result = evaluator.evaluate(&actions, None, Some(&criteria));
//! assert_eq!(result.metrics.drawing_segments, 1);
//! assert!(result.passed());
//! ```

pub mod action;
pub mod analysis;
pub mod classify;
pub mod criteria;
pub mod error;
pub mod feedback;
pub mod layout;
pub mod region;
pub mod result;
pub mod score;
pub mod validate;

pub use action::{parse_actions, Action, ActionKind, Coord};
pub use classify::{ClassifiedError, ErrorClassification};
pub use criteria::{Criteria, CriteriaReport};
pub use error::ConfigError;
pub use feedback::generate_feedback;
pub use layout::{Layout, LayoutDescriptor, Point};
pub use region::Region;
pub use result::{ActionBreakdown, EvaluationResult, Metrics};
pub use score::ScoringConfig;
pub use validate::{Diagnostic, DiagnosticKind};

use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, warn};

use score::DiagnosticCounts;

/// Round half away from zero to `places` decimals
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Evaluates action logs against one immutable layout.
///
/// Cloning is cheap; the layout is shared behind an `Arc`, so one evaluator
/// can serve any number of threads.
#[derive(Debug, Clone)]
pub struct Evaluator {
    layout: Arc<Layout>,
    scoring: ScoringConfig,
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new(Layout::default())
    }
}

impl Evaluator {
    pub fn new(layout: Layout) -> Self {
        Self::from_shared(Arc::new(layout))
    }

    /// Build on a layout already shared elsewhere
    pub fn from_shared(layout: Arc<Layout>) -> Self {
        Self {
            layout,
            scoring: ScoringConfig::default(),
        }
    }

    /// Replace the penalty weights
    pub fn with_scoring(mut self, scoring: ScoringConfig) -> Self {
        self.scoring = scoring;
        self
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn scoring(&self) -> &ScoringConfig {
        &self.scoring
    }

    /// Evaluate a raw JSON action log.
    ///
    /// Input that is not an array yields a zero-score result carrying a
    /// single syntax error. `ground_truth` is accepted for interface
    /// compatibility and not consulted.
    pub fn evaluate(
        &self,
        actions: &Value,
        _ground_truth: Option<&Value>,
        criteria: Option<&Criteria>,
    ) -> EvaluationResult {
        match parse_actions(actions) {
            Some(actions) => self.evaluate_actions(&actions, criteria),
            None => {
                warn!("Action log is not a list; returning zero score");
                EvaluationResult::not_a_list()
            }
        }
    }

    /// Evaluate an already-decoded action log
    pub fn evaluate_actions(
        &self,
        actions: &[Action],
        criteria: Option<&Criteria>,
    ) -> EvaluationResult {
        let layout = self.layout.as_ref();
        let validation = validate::validate(actions, layout);
        let analysis = analysis::analyze(actions, layout);

        let report = criteria.map(|c| criteria::check(&analysis, c));
        let (region, accuracy) = match criteria {
            Some(c) => criteria::spatial(&analysis, c, &layout.canvas),
            None => (None, None),
        };

        let mut metrics = Metrics::from_analysis(analysis);
        metrics.spatial_constraints = region;
        metrics.spatial_accuracy = accuracy;
        metrics.action_efficiency =
            criteria.and_then(|c| criteria::action_efficiency(actions.len(), c));

        let score = score::score(
            report.as_ref(),
            DiagnosticCounts {
                errors: validation.errors.len(),
                warnings: validation.warnings.len(),
                total_actions: actions.len(),
            },
            &self.scoring,
        );

        let error_classification = classify::classify(
            report.as_ref(),
            region.zip(accuracy),
            &validation.errors,
        );

        debug!(
            actions = actions.len(),
            errors = validation.errors.len(),
            warnings = validation.warnings.len(),
            segments = metrics.drawing_segments,
            score,
            "Evaluated action log"
        );

        EvaluationResult {
            total_actions: actions.len(),
            action_breakdown: ActionBreakdown::count(actions),
            errors: validation.errors,
            warnings: validation.warnings,
            metrics,
            criteria_met: report,
            score,
            error_classification,
        }
    }

    /// Render a result as a plain-text report
    pub fn generate_feedback(&self, result: &EvaluationResult) -> String {
        feedback::generate_feedback(result)
    }
}
