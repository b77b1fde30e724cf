//! Evaluation-run toggles.

use serde::{Deserialize, Serialize};

/// Resampling technique for metric confidence intervals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceIntervalMethod {
    /// Not stated; the engine picks its default.
    #[default]
    Unknown,
    /// Poisson bootstrap resampling.
    PoissonBootstrap,
    /// Leave-one-out jackknife.
    Jackknife,
}

/// Run-level options consumed by the evaluation engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Options {
    /// Also compute the metrics the model was exported with. Unset defers
    /// to the engine default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_default_metrics: Option<bool>,

    /// Estimate confidence intervals for every metric.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compute_confidence_intervals: Option<bool>,

    /// Resampling method when confidence intervals are on.
    #[serde(default)]
    pub confidence_interval_method: ConfidenceIntervalMethod,

    /// Slices with fewer examples than this are not reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_slice_size: Option<usize>,

    /// Output artifact names the run should not produce.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub disabled_outputs: Vec<String>,
}

impl Options {
    /// Whether confidence intervals were explicitly requested.
    #[must_use]
    pub fn confidence_intervals_enabled(&self) -> bool {
        self.compute_confidence_intervals.unwrap_or(false)
    }

    /// Whether a named output artifact is disabled.
    #[must_use]
    pub fn is_output_disabled(&self, name: &str) -> bool {
        self.disabled_outputs.iter().any(|o| o == name)
    }
}
