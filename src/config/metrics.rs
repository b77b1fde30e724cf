//! Metric declarations and the specs that group them.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::aggregation::{AggregationOptions, BinarizationOptions};
use super::threshold::{CrossSliceMetricThreshold, MetricThreshold, PerSliceMetricThreshold};

/// Declares one metric implementation to compute.
///
/// `class_name` names the implementation; when `module` is omitted it is
/// resolved against the built-in namespaces (see [`crate::registry`]).
/// `config` carries JSON-encoded constructor kwargs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricConfig {
    /// Implementation name, e.g. `"AUC"` or `"ExampleCount"`.
    #[serde(default)]
    pub class_name: String,

    /// Namespace of the implementation; resolved by convention when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<String>,

    /// JSON object of constructor kwargs, e.g. `{"num_thresholds": 100}`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<String>,

    /// Threshold applied to this metric on the overall slice.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold: Option<MetricThreshold>,

    /// Thresholds bound to specific slices.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub per_slice_thresholds: Vec<PerSliceMetricThreshold>,

    /// Thresholds bound to slice-vs-slice comparisons.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cross_slice_thresholds: Vec<CrossSliceMetricThreshold>,
}

impl MetricConfig {
    /// Shorthand for a metric with no kwargs or thresholds.
    #[must_use]
    pub fn new(class_name: impl Into<String>) -> Self {
        Self { class_name: class_name.into(), ..Default::default() }
    }

    /// Parse the JSON constructor kwargs. Unset means no kwargs.
    ///
    /// The payload must be a JSON object; anything else (including valid
    /// JSON of another shape) is an error.
    pub fn kwargs(&self) -> serde_json::Result<serde_json::Map<String, serde_json::Value>> {
        let Some(raw) = &self.config else {
            return Ok(serde_json::Map::new());
        };
        let value: serde_json::Value = serde_json::from_str(raw)?;
        match value {
            serde_json::Value::Object(map) => Ok(map),
            other => Err(serde::de::Error::custom(format!(
                "metric config must be a JSON object, got {other}"
            ))),
        }
    }
}

/// Groups metric declarations with a shared model/output scope and shared
/// binarization/aggregation settings.
///
/// The three maps keyed by metric name attach thresholds to metrics the
/// model computes itself (no [`MetricConfig`] entry declares them).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsSpec {
    /// Metrics to compute.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub metrics: Vec<MetricConfig>,

    /// Model aliases this spec applies to; empty means every model
    /// (normalization fills in the declared names).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub model_names: Vec<String>,

    /// Output names this spec applies to; empty means the default output.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub output_names: Vec<String>,

    /// Binarization applied to every metric in this spec.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binarize: Option<BinarizationOptions>,

    /// Aggregation applied to every metric in this spec.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregate: Option<AggregationOptions>,

    /// Feature key that groups examples into queries, for ranking metrics.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_key: Option<String>,

    /// Overall-slice thresholds for model-computed metrics, by metric name.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub thresholds: HashMap<String, MetricThreshold>,

    /// Per-slice thresholds for model-computed metrics, by metric name.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub per_slice_thresholds: HashMap<String, Vec<PerSliceMetricThreshold>>,

    /// Cross-slice thresholds for model-computed metrics, by metric name.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub cross_slice_thresholds: HashMap<String, Vec<CrossSliceMetricThreshold>>,
}
