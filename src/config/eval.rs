//! The root evaluation config and its persisted run-record wrappers.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::metrics::MetricsSpec;
use super::model::ModelSpec;
use super::options::Options;
use super::slicing::{CrossSlicingSpec, SlicingSpec};

/// The root evaluation configuration.
///
/// Constructed once at load time and treated as immutable by consumers;
/// [`update_eval_config_with_defaults`](super::defaults::update_eval_config_with_defaults)
/// is the one sanctioned mutation, applied before validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvalConfig {
    /// Models under evaluation. At most one may be the baseline.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub model_specs: Vec<ModelSpec>,

    /// Slices to partition the data by. Every slice referenced elsewhere
    /// in the config must resolve against this list.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub slicing_specs: Vec<SlicingSpec>,

    /// Slice-vs-slice comparison units.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cross_slicing_specs: Vec<CrossSlicingSpec>,

    /// Metric groups to compute.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub metrics_specs: Vec<MetricsSpec>,

    /// Run-level toggles.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Options>,
}

impl EvalConfig {
    /// The baseline model spec, if one is marked.
    #[must_use]
    pub fn baseline_model(&self) -> Option<&ModelSpec> {
        self.model_specs.iter().find(|m| m.is_baseline)
    }

    /// Look up a model spec by alias.
    #[must_use]
    pub fn model_spec(&self, name: &str) -> Option<&ModelSpec> {
        self.model_specs.iter().find(|m| m.name == name)
    }

    /// All declared model aliases, in declaration order.
    #[must_use]
    pub fn model_names(&self) -> Vec<&str> {
        self.model_specs.iter().map(|m| m.name.as_str()).collect()
    }

    /// Whether a slice resolves against the top-level declarations
    /// (structural comparison, declaration order ignored).
    #[must_use]
    pub fn declares_slice(&self, spec: &SlicingSpec) -> bool {
        self.slicing_specs.iter().any(|s| s.same_slice(spec))
    }

    /// Every slice referenced by cross-slicing specs and by per-slice /
    /// cross-slice thresholds anywhere in the config, deduplicated in
    /// first-appearance order. This is the set normalization resolves
    /// against `slicing_specs`.
    #[must_use]
    pub fn referenced_slices(&self) -> Vec<SlicingSpec> {
        fn push(seen: &mut Vec<SlicingSpec>, spec: &SlicingSpec) {
            if !seen.iter().any(|s| s.same_slice(spec)) {
                seen.push(spec.clone());
            }
        }

        fn visit_cross(seen: &mut Vec<SlicingSpec>, cross: &CrossSlicingSpec) {
            push(seen, &cross.baseline_spec);
            for spec in &cross.slicing_specs {
                push(seen, spec);
            }
        }

        let mut seen: Vec<SlicingSpec> = Vec::new();
        for cross in &self.cross_slicing_specs {
            visit_cross(&mut seen, cross);
        }
        for metrics_spec in &self.metrics_specs {
            for metric in &metrics_spec.metrics {
                for per_slice in &metric.per_slice_thresholds {
                    for spec in &per_slice.slicing_specs {
                        push(&mut seen, spec);
                    }
                }
                for cross_slice in &metric.cross_slice_thresholds {
                    for cross in &cross_slice.cross_slicing_specs {
                        visit_cross(&mut seen, cross);
                    }
                }
            }
            for per_slice in metrics_spec.per_slice_thresholds.values().flatten() {
                for spec in &per_slice.slicing_specs {
                    push(&mut seen, spec);
                }
            }
            for cross_slice in metrics_spec.cross_slice_thresholds.values().flatten() {
                for cross in &cross_slice.cross_slicing_specs {
                    visit_cross(&mut seen, cross);
                }
            }
        }
        seen
    }
}

/// An [`EvalConfig`] tagged with the schema version that wrote it.
///
/// Structurally a prefix of [`EvalRun`]: both carry `eval_config` and
/// `version` as their first two fields (wire numbers 1 and 2), so a
/// serialized record of either shape parses as the other. The run loader
/// leans on this to gate on version before touching the full record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvalConfigAndVersion {
    /// The configuration.
    #[serde(default)]
    pub eval_config: EvalConfig,

    /// Schema version string, e.g. `"1.0"`.
    #[serde(default)]
    pub version: String,
}

/// The persisted record of one evaluation run.
///
/// Wraps the config with the data source and the on-disk location of every
/// evaluated model, keyed by model alias. Field numbers 1 and 2 must stay
/// identical to [`EvalConfigAndVersion`]; see `compat`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvalRun {
    /// The configuration the run executed.
    #[serde(default)]
    pub eval_config: EvalConfig,

    /// Schema version string, e.g. `"1.0"`.
    #[serde(default)]
    pub version: String,

    /// Where the evaluation data came from.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub data_location: String,

    /// Format of the evaluation data, e.g. `"parquet"`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub file_format: String,

    /// Model alias → on-disk model location.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub model_locations: HashMap<String, String>,
}
