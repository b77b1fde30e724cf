//! Model specification: how to find labels, predictions, and weights in
//! a model's output.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Sentinel output name used when a model has a single, unnamed output.
///
/// The singular key fields (`label_key`, `prediction_key`, ...) are stored
/// under this name in the unified per-output view, so downstream code can
/// always ask "which key for output X" without branching on singular vs
/// plural (see the `*_for` accessors).
pub const DEFAULT_OUTPUT: &str = "";

/// Known model types. Empty string means auto-detect at load time.
pub const VALID_MODEL_TYPES: &[&str] =
    &["", "tf_keras", "tf_estimator", "tf_lite", "tf_js", "tf_generic"];

/// Specification for one model under evaluation.
///
/// Each singular/plural field pair (`label_key` vs `label_keys`, etc.) is
/// mutually exclusive: the singular form is for single-output models, the
/// plural form maps output name → key for multi-output models. Validation
/// rejects configs that set both.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelSpec {
    /// Model alias, unique within a config. May stay empty when the config
    /// declares exactly one model.
    #[serde(default)]
    pub name: String,

    /// Model type (one of [`VALID_MODEL_TYPES`]); auto-detected if empty.
    #[serde(default)]
    pub model_type: String,

    /// Serving signature to invoke (single-output models).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature_name: Option<String>,

    /// Serving signature per output name (multi-output models).
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub signature_names: HashMap<String, String>,

    /// Feature key holding the label (single-output models).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_key: Option<String>,

    /// Label key per output name (multi-output models).
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub label_keys: HashMap<String, String>,

    /// Output key holding the prediction (single-output models).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prediction_key: Option<String>,

    /// Prediction key per output name (multi-output models).
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub prediction_keys: HashMap<String, String>,

    /// Feature key holding the example weight (single-output models).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub example_weight_key: Option<String>,

    /// Example weight key per output name (multi-output models).
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub example_weight_keys: HashMap<String, String>,

    /// Marks the reference model in candidate-vs-baseline comparisons.
    /// At most one model spec per config may set this.
    #[serde(default)]
    pub is_baseline: bool,
}

/// Resolve one singular/plural pair for an output name: the plural map
/// wins when populated, the singular value answers for [`DEFAULT_OUTPUT`].
fn key_for<'a>(
    singular: Option<&'a str>,
    plural: &'a HashMap<String, String>,
    output_name: &str,
) -> Option<&'a str> {
    if !plural.is_empty() {
        return plural.get(output_name).map(String::as_str);
    }
    if output_name == DEFAULT_OUTPUT {
        return singular;
    }
    None
}

impl ModelSpec {
    /// Label key for the given output name.
    #[must_use]
    pub fn label_key_for(&self, output_name: &str) -> Option<&str> {
        key_for(self.label_key.as_deref(), &self.label_keys, output_name)
    }

    /// Prediction key for the given output name.
    #[must_use]
    pub fn prediction_key_for(&self, output_name: &str) -> Option<&str> {
        key_for(
            self.prediction_key.as_deref(),
            &self.prediction_keys,
            output_name,
        )
    }

    /// Example weight key for the given output name.
    #[must_use]
    pub fn example_weight_key_for(&self, output_name: &str) -> Option<&str> {
        key_for(
            self.example_weight_key.as_deref(),
            &self.example_weight_keys,
            output_name,
        )
    }

    /// Serving signature for the given output name.
    #[must_use]
    pub fn signature_name_for(&self, output_name: &str) -> Option<&str> {
        key_for(
            self.signature_name.as_deref(),
            &self.signature_names,
            output_name,
        )
    }

    /// All output names this spec mentions across its plural key maps.
    /// Single-output specs yield just [`DEFAULT_OUTPUT`].
    #[must_use]
    pub fn output_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .signature_names
            .keys()
            .chain(self.label_keys.keys())
            .chain(self.prediction_keys.keys())
            .chain(self.example_weight_keys.keys())
            .map(String::as_str)
            .collect();
        names.sort_unstable();
        names.dedup();
        if names.is_empty() {
            names.push(DEFAULT_OUTPUT);
        }
        names
    }
}
