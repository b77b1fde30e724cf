//! Slicing specifications: feature-value constraints that partition
//! evaluation data.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A single feature value as seen by the slicer.
///
/// Configs always write slice values as strings; actual feature columns
/// may be string- or numeric-typed. The untagged representation accepts
/// whichever form the data carries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FeatureValue {
    /// Integer-typed feature.
    Int(i64),
    /// Float-typed feature.
    Float(f64),
    /// String-typed feature.
    Text(String),
}

/// A conjunction of equality constraints over feature keys and values.
///
/// `feature_keys` slice by every distinct value of a key; `feature_values`
/// pin a key to one exact value. The empty spec selects the whole dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SlicingSpec {
    /// Keys to slice by all distinct values.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub feature_keys: Vec<String>,

    /// Exact key=value constraints. Values are written as strings; a
    /// numeric-looking value matches both string- and numeric-typed
    /// features.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub feature_values: HashMap<String, String>,
}

/// Whether a config-side slice value matches a data-side feature value.
///
/// String features compare byte-for-byte; numeric features compare against
/// the numeric parse of the config value, so `"20"` matches the string
/// `"20"`, the integer `20`, and the float `20.0`.
fn value_matches(spec_value: &str, feature: &FeatureValue) -> bool {
    match feature {
        FeatureValue::Text(s) => spec_value == s,
        FeatureValue::Int(i) => {
            spec_value.parse::<i64>() == Ok(*i)
                || spec_value.parse::<f64>().is_ok_and(|f| f == *i as f64)
        }
        FeatureValue::Float(f) => spec_value.parse::<f64>().is_ok_and(|v| v == *f),
    }
}

impl SlicingSpec {
    /// The whole-dataset slice.
    #[must_use]
    pub fn overall() -> Self {
        Self::default()
    }

    /// Whether this is the whole-dataset slice (no constraints).
    #[must_use]
    pub fn is_overall(&self) -> bool {
        self.feature_keys.is_empty() && self.feature_values.is_empty()
    }

    /// Whether an example with the given features falls in this slice.
    ///
    /// Every `feature_values` constraint must match, and every
    /// `feature_keys` key must be present (with any value).
    #[must_use]
    pub fn matches(&self, features: &HashMap<String, FeatureValue>) -> bool {
        for key in &self.feature_keys {
            if !features.contains_key(key) {
                return false;
            }
        }
        for (key, value) in &self.feature_values {
            match features.get(key) {
                Some(feature) if value_matches(value, feature) => {}
                _ => return false,
            }
        }
        true
    }

    /// Structural equality modulo declaration order, used to resolve slice
    /// references against the top-level declarations.
    #[must_use]
    pub fn same_slice(&self, other: &Self) -> bool {
        self.canonical() == other.canonical()
    }

    fn canonical(&self) -> (Vec<&str>, Vec<(&str, &str)>) {
        let mut keys: Vec<&str> = self.feature_keys.iter().map(String::as_str).collect();
        keys.sort_unstable();
        keys.dedup();
        let mut values: Vec<(&str, &str)> = self
            .feature_values
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        values.sort_unstable();
        (keys, values)
    }
}

impl fmt::Display for SlicingSpec {
    /// Stable human rendering: sorted `key=value` pairs and bare keys,
    /// or `Overall` for the empty spec.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_overall() {
            return write!(f, "Overall");
        }
        let (keys, values) = self.canonical();
        let mut parts: Vec<String> = values.iter().map(|(k, v)| format!("{k}={v}")).collect();
        parts.extend(keys.iter().map(ToString::to_string));
        write!(f, "{}", parts.join(", "))
    }
}

/// A slice-vs-slice comparison unit: one baseline slice against a set of
/// comparison slices. Both sides must resolve against the top-level
/// slicing declarations (auto-added by normalization when absent).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CrossSlicingSpec {
    /// The reference slice.
    #[serde(default)]
    pub baseline_spec: SlicingSpec,

    /// Slices compared against the baseline.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub slicing_specs: Vec<SlicingSpec>,
}
