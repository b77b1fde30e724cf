//! Aggregation and binarization options for multi-class metrics.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Averaging strategy for aggregating per-class metric values.
///
/// Unlike [`MetricThreshold`](super::threshold::MetricThreshold), this is a
/// strict single choice: a config picks exactly one strategy, and the enum
/// makes multiple-set unrepresentable. A missing choice parses (so the
/// rest of the config can still be checked) and is reported by validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregationType {
    /// Every example counts equally.
    MicroAverage,
    /// Every class counts equally.
    MacroAverage,
    /// Classes weighted by `class_weights`.
    WeightedMacroAverage,
}

/// Options controlling metric aggregation across classes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AggregationOptions {
    /// The averaging strategy. Required; validation flags `None`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average: Option<AggregationType>,

    /// Per-class weights for weighted macro averaging. Classes absent from
    /// the map weigh 1.0.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub class_weights: HashMap<i32, f64>,
}

impl AggregationOptions {
    /// Weight for a class id, defaulting to 1.0 when unlisted.
    #[must_use]
    pub fn class_weight(&self, class_id: i32) -> f64 {
        self.class_weights.get(&class_id).copied().unwrap_or(1.0)
    }

    /// Whether the chosen strategy needs per-class binarized values, and
    /// therefore a [`BinarizationOptions`] in the same metrics spec.
    #[must_use]
    pub fn requires_binarization(&self) -> bool {
        matches!(
            self.average,
            Some(AggregationType::MacroAverage) | Some(AggregationType::WeightedMacroAverage)
        )
    }
}

/// Options for binarizing multi-class/multi-label outputs into independent
/// binary problems. Any subset of the lists may be populated; each entry
/// yields one binarized variant of every metric in scope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BinarizationOptions {
    /// One-vs-rest binarization per class id.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub class_ids: Vec<i32>,

    /// Binarization on the k-th predicted class (1-based).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub k_list: Vec<i32>,

    /// Binarization over the top k predicted classes (1-based).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub top_k_list: Vec<i32>,
}

impl BinarizationOptions {
    /// Whether no binarization is requested at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.class_ids.is_empty() && self.k_list.is_empty() && self.top_k_list.is_empty()
    }

    /// Number of binarized variants each metric expands into.
    #[must_use]
    pub fn variant_count(&self) -> usize {
        self.class_ids.len() + self.k_list.len() + self.top_k_list.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_aggregation_type_serde_names() {
        let t: AggregationType = serde_yaml::from_str("micro_average").unwrap();
        assert_eq!(t, AggregationType::MicroAverage);
        let t: AggregationType = serde_yaml::from_str("macro_average").unwrap();
        assert_eq!(t, AggregationType::MacroAverage);
        let t: AggregationType = serde_yaml::from_str("weighted_macro_average").unwrap();
        assert_eq!(t, AggregationType::WeightedMacroAverage);
    }

    #[test]
    fn test_unknown_aggregation_type_is_a_parse_error() {
        let result: Result<AggregationType, _> = serde_yaml::from_str("median_average");
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_average_parses_as_none() {
        let opts: AggregationOptions = serde_yaml::from_str("class_weights:\n  0: 2.0\n").unwrap();
        assert!(opts.average.is_none());
        assert_relative_eq!(opts.class_weight(0), 2.0);
    }

    #[test]
    fn test_class_weight_defaults_to_one() {
        let opts = AggregationOptions::default();
        assert_relative_eq!(opts.class_weight(7), 1.0);
    }

    #[test]
    fn test_macro_requires_binarization() {
        let mut opts = AggregationOptions {
            average: Some(AggregationType::MicroAverage),
            ..Default::default()
        };
        assert!(!opts.requires_binarization());
        opts.average = Some(AggregationType::MacroAverage);
        assert!(opts.requires_binarization());
        opts.average = Some(AggregationType::WeightedMacroAverage);
        assert!(opts.requires_binarization());
    }

    #[test]
    fn test_binarization_variant_count() {
        let binarize = BinarizationOptions {
            class_ids: vec![0, 1, 2],
            k_list: vec![1],
            top_k_list: vec![3, 5],
        };
        assert!(!binarize.is_empty());
        assert_eq!(binarize.variant_count(), 6);
        assert!(BinarizationOptions::default().is_empty());
    }

    #[test]
    fn test_integer_keyed_class_weights_roundtrip_json() {
        let mut opts = AggregationOptions {
            average: Some(AggregationType::WeightedMacroAverage),
            ..Default::default()
        };
        opts.class_weights.insert(0, 0.25);
        opts.class_weights.insert(3, 4.0);

        let json = serde_json::to_string(&opts).unwrap();
        let back: AggregationOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(opts, back);
    }
}
