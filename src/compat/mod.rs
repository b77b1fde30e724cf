//! Wire-layout compatibility tables.
//!
//! Each record type in [`crate::config`] has a layout table here giving
//! its stable field numbers and the permanently retired (`reserved`)
//! numbers. Field numbers are the wire identity of a field: once shipped
//! they are never reassigned, and a removed field's number goes on the
//! reserved list instead of back into the pool. The tables are code, not
//! comments, so schema-evolution mistakes fail tests instead of reviews.

use thiserror::Error;


/// Field-number table for one record type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageLayout {
    /// Record type name as it appears in the schema.
    pub message: &'static str,
    /// `(field_number, serialized_field_name)` pairs, in field order.
    pub fields: &'static [(u32, &'static str)],
    /// Permanently retired field numbers. Never reuse these.
    pub reserved: &'static [u32],
}

/// A schema-evolution mistake found in a layout table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutViolation {
    #[error("{message}: field number {number} assigned twice")]
    DuplicateFieldNumber { message: &'static str, number: u32 },

    #[error("{message}: field '{name}' (number {number}) reuses a reserved number")]
    ReservedFieldNumber {
        message: &'static str,
        name: &'static str,
        number: u32,
    },

    #[error("{message}: field name '{name}' assigned twice")]
    DuplicateFieldName { message: &'static str, name: &'static str },
}

pub const EVAL_CONFIG: MessageLayout = MessageLayout {
    message: "EvalConfig",
    fields: &[
        (2, "model_specs"),
        (3, "slicing_specs"),
        (6, "metrics_specs"),
        (7, "options"),
        (8, "cross_slicing_specs"),
    ],
    reserved: &[1, 4, 5],
};

pub const MODEL_SPEC: MessageLayout = MessageLayout {
    message: "ModelSpec",
    fields: &[
        (1, "name"),
        (2, "model_type"),
        (3, "signature_name"),
        (4, "label_key"),
        (5, "prediction_key"),
        (6, "example_weight_key"),
        (7, "is_baseline"),
        (8, "signature_names"),
        (9, "label_keys"),
        (10, "prediction_keys"),
        (11, "example_weight_keys"),
    ],
    reserved: &[],
};

pub const SLICING_SPEC: MessageLayout = MessageLayout {
    message: "SlicingSpec",
    fields: &[(1, "feature_keys"), (2, "feature_values")],
    reserved: &[],
};

pub const CROSS_SLICING_SPEC: MessageLayout = MessageLayout {
    message: "CrossSlicingSpec",
    fields: &[(1, "baseline_spec"), (2, "slicing_specs")],
    reserved: &[],
};

/// The three wire booleans (micro/macro/weighted) fold into the single
/// `average` sum type in the Rust representation; the numbers stay
/// reserved for their wire meaning.
pub const AGGREGATION_OPTIONS: MessageLayout = MessageLayout {
    message: "AggregationOptions",
    fields: &[
        (1, "micro_average"),
        (2, "macro_average"),
        (3, "weighted_macro_average"),
        (4, "class_weights"),
    ],
    reserved: &[],
};

pub const BINARIZATION_OPTIONS: MessageLayout = MessageLayout {
    message: "BinarizationOptions",
    fields: &[(4, "class_ids"), (5, "k_list"), (6, "top_k_list")],
    reserved: &[1, 2, 3],
};

pub const GENERIC_VALUE_THRESHOLD: MessageLayout = MessageLayout {
    message: "GenericValueThreshold",
    fields: &[(1, "lower_bound"), (2, "upper_bound")],
    reserved: &[],
};

pub const GENERIC_CHANGE_THRESHOLD: MessageLayout = MessageLayout {
    message: "GenericChangeThreshold",
    fields: &[(1, "direction"), (2, "absolute"), (3, "relative")],
    reserved: &[],
};

pub const METRIC_THRESHOLD: MessageLayout = MessageLayout {
    message: "MetricThreshold",
    fields: &[(1, "value_threshold"), (2, "change_threshold")],
    reserved: &[],
};

pub const PER_SLICE_METRIC_THRESHOLD: MessageLayout = MessageLayout {
    message: "PerSliceMetricThreshold",
    fields: &[(1, "slicing_specs"), (2, "threshold")],
    reserved: &[],
};

pub const CROSS_SLICE_METRIC_THRESHOLD: MessageLayout = MessageLayout {
    message: "CrossSliceMetricThreshold",
    fields: &[(1, "cross_slicing_specs"), (2, "threshold")],
    reserved: &[],
};

pub const METRIC_CONFIG: MessageLayout = MessageLayout {
    message: "MetricConfig",
    fields: &[
        (1, "class_name"),
        (2, "module"),
        (3, "config"),
        (4, "threshold"),
        (5, "per_slice_thresholds"),
        (6, "cross_slice_thresholds"),
    ],
    reserved: &[],
};

pub const METRICS_SPEC: MessageLayout = MessageLayout {
    message: "MetricsSpec",
    fields: &[
        (1, "metrics"),
        (2, "model_names"),
        (3, "output_names"),
        (4, "binarize"),
        (5, "aggregate"),
        (6, "query_key"),
        (7, "thresholds"),
        (8, "per_slice_thresholds"),
        (9, "cross_slice_thresholds"),
    ],
    reserved: &[10],
};

pub const OPTIONS: MessageLayout = MessageLayout {
    message: "Options",
    fields: &[
        (1, "include_default_metrics"),
        (2, "compute_confidence_intervals"),
        (5, "min_slice_size"),
        (11, "disabled_outputs"),
        (12, "confidence_interval_method"),
    ],
    reserved: &[3, 4, 6, 7, 8, 9, 10],
};

pub const EVAL_CONFIG_AND_VERSION: MessageLayout = MessageLayout {
    message: "EvalConfigAndVersion",
    fields: &[(1, "eval_config"), (2, "version")],
    reserved: &[],
};

pub const EVAL_RUN: MessageLayout = MessageLayout {
    message: "EvalRun",
    fields: &[
        (1, "eval_config"),
        (2, "version"),
        (3, "data_location"),
        (4, "file_format"),
        (5, "model_locations"),
    ],
    reserved: &[],
};

/// Every layout table in the schema.
pub const ALL_LAYOUTS: &[&MessageLayout] = &[
    &EVAL_CONFIG,
    &MODEL_SPEC,
    &SLICING_SPEC,
    &CROSS_SLICING_SPEC,
    &AGGREGATION_OPTIONS,
    &BINARIZATION_OPTIONS,
    &GENERIC_VALUE_THRESHOLD,
    &GENERIC_CHANGE_THRESHOLD,
    &METRIC_THRESHOLD,
    &PER_SLICE_METRIC_THRESHOLD,
    &CROSS_SLICE_METRIC_THRESHOLD,
    &METRIC_CONFIG,
    &METRICS_SPEC,
    &OPTIONS,
    &EVAL_CONFIG_AND_VERSION,
    &EVAL_RUN,
];

/// Check one layout for duplicate numbers, duplicate names, and
/// reserved-number reuse.
#[must_use]
pub fn verify_layout(layout: &MessageLayout) -> Vec<LayoutViolation> {
    let mut violations = Vec::new();
    let mut seen_numbers: Vec<u32> = Vec::new();
    let mut seen_names: Vec<&'static str> = Vec::new();

    for &(number, name) in layout.fields {
        if seen_numbers.contains(&number) {
            violations.push(LayoutViolation::DuplicateFieldNumber {
                message: layout.message,
                number,
            });
        } else {
            seen_numbers.push(number);
        }
        if seen_names.contains(&name) {
            violations.push(LayoutViolation::DuplicateFieldName { message: layout.message, name });
        } else {
            seen_names.push(name);
        }
        if layout.reserved.contains(&number) {
            violations.push(LayoutViolation::ReservedFieldNumber {
                message: layout.message,
                name,
                number,
            });
        }
    }
    violations
}

/// Check every layout table.
#[must_use]
pub fn verify_all_layouts() -> Vec<LayoutViolation> {
    ALL_LAYOUTS.iter().flat_map(|l| verify_layout(l)).collect()
}

/// Number of leading fields two layouts share exactly (same number, same
/// name, same position).
///
/// [`EVAL_RUN`] and [`EVAL_CONFIG_AND_VERSION`] must share a prefix of 2
/// so a serialized record of either shape parses as the other.
#[must_use]
pub fn shared_prefix(a: &MessageLayout, b: &MessageLayout) -> usize {
    a.fields
        .iter()
        .zip(b.fields.iter())
        .take_while(|(fa, fb)| fa == fb)
        .count()
}
