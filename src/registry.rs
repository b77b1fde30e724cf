//! Built-in metric namespaces and name resolution.
//!
//! A [`MetricConfig`](crate::config::MetricConfig) that omits `module` is
//! resolved by convention: the class name is looked up first in the
//! `evaluar.metrics` namespace, then in `aprender.metrics`. Metrics found
//! in neither are a validation error unless the config names the module
//! explicitly.

use std::collections::HashSet;
use std::sync::LazyLock;

/// Namespace of metrics implemented by the evaluation framework itself.
pub const EVALUAR_METRICS_MODULE: &str = "evaluar.metrics";

/// Namespace of metrics re-exported from the modeling library.
pub const APRENDER_METRICS_MODULE: &str = "aprender.metrics";

/// Metrics implemented in `evaluar.metrics`.
const EVALUAR_METRICS: &[&str] = &[
    "ExampleCount",
    "WeightedExampleCount",
    "Calibration",
    "CalibrationPlot",
    "ConfusionMatrixPlot",
    "ConfusionMatrixAtThresholds",
    "MeanLabel",
    "MeanPrediction",
    "MeanAttributions",
    "Lift",
    "SquaredPearsonCorrelation",
    "MultiClassConfusionMatrixPlot",
    "MultiLabelConfusionMatrixPlot",
    "NDCG",
    "MinLabelPosition",
    "QueryStatistics",
    "FairnessIndicators",
];

/// Metrics resolved from `aprender.metrics`.
const APRENDER_METRICS: &[&str] = &[
    "Accuracy",
    "BinaryAccuracy",
    "CategoricalAccuracy",
    "AUC",
    "Precision",
    "PrecisionAtRecall",
    "Recall",
    "RecallAtPrecision",
    "SpecificityAtSensitivity",
    "SensitivityAtSpecificity",
    "TruePositives",
    "TrueNegatives",
    "FalsePositives",
    "FalseNegatives",
    "MeanAbsoluteError",
    "MeanAbsolutePercentageError",
    "MeanSquaredError",
    "RootMeanSquaredError",
    "Hinge",
    "KLDivergence",
    "LogCoshError",
    "Poisson",
    "CategoricalCrossentropy",
    "BinaryCrossentropy",
];

/// Metrics that group examples into queries and therefore require a
/// `query_key` on their metrics spec.
const RANKING_METRICS: &[&str] = &["NDCG", "MinLabelPosition", "QueryStatistics"];

static EVALUAR_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| EVALUAR_METRICS.iter().copied().collect());

static APRENDER_SET: LazyLock<HashSet<&'static str>> =
    LazyLock::new(|| APRENDER_METRICS.iter().copied().collect());

/// Resolve a bare metric class name to its built-in namespace.
///
/// `evaluar.metrics` wins when a name exists in both namespaces. Returns
/// `None` for names in neither; such metrics must state `module`
/// explicitly.
#[must_use]
pub fn resolve_module(class_name: &str) -> Option<&'static str> {
    if EVALUAR_SET.contains(class_name) {
        Some(EVALUAR_METRICS_MODULE)
    } else if APRENDER_SET.contains(class_name) {
        Some(APRENDER_METRICS_MODULE)
    } else {
        None
    }
}

/// Whether a module string names one of the built-in namespaces.
///
/// Metrics declared under any other module are user-supplied; nothing is
/// known about them beyond what the config states, including whether they
/// rank queries.
#[must_use]
pub fn is_builtin_module(module: &str) -> bool {
    module == EVALUAR_METRICS_MODULE || module == APRENDER_METRICS_MODULE
}

/// Whether the metric operates per query rather than per example.
///
/// Only meaningful for metrics resolved from the built-in namespaces; a
/// user-supplied metric that shares a ranking metric's name is not
/// assumed to rank.
#[must_use]
pub fn requires_query_key(class_name: &str) -> bool {
    RANKING_METRICS.contains(&class_name)
}
