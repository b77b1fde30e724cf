//! Metric thresholds: absolute bounds and baseline-relative change gates.

use serde::{Deserialize, Serialize};

use super::slicing::{CrossSlicingSpec, SlicingSpec};

/// Which way a metric improves.
///
/// `Unknown` is the wire default and never passes a change gate;
/// validation reports it so authors state the direction explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricDirection {
    /// Direction not stated.
    #[default]
    Unknown,
    /// Larger values are better (accuracy, AUC).
    HigherIsBetter,
    /// Smaller values are better (loss, MSE).
    LowerIsBetter,
}

/// Absolute bound check: the metric value must lie in
/// `[lower_bound, upper_bound]`, either side defaulting to ±infinity when
/// unset. Equal bounds form a valid exact-match gate; inverted bounds are
/// unsatisfiable and flagged by validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenericValueThreshold {
    /// Inclusive lower bound; -infinity when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lower_bound: Option<f64>,

    /// Inclusive upper bound; +infinity when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upper_bound: Option<f64>,
}

impl GenericValueThreshold {
    /// Whether a metric value satisfies the bounds.
    #[must_use]
    pub fn check(&self, value: f64) -> bool {
        let lower = self.lower_bound.unwrap_or(f64::NEG_INFINITY);
        let upper = self.upper_bound.unwrap_or(f64::INFINITY);
        lower <= value && value <= upper
    }

    /// Whether any value at all could satisfy the bounds.
    #[must_use]
    pub fn is_satisfiable(&self) -> bool {
        match (self.lower_bound, self.upper_bound) {
            (Some(lower), Some(upper)) => lower <= upper,
            _ => true,
        }
    }
}

/// Change gate relative to a baseline value.
///
/// With `diff = candidate - baseline`, a higher-is-better metric fails
/// when `diff < absolute` or `diff < relative * baseline`; a
/// lower-is-better metric fails on the mirrored comparisons. Each slack is
/// independently optional; the relative slack multiplies the baseline, so
/// a zero baseline stays well-defined.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenericChangeThreshold {
    /// Which direction counts as an improvement. Required in practice;
    /// `Unknown` never passes.
    #[serde(default)]
    pub direction: MetricDirection,

    /// Minimum (higher-is-better) or maximum (lower-is-better) allowed
    /// absolute change.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub absolute: Option<f64>,

    /// Like `absolute`, but scaled by the baseline value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relative: Option<f64>,
}

impl GenericChangeThreshold {
    /// Whether the candidate value passes the gate against the baseline.
    #[must_use]
    pub fn check(&self, baseline: f64, candidate: f64) -> bool {
        let diff = candidate - baseline;
        let slacks = [
            self.absolute,
            self.relative.map(|r| r * baseline),
        ];
        match self.direction {
            MetricDirection::HigherIsBetter => {
                slacks.iter().flatten().all(|slack| diff >= *slack)
            }
            MetricDirection::LowerIsBetter => {
                slacks.iter().flatten().all(|slack| diff <= *slack)
            }
            // Fail closed: a gate with no stated direction blocks.
            MetricDirection::Unknown => false,
        }
    }

    /// Whether at least one slack is configured. A slack-less gate is
    /// vacuous and flagged by validation.
    #[must_use]
    pub fn has_slack(&self) -> bool {
        self.absolute.is_some() || self.relative.is_some()
    }
}

/// A validation rule attached to a metric.
///
/// Deliberately permissive: `value_threshold` and `change_threshold` are
/// independent branches and MAY both be set, in which case both must
/// pass. This is the opposite of
/// [`AggregationOptions::average`](super::aggregation::AggregationOptions),
/// which is a strict single choice — don't "fix" one to look like the
/// other. A threshold with neither branch is flagged by validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricThreshold {
    /// Absolute bound on the metric value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_threshold: Option<GenericValueThreshold>,

    /// Baseline-relative change gate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_threshold: Option<GenericChangeThreshold>,
}

impl MetricThreshold {
    /// Whether a candidate value passes every configured branch.
    ///
    /// `baseline` feeds the change branch; a change gate with no baseline
    /// available fails closed.
    #[must_use]
    pub fn check(&self, candidate: f64, baseline: Option<f64>) -> bool {
        let value_ok = self
            .value_threshold
            .as_ref()
            .map_or(true, |t| t.check(candidate));
        let change_ok = self
            .change_threshold
            .as_ref()
            .map_or(true, |t| baseline.is_some_and(|b| t.check(b, candidate)));
        value_ok && change_ok
    }

    /// Whether neither branch is configured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.value_threshold.is_none() && self.change_threshold.is_none()
    }
}

/// Binds a threshold to specific slices of the data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PerSliceMetricThreshold {
    /// Slices the threshold applies to. Each must resolve against the
    /// top-level slicing declarations.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub slicing_specs: Vec<SlicingSpec>,

    /// The rule to apply on those slices.
    #[serde(default)]
    pub threshold: MetricThreshold,
}

/// Binds a threshold to slice-vs-slice comparisons.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CrossSliceMetricThreshold {
    /// Cross-slice pairs the threshold applies to.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cross_slicing_specs: Vec<CrossSlicingSpec>,

    /// The rule to apply on those comparisons.
    #[serde(default)]
    pub threshold: MetricThreshold,
}
