//! Validation issue variants and the report that collects them.

use thiserror::Error;

/// One configuration problem found by the validator.
///
/// Every variant carries enough context to locate the offending field
/// without re-reading the config by hand. `site` strings use index paths
/// like `metrics_specs[0].metrics[2]`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationIssue {
    #[error("More than one model is marked is_baseline: {names:?} (at most one allowed)")]
    MultipleBaselines { names: Vec<String> },

    #[error("Duplicate model name: {name}")]
    DuplicateModelName { name: String },

    #[error("Model name is empty but the config declares {count} models (names are required for multi-model configs)")]
    EmptyModelName { count: usize },

    #[error("Unknown model_type for model '{model}': {model_type} (valid: auto-detect \"\", tf_keras, tf_estimator, tf_lite, tf_js, tf_generic)")]
    UnknownModelType { model: String, model_type: String },

    #[error("Mutually exclusive fields set on model '{model}': {singular} and {plural}")]
    MutuallyExclusiveKeys {
        model: String,
        singular: &'static str,
        plural: &'static str,
    },

    #[error("{site}: aggregate block present but no averaging mode chosen (set micro_average, macro_average, or weighted_macro_average)")]
    MissingAggregationType { site: String },

    #[error("{site}: {average} aggregation requires a binarize block in the same metrics spec")]
    AggregationRequiresBinarization { site: String, average: String },

    #[error("{site}: class weight for class {class_id} is {weight} (must be finite and >= 0)")]
    InvalidClassWeight {
        site: String,
        class_id: i32,
        weight: f64,
    },

    #[error("{site}: binarize block present but every list is empty")]
    EmptyBinarization { site: String },

    #[error("{site}: {field} contains {value} (must be {constraint})")]
    InvalidBinarizationEntry {
        site: String,
        field: &'static str,
        value: i32,
        constraint: &'static str,
    },

    #[error("{site}: value threshold is unsatisfiable: lower_bound {lower} > upper_bound {upper}")]
    UnsatisfiableValueThreshold {
        site: String,
        lower: f64,
        upper: f64,
    },

    #[error("{site}: value threshold bound is NaN")]
    NanThresholdBound { site: String },

    #[error("{site}: metric threshold sets neither value_threshold nor change_threshold")]
    EmptyMetricThreshold { site: String },

    #[error("{site}: change threshold has no direction (set higher_is_better or lower_is_better)")]
    UnknownChangeDirection { site: String },

    #[error("{site}: change threshold sets neither absolute nor relative slack and gates nothing")]
    ChangeThresholdWithoutSlack { site: String },

    #[error("{site}: change threshold slack {field} is {value} (must be finite and >= 0)")]
    InvalidSlack {
        site: String,
        field: &'static str,
        value: f64,
    },

    #[error("{site}: slice '{slice}' is not declared in the top-level slicing_specs (run normalization or declare it)")]
    DanglingSliceReference { site: String, slice: String },

    #[error("{site}: model_names references undeclared model '{name}'")]
    UnknownModelReference { site: String, name: String },

    #[error("{site}: metric class_name is empty")]
    EmptyMetricClassName { site: String },

    #[error("{site}: metric '{class_name}' has no module and is not in the built-in namespaces")]
    UnresolvableMetric { site: String, class_name: String },

    #[error("{site}: metric '{class_name}' config is not a JSON object: {message}")]
    MalformedMetricConfig {
        site: String,
        class_name: String,
        message: String,
    },

    #[error("{site}: ranking metric '{class_name}' requires query_key on its metrics spec")]
    MissingQueryKey { site: String, class_name: String },

    #[error("Run record version '{version}' is unsupported (supported: {supported})")]
    UnsupportedRunVersion { version: String, supported: String },

    #[error("model_locations names undeclared model '{name}'")]
    UnknownModelLocation { name: String },
}

/// Every issue found in one validation pass.
///
/// An empty report means the config is valid. Converts to the crate
/// [`Error`](crate::error::Error) via [`into_result`](Self::into_result)
/// for `?`-style call sites.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one issue.
    pub fn push(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }

    /// Whether no issues were found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Number of issues found.
    #[must_use]
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    /// The issues, in discovery order.
    #[must_use]
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    /// `Ok(())` for an empty report, `Err(self)` otherwise.
    pub fn into_result(self) -> Result<(), ValidationReport> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl std::fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_empty() {
            return write!(f, "configuration is valid");
        }
        writeln!(
            f,
            "configuration validation failed with {} issue(s):",
            self.issues.len()
        )?;
        for (i, issue) in self.issues.iter().enumerate() {
            writeln!(f, "  {}. {issue}", i + 1)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationReport {}
