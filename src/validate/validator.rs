//! The exhaustive validation pass.
//!
//! Unlike a fail-fast validator, every check appends to the shared report
//! and the pass always runs to completion, so a config author sees all
//! problems after one run.

use super::error::{ValidationIssue, ValidationReport};
use crate::config::{
    AggregationType, BinarizationOptions, CrossSlicingSpec, EvalConfig, EvalRun,
    GenericChangeThreshold, GenericValueThreshold, MetricDirection, MetricThreshold, MetricsSpec,
    ModelSpec, VALID_MODEL_TYPES,
};
use crate::registry;
use crate::SUPPORTED_VERSIONS;

/// Validate every cross-field invariant of an [`EvalConfig`].
///
/// Checks, in order:
/// 1. Model specs: at-most-one baseline, unique non-empty names, known
///    model types, singular/plural key exclusivity.
/// 2. Metrics specs: aggregation/binarization coupling, threshold sanity,
///    metric resolvability, kwargs JSON shape, query keys.
/// 3. Slice references: everything referenced resolves against the
///    top-level `slicing_specs`.
#[must_use]
pub fn validate_eval_config(config: &EvalConfig) -> ValidationReport {
    let mut report = ValidationReport::new();

    validate_model_specs(&config.model_specs, &mut report);

    for (i, spec) in config.metrics_specs.iter().enumerate() {
        validate_metrics_spec(spec, i, config, &mut report);
    }

    validate_slice_references(config, &mut report);

    report
}

/// Validate a persisted run record: the embedded config, the schema
/// version, and the model-location keys.
#[must_use]
pub fn validate_eval_run(run: &EvalRun) -> ValidationReport {
    let mut report = validate_eval_config(&run.eval_config);

    if !SUPPORTED_VERSIONS.contains(&run.version.as_str()) {
        report.push(ValidationIssue::UnsupportedRunVersion {
            version: run.version.clone(),
            supported: SUPPORTED_VERSIONS.join(", "),
        });
    }

    for name in run.model_locations.keys() {
        if run.eval_config.model_spec(name).is_none() {
            report.push(ValidationIssue::UnknownModelLocation { name: name.clone() });
        }
    }

    report
}

fn validate_model_specs(specs: &[ModelSpec], report: &mut ValidationReport) {
    let baselines: Vec<String> = specs
        .iter()
        .filter(|m| m.is_baseline)
        .map(|m| m.name.clone())
        .collect();
    if baselines.len() > 1 {
        report.push(ValidationIssue::MultipleBaselines { names: baselines });
    }

    let mut seen: Vec<&str> = Vec::new();
    for spec in specs {
        if spec.name.is_empty() {
            if specs.len() > 1 {
                report.push(ValidationIssue::EmptyModelName { count: specs.len() });
            }
        } else if seen.contains(&spec.name.as_str()) {
            report.push(ValidationIssue::DuplicateModelName { name: spec.name.clone() });
        } else {
            seen.push(&spec.name);
        }

        if !VALID_MODEL_TYPES.contains(&spec.model_type.as_str()) {
            report.push(ValidationIssue::UnknownModelType {
                model: spec.name.clone(),
                model_type: spec.model_type.clone(),
            });
        }

        validate_key_exclusivity(spec, report);
    }
}

/// Each singular/plural pair may populate at most one side.
fn validate_key_exclusivity(spec: &ModelSpec, report: &mut ValidationReport) {
    let pairs: [(&'static str, bool, &'static str, bool); 4] = [
        (
            "signature_name",
            spec.signature_name.is_some(),
            "signature_names",
            !spec.signature_names.is_empty(),
        ),
        (
            "label_key",
            spec.label_key.is_some(),
            "label_keys",
            !spec.label_keys.is_empty(),
        ),
        (
            "prediction_key",
            spec.prediction_key.is_some(),
            "prediction_keys",
            !spec.prediction_keys.is_empty(),
        ),
        (
            "example_weight_key",
            spec.example_weight_key.is_some(),
            "example_weight_keys",
            !spec.example_weight_keys.is_empty(),
        ),
    ];
    for (singular, singular_set, plural, plural_set) in pairs {
        if singular_set && plural_set {
            report.push(ValidationIssue::MutuallyExclusiveKeys {
                model: spec.name.clone(),
                singular,
                plural,
            });
        }
    }
}

fn validate_metrics_spec(
    spec: &MetricsSpec,
    index: usize,
    config: &EvalConfig,
    report: &mut ValidationReport,
) {
    let site = format!("metrics_specs[{index}]");

    for name in &spec.model_names {
        if config.model_spec(name).is_none() {
            report.push(ValidationIssue::UnknownModelReference {
                site: site.clone(),
                name: name.clone(),
            });
        }
    }

    if let Some(aggregate) = &spec.aggregate {
        let agg_site = format!("{site}.aggregate");
        match aggregate.average {
            None => report.push(ValidationIssue::MissingAggregationType { site: agg_site.clone() }),
            Some(average) => {
                let needs_binarize = matches!(
                    average,
                    AggregationType::MacroAverage | AggregationType::WeightedMacroAverage
                );
                if needs_binarize && spec.binarize.is_none() {
                    report.push(ValidationIssue::AggregationRequiresBinarization {
                        site: agg_site.clone(),
                        average: match average {
                            AggregationType::MacroAverage => "macro_average".to_string(),
                            _ => "weighted_macro_average".to_string(),
                        },
                    });
                }
            }
        }
        for (&class_id, &weight) in &aggregate.class_weights {
            if !weight.is_finite() || weight < 0.0 {
                report.push(ValidationIssue::InvalidClassWeight {
                    site: agg_site.clone(),
                    class_id,
                    weight,
                });
            }
        }
    }

    if let Some(binarize) = &spec.binarize {
        validate_binarization(binarize, &format!("{site}.binarize"), report);
    }

    for (j, metric) in spec.metrics.iter().enumerate() {
        let metric_site = format!("{site}.metrics[{j}]");
        validate_metric_config(metric, spec, &metric_site, report);
    }

    for (name, threshold) in &spec.thresholds {
        validate_threshold(threshold, &format!("{site}.thresholds[{name}]"), report);
    }
    for (name, bindings) in &spec.per_slice_thresholds {
        for (j, binding) in bindings.iter().enumerate() {
            validate_threshold(
                &binding.threshold,
                &format!("{site}.per_slice_thresholds[{name}][{j}]"),
                report,
            );
        }
    }
    for (name, bindings) in &spec.cross_slice_thresholds {
        for (j, binding) in bindings.iter().enumerate() {
            validate_threshold(
                &binding.threshold,
                &format!("{site}.cross_slice_thresholds[{name}][{j}]"),
                report,
            );
        }
    }
}

fn validate_binarization(
    binarize: &BinarizationOptions,
    site: &str,
    report: &mut ValidationReport,
) {
    if binarize.is_empty() {
        report.push(ValidationIssue::EmptyBinarization { site: site.to_string() });
        return;
    }
    for &id in &binarize.class_ids {
        if id < 0 {
            report.push(ValidationIssue::InvalidBinarizationEntry {
                site: site.to_string(),
                field: "class_ids",
                value: id,
                constraint: ">= 0",
            });
        }
    }
    for (field, list) in [("k_list", &binarize.k_list), ("top_k_list", &binarize.top_k_list)] {
        for &k in list {
            if k < 1 {
                report.push(ValidationIssue::InvalidBinarizationEntry {
                    site: site.to_string(),
                    field,
                    value: k,
                    constraint: ">= 1",
                });
            }
        }
    }
}

fn validate_metric_config(
    metric: &crate::config::MetricConfig,
    spec: &MetricsSpec,
    site: &str,
    report: &mut ValidationReport,
) {
    if metric.class_name.is_empty() {
        report.push(ValidationIssue::EmptyMetricClassName { site: site.to_string() });
    } else {
        if metric.module.is_none() && registry::resolve_module(&metric.class_name).is_none() {
            report.push(ValidationIssue::UnresolvableMetric {
                site: site.to_string(),
                class_name: metric.class_name.clone(),
            });
        }
        // The query-key rule covers built-in ranking metrics only; a
        // user-supplied metric under its own module may reuse the name.
        let builtin = match metric.module.as_deref() {
            None => true,
            Some(module) => registry::is_builtin_module(module),
        };
        if builtin && registry::requires_query_key(&metric.class_name) && spec.query_key.is_none()
        {
            report.push(ValidationIssue::MissingQueryKey {
                site: site.to_string(),
                class_name: metric.class_name.clone(),
            });
        }
    }

    if let Err(e) = metric.kwargs() {
        report.push(ValidationIssue::MalformedMetricConfig {
            site: site.to_string(),
            class_name: metric.class_name.clone(),
            message: e.to_string(),
        });
    }

    if let Some(threshold) = &metric.threshold {
        validate_threshold(threshold, &format!("{site}.threshold"), report);
    }
    for (k, binding) in metric.per_slice_thresholds.iter().enumerate() {
        validate_threshold(
            &binding.threshold,
            &format!("{site}.per_slice_thresholds[{k}]"),
            report,
        );
    }
    for (k, binding) in metric.cross_slice_thresholds.iter().enumerate() {
        validate_threshold(
            &binding.threshold,
            &format!("{site}.cross_slice_thresholds[{k}]"),
            report,
        );
    }
}

fn validate_threshold(threshold: &MetricThreshold, site: &str, report: &mut ValidationReport) {
    if threshold.is_empty() {
        report.push(ValidationIssue::EmptyMetricThreshold { site: site.to_string() });
        return;
    }
    if let Some(value) = &threshold.value_threshold {
        validate_value_threshold(value, site, report);
    }
    if let Some(change) = &threshold.change_threshold {
        validate_change_threshold(change, site, report);
    }
}

fn validate_value_threshold(
    threshold: &GenericValueThreshold,
    site: &str,
    report: &mut ValidationReport,
) {
    let nan = threshold.lower_bound.is_some_and(f64::is_nan)
        || threshold.upper_bound.is_some_and(f64::is_nan);
    if nan {
        report.push(ValidationIssue::NanThresholdBound { site: site.to_string() });
        return;
    }
    // lower == upper is a valid exact-match gate; only inversion is flagged.
    if let (Some(lower), Some(upper)) = (threshold.lower_bound, threshold.upper_bound) {
        if lower > upper {
            report.push(ValidationIssue::UnsatisfiableValueThreshold {
                site: site.to_string(),
                lower,
                upper,
            });
        }
    }
}

fn validate_change_threshold(
    threshold: &GenericChangeThreshold,
    site: &str,
    report: &mut ValidationReport,
) {
    if threshold.direction == MetricDirection::Unknown {
        report.push(ValidationIssue::UnknownChangeDirection { site: site.to_string() });
    }
    if !threshold.has_slack() {
        report.push(ValidationIssue::ChangeThresholdWithoutSlack { site: site.to_string() });
    }
    for (field, slack) in [("absolute", threshold.absolute), ("relative", threshold.relative)] {
        if let Some(value) = slack {
            if !value.is_finite() || value < 0.0 {
                report.push(ValidationIssue::InvalidSlack {
                    site: site.to_string(),
                    field,
                    value,
                });
            }
        }
    }
}

/// Check that every slice referenced anywhere resolves against the
/// top-level declarations, reporting each dangling reference at the site
/// that holds it.
fn validate_slice_references(config: &EvalConfig, report: &mut ValidationReport) {
    for (i, cross) in config.cross_slicing_specs.iter().enumerate() {
        check_cross_resolves(config, cross, &format!("cross_slicing_specs[{i}]"), report);
    }

    for (i, metrics_spec) in config.metrics_specs.iter().enumerate() {
        for (j, metric) in metrics_spec.metrics.iter().enumerate() {
            for (k, binding) in metric.per_slice_thresholds.iter().enumerate() {
                let site = format!("metrics_specs[{i}].metrics[{j}].per_slice_thresholds[{k}]");
                for spec in &binding.slicing_specs {
                    check_slice_resolves(config, spec, &site, report);
                }
            }
            for (k, binding) in metric.cross_slice_thresholds.iter().enumerate() {
                let site = format!("metrics_specs[{i}].metrics[{j}].cross_slice_thresholds[{k}]");
                for cross in &binding.cross_slicing_specs {
                    check_cross_resolves(config, cross, &site, report);
                }
            }
        }
        for (name, bindings) in &metrics_spec.per_slice_thresholds {
            for (k, binding) in bindings.iter().enumerate() {
                let site = format!("metrics_specs[{i}].per_slice_thresholds[{name}][{k}]");
                for spec in &binding.slicing_specs {
                    check_slice_resolves(config, spec, &site, report);
                }
            }
        }
        for (name, bindings) in &metrics_spec.cross_slice_thresholds {
            for (k, binding) in bindings.iter().enumerate() {
                let site = format!("metrics_specs[{i}].cross_slice_thresholds[{name}][{k}]");
                for cross in &binding.cross_slicing_specs {
                    check_cross_resolves(config, cross, &site, report);
                }
            }
        }
    }
}

fn check_slice_resolves(
    config: &EvalConfig,
    spec: &crate::config::SlicingSpec,
    site: &str,
    report: &mut ValidationReport,
) {
    if !config.declares_slice(spec) {
        report.push(ValidationIssue::DanglingSliceReference {
            site: site.to_string(),
            slice: spec.to_string(),
        });
    }
}

fn check_cross_resolves(
    config: &EvalConfig,
    cross: &CrossSlicingSpec,
    site: &str,
    report: &mut ValidationReport,
) {
    check_slice_resolves(config, &cross.baseline_spec, site, report);
    for spec in &cross.slicing_specs {
        check_slice_resolves(config, spec, site, report);
    }
}
