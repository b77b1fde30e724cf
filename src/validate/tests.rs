//! Unit coverage for every validation issue class.

use std::collections::HashMap;

use super::{validate_eval_config, validate_eval_run, ValidationIssue};
use crate::config::{
    AggregationOptions, AggregationType, BinarizationOptions, CrossSliceMetricThreshold,
    CrossSlicingSpec, EvalConfig, EvalRun, GenericChangeThreshold, GenericValueThreshold,
    MetricConfig, MetricDirection, MetricThreshold, MetricsSpec, ModelSpec,
    PerSliceMetricThreshold, SlicingSpec,
};

fn slice_on(key: &str, value: &str) -> SlicingSpec {
    let mut spec = SlicingSpec::default();
    spec.feature_values.insert(key.to_string(), value.to_string());
    spec
}

fn named_model(name: &str) -> ModelSpec {
    ModelSpec { name: name.to_string(), ..Default::default() }
}

fn has_issue(config: &EvalConfig, predicate: impl Fn(&ValidationIssue) -> bool) -> bool {
    validate_eval_config(config).issues().iter().any(predicate)
}

#[test]
fn test_valid_two_model_config_passes() {
    let config = EvalConfig {
        model_specs: vec![named_model("candidate"), {
            let mut baseline = named_model("baseline");
            baseline.is_baseline = true;
            baseline
        }],
        slicing_specs: vec![SlicingSpec::overall()],
        metrics_specs: vec![MetricsSpec {
            metrics: vec![MetricConfig::new("AUC")],
            model_names: vec!["candidate".to_string(), "baseline".to_string()],
            ..Default::default()
        }],
        ..Default::default()
    };
    let report = validate_eval_config(&config);
    assert!(report.is_empty(), "{report}");
}

#[test]
fn test_multiple_baselines_fail() {
    let mut a = named_model("a");
    a.is_baseline = true;
    let mut b = named_model("b");
    b.is_baseline = true;
    let config = EvalConfig { model_specs: vec![a, b], ..Default::default() };
    assert!(has_issue(&config, |i| matches!(
        i,
        ValidationIssue::MultipleBaselines { names } if names.len() == 2
    )));
}

#[test]
fn test_duplicate_model_names_fail() {
    let config = EvalConfig {
        model_specs: vec![named_model("m"), named_model("m")],
        ..Default::default()
    };
    assert!(has_issue(&config, |i| matches!(
        i,
        ValidationIssue::DuplicateModelName { name } if name == "m"
    )));
}

#[test]
fn test_empty_name_allowed_only_for_single_model() {
    let single = EvalConfig { model_specs: vec![ModelSpec::default()], ..Default::default() };
    assert!(validate_eval_config(&single).is_empty());

    let multi = EvalConfig {
        model_specs: vec![ModelSpec::default(), named_model("m")],
        ..Default::default()
    };
    assert!(has_issue(&multi, |i| matches!(i, ValidationIssue::EmptyModelName { count: 2 })));
}

#[test]
fn test_unknown_model_type_fails() {
    let mut model = named_model("m");
    model.model_type = "pytorch".to_string();
    let config = EvalConfig { model_specs: vec![model], ..Default::default() };
    assert!(has_issue(&config, |i| matches!(
        i,
        ValidationIssue::UnknownModelType { model_type, .. } if model_type == "pytorch"
    )));
}

#[test]
fn test_every_singular_plural_pair_is_exclusive() {
    let mut model = named_model("m");
    model.signature_name = Some("s".to_string());
    model.signature_names.insert("o".to_string(), "s".to_string());
    model.label_key = Some("l".to_string());
    model.label_keys.insert("o".to_string(), "l".to_string());
    model.prediction_key = Some("p".to_string());
    model.prediction_keys.insert("o".to_string(), "p".to_string());
    model.example_weight_key = Some("w".to_string());
    model.example_weight_keys.insert("o".to_string(), "w".to_string());

    let config = EvalConfig { model_specs: vec![model], ..Default::default() };
    let report = validate_eval_config(&config);
    let exclusive: Vec<&str> = report
        .issues()
        .iter()
        .filter_map(|i| match i {
            ValidationIssue::MutuallyExclusiveKeys { singular, .. } => Some(*singular),
            _ => None,
        })
        .collect();
    assert_eq!(
        exclusive,
        vec!["signature_name", "label_key", "prediction_key", "example_weight_key"]
    );
}

#[test]
fn test_aggregate_without_average_fails() {
    let config = EvalConfig {
        metrics_specs: vec![MetricsSpec {
            aggregate: Some(AggregationOptions::default()),
            ..Default::default()
        }],
        ..Default::default()
    };
    assert!(has_issue(&config, |i| matches!(i, ValidationIssue::MissingAggregationType { .. })));
}

#[test]
fn test_macro_average_without_binarize_fails() {
    let config = EvalConfig {
        metrics_specs: vec![MetricsSpec {
            aggregate: Some(AggregationOptions {
                average: Some(AggregationType::MacroAverage),
                ..Default::default()
            }),
            ..Default::default()
        }],
        ..Default::default()
    };
    assert!(has_issue(&config, |i| matches!(
        i,
        ValidationIssue::AggregationRequiresBinarization { average, .. } if average == "macro_average"
    )));
}

#[test]
fn test_macro_average_with_binarize_passes() {
    let config = EvalConfig {
        metrics_specs: vec![MetricsSpec {
            aggregate: Some(AggregationOptions {
                average: Some(AggregationType::MacroAverage),
                ..Default::default()
            }),
            binarize: Some(BinarizationOptions {
                class_ids: vec![0, 1],
                ..Default::default()
            }),
            ..Default::default()
        }],
        ..Default::default()
    };
    assert!(validate_eval_config(&config).is_empty());
}

#[test]
fn test_micro_average_needs_no_binarize() {
    let config = EvalConfig {
        metrics_specs: vec![MetricsSpec {
            aggregate: Some(AggregationOptions {
                average: Some(AggregationType::MicroAverage),
                ..Default::default()
            }),
            ..Default::default()
        }],
        ..Default::default()
    };
    assert!(validate_eval_config(&config).is_empty());
}

#[test]
fn test_bad_class_weights_fail() {
    let mut aggregate = AggregationOptions {
        average: Some(AggregationType::WeightedMacroAverage),
        ..Default::default()
    };
    aggregate.class_weights.insert(0, -1.0);
    aggregate.class_weights.insert(1, f64::NAN);
    let config = EvalConfig {
        metrics_specs: vec![MetricsSpec {
            aggregate: Some(aggregate),
            binarize: Some(BinarizationOptions {
                class_ids: vec![0, 1],
                ..Default::default()
            }),
            ..Default::default()
        }],
        ..Default::default()
    };
    let report = validate_eval_config(&config);
    let bad_weights = report
        .issues()
        .iter()
        .filter(|i| matches!(i, ValidationIssue::InvalidClassWeight { .. }))
        .count();
    assert_eq!(bad_weights, 2);
}

#[test]
fn test_present_but_empty_binarize_fails() {
    let config = EvalConfig {
        metrics_specs: vec![MetricsSpec {
            binarize: Some(BinarizationOptions::default()),
            ..Default::default()
        }],
        ..Default::default()
    };
    assert!(has_issue(&config, |i| matches!(i, ValidationIssue::EmptyBinarization { .. })));
}

#[test]
fn test_binarize_range_violations_fail() {
    let config = EvalConfig {
        metrics_specs: vec![MetricsSpec {
            binarize: Some(BinarizationOptions {
                class_ids: vec![-1, 0],
                k_list: vec![0, 1],
                top_k_list: vec![3],
            }),
            ..Default::default()
        }],
        ..Default::default()
    };
    let report = validate_eval_config(&config);
    let violations: Vec<(&str, i32)> = report
        .issues()
        .iter()
        .filter_map(|i| match i {
            ValidationIssue::InvalidBinarizationEntry { field, value, .. } => {
                Some((*field, *value))
            }
            _ => None,
        })
        .collect();
    assert_eq!(violations, vec![("class_ids", -1), ("k_list", 0)]);
}

fn config_with_threshold(threshold: MetricThreshold) -> EvalConfig {
    EvalConfig {
        metrics_specs: vec![MetricsSpec {
            metrics: vec![MetricConfig {
                threshold: Some(threshold),
                ..MetricConfig::new("AUC")
            }],
            ..Default::default()
        }],
        ..Default::default()
    }
}

#[test]
fn test_inverted_bounds_fail_exact_match_passes() {
    let inverted = config_with_threshold(MetricThreshold {
        value_threshold: Some(GenericValueThreshold {
            lower_bound: Some(0.9),
            upper_bound: Some(0.5),
        }),
        ..Default::default()
    });
    assert!(has_issue(&inverted, |i| matches!(
        i,
        ValidationIssue::UnsatisfiableValueThreshold { .. }
    )));

    let exact = config_with_threshold(MetricThreshold {
        value_threshold: Some(GenericValueThreshold {
            lower_bound: Some(0.8),
            upper_bound: Some(0.8),
        }),
        ..Default::default()
    });
    assert!(validate_eval_config(&exact).is_empty());
}

#[test]
fn test_nan_bound_fails() {
    let config = config_with_threshold(MetricThreshold {
        value_threshold: Some(GenericValueThreshold {
            lower_bound: Some(f64::NAN),
            upper_bound: None,
        }),
        ..Default::default()
    });
    assert!(has_issue(&config, |i| matches!(i, ValidationIssue::NanThresholdBound { .. })));
}

#[test]
fn test_empty_threshold_fails() {
    let config = config_with_threshold(MetricThreshold::default());
    assert!(has_issue(&config, |i| matches!(i, ValidationIssue::EmptyMetricThreshold { .. })));
}

#[test]
fn test_change_threshold_without_direction_or_slack_reports_both() {
    let config = config_with_threshold(MetricThreshold {
        change_threshold: Some(GenericChangeThreshold::default()),
        ..Default::default()
    });
    let report = validate_eval_config(&config);
    assert!(report
        .issues()
        .iter()
        .any(|i| matches!(i, ValidationIssue::UnknownChangeDirection { .. })));
    assert!(report
        .issues()
        .iter()
        .any(|i| matches!(i, ValidationIssue::ChangeThresholdWithoutSlack { .. })));
}

#[test]
fn test_negative_slack_fails() {
    let config = config_with_threshold(MetricThreshold {
        change_threshold: Some(GenericChangeThreshold {
            direction: MetricDirection::HigherIsBetter,
            absolute: Some(-0.01),
            relative: None,
        }),
        ..Default::default()
    });
    assert!(has_issue(&config, |i| matches!(
        i,
        ValidationIssue::InvalidSlack { field: "absolute", .. }
    )));
}

#[test]
fn test_dangling_cross_slicing_reference_fails() {
    let config = EvalConfig {
        slicing_specs: vec![SlicingSpec::overall()],
        cross_slicing_specs: vec![CrossSlicingSpec {
            baseline_spec: SlicingSpec::overall(),
            slicing_specs: vec![slice_on("age", "20")],
        }],
        ..Default::default()
    };
    assert!(has_issue(&config, |i| matches!(
        i,
        ValidationIssue::DanglingSliceReference { slice, .. } if slice == "age=20"
    )));
}

#[test]
fn test_dangling_threshold_slices_reported_at_every_site() {
    let mut metric = MetricConfig::new("AUC");
    metric.per_slice_thresholds.push(PerSliceMetricThreshold {
        slicing_specs: vec![slice_on("a", "1")],
        threshold: MetricThreshold {
            value_threshold: Some(GenericValueThreshold::default()),
            ..Default::default()
        },
    });
    let mut metrics_spec = MetricsSpec { metrics: vec![metric], ..Default::default() };
    metrics_spec.cross_slice_thresholds.insert(
        "loss".to_string(),
        vec![CrossSliceMetricThreshold {
            cross_slicing_specs: vec![CrossSlicingSpec {
                baseline_spec: slice_on("b", "2"),
                slicing_specs: vec![],
            }],
            threshold: MetricThreshold {
                value_threshold: Some(GenericValueThreshold::default()),
                ..Default::default()
            },
        }],
    );

    let config = EvalConfig { metrics_specs: vec![metrics_spec], ..Default::default() };
    let report = validate_eval_config(&config);
    let dangling = report
        .issues()
        .iter()
        .filter(|i| matches!(i, ValidationIssue::DanglingSliceReference { .. }))
        .count();
    assert_eq!(dangling, 2);
}

#[test]
fn test_normalized_config_has_no_dangling_references() {
    let mut config = EvalConfig {
        cross_slicing_specs: vec![CrossSlicingSpec {
            baseline_spec: SlicingSpec::overall(),
            slicing_specs: vec![slice_on("age", "20")],
        }],
        ..Default::default()
    };
    crate::config::update_eval_config_with_defaults(&mut config);
    assert!(validate_eval_config(&config).is_empty());
}

#[test]
fn test_unknown_model_reference_fails() {
    let config = EvalConfig {
        model_specs: vec![named_model("real")],
        metrics_specs: vec![MetricsSpec {
            model_names: vec!["ghost".to_string()],
            ..Default::default()
        }],
        ..Default::default()
    };
    assert!(has_issue(&config, |i| matches!(
        i,
        ValidationIssue::UnknownModelReference { name, .. } if name == "ghost"
    )));
}

#[test]
fn test_empty_class_name_fails() {
    let config = EvalConfig {
        metrics_specs: vec![MetricsSpec {
            metrics: vec![MetricConfig::default()],
            ..Default::default()
        }],
        ..Default::default()
    };
    assert!(has_issue(&config, |i| matches!(i, ValidationIssue::EmptyMetricClassName { .. })));
}

#[test]
fn test_unresolvable_metric_fails_unless_module_given() {
    let bare = EvalConfig {
        metrics_specs: vec![MetricsSpec {
            metrics: vec![MetricConfig::new("MyCustomMetric")],
            ..Default::default()
        }],
        ..Default::default()
    };
    assert!(has_issue(&bare, |i| matches!(
        i,
        ValidationIssue::UnresolvableMetric { class_name, .. } if class_name == "MyCustomMetric"
    )));

    let with_module = EvalConfig {
        metrics_specs: vec![MetricsSpec {
            metrics: vec![MetricConfig {
                module: Some("my_company.metrics".to_string()),
                ..MetricConfig::new("MyCustomMetric")
            }],
            ..Default::default()
        }],
        ..Default::default()
    };
    assert!(validate_eval_config(&with_module).is_empty());
}

#[test]
fn test_malformed_metric_kwargs_fail() {
    let config = EvalConfig {
        metrics_specs: vec![MetricsSpec {
            metrics: vec![MetricConfig {
                config: Some("[1, 2]".to_string()),
                ..MetricConfig::new("AUC")
            }],
            ..Default::default()
        }],
        ..Default::default()
    };
    assert!(has_issue(&config, |i| matches!(i, ValidationIssue::MalformedMetricConfig { .. })));
}

#[test]
fn test_ranking_metric_requires_query_key() {
    let without = EvalConfig {
        metrics_specs: vec![MetricsSpec {
            metrics: vec![MetricConfig::new("NDCG")],
            ..Default::default()
        }],
        ..Default::default()
    };
    assert!(has_issue(&without, |i| matches!(
        i,
        ValidationIssue::MissingQueryKey { class_name, .. } if class_name == "NDCG"
    )));

    let with = EvalConfig {
        metrics_specs: vec![MetricsSpec {
            metrics: vec![MetricConfig::new("NDCG")],
            query_key: Some("session_id".to_string()),
            ..Default::default()
        }],
        ..Default::default()
    };
    assert!(validate_eval_config(&with).is_empty());
}

#[test]
fn test_ranking_name_in_custom_module_needs_no_query_key() {
    // A user-supplied metric may reuse a built-in ranking metric's name;
    // under an explicit non-built-in module it is not assumed to rank.
    let custom = EvalConfig {
        metrics_specs: vec![MetricsSpec {
            metrics: vec![MetricConfig {
                module: Some("my_company.metrics".to_string()),
                ..MetricConfig::new("NDCG")
            }],
            ..Default::default()
        }],
        ..Default::default()
    };
    assert!(validate_eval_config(&custom).is_empty());

    // Naming the built-in namespace explicitly keeps the requirement.
    let builtin = EvalConfig {
        metrics_specs: vec![MetricsSpec {
            metrics: vec![MetricConfig {
                module: Some("evaluar.metrics".to_string()),
                ..MetricConfig::new("NDCG")
            }],
            ..Default::default()
        }],
        ..Default::default()
    };
    assert!(has_issue(&builtin, |i| matches!(
        i,
        ValidationIssue::MissingQueryKey { class_name, .. } if class_name == "NDCG"
    )));
}

#[test]
fn test_thresholds_in_metric_name_maps_are_checked() {
    let mut metrics_spec = MetricsSpec::default();
    metrics_spec.thresholds.insert("loss".to_string(), MetricThreshold::default());
    let config = EvalConfig { metrics_specs: vec![metrics_spec], ..Default::default() };
    assert!(has_issue(&config, |i| matches!(
        i,
        ValidationIssue::EmptyMetricThreshold { site } if site.contains("thresholds[loss]")
    )));
}

#[test]
fn test_all_issues_reported_in_one_pass() {
    // One config, four distinct problems; the report must list them all.
    let mut a = named_model("dup");
    a.is_baseline = true;
    let mut b = named_model("dup");
    b.is_baseline = true;
    let config = EvalConfig {
        model_specs: vec![a, b],
        metrics_specs: vec![MetricsSpec {
            metrics: vec![MetricConfig::default()],
            aggregate: Some(AggregationOptions {
                average: Some(AggregationType::MacroAverage),
                ..Default::default()
            }),
            ..Default::default()
        }],
        ..Default::default()
    };
    let report = validate_eval_config(&config);
    assert!(report.len() >= 4, "expected at least 4 issues, got: {report}");
    let issues = report.issues();
    assert!(issues.iter().any(|i| matches!(i, ValidationIssue::MultipleBaselines { .. })));
    assert!(issues.iter().any(|i| matches!(i, ValidationIssue::DuplicateModelName { .. })));
    assert!(issues
        .iter()
        .any(|i| matches!(i, ValidationIssue::AggregationRequiresBinarization { .. })));
    assert!(issues.iter().any(|i| matches!(i, ValidationIssue::EmptyMetricClassName { .. })));
}

#[test]
fn test_eval_run_version_gate() {
    let mut run = EvalRun {
        eval_config: EvalConfig::default(),
        version: "1.0".to_string(),
        ..Default::default()
    };
    assert!(validate_eval_run(&run).is_empty());

    run.version = "2.0".to_string();
    let report = validate_eval_run(&run);
    assert!(report.issues().iter().any(|i| matches!(
        i,
        ValidationIssue::UnsupportedRunVersion { version, .. } if version == "2.0"
    )));
}

#[test]
fn test_eval_run_model_locations_must_name_declared_models() {
    let run = EvalRun {
        eval_config: EvalConfig {
            model_specs: vec![named_model("candidate")],
            ..Default::default()
        },
        version: "1.0".to_string(),
        model_locations: HashMap::from([
            ("candidate".to_string(), "/models/candidate".to_string()),
            ("ghost".to_string(), "/models/ghost".to_string()),
        ]),
        ..Default::default()
    };
    let report = validate_eval_run(&run);
    assert_eq!(report.len(), 1);
    assert!(matches!(
        &report.issues()[0],
        ValidationIssue::UnknownModelLocation { name } if name == "ghost"
    ));
}
