//! Property-based tests for configuration validation.

use proptest::prelude::*;

use super::{validate_eval_config, ValidationIssue};
use crate::config::{
    EvalConfig, GenericChangeThreshold, GenericValueThreshold, MetricConfig, MetricDirection,
    MetricThreshold, MetricsSpec, ModelSpec, SlicingSpec,
};

fn arb_known_metric() -> impl Strategy<Value = MetricConfig> {
    prop_oneof![
        Just("AUC"),
        Just("Precision"),
        Just("Recall"),
        Just("ExampleCount"),
        Just("MeanLabel"),
    ]
    .prop_map(MetricConfig::new)
}

fn arb_valid_config() -> impl Strategy<Value = EvalConfig> {
    (
        proptest::collection::vec("[a-z]{3,8}", 1..4),
        proptest::collection::vec(arb_known_metric(), 0..4),
    )
        .prop_map(|(mut names, metrics)| {
            names.sort();
            names.dedup();
            let model_specs: Vec<ModelSpec> = names
                .iter()
                .enumerate()
                .map(|(i, name)| ModelSpec {
                    name: name.clone(),
                    is_baseline: i == 0 && names.len() > 1,
                    ..Default::default()
                })
                .collect();
            EvalConfig {
                model_specs,
                slicing_specs: vec![SlicingSpec::overall()],
                metrics_specs: vec![MetricsSpec {
                    metrics,
                    model_names: names,
                    ..Default::default()
                }],
                ..Default::default()
            }
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn prop_valid_config_passes(config in arb_valid_config()) {
        let report = validate_eval_config(&config);
        prop_assert!(report.is_empty(), "{report}");
    }

    #[test]
    fn prop_second_baseline_always_flagged(config in arb_valid_config()) {
        let mut config = config;
        config.model_specs.push(ModelSpec {
            name: "extra_baseline".to_string(),
            is_baseline: true,
            ..Default::default()
        });
        config.model_specs.push(ModelSpec {
            name: "another_baseline".to_string(),
            is_baseline: true,
            ..Default::default()
        });
        let report = validate_eval_config(&config);
        let flagged = report
            .issues()
            .iter()
            .any(|i| matches!(i, ValidationIssue::MultipleBaselines { .. }));
        prop_assert!(flagged, "expected a multiple-baselines issue, got: {}", report);
    }

    #[test]
    fn prop_inverted_bounds_flagged_iff_lower_above_upper(
        config in arb_valid_config(),
        lower in -10.0f64..10.0,
        upper in -10.0f64..10.0,
    ) {
        let mut config = config;
        config.metrics_specs[0].metrics.push(MetricConfig {
            threshold: Some(MetricThreshold {
                value_threshold: Some(GenericValueThreshold {
                    lower_bound: Some(lower),
                    upper_bound: Some(upper),
                }),
                ..Default::default()
            }),
            ..MetricConfig::new("AUC")
        });
        let report = validate_eval_config(&config);
        let flagged = report
            .issues()
            .iter()
            .any(|i| matches!(i, ValidationIssue::UnsatisfiableValueThreshold { .. }));
        prop_assert_eq!(flagged, lower > upper);
    }

    #[test]
    fn prop_value_check_agrees_with_bounds(
        lower in -10.0f64..10.0,
        width in 0.0f64..5.0,
        value in -20.0f64..20.0,
    ) {
        let threshold = GenericValueThreshold {
            lower_bound: Some(lower),
            upper_bound: Some(lower + width),
        };
        prop_assert_eq!(threshold.check(value), value >= lower && value <= lower + width);
    }

    #[test]
    fn prop_change_gate_respects_absolute_slack(
        baseline in -1.0f64..1.0,
        slack in 0.0f64..0.5,
        margin in 0.001f64..0.5,
    ) {
        let gate = GenericChangeThreshold {
            direction: MetricDirection::HigherIsBetter,
            absolute: Some(slack),
            relative: None,
        };
        // Clearly above the slack passes, clearly below it fails. The
        // margin keeps the assertion away from float-rounding territory.
        prop_assert!(gate.check(baseline, baseline + slack + margin));
        prop_assert!(!gate.check(baseline, baseline + slack - margin));
    }

    #[test]
    fn prop_lower_is_better_mirrors_higher(
        baseline in -1.0f64..1.0,
        slack in 0.0f64..0.5,
        delta in -1.0f64..1.0,
    ) {
        // Keep the sampled delta clear of the decision boundary so float
        // rounding in baseline + delta cannot flip the expected verdict.
        prop_assume!((delta - slack).abs() > 1e-6);

        let higher = GenericChangeThreshold {
            direction: MetricDirection::HigherIsBetter,
            absolute: Some(slack),
            relative: None,
        };
        let lower = GenericChangeThreshold {
            direction: MetricDirection::LowerIsBetter,
            absolute: Some(slack),
            relative: None,
        };
        prop_assert_eq!(
            higher.check(baseline, baseline + delta),
            delta > slack
        );
        prop_assert_eq!(
            lower.check(baseline, baseline + delta),
            delta < slack
        );
    }
}
