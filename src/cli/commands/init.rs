//! Init command implementation
//!
//! Generates starter configurations that pass validation as written, so a
//! new project begins from a known-good file rather than an empty one.

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{
    EvalConfig, GenericChangeThreshold, GenericValueThreshold, InitArgs, InitTemplate,
    MetricConfig, MetricDirection, MetricThreshold, MetricsSpec, ModelSpec, Options,
    PerSliceMetricThreshold, SlicingSpec,
};

/// Build the config a template describes.
pub fn generate_template(template: InitTemplate, name: &str) -> EvalConfig {
    match template {
        InitTemplate::Minimal => minimal_template(name),
        InitTemplate::Thresholds => thresholds_template(name),
    }
}

/// One model, the overall slice, example count and AUC.
fn minimal_template(name: &str) -> EvalConfig {
    EvalConfig {
        model_specs: vec![ModelSpec {
            name: name.to_string(),
            label_key: Some("label".to_string()),
            ..Default::default()
        }],
        slicing_specs: vec![SlicingSpec::overall()],
        metrics_specs: vec![MetricsSpec {
            metrics: vec![MetricConfig::new("ExampleCount"), MetricConfig::new("AUC")],
            model_names: vec![name.to_string()],
            ..Default::default()
        }],
        ..Default::default()
    }
}

/// Candidate vs baseline with a value gate and a change gate on AUC,
/// including a per-slice binding.
fn thresholds_template(name: &str) -> EvalConfig {
    let mut country_slice = SlicingSpec::default();
    country_slice
        .feature_values
        .insert("country".to_string(), "nz".to_string());

    let gated_auc = MetricConfig {
        threshold: Some(MetricThreshold {
            value_threshold: Some(GenericValueThreshold {
                lower_bound: Some(0.7),
                upper_bound: None,
            }),
            // Zero slack: the candidate may match the baseline but not
            // regress below it.
            change_threshold: Some(GenericChangeThreshold {
                direction: MetricDirection::HigherIsBetter,
                absolute: Some(0.0),
                relative: None,
            }),
        }),
        per_slice_thresholds: vec![PerSliceMetricThreshold {
            slicing_specs: vec![country_slice.clone()],
            threshold: MetricThreshold {
                value_threshold: Some(GenericValueThreshold {
                    lower_bound: Some(0.6),
                    upper_bound: None,
                }),
                ..Default::default()
            },
        }],
        ..MetricConfig::new("AUC")
    };

    EvalConfig {
        model_specs: vec![
            ModelSpec {
                name: name.to_string(),
                label_key: Some("label".to_string()),
                ..Default::default()
            },
            ModelSpec {
                name: "baseline".to_string(),
                label_key: Some("label".to_string()),
                is_baseline: true,
                ..Default::default()
            },
        ],
        slicing_specs: vec![SlicingSpec::overall(), country_slice],
        metrics_specs: vec![MetricsSpec {
            metrics: vec![MetricConfig::new("ExampleCount"), gated_auc],
            model_names: vec![name.to_string(), "baseline".to_string()],
            ..Default::default()
        }],
        options: Some(Options {
            min_slice_size: Some(50),
            ..Default::default()
        }),
        ..Default::default()
    }
}

pub fn run_init(args: InitArgs, level: LogLevel) -> Result<(), String> {
    let config = generate_template(args.template, &args.name);
    let yaml =
        serde_yaml::to_string(&config).map_err(|e| format!("YAML serialization error: {e}"))?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, &yaml)
                .map_err(|e| format!("Failed to write {}: {e}", path.display()))?;
            log(
                level,
                LogLevel::Normal,
                &format!("Wrote {} template to {}", template_name(args.template), path.display()),
            );
        }
        None => print!("{yaml}"),
    }

    Ok(())
}

fn template_name(template: InitTemplate) -> &'static str {
    match template {
        InitTemplate::Minimal => "minimal",
        InitTemplate::Thresholds => "thresholds",
    }
}
