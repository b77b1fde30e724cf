//! Validate command implementation

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{
    load_eval_config, update_eval_config_with_defaults, EvalConfig, ValidateArgs,
};
use crate::validate::validate_eval_config;

/// Format model specs as a string
pub fn format_models_info(config: &EvalConfig) -> String {
    if config.model_specs.is_empty() {
        return "  Models: (none declared)".to_string();
    }
    let mut lines = vec![format!("  Models: {}", config.model_specs.len())];
    for model in &config.model_specs {
        let name = if model.name.is_empty() { "(default)" } else { model.name.as_str() };
        let mut line = format!("    {name}");
        if model.is_baseline {
            line.push_str(" [baseline]");
        }
        if !model.model_type.is_empty() {
            line.push_str(&format!(" ({})", model.model_type));
        }
        lines.push(line);
    }
    lines.join("\n")
}

/// Format slicing declarations as a string
pub fn format_slicing_info(config: &EvalConfig) -> String {
    let mut lines = vec![format!("  Slices: {}", config.slicing_specs.len())];
    for spec in &config.slicing_specs {
        lines.push(format!("    {spec}"));
    }
    if !config.cross_slicing_specs.is_empty() {
        lines.push(format!("  Cross-slice comparisons: {}", config.cross_slicing_specs.len()));
    }
    lines.join("\n")
}

/// Format metrics specs as a string
pub fn format_metrics_info(config: &EvalConfig) -> String {
    let mut lines = Vec::new();
    for (i, spec) in config.metrics_specs.iter().enumerate() {
        lines.push(format!("  Metrics spec {i}:"));
        for metric in &spec.metrics {
            lines.push(format!("    {}", metric.class_name));
        }
        if !spec.model_names.is_empty() {
            lines.push(format!("    scope: {}", spec.model_names.join(", ")));
        }
        if let Some(binarize) = &spec.binarize {
            lines.push(format!("    binarize: {} variants", binarize.variant_count()));
        }
        if spec.aggregate.is_some() {
            lines.push("    aggregate: set".to_string());
        }
    }
    if lines.is_empty() {
        lines.push("  Metrics: (none declared)".to_string());
    }
    lines.join("\n")
}

/// Print detailed configuration summary
pub fn print_detailed_summary(config: &EvalConfig) {
    println!();
    println!("Configuration Summary:");
    println!("{}", format_models_info(config));
    println!();
    println!("{}", format_slicing_info(config));
    println!();
    println!("{}", format_metrics_info(config));
}

pub fn run_validate(args: ValidateArgs, level: LogLevel) -> Result<(), String> {
    log(
        level,
        LogLevel::Normal,
        &format!("Validating config: {}", args.config.display()),
    );

    let mut config = load_eval_config(&args.config).map_err(|e| format!("Config error: {e}"))?;
    update_eval_config_with_defaults(&mut config);

    let report = validate_eval_config(&config);
    if let Err(report) = report.into_result() {
        return Err(report.to_string());
    }

    log(level, LogLevel::Normal, "Configuration is valid");

    if args.detailed {
        print_detailed_summary(&config);
    }

    Ok(())
}
