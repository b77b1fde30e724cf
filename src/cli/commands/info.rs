//! Info command implementation

use crate::cli::logging::log;
use crate::cli::LogLevel;
use crate::config::{load_eval_config, InfoArgs, OutputFormat};

pub fn run_info(args: InfoArgs, level: LogLevel) -> Result<(), String> {
    let config = load_eval_config(&args.config).map_err(|e| format!("Config error: {e}"))?;

    match args.format {
        OutputFormat::Text => {
            log(level, LogLevel::Normal, "Configuration Info:");
            println!();
            println!("Models: {}", config.model_specs.len());
            if let Some(baseline) = config.baseline_model() {
                println!("Baseline: {}", baseline.name);
            }
            println!("Slices: {}", config.slicing_specs.len());
            println!("Cross-slice comparisons: {}", config.cross_slicing_specs.len());
            let metric_count: usize =
                config.metrics_specs.iter().map(|s| s.metrics.len()).sum();
            println!("Metrics: {metric_count}");

            if let Some(options) = &config.options {
                if options.confidence_intervals_enabled() {
                    println!("Confidence intervals: enabled");
                }
                if let Some(min) = options.min_slice_size {
                    println!("Min slice size: {min}");
                }
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&config)
                .map_err(|e| format!("JSON serialization error: {e}"))?;
            println!("{json}");
        }
        OutputFormat::Yaml => {
            let yaml = serde_yaml::to_string(&config)
                .map_err(|e| format!("YAML serialization error: {e}"))?;
            println!("{yaml}");
        }
    }

    Ok(())
}
