//! Declarative model evaluation configuration.
//!
//! This crate owns the configuration side of a model evaluation pipeline:
//! - Schema records: model specs, slicing specs, metric declarations,
//!   thresholds, run options ([`config`])
//! - Exhaustive cross-field validation that reports every issue at once
//!   ([`validate`])
//! - Normalization that resolves slice references and fills default
//!   scopes ([`config::update_eval_config_with_defaults`])
//! - Wire-layout compatibility tables with permanent reserved-number
//!   denylists ([`compat`])
//! - Versioned run-record persistence ([`run`])
//!
//! Computing metrics, slicing data, and enforcing thresholds against
//! computed values is the evaluation engine's job; this crate hands it a
//! validated, normalized [`EvalConfig`] to consume as an immutable value.
//!
//! # Example
//!
//! ```
//! use evaluar::{update_eval_config_with_defaults, validate_eval_config, EvalConfig};
//!
//! let mut config: EvalConfig = serde_yaml::from_str(
//!     r#"
//! model_specs:
//!   - name: candidate
//!     label_key: label
//! slicing_specs:
//!   - {}
//! metrics_specs:
//!   - metrics:
//!       - class_name: AUC
//! "#,
//! )
//! .unwrap();
//!
//! update_eval_config_with_defaults(&mut config);
//! let report = validate_eval_config(&config);
//! assert!(report.is_empty());
//! ```

pub mod cli;
pub mod compat;
pub mod config;
pub mod error;
pub mod registry;
pub mod run;
pub mod validate;

pub use config::{
    load_eval_config, save_eval_config, update_eval_config_with_defaults, EvalConfig,
    EvalConfigAndVersion, EvalRun, MetricThreshold, MetricsSpec, ModelSpec, SlicingSpec,
};
pub use error::{Error, Result};
pub use validate::{validate_eval_config, validate_eval_run, ValidationReport};

/// Schema version written into new run records.
pub const SCHEMA_VERSION: &str = "1.0";

/// Schema versions this build can read.
pub const SUPPORTED_VERSIONS: &[&str] = &["1.0"];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_version_is_supported() {
        assert!(SUPPORTED_VERSIONS.contains(&SCHEMA_VERSION));
    }

    #[test]
    fn test_empty_config_is_valid() {
        let report = validate_eval_config(&EvalConfig::default());
        assert!(report.is_empty());
    }
}
