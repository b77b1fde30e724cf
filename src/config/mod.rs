//! The evaluation configuration schema.
//!
//! Record types mirror the serialized config shape one-to-one; every type
//! round-trips through serde (YAML for hand-written configs, JSON for run
//! records). Cross-field invariants live in [`crate::validate`], not in
//! the types, so a structurally well-formed file always parses and every
//! problem can be reported at once.

mod aggregation;
mod cli;
mod defaults;
mod eval;
mod loader;
mod metrics;
mod model;
mod options;
mod slicing;
mod threshold;

pub use aggregation::{AggregationOptions, AggregationType, BinarizationOptions};
pub use cli::{
    parse_args, Cli, Command, InfoArgs, InitArgs, InitTemplate, OutputFormat, ValidateArgs,
};
pub use defaults::update_eval_config_with_defaults;
pub use eval::{EvalConfig, EvalConfigAndVersion, EvalRun};
pub use loader::{load_eval_config, save_eval_config};
pub use metrics::{MetricConfig, MetricsSpec};
pub use model::{ModelSpec, DEFAULT_OUTPUT, VALID_MODEL_TYPES};
pub use options::{ConfidenceIntervalMethod, Options};
pub use slicing::{CrossSlicingSpec, FeatureValue, SlicingSpec};
pub use threshold::{
    CrossSliceMetricThreshold, GenericChangeThreshold, GenericValueThreshold, MetricDirection,
    MetricThreshold, PerSliceMetricThreshold,
};
