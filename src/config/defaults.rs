//! Normalization: fills the gaps a hand-written config is allowed to
//! leave, before validation runs.

use super::eval::EvalConfig;

/// Normalize a config in place.
///
/// Two rewrites, both idempotent:
/// 1. Every slice referenced by cross-slicing specs or by per-slice /
///    cross-slice thresholds that is not declared in `slicing_specs` is
///    appended to it, in first-reference order.
/// 2. A metrics spec with an empty `model_names` scope is widened to all
///    declared model names, provided the config names its models (a
///    single anonymous model stays anonymous).
///
/// This is the only sanctioned mutation of an [`EvalConfig`]; consumers
/// treat the result as immutable.
pub fn update_eval_config_with_defaults(config: &mut EvalConfig) {
    for spec in config.referenced_slices() {
        if !config.declares_slice(&spec) {
            config.slicing_specs.push(spec);
        }
    }

    let names: Vec<String> = config
        .model_specs
        .iter()
        .map(|m| m.name.clone())
        .filter(|n| !n.is_empty())
        .collect();
    if !names.is_empty() {
        for metrics_spec in &mut config.metrics_specs {
            if metrics_spec.model_names.is_empty() {
                metrics_spec.model_names = names.clone();
            }
        }
    }
}
