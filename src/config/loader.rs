//! Config file I/O: YAML or JSON, chosen by extension.

use std::fs;
use std::path::Path;

use super::eval::EvalConfig;
use crate::error::{Error, Result};

/// Load an [`EvalConfig`] from a `.yaml`/`.yml` or `.json` file.
///
/// Parse errors carry the path and the underlying message; they do not
/// validate cross-field invariants (see
/// [`validate_eval_config`](crate::validate::validate_eval_config)).
pub fn load_eval_config(path: impl AsRef<Path>) -> Result<EvalConfig> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::ConfigNotFound { path: path.to_path_buf() });
    }
    let raw = fs::read_to_string(path)
        .map_err(|e| Error::io(format!("reading config {}", path.display()), e))?;

    match extension(path) {
        Some("yaml" | "yml") => serde_yaml::from_str(&raw).map_err(|e| Error::ConfigParsing {
            path: path.to_path_buf(),
            message: e.to_string(),
        }),
        Some("json") => serde_json::from_str(&raw).map_err(|e| Error::ConfigParsing {
            path: path.to_path_buf(),
            message: e.to_string(),
        }),
        _ => Err(Error::UnsupportedFormat { path: path.to_path_buf() }),
    }
}

/// Save an [`EvalConfig`] in the format the extension names.
///
/// YAML output follows serde_yaml's block style; JSON output is
/// pretty-printed.
pub fn save_eval_config(config: &EvalConfig, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let rendered = match extension(path) {
        Some("yaml" | "yml") => serde_yaml::to_string(config)?,
        Some("json") => serde_json::to_string_pretty(config)?,
        _ => return Err(Error::UnsupportedFormat { path: path.to_path_buf() }),
    };
    fs::write(path, rendered)
        .map_err(|e| Error::io(format!("writing config {}", path.display()), e))
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|e| e.to_str())
}
