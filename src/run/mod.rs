//! Run-record persistence.
//!
//! An [`EvalRun`] is stored as one pretty-printed JSON file. Loading
//! parses the file twice: first as the two-field
//! [`EvalConfigAndVersion`] prefix to gate on schema version, then as the
//! full record. The structural compatibility between the two shapes (see
//! [`crate::compat`]) is what makes the cheap first parse sound.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{EvalConfig, EvalConfigAndVersion, EvalRun};
use crate::error::{Error, Result};
use crate::{SCHEMA_VERSION, SUPPORTED_VERSIONS};

impl EvalRun {
    /// Build a run record for the current schema version.
    #[must_use]
    pub fn new(
        eval_config: EvalConfig,
        data_location: impl Into<String>,
        file_format: impl Into<String>,
    ) -> Self {
        Self {
            eval_config,
            version: SCHEMA_VERSION.to_string(),
            data_location: data_location.into(),
            file_format: file_format.into(),
            model_locations: Default::default(),
        }
    }

    /// Write the record as pretty JSON, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| {
                    Error::io(format!("creating run directory {}", parent.display()), e)
                })?;
            }
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
            .map_err(|e| Error::io(format!("writing run record {}", path.display()), e))
    }

    /// Load a record, gating on schema version first.
    ///
    /// The version gate reads the file as an [`EvalConfigAndVersion`], so
    /// an unsupported record is rejected before its full shape (which a
    /// newer version may have extended) is ever parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(Error::ConfigNotFound { path: path.to_path_buf() });
        }
        let raw = fs::read_to_string(path)
            .map_err(|e| Error::io(format!("reading run record {}", path.display()), e))?;

        let gate: EvalConfigAndVersion =
            serde_json::from_str(&raw).map_err(|e| Error::ConfigParsing {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        if !SUPPORTED_VERSIONS.contains(&gate.version.as_str()) {
            return Err(Error::UnsupportedVersion {
                version: gate.version,
                supported: SUPPORTED_VERSIONS.join(", "),
            });
        }

        serde_json::from_str(&raw).map_err(|e| Error::ConfigParsing {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

/// Load every `.json` run record in a directory, sorted by file name.
///
/// A missing directory is an empty list, not an error.
pub fn list_runs(dir: impl AsRef<Path>) -> Result<Vec<(PathBuf, EvalRun)>> {
    let dir = dir.as_ref();
    if !dir.exists() {
        return Ok(Vec::new());
    }
    let entries = fs::read_dir(dir)
        .map_err(|e| Error::io(format!("listing run directory {}", dir.display()), e))?;

    let mut runs = Vec::new();
    for entry in entries {
        let entry =
            entry.map_err(|e| Error::io(format!("listing run directory {}", dir.display()), e))?;
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) == Some("json") {
            let run = EvalRun::load(&path)?;
            runs.push((path, run));
        }
    }
    runs.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(runs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ModelSpec;

    fn sample_run() -> EvalRun {
        let config = EvalConfig {
            model_specs: vec![ModelSpec { name: "candidate".to_string(), ..Default::default() }],
            ..Default::default()
        };
        let mut run = EvalRun::new(config, "/data/eval.parquet", "parquet");
        run.model_locations
            .insert("candidate".to_string(), "/models/candidate".to_string());
        run
    }

    #[test]
    fn test_new_stamps_current_version() {
        let run = sample_run();
        assert_eq!(run.version, SCHEMA_VERSION);
        assert!(SUPPORTED_VERSIONS.contains(&run.version.as_str()));
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("runs").join("run-001.json");
        let run = sample_run();

        run.save(&path).unwrap();
        let back = EvalRun::load(&path).unwrap();
        assert_eq!(run, back);
    }

    #[test]
    fn test_load_rejects_unsupported_version() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.json");
        let mut run = sample_run();
        run.version = "99.0".to_string();
        run.save(&path).unwrap();

        let err = EvalRun::load(&path).unwrap_err();
        match err {
            Error::UnsupportedVersion { version, .. } => assert_eq!(version, "99.0"),
            other => panic!("expected UnsupportedVersion, got {other}"),
        }
    }

    #[test]
    fn test_load_missing_record() {
        let err = EvalRun::load("/no/such/run.json").unwrap_err();
        assert!(matches!(err, Error::ConfigNotFound { .. }));
    }

    #[test]
    fn test_config_and_version_file_loads_as_run() {
        // A file written in the two-field shape parses as a full record
        // with the extra fields at their defaults.
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pair.json");
        let pair = EvalConfigAndVersion {
            eval_config: EvalConfig::default(),
            version: SCHEMA_VERSION.to_string(),
        };
        fs::write(&path, serde_json::to_string_pretty(&pair).unwrap()).unwrap();

        let run = EvalRun::load(&path).unwrap();
        assert_eq!(run.version, SCHEMA_VERSION);
        assert!(run.data_location.is_empty());
        assert!(run.model_locations.is_empty());
    }

    #[test]
    fn test_list_runs_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        sample_run().save(dir.path().join("b.json")).unwrap();
        sample_run().save(dir.path().join("a.json")).unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let runs = list_runs(dir.path()).unwrap();
        assert_eq!(runs.len(), 2);
        assert!(runs[0].0.ends_with("a.json"));
        assert!(runs[1].0.ends_with("b.json"));
    }

    #[test]
    fn test_list_runs_missing_dir_is_empty() {
        assert!(list_runs("/no/such/dir").unwrap().is_empty());
    }
}
