//! Exhaustive cross-field validation of evaluation configurations.
//!
//! Configs are authored once and run many times, so the validator collects
//! every violation it finds instead of stopping at the first. The result is
//! a [`ValidationReport`] listing all issues.

mod error;
mod validator;

#[cfg(test)]
mod tests;

#[cfg(test)]
mod proptests;

pub use error::{ValidationIssue, ValidationReport};
pub use validator::{validate_eval_config, validate_eval_run};
