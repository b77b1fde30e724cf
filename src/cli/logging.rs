//! CLI output levels.

/// How chatty the CLI should be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Errors only.
    Quiet,
    /// Default output.
    Normal,
    /// Extra detail, e.g. per-issue context during validation.
    Verbose,
}

impl LogLevel {
    /// Derive the level from the global `--quiet`/`--verbose` flags;
    /// quiet wins when both are set.
    #[must_use]
    pub fn from_flags(quiet: bool, verbose: bool) -> Self {
        if quiet {
            LogLevel::Quiet
        } else if verbose {
            LogLevel::Verbose
        } else {
            LogLevel::Normal
        }
    }
}

/// Print a message when the current level permits it. Normal-priority
/// messages also show at verbose; verbose-only messages need `-v`.
pub fn log(level: LogLevel, required: LogLevel, msg: &str) {
    if level != LogLevel::Quiet && (level == required || required == LogLevel::Normal) {
        println!("{msg}");
    }
}
