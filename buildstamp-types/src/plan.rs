use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

/// A fully resolved build invocation.
///
/// Transient: produced by the orchestrator for one build and discarded. All
/// placeholder substitution and ecosystem post-processing has already
/// happened; `argv` is spawnable as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildPlan {
    /// Ecosystem the plan was rendered for.
    pub ecosystem: String,
    /// `{app_name}-v{version}`.
    pub exe_name: String,
    /// Concrete argument vector, program first.
    pub argv: Vec<String>,
    /// Where the built artifact is expected to land.
    pub expected_output: Utf8PathBuf,
}

impl BuildPlan {
    /// Shell-style rendering for status lines and logs.
    pub fn command_line(&self) -> String {
        self.argv.join(" ")
    }
}
