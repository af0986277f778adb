//! Error types for buildstamp-build.
//!
//! Builds fail loudly and immediately: every variant here is fatal to the
//! run, and `exit_code` is what the process should exit with so that a
//! failing underlying tool's status survives to the caller.

use thiserror::Error;

/// The top-level error type for orchestrator operations.
#[derive(Debug, Error)]
pub enum BuildError {
    /// The configured ecosystem has no command template.
    #[error("unsupported ecosystem: '{ecosystem}'")]
    UnsupportedEcosystem {
        /// The ecosystem identifier that had no template.
        ecosystem: String,
    },

    /// The build command could not be spawned at all.
    #[error("failed to spawn build command '{command}': {source}")]
    Spawn {
        /// The command line that failed to start.
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// The build command ran and exited non-zero (or was killed).
    #[error("build command '{command}' failed with exit code {}", .code.map_or("unknown".to_string(), |c| c.to_string()))]
    CommandFailed {
        /// The command line that failed.
        command: String,
        /// The child's exit code, when the platform reports one.
        code: Option<i32>,
    },

    /// Filesystem or other runtime failure while preparing the build.
    #[error(transparent)]
    Runtime(#[from] anyhow::Error),
}

impl BuildError {
    /// The process exit code for this error. A failed build command
    /// propagates the child's own exit code where obtainable.
    pub fn exit_code(&self) -> u8 {
        match self {
            BuildError::CommandFailed { code: Some(c), .. } if (1..=255).contains(c) => *c as u8,
            _ => 1,
        }
    }
}

/// Result type alias using BuildError.
pub type BuildResult<T> = Result<T, BuildError>;
