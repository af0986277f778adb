//! Build orchestration for buildstamp.
//!
//! Responsibilities:
//! - Render the selected ecosystem's command template into a concrete plan.
//! - Write the opt-in version/metadata stamp files.
//! - Run the build command and propagate its exit status.
//!
//! This crate owns *how* a build runs; the version state machine lives in
//! `buildstamp-store`.

mod config;
mod error;
mod orchestrator;
mod plan;

pub use config::BuildConfig;
pub use error::{BuildError, BuildResult};
pub use orchestrator::Orchestrator;
pub use plan::render_plan;
