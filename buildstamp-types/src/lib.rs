//! Shared DTOs for the buildstamp workspace.
//!
//! # Design constraints
//! - `Version` serializes as its canonical dotted string; the on-disk
//!   version file and the generated stamp files both carry that form.
//! - `Metadata` field order is load-bearing: the metadata stamp file is
//!   meant to be human-diffable, so fields serialize in declaration order.

pub mod ecosystem;
pub mod metadata;
pub mod plan;
pub mod version;

pub use ecosystem::{EcosystemSpec, PostProcess, builtin_ecosystems};
pub use metadata::Metadata;
pub use plan::BuildPlan;
pub use version::{Version, VersionError, VersionPart};
