//! Static build configuration.
//!
//! Constructed once at startup (defaults merged with `buildstamp.toml` by
//! the CLI) and passed by reference everywhere; nothing mutates it after
//! construction.

use camino::Utf8PathBuf;

use buildstamp_types::{EcosystemSpec, builtin_ecosystems};

/// Process-lifetime, read-only build configuration.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Application name; the executable is named `{app_name}-v{version}`.
    pub app_name: String,
    /// Main entry artifact handed to the build tool.
    pub main_script: Utf8PathBuf,
    /// Optional icon, consumed only by ecosystems with an icon rewrite.
    pub icon: Option<Utf8PathBuf>,
    /// Backing file for the version store.
    pub version_file: Utf8PathBuf,
    /// Scratch directory for the build tool.
    pub build_dir: Utf8PathBuf,
    /// Where finished artifacts land.
    pub dist_dir: Utf8PathBuf,

    /// Write the version-stamp module during prepare.
    pub stamp_version: bool,
    /// Path of the version-stamp module, relative to the project root.
    pub version_module: Utf8PathBuf,
    /// Write the metadata module during prepare.
    pub stamp_metadata: bool,
    /// Path of the metadata module, relative to the project root.
    pub metadata_module: Utf8PathBuf,

    pub author: String,
    pub description: String,
    pub company: String,
    pub copyright: String,

    /// Identifier selecting the command template to run.
    pub ecosystem: String,
    /// Known ecosystems, built-ins plus config-file additions. Later entries
    /// with the same id shadow earlier ones.
    pub ecosystems: Vec<EcosystemSpec>,
}

impl BuildConfig {
    /// The ecosystem spec selected by `self.ecosystem`, if any. Lookup is
    /// last-match so config-file overrides win over built-ins.
    pub fn selected_ecosystem(&self) -> Option<&EcosystemSpec> {
        self.ecosystems
            .iter()
            .rev()
            .find(|e| e.id == self.ecosystem)
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            app_name: "App".to_string(),
            main_script: Utf8PathBuf::from("main.py"),
            icon: None,
            version_file: Utf8PathBuf::from("version.txt"),
            build_dir: Utf8PathBuf::from("build"),
            dist_dir: Utf8PathBuf::from("dist"),
            stamp_version: true,
            version_module: Utf8PathBuf::from("version.py"),
            stamp_metadata: true,
            metadata_module: Utf8PathBuf::from("config_data.py"),
            author: "Your Name".to_string(),
            description: "App Description".to_string(),
            company: "Your Company".to_string(),
            copyright: "Copyright © 2025".to_string(),
            ecosystem: "python".to_string(),
            ecosystems: builtin_ecosystems(),
        }
    }
}
