//! Configuration file loading for buildstamp.
//!
//! Discovers and loads `buildstamp.toml` from the project root, then folds
//! it over the literal defaults to produce the immutable [`BuildConfig`]
//! handed to the orchestrator.

use std::collections::BTreeMap;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use serde::Deserialize;
use tracing::debug;

use buildstamp_build::BuildConfig;
use buildstamp_types::{EcosystemSpec, PostProcess};

/// The config file name to search for.
pub const CONFIG_FILE_NAME: &str = "buildstamp.toml";

/// Top-level configuration from buildstamp.toml. Every field is optional;
/// absent keys keep the built-in defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Build settings (app name, entry script, directories, ecosystem).
    pub build: BuildSection,

    /// Metadata embedded in the generated config module.
    pub metadata: MetadataSection,

    /// Stamp-file generation flags and paths.
    pub stamp: StampSection,

    /// Extra or overriding command templates, keyed by ecosystem id.
    pub commands: BTreeMap<String, Vec<String>>,
}

/// `[build]` section of the config.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BuildSection {
    pub app_name: Option<String>,
    pub main_script: Option<Utf8PathBuf>,
    pub icon: Option<Utf8PathBuf>,
    pub version_file: Option<Utf8PathBuf>,
    pub build_dir: Option<Utf8PathBuf>,
    pub dist_dir: Option<Utf8PathBuf>,
    pub ecosystem: Option<String>,
}

/// `[metadata]` section of the config.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MetadataSection {
    pub author: Option<String>,
    pub description: Option<String>,
    pub company: Option<String>,
    pub copyright: Option<String>,
}

/// `[stamp]` section of the config.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct StampSection {
    /// Generate the version module.
    pub version: Option<bool>,
    pub version_module: Option<Utf8PathBuf>,
    /// Generate the metadata module.
    pub metadata: Option<bool>,
    pub metadata_module: Option<Utf8PathBuf>,
}

/// Discover the buildstamp.toml config file at the project root.
pub fn discover_config(project_root: &Utf8Path) -> Option<Utf8PathBuf> {
    let config_path = project_root.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        debug!("found config file at {}", config_path);
        Some(config_path)
    } else {
        debug!("no config file found at {}", config_path);
        None
    }
}

/// Load and parse a buildstamp.toml config file.
pub fn load_config(path: &Utf8Path) -> anyhow::Result<FileConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config file {}", path))?;
    parse_config(&contents).with_context(|| format!("parse config file {}", path))
}

/// Parse a config file from a string.
pub fn parse_config(contents: &str) -> anyhow::Result<FileConfig> {
    let config: FileConfig = toml::from_str(contents).context("invalid TOML")?;
    Ok(config)
}

/// Load config from the project root, or return defaults if not found.
pub fn load_or_default(project_root: &Utf8Path) -> anyhow::Result<FileConfig> {
    match discover_config(project_root) {
        Some(path) => load_config(&path),
        None => Ok(FileConfig::default()),
    }
}

impl FileConfig {
    /// Fold this file config over the literal defaults.
    ///
    /// `[commands]` entries are appended after the built-ins, so a template
    /// reusing a built-in id shadows it (last match wins). Only the `python`
    /// id keeps the icon rewrite.
    pub fn into_build_config(self) -> BuildConfig {
        let mut config = BuildConfig::default();

        if let Some(v) = self.build.app_name {
            config.app_name = v;
        }
        if let Some(v) = self.build.main_script {
            config.main_script = v;
        }
        if self.build.icon.is_some() {
            config.icon = self.build.icon;
        }
        if let Some(v) = self.build.version_file {
            config.version_file = v;
        }
        if let Some(v) = self.build.build_dir {
            config.build_dir = v;
        }
        if let Some(v) = self.build.dist_dir {
            config.dist_dir = v;
        }
        if let Some(v) = self.build.ecosystem {
            config.ecosystem = v;
        }

        if let Some(v) = self.metadata.author {
            config.author = v;
        }
        if let Some(v) = self.metadata.description {
            config.description = v;
        }
        if let Some(v) = self.metadata.company {
            config.company = v;
        }
        if let Some(v) = self.metadata.copyright {
            config.copyright = v;
        }

        if let Some(v) = self.stamp.version {
            config.stamp_version = v;
        }
        if let Some(v) = self.stamp.version_module {
            config.version_module = v;
        }
        if let Some(v) = self.stamp.metadata {
            config.stamp_metadata = v;
        }
        if let Some(v) = self.stamp.metadata_module {
            config.metadata_module = v;
        }

        for (id, template) in self.commands {
            let post = if id == "python" {
                PostProcess::IconFlags
            } else {
                PostProcess::None
            };
            config.ecosystems.push(EcosystemSpec { id, template, post });
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn parse_full_config() {
        let contents = r#"
[build]
app_name = "PyNetSys"
main_script = "main.py"
icon = "icon.ico"
version_file = "version.txt"
build_dir = "build"
dist_dir = "dist"
ecosystem = "python"

[metadata]
author = "Someone"
description = "Network tool"
company = "Acme"
copyright = "Copyright © 2025"

[stamp]
version = true
version_module = "version.py"
metadata = false

[commands]
zig = ["zig", "build-exe", "{main_script}"]
"#;
        let config = parse_config(contents).unwrap();
        assert_eq!(config.build.app_name.as_deref(), Some("PyNetSys"));
        assert_eq!(config.metadata.company.as_deref(), Some("Acme"));
        assert_eq!(config.stamp.metadata, Some(false));
        assert_eq!(config.commands["zig"][0], "zig");
    }

    #[test]
    fn parse_empty_config_is_all_defaults() {
        let config = parse_config("").unwrap();
        let build = config.into_build_config();
        let defaults = BuildConfig::default();
        assert_eq!(build.app_name, defaults.app_name);
        assert_eq!(build.ecosystem, defaults.ecosystem);
        assert_eq!(build.ecosystems.len(), defaults.ecosystems.len());
    }

    #[test]
    fn commands_shadow_builtins() {
        let contents = r#"
[commands]
python = ["echo", "{exe_name}"]
"#;
        let build = parse_config(contents).unwrap().into_build_config();
        let eco = build.selected_ecosystem().expect("python");
        assert_eq!(eco.template, vec!["echo", "{exe_name}"]);
        // Shadowing python keeps the icon rewrite.
        assert_eq!(eco.post, PostProcess::IconFlags);
    }

    #[test]
    fn custom_command_gets_no_post_processing() {
        let contents = r#"
[build]
ecosystem = "zig"

[commands]
zig = ["zig", "build-exe", "{main_script}"]
"#;
        let build = parse_config(contents).unwrap().into_build_config();
        let eco = build.selected_ecosystem().expect("zig");
        assert_eq!(eco.post, PostProcess::None);
    }

    #[test]
    fn discover_config_some_and_none() {
        let temp = TempDir::new().expect("temp dir");
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf8");
        assert!(discover_config(&root).is_none());

        std::fs::write(root.join(CONFIG_FILE_NAME), "").expect("write config");
        assert!(discover_config(&root).is_some());
    }

    #[test]
    fn load_or_default_returns_default_when_missing() {
        let temp = TempDir::new().expect("temp dir");
        let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf8");
        let config = load_or_default(&root).expect("load default");
        assert!(config.build.app_name.is_none());
        assert!(config.commands.is_empty());
    }
}
