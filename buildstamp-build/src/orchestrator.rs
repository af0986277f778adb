//! The build orchestrator: stamp files, output directories, one child
//! process.

use std::process::Command;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use tracing::debug;

use buildstamp_types::{BuildPlan, Metadata, Version};

use crate::config::BuildConfig;
use crate::error::{BuildError, BuildResult};
use crate::plan::render_plan;

/// Turns config + version into generated stamp files and one executed build
/// command. Linear control flow; any failure aborts the run.
#[derive(Debug)]
pub struct Orchestrator<'a> {
    project_root: Utf8PathBuf,
    config: &'a BuildConfig,
    version: Version,
}

impl<'a> Orchestrator<'a> {
    pub fn new(project_root: impl Into<Utf8PathBuf>, config: &'a BuildConfig, version: Version) -> Self {
        Self {
            project_root: project_root.into(),
            config,
            version,
        }
    }

    /// Write the opt-in stamp files. Both are unconditional overwrites: no
    /// merge with prior content, no backup. Failure here is fatal and
    /// happens before any subprocess is spawned.
    pub fn prepare(&self) -> BuildResult<()> {
        if self.config.stamp_version {
            let path = self.project_root.join(&self.config.version_module);
            fs::write(&path, format!("__version__ = \"{}\"\n", self.version))
                .with_context(|| format!("write version module {}", path))?;
            println!("[+] Version embedded: {}", path);
        }

        if self.config.stamp_metadata {
            let path = self.project_root.join(&self.config.metadata_module);
            let meta = Metadata {
                author: self.config.author.clone(),
                description: self.config.description.clone(),
                company: self.config.company.clone(),
                copyright: self.config.copyright.clone(),
                version: self.version,
            };
            fs::write(&path, format!("config = {}\n", meta.render()))
                .with_context(|| format!("write metadata module {}", path))?;
            println!("[+] Config embedded: {}", path);
        }

        Ok(())
    }

    /// Resolve the plan for the configured ecosystem without running it.
    pub fn plan(&self) -> BuildResult<BuildPlan> {
        render_plan(&self.project_root, self.config, self.version)
    }

    /// Create the output directories, render the plan, and run it with the
    /// project root as working directory. Blocks until the child exits; a
    /// non-zero status or spawn failure is fatal, and nothing created so far
    /// is cleaned up.
    pub fn build(&self) -> BuildResult<BuildPlan> {
        for dir in [&self.config.build_dir, &self.config.dist_dir] {
            let abs = self.project_root.join(dir);
            fs::create_dir_all(&abs).with_context(|| format!("create {}", abs))?;
        }

        let plan = self.plan()?;
        println!(
            "[>] Building {} ({}): {}",
            plan.exe_name,
            plan.ecosystem,
            plan.command_line()
        );
        debug!("spawning {:?} in {}", plan.argv, self.project_root);

        let (program, args) = plan
            .argv
            .split_first()
            .ok_or_else(|| BuildError::UnsupportedEcosystem {
                ecosystem: plan.ecosystem.clone(),
            })?;

        let status = Command::new(program)
            .args(args)
            .current_dir(&self.project_root)
            .status()
            .map_err(|source| BuildError::Spawn {
                command: plan.command_line(),
                source,
            })?;

        if !status.success() {
            return Err(BuildError::CommandFailed {
                command: plan.command_line(),
                code: status.code(),
            });
        }

        println!("[✓] Build complete: {}", plan.expected_output);
        Ok(plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use buildstamp_types::{EcosystemSpec, PostProcess};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn utf8_root(temp: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf8 root")
    }

    fn config_running(template: &[&str]) -> BuildConfig {
        BuildConfig {
            ecosystem: "test".to_string(),
            ecosystems: vec![EcosystemSpec::new("test", template, PostProcess::None)],
            ..Default::default()
        }
    }

    #[test]
    fn prepare_writes_both_stamp_files() {
        let temp = TempDir::new().expect("tempdir");
        let root = utf8_root(&temp);
        let config = BuildConfig::default();
        let orch = Orchestrator::new(root.clone(), &config, Version::new(2, 1, 0));

        orch.prepare().expect("prepare");

        let version = fs::read_to_string(root.join("version.py")).unwrap();
        assert_eq!(version, "__version__ = \"2.1.0\"\n");

        let metadata = fs::read_to_string(root.join("config_data.py")).unwrap();
        assert!(metadata.starts_with("config = {"));
        assert!(metadata.contains("\"version\": \"2.1.0\""));
        assert!(metadata.ends_with("}\n"));
    }

    #[test]
    fn prepare_overwrites_prior_content() {
        let temp = TempDir::new().expect("tempdir");
        let root = utf8_root(&temp);
        fs::write(root.join("version.py"), "stale").unwrap();

        let config = BuildConfig {
            stamp_metadata: false,
            ..Default::default()
        };
        Orchestrator::new(root.clone(), &config, Version::new(1, 0, 0))
            .prepare()
            .expect("prepare");

        assert_eq!(
            fs::read_to_string(root.join("version.py")).unwrap(),
            "__version__ = \"1.0.0\"\n"
        );
    }

    #[test]
    fn prepare_respects_disabled_flags() {
        let temp = TempDir::new().expect("tempdir");
        let root = utf8_root(&temp);
        let config = BuildConfig {
            stamp_version: false,
            stamp_metadata: false,
            ..Default::default()
        };
        Orchestrator::new(root.clone(), &config, Version::new(1, 0, 0))
            .prepare()
            .expect("prepare");

        assert!(!root.join("version.py").exists());
        assert!(!root.join("config_data.py").exists());
    }

    #[test]
    fn build_creates_output_dirs_idempotently() {
        let temp = TempDir::new().expect("tempdir");
        let root = utf8_root(&temp);
        fs::create_dir_all(root.join("dist")).unwrap();

        let config = config_running(&["true"]);
        let orch = Orchestrator::new(root.clone(), &config, Version::new(1, 0, 0));
        orch.build().expect("build");

        assert!(root.join("build").is_dir());
        assert!(root.join("dist").is_dir());
    }

    #[test]
    fn failing_child_surfaces_its_exit_code() {
        let temp = TempDir::new().expect("tempdir");
        let config = config_running(&["false"]);
        let orch = Orchestrator::new(utf8_root(&temp), &config, Version::new(1, 0, 0));

        let err = orch.build().expect_err("child fails");
        assert_eq!(err.exit_code(), 1);
        assert!(matches!(err, BuildError::CommandFailed { code: Some(1), .. }));
    }

    #[test]
    fn missing_program_is_a_spawn_error() {
        let temp = TempDir::new().expect("tempdir");
        let config = config_running(&["buildstamp-no-such-tool"]);
        let orch = Orchestrator::new(utf8_root(&temp), &config, Version::new(1, 0, 0));

        let err = orch.build().expect_err("spawn fails");
        assert!(matches!(err, BuildError::Spawn { .. }));
    }

    #[test]
    fn unsupported_ecosystem_fails_before_spawning() {
        let temp = TempDir::new().expect("tempdir");
        let config = BuildConfig {
            ecosystem: "zig".to_string(),
            ..Default::default()
        };
        let orch = Orchestrator::new(utf8_root(&temp), &config, Version::new(1, 0, 0));
        let err = orch.build().expect_err("no template");
        assert!(matches!(err, BuildError::UnsupportedEcosystem { .. }));
    }
}
