//! Command-template rendering.
//!
//! Pure: turns config + version into a [`BuildPlan`] without touching the
//! filesystem, so every substitution and rewrite is testable on its own.

use camino::Utf8Path;

use buildstamp_types::{BuildPlan, Version};

use crate::config::BuildConfig;
use crate::error::{BuildError, BuildResult};

/// Resolve the selected ecosystem's template into a concrete plan.
///
/// `build_dir` and `dist_dir` placeholders expand to project-root-joined
/// paths; `main_script`, `icon`, and `exe_name` expand verbatim.
pub fn render_plan(
    project_root: &Utf8Path,
    config: &BuildConfig,
    version: Version,
) -> BuildResult<BuildPlan> {
    let eco = config
        .selected_ecosystem()
        .ok_or_else(|| BuildError::UnsupportedEcosystem {
            ecosystem: config.ecosystem.clone(),
        })?;

    let exe_name = format!("{}-v{}", config.app_name, version);
    let build_dir = project_root.join(&config.build_dir);
    let dist_dir = project_root.join(&config.dist_dir);
    let icon = config.icon.as_deref().map(Utf8Path::as_str).unwrap_or("");

    let argv: Vec<String> = eco
        .template
        .iter()
        .map(|part| {
            part.replace("{exe_name}", &exe_name)
                .replace("{main_script}", config.main_script.as_str())
                .replace("{build_dir}", build_dir.as_str())
                .replace("{dist_dir}", dist_dir.as_str())
                .replace("{icon}", icon)
        })
        .collect();

    let argv = eco
        .post
        .apply(argv, config.icon.as_deref().map(Utf8Path::as_str));

    Ok(BuildPlan {
        ecosystem: eco.id.clone(),
        exe_name: exe_name.clone(),
        argv,
        expected_output: dist_dir.join(&exe_name),
    })
}
