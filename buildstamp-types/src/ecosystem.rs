use serde::{Deserialize, Serialize};

/// Positional rewrite applied to a rendered command line.
///
/// Each ecosystem's quirks live here instead of in conditionals keyed on the
/// ecosystem name, so they can be tested in isolation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostProcess {
    /// Template output is used as-is.
    None,
    /// When an icon path is configured, insert `--icon <path>` immediately
    /// after the first argument (the packager executable).
    IconFlags,
}

impl PostProcess {
    /// Apply this rewrite to a rendered argument vector.
    pub fn apply(self, mut args: Vec<String>, icon: Option<&str>) -> Vec<String> {
        match self {
            PostProcess::None => args,
            PostProcess::IconFlags => {
                if let Some(icon) = icon {
                    let at = 1.min(args.len());
                    args.insert(at, "--icon".to_string());
                    args.insert(at + 1, icon.to_string());
                }
                args
            }
        }
    }
}

/// One buildable ecosystem: an identifier, an ordered command template, and
/// the positional rewrite applied after substitution.
///
/// Template arguments may contain the placeholders `{exe_name}`,
/// `{main_script}`, `{build_dir}`, `{dist_dir}`, and `{icon}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EcosystemSpec {
    pub id: String,
    pub template: Vec<String>,
    pub post: PostProcess,
}

impl EcosystemSpec {
    pub fn new(id: impl Into<String>, template: &[&str], post: PostProcess) -> Self {
        Self {
            id: id.into(),
            template: template.iter().map(|s| s.to_string()).collect(),
            post,
        }
    }
}

/// The built-in ecosystem registry.
///
/// Illustrative, not exhaustive: the config file may add or override
/// entries. Only `python` (single-file packaging via pyinstaller) carries a
/// positional rewrite.
pub fn builtin_ecosystems() -> Vec<EcosystemSpec> {
    vec![
        EcosystemSpec::new(
            "python",
            &[
                "pyinstaller",
                "--onefile",
                "--name",
                "{exe_name}",
                "--distpath",
                "{dist_dir}",
                "--workpath",
                "{build_dir}",
                "--console",
                "{main_script}",
            ],
            PostProcess::IconFlags,
        ),
        EcosystemSpec::new(
            "cpp",
            &["g++", "{main_script}", "-o", "{exe_name}"],
            PostProcess::None,
        ),
        EcosystemSpec::new(
            "rust",
            &["cargo", "build", "--release"],
            PostProcess::None,
        ),
        EcosystemSpec::new(
            "go",
            &["go", "build", "-o", "{exe_name}"],
            PostProcess::None,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn args(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn icon_flags_insert_after_first_argument() {
        let out = PostProcess::IconFlags.apply(args(&["pyinstaller", "--onefile", "x"]), Some("icon.ico"));
        assert_eq!(out, args(&["pyinstaller", "--icon", "icon.ico", "--onefile", "x"]));
    }

    #[test]
    fn icon_flags_without_icon_is_identity() {
        let input = args(&["pyinstaller", "--onefile"]);
        assert_eq!(PostProcess::IconFlags.apply(input.clone(), None), input);
    }

    #[test]
    fn none_is_identity_even_with_icon() {
        let input = args(&["g++", "main.cpp"]);
        assert_eq!(PostProcess::None.apply(input.clone(), Some("icon.ico")), input);
    }

    #[test]
    fn builtin_registry_covers_four_ecosystems() {
        let ids: Vec<_> = builtin_ecosystems().into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec!["python", "cpp", "rust", "go"]);
    }

    #[test]
    fn only_python_carries_the_icon_rewrite() {
        for eco in builtin_ecosystems() {
            let expected = if eco.id == "python" {
                PostProcess::IconFlags
            } else {
                PostProcess::None
            };
            assert_eq!(eco.post, expected, "ecosystem {}", eco.id);
        }
    }
}
