mod config;

use camino::Utf8PathBuf;
use clap::{Args, Parser};
use std::process::ExitCode;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use buildstamp_build::{BuildError, Orchestrator};
use buildstamp_store::VersionStore;
use buildstamp_types::{Version, VersionPart};

#[derive(Debug, Parser)]
#[command(
    name = "buildstamp",
    version,
    about = "Version-stamping build orchestrator for single-binary projects."
)]
struct Cli {
    /// Project root containing the version file and build sources
    /// (default: current directory).
    #[arg(long, default_value = ".")]
    project_root: Utf8PathBuf,

    #[command(flatten)]
    bump: BumpArgs,
}

/// Version mutation flags; at most one may be given. With none, the
/// persisted version is used unchanged.
#[derive(Debug, Args)]
#[group(multiple = false)]
struct BumpArgs {
    /// Bump the major version (resets minor and patch to 0).
    #[arg(long)]
    major: bool,

    /// Bump the minor version (resets patch to 0).
    #[arg(long)]
    minor: bool,

    /// Bump the patch version.
    #[arg(long)]
    patch: bool,

    /// Set a specific version. Strict: exactly X.Y.Z, no leading 'v'.
    #[arg(long, value_name = "X.Y.Z")]
    set_version: Option<String>,
}

fn main() -> ExitCode {
    if let Err(e) = real_main() {
        error!("{:?}", e);
        let code = e
            .downcast_ref::<BuildError>()
            .map(BuildError::exit_code)
            .unwrap_or(1);
        return ExitCode::from(code);
    }
    ExitCode::from(0)
}

fn real_main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let project_root = cli.project_root;

    let file_config = config::load_or_default(&project_root)?;
    let build_config = file_config.into_build_config();
    debug!(
        "config: app={}, ecosystem={}, version_file={}",
        build_config.app_name, build_config.ecosystem, build_config.version_file
    );

    let mut store = VersionStore::load(project_root.join(&build_config.version_file))?;
    let version = resolve_version(&mut store, &cli.bump)?;
    println!("[>] Using version: {}", version);

    let orchestrator = Orchestrator::new(project_root, &build_config, version);
    orchestrator.prepare()?;
    orchestrator.build()?;
    Ok(())
}

fn resolve_version(store: &mut VersionStore, bump: &BumpArgs) -> anyhow::Result<Version> {
    if let Some(literal) = &bump.set_version {
        store.set(literal)
    } else if bump.major {
        store.bump(VersionPart::Major)
    } else if bump.minor {
        store.bump(VersionPart::Minor)
    } else if bump.patch {
        store.bump(VersionPart::Patch)
    } else {
        store.parse()
    }
}
