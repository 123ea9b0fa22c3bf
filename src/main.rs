//! Checks every enabled content category of a Minecraft installation
//! against Modrinth and applies the available updates: newer builds are
//! downloaded and the replaced files archived, incompatible files are
//! quarantined until a matching build appears.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use modrinth_updater::config::{self, RunConfig};
use modrinth_updater::filesystem;
use modrinth_updater::launcher::{self, Loader, LoaderContext};
use modrinth_updater::reconcile::{Reconciler, RunSummary};
use modrinth_updater::registry::{self, RegistryClient};

#[derive(Parser)]
#[command(name = "modrinth-updater", version, about)]
struct Cli {
    /// Minecraft installation root (defaults to the platform .minecraft folder)
    #[arg(long, env = "MODRINTH_UPDATER_MC_DIR")]
    minecraft_dir: Option<String>,

    /// Modrinth API base URL
    #[arg(long, env = "MODRINTH_UPDATER_API_BASE", default_value = registry::DEFAULT_API_BASE)]
    api_base: String,

    /// Network timeout in seconds for registry calls and downloads
    #[arg(long, env = "MODRINTH_UPDATER_TIMEOUT_SECS", default_value_t = registry::DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,

    /// Use this game version instead of reading the launcher profiles
    #[arg(long, env = "MODRINTH_UPDATER_GAME_VERSION")]
    game_version: Option<String>,

    /// Do not update the mods folder
    #[arg(long, env = "MODRINTH_UPDATER_SKIP_MODS")]
    skip_mods: bool,

    /// Do not update the resourcepacks folder
    #[arg(long, env = "MODRINTH_UPDATER_SKIP_RESOURCEPACKS")]
    skip_resourcepacks: bool,

    /// Do not update the shaderpacks folder
    #[arg(long, env = "MODRINTH_UPDATER_SKIP_SHADERPACKS")]
    skip_shaderpacks: bool,

    /// Do not update the datapacks of the installation's saves
    #[arg(long, env = "MODRINTH_UPDATER_SKIP_DATAPACKS")]
    skip_datapacks: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        // Individual item failures do not abort the run, but they do turn
        // into a failing exit code so scripts can notice them.
        Ok(summary) if summary.has_errors() => ExitCode::FAILURE,
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<RunSummary> {
    let minecraft_root = resolve_root(cli.minecraft_dir.as_deref())?;

    let context = match cli.game_version {
        // A forced game version lets the run proceed without launcher
        // profiles; the loader constraint is still applied when one is found.
        Some(game_version) => {
            let loader = launcher::detect(&minecraft_root)
                .map(|detected| detected.loader)
                .unwrap_or(Loader::None);
            LoaderContext {
                loader,
                game_version,
            }
        }
        None => launcher::detect(&minecraft_root)
            .context("could not determine the active loader and game version")?,
    };
    println!(
        "Checking against {}-{} in {}",
        context.loader,
        context.game_version,
        minecraft_root.display()
    );

    let client = RegistryClient::new(&cli.api_base, Duration::from_secs(cli.timeout_secs))
        .context("failed to build the registry client")?;

    let mut run_config = RunConfig::new(minecraft_root);
    run_config.mods = !cli.skip_mods;
    run_config.resource_packs = !cli.skip_resourcepacks;
    run_config.shader_packs = !cli.skip_shaderpacks;
    run_config.data_packs = !cli.skip_datapacks;

    let summary = Reconciler::new(&client, &run_config, &context).run().await;

    if !summary.changed() && !summary.has_errors() {
        println!("✅ Everything is up to date!");
    } else {
        println!(
            "Done: {} updated, {} quarantined, {} still waiting, {} errors",
            summary.updated, summary.quarantined, summary.incompatible, summary.errors
        );
    }
    Ok(summary)
}

fn resolve_root(override_dir: Option<&str>) -> anyhow::Result<PathBuf> {
    let root = match override_dir {
        Some(dir) => filesystem::expand_home(dir),
        None => config::default_minecraft_dir()
            .context("could not determine the default Minecraft directory")?,
    };
    if root.as_os_str().is_empty() {
        anyhow::bail!("the configured Minecraft directory could not be resolved");
    }
    Ok(root)
}
