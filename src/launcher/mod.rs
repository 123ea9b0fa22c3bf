use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

use crate::versions;

/// The Minecraft mod-loading runtime detected from the launcher profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Loader {
    Fabric,
    Forge,
    NeoForge,
    Quilt,
    /// No modded profile was found; update checks run without a loader constraint.
    None,
}

impl Loader {
    /// The registry-side identifier, or `None` for the unconstrained case.
    pub fn as_str(self) -> Option<&'static str> {
        match self {
            Loader::Fabric => Some("fabric"),
            Loader::Forge => Some("forge"),
            Loader::NeoForge => Some("neoforge"),
            Loader::Quilt => Some("quilt"),
            Loader::None => None,
        }
    }
}

impl fmt::Display for Loader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str().unwrap_or("none"))
    }
}

/// The loader/game-version pair read once per run and passed as a filter
/// constraint on every registry update check.
#[derive(Debug, Clone)]
pub struct LoaderContext {
    pub loader: Loader,
    pub game_version: String,
}

/// Represents errors that can occur while reading the launcher profiles.
#[derive(Debug, Error)]
pub enum LauncherError {
    #[error("failed to read launcher_profiles.json: {0}")]
    Read(#[from] io::Error),
    #[error("failed to parse launcher_profiles.json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("no mod loader profile found in launcher_profiles.json")]
    NoLoaderProfile,
    #[error("no stable game version among the matching launcher profiles")]
    NoStableVersion,
}

/// The subset of `launcher_profiles.json` this tool cares about. Loader
/// profiles are identified by their keys (e.g. `fabric-loader-0.16.9-1.21.4`);
/// the profile bodies are irrelevant here.
#[derive(Debug, Deserialize)]
struct LauncherProfiles {
    profiles: HashMap<String, serde_json::Value>,
}

/// Reads `launcher_profiles.json` under the given Minecraft root and
/// determines the active loader and game version.
///
/// The loader is detected by substring over the profile keys. When several
/// profiles match the detected loader, the highest non-snapshot game
/// version (the last `-`-separated segment of each key) wins.
///
/// # Errors
///
/// Returns `LauncherError` when the file is missing or malformed, when no
/// loader profile exists, or when every matching profile is a snapshot.
pub fn detect<P: AsRef<Path>>(minecraft_root: P) -> Result<LoaderContext, LauncherError> {
    let json_path = minecraft_root.as_ref().join("launcher_profiles.json");
    let content = fs::read_to_string(&json_path)?;
    let data: LauncherProfiles = serde_json::from_str(&content)?;

    let detected: Vec<(Loader, &String)> = data
        .profiles
        .keys()
        .filter_map(|key| loader_of(key).map(|loader| (loader, key)))
        .collect();

    // Fixed precedence keeps the result deterministic when profiles for
    // several loaders coexist in the same installation.
    const PRECEDENCE: [Loader; 4] = [Loader::Fabric, Loader::NeoForge, Loader::Forge, Loader::Quilt];
    let loader = PRECEDENCE
        .into_iter()
        .find(|candidate| detected.iter().any(|(found, _)| found == candidate))
        .ok_or(LauncherError::NoLoaderProfile)?;

    let candidates: Vec<String> = detected
        .iter()
        .filter(|(found, _)| *found == loader)
        .filter_map(|(_, key)| key.rsplit('-').next())
        .map(str::to_string)
        .collect();

    let game_version = versions::effective_latest(&candidates)
        .map_err(|_| LauncherError::NoStableVersion)?
        .to_string();

    Ok(LoaderContext {
        loader,
        game_version,
    })
}

/// Maps a profile key to the loader it belongs to. `neoforge` is checked
/// before `forge` because the former contains the latter as a substring.
fn loader_of(profile_key: &str) -> Option<Loader> {
    let key = profile_key.to_lowercase();
    if key.contains("neoforge") {
        Some(Loader::NeoForge)
    } else if key.contains("fabric") {
        Some(Loader::Fabric)
    } else if key.contains("forge") {
        Some(Loader::Forge)
    } else if key.contains("quilt") {
        Some(Loader::Quilt)
    } else {
        None
    }
}
