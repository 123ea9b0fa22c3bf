/// The `config` module holds the configuration of one reconciliation run:
/// the Minecraft root, which content categories are enabled, and the
/// managed directory layout (`backup/`, `wait_for_update/`) each category
/// uses. Configuration is built once at process start and passed into the
/// engine explicitly.
pub mod config;

/// The `fingerprint` module computes streaming SHA-1 and SHA-256 digests
/// of local content files. The SHA-1 digest is the identity key every
/// registry lookup is made by.
pub mod fingerprint;

/// The `versions` module normalizes Minecraft version labels, filters out
/// snapshot builds, and selects the effective latest version from a set of
/// labels under a total order.
pub mod versions;

/// The `launcher` module reads `launcher_profiles.json` to determine the
/// active mod loader and game version for the installation.
pub mod launcher;

/// The `filesystem` module provides the file operations the engine relies
/// on: listing regular files, listing save folders, and moving files into
/// lazily created directories.
pub mod filesystem;

/// The `http` module downloads files, streaming response bodies to disk
/// and deriving local file names from download URLs.
pub mod http;

/// The `registry` module wraps the three read-only Modrinth API calls:
/// project metadata, version lookup by file hash, and the update check
/// constrained by game version and loader.
pub mod registry;

/// The `reconcile` module is the engine: it walks each enabled category,
/// runs the per-item decision procedure (hash, query, compare, act), and
/// re-evaluates previously quarantined items.
pub mod reconcile;
