use std::cmp::Ordering;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::{Category, CategoryPaths, RunConfig};
use crate::filesystem::{self, FilesystemError};
use crate::fingerprint;
use crate::http::{self, DownloadError};
use crate::launcher::LoaderContext;
use crate::registry::{RegistryClient, RegistryError};
use crate::versions::{self, VersionError};

/// Represents errors that can end the processing of a single item.
///
/// Every variant is caught at the item boundary and reported; it never
/// aborts the category loop. The item stays where it is and becomes
/// eligible again on the next invocation of the tool.
#[derive(Debug, Error)]
pub enum ItemError {
    #[error("failed to hash the file: {0}")]
    Hash(#[from] std::io::Error),
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error(transparent)]
    Version(#[from] VersionError),
    #[error("download failed: {0}")]
    Download(#[from] DownloadError),
    #[error("move failed: {0}")]
    Move(#[from] FilesystemError),
    #[error("the update candidate has no downloadable files")]
    MissingDownload,
}

/// The terminal outcome of one item's decision procedure.
#[derive(Debug)]
pub enum Outcome {
    /// The installed build matches the registry's latest compatible build.
    UpToDate,
    /// A newer build was downloaded; the old file went into `backup/`.
    Updated { name: String },
    /// No compatible build exists; the file went into `wait_for_update/`.
    Quarantined,
    /// Still no compatible build for a file already in `wait_for_update/`;
    /// it stays where it is.
    Incompatible,
}

/// Per-outcome counters for one full reconciliation run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub up_to_date: usize,
    pub updated: usize,
    pub quarantined: usize,
    pub incompatible: usize,
    pub errors: usize,
}

impl RunSummary {
    /// Whether the run moved or downloaded anything.
    pub fn changed(&self) -> bool {
        self.updated > 0 || self.quarantined > 0
    }

    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }
}

/// Runs the per-item decision procedure over every enabled category.
///
/// Items are processed strictly one after another: hash, update check,
/// version comparison, at most one file action. One item's failure never
/// prevents processing of subsequent items, and a category-level failure
/// (e.g. a missing live directory) aborts only that category.
pub struct Reconciler<'a> {
    client: &'a RegistryClient,
    config: &'a RunConfig,
    context: &'a LoaderContext,
}

impl<'a> Reconciler<'a> {
    pub fn new(
        client: &'a RegistryClient,
        config: &'a RunConfig,
        context: &'a LoaderContext,
    ) -> Self {
        Self {
            client,
            config,
            context,
        }
    }

    /// Runs one full reconciliation pass and returns the outcome counters.
    pub async fn run(&self) -> RunSummary {
        let mut summary = RunSummary::default();
        for category in Category::ALL {
            if !self.config.is_enabled(category) {
                debug!(category = category.label(), "category disabled, skipping");
                continue;
            }
            if let Err(err) = self.run_category(category, &mut summary).await {
                println!("⚠️  Skipping the {} category: {err}", category.label());
                warn!(category = category.label(), error = %err, "category aborted");
            }
        }
        summary
    }

    async fn run_category(
        &self,
        category: Category,
        summary: &mut RunSummary,
    ) -> Result<(), FilesystemError> {
        let paths = self.config.category_paths(category);

        for live_dir in &paths.live_dirs {
            for item in filesystem::list_files(live_dir, false)? {
                let outcome = self.process_item(&item, live_dir, &paths, false).await;
                self.report(category, &item, outcome, summary);
            }
        }

        // Second pass: re-evaluate previously quarantined items so a build
        // published since the last run can promote them again. Updates are
        // downloaded into the category's first live directory.
        let Some(download_dir) = paths.live_dirs.first() else {
            return Ok(());
        };
        if !paths.wait_dir.is_dir() {
            return Ok(());
        }
        let waiting = filesystem::list_files(&paths.wait_dir, false)?;
        if waiting.is_empty() {
            return Ok(());
        }

        println!(
            "❗ Re-checking {} {} item(s) in the wait_for_update folder...",
            waiting.len(),
            category.label()
        );
        for item in waiting {
            let outcome = self.process_item(&item, download_dir, &paths, true).await;
            self.report(category, &item, outcome, summary);
        }
        Ok(())
    }

    /// The decision procedure for one tracked file.
    ///
    /// `download_dir` is where a replacement lands; `already_quarantined`
    /// suppresses re-quarantining when the file is being re-checked from
    /// the `wait_for_update/` folder.
    async fn process_item(
        &self,
        path: &Path,
        download_dir: &Path,
        paths: &CategoryPaths,
        already_quarantined: bool,
    ) -> Result<Outcome, ItemError> {
        let hash = fingerprint::sha1_hex(path)?;
        debug!(path = %path.display(), hash, "checking item");

        let Some(candidate) = self.client.check_update(&hash, self.context).await? else {
            if already_quarantined {
                return Ok(Outcome::Incompatible);
            }
            filesystem::move_file(path, &paths.wait_dir)?;
            return Ok(Outcome::Quarantined);
        };

        let latest = versions::effective_latest(&candidate.game_versions)?.to_string();
        let known = self
            .client
            .version_for_hash(&hash)
            .await?
            .map(|info| info.game_versions)
            .unwrap_or_default();
        let current = versions::effective_latest(&known)?.to_string();

        if versions::compare(&latest, &current) != Ordering::Greater {
            return Ok(Outcome::UpToDate);
        }

        let file = candidate.files.first().ok_or(ItemError::MissingDownload)?;
        http::download_to_dir(self.client.http(), &file.url, download_dir).await?;
        // Not transactional: a move failure after a successful download
        // leaves both the new and the old file on disk for manual cleanup.
        filesystem::move_file(path, &paths.backup_dir)?;
        Ok(Outcome::Updated {
            name: candidate.name,
        })
    }

    fn report(
        &self,
        category: Category,
        path: &Path,
        outcome: Result<Outcome, ItemError>,
        summary: &mut RunSummary,
    ) {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let loader = self.context.loader;
        let game_version = &self.context.game_version;

        match outcome {
            Ok(Outcome::UpToDate) => {
                summary.up_to_date += 1;
                println!("✅ {name} is on the latest release ({loader}-{game_version})");
            }
            Ok(Outcome::Updated { name: display }) => {
                summary.updated += 1;
                println!("🚀 Updated {name} to {display}; the old file is in the backup folder");
            }
            Ok(Outcome::Quarantined) => {
                summary.quarantined += 1;
                println!(
                    "⚠️  No {loader}-{game_version} build for {name}; moved to the wait_for_update folder"
                );
            }
            Ok(Outcome::Incompatible) => {
                summary.incompatible += 1;
                println!("❌ Still no {loader}-{game_version} build for {name}");
            }
            Err(err) => {
                summary.errors += 1;
                println!("⚠️  {} {name}: {err}", category.label());
                warn!(item = %path.display(), error = %err, "item failed");
            }
        }
    }
}
