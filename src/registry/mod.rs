use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::launcher::LoaderContext;

/// Base URL of the public Modrinth v2 API.
pub const DEFAULT_API_BASE: &str = "https://api.modrinth.com/v2";

/// Default network timeout applied to every registry call.
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Represents errors that can occur while querying the registry.
///
/// A 404 is not an error anywhere in the client: every operation models it
/// as an absent result, because an unknown hash or an incompatible build is
/// an expected outcome of a run.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The request exceeded the configured timeout.
    #[error("the registry request timed out")]
    Timeout,
    /// The registry answered with an unexpected status code.
    #[error("unexpected registry status: {0}")]
    Service(u16),
    /// The request failed below HTTP (connection, TLS, malformed body).
    #[error("registry request failed: {0}")]
    Transport(reqwest::Error),
}

impl From<reqwest::Error> for RegistryError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            RegistryError::Timeout
        } else {
            RegistryError::Transport(err)
        }
    }
}

/// Project metadata, as returned by `GET /project/{id}`.
#[derive(Debug, Deserialize)]
pub struct ProjectInfo {
    pub game_versions: Vec<String>,
}

/// Version metadata for a known file hash, from `GET /version_file/{hash}`.
#[derive(Debug, Deserialize)]
pub struct VersionFileInfo {
    pub game_versions: Vec<String>,
    pub version_number: String,
}

/// The candidate build returned by a successful update check.
#[derive(Debug, Deserialize)]
pub struct UpdateCandidate {
    pub game_versions: Vec<String>,
    pub version_number: String,
    pub name: String,
    pub files: Vec<VersionFile>,
}

/// One downloadable file of a candidate build. Only the first entry of the
/// candidate's file list is ever downloaded.
#[derive(Debug, Deserialize)]
pub struct VersionFile {
    pub url: String,
}

#[derive(Debug, Serialize)]
struct UpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    game_versions: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    loaders: Option<Vec<String>>,
}

/// Client for the three read-only registry operations this tool uses.
///
/// One fixed timeout applies to every call and there are no automatic
/// retries; a timeout or transport failure is a terminal result for the
/// item being processed, never a crash.
pub struct RegistryClient {
    http: reqwest::Client,
    base_url: String,
}

impl RegistryClient {
    /// Builds a client against the given API base URL.
    ///
    /// # Arguments
    ///
    /// * `base_url` - API base, e.g. [`DEFAULT_API_BASE`]; a trailing slash
    ///   is tolerated.
    /// * `timeout` - Applied to every request, download included.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// The underlying HTTP client, for downloads that should share the
    /// registry timeout.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Fetches the game versions a project has published builds for.
    ///
    /// # Returns
    ///
    /// `Ok(None)` when the project id is unknown to the registry.
    pub async fn project_versions(
        &self,
        project_id: &str,
    ) -> Result<Option<ProjectInfo>, RegistryError> {
        let url = format!("{}/project/{}", self.base_url, project_id);
        let response = self.http.get(&url).send().await?;
        match response.status() {
            StatusCode::OK => Ok(Some(response.json().await?)),
            StatusCode::NOT_FOUND => Ok(None),
            status => Err(RegistryError::Service(status.as_u16())),
        }
    }

    /// Looks up the version metadata of a local file by its SHA-1 hash.
    ///
    /// # Returns
    ///
    /// `Ok(None)` when the registry does not recognize the hash — the file
    /// may be corrupt, unofficial, or simply absent from the registry.
    pub async fn version_for_hash(
        &self,
        sha1: &str,
    ) -> Result<Option<VersionFileInfo>, RegistryError> {
        let url = format!("{}/version_file/{}", self.base_url, sha1);
        let response = self.http.get(&url).send().await?;
        match response.status() {
            StatusCode::OK => Ok(Some(response.json().await?)),
            StatusCode::NOT_FOUND => Ok(None),
            status => Err(RegistryError::Service(status.as_u16())),
        }
    }

    /// Asks the registry for the latest build matching the given loader and
    /// game version, identified by the SHA-1 hash of the local file.
    ///
    /// The loader constraint is omitted from the request body when the
    /// context carries no loader.
    ///
    /// # Returns
    ///
    /// `Ok(None)` when no build matches the constraints.
    pub async fn check_update(
        &self,
        sha1: &str,
        context: &LoaderContext,
    ) -> Result<Option<UpdateCandidate>, RegistryError> {
        let url = format!("{}/version_file/{}/update", self.base_url, sha1);
        let body = UpdateRequest {
            game_versions: Some(vec![context.game_version.clone()]),
            loaders: context
                .loader
                .as_str()
                .map(|loader| vec![loader.to_string()]),
        };
        let response = self.http.post(&url).json(&body).send().await?;
        match response.status() {
            StatusCode::OK => Ok(Some(response.json().await?)),
            StatusCode::NOT_FOUND => Ok(None),
            status => Err(RegistryError::Service(status.as_u16())),
        }
    }
}
