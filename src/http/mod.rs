use futures_util::StreamExt;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Represents errors that can occur while downloading a file.
#[derive(Debug, Error)]
pub enum DownloadError {
    /// The request could not be sent or its body could not be read.
    #[error("download request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// The server answered with a non-success status.
    #[error("download failed: status code {0}")]
    Status(reqwest::StatusCode),
    /// Writing the downloaded bytes to disk failed.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// The URL does not end in a usable file name.
    #[error("no file name in URL: {0}")]
    NoFileName(String),
}

/// Downloads a file into a directory, streaming the body to disk.
///
/// The file name is the percent-decoded last path segment of the URL.
/// The destination directory is created first if it does not exist.
///
/// # Arguments
///
/// * `client` - The HTTP client to download with; its timeout applies.
/// * `url` - The URL to download.
/// * `dir` - The directory to save the file into.
///
/// # Returns
///
/// The path of the downloaded file.
pub async fn download_to_dir(
    client: &reqwest::Client,
    url: &str,
    dir: &Path,
) -> Result<PathBuf, DownloadError> {
    let name = file_name_from_url(url)?;

    let response = client.get(url).send().await?;
    if !response.status().is_success() {
        return Err(DownloadError::Status(response.status()));
    }

    fs::create_dir_all(dir)?;
    let save_path = dir.join(&name);
    let mut out_file = File::create(&save_path)?;

    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        out_file.write_all(&chunk)?;
    }

    Ok(save_path)
}

/// Derives a local file name from a download URL: the last path segment,
/// stripped of query/fragment and percent-decoded.
fn file_name_from_url(url: &str) -> Result<String, DownloadError> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let segment = path.rsplit('/').next().unwrap_or("");
    let name = percent_decode(segment);
    if name.is_empty() || name == "." || name == ".." {
        return Err(DownloadError::NoFileName(url.to_string()));
    }
    Ok(name)
}

fn percent_decode(value: &str) -> String {
    let mut bytes = Vec::with_capacity(value.len());
    let mut input = value.bytes().peekable();

    while let Some(byte) = input.next() {
        if byte != b'%' {
            bytes.push(byte);
            continue;
        }
        let hi = input.next();
        let lo = input.next();
        if let (Some(hi), Some(lo)) = (hi, lo) {
            if let (Some(hi), Some(lo)) = (from_hex(hi), from_hex(lo)) {
                bytes.push(hi << 4 | lo);
                continue;
            }
        }
        bytes.push(b'%');
        bytes.extend(hi);
        bytes.extend(lo);
    }

    String::from_utf8_lossy(&bytes).into_owned()
}

fn from_hex(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}
