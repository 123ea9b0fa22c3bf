use sha1::{Digest as Sha1Digest, Sha1};
use sha2::{Digest as Sha2Digest, Sha256};
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;

/// Enum over the digest algorithms used to fingerprint local content files.
///
/// SHA-1 is the identity key the Modrinth registry looks files up by;
/// SHA-256 is reported alongside it in registry version metadata.
enum Hasher {
    Sha1(Sha1),
    Sha256(Sha256),
}

impl Hasher {
    fn update(&mut self, data: &[u8]) {
        match self {
            Hasher::Sha1(h) => h.update(data),
            Hasher::Sha256(h) => h.update(data),
        }
    }

    fn finalize(self) -> Vec<u8> {
        match self {
            Hasher::Sha1(h) => h.finalize().to_vec(),
            Hasher::Sha256(h) => h.finalize().to_vec(),
        }
    }
}

/// Computes the lowercase hex SHA-1 digest of a local file.
///
/// The file is read in fixed-size chunks and fed to a streaming hasher;
/// it is never loaded into memory whole.
///
/// # Arguments
///
/// * `path` - Path to the file to fingerprint.
///
/// # Errors
///
/// Returns an `io::Error` when the path does not exist or is unreadable.
pub fn sha1_hex<P: AsRef<Path>>(path: P) -> io::Result<String> {
    digest_file(path.as_ref(), Hasher::Sha1(Sha1::new()))
}

/// Computes the lowercase hex SHA-256 digest of a local file.
///
/// # Arguments
///
/// * `path` - Path to the file to fingerprint.
///
/// # Errors
///
/// Returns an `io::Error` when the path does not exist or is unreadable.
pub fn sha256_hex<P: AsRef<Path>>(path: P) -> io::Result<String> {
    digest_file(path.as_ref(), Hasher::Sha256(Sha256::new()))
}

fn digest_file(path: &Path, mut hasher: Hasher) -> io::Result<String> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);

    let mut buffer = [0u8; 8192];
    loop {
        let n = reader.read(&mut buffer)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }

    Ok(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    fn write_temp_file(content: &[u8]) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("content.jar");
        let mut file = File::create(&file_path).unwrap();
        file.write_all(content).unwrap();
        (dir, file_path)
    }

    #[test]
    fn sha1_matches_known_digest() {
        let (_dir, path) = write_temp_file(b"hello world");
        let digest = sha1_hex(&path).unwrap();
        assert_eq!(digest, "2aae6c35c94fcfb415dbe95f408b9ce91ee846ed");
    }

    #[test]
    fn sha256_matches_known_digest() {
        let (_dir, path) = write_temp_file(b"hello world");
        let digest = sha256_hex(&path).unwrap();
        assert_eq!(
            digest,
            "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
        );
    }

    #[test]
    fn sha1_is_stable_across_calls() {
        let (_dir, path) = write_temp_file(b"same bytes");
        assert_eq!(sha1_hex(&path).unwrap(), sha1_hex(&path).unwrap());
    }

    #[test]
    fn sha1_differs_for_differing_content() {
        let (_dir_a, path_a) = write_temp_file(b"one");
        let (_dir_b, path_b) = write_temp_file(b"two");
        assert_ne!(sha1_hex(&path_a).unwrap(), sha1_hex(&path_b).unwrap());
    }

    #[test]
    fn sha1_handles_content_larger_than_one_chunk() {
        let (_dir, path) = write_temp_file(&vec![0xabu8; 8192 * 3 + 17]);
        let digest = sha1_hex(&path).unwrap();
        assert_eq!(digest.len(), 40);
    }

    #[test]
    fn returns_error_for_missing_file() {
        let result = sha1_hex("no_such_file.jar");
        assert!(result.is_err());
    }
}
