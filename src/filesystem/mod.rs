use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Represents errors that can occur during filesystem operations.
#[derive(Debug, Error)]
pub enum FilesystemError {
    /// Wrapper for standard IO errors.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// Error for paths that end without a file name component.
    #[error("path has no file name component")]
    NoFileName,
}

/// Lists the regular files in a directory, non-recursively.
///
/// Sub-directories and other non-file entries are skipped. The result is
/// sorted so repeated runs process items in a stable order.
///
/// # Arguments
///
/// * `dir` - The directory to list.
/// * `basenames_only` - If true, returns file names instead of full paths.
///
/// # Errors
///
/// Returns `FilesystemError` when the directory cannot be read.
pub fn list_files<P: AsRef<Path>>(
    dir: P,
    basenames_only: bool,
) -> Result<Vec<PathBuf>, FilesystemError> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if basenames_only {
            files.push(PathBuf::from(entry.file_name()));
        } else {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// Lists the sub-directories of a directory, non-recursively and sorted.
///
/// # Errors
///
/// Returns `FilesystemError` when the directory cannot be read.
pub fn list_subdirs<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>, FilesystemError> {
    let mut dirs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_dir() {
            dirs.push(path);
        }
    }
    dirs.sort();
    Ok(dirs)
}

/// Moves a file into a destination directory, preserving its file name.
///
/// The destination directory (and any missing parents) is created first;
/// the move itself is a rename, so it is atomic within one volume.
///
/// # Arguments
///
/// * `src` - The file to move.
/// * `dst_dir` - The directory to move it into.
///
/// # Errors
///
/// Returns `FilesystemError` when the source has no file name or the
/// rename fails.
///
/// # Returns
///
/// The path of the moved file inside `dst_dir`.
pub fn move_file<P: AsRef<Path>, Q: AsRef<Path>>(
    src: P,
    dst_dir: Q,
) -> Result<PathBuf, FilesystemError> {
    let src = src.as_ref();
    let name = src.file_name().ok_or(FilesystemError::NoFileName)?;

    fs::create_dir_all(dst_dir.as_ref())?;
    let dst = dst_dir.as_ref().join(name);
    fs::rename(src, &dst)?;
    Ok(dst)
}

/// Expands a path that starts with `~` to the user's home directory.
///
/// # Arguments
///
/// * `path` - Path string, possibly starting with `~`.
///
/// # Returns
///
/// The expanded `PathBuf`, or empty if expansion fails.
pub fn expand_home(path: &str) -> PathBuf {
    if path.is_empty() {
        return PathBuf::new();
    }
    if !path.starts_with('~') {
        return PathBuf::from(path);
    }
    let home = match dirs::home_dir() {
        Some(h) => h,
        None => return PathBuf::new(),
    };
    if path == "~" {
        return home;
    }
    if path.starts_with("~/") || path.starts_with("~\\") {
        let without_tilde = &path[2..];
        return home.join(without_tilde);
    }
    PathBuf::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    fn touch(path: &Path) {
        File::create(path).unwrap().write_all(b"x").unwrap();
    }

    #[test]
    fn list_files_skips_directories() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("a.jar"));
        touch(&dir.path().join("b.jar"));
        fs::create_dir(dir.path().join("backup")).unwrap();

        let files = list_files(dir.path(), false).unwrap();
        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|f| f.is_file()));
    }

    #[test]
    fn list_files_can_return_basenames_only() {
        let dir = tempdir().unwrap();
        touch(&dir.path().join("pack.zip"));

        let files = list_files(dir.path(), true).unwrap();
        assert_eq!(files, vec![PathBuf::from("pack.zip")]);
    }

    #[test]
    fn list_files_errors_on_missing_directory() {
        let dir = tempdir().unwrap();
        let result = list_files(dir.path().join("absent"), false);
        assert!(result.is_err());
    }

    #[test]
    fn list_subdirs_returns_only_directories() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("world1")).unwrap();
        fs::create_dir(dir.path().join("world2")).unwrap();
        touch(&dir.path().join("stray.txt"));

        let dirs = list_subdirs(dir.path()).unwrap();
        assert_eq!(dirs.len(), 2);
        assert!(dirs.iter().all(|d| d.is_dir()));
    }

    #[test]
    fn move_file_creates_destination_and_preserves_name() {
        let dir = tempdir().unwrap();
        let src = dir.path().join("old-mod.jar");
        touch(&src);
        let dst_dir = dir.path().join("backup").join("mods");

        let moved = move_file(&src, &dst_dir).unwrap();
        assert_eq!(moved, dst_dir.join("old-mod.jar"));
        assert!(moved.is_file());
        assert!(!src.exists());
    }

    #[test]
    fn move_file_errors_when_source_is_missing() {
        let dir = tempdir().unwrap();
        let result = move_file(dir.path().join("absent.jar"), dir.path().join("backup"));
        assert!(result.is_err());
    }

    #[test]
    fn expand_home_leaves_plain_paths_alone() {
        assert_eq!(expand_home("/tmp/mods"), PathBuf::from("/tmp/mods"));
    }

    #[test]
    fn expand_home_resolves_tilde_prefix() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~/.minecraft"), home.join(".minecraft"));
        }
    }
}
