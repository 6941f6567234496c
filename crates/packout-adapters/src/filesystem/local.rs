//! Local filesystem adapter using std::fs.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use packout_core::application::ports::Filesystem;

/// Mode for directories created under the output directory.
pub const DIR_MODE: u32 = 0o755;

/// Mode for rendered files.
pub const FILE_MODE: u32 = 0o644;

/// Production filesystem implementation using `std::fs`.
///
/// New directories get [`DIR_MODE`] and new files [`FILE_MODE`], both
/// subject to the process umask. Existing files are truncated in place and
/// keep their mode.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        let mut builder = fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(DIR_MODE);
        }
        builder.create(path)
    }

    fn write_file(&self, path: &Path, content: &str) -> io::Result<()> {
        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(FILE_MODE);
        }

        let mut file = options.open(path)?;
        file.write_all(content.as_bytes())?;
        file.flush()
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn creates_nested_directories_and_writes() {
        let tmp = TempDir::new().unwrap();
        let fs_adapter = LocalFilesystem::new();
        let dir = tmp.path().join("a/b/c");

        fs_adapter.create_dir_all(&dir).unwrap();
        // existing directory is fine
        fs_adapter.create_dir_all(&dir).unwrap();

        let file = dir.join("job.nomad");
        fs_adapter.write_file(&file, "job {}").unwrap();
        assert_eq!(fs::read_to_string(&file).unwrap(), "job {}");
        assert!(fs_adapter.exists(&file));
        assert!(!fs_adapter.is_dir(&file));
        assert!(fs_adapter.is_dir(&dir));
    }

    #[test]
    fn write_truncates_existing_content() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("job.nomad");
        fs::write(&file, "a much longer previous body").unwrap();

        LocalFilesystem::new().write_file(&file, "short").unwrap();
        assert_eq!(fs::read_to_string(&file).unwrap(), "short");
    }

    #[test]
    fn writing_into_missing_directory_fails() {
        let tmp = TempDir::new().unwrap();
        let err = LocalFilesystem::new()
            .write_file(&tmp.path().join("missing/job.nomad"), "x")
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[cfg(unix)]
    #[test]
    fn new_entries_get_expected_modes() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let fs_adapter = LocalFilesystem::new();
        let dir = tmp.path().join("out");
        let file = dir.join("job.nomad");
        fs_adapter.create_dir_all(&dir).unwrap();
        fs_adapter.write_file(&file, "x").unwrap();

        // umask can only clear bits
        let dir_mode = fs::metadata(&dir).unwrap().permissions().mode() & 0o777;
        let file_mode = fs::metadata(&file).unwrap().permissions().mode() & 0o777;
        assert_eq!(dir_mode & !DIR_MODE, 0);
        assert_eq!(file_mode & !FILE_MODE, 0);
        assert_eq!(file_mode & 0o111, 0);
    }
}
