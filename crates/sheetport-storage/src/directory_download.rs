//! File delivery into a local directory

use sheetport_core::FileDownload;
use std::io::Write;
use std::path::{Path, PathBuf};

/// `FileDownload` that writes each delivery to `<dir>/<filename>`.
///
/// Content goes to a temporary file in the same directory which is then
/// renamed over the target, so an existing file is never left half-written.
/// Failures are logged, not returned.
#[derive(Debug, Clone)]
pub struct DirectoryDownload {
    dir: PathBuf,
}

impl DirectoryDownload {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path a delivery named `filename` is written to
    pub fn target_path(&self, filename: &str) -> PathBuf {
        let name = Path::new(filename)
            .file_name()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("download"));
        self.dir.join(name)
    }

    fn write(&self, content: &str, target: &Path) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let mut file = tempfile::NamedTempFile::new_in(&self.dir)?;
        file.write_all(content.as_bytes())?;
        file.flush()?;
        file.persist(target).map_err(|e| e.error)?;
        Ok(())
    }
}

impl FileDownload for DirectoryDownload {
    fn deliver(&self, content: &str, filename: &str, mime_type: &str) {
        let target = self.target_path(filename);
        match self.write(content, &target) {
            Ok(()) => {
                tracing::info!(path = %target.display(), mime_type, "wrote download");
            }
            Err(e) => {
                tracing::warn!(path = %target.display(), error = %e, "failed to write download");
            }
        }
    }
}
