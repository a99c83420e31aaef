use async_trait::async_trait;
use sheetport_core::ImportSource;
use std::path::{Path, PathBuf};

/// `ImportSource` for a file on disk
#[derive(Debug, Clone)]
pub struct PathSource {
    path: PathBuf,
    file_name: String,
}

impl PathSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { path, file_name }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ImportSource for PathSource {
    fn file_name(&self) -> &str {
        &self.file_name
    }

    async fn read_all(&self) -> std::io::Result<Vec<u8>> {
        tokio::fs::read(&self.path).await
    }
}
