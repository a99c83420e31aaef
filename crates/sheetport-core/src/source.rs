//! Files chosen for import

use async_trait::async_trait;

/// A file offered for import, read in one piece.
///
/// There is no streaming: the whole content is loaded into memory before
/// parsing starts.
#[async_trait]
pub trait ImportSource: Send + Sync {
    /// File name, used to pick the format from its extension
    fn file_name(&self) -> &str;

    /// Read the complete file content
    async fn read_all(&self) -> std::io::Result<Vec<u8>>;
}

/// `ImportSource` over bytes already in memory
#[derive(Debug, Clone)]
pub struct InMemorySource {
    name: String,
    bytes: Vec<u8>,
}

impl InMemorySource {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }
}

#[async_trait]
impl ImportSource for InMemorySource {
    fn file_name(&self) -> &str {
        &self.name
    }

    async fn read_all(&self) -> std::io::Result<Vec<u8>> {
        Ok(self.bytes.clone())
    }
}
