//! Delivery of generated files to the user

use parking_lot::Mutex;

/// Hands generated text content to the user as a named file.
///
/// Delivery is fire-and-forget: implementations report their own failures
/// (for example through logging) instead of returning them.
pub trait FileDownload: Send + Sync {
    fn deliver(&self, content: &str, filename: &str, mime_type: &str);
}

/// A file handed to a `FileDownload`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub content: String,
    pub filename: String,
    pub mime_type: String,
}

/// `FileDownload` that keeps every delivery in memory
#[derive(Default)]
pub struct MemoryDownload {
    deliveries: Mutex<Vec<Delivery>>,
}

impl MemoryDownload {
    pub fn new() -> Self {
        Self::default()
    }

    /// All deliveries so far, oldest first
    pub fn deliveries(&self) -> Vec<Delivery> {
        self.deliveries.lock().clone()
    }

    pub fn last(&self) -> Option<Delivery> {
        self.deliveries.lock().last().cloned()
    }
}

impl FileDownload for MemoryDownload {
    fn deliver(&self, content: &str, filename: &str, mime_type: &str) {
        self.deliveries.lock().push(Delivery {
            content: content.to_string(),
            filename: filename.to_string(),
            mime_type: mime_type.to_string(),
        });
    }
}
