//! Sheetport storage
//!
//! Concrete collaborators for running outside tests:
//!
//! - [`SqliteTableStore`] - table documents in a local SQLite database
//! - [`DirectoryDownload`] - delivered files written into a directory
//! - [`PathSource`] - import files read from disk

mod directory_download;
mod path_source;
mod sqlite_store;

pub use directory_download::DirectoryDownload;
pub use path_source::PathSource;
pub use sqlite_store::SqliteTableStore;
