//! Temporary database helpers
//!
//! Tests that exercise the real storage stack need a fresh file-backed
//! database (a pool over `:memory:` would give every connection its own
//! empty database).

#![allow(clippy::missing_errors_doc)]

use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A database path inside a private temporary directory.
///
/// The directory, the database and its WAL side files are removed when the
/// value is dropped.
///
/// # Examples
///
/// ```
/// use chairbook_common::testing::TempDatabase;
///
/// let temp = TempDatabase::new("docs").unwrap();
/// assert!(temp.db_path().ends_with("docs.db"));
/// ```
#[derive(Debug)]
pub struct TempDatabase {
    dir: TempDir,
    db_path: PathBuf,
}

impl TempDatabase {
    /// Create a fresh directory holding `<name>.db` (the file itself is
    /// created lazily by whoever opens it).
    pub fn new(name: &str) -> io::Result<Self> {
        let dir = tempfile::Builder::new().prefix(&format!("chairbook-{name}-")).tempdir()?;
        let db_path = dir.path().join(format!("{name}.db"));
        Ok(Self { dir, db_path })
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }
}
