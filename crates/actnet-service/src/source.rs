//! Dataset storage seam
//!
//! The service reads its two files through `DatasetSource`, so tests and
//! alternative stores can stand in for the filesystem.

use async_trait::async_trait;
use std::io;
use std::path::PathBuf;

/// Read access to named dataset files
#[async_trait]
pub trait DatasetSource: Send + Sync {
    /// True when the named file exists
    async fn exists(&self, name: &str) -> io::Result<bool>;

    /// Full text of the named file.
    ///
    /// Absent files fail with [`io::ErrorKind::NotFound`]; content that is
    /// not UTF-8 fails with [`io::ErrorKind::InvalidData`].
    async fn read(&self, name: &str) -> io::Result<String>;

    /// Where the named file lives, for reports and logs
    fn location(&self, name: &str) -> PathBuf;
}

/// Files in a local directory
#[derive(Debug, Clone)]
pub struct FsSource {
    root: PathBuf,
}

impl FsSource {
    /// Create a source rooted at a directory
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl DatasetSource for FsSource {
    async fn exists(&self, name: &str) -> io::Result<bool> {
        tokio::fs::try_exists(self.location(name)).await
    }

    async fn read(&self, name: &str) -> io::Result<String> {
        tokio::fs::read_to_string(self.location(name)).await
    }

    fn location(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}
