//! Abstractions for status file access to enable testing and mocking.
//!
//! The `FileSystem` trait lets the collector read status files from disk in
//! production and from in-memory fixtures in tests.

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

/// Abstraction for opening status sources.
pub trait FileSystem: Send + Sync {
    /// Opens `path` for a single full read.
    fn open(&self, path: &Path) -> io::Result<Box<dyn Read + Send>>;

    /// Checks if a path exists.
    fn exists(&self, path: &Path) -> bool;
}

impl<T: FileSystem + ?Sized> FileSystem for Box<T> {
    fn open(&self, path: &Path) -> io::Result<Box<dyn Read + Send>> {
        (**self).open(path)
    }

    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }
}

/// Real filesystem implementation that delegates to `std::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct RealFs;

impl RealFs {
    /// Creates a new `RealFs` instance.
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for RealFs {
    fn open(&self, path: &Path) -> io::Result<Box<dyn Read + Send>> {
        Ok(Box::new(File::open(path)?))
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }
}
