//! Repository root resolution.
//!
//! The pipeline never reads the process working directory itself; callers
//! hand it a [`WorkingDirectoryProvider`] so tests can pin the root.

use std::io;
use std::path::PathBuf;

/// Supplies the directory all relative change paths are resolved against.
pub trait WorkingDirectoryProvider {
  fn current_dir(&self) -> io::Result<PathBuf>;
}

/// The process working directory.
#[derive(Debug, Clone, Copy, Default)]
pub struct CurrentDir;

impl WorkingDirectoryProvider for CurrentDir {
  fn current_dir(&self) -> io::Result<PathBuf> {
    std::env::current_dir()
  }
}

/// A fixed directory, independent of the process state.
#[derive(Debug, Clone)]
pub struct FixedDir(pub PathBuf);

impl WorkingDirectoryProvider for FixedDir {
  fn current_dir(&self) -> io::Result<PathBuf> {
    Ok(self.0.clone())
  }
}
