//! Upward search for the kustomization that owns a path.
//!
//! A build root is the nearest directory, at or above a changed path, that
//! directly contains [`MARKER_FILENAME`]. Paths are relative to the
//! repository root and the search never leaves it.

use std::collections::HashSet;
use std::io;
use std::path::Path;

use thiserror::Error;
use tracing::{debug, info};

use crate::consts::MARKER_FILENAME;
use crate::util::path::{dirname, parent};

/// Segment naming the directory above the repository root.
const OUTSIDE_ROOT: &str = "..";

fn is_outside_root(dir: &str) -> bool {
  dir == OUTSIDE_ROOT || dir.starts_with("../")
}

#[derive(Debug, Error)]
pub enum SearchError {
  /// Probing for the marker failed for a reason other than absence.
  #[error("error checking for file in {dir}: {source}")]
  Probe {
    dir: String,
    #[source]
    source: io::Error,
  },
}

/// Finds the build root owning `relative_path`.
///
/// The search starts at the directory of `relative_path`, or at that
/// directory's parent when `skip_self` is set (the path is itself a marker
/// being added or removed and must not match against its own directory).
/// Returns `Ok(None)` when no ancestor up to the repository root holds a
/// marker; that only means the change is outside every build tree.
pub fn find_root(repo_root: &Path, relative_path: &str, skip_self: bool) -> Result<Option<String>, SearchError> {
  let mut dir = dirname(relative_path);
  if skip_self {
    dir = parent(&dir);
  }

  while !is_outside_root(&dir) {
    match std::fs::metadata(repo_root.join(&dir).join(MARKER_FILENAME)) {
      Ok(_) => return Ok(Some(dir)),
      Err(e) if e.kind() == io::ErrorKind::NotFound => {
        dir = parent(&dir);
      }
      Err(source) => return Err(SearchError::Probe { dir, source }),
    }
  }

  debug!(path = %relative_path, "no kustomization above path");
  Ok(None)
}

/// Resolves each path to its build root and deduplicates the result.
///
/// Paths outside any build tree are dropped. The returned roots keep the
/// order in which they were first found.
pub fn find_roots<S: AsRef<str>>(repo_root: &Path, paths: &[S]) -> Result<Vec<String>, SearchError> {
  let mut seen = HashSet::new();
  let mut roots = Vec::new();

  for path in paths {
    let Some(root) = find_root(repo_root, path.as_ref(), false)? else {
      continue;
    };
    if seen.insert(root.clone()) {
      info!(root = %root, "found kustomization build dir");
      roots.push(root);
    }
  }

  Ok(roots)
}
