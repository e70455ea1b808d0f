//! Persisting built manifests under the output directory.
//!
//! # Layouts
//!
//! ```text
//! Nested:   {out_dir}/{root}/manifests.yaml
//! Encoded:  {out_dir}/{base64url(root)}
//! ```
//!
//! A deployment picks one layout and sticks to it; the encoded form is for
//! consumers that want a flat directory and decode the root from the name.

use std::io;
use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE;
use thiserror::Error;
use tracing::info;

use crate::build::BuildResults;
use crate::consts::MANIFEST_FILENAME;
use crate::util::path::{clean, segments};

#[derive(Debug, Error)]
pub enum OutputError {
  #[error("failed creating target directory '{}': {source}", path.display())]
  CreateDir {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("error writing to '{}': {source}", path.display())]
  Write {
    path: PathBuf,
    #[source]
    source: io::Error,
  },
}

/// How a root's manifest is addressed under the output directory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputLayout {
  /// Recreate the root's directory path and write `manifests.yaml` inside it.
  #[default]
  Nested,
  /// One file per root, named by the URL-safe base64 of the root path.
  Encoded,
}

/// Filename for `root` in the encoded layout.
pub fn encode_root(root: &str) -> String {
  URL_SAFE.encode(root.as_bytes())
}

/// Recovers the root from an encoded-layout filename.
pub fn decode_root(name: &str) -> Option<String> {
  let bytes = URL_SAFE.decode(name).ok()?;
  String::from_utf8(bytes).ok()
}

/// Directory that receives the manifest for `root`.
///
/// Nested roots are joined segment by segment, so the repository root `.`
/// maps to `out_dir` itself.
fn target_dir(out_dir: &Path, root: &str, layout: OutputLayout) -> PathBuf {
  match layout {
    OutputLayout::Nested => segments(&clean(root)).into_iter().fold(out_dir.to_path_buf(), |dir, s| dir.join(s)),
    OutputLayout::Encoded => out_dir.to_path_buf(),
  }
}

/// Target file for `root` under `out_dir`.
pub fn manifest_path(out_dir: &Path, root: &str, layout: OutputLayout) -> PathBuf {
  match layout {
    OutputLayout::Nested => target_dir(out_dir, root, layout).join(MANIFEST_FILENAME),
    OutputLayout::Encoded => out_dir.join(encode_root(root)),
  }
}

#[cfg(unix)]
fn create_dir_all(path: &Path) -> io::Result<()> {
  use std::os::unix::fs::DirBuilderExt;
  std::fs::DirBuilder::new().recursive(true).mode(0o700).create(path)
}

#[cfg(not(unix))]
fn create_dir_all(path: &Path) -> io::Result<()> {
  std::fs::create_dir_all(path)
}

/// Writes one manifest, creating directories as needed.
pub fn write_manifest(out_dir: &Path, root: &str, manifest: &[u8], layout: OutputLayout) -> Result<PathBuf, OutputError> {
  let target = manifest_path(out_dir, root, layout);
  let target_dir = target_dir(out_dir, root, layout);

  create_dir_all(&target_dir).map_err(|source| OutputError::CreateDir {
    path: target_dir.clone(),
    source,
  })?;
  std::fs::write(&target, manifest).map_err(|source| OutputError::Write {
    path: target.clone(),
    source,
  })?;

  info!(root = %root, path = %target.display(), "wrote manifest");
  Ok(target)
}

/// Writes every build result, in root order.
///
/// Stops at the first failure; files already written stay in place.
pub fn write_manifests(out_dir: &Path, results: &BuildResults, layout: OutputLayout) -> Result<Vec<PathBuf>, OutputError> {
  let mut roots: Vec<&String> = results.keys().collect();
  roots.sort();

  roots
    .into_iter()
    .map(|root| write_manifest(out_dir, root, &results[root].manifest, layout))
    .collect()
}
