//! Minimal kustomization parsing, enough to spot components.
//!
//! A `kind: Component` kustomization is a fragment meant to be pulled in by
//! other kustomizations; building it standalone does not render correctly.

use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::consts::{COMPONENT_KIND, MARKER_FILENAME};

#[derive(Debug, Error)]
pub enum DescriptorError {
  #[error("failed opening kustomization file: {}: {source}", path.display())]
  Read {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("failed parsing kustomization file: {}: {source}", path.display())]
  Parse {
    path: PathBuf,
    #[source]
    source: serde_yaml::Error,
  },
}

/// The fields of a `kustomization.yaml` the pipeline cares about.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Kustomization {
  #[serde(rename = "apiVersion", default)]
  pub api_version: Option<String>,
  #[serde(default)]
  pub kind: Option<String>,
}

impl Kustomization {
  pub fn is_component(&self) -> bool {
    self.kind.as_deref() == Some(COMPONENT_KIND)
  }

  /// Parses descriptor text. A blank file is a valid, kind-less kustomization.
  pub fn parse(content: &str) -> Result<Self, serde_yaml::Error> {
    if content.trim().is_empty() {
      return Ok(Self::default());
    }
    serde_yaml::from_str::<Option<Self>>(content).map(Option::unwrap_or_default)
  }

  /// Reads the marker file of the root at `dir` (relative to `repo_root`).
  pub fn load(repo_root: &Path, dir: &str) -> Result<Self, DescriptorError> {
    let path = repo_root.join(dir).join(MARKER_FILENAME);
    let content = std::fs::read_to_string(&path).map_err(|source| DescriptorError::Read {
      path: path.clone(),
      source,
    })?;
    Self::parse(&content).map_err(|source| DescriptorError::Parse { path, source })
  }
}

/// Drops roots whose kustomization is a component.
pub fn remove_components(repo_root: &Path, roots: Vec<String>) -> Result<Vec<String>, DescriptorError> {
  let mut standalone = Vec::with_capacity(roots.len());
  for root in roots {
    if Kustomization::load(repo_root, &root)?.is_component() {
      info!(root = %root, "skipping component kustomization");
      continue;
    }
    standalone.push(root);
  }
  Ok(standalone)
}
