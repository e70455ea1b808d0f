//! Implementation of the `kdiff build-dirs` command.
//!
//! Builds every kustomization owning one of the given files and writes the
//! rendered manifests under the output directory.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use kdiff_lib::build::BuildConfig;
use kdiff_lib::output::OutputLayout;
use kdiff_lib::workdir::CurrentDir;
use kdiff_lib::{BuildDirsOptions, build_dirs};

use crate::output::{print_info, print_success, print_warnings};

/// Execute the build-dirs command.
///
/// The working directory is the repository root. The build program is
/// `kustomize` unless `KDIFF_KUSTOMIZE` names another.
pub fn cmd_build_dirs(
  out_dir: &Path,
  files: &[String],
  truncate_secrets: bool,
  dir_depth: Option<usize>,
  encode_paths: bool,
) -> Result<()> {
  let options = BuildDirsOptions {
    out_dir: out_dir.to_path_buf(),
    truncate_secrets,
    group_min_depth: dir_depth,
    layout: if encode_paths {
      OutputLayout::Encoded
    } else {
      OutputLayout::Nested
    },
    build: BuildConfig::from_env(),
  };

  debug!(out_dir = %out_dir.display(), files = files.len(), program = %options.build.program, "starting build");

  let rt = tokio::runtime::Runtime::new().context("Failed to create async runtime")?;
  let summary = rt
    .block_on(build_dirs(&CurrentDir, &options, files))
    .context("Build failed")?;

  for (root, warnings) in &summary.warnings {
    print_warnings(root, warnings);
  }

  if summary.roots.is_empty() {
    print_info("No kustomizations to build");
  } else {
    print_success(&format!(
      "Built {} kustomization(s) into {}",
      summary.roots.len(),
      out_dir.display()
    ));
  }

  Ok(())
}
