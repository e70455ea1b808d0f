//! End-to-end orchestration.
//!
//! [`build_dirs`] maps changed files to build roots, drops components,
//! optionally redacts secrets, builds every root concurrently and writes the
//! results. [`base_roots_for_diff`] is the lighter query that only reports
//! which roots a raw diff touches.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::build::{BuildConfig, BuildError, build_manifests};
use crate::change::{parse_raw_line, roots_for_change};
use crate::consts::KUSTOMIZE_INSTALL_URL;
use crate::descriptor::{DescriptorError, remove_components};
use crate::group::deepest_common_dirs;
use crate::output::{OutputError, OutputLayout, write_manifests};
use crate::search::{SearchError, find_roots};
use crate::secrets::{SecretsError, truncate_secrets};
use crate::workdir::WorkingDirectoryProvider;

#[derive(Debug, Error)]
pub enum PipelineError {
  #[error("error reading working directory: {0}")]
  WorkingDirectory(#[source] io::Error),

  #[error("requires `{program}` to be installed {}", KUSTOMIZE_INSTALL_URL)]
  ToolMissing { program: String },

  #[error(transparent)]
  Search(#[from] SearchError),

  #[error(transparent)]
  Descriptor(#[from] DescriptorError),

  #[error(transparent)]
  Secrets(#[from] SecretsError),

  #[error(transparent)]
  Build(#[from] BuildError),

  #[error(transparent)]
  Output(#[from] OutputError),

  #[error("reading diff input: {0}")]
  ReadInput(#[source] io::Error),

  #[error("writing build roots: {0}")]
  WriteOutput(#[source] io::Error),
}

/// Options for [`build_dirs`].
#[derive(Debug, Clone)]
pub struct BuildDirsOptions {
  /// Directory receiving the built manifests.
  pub out_dir: PathBuf,
  /// Empty encrypted files under the selected roots before building.
  pub truncate_secrets: bool,
  /// Collapse changed paths to shared ancestors no shallower than this
  /// depth before searching for roots.
  pub group_min_depth: Option<usize>,
  pub layout: OutputLayout,
  pub build: BuildConfig,
}

impl BuildDirsOptions {
  pub fn new(out_dir: impl Into<PathBuf>) -> Self {
    Self {
      out_dir: out_dir.into(),
      truncate_secrets: false,
      group_min_depth: None,
      layout: OutputLayout::default(),
      build: BuildConfig::default(),
    }
  }
}

/// What a [`build_dirs`] run did.
#[derive(Debug, Default)]
pub struct BuildSummary {
  /// Roots that were built, sorted.
  pub roots: Vec<String>,
  /// Encrypted files that were emptied.
  pub truncated: Vec<PathBuf>,
  /// Files written, in root order.
  pub written: Vec<PathBuf>,
  /// Non-empty build stderr per root, sorted by root.
  pub warnings: Vec<(String, String)>,
}

/// Checks that `program` can be executed, either as a path or via `PATH`.
pub fn ensure_installed(program: &str) -> Result<(), PipelineError> {
  let missing = || PipelineError::ToolMissing {
    program: program.to_string(),
  };

  if program.is_empty() {
    return Err(missing());
  }
  if program.contains(std::path::MAIN_SEPARATOR) || program.contains('/') {
    return if Path::new(program).is_file() { Ok(()) } else { Err(missing()) };
  }

  let path_var = std::env::var_os("PATH").ok_or_else(missing)?;
  if std::env::split_paths(&path_var).any(|dir| dir.join(program).is_file()) {
    Ok(())
  } else {
    Err(missing())
  }
}

/// Builds every root affected by `paths` and writes the manifests.
///
/// Any failure aborts the run. Secrets are redacted and all builds succeed
/// before anything is written, so a failed build leaves the output untouched.
pub async fn build_dirs<S: AsRef<str>>(
  workdir: &dyn WorkingDirectoryProvider,
  options: &BuildDirsOptions,
  paths: &[S],
) -> Result<BuildSummary, PipelineError> {
  let repo_root = workdir.current_dir().map_err(PipelineError::WorkingDirectory)?;
  ensure_installed(&options.build.program)?;

  let roots = match options.group_min_depth {
    Some(min_depth) => {
      let groups = deepest_common_dirs(paths, min_depth);
      debug!(groups = groups.len(), min_depth, "grouped changed paths");
      find_roots(&repo_root, &groups)?
    }
    None => find_roots(&repo_root, paths)?,
  };

  let mut roots = remove_components(&repo_root, roots)?;
  roots.sort();

  let truncated = if options.truncate_secrets {
    truncate_secrets(&repo_root, &roots).await?
  } else {
    Vec::new()
  };

  let results = build_manifests(&roots, &repo_root, &options.build).await?;

  let mut warnings: Vec<(String, String)> = results
    .iter()
    .filter(|(_, built)| !built.warnings.is_empty())
    .map(|(root, built)| (root.clone(), built.warnings.clone()))
    .collect();
  warnings.sort();

  let written = write_manifests(&options.out_dir, &results, options.layout)?;
  info!(roots = roots.len(), written = written.len(), "build complete");

  Ok(BuildSummary {
    roots,
    truncated,
    written,
    warnings,
  })
}

/// Reports the build roots touched by each line of `git diff --raw` output.
///
/// Roots are written to `out` one per line, in input order and without
/// deduplication. Lines that carry no change are skipped.
pub fn base_roots_for_diff<R: BufRead, W: Write>(repo_root: &Path, input: R, mut out: W) -> Result<(), PipelineError> {
  for line in input.lines() {
    let line = line.map_err(PipelineError::ReadInput)?;
    let Some(record) = parse_raw_line(&line) else {
      debug!(line = %line, "skipping line without change status");
      continue;
    };
    for root in roots_for_change(repo_root, &record)? {
      writeln!(out, "{}", root).map_err(PipelineError::WriteOutput)?;
    }
  }
  Ok(())
}
