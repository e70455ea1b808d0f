//! Types for running the external build command.

use std::path::Path;

use thiserror::Error;

use crate::consts::{BUILD_PROGRAM_ENV, DEFAULT_BUILD_PROGRAM};

/// Errors that can occur while building roots.
#[derive(Debug, Error)]
pub enum BuildError {
  /// The build command could not be run or exited unsuccessfully.
  #[error("Error running '{command}': {cause}\nstderr: {stderr}")]
  CommandFailed {
    command: String,
    cause: String,
    stderr: String,
  },

  /// A build task panicked or was aborted.
  #[error("build task did not complete: {0}")]
  TaskFailed(String),
}

/// How to invoke the external build for one root.
///
/// The root's absolute path is appended as the final argument, so the
/// default runs `kustomize build <root>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildConfig {
  pub program: String,
  pub args: Vec<String>,
}

impl Default for BuildConfig {
  fn default() -> Self {
    Self {
      program: DEFAULT_BUILD_PROGRAM.to_string(),
      args: vec!["build".to_string()],
    }
  }
}

impl BuildConfig {
  /// Default configuration with the program taken from `KDIFF_KUSTOMIZE` when set.
  pub fn from_env() -> Self {
    let mut config = Self::default();
    if let Ok(program) = std::env::var(BUILD_PROGRAM_ENV)
      && !program.is_empty()
    {
      config.program = program;
    }
    config
  }

  /// Arguments for building the root at `path`.
  pub fn args_for(&self, path: &Path) -> Vec<String> {
    let mut args = self.args.clone();
    args.push(path.display().to_string());
    args
  }

  /// The full command line, for messages.
  pub fn command_line(&self, path: &Path) -> String {
    let mut parts = vec![self.program.clone()];
    parts.extend(self.args_for(path));
    parts.join(" ")
  }
}

/// Output of a successful build of one root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuiltManifest {
  /// Exact stdout of the build command.
  pub manifest: Vec<u8>,
  /// Stderr of the build command. Non-empty means warnings, not failure.
  pub warnings: String,
}
