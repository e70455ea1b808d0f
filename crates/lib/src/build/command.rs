//! A single invocation of the build command.

use std::path::Path;

use tokio::process::Command;
use tracing::debug;

use super::types::{BuildConfig, BuildError, BuiltManifest};

/// Runs the build command against `path`, capturing stdout and stderr.
///
/// A non-zero exit is an error carrying the command's stderr; stderr from a
/// successful run is returned as warnings.
pub async fn run_build(config: &BuildConfig, path: &Path) -> Result<BuiltManifest, BuildError> {
  let command_line = config.command_line(path);
  debug!(command = %command_line, "spawning build");

  let output = Command::new(&config.program)
    .args(config.args_for(path))
    .output()
    .await
    .map_err(|e| BuildError::CommandFailed {
      command: command_line.clone(),
      cause: e.to_string(),
      stderr: String::new(),
    })?;

  let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

  if !output.status.success() {
    return Err(BuildError::CommandFailed {
      command: command_line,
      cause: output.status.to_string(),
      stderr,
    });
  }

  Ok(BuiltManifest {
    manifest: output.stdout,
    warnings: stderr,
  })
}
