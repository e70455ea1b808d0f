//! Redaction of strongbox-encrypted files before building.
//!
//! Encrypted files are found through their git attributes and emptied in
//! place, so `kustomize build` runs without decryption credentials and no
//! secret content can reach the build output.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, info};

use crate::consts::{ENCRYPTED_PATHSPEC, NO_MATCH_PATHSPEC};

#[derive(Debug, Error)]
pub enum SecretsError {
  #[error("Error listing secrets via 'git {command}': {cause}\nstderr: {stderr}")]
  List {
    command: String,
    cause: String,
    stderr: String,
  },

  #[error("error truncating secrets file '{}': {source}", path.display())]
  Truncate {
    path: PathBuf,
    #[source]
    source: io::Error,
  },
}

/// Arguments for `git` listing encrypted files under `dirs`.
fn ls_files_args(repo_root: &Path, dirs: &[String]) -> Vec<String> {
  let mut args = vec![
    "-C".to_string(),
    repo_root.display().to_string(),
    "ls-files".to_string(),
    // NUL terminated, in case a file name contains a newline
    "-z".to_string(),
    "--".to_string(),
    NO_MATCH_PATHSPEC.to_string(),
  ];
  args.extend(dirs.iter().map(|dir| format!("{}{}", ENCRYPTED_PATHSPEC, dir)));
  args
}

/// Splits `git ls-files -z` output into paths, keeping names byte for byte.
#[cfg(unix)]
fn split_paths(stdout: &[u8]) -> Vec<PathBuf> {
  use std::ffi::OsStr;
  use std::os::unix::ffi::OsStrExt;

  stdout
    .split(|&b| b == 0)
    .filter(|name| !name.is_empty())
    .map(|name| PathBuf::from(OsStr::from_bytes(name)))
    .collect()
}

#[cfg(not(unix))]
fn split_paths(stdout: &[u8]) -> Vec<PathBuf> {
  stdout
    .split(|&b| b == 0)
    .filter(|name| !name.is_empty())
    .map(|name| PathBuf::from(String::from_utf8_lossy(name).into_owned()))
    .collect()
}

/// Lists files under `dirs` that git marks as encrypted, relative to `repo_root`.
///
/// An empty `dirs` lists nothing.
pub async fn find_secrets(repo_root: &Path, dirs: &[String]) -> Result<Vec<PathBuf>, SecretsError> {
  let args = ls_files_args(repo_root, dirs);
  let list_error = |cause: String, stderr: String| SecretsError::List {
    command: args.join(" "),
    cause,
    stderr,
  };

  let output = Command::new("git")
    .args(&args)
    .output()
    .await
    .map_err(|e| list_error(e.to_string(), String::new()))?;

  if !output.status.success() {
    return Err(list_error(
      output.status.to_string(),
      String::from_utf8_lossy(&output.stderr).into_owned(),
    ));
  }

  let secrets = split_paths(&output.stdout);

  debug!(count = secrets.len(), "listed encrypted files");
  Ok(secrets)
}

/// Empties every encrypted file under `dirs`.
///
/// Stops at the first file that cannot be truncated.
pub async fn truncate_secrets(repo_root: &Path, dirs: &[String]) -> Result<Vec<PathBuf>, SecretsError> {
  let secrets = find_secrets(repo_root, dirs).await?;

  for secret in &secrets {
    std::fs::OpenOptions::new()
      .write(true)
      .truncate(true)
      .open(repo_root.join(secret))
      .map_err(|source| SecretsError::Truncate {
        path: secret.clone(),
        source,
      })?;
    info!(path = %secret.display(), "truncated secret");
  }

  Ok(secrets)
}
