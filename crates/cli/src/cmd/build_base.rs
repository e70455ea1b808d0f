use std::io;
use std::path::Path;

use anyhow::{Context, Result};

use kdiff_lib::base_roots_for_diff;

/// Reads `git diff --raw` from stdin and prints one affected root per line.
pub fn cmd_build_base(build_root: &Path) -> Result<()> {
  let stdin = io::stdin().lock();
  let stdout = io::stdout().lock();
  base_roots_for_diff(build_root, stdin, stdout).context("Failed to resolve build bases")?;
  Ok(())
}
