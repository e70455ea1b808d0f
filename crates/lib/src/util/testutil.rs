//! Test utilities for kdiff-lib.
//!
//! Helpers for laying out kustomize trees on disk, turning them into git
//! repositories, and standing in for `kustomize` with a shell script.

use std::path::Path;
use std::process::Command;

use crate::build::BuildConfig;

pub const SIMPLE_KUSTOMIZATION: &str = "\
apiVersion: kustomize.config.k8s.io/v1beta1
kind: Kustomization
resources:
  - deployment.yaml
";

pub const COMPONENT_KUSTOMIZATION: &str = "\
apiVersion: kustomize.config.k8s.io/v1alpha1
kind: Component
patches:
  - path: deployment.yaml
";

/// A minimal Deployment manifest named `name`.
pub fn deployment(name: &str) -> String {
  format!(
    "apiVersion: apps/v1\nkind: Deployment\nmetadata:\n  name: {name}\nspec:\n  template:\n    spec:\n      containers:\n        - name: {name}\n          image: {name}:latest\n"
  )
}

/// Creates empty files (and their parent directories) under `root`.
pub fn touch_files(root: &Path, files: &[&str]) {
  for file in files {
    let path = root.join(file);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, "").unwrap();
  }
}

/// Writes `(relative path, content)` pairs under `root`.
pub fn write_files(root: &Path, files: &[(&str, &str)]) {
  for (file, content) in files {
    let path = root.join(file);
    if let Some(parent) = path.parent() {
      std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
  }
}

/// Runs git in `dir`, isolated from the user's configuration.
pub fn run_git(dir: &Path, args: &[&str]) {
  let output = Command::new("git")
    .args(args)
    .current_dir(dir)
    .env("GIT_CONFIG_GLOBAL", "/dev/null")
    .env("GIT_CONFIG_NOSYSTEM", "1")
    .output()
    .unwrap();
  assert!(
    output.status.success(),
    "git {} failed: {}",
    args.join(" "),
    String::from_utf8_lossy(&output.stderr)
  );
}

/// Writes `files` under `root` and stages them in a fresh git repository.
pub fn build_git_repo(root: &Path, files: &[(&str, &str)]) {
  write_files(root, files);
  run_git(root, &["init", "--quiet"]);
  run_git(root, &["add", "."]);
}

/// A `git diff --raw` line with placeholder modes and object names.
pub fn raw_diff_line(status: &str, paths: &[&str]) -> String {
  format!(
    ":100644 100644 bcd1234 0123456 {}\t{}",
    status,
    paths.join("\t")
  )
}

/// A build configuration that runs `script` with the root path as `$1`.
#[cfg(unix)]
pub fn script_build(script: &str) -> BuildConfig {
  BuildConfig {
    program: "/bin/sh".to_string(),
    args: vec!["-c".to_string(), script.to_string(), "sh".to_string()],
  }
}
