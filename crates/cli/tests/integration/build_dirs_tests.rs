use predicates::prelude::*;

use super::common::{COMPONENT_KUSTOMIZATION, SIMPLE_KUSTOMIZATION, TestEnv, deployment};

#[test]
fn builds_kustomization_owning_changed_file() {
  let env = TestEnv::new();
  env.add_kustomization("apps/web");
  env.write_file("apps/web/config/settings.yaml", "replicas: 2\n");

  env
    .kdiff_cmd()
    .arg("build-dirs")
    .arg("--out-dir")
    .arg(env.out_path())
    .arg("apps/web/config/settings.yaml")
    .assert()
    .success()
    .stdout(predicate::str::contains("Built 1 kustomization(s)"))
    .stderr(predicate::str::contains("found kustomization build dir"));

  assert_eq!(env.read_out_file("apps/web/manifests.yaml"), deployment("apps/web"));
}

#[test]
fn nothing_to_build_writes_nothing() {
  let env = TestEnv::new();
  env.add_kustomization("apps/web");
  env.write_file("README.md", "# repo\n");

  env
    .kdiff_cmd()
    .arg("build-dirs")
    .arg("--out-dir")
    .arg(env.out_path())
    .arg("README.md")
    .assert()
    .success()
    .stdout(predicate::str::contains("No kustomizations to build"));

  assert!(!env.out_path().exists());
}

#[test]
fn builds_each_root_once_and_skips_components() {
  let env = TestEnv::new();
  env.add_kustomization("first");
  env.add_kustomization("second");
  env.write_file("shared/kustomization.yaml", COMPONENT_KUSTOMIZATION);
  env.write_file("shared/patch.yaml", "op: replace\n");

  env
    .kdiff_cmd()
    .arg("build-dirs")
    .arg("--out-dir")
    .arg(env.out_path())
    .args([
      "first/deployment.yaml",
      "first/kustomization.yaml",
      "second/deployment.yaml",
      "shared/patch.yaml",
    ])
    .assert()
    .success()
    .stdout(predicate::str::contains("Built 2 kustomization(s)"));

  assert_eq!(env.read_out_file("first/manifests.yaml"), deployment("first"));
  assert_eq!(env.read_out_file("second/manifests.yaml"), deployment("second"));
  assert!(!env.out_path().join("shared").exists());
}

#[test]
fn truncate_secrets_empties_encrypted_files() {
  let env = TestEnv::new();
  env.add_kustomization("apps/web");
  env.write_file("apps/web/db-secret.yaml", "ENCRYPTED");
  env.write_file("apps/web/.gitattributes", "*-secret.yaml filter=strongbox diff=strongbox\n");
  env.init_git();

  env
    .kdiff_cmd()
    .arg("build-dirs")
    .arg("--out-dir")
    .arg(env.out_path())
    .arg("--truncate-secrets")
    .arg("apps/web/deployment.yaml")
    .assert()
    .success();

  assert_eq!(env.read_repo_file("apps/web/db-secret.yaml"), "");
  assert_eq!(env.read_out_file("apps/web/manifests.yaml"), deployment("apps/web"));
}

#[test]
fn encode_paths_writes_flat_files() {
  let env = TestEnv::new();
  env.add_kustomization("apps/web");

  env
    .kdiff_cmd()
    .arg("build-dirs")
    .arg("--out-dir")
    .arg(env.out_path())
    .arg("--encode-paths")
    .arg("apps/web/deployment.yaml")
    .assert()
    .success();

  assert_eq!(env.read_out_file("YXBwcy93ZWI="), deployment("apps/web"));
}

#[test]
fn dir_depth_groups_changed_files() {
  let env = TestEnv::new();
  env.add_kustomization("apps");
  env.add_kustomization("apps/web");
  env.add_kustomization("apps/api");

  env
    .kdiff_cmd()
    .arg("build-dirs")
    .arg("--out-dir")
    .arg(env.out_path())
    .args(["--dir-depth", "1"])
    .args(["apps/web/deployment.yaml", "apps/api/deployment.yaml"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Built 1 kustomization(s)"));

  assert_eq!(env.read_out_file("apps/manifests.yaml"), deployment("apps"));
  assert!(!env.out_path().join("apps/web").exists());
}

#[test]
fn build_warnings_are_printed_in_a_block() {
  let env = TestEnv::new();
  env.add_kustomization("apps/web");
  env.write_file("apps/web/warn.txt", "field 'bases' is deprecated\n");

  env
    .kdiff_cmd()
    .arg("build-dirs")
    .arg("--out-dir")
    .arg(env.out_path())
    .arg("apps/web/deployment.yaml")
    .assert()
    .success()
    .stderr(predicate::str::contains(
      "---start Warnings---\nWarnings for: apps/web\nfield 'bases' is deprecated\n---End warnings---\n",
    ));
}

#[test]
fn build_failure_exits_nonzero_with_stderr() {
  let env = TestEnv::new();
  env.add_kustomization("apps/web");
  env.write_file("apps/web/broken.txt", "");

  env
    .kdiff_cmd()
    .arg("build-dirs")
    .arg("--out-dir")
    .arg(env.out_path())
    .arg("apps/web/deployment.yaml")
    .assert()
    .failure()
    .code(1)
    .stderr(predicate::str::contains("Error running '"))
    .stderr(predicate::str::contains("stderr: cannot build"));

  assert!(!env.out_path().exists());
}

#[test]
fn missing_build_tool_fails() {
  let env = TestEnv::new();

  env
    .kdiff_cmd()
    .env("KDIFF_KUSTOMIZE", "/nonexistent/kustomize")
    .arg("build-dirs")
    .arg("--out-dir")
    .arg(env.out_path())
    .assert()
    .failure()
    .stderr(predicate::str::contains(
      "requires `/nonexistent/kustomize` to be installed https://kubectl.docs.kubernetes.io/installation/kustomize/",
    ));
}

#[test]
fn root_level_kustomization_builds_into_fresh_out_dir() {
  let env = TestEnv::new();
  env.write_file("kustomization.yaml", SIMPLE_KUSTOMIZATION);
  env.write_file("deployment.yaml", &deployment("root"));
  let out_dir = env.out_path().join("not-yet-created");

  env
    .kdiff_cmd()
    .arg("build-dirs")
    .arg("--out-dir")
    .arg(&out_dir)
    .arg("deployment.yaml")
    .assert()
    .success();

  assert_eq!(
    std::fs::read_to_string(out_dir.join("manifests.yaml")).unwrap(),
    deployment("root")
  );
}
