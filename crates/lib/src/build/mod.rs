//! Concurrent execution of the build command.
//!
//! `kustomize build` can be slow, particularly when it fetches remote
//! resources, so every root is built in its own task. Results are collected
//! into a shared map; the lock is held only for each insert.

mod command;
mod types;

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::task::JoinSet;
use tracing::{error, info, warn};

pub use command::run_build;
pub use types::{BuildConfig, BuildError, BuiltManifest};

/// Build results keyed by root.
pub type BuildResults = HashMap<String, BuiltManifest>;

/// Builds every root concurrently.
///
/// All tasks run to completion; none is cancelled when another fails. If any
/// build fails, the first failure observed is returned and all results are
/// discarded.
pub async fn build_manifests(roots: &[String], repo_root: &Path, config: &BuildConfig) -> Result<BuildResults, BuildError> {
  let results: Arc<Mutex<BuildResults>> = Arc::new(Mutex::new(HashMap::with_capacity(roots.len())));
  let mut join_set = JoinSet::new();

  for root in roots {
    info!(root = %root, "running build");
    let root = root.clone();
    let path = repo_root.join(&root);
    let config = config.clone();
    let results = Arc::clone(&results);

    join_set.spawn(async move {
      let built = run_build(&config, &path).await?;
      info!(root = %root, "built");
      if !built.warnings.is_empty() {
        warn!(root = %root, warnings = %built.warnings, "build produced warnings");
      }
      results
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .insert(root, built);
      Ok::<_, BuildError>(())
    });
  }

  let mut first_error = None;
  while let Some(joined) = join_set.join_next().await {
    let outcome = match joined {
      Ok(outcome) => outcome,
      Err(join_error) => Err(BuildError::TaskFailed(join_error.to_string())),
    };
    if let Err(e) = outcome {
      error!(error = %e, "build failed");
      first_error.get_or_insert(e);
    }
  }

  if let Some(e) = first_error {
    return Err(e);
  }

  let built = std::mem::take(&mut *results.lock().unwrap_or_else(PoisonError::into_inner));
  Ok(built)
}
