//! kdiff-lib: change-driven kustomize builds
//!
//! Given the files changed in a repository, this crate works out which
//! kustomize build roots they affect and renders those roots:
//! - `search`: upward search from a path to its owning `kustomization.yaml`
//! - `change`: classification of `git diff --raw` records into searches
//! - `group`: collapsing many changed paths to shared ancestor directories
//! - `descriptor`: spotting `kind: Component` kustomizations
//! - `secrets`: emptying strongbox-encrypted files before building
//! - `build`: concurrent `kustomize build` runs
//! - `output`: writing the rendered manifests
//! - `pipeline`: the end-to-end operations built from the above

pub mod build;
pub mod change;
pub mod consts;
pub mod descriptor;
pub mod group;
pub mod output;
pub mod pipeline;
pub mod search;
pub mod secrets;
pub mod util;
pub mod workdir;

pub use pipeline::{BuildDirsOptions, BuildSummary, PipelineError, base_roots_for_diff, build_dirs};
