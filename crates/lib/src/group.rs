//! Collapsing of changed paths into shared ancestor directories.
//!
//! Used to bound the number of builds when many fine-grained changes sit
//! under a common directory. The collapse never reaches above `min_depth`
//! path segments from the repository root.

use std::collections::BTreeSet;

use crate::util::path::segments;

/// Groups the directories of `paths` by their deepest shared ancestor.
///
/// Directories shallower than `min_depth` are dropped. After sorting,
/// neighbouring directories are merged into their common prefix whenever that
/// prefix keeps at least `max(min_depth, 1)` segments, so unrelated top-level
/// trees never merge into the repository root. Each representative is
/// returned with a trailing `/`, except the root itself which is `""`.
pub fn deepest_common_dirs<S: AsRef<str>>(paths: &[S], min_depth: usize) -> Vec<String> {
  let merge_depth = min_depth.max(1);

  let mut dirs: Vec<Vec<&str>> = paths
    .iter()
    .map(|path| segments_of_dir(path.as_ref()))
    .filter(|dir| dir.len() >= min_depth)
    .collect();
  dirs.sort();

  let mut groups: BTreeSet<String> = BTreeSet::new();
  let mut current: Option<Vec<&str>> = None;

  for dir in dirs {
    current = match current {
      None => Some(dir),
      Some(group) => {
        let shared = common_prefix_len(&group, &dir);
        if shared >= merge_depth {
          Some(group[..shared].to_vec())
        } else {
          groups.insert(render(&group));
          Some(dir)
        }
      }
    };
  }
  if let Some(group) = current {
    groups.insert(render(&group));
  }

  groups.into_iter().collect()
}

fn segments_of_dir(path: &str) -> Vec<&str> {
  let dir = match path.rfind('/') {
    Some(idx) => &path[..idx],
    None => "",
  };
  segments(dir)
}

fn common_prefix_len(a: &[&str], b: &[&str]) -> usize {
  a.iter().zip(b).take_while(|(x, y)| x == y).count()
}

fn render(segments: &[&str]) -> String {
  segments.iter().map(|s| format!("{}/", s)).collect()
}
