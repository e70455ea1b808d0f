//! Lexical handling of repository-relative paths.
//!
//! Change paths come from git and always use `/`, so these helpers work on
//! strings rather than [`std::path::Path`] and never touch the filesystem.

/// Normalizes a relative path: drops empty and `.` segments and folds `..`.
///
/// Returns `.` for a path that normalizes to nothing. A `..` that climbs
/// above the start is kept, so the parent of `.` is `..`.
pub fn clean(path: &str) -> String {
  let mut segments: Vec<&str> = Vec::new();
  for segment in path.split('/') {
    match segment {
      "" | "." => {}
      ".." => match segments.last() {
        Some(&last) if last != ".." => {
          segments.pop();
        }
        _ => segments.push(".."),
      },
      other => segments.push(other),
    }
  }

  if segments.is_empty() {
    ".".to_string()
  } else {
    segments.join("/")
  }
}

/// Directory part of a path: everything before the last `/`, cleaned.
///
/// `dirname("a/b.yaml") == "a"`, `dirname("b.yaml") == "."` and a trailing
/// separator is treated as naming the directory itself: `dirname("a/b/") == "a/b"`.
pub fn dirname(path: &str) -> String {
  match path.rfind('/') {
    Some(idx) => clean(&path[..=idx]),
    None => ".".to_string(),
  }
}

/// Final segment of a path.
pub fn basename(path: &str) -> &str {
  let trimmed = path.trim_end_matches('/');
  match trimmed.rfind('/') {
    Some(idx) => &trimmed[idx + 1..],
    None => trimmed,
  }
}

/// The directory one level up, `..` once the repository root is passed.
pub fn parent(dir: &str) -> String {
  clean(&format!("{}/..", dir))
}

/// Path segments of a directory, with `.` yielding none.
pub fn segments(dir: &str) -> Vec<&str> {
  dir.split('/').filter(|s| !s.is_empty() && *s != ".").collect()
}
