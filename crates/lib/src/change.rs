//! Classification of `git diff --raw` records.
//!
//! Each raw diff line names a status and one or two paths. The status decides
//! which path(s) feed the root search and whether the search may match the
//! path's own directory. See https://git-scm.com/docs/git-diff#_raw_output_format

use std::path::Path;

use tracing::debug;

use crate::consts::MARKER_FILENAME;
use crate::search::{SearchError, find_root};
use crate::util::path::basename;

/// Position of the `<status>\t<path>...` field among the space-separated
/// columns of a raw diff line.
const STATUS_COLUMN: usize = 4;

/// Change status letter from git's raw diff format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeStatus {
  Modification,
  TypeChange,
  Addition,
  Deletion,
  Copy,
  Rename,
  /// Unmerged paths; not relevant to build selection.
  Unmerged,
  /// Unknown change type; not relevant to build selection.
  Unknown,
  /// Anything git may emit in the future.
  Other(String),
}

impl ChangeStatus {
  /// Parses a status field. Copy and rename carry a similarity score
  /// (`R100`, `C075`) which is ignored.
  pub fn parse(field: &str) -> Self {
    let mut chars = field.chars();
    let letter = chars.next();
    let score = chars.as_str();
    let scored = score.chars().all(|c| c.is_ascii_digit());

    match (letter, score.is_empty()) {
      (Some('M'), true) => ChangeStatus::Modification,
      (Some('T'), true) => ChangeStatus::TypeChange,
      (Some('A'), true) => ChangeStatus::Addition,
      (Some('D'), true) => ChangeStatus::Deletion,
      (Some('C'), _) if scored => ChangeStatus::Copy,
      (Some('R'), _) if scored => ChangeStatus::Rename,
      (Some('U'), true) => ChangeStatus::Unmerged,
      (Some('X'), true) => ChangeStatus::Unknown,
      _ => ChangeStatus::Other(field.to_string()),
    }
  }
}

/// One line of diff input: a status and its path(s).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRecord {
  pub status: ChangeStatus,
  /// Source then destination for copies and renames, a single path otherwise.
  pub paths: Vec<String>,
}

impl ChangeRecord {
  pub fn new(status: ChangeStatus, paths: Vec<String>) -> Self {
    Self { status, paths }
  }
}

/// A path to feed into [`find_root`], with its search mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
  pub path: String,
  pub skip_self: bool,
}

impl SearchRequest {
  fn existing(path: &str) -> Self {
    Self {
      path: path.to_string(),
      skip_self: false,
    }
  }

  /// A path that is appearing or disappearing. When it is a marker file the
  /// owning root is the nearest parent, since this directory's own marker is
  /// the thing changing.
  fn appearing_or_vanishing(path: &str) -> Self {
    Self {
      path: path.to_string(),
      skip_self: basename(path) == MARKER_FILENAME,
    }
  }
}

/// Parses one raw diff line: `:<mode> <mode> <sha> <sha> <status>\t<path>[\t<path>]`.
///
/// Only the status column and the paths after it are read. Paths may contain
/// spaces; only tabs separate them. Returns `None` for lines without a status
/// column.
pub fn parse_raw_line(line: &str) -> Option<ChangeRecord> {
  let field = line.splitn(STATUS_COLUMN + 1, ' ').nth(STATUS_COLUMN)?;
  let mut parts = field.split('\t');
  let status = parts.next().filter(|s| !s.is_empty())?;
  let paths = parts.map(str::to_string).collect();
  Some(ChangeRecord::new(ChangeStatus::parse(status), paths))
}

/// Decides which paths to search for a change, per its status.
///
/// Statuses that cannot affect a build, and records missing the paths their
/// status requires, yield nothing.
pub fn classify(record: &ChangeRecord) -> Vec<SearchRequest> {
  let paths = &record.paths;
  match &record.status {
    ChangeStatus::Modification | ChangeStatus::TypeChange => {
      paths.first().map(|p| SearchRequest::existing(p)).into_iter().collect()
    }
    ChangeStatus::Addition | ChangeStatus::Deletion => paths
      .first()
      .map(|p| SearchRequest::appearing_or_vanishing(p))
      .into_iter()
      .collect(),
    // the source of a copy is untouched
    ChangeStatus::Copy => paths
      .get(1)
      .map(|p| SearchRequest::appearing_or_vanishing(p))
      .into_iter()
      .collect(),
    // a rename is a deletion of the source plus an addition of the destination
    ChangeStatus::Rename => match (paths.first(), paths.get(1)) {
      (Some(src), Some(dst)) => vec![
        SearchRequest::appearing_or_vanishing(src),
        SearchRequest::appearing_or_vanishing(dst),
      ],
      _ => Vec::new(),
    },
    ChangeStatus::Unmerged | ChangeStatus::Unknown | ChangeStatus::Other(_) => {
      debug!(status = ?record.status, "ignoring change status");
      Vec::new()
    }
  }
}

/// Resolves a change to the build roots it affects, in emission order.
///
/// No deduplication happens here: a rename within one root yields that root twice.
pub fn roots_for_change(repo_root: &Path, record: &ChangeRecord) -> Result<Vec<String>, SearchError> {
  let mut roots = Vec::new();
  for request in classify(record) {
    if let Some(root) = find_root(repo_root, &request.path, request.skip_self)? {
      roots.push(root);
    }
  }
  Ok(roots)
}
