//! Storage boundary for bookmark documents.
//!
//! A store keeps one bookmark text per (user, branch) together with a
//! commit history. Every stored text is identified by an opaque
//! [`Revision`]; writes name the revision they were based on and are
//! rejected when the branch has moved on since.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use thiserror::Error;

/// Branch used when a ref or branch name is empty
pub const DEFAULT_BRANCH: &str = "main";

const BRANCH_PREFIX: &str = "refs/heads/";

/// Opaque identifier of a stored document version
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Revision(String);

impl Revision {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Revision {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Document text as of one revision
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub text: String,
    pub revision: Revision,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    pub revision: Revision,
    pub message: String,
    pub committed_at: DateTime<Utc>,
}

impl Commit {
    pub fn now(revision: Revision, message: &str) -> Self {
        Self {
            revision,
            message: message.to_string(),
            committed_at: Utc::now(),
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Bookmarks not found: {0}")]
    NotFound(String),

    #[error("bookmarks modified concurrently")]
    Conflict { expected: Revision, actual: Revision },

    #[error("Invalid branch name: {0:?}")]
    InvalidRef(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage backend error: {0}")]
    Backend(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence for bookmark documents.
///
/// `git_ref` names either a branch (`main` or `refs/heads/main`) or a
/// revision previously returned by the store. An empty ref or branch means
/// [`DEFAULT_BRANCH`].
pub trait BookmarkStore: Send + Sync {
    /// Current text and revision at `git_ref`
    fn read(&self, user: &str, git_ref: &str) -> StoreResult<Snapshot>;

    /// Commit `text` on `branch`.
    ///
    /// The branch is forked from `git_ref` when it does not exist yet.
    /// Fails with [`StoreError::Conflict`] unless `expected` is the revision
    /// the commit would be based on.
    fn write(
        &self,
        user: &str,
        git_ref: &str,
        branch: &str,
        text: &str,
        expected: &Revision,
    ) -> StoreResult<Revision>;

    /// Commit `text` on `branch` unconditionally, creating the user's
    /// storage if needed
    fn create(&self, user: &str, branch: &str, text: &str) -> StoreResult<Revision>;

    /// Commits on `branch`, newest first
    fn history(&self, user: &str, branch: &str) -> StoreResult<Vec<Commit>>;
}

/// Branch name a ref points at
pub fn branch_name(git_ref: &str) -> &str {
    let name = git_ref.strip_prefix(BRANCH_PREFIX).unwrap_or(git_ref);
    if name.is_empty() {
        DEFAULT_BRANCH
    } else {
        name
    }
}

/// Hex SHA-256 over the given parts in order
pub(crate) fn digest(parts: &[&[u8]]) -> String {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    hex::encode(hasher.finalize())
}
