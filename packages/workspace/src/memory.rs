//! In-process store keeping a commit log per user and branch.

use crate::store::{
    branch_name, digest, BookmarkStore, Commit, Revision, Snapshot, StoreError, StoreResult,
};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use tracing::warn;

#[derive(Debug, Clone)]
struct Version {
    text: String,
    commit: Commit,
}

impl Version {
    fn snapshot(&self) -> Snapshot {
        Snapshot {
            text: self.text.clone(),
            revision: self.commit.revision.clone(),
        }
    }
}

type Branches = HashMap<String, Vec<Version>>;

/// Store backed by memory.
///
/// Revisions chain like commit ids: each is the hash of the previous
/// revision and the new text, so committing the same text twice still
/// produces a new revision.
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<String, Branches>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: PoisonError<T>) -> StoreError {
    StoreError::Backend("store lock poisoned".to_string())
}

fn next_revision(previous: Option<&Revision>, text: &str) -> Revision {
    let previous = previous.map(Revision::as_str).unwrap_or_default();
    Revision::new(digest(&[previous.as_bytes(), &b"\n"[..], text.as_bytes()]))
}

/// Commits leading up to and including the one `git_ref` resolves to
fn lineage<'a>(branches: &'a Branches, git_ref: &str) -> Option<&'a [Version]> {
    if let Some(log) = branches.get(branch_name(git_ref)) {
        return Some(log.as_slice());
    }
    branches.values().find_map(|log| {
        log.iter()
            .position(|version| version.commit.revision.as_str() == git_ref)
            .map(|at| &log[..=at])
    })
}

impl BookmarkStore for MemoryStore {
    fn read(&self, user: &str, git_ref: &str) -> StoreResult<Snapshot> {
        let users = self.users.read().map_err(poisoned)?;
        users
            .get(user)
            .and_then(|branches| lineage(branches, git_ref))
            .and_then(|log| log.last())
            .map(Version::snapshot)
            .ok_or_else(|| StoreError::NotFound(git_ref.to_string()))
    }

    fn write(
        &self,
        user: &str,
        git_ref: &str,
        branch: &str,
        text: &str,
        expected: &Revision,
    ) -> StoreResult<Revision> {
        let branch = branch_name(branch);
        let mut users = self.users.write().map_err(poisoned)?;
        let branches = users
            .get_mut(user)
            .ok_or_else(|| StoreError::NotFound(git_ref.to_string()))?;

        let (base, forked) = match branches.get(branch).and_then(|log| log.last()) {
            Some(head) => (head.commit.revision.clone(), None),
            None => {
                let log = lineage(branches, git_ref)
                    .filter(|log| !log.is_empty())
                    .ok_or_else(|| StoreError::NotFound(git_ref.to_string()))?;
                let base = log[log.len() - 1].commit.revision.clone();
                (base, Some(log.to_vec()))
            }
        };

        if &base != expected {
            warn!(user, branch, expected = %expected, actual = %base, "Rejected stale write");
            return Err(StoreError::Conflict {
                expected: expected.clone(),
                actual: base,
            });
        }

        let revision = next_revision(Some(&base), text);
        let log = branches
            .entry(branch.to_string())
            .or_insert_with(|| forked.unwrap_or_default());
        log.push(Version {
            text: text.to_string(),
            commit: Commit::now(revision.clone(), "Update bookmarks"),
        });
        Ok(revision)
    }

    fn create(&self, user: &str, branch: &str, text: &str) -> StoreResult<Revision> {
        let mut users = self.users.write().map_err(poisoned)?;
        let log = users
            .entry(user.to_string())
            .or_default()
            .entry(branch_name(branch).to_string())
            .or_default();

        let revision = next_revision(log.last().map(|v| &v.commit.revision), text);
        log.push(Version {
            text: text.to_string(),
            commit: Commit::now(revision.clone(), "Create bookmarks"),
        });
        Ok(revision)
    }

    fn history(&self, user: &str, branch: &str) -> StoreResult<Vec<Commit>> {
        let users = self.users.read().map_err(poisoned)?;
        let log = users
            .get(user)
            .and_then(|branches| branches.get(branch_name(branch)))
            .ok_or_else(|| StoreError::NotFound(branch.to_string()))?;
        Ok(log.iter().rev().map(|v| v.commit.clone()).collect())
    }
}
