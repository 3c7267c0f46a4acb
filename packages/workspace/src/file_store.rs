//! Plain-file store.
//!
//! ```text
//! <root>/<sha256(user)>/<branch>.txt   current text
//! <root>/<sha256(user)>/<branch>.log   one JSON commit per line
//! ```
//!
//! The revision of a text is the hex SHA-256 of its content.

use crate::store::{
    branch_name, digest, BookmarkStore, Commit, Revision, Snapshot, StoreError, StoreResult,
};
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, warn};

pub struct FileStore {
    root: PathBuf,
    // Serializes read-check-write sequences within this process
    write_lock: Mutex<()>,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn user_dir(&self, user: &str) -> PathBuf {
        self.root.join(digest(&[user.as_bytes()]))
    }

    fn branch_file(&self, user: &str, branch: &str, extension: &str) -> StoreResult<PathBuf> {
        let branch = branch_name(branch);
        if branch.starts_with('.') || branch.contains(&['/', '\\'][..]) {
            return Err(StoreError::InvalidRef(branch.to_string()));
        }
        Ok(self.user_dir(user).join(format!("{branch}.{extension}")))
    }

    /// Look up a revision among the user's current branch texts
    fn find_revision(&self, user: &str, git_ref: &str) -> StoreResult<Option<Snapshot>> {
        let entries = match fs::read_dir(self.user_dir(user)) {
            Ok(entries) => entries,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        for entry in entries {
            let path = entry?.path();
            if path.extension().map_or(true, |ext| ext != "txt") {
                continue;
            }
            let text = fs::read_to_string(&path)?;
            if content_revision(&text).as_str() == git_ref {
                return Ok(Some(Snapshot {
                    revision: content_revision(&text),
                    text,
                }));
            }
        }
        Ok(None)
    }

    /// Stage the text, log the commit, then move the text into place. A
    /// failure at any step leaves both files as they were.
    fn commit(&self, user: &str, branch: &str, text: &str, message: &str) -> StoreResult<Revision> {
        let path = self.branch_file(user, branch, "txt")?;
        let log_path = self.branch_file(user, branch, "log")?;
        fs::create_dir_all(self.user_dir(user))?;

        let revision = content_revision(text);
        let staging = path.with_extension("txt.tmp");
        fs::write(&staging, text)?;

        let (log, previous_len) =
            match append_log(&log_path, &Commit::now(revision.clone(), message)) {
                Ok(appended) => appended,
                Err(err) => {
                    discard(&staging);
                    return Err(err);
                }
            };

        if let Err(err) = fs::rename(&staging, &path) {
            discard(&staging);
            if let Err(truncate_err) = log.set_len(previous_len) {
                warn!(path = %log_path.display(), error = %truncate_err, "Failed to roll back commit log");
            }
            return Err(err.into());
        }

        debug!(path = %path.display(), revision = %revision, "Wrote bookmarks file");
        Ok(revision)
    }
}

/// Append one commit line, returning the log and its length before the
/// append. A failed write is truncated away.
fn append_log(path: &Path, commit: &Commit) -> StoreResult<(File, u64)> {
    let line = serde_json::to_string(commit).map_err(|err| StoreError::Backend(err.to_string()))?;
    let mut log = OpenOptions::new().create(true).append(true).open(path)?;
    let previous_len = log.metadata()?.len();
    if let Err(err) = writeln!(log, "{line}") {
        let _ = log.set_len(previous_len);
        return Err(err.into());
    }
    Ok((log, previous_len))
}

fn discard(staging: &Path) {
    if let Err(err) = fs::remove_file(staging) {
        warn!(path = %staging.display(), error = %err, "Failed to remove staged bookmarks");
    }
}

fn content_revision(text: &str) -> Revision {
    Revision::new(digest(&[text.as_bytes()]))
}

impl BookmarkStore for FileStore {
    fn read(&self, user: &str, git_ref: &str) -> StoreResult<Snapshot> {
        let path = self.branch_file(user, git_ref, "txt");
        if let Ok(path) = &path {
            match fs::read_to_string(path) {
                Ok(text) => {
                    return Ok(Snapshot {
                        revision: content_revision(&text),
                        text,
                    })
                }
                Err(err) if err.kind() == ErrorKind::NotFound => {}
                Err(err) => return Err(err.into()),
            }
        }

        self.find_revision(user, git_ref)?
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
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| StoreError::Backend("store lock poisoned".to_string()))?;

        let base = match self.read(user, branch) {
            Ok(head) => head,
            Err(StoreError::NotFound(_)) => self.read(user, git_ref)?,
            Err(err) => return Err(err),
        };

        if &base.revision != expected {
            warn!(user, branch, expected = %expected, actual = %base.revision, "Rejected stale write");
            return Err(StoreError::Conflict {
                expected: expected.clone(),
                actual: base.revision,
            });
        }

        self.commit(user, branch, text, "Update bookmarks")
    }

    fn create(&self, user: &str, branch: &str, text: &str) -> StoreResult<Revision> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| StoreError::Backend("store lock poisoned".to_string()))?;
        self.commit(user, branch, text, "Create bookmarks")
    }

    fn history(&self, user: &str, branch: &str) -> StoreResult<Vec<Commit>> {
        let path = self.branch_file(user, branch, "log")?;
        let log = match fs::read_to_string(&path) {
            Ok(log) => log,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(StoreError::NotFound(branch.to_string()))
            }
            Err(err) => return Err(err.into()),
        };

        let mut commits = log
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(serde_json::from_str::<Commit>)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|err| StoreError::Backend(format!("{}: {err}", path.display())))?;
        commits.reverse();
        Ok(commits)
    }
}
