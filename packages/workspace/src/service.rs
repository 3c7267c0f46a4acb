//! Bookmark service: load, check, mutate, save.
//!
//! ## Edit flow
//!
//! ```text
//! read current ─→ revision check ─→ parse ─→ fingerprint guard
//!                                                  ↓
//!  invalidate cache ←─ store.write ←─ serialize ←─ mutations
//! ```
//!
//! Both checks reject with [`ServiceError::Conflict`]; nothing is written
//! unless every step succeeds. Conflicts are returned to the caller, never
//! retried here.

use crate::cache::RevisionCache;
use crate::config::WorkspaceConfig;
use crate::store::{branch_name, BookmarkStore, Commit, Revision, Snapshot, StoreError};
use bookmarks_editor::{check_fingerprint, ConflictError, EditDocument, EditorError, EntityRef, Mutation};
use bookmarks_parser::ast::Document;
use bookmarks_parser::parse;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Why an edit was rejected as concurrent
#[derive(Debug, Error)]
pub enum ConflictCause {
    /// The stored document moved past the revision the caller loaded
    #[error("bookmarks modified concurrently")]
    Revision { expected: Revision, actual: Revision },

    /// The entity being edited no longer matches the caller's fingerprint
    #[error(transparent)]
    Entity(#[from] ConflictError),
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Conflict(ConflictCause),

    #[error(transparent)]
    Edit(#[from] EditorError),

    #[error(transparent)]
    Store(StoreError),
}

impl ServiceError {
    pub fn is_conflict(&self) -> bool {
        matches!(self, ServiceError::Conflict(_))
    }
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict { expected, actual } => {
                ServiceError::Conflict(ConflictCause::Revision { expected, actual })
            }
            err => ServiceError::Store(err),
        }
    }
}

impl From<ConflictError> for ServiceError {
    fn from(err: ConflictError) -> Self {
        ServiceError::Conflict(ConflictCause::Entity(err))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedDocument {
    pub document: Document,
    pub revision: Revision,
}

/// A batch of mutations against one user's bookmarks
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EditRequest {
    pub user: String,
    /// Ref the edit is based on; empty for the configured default
    pub git_ref: String,
    /// Branch to commit to; empty for the configured default
    pub branch: String,
    /// Revision the caller loaded, if it wants the write checked against it
    pub expected_revision: Option<Revision>,
    /// Entity fingerprint the caller saw before editing
    pub guard: Option<(EntityRef, String)>,
    pub mutations: Vec<Mutation>,
}

impl EditRequest {
    pub fn new(user: impl Into<String>, mutations: Vec<Mutation>) -> Self {
        Self {
            user: user.into(),
            mutations,
            ..Default::default()
        }
    }

    pub fn expecting(mut self, revision: Revision) -> Self {
        self.expected_revision = Some(revision);
        self
    }

    pub fn guarded(mut self, entity: EntityRef, fingerprint: impl Into<String>) -> Self {
        self.guard = Some((entity, fingerprint.into()));
        self
    }

    pub fn on_branch(mut self, git_ref: impl Into<String>, branch: impl Into<String>) -> Self {
        self.git_ref = git_ref.into();
        self.branch = branch.into();
        self
    }
}

pub struct BookmarkService<S: BookmarkStore> {
    store: S,
    cache: RevisionCache,
    config: WorkspaceConfig,
}

impl<S: BookmarkStore> BookmarkService<S> {
    pub fn new(store: S, config: WorkspaceConfig) -> Self {
        let cache = RevisionCache::new(config.cache_ttl());
        Self::with_cache(store, config, cache)
    }

    pub fn with_cache(store: S, config: WorkspaceConfig, cache: RevisionCache) -> Self {
        Self {
            store,
            cache,
            config,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn cache(&self) -> &RevisionCache {
        &self.cache
    }

    pub fn config(&self) -> &WorkspaceConfig {
        &self.config
    }

    /// Parsed document and its revision, served from the cache when fresh
    pub fn load(&self, user: &str, git_ref: &str) -> Result<LoadedDocument, ServiceError> {
        let git_ref = self.config.resolve_ref(git_ref);
        let snapshot = match self.cache.get(user, git_ref) {
            Some(snapshot) => snapshot,
            None => {
                let snapshot = self.store.read(user, git_ref)?;
                self.cache.insert(user, git_ref, snapshot.clone());
                snapshot
            }
        };

        Ok(LoadedDocument {
            document: parse(&snapshot.text),
            revision: snapshot.revision,
        })
    }

    /// Apply a batch of mutations and commit the result
    pub fn apply(&self, request: EditRequest) -> Result<Revision, ServiceError> {
        let git_ref = self.config.resolve_ref(&request.git_ref);
        let branch = self.config.resolve_branch(&request.branch);
        let user = request.user.as_str();

        let current = self.current(user, git_ref, request.expected_revision.as_ref())?;

        let mut document = EditDocument::from_source(&current.text);
        if let Some((entity, fingerprint)) = &request.guard {
            if let Err(err) = check_fingerprint(document.tree(), entity, fingerprint) {
                warn!(user, %entity, "Rejected edit of stale entity");
                return Err(err.into());
            }
        }

        document.apply_batch(&request.mutations)?;
        let text = document.take_text();
        self.commit(user, git_ref, branch, &text, &current)
    }

    /// Replace the whole document text
    pub fn save_text(
        &self,
        user: &str,
        git_ref: &str,
        branch: &str,
        text: &str,
        expected_revision: Option<&Revision>,
    ) -> Result<Revision, ServiceError> {
        let git_ref = self.config.resolve_ref(git_ref);
        let branch = self.config.resolve_branch(branch);
        let current = self.current(user, git_ref, expected_revision)?;
        self.commit(user, git_ref, branch, text, &current)
    }

    /// Start a user's bookmarks on `branch`
    pub fn create(&self, user: &str, branch: &str, text: &str) -> Result<Revision, ServiceError> {
        let branch = self.config.resolve_branch(branch);
        let revision = self.store.create(user, branch, text)?;
        self.cache.invalidate_user(user);
        info!(user, branch, revision = %revision, "Created bookmarks");
        Ok(revision)
    }

    pub fn history(&self, user: &str, branch: &str) -> Result<Vec<Commit>, ServiceError> {
        Ok(self.store.history(user, self.config.resolve_branch(branch))?)
    }

    /// Uncached read, checked against the revision the caller loaded
    fn current(
        &self,
        user: &str,
        git_ref: &str,
        expected: Option<&Revision>,
    ) -> Result<Snapshot, ServiceError> {
        let current = self.store.read(user, git_ref)?;
        match expected {
            Some(expected) if expected != &current.revision => {
                warn!(user, git_ref, expected = %expected, actual = %current.revision, "Rejected stale edit");
                Err(ServiceError::Conflict(ConflictCause::Revision {
                    expected: expected.clone(),
                    actual: current.revision,
                }))
            }
            _ => Ok(current),
        }
    }

    fn commit(
        &self,
        user: &str,
        git_ref: &str,
        branch: &str,
        text: &str,
        current: &Snapshot,
    ) -> Result<Revision, ServiceError> {
        if text == current.text && branch_name(git_ref) == branch_name(branch) {
            debug!(user, branch, "Bookmarks unchanged, skipping write");
            return Ok(current.revision.clone());
        }

        let revision = self
            .store
            .write(user, git_ref, branch, text, &current.revision)?;
        self.cache.invalidate_user(user);
        info!(user, branch, revision = %revision, "Saved bookmarks");
        Ok(revision)
    }
}
