//! # Bookmarks Workspace
//!
//! Storage and the edit service for bookmark documents.
//!
//! Two layers guard against lost updates:
//!
//! 1. **Revision**: every write names the revision it was based on, and the
//!    store rejects it if the branch has moved.
//! 2. **Fingerprint**: an edit may carry the hash of the entity the user
//!    was looking at, rejected if that entity changed even when the
//!    revision check would pass.
//!
//! ```rust
//! use bookmarks_workspace::{BookmarkService, EditRequest, MemoryStore, WorkspaceConfig};
//! use bookmarks_editor::{Mutation, MoveDestination};
//!
//! let service = BookmarkService::new(MemoryStore::new(), WorkspaceConfig::default());
//! service.create("alice", "", "Category: A\nCategory: B\n").unwrap();
//!
//! let loaded = service.load("alice", "").unwrap();
//! let request = EditRequest::new(
//!     "alice",
//!     vec![Mutation::MoveCategory { from: 1, destination: MoveDestination::Before(0) }],
//! )
//! .expecting(loaded.revision);
//! service.apply(request).unwrap();
//! ```

pub mod cache;
pub mod config;
pub mod file_store;
pub mod memory;
pub mod service;
pub mod store;

pub use cache::RevisionCache;
pub use config::{ConfigError, WorkspaceConfig};
pub use file_store::FileStore;
pub use memory::MemoryStore;
pub use service::{BookmarkService, ConflictCause, EditRequest, LoadedDocument, ServiceError};
pub use store::{
    branch_name, BookmarkStore, Commit, Revision, Snapshot, StoreError, StoreResult,
    DEFAULT_BRANCH,
};
