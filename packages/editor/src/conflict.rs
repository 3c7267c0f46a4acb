//! Entity-level optimistic concurrency.
//!
//! An editor captures the fingerprint of the entity it opened. On submit the
//! fingerprint is recomputed against the freshly loaded document and the
//! edit is rejected if the entity changed in between, whatever happened to
//! the rest of the document.

use bookmarks_common::{ColumnPath, PagePath};
use bookmarks_parser::ast::Document;
use bookmarks_parser::Fingerprint;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Address of a fingerprinted entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityRef {
    Document,
    Tab { tab: usize },
    Page(PagePath),
    Column(ColumnPath),
    Category { index: usize },
    Entry { category: usize, entry: usize },
}

impl EntityRef {
    /// Current fingerprint of the entity, or `None` if it does not exist
    pub fn fingerprint(&self, doc: &Document) -> Option<String> {
        match self {
            EntityRef::Document => Some(doc.fingerprint()),
            EntityRef::Tab { tab } => doc.tabs.get(*tab).map(|t| t.fingerprint()),
            EntityRef::Page(path) => path.resolve(doc).map(|p| p.fingerprint()),
            EntityRef::Column(path) => path.resolve(doc).map(|c| c.fingerprint()),
            EntityRef::Category { index } => doc.category(*index).map(|c| c.fingerprint()),
            EntityRef::Entry { category, entry } => doc
                .category(*category)
                .and_then(|c| c.entries.get(*entry))
                .map(|e| e.fingerprint()),
        }
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityRef::Document => write!(f, "document"),
            EntityRef::Tab { tab } => write!(f, "tab {}", tab),
            EntityRef::Page(p) => write!(f, "page {}/{}", p.tab, p.page),
            EntityRef::Column(c) => write!(f, "column {}/{}/{}/{}", c.tab, c.page, c.block, c.column),
            EntityRef::Category { index } => write!(f, "category {}", index),
            EntityRef::Entry { category, entry } => write!(f, "entry {}/{}", category, entry),
        }
    }
}

/// Errors that can occur during conflict detection
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConflictError {
    #[error("{0} not found")]
    EntityNotFound(EntityRef),

    #[error("{entity} modified concurrently")]
    Modified {
        entity: EntityRef,
        expected: String,
        actual: String,
    },
}

/// Compare the entity's current fingerprint with the one captured at load
pub fn check_fingerprint(doc: &Document, entity: &EntityRef, expected: &str) -> Result<(), ConflictError> {
    let actual = entity
        .fingerprint(doc)
        .ok_or(ConflictError::EntityNotFound(*entity))?;

    if actual != expected {
        return Err(ConflictError::Modified {
            entity: *entity,
            expected: expected.to_string(),
            actual,
        });
    }

    Ok(())
}
