//! # Document Handle
//!
//! A parsed bookmark document plus its editing state.
//!
//! ## Lifecycle
//!
//! ```text
//! Load → Parse → Check → Edit → Serialize
//!   ↓      ↓       ↓       ↓        ↓
//! Text   Tree  Fingerprint Mutations Text
//! ```

use crate::conflict::{check_fingerprint, EntityRef};
use crate::{EditorError, Mutation};
use bookmarks_parser::ast::Document;
use bookmarks_parser::{parse, serialize, Fingerprint};
use tracing::debug;

/// Editable bookmark document
#[derive(Debug, Clone)]
pub struct EditDocument {
    /// Incremented once per successful mutation or batch
    pub version: u64,
    tree: Document,
    dirty: bool,
}

impl EditDocument {
    pub fn from_source(source: &str) -> Self {
        Self::from_tree(parse(source))
    }

    pub fn from_tree(tree: Document) -> Self {
        Self {
            version: 0,
            tree,
            dirty: false,
        }
    }

    pub fn tree(&self) -> &Document {
        &self.tree
    }

    /// Reject with a conflict if `entity` no longer has the fingerprint the
    /// caller saw
    pub fn check(&self, entity: &EntityRef, expected: &str) -> Result<(), EditorError> {
        check_fingerprint(&self.tree, entity, expected)?;
        Ok(())
    }

    /// Apply a mutation
    pub fn apply(&mut self, mutation: &Mutation) -> Result<u64, EditorError> {
        mutation.apply(&mut self.tree)?;
        self.version += 1;
        self.dirty = true;
        Ok(self.version)
    }

    /// Apply mutations in order. If any fails none of them take effect.
    pub fn apply_batch(&mut self, mutations: &[Mutation]) -> Result<u64, EditorError> {
        let mut staged = self.tree.clone();
        for mutation in mutations {
            mutation.apply(&mut staged)?;
        }

        debug!(count = mutations.len(), "Applied mutation batch");

        self.tree = staged;
        self.version += 1;
        self.dirty = true;
        Ok(self.version)
    }

    /// Check if document has unapplied-to-storage changes
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Serialize the current tree and clear the dirty flag
    pub fn take_text(&mut self) -> String {
        self.dirty = false;
        serialize(&self.tree)
    }

    pub fn to_text(&self) -> String {
        serialize(&self.tree)
    }

    pub fn fingerprint(&self) -> String {
        self.tree.fingerprint()
    }

    pub fn into_tree(self) -> Document {
        self.tree
    }
}
