//! # Bookmarks Editor
//!
//! Structural editing for bookmark documents.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ parser: text → tree, tree → text            │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: mutations on the tree               │
//! │  - Index-addressed structural edits         │
//! │  - Cross-container category moves           │
//! │  - Fingerprint checks before editing        │
//! │  - Extract/replace helpers over raw text    │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ workspace: storage, revisions, service      │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use bookmarks_editor::{EditDocument, Mutation, MoveDestination};
//!
//! let mut doc = EditDocument::from_source("Category: A\nCategory: B\nCategory: C\n");
//! doc.apply(&Mutation::MoveCategory {
//!     from: 2,
//!     destination: MoveDestination::Before(0),
//! })
//! .unwrap();
//!
//! assert_eq!(doc.to_text(), "Category: C\nCategory: A\nCategory: B\n");
//! ```

mod category_move;
mod conflict;
mod document;
mod errors;
mod mutations;
mod well_formed;
pub mod text_edit;

pub use category_move::{
    move_category, move_category_before, move_category_to_end, move_category_to_new_column,
    MoveDestination,
};
pub use conflict::{check_fingerprint, ConflictError, EntityRef};
pub use document::EditDocument;
pub use errors::EditorError;
pub use mutations::{Mutation, MutationError, MutationKind, MutationResult};
pub use text_edit::{LookupError, PageText, TabText};

// Re-export common types for convenience
pub use bookmarks_common::{CategoryPath, ColumnPath, PagePath};
pub use bookmarks_parser::ast::Document as BookmarkTree;
