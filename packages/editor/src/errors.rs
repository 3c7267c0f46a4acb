//! Error types for the editor

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditorError {
    #[error("Mutation error: {0}")]
    Mutation(#[from] crate::mutations::MutationError),

    #[error(transparent)]
    Conflict(#[from] crate::conflict::ConflictError),

    #[error(transparent)]
    Lookup(#[from] crate::text_edit::LookupError),
}
