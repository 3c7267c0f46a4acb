//! Content fingerprints used for optimistic edit checks.
//!
//! A fingerprint is the lowercase hex SHA-256 of an entity's serialized
//! text, so it changes exactly when the entity's text changes.

use crate::ast::*;
use sha2::{Digest, Sha256};

pub trait Fingerprint {
    fn fingerprint(&self) -> String;
}

/// Hex SHA-256 of arbitrary text
pub fn hash_text(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hex::encode(hasher.finalize())
}

macro_rules! display_fingerprint {
    ($($ty:ty),*) => {
        $(
            impl Fingerprint for $ty {
                fn fingerprint(&self) -> String {
                    hash_text(&self.to_string())
                }
            }
        )*
    };
}

display_fingerprint!(Document, Tab, Block, Column, Category, Entry);

/// Page text excludes its header, so the name is folded in separately
impl Fingerprint for Page {
    fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.name.as_deref().unwrap_or_default().as_bytes());
        hasher.update(b"\n");
        hasher.update(self.to_string().as_bytes());
        hex::encode(hasher.finalize())
    }
}
