pub mod ast;
pub mod fingerprint;
pub mod names;
pub mod parser;
pub mod serializer;

#[cfg(test)]
mod tests_parser;
#[cfg(test)]
mod tests_serializer;

pub use ast::{Block, Category, Column, Document, Entry, Page, Tab};
pub use fingerprint::{hash_text, Fingerprint};
pub use parser::{is_directive, parse, Parser, UNNAMED_CATEGORY};
pub use serializer::{serialize, Serializer};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic() {
        let doc = parse("Category: Search\nhttps://duckduckgo.com DuckDuckGo\n");
        assert_eq!(doc.category_count(), 1);
        assert_eq!(doc.category(0).unwrap().entries[0].name, "DuckDuckGo");
    }
}
