//! Addressing categories, pages and columns by coordinates.
//!
//! A category's global index is its position in reading order, so the
//! flattened path list doubles as the index → location table.

use crate::visitor::{walk_category_mut, VisitorMut};
use bookmarks_parser::ast::*;
use serde::{Deserialize, Serialize};

/// Location of a category in the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryPath {
    pub tab: usize,
    pub page: usize,
    pub block: usize,
    pub column: usize,
    /// Position within the column
    pub position: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PagePath {
    pub tab: usize,
    pub page: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnPath {
    pub tab: usize,
    pub page: usize,
    pub block: usize,
    pub column: usize,
}

impl CategoryPath {
    pub fn page_path(&self) -> PagePath {
        PagePath {
            tab: self.tab,
            page: self.page,
        }
    }

    pub fn column_path(&self) -> ColumnPath {
        ColumnPath {
            tab: self.tab,
            page: self.page,
            block: self.block,
            column: self.column,
        }
    }

    pub fn resolve<'a>(&self, doc: &'a Document) -> Option<&'a Category> {
        self.column_path().resolve(doc)?.categories.get(self.position)
    }
}

impl PagePath {
    pub fn new(tab: usize, page: usize) -> Self {
        Self { tab, page }
    }

    pub fn resolve<'a>(&self, doc: &'a Document) -> Option<&'a Page> {
        doc.page(self.tab, self.page)
    }

    pub fn resolve_mut<'a>(&self, doc: &'a mut Document) -> Option<&'a mut Page> {
        doc.page_mut(self.tab, self.page)
    }
}

impl ColumnPath {
    pub fn resolve<'a>(&self, doc: &'a Document) -> Option<&'a Column> {
        self.page_path()
            .resolve(doc)?
            .blocks
            .get(self.block)?
            .columns()
            .get(self.column)
    }

    pub fn resolve_mut<'a>(&self, doc: &'a mut Document) -> Option<&'a mut Column> {
        self.page_path()
            .resolve_mut(doc)?
            .blocks
            .get_mut(self.block)?
            .columns_mut()
            .get_mut(self.column)
    }

    pub fn page_path(&self) -> PagePath {
        PagePath::new(self.tab, self.page)
    }
}

/// Every category location in reading order; entry `i` is the category
/// whose global index is `i`
pub fn category_paths(doc: &Document) -> Vec<CategoryPath> {
    let mut paths = Vec::new();
    for (tab, t) in doc.tabs.iter().enumerate() {
        for (page, p) in t.pages.iter().enumerate() {
            for (block, b) in p.blocks.iter().enumerate() {
                for (column, c) in b.columns().iter().enumerate() {
                    for position in 0..c.categories.len() {
                        paths.push(CategoryPath {
                            tab,
                            page,
                            block,
                            column,
                            position,
                        });
                    }
                }
            }
        }
    }
    paths
}

/// Location of the category with the given global index
pub fn category_path(doc: &Document, index: usize) -> Option<CategoryPath> {
    category_paths(doc).get(index).copied()
}

/// Page holding the category with the given global index
pub fn page_for_category(doc: &Document, index: usize) -> Option<PagePath> {
    category_path(doc, index).map(|path| path.page_path())
}

struct Reindexer {
    next: usize,
}

impl VisitorMut for Reindexer {
    fn visit_category_mut(&mut self, category: &mut Category) {
        category.index = self.next;
        self.next += 1;
        walk_category_mut(self, category);
    }
}

/// Reassign category indices 0..N-1 in reading order
pub fn reindex(doc: &mut Document) {
    Reindexer { next: 0 }.visit_document_mut(doc);
}

/// Index of the last `Columns` block of a page, if any
pub fn last_columns_block(page: &Page) -> Option<usize> {
    page.blocks.iter().rposition(|block| !block.is_rule())
}
