use bookmarks_parser::ast::*;

/// Visitor pattern for transforming the bookmark tree in place
///
/// Default implementations walk the entire tree. Override specific
/// visit_*_mut methods to act on nodes.
pub trait VisitorMut: Sized {
    fn visit_document_mut(&mut self, doc: &mut Document) {
        walk_document_mut(self, doc);
    }

    fn visit_tab_mut(&mut self, tab: &mut Tab) {
        walk_tab_mut(self, tab);
    }

    fn visit_page_mut(&mut self, page: &mut Page) {
        walk_page_mut(self, page);
    }

    fn visit_block_mut(&mut self, block: &mut Block) {
        walk_block_mut(self, block);
    }

    fn visit_column_mut(&mut self, column: &mut Column) {
        walk_column_mut(self, column);
    }

    fn visit_category_mut(&mut self, category: &mut Category) {
        walk_category_mut(self, category);
    }

    fn visit_entry_mut(&mut self, _entry: &mut Entry) {
        // Leaf node, no children to walk
    }
}

// Default walk implementations for mutable visitor

pub fn walk_document_mut<V: VisitorMut>(visitor: &mut V, doc: &mut Document) {
    for tab in &mut doc.tabs {
        visitor.visit_tab_mut(tab);
    }
}

pub fn walk_tab_mut<V: VisitorMut>(visitor: &mut V, tab: &mut Tab) {
    for page in &mut tab.pages {
        visitor.visit_page_mut(page);
    }
}

pub fn walk_page_mut<V: VisitorMut>(visitor: &mut V, page: &mut Page) {
    for block in &mut page.blocks {
        visitor.visit_block_mut(block);
    }
}

pub fn walk_block_mut<V: VisitorMut>(visitor: &mut V, block: &mut Block) {
    match block {
        Block::Rule => {
            // No children to walk
        }
        Block::Columns(columns) => {
            for column in columns {
                visitor.visit_column_mut(column);
            }
        }
    }
}

pub fn walk_column_mut<V: VisitorMut>(visitor: &mut V, column: &mut Column) {
    for category in &mut column.categories {
        visitor.visit_category_mut(category);
    }
}

pub fn walk_category_mut<V: VisitorMut>(visitor: &mut V, category: &mut Category) {
    for entry in &mut category.entries {
        visitor.visit_entry_mut(entry);
    }
}
