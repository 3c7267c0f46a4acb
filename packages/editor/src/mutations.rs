//! # Structural Mutations
//!
//! Index-addressed edits on the bookmark tree, one variant per operation.
//!
//! ## Semantics
//!
//! - Every mutation checks all of its coordinates before touching the tree.
//!   A rejected mutation returns an error and leaves the document as it was.
//! - Tabs, pages and columns are never emptied: deleting the last one puts
//!   a fresh empty one in its place.
//! - Category indices are recomputed after every successful mutation.
//! - Inserted names, entries and pages are normalized to the shape the
//!   parser produces, so the edited tree reads back unchanged from its text.
//! - `Shift*` swaps with the neighbour `delta` places away; `Move*` splices
//!   the item out and reinserts it at the target position.

use crate::category_move::{move_category, MoveDestination};
use crate::well_formed;
use bookmarks_common::{last_columns_block, reindex, CategoryPath, ColumnPath, PagePath};
use bookmarks_parser::ast::{Category, Column, Document, Entry, Page, Tab};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use tracing::debug;

/// Semantic mutations on a bookmark document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum Mutation {
    SwapTabs { a: usize, b: usize },
    MoveTab { from: usize, to: usize },
    ShiftTab { index: usize, delta: isize },
    InsertTab { at: usize, tab: Tab },
    DeleteTab { at: usize },
    RenameTab { at: usize, name: Option<String> },

    SwapPages { tab: usize, a: usize, b: usize },
    MovePage { tab: usize, from: usize, to: usize },
    ShiftPage { tab: usize, index: usize, delta: isize },
    InsertPage { tab: usize, at: usize, page: Page },
    DeletePage { tab: usize, at: usize },
    RenamePage { at: PagePath, name: Option<String> },
    /// Replace a page's name and content wholesale
    ReplacePage { at: PagePath, page: Page },

    InsertColumn { page: PagePath, block: usize, at: usize },
    DeleteColumn { page: PagePath, block: usize, at: usize },
    MoveColumn { page: PagePath, block: usize, from: usize, to: usize },

    ShiftCategory { column: ColumnPath, position: usize, delta: isize },
    InsertCategory { column: ColumnPath, at: usize, category: Category },
    DeleteCategory { column: ColumnPath, at: usize },
    /// Move by coordinates; the source column is kept even when emptied
    MoveCategoryTo { from: CategoryPath, to: CategoryPath },
    ReplaceCategory { index: usize, category: Category },
    /// Append to a column of a page's last column block. Out-of-range tab
    /// falls back to the first tab, page and column to the last ones.
    AppendCategory { page: PagePath, column: usize, category: Category },

    InsertEntry { category: usize, at: usize, entry: Entry },
    DeleteEntry { category: usize, at: usize },
    ShiftEntry { category: usize, index: usize, delta: isize },
    MoveEntry { category: usize, from: usize, to: usize },
    UpdateEntry { category: usize, at: usize, entry: Entry },
    MoveEntryBetween {
        from_category: usize,
        from: usize,
        to_category: usize,
        to: usize,
    },

    /// Cross-container move by global index
    MoveCategory { from: usize, destination: MoveDestination },
}

/// Tree level named in errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MutationKind {
    Tab,
    Page,
    Block,
    Column,
    Category,
    Entry,
}

impl fmt::Display for MutationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MutationKind::Tab => "tab",
            MutationKind::Page => "page",
            MutationKind::Block => "block",
            MutationKind::Column => "column",
            MutationKind::Category => "category",
            MutationKind::Entry => "entry",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MutationError {
    #[error("{kind} index {index} out of range (len {len})")]
    IndexOutOfRange {
        kind: MutationKind,
        index: usize,
        len: usize,
    },

    #[error("cannot shift {kind} {index} by {delta} (len {len})")]
    ShiftOutOfRange {
        kind: MutationKind,
        index: usize,
        delta: isize,
        len: usize,
    },

    #[error("category index {0} not found")]
    CategoryNotFound(usize),

    #[error("page {tab}/{page} not found")]
    PageNotFound { tab: usize, page: usize },

    #[error("block {block} is a horizontal rule")]
    RuleBlock { block: usize },

    /// Text that would not read back as the same value
    #[error("invalid {kind} text {text:?}")]
    InvalidText { kind: MutationKind, text: String },
}

pub type MutationResult<T = ()> = Result<T, MutationError>;

impl Mutation {
    /// Apply mutation to the document with validation
    pub fn apply(&self, doc: &mut Document) -> MutationResult {
        self.apply_unindexed(doc)?;
        reindex(doc);
        debug!(mutation = self.label(), "Applied mutation");
        Ok(())
    }

    /// Check the mutation against `doc` without changing it
    pub fn validate(&self, doc: &Document) -> MutationResult {
        self.apply_unindexed(&mut doc.clone())
    }

    /// Variant name, for logs
    pub fn label(&self) -> &'static str {
        match self {
            Mutation::SwapTabs { .. } => "swap_tabs",
            Mutation::MoveTab { .. } => "move_tab",
            Mutation::ShiftTab { .. } => "shift_tab",
            Mutation::InsertTab { .. } => "insert_tab",
            Mutation::DeleteTab { .. } => "delete_tab",
            Mutation::RenameTab { .. } => "rename_tab",
            Mutation::SwapPages { .. } => "swap_pages",
            Mutation::MovePage { .. } => "move_page",
            Mutation::ShiftPage { .. } => "shift_page",
            Mutation::InsertPage { .. } => "insert_page",
            Mutation::DeletePage { .. } => "delete_page",
            Mutation::RenamePage { .. } => "rename_page",
            Mutation::ReplacePage { .. } => "replace_page",
            Mutation::InsertColumn { .. } => "insert_column",
            Mutation::DeleteColumn { .. } => "delete_column",
            Mutation::MoveColumn { .. } => "move_column",
            Mutation::ShiftCategory { .. } => "shift_category",
            Mutation::InsertCategory { .. } => "insert_category",
            Mutation::DeleteCategory { .. } => "delete_category",
            Mutation::MoveCategoryTo { .. } => "move_category_to",
            Mutation::ReplaceCategory { .. } => "replace_category",
            Mutation::AppendCategory { .. } => "append_category",
            Mutation::InsertEntry { .. } => "insert_entry",
            Mutation::DeleteEntry { .. } => "delete_entry",
            Mutation::ShiftEntry { .. } => "shift_entry",
            Mutation::MoveEntry { .. } => "move_entry",
            Mutation::UpdateEntry { .. } => "update_entry",
            Mutation::MoveEntryBetween { .. } => "move_entry_between",
            Mutation::MoveCategory { .. } => "move_category",
        }
    }

    fn apply_unindexed(&self, doc: &mut Document) -> MutationResult {
        use MutationKind as K;

        match self {
            Mutation::SwapTabs { a, b } => swap(&mut doc.tabs, K::Tab, *a, *b),
            Mutation::MoveTab { from, to } => splice(&mut doc.tabs, K::Tab, *from, *to),
            Mutation::ShiftTab { index, delta } => shift(&mut doc.tabs, K::Tab, *index, *delta),
            Mutation::InsertTab { at, tab } => {
                let tab = well_formed::tab(tab.clone())?;
                insert(&mut doc.tabs, K::Tab, *at, tab)
            }
            Mutation::DeleteTab { at } => {
                remove(&mut doc.tabs, K::Tab, *at)?;
                if doc.tabs.is_empty() {
                    doc.tabs.push(Tab::new(None));
                }
                Ok(())
            }
            Mutation::RenameTab { at, name } => {
                let name = well_formed::name(K::Tab, name.as_deref())?;
                tab_mut(doc, *at)?.name = name;
                Ok(())
            }

            Mutation::SwapPages { tab, a, b } => swap(&mut tab_mut(doc, *tab)?.pages, K::Page, *a, *b),
            Mutation::MovePage { tab, from, to } => {
                splice(&mut tab_mut(doc, *tab)?.pages, K::Page, *from, *to)
            }
            Mutation::ShiftPage { tab, index, delta } => {
                shift(&mut tab_mut(doc, *tab)?.pages, K::Page, *index, *delta)
            }
            Mutation::InsertPage { tab, at, page } => {
                let page = well_formed::page(page.clone())?;
                insert(&mut tab_mut(doc, *tab)?.pages, K::Page, *at, page)
            }
            Mutation::DeletePage { tab, at } => {
                let pages = &mut tab_mut(doc, *tab)?.pages;
                remove(pages, K::Page, *at)?;
                if pages.is_empty() {
                    pages.push(Page::new(None));
                }
                Ok(())
            }
            Mutation::RenamePage { at, name } => {
                let name = well_formed::name(K::Page, name.as_deref())?;
                page_mut(doc, *at)?.name = name;
                Ok(())
            }
            Mutation::ReplacePage { at, page } => {
                let page = well_formed::page(page.clone())?;
                *page_mut(doc, *at)? = page;
                Ok(())
            }

            Mutation::InsertColumn { page, block, at } => {
                insert(columns_mut(doc, *page, *block)?, K::Column, *at, Column::new())
            }
            Mutation::DeleteColumn { page, block, at } => {
                let columns = columns_mut(doc, *page, *block)?;
                remove(columns, K::Column, *at)?;
                if columns.is_empty() {
                    columns.push(Column::new());
                }
                Ok(())
            }
            Mutation::MoveColumn { page, block, from, to } => {
                splice(columns_mut(doc, *page, *block)?, K::Column, *from, *to)
            }

            Mutation::ShiftCategory { column, position, delta } => shift(
                &mut column_mut(doc, *column)?.categories,
                K::Category,
                *position,
                *delta,
            ),
            Mutation::InsertCategory { column, at, category } => {
                let category = well_formed::category(category.clone())?;
                insert(&mut column_mut(doc, *column)?.categories, K::Category, *at, category)
            }
            Mutation::DeleteCategory { column, at } => {
                remove(&mut column_mut(doc, *column)?.categories, K::Category, *at).map(|_| ())
            }
            Mutation::MoveCategoryTo { from, to } => move_category_to(doc, from, to),
            Mutation::ReplaceCategory { index, category } => {
                let category = well_formed::category(category.clone())?;
                *category_mut(doc, *index)? = category;
                Ok(())
            }
            Mutation::AppendCategory { page, column, category } => {
                let category = well_formed::category(category.clone())?;
                append_category(doc, *page, *column, category);
                Ok(())
            }

            Mutation::InsertEntry { category, at, entry } => {
                let entry = well_formed::entry(entry.clone())?;
                insert(&mut category_mut(doc, *category)?.entries, K::Entry, *at, entry)
            }
            Mutation::DeleteEntry { category, at } => {
                remove(&mut category_mut(doc, *category)?.entries, K::Entry, *at).map(|_| ())
            }
            Mutation::ShiftEntry { category, index, delta } => shift(
                &mut category_mut(doc, *category)?.entries,
                K::Entry,
                *index,
                *delta,
            ),
            Mutation::MoveEntry { category, from, to } => {
                splice(&mut category_mut(doc, *category)?.entries, K::Entry, *from, *to)
            }
            Mutation::UpdateEntry { category, at, entry } => {
                let entry = well_formed::entry(entry.clone())?;
                let entries = &mut category_mut(doc, *category)?.entries;
                check(K::Entry, *at, entries.len())?;
                entries[*at] = entry;
                Ok(())
            }
            Mutation::MoveEntryBetween {
                from_category,
                from,
                to_category,
                to,
            } => move_entry_between(doc, *from_category, *from, *to_category, *to),

            Mutation::MoveCategory { from, destination } => move_category(doc, *from, destination),
        }
    }
}

// Sequence helpers: each checks its indices before changing the vector

pub(crate) fn check(kind: MutationKind, index: usize, len: usize) -> MutationResult {
    if index < len {
        Ok(())
    } else {
        Err(MutationError::IndexOutOfRange { kind, index, len })
    }
}

fn swap<T>(items: &mut [T], kind: MutationKind, a: usize, b: usize) -> MutationResult {
    check(kind, a, items.len())?;
    check(kind, b, items.len())?;
    items.swap(a, b);
    Ok(())
}

fn splice<T>(items: &mut Vec<T>, kind: MutationKind, from: usize, to: usize) -> MutationResult {
    check(kind, from, items.len())?;
    check(kind, to, items.len())?;
    let item = items.remove(from);
    items.insert(to, item);
    Ok(())
}

fn shift<T>(items: &mut [T], kind: MutationKind, index: usize, delta: isize) -> MutationResult {
    check(kind, index, items.len())?;
    let target = index
        .checked_add_signed(delta)
        .filter(|target| *target < items.len())
        .ok_or(MutationError::ShiftOutOfRange {
            kind,
            index,
            delta,
            len: items.len(),
        })?;
    items.swap(index, target);
    Ok(())
}

fn insert<T>(items: &mut Vec<T>, kind: MutationKind, at: usize, item: T) -> MutationResult {
    if at > items.len() {
        return Err(MutationError::IndexOutOfRange {
            kind,
            index: at,
            len: items.len(),
        });
    }
    items.insert(at, item);
    Ok(())
}

fn remove<T>(items: &mut Vec<T>, kind: MutationKind, at: usize) -> MutationResult<T> {
    check(kind, at, items.len())?;
    Ok(items.remove(at))
}

// Tree lookups

pub(crate) fn tab_mut(doc: &mut Document, tab: usize) -> MutationResult<&mut Tab> {
    let len = doc.tabs.len();
    doc.tabs.get_mut(tab).ok_or(MutationError::IndexOutOfRange {
        kind: MutationKind::Tab,
        index: tab,
        len,
    })
}

pub(crate) fn page_mut(doc: &mut Document, path: PagePath) -> MutationResult<&mut Page> {
    path.resolve_mut(doc).ok_or(MutationError::PageNotFound {
        tab: path.tab,
        page: path.page,
    })
}

pub(crate) fn columns_mut(
    doc: &mut Document,
    path: PagePath,
    block: usize,
) -> MutationResult<&mut Vec<Column>> {
    let blocks = &mut page_mut(doc, path)?.blocks;
    let len = blocks.len();
    blocks
        .get_mut(block)
        .ok_or(MutationError::IndexOutOfRange {
            kind: MutationKind::Block,
            index: block,
            len,
        })?
        .column_list_mut()
        .ok_or(MutationError::RuleBlock { block })
}

pub(crate) fn column_mut(doc: &mut Document, path: ColumnPath) -> MutationResult<&mut Column> {
    let columns = columns_mut(doc, path.page_path(), path.block)?;
    let len = columns.len();
    columns.get_mut(path.column).ok_or(MutationError::IndexOutOfRange {
        kind: MutationKind::Column,
        index: path.column,
        len,
    })
}

fn category_mut(doc: &mut Document, index: usize) -> MutationResult<&mut Category> {
    doc.category_mut(index)
        .ok_or(MutationError::CategoryNotFound(index))
}

fn move_category_to(doc: &mut Document, from: &CategoryPath, to: &CategoryPath) -> MutationResult {
    let source_len = column_mut(doc, from.column_path())?.categories.len();
    check(MutationKind::Category, from.position, source_len)?;

    let dest_len = column_mut(doc, to.column_path())?.categories.len();
    let dest_len = if from.column_path() == to.column_path() {
        dest_len - 1
    } else {
        dest_len
    };
    if to.position > dest_len {
        return Err(MutationError::IndexOutOfRange {
            kind: MutationKind::Category,
            index: to.position,
            len: dest_len,
        });
    }

    let category = column_mut(doc, from.column_path())?
        .categories
        .remove(from.position);
    column_mut(doc, to.column_path())?
        .categories
        .insert(to.position, category);
    Ok(())
}

fn move_entry_between(
    doc: &mut Document,
    from_category: usize,
    from: usize,
    to_category: usize,
    to: usize,
) -> MutationResult {
    let source_len = category_mut(doc, from_category)?.entries.len();
    check(MutationKind::Entry, from, source_len)?;

    let dest_len = category_mut(doc, to_category)?.entries.len();
    let dest_len = if from_category == to_category {
        dest_len - 1
    } else {
        dest_len
    };
    if to > dest_len {
        return Err(MutationError::IndexOutOfRange {
            kind: MutationKind::Entry,
            index: to,
            len: dest_len,
        });
    }

    let entry = category_mut(doc, from_category)?.entries.remove(from);
    category_mut(doc, to_category)?.entries.insert(to, entry);
    Ok(())
}

fn append_category(doc: &mut Document, path: PagePath, column: usize, category: Category) {
    let tab = if path.tab < doc.tabs.len() { path.tab } else { 0 };
    let Some(tab) = doc.tabs.get_mut(tab) else {
        return;
    };
    if tab.pages.is_empty() {
        tab.pages.push(Page::new(None));
    }
    let page = path.page.min(tab.pages.len() - 1);
    let page = &mut tab.pages[page];

    let block = match last_columns_block(page) {
        Some(block) => block,
        None => page.last_columns_index(),
    };
    if let Some(columns) = page.blocks[block].column_list_mut() {
        if columns.is_empty() {
            columns.push(Column::new());
        }
        let column = column.min(columns.len() - 1);
        columns[column].categories.push(category);
    }
}
