//! Moving a category anywhere in the document by global index.
//!
//! The destination is either "before another category" or a column of some
//! page, optionally as a brand new column right after it. A column left
//! empty by the move is removed unless it is the destination or the only
//! column of its block.

use crate::mutations::{column_mut, columns_mut, MutationError, MutationKind, MutationResult};
use bookmarks_common::{category_paths, last_columns_block, reindex, CategoryPath, ColumnPath, PagePath};
use bookmarks_parser::ast::{Column, Document};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveDestination {
    /// Before the category with this global index
    Before(usize),

    /// Append to a column. No page means the last page of the last tab; a
    /// missing or out-of-range column means the last column of the page's
    /// last column block.
    EndOfColumn {
        page: Option<PagePath>,
        column: Option<usize>,
    },

    /// Into a new column inserted right after the resolved column
    NewColumnAfter {
        page: Option<PagePath>,
        column: Option<usize>,
    },
}

#[derive(Debug, Clone, Copy)]
enum Offset {
    At(usize),
    End,
}

#[derive(Debug, Clone, Copy)]
struct Target {
    column: ColumnPath,
    offset: Offset,
    new_column: bool,
    /// Global index the destination was addressed by, if any
    before: Option<usize>,
}

pub fn move_category_before(doc: &mut Document, from: usize, before: usize) -> MutationResult {
    move_category(doc, from, &MoveDestination::Before(before))
}

pub fn move_category_to_end(
    doc: &mut Document,
    from: usize,
    page: Option<PagePath>,
    column: Option<usize>,
) -> MutationResult {
    move_category(doc, from, &MoveDestination::EndOfColumn { page, column })
}

pub fn move_category_to_new_column(
    doc: &mut Document,
    from: usize,
    page: Option<PagePath>,
    column: Option<usize>,
) -> MutationResult {
    move_category(doc, from, &MoveDestination::NewColumnAfter { page, column })
}

/// Move the category at global index `from` to `destination`.
///
/// Both ends are resolved before anything changes, so an error leaves the
/// document untouched.
pub fn move_category(doc: &mut Document, from: usize, destination: &MoveDestination) -> MutationResult {
    let paths = category_paths(doc);
    let source = *paths.get(from).ok_or(MutationError::CategoryNotFound(from))?;
    let target = resolve(doc, &paths, destination)?;

    let moved = column_mut(doc, source.column_path())?
        .categories
        .remove(source.position);

    let mut dest = target.column;
    let mut offset = target.offset;
    if let (Some(before), Offset::At(at)) = (target.before, offset) {
        if before > from && dest == source.column_path() {
            offset = Offset::At(at - 1);
        }
    }

    let mut source_column = source.column_path();
    if target.new_column {
        let columns = columns_mut(doc, dest.page_path(), dest.block)?;
        columns.insert(dest.column + 1, Column::new());
        dest.column += 1;
        offset = Offset::At(0);
        if same_block(&source_column, &dest) && source_column.column >= dest.column {
            source_column.column += 1;
        }
    }

    let categories = &mut column_mut(doc, dest)?.categories;
    let at = match offset {
        Offset::At(at) => at.min(categories.len()),
        Offset::End => categories.len(),
    };
    categories.insert(at, moved);

    prune_column(doc, source_column, dest)?;
    reindex(doc);

    debug!(from, to_block = dest.block, to_column = dest.column, "Moved category");
    Ok(())
}

fn resolve(doc: &Document, paths: &[CategoryPath], destination: &MoveDestination) -> MutationResult<Target> {
    match destination {
        MoveDestination::Before(index) => {
            let path = paths.get(*index).ok_or(MutationError::CategoryNotFound(*index))?;
            Ok(Target {
                column: path.column_path(),
                offset: Offset::At(path.position),
                new_column: false,
                before: Some(*index),
            })
        }
        MoveDestination::EndOfColumn { page, column } => Ok(Target {
            column: resolve_column(doc, *page, *column)?,
            offset: Offset::End,
            new_column: false,
            before: None,
        }),
        MoveDestination::NewColumnAfter { page, column } => Ok(Target {
            column: resolve_column(doc, *page, *column)?,
            offset: Offset::At(0),
            new_column: true,
            before: None,
        }),
    }
}

fn resolve_column(doc: &Document, page: Option<PagePath>, column: Option<usize>) -> MutationResult<ColumnPath> {
    let path = match page {
        Some(path) => path,
        None => last_page(doc).ok_or(MutationError::PageNotFound { tab: 0, page: 0 })?,
    };
    let resolved = path.resolve(doc).ok_or(MutationError::PageNotFound {
        tab: path.tab,
        page: path.page,
    })?;

    let block = last_columns_block(resolved).ok_or(MutationError::IndexOutOfRange {
        kind: MutationKind::Block,
        index: 0,
        len: 0,
    })?;
    let count = resolved.blocks[block].columns().len();
    if count == 0 {
        return Err(MutationError::IndexOutOfRange {
            kind: MutationKind::Column,
            index: column.unwrap_or(0),
            len: 0,
        });
    }
    let column = column.filter(|c| *c < count).unwrap_or(count - 1);

    Ok(ColumnPath {
        tab: path.tab,
        page: path.page,
        block,
        column,
    })
}

fn last_page(doc: &Document) -> Option<PagePath> {
    let tab = doc.tabs.len().checked_sub(1)?;
    let page = doc.tabs[tab].pages.len().checked_sub(1)?;
    Some(PagePath::new(tab, page))
}

fn same_block(a: &ColumnPath, b: &ColumnPath) -> bool {
    a.tab == b.tab && a.page == b.page && a.block == b.block
}

fn prune_column(doc: &mut Document, source: ColumnPath, dest: ColumnPath) -> MutationResult {
    if source == dest {
        return Ok(());
    }
    let columns = columns_mut(doc, source.page_path(), source.block)?;
    let emptied = columns
        .get(source.column)
        .is_some_and(|column| column.categories.is_empty());
    if emptied && columns.len() > 1 {
        columns.remove(source.column);
    }
    Ok(())
}
