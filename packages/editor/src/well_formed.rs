//! Normalization of caller-supplied tree values.
//!
//! Anything a mutation inserts must come back unchanged from
//! serialize → parse, so values are brought into the shape the parser
//! produces before they reach the tree:
//!
//! - names are trimmed and a blank name becomes `None`
//! - an unnamed category takes the name the parser gives it
//! - entry names have their whitespace collapsed and default to the URL
//! - every page starts and ends with a column block, and a rule is always
//!   followed by one
//!
//! Text that cannot be represented on a single line is rejected with
//! [`MutationError::InvalidText`].

use crate::mutations::{MutationError, MutationKind, MutationResult};
use bookmarks_parser::ast::{Block, Category, Column, Entry, Page, Tab};
use bookmarks_parser::{is_directive, UNNAMED_CATEGORY};

fn invalid(kind: MutationKind, text: &str) -> MutationError {
    MutationError::InvalidText {
        kind,
        text: text.to_string(),
    }
}

fn has_line_break(text: &str) -> bool {
    text.contains(&['\n', '\r'][..])
}

pub(crate) fn name(kind: MutationKind, name: Option<&str>) -> MutationResult<Option<String>> {
    let Some(name) = name else {
        return Ok(None);
    };
    if has_line_break(name) {
        return Err(invalid(kind, name));
    }
    let name = name.trim();
    Ok((!name.is_empty()).then(|| name.to_string()))
}

pub(crate) fn entry(entry: Entry) -> MutationResult<Entry> {
    let url = entry.url.trim();
    if url.is_empty() || url.contains(char::is_whitespace) || is_directive(url) {
        return Err(invalid(MutationKind::Entry, &entry.url));
    }
    if has_line_break(&entry.name) {
        return Err(invalid(MutationKind::Entry, &entry.name));
    }

    let name = entry.name.split_whitespace().collect::<Vec<_>>().join(" ");
    Ok(Entry::new(url, (!name.is_empty()).then_some(name)))
}

pub(crate) fn category(category: Category) -> MutationResult<Category> {
    let name = name(MutationKind::Category, category.name.as_deref())?
        .unwrap_or_else(|| UNNAMED_CATEGORY.to_string());
    let entries = category
        .entries
        .into_iter()
        .map(entry)
        .collect::<MutationResult<Vec<_>>>()?;

    Ok(Category {
        name: Some(name),
        entries,
        index: category.index,
    })
}

fn column(column: Column) -> MutationResult<Column> {
    let categories = column
        .categories
        .into_iter()
        .map(category)
        .collect::<MutationResult<Vec<_>>>()?;
    Ok(Column { categories })
}

pub(crate) fn page(page: Page) -> MutationResult<Page> {
    let name = name(MutationKind::Page, page.name.as_deref())?;

    let mut blocks: Vec<Block> = Vec::with_capacity(page.blocks.len() + 1);
    for block in page.blocks {
        match block {
            Block::Rule => {
                if !matches!(blocks.last(), Some(Block::Columns(_))) {
                    blocks.push(Block::new_columns());
                }
                blocks.push(Block::Rule);
            }
            Block::Columns(columns) => {
                let columns = columns
                    .into_iter()
                    .map(column)
                    .collect::<MutationResult<Vec<_>>>()?;
                // Adjacent column blocks would read back as one
                match blocks.last_mut() {
                    Some(Block::Columns(previous)) => previous.extend(columns),
                    _ => blocks.push(Block::Columns(columns)),
                }
            }
        }
    }
    if !matches!(blocks.last(), Some(Block::Columns(_))) {
        blocks.push(Block::new_columns());
    }
    for block in &mut blocks {
        if let Some(columns) = block.column_list_mut() {
            if columns.is_empty() {
                columns.push(Column::new());
            }
        }
    }

    Ok(Page { name, blocks })
}

pub(crate) fn tab(tab: Tab) -> MutationResult<Tab> {
    let name = name(MutationKind::Tab, tab.name.as_deref())?;
    let mut pages = tab
        .pages
        .into_iter()
        .map(page)
        .collect::<MutationResult<Vec<_>>>()?;
    if pages.is_empty() {
        pages.push(Page::new(None));
    }
    Ok(Tab { name, pages })
}
