//! Extract and replace pieces of bookmark text by position.
//!
//! Each helper parses the whole text, edits the tree and serializes it
//! again, so results are always in canonical form. On error the caller's
//! text is left as it was.

use bookmarks_common::{category_path, reindex};
use bookmarks_parser::ast::{Document, Page, Tab};
use bookmarks_parser::{parse, serialize};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("category index {0} not found")]
    CategoryNotFound(usize),

    #[error("tab index {0} out of range")]
    TabNotFound(usize),

    #[error("page index {page} out of range in tab {tab}")]
    PageNotFound { tab: usize, page: usize },
}

/// A tab split into its name and header-less body text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabText {
    pub name: Option<String>,
    pub body: String,
}

/// A page split into its name and body text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageText {
    pub name: Option<String>,
    pub body: String,
}

/// Text of the category with the given global index
pub fn extract_category(text: &str, index: usize) -> Result<String, LookupError> {
    let doc = parse(text);
    doc.category(index)
        .map(|category| category.to_string())
        .ok_or(LookupError::CategoryNotFound(index))
}

/// Splice the categories found in `new_text` in place of the category with
/// the given global index. Zero categories removes it.
pub fn replace_category(text: &str, index: usize, new_text: &str) -> Result<String, LookupError> {
    let mut doc = parse(text);
    let path = category_path(&doc, index).ok_or(LookupError::CategoryNotFound(index))?;
    let replacements: Vec<_> = parse(new_text).categories().cloned().collect();

    let column = path
        .column_path()
        .resolve_mut(&mut doc)
        .ok_or(LookupError::CategoryNotFound(index))?;
    column
        .categories
        .splice(path.position..=path.position, replacements);

    reindex(&mut doc);
    Ok(serialize(&doc))
}

pub fn extract_tab(text: &str, index: usize) -> Result<TabText, LookupError> {
    let doc = parse(text);
    let tab = doc.tabs.get(index).ok_or(LookupError::TabNotFound(index))?;

    let body = serialize(&Document {
        tabs: vec![Tab {
            name: None,
            pages: tab.pages.clone(),
        }],
    });
    Ok(TabText {
        name: tab.name.clone(),
        body,
    })
}

/// Replace a tab with `name` and the content parsed from `body`. Tab
/// directives inside `body` start further tabs after the replaced one.
pub fn replace_tab(text: &str, index: usize, name: Option<&str>, body: &str) -> Result<String, LookupError> {
    let mut doc = parse(text);
    if index >= doc.tabs.len() {
        return Err(LookupError::TabNotFound(index));
    }

    let tabs = tabs_from_body(name, body);
    doc.tabs.splice(index..=index, tabs);

    reindex(&mut doc);
    Ok(serialize(&doc))
}

pub fn append_tab(text: &str, name: Option<&str>, body: &str) -> String {
    let mut doc = parse(text);
    doc.tabs.extend(tabs_from_body(name, body));
    reindex(&mut doc);
    serialize(&doc)
}

pub fn extract_page(text: &str, tab: usize, page: usize) -> Result<PageText, LookupError> {
    let doc = parse(text);
    let found = doc
        .tabs
        .get(tab)
        .ok_or(LookupError::TabNotFound(tab))?
        .pages
        .get(page)
        .ok_or(LookupError::PageNotFound { tab, page })?;

    Ok(PageText {
        name: found.name.clone(),
        body: found.to_string(),
    })
}

/// Replace a page with `name` and the content parsed from `body`. Page
/// directives inside `body` start further pages after the replaced one.
pub fn replace_page(
    text: &str,
    tab: usize,
    page: usize,
    name: Option<&str>,
    body: &str,
) -> Result<String, LookupError> {
    let mut doc = parse(text);
    let pages = &mut doc
        .tabs
        .get_mut(tab)
        .ok_or(LookupError::TabNotFound(tab))?
        .pages;
    if page >= pages.len() {
        return Err(LookupError::PageNotFound { tab, page });
    }

    let mut replacements: Vec<Page> = parse(body)
        .tabs
        .into_iter()
        .flat_map(|t| t.pages)
        .collect();
    if let Some(first) = replacements.first_mut() {
        first.name = non_empty(name);
    }
    pages.splice(page..=page, replacements);

    reindex(&mut doc);
    Ok(serialize(&doc))
}

fn tabs_from_body(name: Option<&str>, body: &str) -> Vec<Tab> {
    let mut tabs = parse(body).tabs;
    if let Some(first) = tabs.first_mut() {
        first.name = non_empty(name);
    }
    tabs
}

fn non_empty(name: Option<&str>) -> Option<String> {
    name.map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
}
