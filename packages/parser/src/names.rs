//! Human-friendly labels for entities whose own name may be missing.
//!
//! Unnamed pages and tabs borrow a label from their content when the
//! content is small enough to summarise.

use crate::ast::{Category, Entry, Page, Tab};

/// Longest child label that may be joined into a two-item summary
const SHORT_LABEL: usize = 15;

fn non_blank(name: Option<&str>) -> Option<&str> {
    name.filter(|n| !n.trim().is_empty())
}

fn join_short(first: String, second: String) -> String {
    if !first.is_empty()
        && !second.is_empty()
        && first.chars().count() <= SHORT_LABEL
        && second.chars().count() <= SHORT_LABEL
    {
        format!("{}, {}", first, second)
    } else {
        String::new()
    }
}

impl Entry {
    pub fn display_name(&self) -> &str {
        non_blank(Some(&self.name)).unwrap_or(&self.url)
    }
}

impl Category {
    pub fn display_name(&self) -> String {
        if let Some(name) = non_blank(self.name.as_deref()) {
            return name.to_string();
        }
        match self.entries.as_slice() {
            [only] => only.display_name().to_string(),
            _ => String::new(),
        }
    }
}

impl Page {
    pub fn display_name(&self) -> String {
        if let Some(name) = non_blank(self.name.as_deref()) {
            return name.to_string();
        }
        let categories: Vec<&Category> = self.categories().collect();
        match categories.as_slice() {
            [only] => only.display_name(),
            [first, second] => join_short(first.display_name(), second.display_name()),
            _ => String::new(),
        }
    }
}

impl Tab {
    pub fn display_name(&self) -> String {
        if let Some(name) = non_blank(self.name.as_deref()) {
            return name.to_string();
        }
        match self.pages.as_slice() {
            [only] => only.display_name(),
            [first, second] => join_short(first.display_name(), second.display_name()),
            _ => String::new(),
        }
    }
}
