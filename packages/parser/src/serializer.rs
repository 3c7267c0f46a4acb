use crate::ast::*;
use std::fmt;

/// Serializer converts a document back to bookmark text
///
/// Output is canonical: every line ends in `\n`, blank lines are never
/// written and headers that parsing would recreate implicitly are elided.
/// Serialize-then-parse reproduces the same tree.
#[derive(Debug, Default, Clone, Copy)]
pub struct Serializer;

impl Serializer {
    pub fn new() -> Self {
        Self
    }

    /// Serialize a Document to text
    pub fn serialize(&self, doc: &Document) -> String {
        let mut output = String::new();
        for (i, tab) in doc.tabs.iter().enumerate() {
            self.serialize_tab(tab, i, doc.tabs.len(), &mut output);
        }
        output
    }

    fn serialize_tab(&self, tab: &Tab, position: usize, siblings: usize, output: &mut String) {
        if position > 0 || tab.name.is_some() {
            self.write_tab_header(tab, output);
        } else if siblings > 1 && is_untouched(tab) {
            // An empty leading tab would otherwise vanish on reparse
            self.write_tab_header(tab, output);
        }
        self.serialize_tab_body(tab, output);
    }

    fn write_tab_header(&self, tab: &Tab, output: &mut String) {
        write_header(output, "Tab", tab.name.as_deref());
    }

    pub(crate) fn serialize_tab_body(&self, tab: &Tab, output: &mut String) {
        for (i, page) in tab.pages.iter().enumerate() {
            self.serialize_page_header(page, i, tab.pages.len(), output);
            self.serialize_page_body(page, output);
        }
    }

    fn serialize_page_header(
        &self,
        page: &Page,
        position: usize,
        siblings: usize,
        output: &mut String,
    ) {
        match (&page.name, position) {
            (Some(name), _) => write_header(output, "Page", Some(name)),
            // An untouched first page is replaced by the next `Page` line,
            // so it needs an explicit header to survive
            (None, 0) if siblings > 1 && page.is_blank() => write_header(output, "Page", None),
            (None, 0) => {}
            (None, _) => write_header(output, "Page", None),
        }
    }

    pub(crate) fn serialize_page_body(&self, page: &Page, output: &mut String) {
        for block in &page.blocks {
            self.serialize_block(block, output);
        }
    }

    fn serialize_block(&self, block: &Block, output: &mut String) {
        match block {
            // The rule line also opens the following column block
            Block::Rule => output.push_str("--\n"),
            Block::Columns(columns) => {
                for (i, column) in columns.iter().enumerate() {
                    if i > 0 {
                        output.push_str("Column\n");
                    }
                    self.serialize_column(column, output);
                }
            }
        }
    }

    fn serialize_column(&self, column: &Column, output: &mut String) {
        for category in &column.categories {
            self.serialize_category(category, output);
        }
    }

    fn serialize_category(&self, category: &Category, output: &mut String) {
        match &category.name {
            Some(name) => {
                output.push_str("Category: ");
                output.push_str(name);
                output.push('\n');
            }
            None => output.push_str("Category:\n"),
        }
        for entry in &category.entries {
            self.serialize_entry(entry, output);
        }
    }

    fn serialize_entry(&self, entry: &Entry, output: &mut String) {
        output.push_str(&entry.url);
        if !entry.name.is_empty() && entry.name != entry.url {
            output.push(' ');
            output.push_str(&entry.name);
        }
        output.push('\n');
    }
}

fn is_untouched(tab: &Tab) -> bool {
    matches!(tab.pages.as_slice(), [page] if page.name.is_none() && page.is_blank())
}

fn write_header(output: &mut String, keyword: &str, name: Option<&str>) {
    output.push_str(keyword);
    if let Some(name) = name {
        output.push_str(": ");
        output.push_str(name);
    }
    output.push('\n');
}

/// Convenience function to serialize a document
pub fn serialize(doc: &Document) -> String {
    Serializer::new().serialize(doc)
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&serialize(self))
    }
}

/// A standalone tab always carries its header line
impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let serializer = Serializer::new();
        let mut output = String::new();
        serializer.write_tab_header(self, &mut output);
        serializer.serialize_tab_body(self, &mut output);
        f.write_str(&output)
    }
}

/// Page body only; the page name is not part of its text
impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut output = String::new();
        Serializer::new().serialize_page_body(self, &mut output);
        f.write_str(&output)
    }
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut output = String::new();
        Serializer::new().serialize_block(self, &mut output);
        f.write_str(&output)
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut output = String::new();
        Serializer::new().serialize_column(self, &mut output);
        f.write_str(&output)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut output = String::new();
        Serializer::new().serialize_category(self, &mut output);
        f.write_str(&output)
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut output = String::new();
        Serializer::new().serialize_entry(self, &mut output);
        f.write_str(&output)
    }
}
