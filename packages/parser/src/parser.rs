use crate::ast::*;
use tracing::debug;

/// Name given to a category whose header has none
pub const UNNAMED_CATEGORY: &str = "Category";

/// Single forward scan over the bookmark text format.
///
/// Parsing never fails: unknown lines are ignored and empty input yields
/// the minimal document.
pub struct Parser<'src> {
    source: &'src str,
    tabs: Vec<Tab>,
    pending: Option<Category>,
    /// Current page was opened by a `Tab` directive and nothing has been
    /// placed into it yet. A following `Page` directive replaces it.
    implicit_page: bool,
    next_index: usize,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            tabs: Vec::new(),
            pending: None,
            implicit_page: false,
            next_index: 0,
        }
    }

    /// Parse the complete document
    pub fn parse_document(mut self) -> Document {
        for raw in self.source.split('\n') {
            self.parse_line(raw.trim());
        }
        self.flush_category();

        if self.tabs.is_empty() {
            return Document::new();
        }

        debug!(
            tabs = self.tabs.len(),
            categories = self.next_index,
            "Parsed bookmark document"
        );

        Document { tabs: self.tabs }
    }

    fn parse_line(&mut self, line: &str) {
        if let Some(rest) = directive_argument(line, "tab") {
            self.flush_category();
            self.tabs.push(Tab::new(directive_name(rest)));
            self.implicit_page = true;
            return;
        }

        if let Some(rest) = directive_argument(line, "page") {
            self.flush_category();
            let replace_implicit = self.implicit_page;
            let tab = self.current_tab();
            if replace_implicit {
                tab.pages.pop();
            }
            tab.pages.push(Page::new(directive_name(rest)));
            self.implicit_page = false;
            return;
        }

        if line == "--" {
            self.flush_category();
            let page = self.current_page();
            page.blocks.push(Block::Rule);
            page.blocks.push(Block::new_columns());
            self.implicit_page = false;
            return;
        }

        if line.eq_ignore_ascii_case("column") {
            self.flush_category();
            let page = self.current_page();
            let block = page.last_columns_index();
            if let Some(columns) = page.blocks[block].column_list_mut() {
                columns.push(Column::new());
            }
            self.implicit_page = false;
            return;
        }

        let mut tokens = line.split_whitespace();
        let Some(first) = tokens.next() else {
            return;
        };

        if starts_with_keyword(first, "category") {
            self.flush_category();
            self.current_page();
            self.pending = Some(Category::new(Some(category_name(line))));
            return;
        }

        if let Some(category) = &mut self.pending {
            let rest: Vec<&str> = tokens.collect();
            let name = if rest.is_empty() {
                None
            } else {
                Some(rest.join(" "))
            };
            category.entries.push(Entry::new(first, name));
        }
    }

    /// Append the pending category to the last column of the current page
    fn flush_category(&mut self) {
        if let Some(mut category) = self.pending.take() {
            category.index = self.next_index;
            self.next_index += 1;
            self.current_page().last_column_mut().categories.push(category);
            self.implicit_page = false;
        }
    }

    fn current_tab(&mut self) -> &mut Tab {
        if self.tabs.is_empty() {
            self.tabs.push(Tab {
                name: None,
                pages: Vec::new(),
            });
        }
        let last = self.tabs.len() - 1;
        &mut self.tabs[last]
    }

    fn current_page(&mut self) -> &mut Page {
        let tab = self.current_tab();
        if tab.pages.is_empty() {
            tab.pages.push(Page::new(None));
        }
        let last = tab.pages.len() - 1;
        &mut tab.pages[last]
    }
}

/// Parse bookmark text into a document
pub fn parse(source: &str) -> Document {
    Parser::new(source).parse_document()
}

/// True when `line` would be read as a structural line rather than an entry
pub fn is_directive(line: &str) -> bool {
    let line = line.trim();
    directive_argument(line, "tab").is_some()
        || directive_argument(line, "page").is_some()
        || line == "--"
        || line.eq_ignore_ascii_case("column")
        || line
            .split_whitespace()
            .next()
            .is_some_and(|first| starts_with_keyword(first, "category"))
}

fn starts_with_keyword(text: &str, keyword: &str) -> bool {
    text.get(..keyword.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(keyword))
}

/// Text following `keyword` when the line is `keyword`, `keyword <arg>` or
/// `keyword:<arg>`
fn directive_argument<'a>(line: &'a str, keyword: &str) -> Option<&'a str> {
    if !starts_with_keyword(line, keyword) {
        return None;
    }
    let rest = &line[keyword.len()..];
    if rest.is_empty() || rest.starts_with(' ') || rest.starts_with(':') {
        Some(rest)
    } else {
        None
    }
}

fn directive_name(rest: &str) -> Option<String> {
    let rest = rest.trim();
    let rest = rest.strip_prefix(':').unwrap_or(rest).trim();
    if rest.is_empty() {
        None
    } else {
        Some(rest.to_string())
    }
}

fn category_name(line: &str) -> String {
    directive_name(&line["category".len()..]).unwrap_or_else(|| UNNAMED_CATEGORY.to_string())
}
