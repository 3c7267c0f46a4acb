use serde::{Deserialize, Serialize};

/// Root document node: the whole bookmark file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub tabs: Vec<Tab>,
}

/// Tab (top-level navigation group)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tab {
    pub name: Option<String>,
    pub pages: Vec<Page>,
}

/// Page within a tab
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub name: Option<String>,
    pub blocks: Vec<Block>,
}

/// Page subdivision: either a horizontal rule or a run of columns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "columns")]
pub enum Block {
    /// Horizontal rule (`--`)
    Rule,

    /// Side-by-side columns
    Columns(Vec<Column>),
}

/// Column of categories
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub categories: Vec<Category>,
}

/// Category (titled group of links)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: Option<String>,
    pub entries: Vec<Entry>,
    /// Global position in reading order. Recomputed on every load and
    /// after every structural change; never persisted.
    #[serde(default)]
    pub index: usize,
}

/// Link entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub url: String,
    pub name: String,
}

impl Document {
    /// Minimal valid document: one empty tab/page/block/column
    pub fn new() -> Self {
        Self {
            tabs: vec![Tab::new(None)],
        }
    }

    /// All categories in reading order
    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.tabs.iter().flat_map(|tab| tab.categories())
    }

    pub fn categories_mut(&mut self) -> impl Iterator<Item = &mut Category> {
        self.tabs.iter_mut().flat_map(|tab| {
            tab.pages.iter_mut().flat_map(|page| {
                page.blocks
                    .iter_mut()
                    .flat_map(|block| block.columns_mut().iter_mut())
                    .flat_map(|column| column.categories.iter_mut())
            })
        })
    }

    pub fn category_count(&self) -> usize {
        self.categories().count()
    }

    /// Look up a category by its global index
    pub fn category(&self, index: usize) -> Option<&Category> {
        self.categories().nth(index)
    }

    pub fn category_mut(&mut self, index: usize) -> Option<&mut Category> {
        self.categories_mut().nth(index)
    }

    pub fn page(&self, tab: usize, page: usize) -> Option<&Page> {
        self.tabs.get(tab)?.pages.get(page)
    }

    pub fn page_mut(&mut self, tab: usize, page: usize) -> Option<&mut Page> {
        self.tabs.get_mut(tab)?.pages.get_mut(page)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Tab {
    /// New tab holding a single blank page
    pub fn new(name: Option<String>) -> Self {
        Self {
            name,
            pages: vec![Page::new(None)],
        }
    }

    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.pages.iter().flat_map(|page| page.categories())
    }
}

impl Default for Tab {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Page {
    /// New page holding a single empty column block
    pub fn new(name: Option<String>) -> Self {
        Self {
            name,
            blocks: vec![Block::new_columns()],
        }
    }

    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.blocks
            .iter()
            .flat_map(|block| block.columns().iter())
            .flat_map(|column| column.categories.iter())
    }

    /// True when the page has exactly the shape of `Page::new`
    pub fn is_blank(&self) -> bool {
        matches!(
            self.blocks.as_slice(),
            [Block::Columns(columns)] if columns.len() == 1 && columns[0].categories.is_empty()
        )
    }

    /// Index of the last column block, appending one if the page ends in a
    /// rule or has no blocks at all
    pub fn last_columns_index(&mut self) -> usize {
        match self.blocks.last() {
            Some(Block::Columns(_)) => {}
            _ => self.blocks.push(Block::new_columns()),
        }
        self.blocks.len() - 1
    }

    /// Last column of the last column block, creating the chain if missing
    pub fn last_column_mut(&mut self) -> &mut Column {
        let block = self.last_columns_index();
        let columns = self.blocks[block].ensure_columns();
        let last = columns.len() - 1;
        &mut columns[last]
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Block {
    /// Column block with a single empty column
    pub fn new_columns() -> Self {
        Block::Columns(vec![Column::new()])
    }

    pub fn is_rule(&self) -> bool {
        matches!(self, Block::Rule)
    }

    /// Columns of this block (empty for rules)
    pub fn columns(&self) -> &[Column] {
        match self {
            Block::Rule => &[],
            Block::Columns(columns) => columns,
        }
    }

    pub fn columns_mut(&mut self) -> &mut [Column] {
        match self {
            Block::Rule => &mut [],
            Block::Columns(columns) => columns,
        }
    }

    /// Mutable column list of a column block; `None` for rules
    pub fn column_list_mut(&mut self) -> Option<&mut Vec<Column>> {
        match self {
            Block::Rule => None,
            Block::Columns(columns) => Some(columns),
        }
    }

    /// Column list with at least one column, converting a rule if needed
    fn ensure_columns(&mut self) -> &mut Vec<Column> {
        if self.is_rule() {
            *self = Block::new_columns();
        }
        match self {
            Block::Columns(columns) => {
                if columns.is_empty() {
                    columns.push(Column::new());
                }
                columns
            }
            Block::Rule => unreachable!("rule replaced above"),
        }
    }
}

impl Default for Block {
    fn default() -> Self {
        Self::new_columns()
    }
}

impl Column {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Category {
    pub fn new(name: Option<String>) -> Self {
        Self {
            name,
            entries: Vec::new(),
            index: 0,
        }
    }

    pub fn with_entries(name: Option<String>, entries: Vec<Entry>) -> Self {
        Self {
            name,
            entries,
            index: 0,
        }
    }
}

impl Entry {
    /// Entry whose display name defaults to the URL
    pub fn new(url: impl Into<String>, name: Option<String>) -> Self {
        let url = url.into();
        let name = name.unwrap_or_else(|| url.clone());
        Self { url, name }
    }
}
