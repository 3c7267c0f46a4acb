//! Comprehensive mutation tests

use bookmarks_editor::{
    CategoryPath, ColumnPath, Mutation, MutationError, MutationKind, PagePath,
};
use bookmarks_parser::ast::{Category, Entry, Page, Tab};
use bookmarks_parser::{parse, serialize};

fn apply(source: &str, mutation: Mutation) -> String {
    let mut doc = parse(source);
    mutation.apply(&mut doc).unwrap();
    serialize(&doc)
}

fn column(tab: usize, page: usize, block: usize, column: usize) -> ColumnPath {
    ColumnPath {
        tab,
        page,
        block,
        column,
    }
}

const TABS: &str = "Tab: One\nCategory: A\nTab: Two\nCategory: B\nTab: Three\nCategory: C\n";

#[test]
fn test_swap_tabs() {
    let text = apply(TABS, Mutation::SwapTabs { a: 0, b: 2 });
    assert_eq!(
        text,
        "Tab: Three\nCategory: C\nTab: Two\nCategory: B\nTab: One\nCategory: A\n"
    );
}

#[test]
fn test_move_tab_splices() {
    let text = apply(TABS, Mutation::MoveTab { from: 0, to: 2 });
    assert_eq!(
        text,
        "Tab: Two\nCategory: B\nTab: Three\nCategory: C\nTab: One\nCategory: A\n"
    );
}

#[test]
fn test_shift_tab() {
    let text = apply(TABS, Mutation::ShiftTab { index: 2, delta: -1 });
    assert_eq!(
        text,
        "Tab: One\nCategory: A\nTab: Three\nCategory: C\nTab: Two\nCategory: B\n"
    );
}

#[test]
fn test_shift_tab_past_edge_is_rejected() {
    let mut doc = parse(TABS);
    let before = doc.clone();
    let err = Mutation::ShiftTab { index: 0, delta: -1 }
        .apply(&mut doc)
        .unwrap_err();

    assert_eq!(
        err,
        MutationError::ShiftOutOfRange {
            kind: MutationKind::Tab,
            index: 0,
            delta: -1,
            len: 3
        }
    );
    assert_eq!(doc, before);
}

#[test]
fn test_insert_and_rename_tab() {
    let mut doc = parse(TABS);
    Mutation::InsertTab {
        at: 1,
        tab: Tab::new(Some("New".to_string())),
    }
    .apply(&mut doc)
    .unwrap();
    Mutation::RenameTab {
        at: 0,
        name: Some("First".to_string()),
    }
    .apply(&mut doc)
    .unwrap();

    let names: Vec<Option<&str>> = doc.tabs.iter().map(|t| t.name.as_deref()).collect();
    assert_eq!(
        names,
        vec![Some("First"), Some("New"), Some("Two"), Some("Three")]
    );
}

#[test]
fn test_insert_tab_normalizes_empty_tab() {
    let mut doc = parse(TABS);
    Mutation::InsertTab {
        at: 3,
        tab: Tab {
            name: Some("Bare".to_string()),
            pages: vec![],
        },
    }
    .apply(&mut doc)
    .unwrap();

    assert_eq!(doc.tabs[3].pages.len(), 1);
    assert!(doc.tabs[3].pages[0].is_blank());
}

#[test]
fn test_delete_last_tab_resynthesizes() {
    let mut doc = parse("Tab: Only\nCategory: A\n");
    Mutation::DeleteTab { at: 0 }.apply(&mut doc).unwrap();

    assert_eq!(doc.tabs.len(), 1);
    assert_eq!(doc.tabs[0], Tab::new(None));
    assert_eq!(serialize(&doc), "");
}

#[test]
fn test_insert_tab_beyond_end_is_rejected() {
    let mut doc = parse(TABS);
    let err = Mutation::InsertTab {
        at: 5,
        tab: Tab::new(None),
    }
    .apply(&mut doc)
    .unwrap_err();
    assert_eq!(
        err,
        MutationError::IndexOutOfRange {
            kind: MutationKind::Tab,
            index: 5,
            len: 3
        }
    );
}

const PAGES: &str = "Tab: T\nPage: P1\nCategory: A\nPage: P2\nCategory: B\nPage: P3\nCategory: C\n";

#[test]
fn test_page_reordering() {
    let swapped = apply(PAGES, Mutation::SwapPages { tab: 0, a: 0, b: 1 });
    assert!(swapped.starts_with("Tab: T\nPage: P2\n"));

    let moved = apply(PAGES, Mutation::MovePage { tab: 0, from: 2, to: 0 });
    assert!(moved.starts_with("Tab: T\nPage: P3\nCategory: C\nPage: P1\n"));

    let shifted = apply(PAGES, Mutation::ShiftPage { tab: 0, index: 0, delta: 1 });
    assert!(shifted.starts_with("Tab: T\nPage: P2\nCategory: B\nPage: P1\n"));
}

#[test]
fn test_insert_and_delete_page() {
    let mut doc = parse(PAGES);
    Mutation::InsertPage {
        tab: 0,
        at: 1,
        page: Page::new(Some("Inserted".to_string())),
    }
    .apply(&mut doc)
    .unwrap();
    assert_eq!(doc.tabs[0].pages[1].name.as_deref(), Some("Inserted"));

    Mutation::DeletePage { tab: 0, at: 0 }.apply(&mut doc).unwrap();
    assert_eq!(doc.tabs[0].pages.len(), 3);
    assert_eq!(doc.category(0).unwrap().name.as_deref(), Some("B"));
    assert_eq!(doc.category(0).unwrap().index, 0);
}

#[test]
fn test_delete_only_page_resynthesizes() {
    let mut doc = parse("Tab: T\nCategory: A\n");
    Mutation::DeletePage { tab: 0, at: 0 }.apply(&mut doc).unwrap();
    assert_eq!(doc.tabs[0].pages, vec![Page::new(None)]);
}

#[test]
fn test_rename_and_replace_page() {
    let mut doc = parse(PAGES);
    Mutation::RenamePage {
        at: PagePath::new(0, 1),
        name: None,
    }
    .apply(&mut doc)
    .unwrap();
    assert_eq!(doc.tabs[0].pages[1].name, None);

    let replacement = parse("Page: Fresh\nCategory: Z\n").tabs[0].pages[0].clone();
    Mutation::ReplacePage {
        at: PagePath::new(0, 2),
        page: replacement,
    }
    .apply(&mut doc)
    .unwrap();
    assert_eq!(
        serialize(&doc),
        "Tab: T\nPage: P1\nCategory: A\nPage\nCategory: B\nPage: Fresh\nCategory: Z\n"
    );
}

#[test]
fn test_page_lookup_errors() {
    let mut doc = parse(PAGES);
    assert_eq!(
        Mutation::RenamePage {
            at: PagePath::new(0, 9),
            name: None
        }
        .apply(&mut doc),
        Err(MutationError::PageNotFound { tab: 0, page: 9 })
    );
    assert_eq!(
        Mutation::DeletePage { tab: 4, at: 0 }.apply(&mut doc),
        Err(MutationError::IndexOutOfRange {
            kind: MutationKind::Tab,
            index: 4,
            len: 1
        })
    );
}

#[test]
fn test_column_operations() {
    let source = "Category: A\nColumn\nCategory: B\n";
    let page = PagePath::new(0, 0);

    let inserted = apply(source, Mutation::InsertColumn { page, block: 0, at: 1 });
    assert_eq!(inserted, "Category: A\nColumn\nColumn\nCategory: B\n");

    let moved = apply(source, Mutation::MoveColumn { page, block: 0, from: 1, to: 0 });
    assert_eq!(moved, "Category: B\nColumn\nCategory: A\n");

    let deleted = apply(source, Mutation::DeleteColumn { page, block: 0, at: 0 });
    assert_eq!(deleted, "Category: B\n");
}

#[test]
fn test_delete_only_column_resynthesizes() {
    let mut doc = parse("Category: A\n");
    Mutation::DeleteColumn {
        page: PagePath::new(0, 0),
        block: 0,
        at: 0,
    }
    .apply(&mut doc)
    .unwrap();
    assert!(doc.tabs[0].pages[0].is_blank());
}

#[test]
fn test_column_on_rule_block_is_rejected() {
    let mut doc = parse("Category: A\n--\nCategory: B\n");
    assert_eq!(
        Mutation::InsertColumn {
            page: PagePath::new(0, 0),
            block: 1,
            at: 0
        }
        .apply(&mut doc),
        Err(MutationError::RuleBlock { block: 1 })
    );
}

#[test]
fn test_category_operations_within_column() {
    let source = "Category: A\nCategory: B\nCategory: C\n";

    let shifted = apply(
        source,
        Mutation::ShiftCategory {
            column: column(0, 0, 0, 0),
            position: 0,
            delta: 2,
        },
    );
    assert_eq!(shifted, "Category: C\nCategory: B\nCategory: A\n");

    let inserted = apply(
        source,
        Mutation::InsertCategory {
            column: column(0, 0, 0, 0),
            at: 1,
            category: Category::new(Some("New".to_string())),
        },
    );
    assert_eq!(inserted, "Category: A\nCategory: New\nCategory: B\nCategory: C\n");

    let deleted = apply(
        source,
        Mutation::DeleteCategory {
            column: column(0, 0, 0, 0),
            at: 1,
        },
    );
    assert_eq!(deleted, "Category: A\nCategory: C\n");
}

#[test]
fn test_move_category_to_keeps_emptied_column() {
    let mut doc = parse("Category: A\nColumn\nCategory: B\n");
    let page = PagePath::new(0, 0);
    Mutation::InsertColumn { page, block: 0, at: 1 }
        .apply(&mut doc)
        .unwrap();
    Mutation::MoveCategoryTo {
        from: CategoryPath {
            tab: 0,
            page: 0,
            block: 0,
            column: 0,
            position: 0,
        },
        to: CategoryPath {
            tab: 0,
            page: 0,
            block: 0,
            column: 2,
            position: 0,
        },
    }
    .apply(&mut doc)
    .unwrap();

    let columns = doc.tabs[0].pages[0].blocks[0].columns();
    assert_eq!(columns.len(), 3);
    assert!(columns[0].categories.is_empty());
    assert_eq!(columns[2].categories.len(), 2);
    assert_eq!(columns[2].categories[0].name.as_deref(), Some("A"));
}

#[test]
fn test_replace_and_append_category() {
    let mut doc = parse("Category: A\nColumn\nCategory: B\n");
    Mutation::ReplaceCategory {
        index: 1,
        category: Category::with_entries(
            Some("B2".to_string()),
            vec![Entry::new("http://b.com", None)],
        ),
    }
    .apply(&mut doc)
    .unwrap();

    Mutation::AppendCategory {
        page: PagePath::new(7, 7),
        column: 99,
        category: Category::new(Some("Tail".to_string())),
    }
    .apply(&mut doc)
    .unwrap();

    assert_eq!(
        serialize(&doc),
        "Category: A\nColumn\nCategory: B2\nhttp://b.com\nCategory: Tail\n"
    );
    assert_eq!(doc.category(2).unwrap().index, 2);
}

#[test]
fn test_append_category_to_chosen_column() {
    let text = apply(
        "Category: A\nColumn\nCategory: B\n",
        Mutation::AppendCategory {
            page: PagePath::new(0, 0),
            column: 0,
            category: Category::new(Some("C".to_string())),
        },
    );
    assert_eq!(text, "Category: A\nCategory: C\nColumn\nCategory: B\n");
}

#[test]
fn test_entry_operations() {
    let source = "Category: A\nhttps://a A\nhttps://b B\n";

    let mut doc = parse(source);
    Mutation::InsertEntry {
        category: 0,
        at: 1,
        entry: Entry::new("http://", Some(String::new())),
    }
    .apply(&mut doc)
    .unwrap();
    assert_eq!(doc.category(0).unwrap().entries.len(), 3);

    Mutation::ShiftEntry {
        category: 0,
        index: 2,
        delta: -2,
    }
    .apply(&mut doc)
    .unwrap();
    assert_eq!(doc.category(0).unwrap().entries[0].url, "https://b");

    Mutation::DeleteEntry { category: 0, at: 1 }
        .apply(&mut doc)
        .unwrap();
    assert_eq!(doc.category(0).unwrap().entries.len(), 2);

    Mutation::UpdateEntry {
        category: 0,
        at: 1,
        entry: Entry::new("https://c", Some("C".to_string())),
    }
    .apply(&mut doc)
    .unwrap();
    Mutation::MoveEntry {
        category: 0,
        from: 1,
        to: 0,
    }
    .apply(&mut doc)
    .unwrap();

    assert_eq!(serialize(&doc), "Category: A\nhttps://c C\nhttps://b B\n");
}

#[test]
fn test_move_entry_between_categories() {
    let mut doc = parse("Category: A\nhttps://a A\nCategory: B\nhttps://b B\n");
    Mutation::MoveEntryBetween {
        from_category: 0,
        from: 0,
        to_category: 1,
        to: 1,
    }
    .apply(&mut doc)
    .unwrap();

    assert!(doc.category(0).unwrap().entries.is_empty());
    let b = &doc.category(1).unwrap().entries;
    assert_eq!(b.len(), 2);
    assert_eq!(b[1].url, "https://a");
}

#[test]
fn test_move_entry_between_rejects_bad_target() {
    let mut doc = parse("Category: A\nhttps://a A\nCategory: B\nhttps://b B\n");
    let before = doc.clone();
    let err = Mutation::MoveEntryBetween {
        from_category: 0,
        from: 0,
        to_category: 1,
        to: 2,
    }
    .apply(&mut doc)
    .unwrap_err();

    assert_eq!(
        err,
        MutationError::IndexOutOfRange {
            kind: MutationKind::Entry,
            index: 2,
            len: 1
        }
    );
    assert_eq!(doc, before);
}

#[test]
fn test_entry_in_missing_category() {
    let mut doc = parse("Category: A\n");
    assert_eq!(
        Mutation::DeleteEntry { category: 3, at: 0 }.apply(&mut doc),
        Err(MutationError::CategoryNotFound(3))
    );
}

#[test]
fn test_validate_does_not_mutate() {
    let doc = parse(TABS);
    let before = doc.clone();
    assert!(Mutation::DeleteTab { at: 0 }.validate(&doc).is_ok());
    assert!(Mutation::DeleteTab { at: 3 }.validate(&doc).is_err());
    assert_eq!(doc, before);
}

#[test]
fn test_mutation_serde() {
    let mutation = Mutation::ShiftEntry {
        category: 2,
        index: 1,
        delta: -1,
    };
    let json = serde_json::to_string(&mutation).unwrap();
    let back: Mutation = serde_json::from_str(&json).unwrap();
    assert_eq!(mutation, back);
}
