use crate::ast::Block;
use crate::*;

#[test]
fn test_empty_input_is_minimal_document() {
    for source in ["", "\n\n", "   \n\t\n"] {
        let doc = parse(source);
        assert_eq!(doc, Document::new());
        assert_eq!(doc.tabs.len(), 1);
        assert_eq!(doc.tabs[0].pages.len(), 1);
        assert!(doc.tabs[0].pages[0].is_blank());
    }
}

#[test]
fn test_categories_without_directives() {
    let doc = parse("Category: A\nhttp://a.com\nCategory: B\nhttp://b.com Bee\n");

    assert_eq!(doc.tabs.len(), 1);
    assert_eq!(doc.tabs[0].name, None);
    assert_eq!(doc.tabs[0].pages.len(), 1);
    assert_eq!(doc.category_count(), 2);

    let a = doc.category(0).unwrap();
    assert_eq!(a.name.as_deref(), Some("A"));
    assert_eq!(a.entries[0].url, "http://a.com");
    assert_eq!(a.entries[0].name, "http://a.com");

    let b = doc.category(1).unwrap();
    assert_eq!(b.entries[0].name, "Bee");
}

#[test]
fn test_entry_name_tokens_joined_with_single_spaces() {
    let doc = parse("Category: A\n  http://a.com    Many   spaced\twords  \n");
    assert_eq!(doc.category(0).unwrap().entries[0].name, "Many spaced words");
}

#[test]
fn test_directive_forms() {
    let doc = parse("tab\nTAB Two\ntab:Three\nTab:  \n");
    let names: Vec<Option<&str>> = doc.tabs.iter().map(|t| t.name.as_deref()).collect();
    assert_eq!(names, vec![None, Some("Two"), Some("Three"), None]);
}

#[test]
fn test_words_starting_with_keywords_are_not_directives() {
    let doc = parse("Category: A\ntable-of-contents.html\npages.example.com\n");
    let entries = &doc.category(0).unwrap().entries;
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].url, "table-of-contents.html");
    assert_eq!(doc.tabs.len(), 1);
}

#[test]
fn test_category_default_name() {
    let doc = parse("Category\nhttp://a.com\nCategory:\nCategory:   \n");
    let names: Vec<&str> = doc
        .categories()
        .map(|c| c.name.as_deref().unwrap_or(""))
        .collect();
    assert_eq!(names, vec!["Category", "Category", "Category"]);
}

#[test]
fn test_entries_before_any_category_are_ignored() {
    let doc = parse("http://orphan.com\nCategory: A\nhttp://a.com\n");
    assert_eq!(doc.category_count(), 1);
    assert_eq!(doc.category(0).unwrap().entries.len(), 1);
}

#[test]
fn test_blank_lines_do_not_flush() {
    let doc = parse("Category: A\nhttp://a.com\n\n\nhttp://b.com\n");
    assert_eq!(doc.category(0).unwrap().entries.len(), 2);
}

#[test]
fn test_columns_and_rules() {
    let doc = parse("Category: A\nColumn\nCategory: B\n--\nCategory: C\n");
    let page = &doc.tabs[0].pages[0];

    assert_eq!(page.blocks.len(), 3);
    assert_eq!(page.blocks[0].columns().len(), 2);
    assert!(page.blocks[1].is_rule());
    assert_eq!(page.blocks[2].columns().len(), 1);
    assert_eq!(
        page.blocks[2].columns()[0].categories[0].name.as_deref(),
        Some("C")
    );
}

#[test]
fn test_rule_carries_no_columns() {
    let doc = parse("--\n");
    let page = &doc.tabs[0].pages[0];
    assert_eq!(page.blocks[1], Block::Rule);
    assert!(page.blocks[1].columns().is_empty());
}

#[test]
fn test_page_directive_replaces_untouched_tab_page() {
    let doc = parse("Tab: A\nPage: P\nCategory: X\n");
    assert_eq!(doc.tabs[0].pages.len(), 1);
    assert_eq!(doc.tabs[0].pages[0].name.as_deref(), Some("P"));
}

#[test]
fn test_page_directive_keeps_used_tab_page() {
    let doc = parse("Tab: A\nCategory: X\nPage: P\nCategory: Y\n");
    let tab = &doc.tabs[0];
    assert_eq!(tab.pages.len(), 2);
    assert_eq!(tab.pages[0].name, None);
    assert_eq!(tab.pages[1].name.as_deref(), Some("P"));
}

#[test]
fn test_indices_follow_reading_order() {
    let source = "Tab: One\nCategory: A\nColumn\nCategory: B\nPage: Two\nCategory: C\nTab: Three\n--\nCategory: D\n";
    let doc = parse(source);

    let indices: Vec<usize> = doc.categories().map(|c| c.index).collect();
    assert_eq!(indices, vec![0, 1, 2, 3]);

    let names: Vec<&str> = doc.categories().filter_map(|c| c.name.as_deref()).collect();
    assert_eq!(names, vec!["A", "B", "C", "D"]);
}

#[test]
fn test_category_lookup_out_of_range() {
    let doc = parse("Category: A\n");
    assert!(doc.category(0).is_some());
    assert!(doc.category(1).is_none());
}

#[test]
fn test_tabs_with_named_pages() {
    let doc = parse("Tab: One\nPage: First\nCategory: A\nPage: Second\nCategory: B\nTab: Two\nCategory: C\n");

    assert_eq!(doc.tabs.len(), 2);
    assert_eq!(doc.tabs[0].pages.len(), 2);
    assert_eq!(doc.tabs[0].pages[1].name.as_deref(), Some("Second"));
    assert_eq!(doc.tabs[0].pages[1].to_string(), "Category: B\n");
}

#[test]
fn test_is_directive() {
    assert!(is_directive("Tab"));
    assert!(is_directive("tab: Work"));
    assert!(is_directive("PAGE"));
    assert!(is_directive("--"));
    assert!(is_directive("column"));
    assert!(is_directive("Categoryx rest"));

    assert!(!is_directive("https://tab.example.com"));
    assert!(!is_directive("tablet"));
    assert!(!is_directive("column-one"));
    assert!(!is_directive("---"));
}
