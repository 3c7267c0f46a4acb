/// Serializer output shape and text round trips
use crate::*;

fn assert_round_trip(source: &str) {
    let doc = parse(source);
    let serialized = serialize(&doc);
    let reparsed = parse(&serialized);
    assert_eq!(doc, reparsed, "round trip changed tree for:\n{}", source);
    assert_eq!(serialize(&reparsed), serialized);
}

#[test]
fn test_round_trip_shapes() {
    let sources = vec![
        "",
        "Category: A\nhttp://a.com\n",
        "Category: A\nhttp://a.com Alpha\nhttp://b.com\n",
        "Tab: Work\nCategory: A\nTab: Home\nCategory: B\n",
        "Tab\nTab: Second\nCategory: X\n",
        "Category: A\nColumn\nCategory: B\nColumn\nColumn\nCategory: C\n",
        "Category: A\n--\nCategory: B\n--\n--\n",
        "Tab: A\nPage: P1\nCategory: X\nPage: P2\nPage\nCategory: Y\n",
        "Page\nPage: Named\nCategory: Z\n",
        "Column\n",
        "tab: lower\npage: case\ncategory: three\n",
    ];

    for source in sources {
        assert_round_trip(source);
    }
}

#[test]
fn test_minimal_document_serializes_to_empty_string() {
    assert_eq!(serialize(&Document::new()), "");
}

#[test]
fn test_canonical_output() {
    let doc = parse("tab: Work\n\ncategory:   News  \nhttp://n.com    Daily News\nhttp://m.com\ncolumn\n--\n");
    assert_eq!(
        serialize(&doc),
        "Tab: Work\nCategory: News\nhttp://n.com Daily News\nhttp://m.com\nColumn\n--\n"
    );
}

#[test]
fn test_first_unnamed_tab_and_page_headers_elided() {
    let doc = parse("Category: A\nPage\nCategory: B\nTab\nCategory: C\n");
    assert_eq!(
        serialize(&doc),
        "Category: A\nPage\nCategory: B\nTab\nCategory: C\n"
    );
}

#[test]
fn test_blank_first_page_keeps_header() {
    let mut doc = parse("Tab: A\nPage: P\nCategory: X\n");
    doc.tabs[0].pages.insert(0, Page::new(None));

    let text = serialize(&doc);
    assert_eq!(text, "Tab: A\nPage\nPage: P\nCategory: X\n");
    assert_eq!(parse(&text).tabs[0].pages.len(), 2);
}

#[test]
fn test_blank_first_tab_keeps_header() {
    let mut doc = parse("Tab: B\nCategory: X\n");
    doc.tabs.insert(0, Tab::new(None));

    let text = serialize(&doc);
    assert_eq!(text, "Tab\nTab: B\nCategory: X\n");
    assert_eq!(parse(&text), doc);
}

#[test]
fn test_unnamed_category_header() {
    let category = Category::new(None);
    assert_eq!(category.to_string(), "Category:\n");
}

#[test]
fn test_entry_name_equal_to_url_elided() {
    let entry = Entry::new("http://a.com", Some("http://a.com".to_string()));
    assert_eq!(entry.to_string(), "http://a.com\n");
    let named = Entry::new("http://a.com", Some("A".to_string()));
    assert_eq!(named.to_string(), "http://a.com A\n");
}

#[test]
fn test_entity_display_forms() {
    let doc = parse("Tab: One\nPage: First\nCategory: A\nhttp://a.com\nColumn\nCategory: B\n");
    let tab = &doc.tabs[0];
    let page = &tab.pages[0];

    assert_eq!(
        tab.to_string(),
        "Tab: One\nPage: First\nCategory: A\nhttp://a.com\nColumn\nCategory: B\n"
    );
    assert_eq!(page.to_string(), "Category: A\nhttp://a.com\nColumn\nCategory: B\n");
    assert_eq!(page.blocks[0].columns()[1].to_string(), "Category: B\n");
}

#[test]
fn test_unnamed_tab_display_includes_bare_header() {
    let doc = parse("Category: A\n");
    assert_eq!(doc.tabs[0].to_string(), "Tab\nCategory: A\n");
}

#[test]
fn test_model_serde_json() {
    let doc = parse("Category: A\nhttp://a.com\n--\n");
    let json = serde_json::to_string(&doc).unwrap();
    let back: Document = serde_json::from_str(&json).unwrap();
    assert_eq!(doc, back);
}
