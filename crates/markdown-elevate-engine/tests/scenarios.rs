//! End-to-end typing scenarios: each test plays the role of the host editor,
//! adding blocks the way a user would type them and elevating each one.

use markdown_elevate_engine::{BlockElevator, Document, HybridText, InlineRule, NodeId};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn push_block(doc: &mut Document, text: &str) -> NodeId {
    let p = doc.create_element("p");
    doc.set_text_content(p, text);
    let root = doc.root();
    doc.append_child(root, p);
    p
}

#[test]
fn header_marker_becomes_h1() {
    let elevator = BlockElevator::default();
    let mut doc = Document::new();
    let p = push_block(&mut doc, "# Hello");

    let result = elevator.elevate(&mut doc, p).unwrap();

    assert_eq!(result.descriptor.name(), "header");
    assert_eq!(doc.tag(result.child), Some("h1"));
    assert_eq!(doc.text_content(result.child), "Hello");
    assert_eq!(result.parent, None);
    assert!(result.is_typable());
    insta::assert_snapshot!(doc.inner_markup(doc.root()), @"<h1>Hello</h1>");
}

#[test]
fn deeper_headers_follow_hash_count() {
    let elevator = BlockElevator::default();
    let mut doc = Document::new();
    let p = push_block(&mut doc, "### Third");
    let result = elevator.elevate(&mut doc, p).unwrap();
    assert_eq!(doc.tag(result.child), Some("h3"));
}

#[rstest]
#[case::bullet("<p>-&nbsp;item</p>", "unordered list", "<ul><li>item</li></ul>")]
#[case::numbered("<p>1.&nbsp;item</p>", "ordered list", "<ol><li>item</li></ol>")]
#[case::header("<p>#&nbsp;Head</p>", "header", "<h1>Head</h1>")]
#[case::quote("<p>&gt;&nbsp;quoted</p>", "blockquote", "<blockquote><p>quoted</p></blockquote>")]
fn non_breaking_space_after_marker(
    #[case] markup: &str,
    #[case] descriptor: &str,
    #[case] expected: &str,
) {
    let elevator = BlockElevator::default();
    let mut doc = Document::parse(markup);
    let p = doc.children(doc.root())[0];

    let result = elevator.elevate(&mut doc, p).unwrap();

    assert_eq!(result.descriptor.name(), descriptor);
    assert_eq!(doc.inner_markup(doc.root()), expected);
}

#[test]
fn consecutive_bullets_share_one_list() {
    let elevator = BlockElevator::default();
    let mut doc = Document::new();

    let first = push_block(&mut doc, "- item one");
    let one = elevator.elevate(&mut doc, first).unwrap();
    let (list, item_one) = (one.parent.unwrap(), one.child);

    let second = push_block(&mut doc, "- item two");
    let two = elevator.elevate(&mut doc, second).unwrap();

    assert_eq!(two.parent, Some(list));
    assert_eq!(doc.children(list), &[item_one, two.child]);
    assert_eq!(doc.children(doc.root()), &[list]);
    insta::assert_snapshot!(
        doc.inner_markup(doc.root()),
        @"<ul><li>item one</li><li>item two</li></ul>"
    );
}

#[test]
fn rule_replaces_block_and_is_not_typable() {
    let elevator = BlockElevator::default();
    let mut doc = Document::new();
    let p = push_block(&mut doc, "--- ");

    let result = elevator.elevate(&mut doc, p).unwrap();

    assert!(!result.is_typable());
    assert_eq!(result.parent, None);
    assert_eq!(doc.tag(result.child), Some("hr"));
    assert!(doc.children(result.child).is_empty());
    assert_eq!(doc.parent(p), None);
    insta::assert_snapshot!(doc.inner_markup(doc.root()), @"<hr>");
}

#[test]
fn consecutive_quotes_share_one_blockquote() {
    let elevator = BlockElevator::default();
    let mut doc = Document::new();

    let first = push_block(&mut doc, "> quoted");
    let quote = elevator.elevate(&mut doc, first).unwrap().parent.unwrap();
    let second = push_block(&mut doc, "> more");
    let result = elevator.elevate(&mut doc, second).unwrap();

    assert_eq!(result.parent, Some(quote));
    assert_eq!(doc.children(quote), &[first, second]);
    insta::assert_snapshot!(
        doc.inner_markup(doc.root()),
        @"<blockquote><p>quoted</p><p>more</p></blockquote>"
    );
}

#[test]
fn list_container_suggests_item_tag() {
    let elevator = BlockElevator::default();
    let mut doc = Document::new();
    let p = push_block(&mut doc, "1. first");
    let list = elevator.elevate(&mut doc, p).unwrap().parent.unwrap();

    assert_eq!(doc.tag(list), Some("ol"));
    assert_eq!(elevator.suggest_child_tag(&doc, list), Some("li"));
}

#[test]
fn inline_rule_leaves_existing_tags_intact() {
    let rule = InlineRule::new("[", "]", "span")
        .unwrap()
        .with_attribute("class", "tag");
    let mut doc = Document::parse(r#"<p><a href="/x[1]">link</a> see [note]</p>"#);
    let p = doc.children(doc.root())[0];
    let link = doc.children(p)[0];

    let mut model = HybridText::new();
    model.load_from_node(&doc, p);
    assert!(!model.text().contains("[1]"));
    assert_eq!(rule.render(&mut model), 1);
    model.reconcile(&mut doc, p);

    assert_eq!(doc.children(p)[0], link);
    assert_eq!(doc.attribute(link, "href"), Some("/x[1]"));
    insta::assert_snapshot!(
        doc.inner_markup(p),
        @r#"<a href="/x[1]">link</a> see <span class="tag">note</span>"#
    );
}

#[test]
fn mixed_document() {
    let elevator = BlockElevator::default();
    let mut doc = Document::new();
    for line in ["# Notes", "- one", "- two", "***", "> said", "plain"] {
        let p = push_block(&mut doc, line);
        elevator.elevate(&mut doc, p);
    }
    insta::assert_snapshot!(
        doc.inner_markup(doc.root()),
        @"<h1>Notes</h1><ul><li>one</li><li>two</li></ul><hr><blockquote><p>said</p></blockquote><p>plain</p>"
    );
}
