//! Tree invariants shared by the unit tests.

use crate::models::{Child, Node, NodeKind};
use crate::parsing::parse_markdown;
use rstest::rstest;

/// Panics unless every node has at least one child and every heading depth
/// is between 1 and 6.
pub fn assert_well_formed(nodes: &[Node]) {
    for node in nodes {
        assert!(!node.children.is_empty(), "node without children: {node:?}");
        if let NodeKind::Heading { depth } = node.kind {
            assert!((1..=6).contains(&depth), "heading depth {depth}");
        }
        let inner: Vec<Node> = node.children.iter().filter_map(Child::as_node).cloned().collect();
        assert_well_formed(&inner);
    }
}

/// Panics if any list item still holds exactly one paragraph.
pub fn assert_list_items_flat(nodes: &[Node]) {
    for node in nodes {
        if matches!(node.kind, NodeKind::ListItem { .. })
            && let [Child::Node(only)] = node.children.as_slice()
        {
            assert_ne!(only.kind, NodeKind::Paragraph, "unflattened item: {node:?}");
        }
        let inner: Vec<Node> = node.children.iter().filter_map(Child::as_node).cloned().collect();
        assert_list_items_flat(&inner);
    }
}

#[rstest]
#[case("")]
#[case("# Title\n\nSome **bold** text.")]
#[case("- a\n\n- b\n  - nested")]
#[case("> quoted\n\n---")]
#[case("[change type=\"create\"][/change]")]
#[case("[change type=\"update\"]\n\n- x\n\n[/change]")]
#[case("<mark type=\"highlighted\"></mark>\n\n```\n```")]
#[case("####### seven\n\n<mark type=\"read-only\">- not a list</mark>")]
fn parsed_trees_are_well_formed(#[case] input: &str) {
    let nodes = parse_markdown(input).unwrap();
    assert_well_formed(&nodes);
    assert_list_items_flat(&nodes);
}
