//! Structural passes applied to every parser's output.

use crate::models::{Child, Leaf, Node, NodeKind};

/// Runs [`fill_empty_children`] then [`flatten_list_item_paragraphs`].
pub fn normalize(nodes: Vec<Node>) -> Vec<Node> {
    flatten_list_item_paragraphs(fill_empty_children(nodes))
}

/// Gives every node without children a single empty leaf, depth-first.
pub fn fill_empty_children(nodes: Vec<Node>) -> Vec<Node> {
    nodes.into_iter().map(fill_node).collect()
}

fn fill_node(node: Node) -> Node {
    let children = if node.children.is_empty() {
        vec![Child::Leaf(Leaf::empty())]
    } else {
        node.children.into_iter().map(fill_child).collect()
    };
    Node { children, ..node }
}

fn fill_child(child: Child) -> Child {
    match child {
        Child::Node(node) => Child::Node(fill_node(node)),
        leaf => leaf,
    }
}

/// Replaces the children of any list item whose only child is a paragraph
/// with that paragraph's own children, bottom-up.
pub fn flatten_list_item_paragraphs(nodes: Vec<Node>) -> Vec<Node> {
    nodes.into_iter().map(flatten_node).collect()
}

fn flatten_node(node: Node) -> Node {
    let mut children: Vec<Child> = node
        .children
        .into_iter()
        .map(|child| match child {
            Child::Node(inner) => Child::Node(flatten_node(inner)),
            leaf => leaf,
        })
        .collect();

    if matches!(node.kind, NodeKind::ListItem { .. })
        && let [Child::Node(only)] = children.as_mut_slice()
        && only.kind == NodeKind::Paragraph
    {
        children = std::mem::take(&mut only.children);
    }

    Node {
        kind: node.kind,
        children,
    }
}
