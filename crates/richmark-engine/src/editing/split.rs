//! Splits the `markdown_block` under the cursor into "before" and "after"
//! halves.
//!
//! The split descends the cursor path below the nearest enclosing block.
//! At each level, children before the indexed child go to the "before"
//! copy, children after it to the "after" copy, and the indexed child is
//! split recursively. At the leaf, text is sliced at the character offset.
//! A half that ends up with no text along the split edge is left out, so a
//! cursor at the very start of a block gives an empty "before" half.

use log::{debug, trace};
use serde::Serialize;

use crate::models::{Child, Leaf, Node, NodeKind, Point, Selection};

use super::serialize::serialize_children;

/// Both halves of a split block, serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SplitResult {
    pub block_id: String,
    pub before_markdown: String,
    pub after_markdown: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SplitError {
    #[error("Cursor path {path:?} ends on a node where a text leaf was expected")]
    NotALeaf { path: Vec<usize> },
}

/// Splits at a collapsed selection. Returns `Ok(None)` for a ranged
/// selection or any cursor that does not address a leaf inside a block.
pub fn split_at(tree: &[Node], selection: &Selection) -> Result<Option<SplitResult>, SplitError> {
    if !selection.is_collapsed() {
        debug!("not splitting: selection is not collapsed");
        return Ok(None);
    }
    split_at_point(tree, &selection.anchor)
}

/// Splits the nearest `markdown_block` enclosing `point`.
pub fn split_at_point(tree: &[Node], point: &Point) -> Result<Option<SplitResult>, SplitError> {
    let Some((block_id, block, depth)) = enclosing_block(tree, &point.path) else {
        debug!("not splitting: no enclosing block for {:?}", point.path);
        return Ok(None);
    };

    let relative = &point.path[depth..];
    let Some((before, after)) = split_node(block, relative, point.offset, &point.path)? else {
        debug!("not splitting: {:?} does not address a leaf", point.path);
        return Ok(None);
    };

    Ok(Some(SplitResult {
        block_id: block_id.to_string(),
        before_markdown: serialize_children(&before.children),
        after_markdown: serialize_children(&after.children),
    }))
}

/// Finds the deepest `markdown_block` strictly above the end of `path`,
/// returning its id, the node and how many path entries lead to it.
fn enclosing_block<'a>(tree: &'a [Node], path: &[usize]) -> Option<(&'a str, &'a Node, usize)> {
    let mut found = None;
    let mut node = tree.get(*path.first()?)?;
    for depth in 1..path.len() {
        if let NodeKind::MarkdownBlock { id, .. } = &node.kind {
            found = Some((id.as_str(), node, depth));
        }
        match node.children.get(path[depth]) {
            Some(Child::Node(child)) => node = child,
            _ => break,
        }
    }
    found
}

fn split_node(
    node: &Node,
    path: &[usize],
    offset: usize,
    full_path: &[usize],
) -> Result<Option<(Node, Node)>, SplitError> {
    let Some((&index, rest)) = path.split_first() else {
        return Ok(None);
    };
    let Some(target) = node.children.get(index) else {
        return Ok(None);
    };

    let (before, after) = match target {
        Child::Leaf(leaf) if rest.is_empty() => {
            let (before, after) = split_leaf(leaf, offset);
            (non_empty_leaf(before), non_empty_leaf(after))
        }
        Child::Leaf(_) => {
            trace!("path {full_path:?} continues past a leaf");
            return Ok(None);
        }
        Child::Node(_) if rest.is_empty() => {
            return Err(SplitError::NotALeaf {
                path: full_path.to_vec(),
            });
        }
        Child::Node(inner) => {
            let Some((before, after)) = split_node(inner, rest, offset, full_path)? else {
                return Ok(None);
            };
            (non_empty_node(before), non_empty_node(after))
        }
    };

    let before_children = node.children[..index].iter().cloned().chain(before).collect();
    let after_children = after
        .into_iter()
        .chain(node.children[index + 1..].iter().cloned())
        .collect();
    Ok(Some((
        Node::new(node.kind.clone(), before_children),
        Node::new(node.kind.clone(), after_children),
    )))
}

/// Slices at a character offset, clamped to the text. Both halves keep the
/// leaf's attributes.
fn split_leaf(leaf: &Leaf, offset: usize) -> (Leaf, Leaf) {
    let at = if offset >= leaf.char_len() {
        leaf.text.len()
    } else {
        leaf.text
            .char_indices()
            .nth(offset)
            .map_or(leaf.text.len(), |(i, _)| i)
    };
    (leaf.with_text(&leaf.text[..at]), leaf.with_text(&leaf.text[at..]))
}

fn non_empty_leaf(leaf: Leaf) -> Option<Child> {
    (!leaf.text.is_empty()).then_some(Child::Leaf(leaf))
}

fn non_empty_node(node: Node) -> Option<Child> {
    (!node.children.is_empty()).then_some(Child::Node(node))
}
