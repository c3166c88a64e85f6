use crate::models::{Child, Leaf, Node, NodeKind};
use crate::parsing::kinds::{ChangeTag, Emphasis, Fence, MarkTag};

const BLOCK_SEPARATOR: &str = "\n\n";
const THEMATIC_BREAK: &str = "---";
const QUOTE_PREFIX: &str = ">";

/// Serializes top-level blocks, separated by a blank line.
pub fn serialize(nodes: &[Node]) -> String {
    nodes
        .iter()
        .map(serialize_node)
        .collect::<Vec<_>>()
        .join(BLOCK_SEPARATOR)
}

/// Serializes a node's children. Runs of leaves and links are written
/// inline; block children are separated by a blank line.
pub fn serialize_children(children: &[Child]) -> String {
    pieces(children)
        .into_iter()
        .map(Piece::into_text)
        .collect::<Vec<_>>()
        .join(BLOCK_SEPARATOR)
}

/// Writes a leaf with its formatting delimiters (bold, italic, code, then
/// strikethrough outermost) and at most one mark wrapper.
///
/// Empty leaves write nothing, so the synthetic leaves of empty containers
/// never leave stray delimiters behind.
pub fn serialize_leaf(leaf: &Leaf) -> String {
    if leaf.text.is_empty() {
        return String::new();
    }

    let mut text = leaf.text.clone();
    for (enabled, delimiter) in [
        (leaf.strong, Emphasis::STRONG),
        (leaf.emphasis, Emphasis::EMPHASIS),
        (leaf.code, Emphasis::CODE),
        (leaf.strikethrough, Emphasis::STRIKETHROUGH),
    ] {
        if enabled {
            text = format!("{delimiter}{text}{delimiter}");
        }
    }

    match MarkTag::open_for(leaf) {
        Some(open) => format!("{open}{text}{}", MarkTag::CLOSE),
        None => text,
    }
}

/// A serialized stretch of children: inline content or one block.
enum Piece {
    Inline(String),
    Block(String),
}

impl Piece {
    fn into_text(self) -> String {
        match self {
            Piece::Inline(text) | Piece::Block(text) => text,
        }
    }
}

fn pieces(children: &[Child]) -> Vec<Piece> {
    let mut out: Vec<Piece> = Vec::new();
    for child in children {
        let (text, inline) = match child {
            Child::Leaf(leaf) => (serialize_leaf(leaf), true),
            Child::Node(node) => (serialize_node(node), is_inline(&node.kind)),
        };
        match out.last_mut() {
            Some(Piece::Inline(run)) if inline => run.push_str(&text),
            _ if inline => out.push(Piece::Inline(text)),
            _ => out.push(Piece::Block(text)),
        }
    }
    out
}

fn is_inline(kind: &NodeKind) -> bool {
    matches!(kind, NodeKind::Link { .. })
}

fn serialize_node(node: &Node) -> String {
    match &node.kind {
        NodeKind::Paragraph => {
            let text = serialize_children(&node.children);
            if text.trim().is_empty() {
                String::new()
            } else {
                text
            }
        }
        NodeKind::Heading { depth } => format!(
            "{} {}",
            "#".repeat(usize::from((*depth).clamp(1, 6))),
            serialize_children(&node.children)
        ),
        NodeKind::List { ordered, start } => serialize_list(*ordered, *start, &node.children),
        NodeKind::Code { lang } => {
            let code = node.text();
            // A blank line inside the fence would end the block on re-parse
            let body = if code.is_empty() { code } else { code + "\n" };
            format!(
                "{ticks}{lang}\n{body}{ticks}",
                ticks = Fence::TICKS,
                lang = lang.as_deref().unwrap_or(""),
            )
        }
        NodeKind::Link { url } => format!("[{}]({url})", serialize_children(&node.children)),
        NodeKind::TrackedChange { change_type, .. } => format!(
            "{}{}{}",
            ChangeTag::open(change_type.as_str()),
            serialize_children(&node.children),
            ChangeTag::CLOSE
        ),
        NodeKind::ThematicBreak => THEMATIC_BREAK.to_string(),
        NodeKind::BlockQuote => serialize_children(&node.children)
            .split('\n')
            .map(|line| {
                if line.is_empty() {
                    QUOTE_PREFIX.to_string()
                } else {
                    format!("{QUOTE_PREFIX} {line}")
                }
            })
            .collect::<Vec<_>>()
            .join("\n"),
        NodeKind::ListItem { .. } | NodeKind::MarkdownBlock { .. } => {
            serialize_children(&node.children)
        }
    }
}

fn serialize_list(ordered: bool, start: Option<u64>, items: &[Child]) -> String {
    let first = start.unwrap_or(1);
    items
        .iter()
        .zip(0u64..)
        .map(|(item, index)| {
            let marker = if ordered {
                format!("{}. ", first + index)
            } else {
                "- ".to_string()
            };
            match item {
                Child::Node(node) => serialize_list_item(&marker, node),
                Child::Leaf(leaf) => format!("{marker}{}", serialize_leaf(leaf)),
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Writes one item: marker, optional task checkbox, then content. Lines
/// after the first are indented to the content column so nested blocks
/// stay inside the item.
fn serialize_list_item(marker: &str, item: &Node) -> String {
    let checkbox = match item.kind {
        NodeKind::ListItem {
            checked: Some(true),
        } => "[x] ",
        NodeKind::ListItem {
            checked: Some(false),
        } => "[ ] ",
        _ => "",
    };

    let mut body = String::new();
    let mut previous_inline = None;
    for piece in pieces(&item.children) {
        let inline = matches!(piece, Piece::Inline(_));
        match previous_inline {
            // A block straight after inline text keeps a tight item tight
            Some(true) => body.push('\n'),
            Some(false) => body.push_str(BLOCK_SEPARATOR),
            None => {}
        }
        body.push_str(&piece.into_text());
        previous_inline = Some(inline);
    }

    let indent = " ".repeat(marker.len());
    let mut lines = body.split('\n');
    let mut out = format!("{marker}{checkbox}{}", lines.next().unwrap_or_default());
    for line in lines {
        out.push('\n');
        if !line.is_empty() {
            out.push_str(&indent);
            out.push_str(line);
        }
    }
    out
}
