use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Leaf;

/// Whether a tracked change adds or removes its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    Insertion,
    Deletion,
}

impl ChangeType {
    /// Maps a `[change type="..."]` tag value. `delete` and `deletion` are
    /// deletions; everything else (`create`, `update`, `insertion`) inserts.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "delete" | "deletion" => ChangeType::Deletion,
            _ => ChangeType::Insertion,
        }
    }

    /// The vocabulary written back out by the serializer.
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeType::Insertion => "insertion",
            ChangeType::Deletion => "deletion",
        }
    }
}

/// The kind of a document node, carrying only the fields of that kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum NodeKind {
    #[serde(rename = "paragraph")]
    Paragraph,
    #[serde(rename = "heading")]
    Heading { depth: u8 },
    #[serde(rename = "list")]
    List {
        ordered: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        start: Option<u64>,
    },
    #[serde(rename = "listItem")]
    ListItem {
        #[serde(default)]
        checked: Option<bool>,
    },
    #[serde(rename = "code")]
    Code {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        lang: Option<String>,
    },
    #[serde(rename = "link")]
    Link { url: String },
    /// Host-level container; the unit the block splitter works on.
    #[serde(rename = "markdown_block")]
    MarkdownBlock {
        id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        level: Option<u32>,
    },
    #[serde(rename = "tracked-change", rename_all = "camelCase")]
    TrackedChange {
        change_id: String,
        change_type: ChangeType,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        user_id: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        timestamp: Option<u64>,
    },
    #[serde(rename = "blockquote")]
    BlockQuote,
    #[serde(rename = "thematicBreak")]
    ThematicBreak,
}

/// A typed container owning an ordered sequence of children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    #[serde(flatten)]
    pub kind: NodeKind,
    pub children: Vec<Child>,
}

/// A child of a node: either a nested node or a text leaf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Child {
    Node(Node),
    Leaf(Leaf),
}

impl Child {
    pub fn as_leaf(&self) -> Option<&Leaf> {
        match self {
            Child::Leaf(leaf) => Some(leaf),
            Child::Node(_) => None,
        }
    }

    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Child::Node(node) => Some(node),
            Child::Leaf(_) => None,
        }
    }

    /// Concatenated text of every leaf under this child.
    pub fn text(&self) -> String {
        match self {
            Child::Leaf(leaf) => leaf.text.clone(),
            Child::Node(node) => node.text(),
        }
    }
}

impl From<Leaf> for Child {
    fn from(leaf: Leaf) -> Self {
        Child::Leaf(leaf)
    }
}

impl From<Node> for Child {
    fn from(node: Node) -> Self {
        Child::Node(node)
    }
}

impl Node {
    pub fn new(kind: NodeKind, children: Vec<Child>) -> Self {
        Self { kind, children }
    }

    pub fn paragraph(leaves: Vec<Leaf>) -> Self {
        Self::new(NodeKind::Paragraph, leaves.into_iter().map(Child::Leaf).collect())
    }

    /// A paragraph holding a single empty leaf, used for blank input and spacing.
    pub fn empty_paragraph() -> Self {
        Self::paragraph(vec![Leaf::empty()])
    }

    pub fn heading(depth: u8, leaves: Vec<Leaf>) -> Self {
        Self::new(
            NodeKind::Heading { depth },
            leaves.into_iter().map(Child::Leaf).collect(),
        )
    }

    pub fn list(ordered: bool, items: Vec<Node>) -> Self {
        Self::new(
            NodeKind::List {
                ordered,
                start: None,
            },
            items.into_iter().map(Child::Node).collect(),
        )
    }

    pub fn list_item(leaves: Vec<Leaf>) -> Self {
        Self::new(
            NodeKind::ListItem { checked: None },
            leaves.into_iter().map(Child::Leaf).collect(),
        )
    }

    pub fn code(lang: Option<String>, text: impl Into<String>) -> Self {
        Self::new(NodeKind::Code { lang }, vec![Child::Leaf(Leaf::new(text))])
    }

    pub fn markdown_block(id: impl Into<String>, level: Option<u32>, children: Vec<Node>) -> Self {
        Self::new(
            NodeKind::MarkdownBlock {
                id: id.into(),
                level,
            },
            children.into_iter().map(Child::Node).collect(),
        )
    }

    /// Builds a tracked change with a fresh change id, stamped with the current time.
    pub fn tracked_change(change_type: ChangeType, children: Vec<Node>, user_id: Option<String>) -> Self {
        Self::new(
            NodeKind::TrackedChange {
                change_id: generate_change_id(),
                change_type,
                user_id,
                timestamp: Some(now_millis()),
            },
            children.into_iter().map(Child::Node).collect(),
        )
    }

    /// Concatenated text of every leaf in this subtree.
    pub fn text(&self) -> String {
        self.children.iter().map(Child::text).collect()
    }

    /// Looks up a descendant by child indices, relative to this node.
    pub fn get(&self, path: &[usize]) -> Option<&Child> {
        let (first, rest) = path.split_first()?;
        let child = self.children.get(*first)?;
        if rest.is_empty() {
            return Some(child);
        }
        child.as_node()?.get(rest)
    }
}

/// Generates a change id of the form `change-<millis>-<random>`.
pub fn generate_change_id() -> String {
    let random = Uuid::new_v4().simple().to_string();
    format!("change-{}-{}", now_millis(), &random[..9])
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or_default()
}
