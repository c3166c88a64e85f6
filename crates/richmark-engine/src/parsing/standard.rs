//! Adapter over `pulldown-cmark` for markdown without custom marks.
//!
//! # Event flow
//!
//! pulldown-cmark emits a flat stream of `Start(tag)` / `End(tag)` pairs with
//! inline events in between. The processor keeps a stack of open frames, one
//! per container tag, and a counter per inline format:
//!
//! ```markdown
//! - Some **bold**
//! ```
//! Events: `Start(List)`, `Start(Item)`, `Text("Some ")`, `Start(Strong)`,
//! `Text("bold")`, `End(Strong)`, `End(Item)`, `End(List)`.
//!
//! Containers become [`Node`]s when their `End` arrives; inline events become
//! [`Leaf`]s carrying whatever formats are open at that point.
//!
//! After the transform, leaves that still contain `*` or `` ` `` delimiters
//! go through the same formatting pass as the line parser.

use log::{debug, trace};
use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};

use crate::models::{Child, Leaf, Node, NodeKind};

use super::ParseError;
use super::inline::format_text;

/// Parses `markdown` with pulldown-cmark and converts the events to nodes.
pub fn parse(markdown: &str) -> Result<Vec<Node>, ParseError> {
    let options = Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS;
    parse_events(Parser::new_ext(markdown, options))
}

/// Converts an already produced event stream to nodes. Fails on streams that
/// leave text outside a block or do not balance their tags.
pub(crate) fn parse_events<'a>(
    events: impl IntoIterator<Item = Event<'a>>,
) -> Result<Vec<Node>, ParseError> {
    let mut processor = EventProcessor::default();
    for event in events {
        processor.process_event(event)?;
    }

    let nodes = processor.finalize()?;
    debug!("standard parser produced {} nodes", nodes.len());
    Ok(nodes.into_iter().map(apply_missed_formatting).collect())
}

/// A container whose `End` event has not arrived yet.
struct Frame {
    kind: NodeKind,
    children: Vec<Child>,
}

/// Inline formats currently open, as nesting counters.
#[derive(Default)]
struct Formats {
    strong: usize,
    emphasis: usize,
    strikethrough: usize,
}

impl Formats {
    fn leaf(&self, text: &str) -> Leaf {
        Leaf {
            strong: self.strong > 0,
            emphasis: self.emphasis > 0,
            strikethrough: self.strikethrough > 0,
            ..Leaf::new(text)
        }
    }
}

#[derive(Default)]
struct EventProcessor {
    /// Completed top-level nodes
    nodes: Vec<Node>,
    /// Open containers, innermost last
    stack: Vec<Frame>,
    formats: Formats,
    /// Set while inside a fenced or indented code block
    in_code_block: bool,
}

impl EventProcessor {
    fn process_event(&mut self, event: Event<'_>) -> Result<(), ParseError> {
        trace!("event {event:?}");
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => return self.end(tag),
            Event::Text(text) => {
                let leaf = if self.in_code_block {
                    Leaf::new(text.as_ref())
                } else {
                    self.formats.leaf(&text)
                };
                self.push_leaf(leaf)?;
            }
            Event::Code(code) => {
                let mut leaf = self.formats.leaf(&code);
                leaf.code = true;
                self.push_leaf(leaf)?;
            }
            Event::Html(html) | Event::InlineHtml(html) => {
                self.push_leaf(self.formats.leaf(&html))?
            }
            Event::SoftBreak | Event::HardBreak => self.push_leaf(self.formats.leaf("\n"))?,
            Event::Rule => self.push_node(Node::new(NodeKind::ThematicBreak, Vec::new())),
            Event::TaskListMarker(checked) => {
                if let Some(frame) = self
                    .stack
                    .iter_mut()
                    .rev()
                    .find(|f| matches!(f.kind, NodeKind::ListItem { .. }))
                {
                    frame.kind = NodeKind::ListItem {
                        checked: Some(checked),
                    };
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn start(&mut self, tag: Tag<'_>) {
        let kind = match tag {
            Tag::Paragraph | Tag::HtmlBlock => NodeKind::Paragraph,
            Tag::Heading { level, .. } => NodeKind::Heading { depth: level as u8 },
            Tag::BlockQuote { .. } => NodeKind::BlockQuote,
            Tag::CodeBlock(kind) => {
                self.in_code_block = true;
                let lang = match kind {
                    CodeBlockKind::Fenced(lang) if !lang.is_empty() => Some(lang.to_string()),
                    _ => None,
                };
                NodeKind::Code { lang }
            }
            Tag::List(first) => NodeKind::List {
                ordered: first.is_some(),
                start: first,
            },
            Tag::Item => NodeKind::ListItem { checked: None },
            Tag::Link { dest_url, .. } => NodeKind::Link {
                url: dest_url.to_string(),
            },
            Tag::Emphasis => {
                self.formats.emphasis += 1;
                return;
            }
            Tag::Strong => {
                self.formats.strong += 1;
                return;
            }
            Tag::Strikethrough => {
                self.formats.strikethrough += 1;
                return;
            }
            // Images, tables and other extensions contribute their text only
            _ => return,
        };
        self.stack.push(Frame {
            kind,
            children: Vec::new(),
        });
    }

    fn end(&mut self, tag: TagEnd) -> Result<(), ParseError> {
        match tag {
            TagEnd::Emphasis => self.formats.emphasis = self.formats.emphasis.saturating_sub(1),
            TagEnd::Strong => self.formats.strong = self.formats.strong.saturating_sub(1),
            TagEnd::Strikethrough => {
                self.formats.strikethrough = self.formats.strikethrough.saturating_sub(1)
            }
            TagEnd::Paragraph
            | TagEnd::HtmlBlock
            | TagEnd::Heading { .. }
            | TagEnd::BlockQuote { .. }
            | TagEnd::CodeBlock
            | TagEnd::List { .. }
            | TagEnd::Item
            | TagEnd::Link => {
                let frame = self.stack.pop().ok_or(ParseError::UnbalancedEnd(tag))?;
                let mut node = Node::new(frame.kind, frame.children);
                if matches!(tag, TagEnd::CodeBlock) {
                    self.in_code_block = false;
                    node = finish_code_block(node);
                }
                self.push_node(node);
            }
            _ => {}
        }
        Ok(())
    }

    fn push_node(&mut self, node: Node) {
        match self.stack.last_mut() {
            Some(parent) => parent.children.push(Child::Node(node)),
            None => self.nodes.push(node),
        }
    }

    fn push_leaf(&mut self, leaf: Leaf) -> Result<(), ParseError> {
        let parent = self
            .stack
            .last_mut()
            .ok_or_else(|| ParseError::TextOutsideBlock(leaf.text.clone()))?;

        // pulldown-cmark splits text at every potential delimiter; merge back
        if let Some(Child::Leaf(last)) = parent.children.last_mut()
            && last.same_format(&leaf)
        {
            last.text.push_str(&leaf.text);
            return Ok(());
        }
        parent.children.push(Child::Leaf(leaf));
        Ok(())
    }

    fn finalize(self) -> Result<Vec<Node>, ParseError> {
        if let Some(frame) = self.stack.last() {
            return Err(ParseError::Unclosed(format!("{:?}", frame.kind)));
        }
        Ok(self.nodes)
    }
}

/// Code block content arrives with a trailing newline per line; the tree keeps
/// the lines without the final one.
fn finish_code_block(mut node: Node) -> Node {
    let text = node.text();
    let text = text.strip_suffix('\n').unwrap_or(&text);
    node.children = vec![Child::Leaf(Leaf::new(text))];
    node
}

/// Catches inline formatting the transform left in leaf text as literal
/// delimiters. Code blocks are left alone.
fn apply_missed_formatting(node: Node) -> Node {
    if matches!(node.kind, NodeKind::Code { .. }) {
        return node;
    }
    let mut children = Vec::with_capacity(node.children.len());
    for child in node.children {
        match child {
            Child::Node(inner) => children.push(Child::Node(apply_missed_formatting(inner))),
            Child::Leaf(leaf) if has_delimiters(&leaf.text) => {
                let formatted = format_text(&leaf.text, &leaf.with_text(""));
                if formatted.is_empty() {
                    children.push(Child::Leaf(leaf));
                } else {
                    debug!("formatting missed by the transform in {:?}", leaf.text);
                    children.extend(formatted.into_iter().map(Child::Leaf));
                }
            }
            leaf => children.push(leaf),
        }
    }
    Node { children, ..node }
}

fn has_delimiters(text: &str) -> bool {
    text.contains('*') || text.contains('`')
}
