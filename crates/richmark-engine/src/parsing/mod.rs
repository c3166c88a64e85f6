pub mod extract;
pub mod inline;
pub mod kinds;
pub mod lines;
pub mod normalize;
pub mod scan;
pub mod standard;
pub mod tracked;

use log::{debug, warn};
use pulldown_cmark::TagEnd;

use crate::models::{Leaf, Node};

pub use extract::{MarkedSpan, marked_text};
pub use scan::{Strategy, classify};

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("End event without a matching start: {0:?}")]
    UnbalancedEnd(TagEnd),
    #[error("Text outside any block: {0:?}")]
    TextOutsideBlock(String),
    #[error("Unclosed container at end of input: {0}")]
    Unclosed(String),
}

/// Parses `markdown` into a normalized document tree.
///
/// Blank input short-circuits to one empty paragraph. Otherwise the scanner
/// picks a strategy and the result goes through both normalizer passes, so
/// every node in the returned tree has at least one child.
pub fn parse_markdown(markdown: &str) -> Result<Vec<Node>, ParseError> {
    if markdown.trim().is_empty() {
        return Ok(vec![Node::empty_paragraph()]);
    }

    let strategy = classify(markdown);
    debug!("parsing {} bytes with {strategy:?}", markdown.len());

    let nodes = match strategy {
        Strategy::TrackedChanges => tracked::parse(markdown)?,
        Strategy::Marks => lines::parse(markdown),
        Strategy::Standard => standard::parse(markdown)?,
    };
    let nodes = if nodes.is_empty() {
        vec![Node::empty_paragraph()]
    } else {
        nodes
    };
    Ok(normalize::normalize(nodes))
}

/// Parses `markdown`, substituting a single paragraph holding the raw input
/// when the parser fails.
pub fn deserialize(markdown: &str) -> Vec<Node> {
    or_raw_paragraph(markdown, parse_markdown(markdown))
}

fn or_raw_paragraph(markdown: &str, parsed: Result<Vec<Node>, ParseError>) -> Vec<Node> {
    parsed.unwrap_or_else(|e| {
        warn!("falling back to raw text paragraph: {e}");
        vec![Node::paragraph(vec![Leaf::new(markdown)])]
    })
}
