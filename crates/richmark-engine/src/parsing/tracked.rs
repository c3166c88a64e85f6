//! Parser for markdown containing `[change ...]...[/change]` blocks.
//!
//! Text between tracked changes, and the content of each change, goes
//! through the standard parser. A trailing opening tag without its closing
//! tag wraps everything after it. Input without any tag is parsed whole.

use log::{debug, trace};

use crate::models::{ChangeType, Child, Node, NodeKind, generate_change_id};

use super::scan::{change_open_regex, change_regex};
use super::{ParseError, standard};

pub fn parse(markdown: &str) -> Result<Vec<Node>, ParseError> {
    let mut results = Vec::new();
    let mut current = 0;
    let mut matched = 0;

    for caps in change_regex().captures_iter(markdown) {
        let Some(whole) = caps.get(0) else { continue };
        matched += 1;

        push_regular(&markdown[current..whole.start()], &mut results)?;

        let content = caps.get(3).map_or("", |m| m.as_str());
        results.push(tracked_change(
            &caps[1],
            caps.get(2).map(|m| m.as_str()),
            content,
        )?);
        current = whole.end();
    }

    let rest = &markdown[current..];
    if let Some(caps) = change_open_regex().captures(rest)
        && let Some(open) = caps.get(0)
    {
        debug!("unterminated tracked change at byte {}", current + open.start());
        matched += 1;
        push_regular(&rest[..open.start()], &mut results)?;
        results.push(tracked_change(
            &caps[1],
            caps.get(2).map(|m| m.as_str()),
            &rest[open.end()..],
        )?);
    } else {
        push_regular(rest, &mut results)?;
    }

    debug!("found {matched} tracked changes, {} nodes", results.len());
    if results.is_empty() {
        results.push(Node::empty_paragraph());
    }
    Ok(results)
}

fn push_regular(text: &str, results: &mut Vec<Node>) -> Result<(), ParseError> {
    if !text.trim().is_empty() {
        results.extend(standard::parse(text)?);
    }
    Ok(())
}

fn tracked_change(tag: &str, id: Option<&str>, content: &str) -> Result<Node, ParseError> {
    let change_id = id.map_or_else(generate_change_id, str::to_string);
    trace!("tracked change {tag} {change_id}");

    let children = if content.trim().is_empty() {
        Vec::new()
    } else {
        standard::parse(content)?
    };
    Ok(Node::new(
        NodeKind::TrackedChange {
            change_id,
            change_type: ChangeType::from_tag(tag),
            user_id: None,
            timestamp: None,
        },
        children.into_iter().map(Child::Node).collect(),
    ))
}
