//! Line-oriented parser for markdown carrying custom marks.
//!
//! Input is split into blocks on blank lines. Each line of a block is then
//! classified on its own, with fences taking priority over headings, and
//! headings over list items. Consecutive list lines are not grouped: each
//! becomes a single-item list.

use std::sync::OnceLock;

use log::debug;
use regex::Regex;

use crate::models::{Child, Leaf, Node, NodeKind};

use super::inline::parse_inline;
use super::kinds::Fence;

static BLANK_LINES_REGEX: OnceLock<Regex> = OnceLock::new();

fn blank_lines_regex() -> &'static Regex {
    BLANK_LINES_REGEX.get_or_init(|| Regex::new(r"\n\s*\n").expect("Invalid blank line regex"))
}

/// Classification of a single line containing only local facts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineClass<'a> {
    /// A triple-backtick line; `lang` is whatever follows the ticks.
    Fence { lang: &'a str },
    /// `#` to `######` followed by whitespace.
    Heading { depth: u8, text: &'a str },
    /// `-`, `*`, `+` or `N.` followed by whitespace, optionally indented.
    ListItem { ordered: bool, text: &'a str },
    Blank,
    Text(&'a str),
}

impl<'a> LineClass<'a> {
    pub fn classify(line: &'a str) -> Self {
        if let Some(lang) = Fence::sig(line) {
            return LineClass::Fence { lang };
        }
        if let Some((depth, text)) = heading(line) {
            return LineClass::Heading { depth, text };
        }
        if let Some((ordered, text)) = list_item(line) {
            return LineClass::ListItem { ordered, text };
        }
        if line.trim().is_empty() {
            LineClass::Blank
        } else {
            LineClass::Text(line)
        }
    }
}

fn heading(line: &str) -> Option<(u8, &str)> {
    let depth = line.bytes().take_while(|b| *b == b'#').count();
    if !(1..=6).contains(&depth) {
        return None;
    }
    let rest = &line[depth..];
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    Some((depth as u8, rest.trim_start()))
}

fn list_item(line: &str) -> Option<(bool, &str)> {
    let body = line.trim_start();
    let (ordered, marker_len) = match body.as_bytes().first()? {
        b'-' | b'*' | b'+' => (false, 1),
        b if b.is_ascii_digit() => {
            let digits = body.bytes().take_while(u8::is_ascii_digit).count();
            if body.as_bytes().get(digits) != Some(&b'.') {
                return None;
            }
            (true, digits + 1)
        }
        _ => return None,
    };
    let rest = &body[marker_len..];
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    Some((ordered, rest.trim_start()))
}

/// Parses `markdown` block by block, line by line.
pub fn parse(markdown: &str) -> Vec<Node> {
    let mut nodes = Vec::new();

    for block in blank_lines_regex().split(markdown) {
        let block = block.trim();
        if block.is_empty() {
            // Keeps the vertical spacing on round-trip
            nodes.push(Node::empty_paragraph());
            continue;
        }

        let lines: Vec<&str> = block
            .split('\n')
            .map(|line| line.trim_end_matches('\r'))
            .collect();
        parse_block_lines(&lines, &mut nodes);
    }

    debug!("line parser produced {} nodes", nodes.len());
    nodes
}

fn parse_block_lines(lines: &[&str], nodes: &mut Vec<Node>) {
    let mut i = 0;
    while i < lines.len() {
        match LineClass::classify(lines[i]) {
            LineClass::Fence { lang } => {
                i += 1;
                let start = i;
                while i < lines.len() && Fence::sig(lines[i]).is_none() {
                    i += 1;
                }
                let code = lines[start..i].join("\n");
                let lang = (!lang.is_empty()).then(|| lang.to_string());
                nodes.push(Node::code(lang, code));
                // Closing fence, if there was one
                i += 1;
                continue;
            }
            LineClass::Heading { depth, text } => {
                nodes.push(Node::heading(depth, parse_inline(text)));
            }
            LineClass::ListItem { ordered, text } => {
                let item = Node::list_item(parse_inline(text));
                nodes.push(Node::new(
                    NodeKind::List {
                        ordered,
                        start: None,
                    },
                    vec![Child::Node(item)],
                ));
            }
            LineClass::Text(text) => nodes.push(Node::paragraph(parse_inline(text))),
            LineClass::Blank => nodes.push(Node::paragraph(vec![Leaf::empty()])),
        }
        i += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("```rust", LineClass::Fence { lang: "rust" })]
    #[case("# Title", LineClass::Heading { depth: 1, text: "Title" })]
    #[case("###### Six", LineClass::Heading { depth: 6, text: "Six" })]
    #[case("####### Seven", LineClass::Text("####### Seven"))]
    #[case("#NoSpace", LineClass::Text("#NoSpace"))]
    #[case("- item", LineClass::ListItem { ordered: false, text: "item" })]
    #[case("  * nested", LineClass::ListItem { ordered: false, text: "nested" })]
    #[case("+ plus", LineClass::ListItem { ordered: false, text: "plus" })]
    #[case("12. twelfth", LineClass::ListItem { ordered: true, text: "twelfth" })]
    #[case("**bold** start", LineClass::Text("**bold** start"))]
    #[case("3.14 is pi", LineClass::Text("3.14 is pi"))]
    #[case("   ", LineClass::Blank)]
    fn classify_lines(#[case] line: &str, #[case] expected: LineClass<'_>) {
        assert_eq!(LineClass::classify(line), expected);
    }

    #[test]
    fn heading_with_highlight() {
        let nodes = parse(r#"## A <mark type="highlighted">key</mark> point"#);
        assert_eq!(
            nodes,
            vec![Node::heading(
                2,
                vec![
                    Leaf::new("A "),
                    Leaf::new("key").highlighted(),
                    Leaf::new(" point")
                ]
            )]
        );
    }

    #[test]
    fn each_list_line_is_its_own_list() {
        let nodes = parse("- one\n- two\n1. three");
        assert_eq!(
            nodes,
            vec![
                Node::list(false, vec![Node::list_item(vec![Leaf::new("one")])]),
                Node::list(false, vec![Node::list_item(vec![Leaf::new("two")])]),
                Node::list(true, vec![Node::list_item(vec![Leaf::new("three")])]),
            ]
        );
    }

    #[test]
    fn fenced_code_keeps_lines_verbatim() {
        let nodes = parse("```js\nlet a = **b**;\n  indented\n```\nafter");
        assert_eq!(
            nodes,
            vec![
                Node::code(Some("js".to_string()), "let a = **b**;\n  indented"),
                Node::paragraph(vec![Leaf::new("after")]),
            ]
        );
    }

    #[test]
    fn unterminated_fence_swallows_rest_of_block() {
        let nodes = parse("```\ncode\n# not a heading");
        assert_eq!(nodes, vec![Node::code(None, "code\n# not a heading")]);
    }

    #[test]
    fn blank_lines_separate_blocks() {
        let nodes = parse(r#"first <mark type="read-only">x</mark>

second"#);
        assert_eq!(
            nodes,
            vec![
                Node::paragraph(vec![Leaf::new("first "), Leaf::new("x").read_only()]),
                Node::paragraph(vec![Leaf::new("second")]),
            ]
        );
    }

    #[test]
    fn leading_blank_block_becomes_empty_paragraph() {
        let nodes = parse("\n\ntext");
        assert_eq!(
            nodes,
            vec![Node::empty_paragraph(), Node::paragraph(vec![Leaf::new("text")])]
        );
    }

    #[test]
    fn lines_in_one_block_become_separate_paragraphs() {
        let nodes = parse("one\ntwo");
        assert_eq!(
            nodes,
            vec![
                Node::paragraph(vec![Leaf::new("one")]),
                Node::paragraph(vec![Leaf::new("two")]),
            ]
        );
    }
}
