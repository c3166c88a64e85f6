use log::trace;

use crate::models::Leaf;
use crate::parsing::kinds::{Emphasis, MarkTag, MarkType};
use crate::parsing::scan::mark_open_regex;

use super::lexer::{InlineToken, Token, lex};

/// Collects leaves, merging a leaf into its predecessor when both carry the
/// same attributes.
#[derive(Default)]
struct LeafSink {
    leaves: Vec<Leaf>,
    /// Leaves before this index are closed to merging
    sealed: usize,
}

impl LeafSink {
    fn push(&mut self, leaf: Leaf) {
        if leaf.text.is_empty() {
            return;
        }
        let open = self.leaves.len() > self.sealed;
        match self.leaves.last_mut() {
            Some(last) if open && last.same_format(&leaf) => last.text.push_str(&leaf.text),
            _ => self.leaves.push(leaf),
        }
    }

    /// Pushes a leaf that never merges with its neighbours, even when empty.
    fn push_sealed(&mut self, leaf: Leaf) {
        self.leaves.push(leaf);
        self.sealed = self.leaves.len();
    }

    fn finish(self) -> Vec<Leaf> {
        self.leaves
    }
}

/// Parses one line of inline content: custom mark spans plus bold, italic
/// and code formatting.
///
/// An unterminated `<mark ...>` runs to the end of the line. Never returns
/// an empty vector: input that yields no leaves comes back as one literal leaf.
pub fn parse_inline(text: &str) -> Vec<Leaf> {
    let tokens = lex(text);
    let mut sink = LeafSink::default();
    let plain = Leaf::default();

    let mut plain_start = 0;
    let mut i = 0;
    while i < tokens.len() {
        if tokens[i].kind != InlineToken::MarkOpen {
            i += 1;
            continue;
        }

        format_tokens(&tokens[plain_start..i], &plain, &mut sink);

        let close = find(&tokens, i + 1, |t| t.kind == InlineToken::MarkClose);
        let content_end = close.unwrap_or(tokens.len());
        parse_mark(tokens[i].text, &tokens[i + 1..content_end], &mut sink);

        i = close.map_or(tokens.len(), |c| c + 1);
        plain_start = i;
    }
    format_tokens(&tokens[plain_start..], &plain, &mut sink);

    let leaves = sink.finish();
    if leaves.is_empty() {
        vec![Leaf::new(text)]
    } else {
        leaves
    }
}

/// Runs the formatting pass over `text`, every produced leaf starting from
/// the attributes of `base`.
pub fn format_text(text: &str, base: &Leaf) -> Vec<Leaf> {
    let tokens = lex(text);
    let mut sink = LeafSink::default();
    format_tokens(&tokens, base, &mut sink);
    sink.finish()
}

fn parse_mark(open: &str, content: &[Token<'_>], sink: &mut LeafSink) {
    let mut base = Leaf::default();
    let captures = mark_open_regex().captures(open);
    let mark_type = captures
        .as_ref()
        .and_then(|c| c.get(1))
        .and_then(|m| MarkType::from_tag(m.as_str()));

    let Some(mark_type) = mark_type else {
        // Lexer and scanner disagree on the tag: keep it as text
        sink.push(base.with_text(open));
        format_tokens(content, &base, sink);
        return;
    };

    let group = |n| captures.as_ref().and_then(|c| c.get(n)).map(|m| m.as_str());
    MarkTag::apply(mark_type, group(2), group(3), &mut base);
    trace!("mark span {mark_type:?} over {} tokens", content.len());

    flatten_tokens(content, &mut base);
    sink.push_sealed(base);
}

/// Formatting pass for a mark span: delimiters are stripped and their
/// attributes applied to the single `leaf` the whole span becomes.
fn flatten_tokens(tokens: &[Token<'_>], leaf: &mut Leaf) {
    let mut i = 0;
    while i < tokens.len() {
        let tok = tokens[i];
        if let Some(j) = closing_delimiter(tokens, i) {
            if tok.kind == InlineToken::Backtick {
                leaf.code = true;
            } else {
                Emphasis::apply_star_run(tok.text.len(), leaf);
            }
            flatten_tokens(&tokens[i + 1..j], leaf);
            i = j + 1;
            continue;
        }
        leaf.text.push_str(tok.text);
        i += 1;
    }
}

/// Formatting pass: code spans and star runs, matched outside-in.
fn format_tokens(tokens: &[Token<'_>], base: &Leaf, sink: &mut LeafSink) {
    let mut i = 0;
    while i < tokens.len() {
        let tok = tokens[i];
        if let Some(j) = closing_delimiter(tokens, i) {
            let mut inner = base.clone();
            if tok.kind == InlineToken::Backtick {
                inner.code = true;
            } else {
                Emphasis::apply_star_run(tok.text.len(), &mut inner);
            }
            format_tokens(&tokens[i + 1..j], &inner, sink);
            i = j + 1;
            continue;
        }
        sink.push(base.with_text(tok.text));
        i += 1;
    }
}

/// Index of the delimiter closing the one at `i`, when `i` opens a code span
/// or a meaningful star run with non-empty content.
fn closing_delimiter(tokens: &[Token<'_>], i: usize) -> Option<usize> {
    let open = tokens[i];
    let j = match open.kind {
        InlineToken::Backtick => find(tokens, i + 1, |t| t.kind == InlineToken::Backtick)?,
        InlineToken::Stars => {
            let n = open.text.len();
            if !Emphasis::apply_star_run(n, &mut Leaf::default()) {
                return None;
            }
            find(tokens, i + 1, |t| t.kind == InlineToken::Stars && t.text.len() == n)?
        }
        _ => return None,
    };
    (j > i + 1).then_some(j)
}

fn find(tokens: &[Token<'_>], from: usize, pred: impl Fn(&Token<'_>) -> bool) -> Option<usize> {
    tokens
        .get(from..)?
        .iter()
        .position(pred)
        .map(|offset| from + offset)
}
