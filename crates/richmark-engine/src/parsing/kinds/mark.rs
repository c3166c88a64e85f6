use crate::models::Leaf;

/// The three kinds of custom inline annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum MarkType {
    #[serde(rename = "highlighted")]
    Highlighted,
    #[serde(rename = "read-only")]
    ReadOnly,
    #[serde(rename = "comment")]
    Comment,
}

impl MarkType {
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "highlighted" => Some(MarkType::Highlighted),
            "read-only" => Some(MarkType::ReadOnly),
            "comment" => Some(MarkType::Comment),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MarkType::Highlighted => "highlighted",
            MarkType::ReadOnly => "read-only",
            MarkType::Comment => "comment",
        }
    }
}

/// `<mark type="..." comment="..." ai-instructions="yes">...</mark>` tags.
pub struct MarkTag;

impl MarkTag {
    pub const CLOSE: &'static str = "</mark>";
    pub const AI_YES: &'static str = "yes";

    /// Matches an opening tag. Groups: 1 = type, 2 = comment, 3 = ai-instructions.
    pub const OPEN_PATTERN: &'static str = r#"<mark type="(highlighted|read-only|comment)"(?:\s+comment="([^"]*)")?(?:\s+ai-instructions="([^"]*)")?>"#;

    /// Matches a complete mark span, non-greedy, across lines.
    /// Groups: 1 = type, 2 = comment, 3 = ai-instructions, 4 = content.
    pub const PATTERN: &'static str = r#"(?s)<mark type="(highlighted|read-only|comment)"(?:\s+comment="([^"]*?)")?(?:\s+ai-instructions="([^"]*?)")?>(.*?)</mark>"#;

    /// Escapes a comment for the `comment="..."` attribute: `& < > " '`.
    pub fn escape_comment(comment: &str) -> String {
        html_escape::encode_double_quoted_attribute(comment).replace('\'', "&apos;")
    }

    /// Reverses [`MarkTag::escape_comment`] (and any other HTML entities).
    pub fn unescape_comment(comment: &str) -> String {
        html_escape::decode_html_entities(comment).into_owned()
    }

    /// Writes the opening tag carrying the mark attributes of `leaf`, if any.
    /// Only one mark is written per leaf: highlighted, then read-only, then comment.
    pub fn open_for(leaf: &Leaf) -> Option<String> {
        if leaf.highlighted {
            return Some(format!(r#"<mark type="{}">"#, MarkType::Highlighted.as_str()));
        }
        if leaf.read_only {
            return Some(format!(r#"<mark type="{}">"#, MarkType::ReadOnly.as_str()));
        }
        let comment = leaf.comment.as_deref()?;
        let ai = if leaf.is_instruction_to_ai {
            format!(r#" ai-instructions="{}""#, Self::AI_YES)
        } else {
            String::new()
        };
        Some(format!(
            r#"<mark type="{}" comment="{}"{ai}>"#,
            MarkType::Comment.as_str(),
            Self::escape_comment(comment)
        ))
    }

    /// Sets the attributes for a mark of `mark_type` on `leaf`.
    pub fn apply(mark_type: MarkType, comment: Option<&str>, ai: Option<&str>, leaf: &mut Leaf) {
        match mark_type {
            MarkType::Highlighted => leaf.highlighted = true,
            MarkType::ReadOnly => leaf.read_only = true,
            MarkType::Comment => {
                leaf.comment = Some(comment.map(Self::unescape_comment).unwrap_or_default());
                if ai == Some(Self::AI_YES) {
                    leaf.is_instruction_to_ai = true;
                }
            }
        }
    }
}
