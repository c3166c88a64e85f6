use serde::{Deserialize, Serialize};

fn is_false(value: &bool) -> bool {
    !*value
}

/// A run of text carrying independent formatting and annotation attributes.
///
/// Attributes never nest inside a leaf. Mixed formatting is represented by
/// adjacent leaves with different attribute sets.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leaf {
    pub text: String,
    /// `**bold**`
    #[serde(default, skip_serializing_if = "is_false")]
    pub strong: bool,
    /// `*italic*`
    #[serde(default, skip_serializing_if = "is_false")]
    pub emphasis: bool,
    /// `` `code` ``
    #[serde(default, skip_serializing_if = "is_false")]
    pub code: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub underline: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub strikethrough: bool,
    /// `<mark type="highlighted">`
    #[serde(default, skip_serializing_if = "is_false")]
    pub highlighted: bool,
    /// `<mark type="read-only">`
    #[serde(rename = "read-only", default, skip_serializing_if = "is_false")]
    pub read_only: bool,
    /// `<mark type="comment" comment="...">`, holding the unescaped comment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// `ai-instructions="yes"` on a comment mark.
    #[serde(rename = "isInstructionToAI", default, skip_serializing_if = "is_false")]
    pub is_instruction_to_ai: bool,
}

impl Leaf {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// The synthetic leaf injected into empty containers.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn strong(mut self) -> Self {
        self.strong = true;
        self
    }

    pub fn emphasis(mut self) -> Self {
        self.emphasis = true;
        self
    }

    pub fn code(mut self) -> Self {
        self.code = true;
        self
    }

    pub fn strikethrough(mut self) -> Self {
        self.strikethrough = true;
        self
    }

    pub fn highlighted(mut self) -> Self {
        self.highlighted = true;
        self
    }

    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn instruction_to_ai(mut self) -> Self {
        self.is_instruction_to_ai = true;
        self
    }

    /// A copy of this leaf with the same attributes and different text.
    pub fn with_text(&self, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..self.clone()
        }
    }

    /// True when both leaves carry exactly the same attributes.
    pub fn same_format(&self, other: &Leaf) -> bool {
        self.with_text("") == other.with_text("")
    }

    /// Length of the text in characters, the unit cursor offsets are counted in.
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }
}
