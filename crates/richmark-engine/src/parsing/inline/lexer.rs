use logos::Logos;

/// Token kinds for inline content.
///
/// Nothing is skipped: concatenating the token texts reproduces the input.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlineToken {
    /// `<mark type="..." ...>` opening tag
    #[regex(r#"<mark type="(highlighted|read-only|comment)"([ \t]+comment="[^"]*")?([ \t]+ai-instructions="[^"]*")?>"#)]
    MarkOpen,

    /// `</mark>`
    #[token("</mark>")]
    MarkClose,

    /// A run of `*`; its length decides italic, bold or both
    #[regex(r"\*+")]
    Stars,

    /// Single backtick
    #[token("`")]
    Backtick,

    /// A `<` that does not start a mark tag
    #[token("<")]
    Lt,

    /// Anything else
    #[regex(r"[^<*`]+")]
    Text,
}

/// A lexed token with its kind and text slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: InlineToken,
    pub text: &'a str,
}

/// Lex the input into a sequence of tokens.
pub fn lex(input: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut lexer = InlineToken::lexer(input);

    while let Some(result) = lexer.next() {
        // Unrecognized input is kept as text
        let kind = result.unwrap_or(InlineToken::Text);
        tokens.push(Token {
            kind,
            text: lexer.slice(),
        });
    }

    tokens
}
