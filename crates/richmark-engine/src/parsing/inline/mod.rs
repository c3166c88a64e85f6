//! # Inline Parsing
//!
//! Turns one line of text into a sequence of [`Leaf`](crate::models::Leaf)s.
//!
//! ## Architecture
//!
//! - **`lexer`**: a Logos tokenizer producing a flat stream of mark tags,
//!   star runs, backticks and text runs. Every byte lands in exactly one token.
//! - **`parser`**: recursive descent over that stream. Mark spans are found
//!   first; the text around and inside them goes through the formatting pass,
//!   which matches delimiter pairs outside-in (code, then star runs).
//!
//! ## Precedence
//!
//! `<mark ...>` tags are resolved before any formatting, so `*` inside a mark
//! never pairs with `*` outside it. A star run only closes on a run of the
//! same length: `***` is bold and italic together, matching the order the
//! serializer nests delimiters in.

pub mod lexer;
pub mod parser;

pub use lexer::{InlineToken, Token, lex};
pub use parser::{format_text, parse_inline};
