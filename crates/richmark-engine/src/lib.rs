pub mod editing;
pub mod models;
pub mod parsing;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use editing::{SplitError, SplitResult, serialize, split_at};
pub use models::*;
pub use parsing::{MarkedSpan, ParseError, deserialize, marked_text, parse_markdown};
pub use parsing::kinds::MarkType;
