use crate::models::Leaf;

/// Inline formatting delimiters, written outermost-last by the serializer:
/// bold, then italic, then code.
pub struct Emphasis;

impl Emphasis {
    pub const STRONG: &'static str = "**";
    pub const EMPHASIS: &'static str = "*";
    pub const CODE: &'static str = "`";
    pub const STRIKETHROUGH: &'static str = "~~";

    /// Applies the attributes a run of `n` stars stands for. Returns false
    /// for runs that carry no meaning.
    pub fn apply_star_run(n: usize, leaf: &mut Leaf) -> bool {
        match n {
            1 => leaf.emphasis = true,
            2 => leaf.strong = true,
            3 => {
                leaf.strong = true;
                leaf.emphasis = true;
            }
            _ => return false,
        }
        true
    }
}
