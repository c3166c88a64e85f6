/// Triple-backtick code fence.
pub struct Fence;

impl Fence {
    pub const TICKS: &'static str = "```";

    /// If `line` opens or closes a fence, returns the text after the ticks
    /// (the language tag on an opener, possibly empty).
    pub fn sig(line: &str) -> Option<&str> {
        line.trim().strip_prefix(Self::TICKS)
    }
}
