/// `[change type="..." id="..."]...[/change]` tracked-change tags.
pub struct ChangeTag;

impl ChangeTag {
    pub const CLOSE: &'static str = "[/change]";

    /// Matches a complete tracked change, non-greedy, across lines.
    /// Groups: 1 = type, 2 = id, 3 = content.
    pub const PATTERN: &'static str = r#"(?s)\[change\s+type=["']?(create|update|delete|insertion|deletion)["']?(?:\s+id=["']?([^"'\]]+)["']?)?\](.*?)\[/change\]"#;

    /// Matches an opening tag on its own. Groups: 1 = type, 2 = id.
    pub const OPEN_PATTERN: &'static str = r#"\[change\s+type=["']?(create|update|delete|insertion|deletion)["']?(?:\s+id=["']?([^"'\]]+)["']?)?\]"#;

    /// Writes the opening tag in the serialized vocabulary.
    pub fn open(change_type: &str) -> String {
        format!(r#"[change type="{change_type}"]"#)
    }
}
