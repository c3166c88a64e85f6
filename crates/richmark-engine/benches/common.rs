// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_markdown_content(size: usize) -> String {
    let base = "# Title\n\n## Section\n\nParagraph with **bold**, *italic* and `code`.\n\n- Bullet point\n  - Nested item\n- Another item\n\n```rust\nfn example() {\n    println!(\"Hello\");\n}\n```\n\n";
    base.repeat(size)
}

#[allow(dead_code)]
pub fn generate_marked_content(size: usize) -> String {
    let base = "## Review <mark type=\"highlighted\">notes</mark>\n\nSome <mark type=\"comment\" comment=\"tighten &quot;this&quot;\" ai-instructions=\"yes\">wordy **prose**</mark> here.\n\n- <mark type=\"read-only\">fixed</mark> item\n\n";
    base.repeat(size)
}

#[allow(dead_code)]
pub fn generate_tracked_content(size: usize) -> String {
    let base = "Intro text.\n\n[change type=\"create\"]Added **words**.[/change]\n\n[change type=\"delete\"]- removed item[/change]\n\n";
    base.repeat(size)
}
