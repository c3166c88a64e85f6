/*!
 * # Editing Module
 *
 * Turns document trees back into markdown and computes edits on them.
 *
 * ## Architecture Overview
 *
 * ### 1. Trees are values
 * - Nothing here mutates the tree it is given
 * - An edit returns freshly built nodes or serialized markdown; the host
 *   replaces its working copy with the result
 *
 * ### 2. Serialization mirrors parsing
 * - Leaves are written with `**`, `*` and `` ` `` stacked in that order,
 *   then wrapped in at most one `<mark ...>` tag
 * - Sibling blocks are separated by a blank line so that re-parsing
 *   reproduces the same block boundaries
 * - Tracked changes are written with the `insertion|deletion` vocabulary
 *
 * ### 3. Splitting at the cursor
 * - A collapsed selection inside a `markdown_block` splits that block into
 *   "before" and "after" copies along the cursor path
 * - Both halves are serialized independently
 *
 * ## Module Structure
 *
 * - **`serialize`**: tree to markdown
 * - **`split`**: cursor-position block splitting
 *
 * ## Usage Pattern
 *
 * ```rust
 * use richmark_engine::editing::{serialize, split_at};
 * use richmark_engine::models::{Node, Point, Selection};
 * use richmark_engine::parsing::parse_markdown;
 *
 * let children = parse_markdown("Some **bold** text.").unwrap();
 * assert_eq!(serialize(&children), "Some **bold** text.");
 *
 * let tree = vec![Node::markdown_block("block-1", None, children)];
 * // Paragraph 0, leaf 1 ("bold"), two characters in
 * let cursor = Selection::collapsed(Point::new(vec![0, 0, 1], 2));
 * let split = split_at(&tree, &cursor).unwrap().unwrap();
 * assert_eq!(split.before_markdown, "Some **bo**");
 * assert_eq!(split.after_markdown, "**ld** text.");
 * ```
 */

pub mod serialize;
pub mod split;

pub use serialize::{serialize, serialize_children, serialize_leaf};
pub use split::{SplitError, SplitResult, split_at, split_at_point};
