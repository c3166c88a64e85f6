//! # Syntax Kinds
//!
//! Types that own the delimiters of each construct this crate reads and
//! writes. Parsers and the serializer refer to these constants; neither
//! hardcodes `<mark`, `[change` or a backtick fence.
//!
//! - **`MarkTag`** / **`MarkType`**: `<mark type="...">...</mark>` inline annotations
//! - **`ChangeTag`**: `[change type="..."]...[/change]` tracked-change blocks
//! - **`Fence`**: triple-backtick code fences
//! - **`Emphasis`**: `*`, `**` and `` ` `` inline formatting delimiters

pub mod change;
pub mod emphasis;
pub mod fence;
pub mod mark;

pub use change::ChangeTag;
pub use emphasis::Emphasis;
pub use fence::Fence;
pub use mark::{MarkTag, MarkType};
