pub mod leaf;
pub mod node;
pub mod selection;

pub use leaf::Leaf;
pub use node::{ChangeType, Child, Node, NodeKind, generate_change_id};
pub use selection::{Point, Selection};
