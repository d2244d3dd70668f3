// The in-memory filesystem served by every session
pub mod error;
pub mod node;
pub mod resolver;

pub use error::PathError;
pub use node::{Node, NodeKind, VirtualFs};
