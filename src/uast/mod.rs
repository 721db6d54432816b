//! The universal AST: normalized nodes and the role vocabulary.

pub mod node;
pub mod role;

pub use node::{Edge, Node, Position};
pub use role::{Role, RoleSet};
