//! Graph structure edited by a session.

mod labels;
mod model;

pub use labels::{is_letter_label, letter_label, next_free_label};
pub use model::{Edge, EdgeKind, Graph, Node, NodeId, Position};
