//! The Graph Node Model: the typed node & edge taxonomy nodes and passes
//! operate on.

pub mod edge;
pub mod node;
pub mod span;

pub use edge::{Edge, EdgeId, EdgeKind};
pub use node::{Node, NodeId, NodeKind};
pub use span::{Location, SourceLocation, Span};
