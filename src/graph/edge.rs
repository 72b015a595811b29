//! Labeled, directed edges between nodes, addressed by identity.
//!
//! Edges are non-owning back-references (Design Notes: "avoid ownership-based
//! graphs" — AST/DFG/EOG all contain cycles in general via recursion/loops).

use super::node::NodeId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EdgeKind {
    /// AST containment: parent -> child.
    AstChild,
    /// Evaluation-order graph (EOG): control flow successor.
    EvaluationOrder,
    /// Data-flow graph (DFG): value flows from `from` into `to`.
    DataFlow,
    /// Call-site -> callee.
    Invocation,
    /// Expression/declaration -> its resolved type.
    TypeUsage,
    /// Scope -> the declaration it owns.
    Declaration,
    /// Reference -> the declaration it resolves to.
    Usage,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    pub id: EdgeId,
    pub kind: EdgeKind,
    pub from: NodeId,
    pub to: NodeId,
    /// Arbitrary edge properties (branch condition, argument index, ...).
    pub properties: HashMap<String, serde_json::Value>,
}

impl Edge {
    pub fn new(id: EdgeId, kind: EdgeKind, from: NodeId, to: NodeId) -> Self {
        Self {
            id,
            kind,
            from,
            to,
            properties: HashMap::new(),
        }
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_carries_arbitrary_properties() {
        let edge = Edge::new(EdgeId(0), EdgeKind::Invocation, NodeId(1), NodeId(2))
            .with_property("argument_index", 0);
        assert_eq!(edge.properties["argument_index"], serde_json::json!(0));
    }
}
