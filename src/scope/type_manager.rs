//! The Type Manager half of §4.B: a translation-scoped, internally
//! synchronized type-interning table. `registerType` is linearizable (§5).

use crate::graph::NodeId;
use dashmap::DashMap;

#[derive(Default)]
pub struct TypeManager {
    by_structural_key: DashMap<String, NodeId>,
}

impl TypeManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// De-duplicate `candidate` (a freshly-built `Type` node) by its
    /// structural key, returning the canonical node for that key: either the
    /// already-interned node, or `candidate` itself if this is the first
    /// sighting.
    pub fn register_type(&self, structural_key: impl Into<String>, candidate: NodeId) -> NodeId {
        *self
            .by_structural_key
            .entry(structural_key.into())
            .or_insert(candidate)
    }

    pub fn lookup(&self, structural_key: &str) -> Option<NodeId> {
        self.by_structural_key.get(structural_key).map(|n| *n)
    }

    pub fn len(&self) -> usize {
        self.by_structural_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_structural_key.is_empty()
    }
}
