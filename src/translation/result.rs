//! `TranslationResult`: the graph handle passed by shared reference to
//! every frontend and pass. Internally synchronized so concurrent frontends
//! and parallel pass groups never need external locking.

use crate::errors::ResolutionError;
use crate::graph::{Edge, EdgeId, Node, NodeId};
use crate::scope::{ScopeManager, TypeManager};
use crate::shared::IdAllocator;
use crate::translation::Diagnostic;
use dashmap::DashMap;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

pub struct TranslationResult {
    id_allocator: IdAllocator,
    nodes: DashMap<NodeId, Node>,
    edges: DashMap<EdgeId, Edge>,
    edge_ids: IdAllocator,
    translation_units: RwLock<Vec<NodeId>>,
    diagnostics: RwLock<Vec<Diagnostic>>,
    /// Set once the Frontend Runner phase completes, freezing the node set
    /// for addition. `add_node` still succeeds afterward —
    /// inference is allowed to append under a single writer per pass — but
    /// the flag lets a caller assert the phase boundary was respected.
    nodes_frozen: AtomicBool,
    /// Populated by the Translation Manager only when `disableCleanup` is
    /// set (§4.B/§4.H): lets a caller keep querying scope/type state after
    /// `translate()` returns instead of it dropping with the context.
    retained_scope_manager: RwLock<Option<Arc<ScopeManager>>>,
    retained_type_manager: RwLock<Option<Arc<TypeManager>>>,
}

impl Default for TranslationResult {
    fn default() -> Self {
        Self::new()
    }
}

impl TranslationResult {
    pub fn new() -> Self {
        Self {
            id_allocator: IdAllocator::new(),
            nodes: DashMap::new(),
            edges: DashMap::new(),
            edge_ids: IdAllocator::new(),
            translation_units: RwLock::new(Vec::new()),
            diagnostics: RwLock::new(Vec::new()),
            nodes_frozen: AtomicBool::new(false),
            retained_scope_manager: RwLock::new(None),
            retained_type_manager: RwLock::new(None),
        }
    }

    pub fn allocate_node_id(&self) -> NodeId {
        NodeId(self.id_allocator.next_id())
    }

    pub fn allocate_edge_id(&self) -> EdgeId {
        EdgeId(self.edge_ids.next_id())
    }

    pub fn add_node(&self, node: Node) -> NodeId {
        let id = node.id;
        self.nodes.insert(id, node);
        id
    }

    pub fn add_edge(&self, edge: Edge) -> EdgeId {
        let id = edge.id;
        self.edges.insert(id, edge);
        id
    }

    pub fn node(&self, id: NodeId) -> Option<Node> {
        self.nodes.get(&id).map(|n| n.clone())
    }

    pub fn edge(&self, id: EdgeId) -> Option<Edge> {
        self.edges.get(&id).map(|e| e.clone())
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Record one translation unit's root. Called by the Frontend Runner as
    /// each file finishes parsing; the final order is fixed separately by
    /// `set_translation_unit_order` once every file has joined, restoring a
    /// deterministic order derived from the input file list rather than
    /// completion order.
    pub fn add_translation_unit(&self, root: NodeId) {
        self.translation_units.write().push(root);
    }

    pub fn set_translation_unit_order(&self, ordered: Vec<NodeId>) {
        *self.translation_units.write() = ordered;
    }

    pub fn translation_units(&self) -> Vec<NodeId> {
        self.translation_units.read().clone()
    }

    pub fn freeze_nodes(&self) {
        self.nodes_frozen.store(true, Ordering::SeqCst);
    }

    pub fn nodes_are_frozen(&self) -> bool {
        self.nodes_frozen.load(Ordering::SeqCst)
    }

    pub fn add_diagnostic(&self, diagnostic: Diagnostic) {
        self.diagnostics.write().push(diagnostic);
    }

    pub fn add_diagnostic_from_resolution(&self, error: ResolutionError) {
        self.add_diagnostic(error.into());
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.read().clone()
    }

    /// Called by the Translation Manager when `disableCleanup` is set,
    /// instead of letting the translation-scoped services drop with the
    /// context.
    pub fn retain_managers(&self, scope_manager: Arc<ScopeManager>, type_manager: Arc<TypeManager>) {
        *self.retained_scope_manager.write() = Some(scope_manager);
        *self.retained_type_manager.write() = Some(type_manager);
    }

    /// `Some` only when the translation that produced this result ran with
    /// `disableCleanup` set.
    pub fn retained_scope_manager(&self) -> Option<Arc<ScopeManager>> {
        self.retained_scope_manager.read().clone()
    }

    pub fn retained_type_manager(&self) -> Option<Arc<TypeManager>> {
        self.retained_type_manager.read().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::NodeKind;

    #[test]
    fn node_ids_allocate_monotonically() {
        let result = TranslationResult::new();
        let a = result.allocate_node_id();
        let b = result.allocate_node_id();
        assert!(b.0 > a.0);
    }

    #[test]
    fn added_nodes_are_retrievable_by_id() {
        let result = TranslationResult::new();
        let id = result.allocate_node_id();
        result.add_node(Node::new(id, NodeKind::TranslationUnit));
        assert_eq!(result.node_count(), 1);
        assert!(result.node(id).is_some());
    }

    #[test]
    fn translation_unit_order_is_fixed_independently_of_insertion() {
        let result = TranslationResult::new();
        result.add_translation_unit(NodeId(2));
        result.add_translation_unit(NodeId(1));
        assert_eq!(result.translation_units(), vec![NodeId(2), NodeId(1)]);
        result.set_translation_unit_order(vec![NodeId(1), NodeId(2)]);
        assert_eq!(result.translation_units(), vec![NodeId(1), NodeId(2)]);
    }

    #[test]
    fn diagnostics_accumulate_from_resolution_errors() {
        let result = TranslationResult::new();
        result.add_diagnostic_from_resolution(ResolutionError::new("x", "y"));
        assert_eq!(result.diagnostics().len(), 1);
    }
}
