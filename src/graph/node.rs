//! The node taxonomy.
//!
//! Closed and well-known (Design Notes: "polymorphic nodes" become a tagged
//! variant, not a class hierarchy); pass/frontend authors match on `NodeKind`
//! rather than downcasting a trait object.

use super::edge::EdgeKind;
use super::span::SourceLocation;
use crate::language::LanguageId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NodeId(pub u64);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The closed kind taxonomy. Every graph element is one of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    TranslationUnit,
    Scope,
    NamespaceDecl,
    FunctionDecl,
    ParamDecl,
    VariableDecl,
    RecordDecl,
    Type,
    Block,
    IfStmt,
    ForStmt,
    WhileStmt,
    ReturnStmt,
    CallExpr,
    BinaryExpr,
    UnaryExpr,
    Literal,
    Reference,
}

impl NodeKind {
    /// Edge labels a node of this kind is permitted to originate.
    pub fn allowed_outgoing(&self) -> &'static [EdgeKind] {
        use EdgeKind::*;
        use NodeKind::*;
        match self {
            TranslationUnit | NamespaceDecl | RecordDecl | Block | Scope => {
                &[AstChild, Declaration]
            }
            FunctionDecl => &[AstChild, Declaration, EvaluationOrder, TypeUsage],
            ParamDecl | VariableDecl => &[Declaration, TypeUsage],
            Type => &[TypeUsage],
            IfStmt | ForStmt | WhileStmt => &[AstChild, EvaluationOrder],
            ReturnStmt => &[AstChild, EvaluationOrder, DataFlow],
            CallExpr => &[AstChild, EvaluationOrder, DataFlow, Invocation, Usage],
            BinaryExpr | UnaryExpr => &[AstChild, EvaluationOrder, DataFlow],
            Literal => &[EvaluationOrder],
            Reference => &[EvaluationOrder, DataFlow, Usage],
        }
    }
}

/// A single graph element. Owned by the `TranslationResult`'s node arena;
/// referenced elsewhere only by `NodeId`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub kind: NodeKind,
    pub name: Option<String>,
    pub location: Option<SourceLocation>,
    pub language: Option<LanguageId>,
    /// Every non-root node has exactly one AST parent (invariant 2).
    pub parent: Option<NodeId>,
}

impl Node {
    pub fn new(id: NodeId, kind: NodeKind) -> Self {
        Self {
            id,
            kind,
            name: None,
            location: None,
            language: None,
            parent: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_location(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }

    pub fn with_language(mut self, language: LanguageId) -> Self {
        self.language = Some(language);
        self
    }

    pub fn with_parent(mut self, parent: NodeId) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_root_node_carries_a_parent() {
        let root = Node::new(NodeId(0), NodeKind::TranslationUnit);
        assert!(root.is_root());

        let child = Node::new(NodeId(1), NodeKind::FunctionDecl).with_parent(root.id);
        assert!(!child.is_root());
        assert_eq!(child.parent, Some(NodeId(0)));
    }

    #[test]
    fn call_expr_may_originate_invocation_edges() {
        assert!(NodeKind::CallExpr
            .allowed_outgoing()
            .contains(&EdgeKind::Invocation));
        assert!(!NodeKind::Literal
            .allowed_outgoing()
            .contains(&EdgeKind::Invocation));
    }
}
