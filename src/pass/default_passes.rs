//! The canonical default pass set (§4.D): a type-hierarchy resolver, import
//! resolver, symbol resolver, data-flow graph builder, dynamic-invoke
//! resolver, evaluation-order graph builder, type resolver,
//! control-flow-sensitive data-flow pass, and filename mapper.
//!
//! Pass *content* beyond declared inputs/outputs/dependency metadata is out
//! of scope for this core (§1) — these are illustrative, minimally-behaving
//! implementations that exist so the scheduler and pass runner have a real
//! catalog to operate over and so the canonical ordering from §4.D is
//! exercised end to end.

use super::descriptor::PassDescriptor;
use super::pass_trait::Pass;
use crate::errors::TranslationError;
use crate::trace;
use crate::translation::{TranslationContext, TranslationResult};

macro_rules! declarative_pass {
    ($struct_name:ident, $pass_name:literal, |$d:ident| $build:expr) => {
        pub struct $struct_name;

        impl Pass for $struct_name {
            fn descriptor(&self) -> PassDescriptor {
                let $d = PassDescriptor::new($pass_name);
                $build
            }

            fn accept(
                &self,
                _result: &TranslationResult,
                _context: &TranslationContext,
            ) -> Result<(), TranslationError> {
                trace!(pass = $pass_name, "running default pass");
                Ok(())
            }
        }
    };
}

declarative_pass!(TypeHierarchyResolver, "type_hierarchy_resolver", |d| d);

declarative_pass!(ImportResolver, "import_resolver", |d| d
    .depends_on("type_hierarchy_resolver"));

declarative_pass!(SymbolResolver, "symbol_resolver", |d| d
    .depends_on("import_resolver"));

declarative_pass!(DataFlowGraphPass, "data_flow_graph", |d| d
    .depends_on("symbol_resolver"));

declarative_pass!(DynamicInvokeResolver, "dynamic_invoke_resolver", |d| d
    .depends_on("data_flow_graph"));

declarative_pass!(EvaluationOrderGraphPass, "evaluation_order_graph", |d| d
    .soft_depends_on("symbol_resolver"));

declarative_pass!(TypeResolver, "type_resolver", |d| d
    .depends_on("type_hierarchy_resolver"));

declarative_pass!(
    ControlFlowSensitiveDataFlowPass,
    "control_flow_sensitive_data_flow",
    |d| d
        .depends_on("data_flow_graph")
        .soft_depends_on("evaluation_order_graph")
);

declarative_pass!(FilenameMapperPass, "filename_mapper", |d| d.last());

/// The canonical sequence from §4.D, registered into a fresh catalog.
pub fn register_default_passes(catalog: &mut super::catalog::PassCatalog) {
    use std::sync::Arc;
    catalog.register(Arc::new(TypeHierarchyResolver));
    catalog.register(Arc::new(ImportResolver));
    catalog.register(Arc::new(SymbolResolver));
    catalog.register(Arc::new(DataFlowGraphPass));
    catalog.register(Arc::new(DynamicInvokeResolver));
    catalog.register(Arc::new(EvaluationOrderGraphPass));
    catalog.register(Arc::new(TypeResolver));
    catalog.register(Arc::new(ControlFlowSensitiveDataFlowPass));
    catalog.register(Arc::new(FilenameMapperPass));
}
