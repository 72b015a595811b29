//! The boolean flag set from §3 / §4.D.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranslationFlags {
    pub debug_parser: bool,
    pub fail_on_error: bool,
    pub code_in_nodes: bool,
    pub process_annotations: bool,
    pub use_unity_build: bool,
    pub use_parallel_frontends: bool,
    pub use_parallel_passes: bool,
    pub match_comments_to_nodes: bool,
    pub add_includes_to_graph: bool,
    pub disable_cleanup: bool,
}

impl Default for TranslationFlags {
    fn default() -> Self {
        Self {
            debug_parser: false,
            fail_on_error: false,
            code_in_nodes: false,
            process_annotations: false,
            use_unity_build: false,
            use_parallel_frontends: false,
            use_parallel_passes: false,
            match_comments_to_nodes: false,
            add_includes_to_graph: false,
            disable_cleanup: false,
        }
    }
}

/// Inference of missing declarations/types when resolution fails and the
/// caller has opted in (§4.B, "unknown types trigger inference when
/// enabled").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InferenceConfiguration {
    pub enabled: bool,
    pub infer_function_declarations: bool,
    pub infer_variable_types: bool,
    pub infer_record_declarations: bool,
}

impl Default for InferenceConfiguration {
    fn default() -> Self {
        Self {
            enabled: false,
            infer_function_declarations: false,
            infer_variable_types: false,
            infer_record_declarations: false,
        }
    }
}
