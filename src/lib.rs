//! A language-agnostic Code Property Graph orchestration core: register
//! languages and enrichment passes, schedule them against a dependency
//! graph, and drive the combined frontend/pass pipeline over a set of
//! source files to produce a merged graph plus diagnostics.
//!
//! This crate owns the orchestration: node/edge identity, scope and type
//! resolution, language and pass registries, scheduling, and the
//! frontend/pass runners. Concrete per-language parsers and concrete
//! analysis passes are black boxes this crate calls through, not code it
//! ships.

#[macro_use]
pub mod shared;

// The no-op logging macros are placed at the crate root automatically by
// `#[macro_export]`; the `trace` feature swaps them for real `tracing`
// macros, which need forwarding here since `pub use` re-exports aren't
// hoisted the way `#[macro_export]` macros are.
#[cfg(feature = "trace")]
pub use shared::macros::{debug, error, info, trace, warn};

pub mod config;
pub mod errors;
pub mod graph;
pub mod language;
pub mod pass;
pub mod scope;
pub mod translation;

pub use config::{TranslationConfiguration, TranslationConfigurationBuilder};
pub use errors::{ConfigurationError, ResolutionError, TranslationError};
pub use graph::{Edge, EdgeId, EdgeKind, Node, NodeId, NodeKind};
pub use language::{Language, LanguageFrontend, LanguageId, LanguageRegistry};
pub use pass::{Pass, PassCatalog, PassDescriptor, PassName};
pub use translation::{TranslationContext, TranslationManager, TranslationResult};
