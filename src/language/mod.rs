//! Language identification: the `Language` entity, the per-translation
//! `LanguageRegistry` (§4.C), and the `LanguageFrontend` contract (§6).

pub mod frontend;
pub mod language;
pub mod registry;

pub use frontend::{LanguageFrontend, ParseFailure};
pub use language::{BuiltinTypeRegistry, Language, LanguageId};
pub use registry::{register_global_factory, LanguageRegistry};
