//! The `Language` entity (§3): display name, extension set, frontend
//! factory, namespace separator, built-in type registry, and the
//! frontend-declared extra passes/replacements that
//! `TranslationConfigurationBuilder::build()` folds into the pass set
//! (§4.D steps 1-2).

use super::frontend::LanguageFrontend;
use crate::pass::PassName;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LanguageId(pub String);

impl LanguageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for LanguageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The set of type names a language considers built in (`int`, `bool`,
/// `string`, ...): names that never carry a declaration node of their own
/// and so must be pre-seeded into the shared `TypeManager` rather than
/// discovered by the type resolver. The Frontend Runner registers these
/// once per language, before that language's files are parsed (§3, §4.B).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuiltinTypeRegistry {
    names: Vec<String>,
}

impl BuiltinTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_type(mut self, name: impl Into<String>) -> Self {
        self.names.push(name.into());
        self
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

type FrontendFactory = Arc<dyn Fn() -> Box<dyn LanguageFrontend> + Send + Sync>;

#[derive(Clone)]
pub struct Language {
    pub id: LanguageId,
    pub display_name: String,
    pub extensions: Vec<String>,
    pub namespace_separator: String,
    /// Built-in types this language's type resolver should never have to
    /// infer (§3 "built-in type registry").
    pub built_in_types: BuiltinTypeRegistry,
    /// Per-language capability flag (§2, component C): whether the
    /// Frontend Runner may merge this language's files sharing a directory
    /// into one unity-build translation unit when `useUnityBuild` is set
    /// (§4.F step 1). Meaningful for C/C++-shaped languages only.
    pub supports_unity_build: bool,
    /// Extra passes this language's frontend wants registered, applied only
    /// when the builder was seeded with `defaultPasses` (§4.D step 1).
    pub extra_passes: Vec<PassName>,
    /// `(original, replacement)` pairs: for files of this language, schedule
    /// `replacement` wherever `original` would otherwise run (§4.D step 2).
    pub pass_replacements: Vec<(PassName, PassName)>,
    frontend_factory: FrontendFactory,
}

impl Language {
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        extensions: Vec<String>,
        frontend_factory: impl Fn() -> Box<dyn LanguageFrontend> + Send + Sync + 'static,
    ) -> Self {
        Self {
            id: LanguageId::new(id),
            display_name: display_name.into(),
            extensions,
            namespace_separator: "::".to_string(),
            built_in_types: BuiltinTypeRegistry::new(),
            supports_unity_build: false,
            extra_passes: Vec::new(),
            pass_replacements: Vec::new(),
            frontend_factory: Arc::new(frontend_factory),
        }
    }

    pub fn with_namespace_separator(mut self, separator: impl Into<String>) -> Self {
        self.namespace_separator = separator.into();
        self
    }

    pub fn with_builtin_type(mut self, name: impl Into<String>) -> Self {
        self.built_in_types = std::mem::take(&mut self.built_in_types).with_type(name);
        self
    }

    pub fn with_unity_build_support(mut self, supported: bool) -> Self {
        self.supports_unity_build = supported;
        self
    }

    pub fn with_extra_pass(mut self, name: impl Into<String>) -> Self {
        self.extra_passes.push(PassName::new(name));
        self
    }

    pub fn with_pass_replacement(
        mut self,
        original: impl Into<String>,
        replacement: impl Into<String>,
    ) -> Self {
        self.pass_replacements
            .push((PassName::new(original), PassName::new(replacement)));
        self
    }

    pub fn create_frontend(&self) -> Box<dyn LanguageFrontend> {
        (self.frontend_factory)()
    }

    pub fn matches_extension(&self, filename: &str) -> Option<usize> {
        self.extensions
            .iter()
            .filter(|ext| filename.ends_with(ext.as_str()))
            .map(|ext| ext.len())
            .max()
    }
}

impl std::fmt::Debug for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Language")
            .field("id", &self.id)
            .field("display_name", &self.display_name)
            .field("extensions", &self.extensions)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::frontend::ParseFailure;
    use crate::graph::NodeId;
    use crate::translation::TranslationContext;
    use std::path::Path;

    struct StubFrontend;
    impl LanguageFrontend for StubFrontend {
        fn parse(&self, _file: &Path, _context: &TranslationContext) -> Result<NodeId, ParseFailure> {
            Ok(NodeId(0))
        }
    }

    #[test]
    fn matches_extension_returns_the_matched_length() {
        let lang = Language::new("rust", "Rust", vec![".rs".to_string()], || {
            Box::new(StubFrontend)
        });
        assert_eq!(lang.matches_extension("main.rs"), Some(3));
        assert_eq!(lang.matches_extension("main.py"), None);
    }

    #[test]
    fn longest_extension_wins_within_one_language() {
        let lang = Language::new(
            "typescript",
            "TypeScript",
            vec![".ts".to_string(), ".d.ts".to_string()],
            || Box::new(StubFrontend),
        );
        assert_eq!(lang.matches_extension("types.d.ts"), Some(5));
    }
}
