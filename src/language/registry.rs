//! The Language Registry (§4.C).

use super::language::{Language, LanguageId};
use crate::errors::ConfigurationError;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Per-translation registry of languages, in registration order.
///
/// Extension conflicts resolve to the longest-matching extension; ties
/// resolve to the later-registered language (Open Question (a), resolved in
/// DESIGN.md: `registerLanguage`'s own doc already states "later-registered
/// languages take precedence").
#[derive(Default, Clone)]
pub struct LanguageRegistry {
    languages: Vec<Language>,
}

impl LanguageRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, language: Language) {
        self.languages.push(language);
    }

    /// Register a language by its fully-qualified name, looked up in the
    /// global factory registry (the string-keyed replacement for the
    /// original's reflective class instantiation).
    pub fn register_by_name(&mut self, name: &str) -> Result<(), ConfigurationError> {
        let language = lookup_global_factory(name)
            .ok_or_else(|| ConfigurationError::LanguageNotInstantiable(name.to_string()))?;
        self.register(language);
        Ok(())
    }

    /// As `register_by_name`, but swallows lookup failures instead of
    /// raising a `ConfigurationError` ("optional" loading, §4.C).
    pub fn register_by_name_optional(&mut self, name: &str) -> bool {
        match lookup_global_factory(name) {
            Some(language) => {
                self.register(language);
                true
            }
            None => false,
        }
    }

    pub fn unregister(&mut self, id: &LanguageId) {
        self.languages.retain(|l| &l.id != id);
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.languages.len()
    }

    pub fn all(&self) -> &[Language] {
        &self.languages
    }

    /// Select the frontend-providing language for `filename`: longest
    /// matching extension, later registration breaking ties.
    pub fn resolve(&self, filename: &str) -> Option<&Language> {
        let mut best: Option<(&Language, usize)> = None;
        for language in &self.languages {
            if let Some(len) = language.matches_extension(filename) {
                match best {
                    Some((_, best_len)) if len < best_len => {}
                    _ => best = Some((language, len)),
                }
            }
        }
        best.map(|(language, _)| language)
    }
}

type GlobalFactory = Arc<dyn Fn() -> Language + Send + Sync>;

static GLOBAL_FACTORIES: Lazy<RwLock<HashMap<String, GlobalFactory>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

/// Register a language factory under `name`, available to any
/// `LanguageRegistry::register_by_name` call in this process.
pub fn register_global_factory(name: impl Into<String>, factory: impl Fn() -> Language + Send + Sync + 'static) {
    GLOBAL_FACTORIES
        .write()
        .insert(name.into(), Arc::new(factory));
}

fn lookup_global_factory(name: &str) -> Option<Language> {
    GLOBAL_FACTORIES.read().get(name).map(|factory| factory())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::frontend::{LanguageFrontend, ParseFailure};
    use crate::graph::NodeId;
    use crate::translation::TranslationContext;
    use std::path::Path;

    struct StubFrontend;
    impl LanguageFrontend for StubFrontend {
        fn parse(&self, _file: &Path, _context: &TranslationContext) -> Result<NodeId, ParseFailure> {
            Ok(NodeId(0))
        }
    }

    fn lang(id: &str, ext: &str) -> Language {
        Language::new(id, id, vec![ext.to_string()], || Box::new(StubFrontend))
    }

    #[test]
    fn resolve_picks_longest_matching_extension() {
        let mut registry = LanguageRegistry::new();
        registry.register(lang("typescript", ".ts"));
        registry.register(lang("typescript-decl", ".d.ts"));
        let resolved = registry.resolve("widget.d.ts").unwrap();
        assert_eq!(resolved.id, LanguageId::new("typescript-decl"));
    }

    #[test]
    fn resolve_breaks_extension_ties_with_later_registration() {
        let mut registry = LanguageRegistry::new();
        registry.register(lang("first", ".ext"));
        registry.register(lang("second", ".ext"));
        let resolved = registry.resolve("file.ext").unwrap();
        assert_eq!(resolved.id, LanguageId::new("second"));
    }

    #[test]
    fn unregister_removes_all_instances_of_the_language() {
        let mut registry = LanguageRegistry::new();
        registry.register(lang("rust", ".rs"));
        registry.unregister(&LanguageId::new("rust"));
        assert!(registry.is_empty());
    }

    #[test]
    fn unmatched_file_resolves_to_none() {
        let registry = LanguageRegistry::new();
        assert!(registry.resolve("main.rs").is_none());
    }

    #[test]
    fn register_by_name_uses_the_global_factory() {
        register_global_factory("test_lang_a", || lang("test_lang_a", ".tla"));
        let mut registry = LanguageRegistry::new();
        registry.register_by_name("test_lang_a").unwrap();
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn register_by_name_fails_for_unknown_name() {
        let mut registry = LanguageRegistry::new();
        let err = registry.register_by_name("does_not_exist_anywhere").unwrap_err();
        assert!(matches!(err, ConfigurationError::LanguageNotInstantiable(_)));
    }

    #[test]
    fn register_by_name_optional_swallows_failures() {
        let mut registry = LanguageRegistry::new();
        assert!(!registry.register_by_name_optional("does_not_exist_anywhere"));
        assert!(registry.is_empty());
    }
}
