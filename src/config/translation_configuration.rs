//! The immutable `TranslationConfiguration` (§3, §4.D). Constructed only
//! through `TranslationConfigurationBuilder::build()`.

use super::flags::{InferenceConfiguration, TranslationFlags};
use super::validation::Validatable;
use crate::errors::ConfigurationError;
use crate::language::LanguageRegistry;
use crate::pass::{PassCatalog, PassName, Schedule};
use std::collections::HashMap;
use std::path::PathBuf;

pub struct TranslationConfiguration {
    pub symbol_macros: HashMap<String, String>,
    /// Component name -> ordered file list, insertion order preserved.
    pub software_components: Vec<(String, Vec<PathBuf>)>,
    pub top_level_directory: Option<PathBuf>,
    pub include_paths: Vec<PathBuf>,
    pub include_whitelist: Vec<String>,
    pub include_blocklist: Vec<String>,
    pub load_includes: bool,
    pub languages: LanguageRegistry,
    pub schedule: Schedule,
    pub pass_catalog: PassCatalog,
    pub pass_config: HashMap<PassName, serde_json::Value>,
    pub flags: TranslationFlags,
    pub inference: InferenceConfiguration,
}

impl TranslationConfiguration {
    pub fn all_source_files(&self) -> impl Iterator<Item = &PathBuf> {
        self.software_components.iter().flat_map(|(_, files)| files.iter())
    }

    pub fn is_whitelisted(&self, filename: &str) -> bool {
        if self.include_whitelist.is_empty() {
            true
        } else {
            self.include_whitelist.iter().any(|p| filename.contains(p.as_str()))
        }
    }

    pub fn is_blocked(&self, filename: &str) -> bool {
        self.include_blocklist.iter().any(|p| filename.contains(p.as_str()))
    }
}

/// The same two checks `TranslationManager::translate()` runs before
/// starting a translation (§4.H step 1), exposed through the shared
/// `Validatable` trait so every config-shaped component in this crate
/// validates the same way.
impl Validatable for TranslationConfiguration {
    fn validate(&self) -> Result<(), ConfigurationError> {
        if self.software_components.iter().all(|(_, files)| files.is_empty()) {
            return Err(ConfigurationError::EmptySourceList);
        }
        if self.languages.is_empty() {
            return Err(ConfigurationError::NoLanguageRegistered);
        }
        Ok(())
    }

    fn config_name(&self) -> &'static str {
        "TranslationConfiguration"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TranslationConfigurationBuilder;

    #[test]
    fn empty_config_fails_validation() {
        let config = TranslationConfigurationBuilder::new().build().unwrap();
        assert_eq!(config.validate().unwrap_err(), ConfigurationError::EmptySourceList);
    }

    #[test]
    fn config_with_sources_and_a_language_validates() {
        use crate::language::{Language, LanguageFrontend, ParseFailure};
        use std::path::Path;

        struct StubFrontend;
        impl LanguageFrontend for StubFrontend {
            fn parse(
                &self,
                _file: &Path,
                _context: &crate::translation::TranslationContext,
            ) -> Result<crate::graph::NodeId, ParseFailure> {
                Ok(crate::graph::NodeId(0))
            }
        }

        let config = TranslationConfigurationBuilder::new()
            .add_source("main.stub")
            .register_language(Language::new("stub", "Stub", vec![".stub".to_string()], || {
                Box::new(StubFrontend)
            }))
            .build()
            .unwrap();
        assert!(config.validate().is_ok());
    }
}
