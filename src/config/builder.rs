//! The `TranslationConfigurationBuilder` (§4.D).

use super::flags::{InferenceConfiguration, TranslationFlags};
use super::translation_configuration::TranslationConfiguration;
use crate::errors::ConfigurationError;
use crate::language::{Language, LanguageRegistry};
use crate::pass::default_passes::register_default_passes;
use crate::pass::{schedule, Pass, PassCatalog, PassDescriptor, PassName};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

const DEFAULT_COMPONENT: &str = "default";

pub struct TranslationConfigurationBuilder {
    symbol_macros: HashMap<String, String>,
    software_components: Vec<(String, Vec<PathBuf>)>,
    top_level_directory: Option<PathBuf>,
    include_paths: Vec<PathBuf>,
    include_whitelist: Vec<String>,
    include_blocklist: Vec<String>,
    load_includes: bool,
    languages: LanguageRegistry,
    use_default_passes: bool,
    registered_pass_names: Vec<PassName>,
    custom_passes: PassCatalog,
    pass_config: HashMap<PassName, serde_json::Value>,
    flags: TranslationFlags,
    inference: InferenceConfiguration,
}

impl Default for TranslationConfigurationBuilder {
    fn default() -> Self {
        Self {
            symbol_macros: HashMap::new(),
            software_components: Vec::new(),
            top_level_directory: None,
            include_paths: Vec::new(),
            include_whitelist: Vec::new(),
            include_blocklist: Vec::new(),
            load_includes: false,
            languages: LanguageRegistry::new(),
            use_default_passes: false,
            registered_pass_names: Vec::new(),
            custom_passes: PassCatalog::new(),
            pass_config: HashMap::new(),
            flags: TranslationFlags::default(),
            inference: InferenceConfiguration::default(),
        }
    }
}

impl TranslationConfigurationBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_source(mut self, file: impl Into<PathBuf>) -> Self {
        self.add_component_file(DEFAULT_COMPONENT, file);
        self
    }

    pub fn add_component_file(&mut self, component: &str, file: impl Into<PathBuf>) {
        match self.software_components.iter_mut().find(|(name, _)| name == component) {
            Some((_, files)) => files.push(file.into()),
            None => self
                .software_components
                .push((component.to_string(), vec![file.into()])),
        }
    }

    pub fn top_level_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.top_level_directory = Some(dir.into());
        self
    }

    pub fn add_include_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.include_paths.push(path.into());
        self
    }

    pub fn add_include_whitelist(mut self, pattern: impl Into<String>) -> Self {
        self.include_whitelist.push(pattern.into());
        self
    }

    pub fn add_include_blocklist(mut self, pattern: impl Into<String>) -> Self {
        self.include_blocklist.push(pattern.into());
        self
    }

    pub fn load_includes(mut self, enabled: bool) -> Self {
        self.load_includes = enabled;
        self
    }

    pub fn add_symbol_macro(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.symbol_macros.insert(key.into(), value.into());
        self
    }

    pub fn register_language(mut self, language: Language) -> Self {
        self.languages.register(language);
        self
    }

    pub fn register_language_by_name(mut self, name: &str) -> Result<Self, ConfigurationError> {
        self.languages.register_by_name(name)?;
        Ok(self)
    }

    /// Seed the pass set with the canonical default sequence from §4.D.
    /// Required before frontend-declared extra passes are honored (step 1).
    pub fn with_default_passes(mut self) -> Self {
        self.use_default_passes = true;
        self
    }

    pub fn register_pass(mut self, pass: Arc<dyn Pass>) -> Self {
        let name = pass.descriptor().name;
        self.registered_pass_names.push(name);
        self.custom_passes.register(pass);
        self
    }

    pub fn with_pass_config(mut self, pass: impl Into<String>, value: serde_json::Value) -> Self {
        self.pass_config.insert(PassName::new(pass), value);
        self
    }

    pub fn debug_parser(mut self, value: bool) -> Self {
        self.flags.debug_parser = value;
        self
    }

    pub fn fail_on_error(mut self, value: bool) -> Self {
        self.flags.fail_on_error = value;
        self
    }

    pub fn code_in_nodes(mut self, value: bool) -> Self {
        self.flags.code_in_nodes = value;
        self
    }

    pub fn process_annotations(mut self, value: bool) -> Self {
        self.flags.process_annotations = value;
        self
    }

    pub fn use_unity_build(mut self, value: bool) -> Self {
        self.flags.use_unity_build = value;
        self
    }

    pub fn use_parallel_frontends(mut self, value: bool) -> Self {
        self.flags.use_parallel_frontends = value;
        self
    }

    pub fn use_parallel_passes(mut self, value: bool) -> Self {
        self.flags.use_parallel_passes = value;
        self
    }

    pub fn match_comments_to_nodes(mut self, value: bool) -> Self {
        self.flags.match_comments_to_nodes = value;
        self
    }

    pub fn add_includes_to_graph(mut self, value: bool) -> Self {
        self.flags.add_includes_to_graph = value;
        self
    }

    pub fn disable_cleanup(mut self, value: bool) -> Self {
        self.flags.disable_cleanup = value;
        self
    }

    pub fn inference(mut self, inference: InferenceConfiguration) -> Self {
        self.inference = inference;
        self
    }

    pub fn build(self) -> Result<TranslationConfiguration, ConfigurationError> {
        let mut catalog = PassCatalog::new();
        register_default_passes(&mut catalog);
        for name in self.custom_passes.names().cloned().collect::<Vec<_>>() {
            if let Some(pass) = self.custom_passes.get(&name) {
                catalog.register(pass);
            }
        }

        let mut registered_names: Vec<PassName> = if self.use_default_passes {
            DEFAULT_PASS_ORDER.iter().map(|n| PassName::new(*n)).collect()
        } else {
            Vec::new()
        };
        for name in &self.registered_pass_names {
            if !registered_names.contains(name) {
                registered_names.push(name.clone());
            }
        }

        // §4.D step 1: frontend-declared extra passes, gated on defaultPasses.
        if self.use_default_passes {
            for language in self.languages.all() {
                for extra in &language.extra_passes {
                    if !registered_names.contains(extra) {
                        if !catalog.contains(extra) {
                            return Err(ConfigurationError::Other(format!(
                                "language '{}' declares extra pass '{}' with no catalog implementation",
                                language.display_name, extra
                            )));
                        }
                        registered_names.push(extra.clone());
                    }
                }
            }
        }

        // §4.D step 2 / §4.E edge cases: replacement rewrites happen before
        // scheduling so dependencies targeting the replaced pass follow it.
        let replacements: Vec<(PassName, PassName)> = self
            .languages
            .all()
            .iter()
            .flat_map(|l| l.pass_replacements.iter().cloned())
            .collect();

        let mut descriptors: Vec<PassDescriptor> = registered_names
            .iter()
            .map(|name| {
                catalog.get(name).map(|p| p.descriptor()).ok_or_else(|| {
                    ConfigurationError::Other(format!(
                        "pass '{name}' has no registered implementation"
                    ))
                })
            })
            .collect::<Result<_, _>>()?;

        for (original, replacement) in &replacements {
            if let Some(pos) = descriptors.iter().position(|d| &d.name == original) {
                descriptors.remove(pos);
            }
            let replacement_descriptor = catalog.get(replacement).map(|p| p.descriptor()).ok_or_else(|| {
                ConfigurationError::Other(format!(
                    "replacement pass '{replacement}' has no registered implementation"
                ))
            })?;
            if !descriptors.iter().any(|d| &d.name == replacement) {
                descriptors.push(replacement_descriptor);
            }
            for d in descriptors.iter_mut() {
                rewrite_dependency(&mut d.hard_deps, original, replacement);
                rewrite_dependency(&mut d.soft_deps, original, replacement);
                rewrite_dependency(&mut d.execute_before, original, replacement);
            }
        }

        let schedule = schedule(&descriptors, &catalog)?;

        Ok(TranslationConfiguration {
            symbol_macros: self.symbol_macros,
            software_components: self.software_components,
            top_level_directory: self.top_level_directory,
            include_paths: self.include_paths,
            include_whitelist: self.include_whitelist,
            include_blocklist: self.include_blocklist,
            load_includes: self.load_includes,
            languages: self.languages,
            schedule,
            pass_catalog: catalog,
            pass_config: self.pass_config,
            flags: self.flags,
            inference: self.inference,
        })
    }
}

fn rewrite_dependency(deps: &mut [PassName], original: &PassName, replacement: &PassName) {
    for dep in deps.iter_mut() {
        if dep == original {
            *dep = replacement.clone();
        }
    }
}

const DEFAULT_PASS_ORDER: [&str; 9] = [
    "type_hierarchy_resolver",
    "import_resolver",
    "symbol_resolver",
    "data_flow_graph",
    "dynamic_invoke_resolver",
    "evaluation_order_graph",
    "type_resolver",
    "control_flow_sensitive_data_flow",
    "filename_mapper",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_builder_produces_an_empty_schedule() {
        let config = TranslationConfigurationBuilder::new().build().unwrap();
        assert!(config.schedule.is_empty());
    }

    #[test]
    fn default_passes_produce_the_canonical_schedule() {
        let config = TranslationConfigurationBuilder::new()
            .with_default_passes()
            .build()
            .unwrap();
        assert!(!config.schedule.is_empty());
        let flattened: Vec<String> = config
            .schedule
            .iter()
            .flatten()
            .map(|n| n.0.clone())
            .collect();
        assert!(flattened.contains(&"type_hierarchy_resolver".to_string()));
        assert!(flattened.contains(&"filename_mapper".to_string()));
        // filename_mapper is marked executeLast.
        assert_eq!(
            config.schedule.last().unwrap(),
            &vec![PassName::new("filename_mapper")]
        );
    }

    #[test]
    fn add_source_accumulates_into_the_default_component() {
        let config = TranslationConfigurationBuilder::new()
            .add_source("a.rs")
            .add_source("b.rs")
            .build()
            .unwrap();
        assert_eq!(config.software_components.len(), 1);
        assert_eq!(config.software_components[0].1.len(), 2);
    }
}
