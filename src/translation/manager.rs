//! The Translation Manager: the public entry point, its state machine, and
//! the builder that wires a `TranslationConfiguration` to it.

use crate::config::{TranslationConfiguration, Validatable};
use crate::errors::{ConfigurationError, TranslationError};
use crate::pass::runner as pass_runner;
use crate::scope::{ScopeManager, TypeManager};
use crate::shared::CancellationToken;
use crate::trace;
use crate::translation::{frontend_runner, TranslationContext, TranslationResult};
use std::sync::Arc;

/// `Idle -> Parsing -> Passing -> Finalizing -> Done|Failed|Cancelled`.
/// Transitions are monotonic; a `Failed` or `Cancelled` translation cannot
/// be resumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslationState {
    Idle,
    Parsing,
    Passing,
    Finalizing,
    Done,
    Failed,
    Cancelled,
}

pub struct TranslationManager {
    config: Arc<TranslationConfiguration>,
    cancellation: CancellationToken,
    state: TranslationState,
}

impl TranslationManager {
    pub fn builder() -> TranslationManagerBuilder {
        TranslationManagerBuilder::default()
    }

    pub fn state(&self) -> TranslationState {
        self.state
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancellation.clone()
    }

    /// Run the translation to completion. Consumes `self` because a
    /// finished manager (`Done`, `Failed`, or `Cancelled`) cannot be
    /// resumed.
    pub fn translate(mut self) -> Result<TranslationResult, TranslationError> {
        if let Err(err) = self.validate() {
            self.state = TranslationState::Failed;
            return Err(err.into());
        }

        let result = TranslationResult::new();
        let scope_manager = Arc::new(ScopeManager::new());
        let type_manager = Arc::new(TypeManager::new());
        let context = TranslationContext::new(self.config.clone(), scope_manager, type_manager);

        self.state = TranslationState::Parsing;
        trace!(state = ?self.state, "entering parsing phase");
        if let Err(err) = frontend_runner::run(&context, &result, &self.cancellation) {
            self.state = if err.is_cancelled() {
                TranslationState::Cancelled
            } else {
                TranslationState::Failed
            };
            return Err(err);
        }

        self.state = TranslationState::Passing;
        trace!(state = ?self.state, "entering passing phase");
        if let Err(err) = pass_runner::run(
            &self.config.schedule,
            &self.config.pass_catalog,
            &result,
            &context,
            &self.cancellation,
        ) {
            self.state = if err.is_cancelled() {
                TranslationState::Cancelled
            } else {
                TranslationState::Failed
            };
            return Err(err);
        }

        self.state = TranslationState::Finalizing;
        trace!(state = ?self.state, "finalizing translation");
        // `disableCleanup` keeps the scope/type managers reachable off the
        // result after this call returns, instead of letting them drop
        // with the context.
        if self.config.flags.disable_cleanup {
            result.retain_managers(context.scope_manager_arc(), context.type_manager_arc());
        }
        drop(context);

        self.state = TranslationState::Done;
        Ok(result)
    }

    fn validate(&self) -> Result<(), ConfigurationError> {
        self.config.validate()
    }
}

#[derive(Default)]
pub struct TranslationManagerBuilder {
    config: Option<Arc<TranslationConfiguration>>,
}

impl TranslationManagerBuilder {
    pub fn config(mut self, config: TranslationConfiguration) -> Self {
        self.config = Some(Arc::new(config));
        self
    }

    pub fn build(self) -> TranslationManager {
        TranslationManager {
            config: self.config.expect("TranslationManager requires a configuration"),
            cancellation: CancellationToken::new(),
            state: TranslationState::Idle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TranslationConfigurationBuilder;

    #[test]
    fn empty_source_list_fails_validation() {
        let config = TranslationConfigurationBuilder::new().build().unwrap();
        let manager = TranslationManager::builder().config(config).build();
        let err = manager.translate().unwrap_err();
        assert!(matches!(
            err,
            TranslationError::Configuration(ConfigurationError::EmptySourceList)
        ));
    }

    #[test]
    fn no_language_registered_fails_validation() {
        let config = TranslationConfigurationBuilder::new()
            .add_source("main.rs")
            .build()
            .unwrap();
        let manager = TranslationManager::builder().config(config).build();
        let err = manager.translate().unwrap_err();
        assert!(matches!(
            err,
            TranslationError::Configuration(ConfigurationError::NoLanguageRegistered)
        ));
    }

    #[test]
    fn cancelling_before_translate_stops_at_parsing() {
        use crate::language::{Language, LanguageFrontend, ParseFailure};
        use std::path::Path;

        struct StubFrontend;
        impl LanguageFrontend for StubFrontend {
            fn parse(
                &self,
                _file: &Path,
                _context: &TranslationContext,
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
        let manager = TranslationManager::builder().config(config).build();
        manager.cancellation_token().cancel();
        let err = manager.translate().unwrap_err();
        assert!(err.is_cancelled());
    }

    #[test]
    fn disable_cleanup_retains_the_scope_and_type_managers_on_the_result() {
        use crate::language::{Language, LanguageFrontend, ParseFailure};
        use std::path::Path;

        struct StubFrontend;
        impl LanguageFrontend for StubFrontend {
            fn parse(
                &self,
                _file: &Path,
                context: &TranslationContext,
            ) -> Result<crate::graph::NodeId, ParseFailure> {
                let scope = crate::graph::NodeId(0);
                context.scopes().enter_scope(scope);
                Ok(scope)
            }
        }

        let config = TranslationConfigurationBuilder::new()
            .add_source("main.stub")
            .register_language(Language::new("stub", "Stub", vec![".stub".to_string()], || {
                Box::new(StubFrontend)
            }))
            .disable_cleanup(true)
            .build()
            .unwrap();
        let manager = TranslationManager::builder().config(config).build();
        let result = manager.translate().unwrap();
        assert!(result.retained_scope_manager().is_some());
        assert!(result.retained_type_manager().is_some());
    }

    #[test]
    fn without_disable_cleanup_the_result_retains_nothing() {
        use crate::language::{Language, LanguageFrontend, ParseFailure};
        use std::path::Path;

        struct StubFrontend;
        impl LanguageFrontend for StubFrontend {
            fn parse(
                &self,
                _file: &Path,
                _context: &TranslationContext,
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
        let manager = TranslationManager::builder().config(config).build();
        let result = manager.translate().unwrap();
        assert!(result.retained_scope_manager().is_none());
        assert!(result.retained_type_manager().is_none());
    }
}
