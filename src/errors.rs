//! Error taxonomy for the translation core (§7).
//!
//! `TranslationError` carries only the kinds that are fatal to a `translate()`
//! call. Non-fatal occurrences (tolerated parse failures, resolution misses)
//! are recorded as `Diagnostic`s on the `TranslationResult` instead — see
//! `crate::translation::Diagnostic`.

use crate::graph::SourceLocation;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TranslationError {
    /// Invalid builder state, unresolved pass ordering, too many first/last
    /// passes, a language class that cannot be instantiated. Raised from
    /// `build()`; always fatal.
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// A frontend could not process a file, and `failOnError` is set.
    #[error("parse error in {file}: {reason}")]
    Parse { file: String, reason: String },

    /// An invariant was violated (e.g. a scope-leave mismatch). Always fatal.
    #[error("internal error in {component}: {message}")]
    Internal { component: String, message: String },

    /// The translation was cancelled via its `CancellationToken`. Terminal,
    /// but not treated as a failure by callers that requested cancellation.
    #[error("translation cancelled")]
    Cancelled,
}

impl TranslationError {
    pub fn parse(file: impl Into<String>, reason: impl Into<String>) -> Self {
        TranslationError::Parse {
            file: file.into(),
            reason: reason.into(),
        }
    }

    pub fn internal(component: impl Into<String>, message: impl Into<String>) -> Self {
        TranslationError::Internal {
            component: component.into(),
            message: message.into(),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, TranslationError::Cancelled)
    }
}

/// Errors raised while building a `TranslationConfiguration`, resolving the
/// language registry, or scheduling passes.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("failed to satisfy ordering requirements among passes: {0:?}")]
    UnresolvableOrdering(Vec<String>),

    #[error("too many first passes: {0:?}")]
    TooManyFirstPasses(Vec<String>),

    #[error("too many last passes: {0:?}")]
    TooManyLastPasses(Vec<String>),

    #[error("pass '{0}' depends on itself")]
    SelfDependency(String),

    #[error("hard dependency '{dependency}' of pass '{pass}' is not in the pass catalog")]
    UnknownHardDependency { pass: String, dependency: String },

    #[error("language class '{0}' could not be instantiated")]
    LanguageNotInstantiable(String),

    #[error("no language is registered")]
    NoLanguageRegistered,

    #[error("no source files were provided")]
    EmptySourceList,

    #[error("{0}")]
    Other(String),
}

/// Non-fatal severity for a `Diagnostic`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// A resolution failure: symbol or type resolution could not complete.
/// Recorded, never fatal — passes must tolerate partial graphs (§4.B, §7).
#[derive(Debug, Clone, Error, serde::Serialize, serde::Deserialize)]
#[error("resolution error in {component}: {message}")]
pub struct ResolutionError {
    pub component: String,
    pub message: String,
    pub location: Option<SourceLocation>,
}

impl ResolutionError {
    pub fn new(component: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            message: message.into(),
            location: None,
        }
    }

    pub fn with_location(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }
}
