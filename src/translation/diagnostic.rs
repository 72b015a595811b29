//! Diagnostics accumulated on a `TranslationResult`: non-fatal parse
//! and resolution failures, carried alongside the graph rather than raised.

use crate::errors::{ResolutionError, Severity};
use crate::graph::SourceLocation;

#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub severity: Severity,
    pub component: String,
    pub message: String,
    pub location: Option<SourceLocation>,
}

impl Diagnostic {
    pub fn new(severity: Severity, component: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
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

impl From<ResolutionError> for Diagnostic {
    fn from(err: ResolutionError) -> Self {
        Diagnostic {
            severity: Severity::Warning,
            component: err.component,
            message: err.message,
            location: err.location,
        }
    }
}
