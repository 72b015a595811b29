//! The Frontend contract (§6): each frontend is a black box exposing
//! `parse(file, context) -> TranslationUnit node`.

use crate::graph::NodeId;
use crate::translation::TranslationContext;
use std::path::{Path, PathBuf};

/// A parser error for one file. Whether this aborts the whole translation
/// or is merely recorded is the Frontend Runner's call (`failOnError`, §4.F).
#[derive(Debug, Clone)]
pub struct ParseFailure {
    pub file: PathBuf,
    pub reason: String,
}

impl ParseFailure {
    pub fn new(file: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            reason: reason.into(),
        }
    }
}

/// A language-specific parser. Frontends are black boxes beyond this
/// contract (§1) — this crate only depends on the shape, not the content,
/// of any particular language's parsing logic.
pub trait LanguageFrontend: Send + Sync {
    /// Parse one file, appending its subgraph into the shared
    /// `TranslationContext`, and return the root `TranslationUnit` node id.
    fn parse(&self, file: &Path, context: &TranslationContext) -> Result<NodeId, ParseFailure>;

    /// Parse a group of files that share translation-unit state under a
    /// unity build (§4.F step 1) — e.g. a `.c` file and the headers it pulls
    /// in — appending one merged subgraph and returning its root
    /// `TranslationUnit` node id. Only called when both `useUnityBuild` is
    /// set and `Language::supports_unity_build` is true for the group's
    /// language; frontends that have no notion of a unity build can rely on
    /// the default, which degrades to parsing the first file alone.
    fn parse_unity(
        &self,
        files: &[PathBuf],
        context: &TranslationContext,
    ) -> Result<NodeId, ParseFailure> {
        let first = files
            .first()
            .expect("unity build groups are never constructed empty");
        self.parse(first, context)
    }

    /// Invoked once at translation end, regardless of outcome.
    fn cleanup(&self) {}
}
