//! The `Pass` contract (§6).

use super::descriptor::PassDescriptor;
use crate::errors::TranslationError;
use crate::translation::{TranslationContext, TranslationResult};

/// A graph-enrichment step. Implementors may read and write the graph but
/// must not assume any later pass in the schedule has already run (§4.G).
pub trait Pass: Send + Sync {
    /// Declarative ordering/parallelism metadata for this pass.
    fn descriptor(&self) -> PassDescriptor;

    /// Mutate the graph. `TranslationResult` synchronizes its own mutable
    /// state internally (§5), so a shared reference is enough even when
    /// several passes in the same group run concurrently. Errors here are
    /// treated as `ResolutionError`s by the pass runner unless the pass
    /// chooses to signal a fatal `TranslationError::Internal` for a genuine
    /// invariant violation.
    fn accept(
        &self,
        result: &TranslationResult,
        context: &TranslationContext,
    ) -> Result<(), TranslationError>;
}
