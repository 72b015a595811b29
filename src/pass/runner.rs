//! The Pass Runner (§4.G): executes a `Schedule` group by group.

use super::catalog::PassCatalog;
use super::scheduler::Schedule;
use crate::errors::{ResolutionError, TranslationError};
use crate::shared::CancellationToken;
use crate::trace;
use crate::translation::{TranslationContext, TranslationResult};
use rayon::prelude::*;

/// Run every group of `schedule` in order. Within a group, passes dispatch
/// concurrently when `useParallelPasses` is set and every pass in the group
/// is individually marked `parallel_safe`; otherwise the group runs
/// serially. The cancellation token is checked between groups and, for
/// serial groups, between passes.
pub fn run(
    schedule: &Schedule,
    catalog: &PassCatalog,
    result: &TranslationResult,
    context: &TranslationContext,
    cancellation: &CancellationToken,
) -> Result<(), TranslationError> {
    for group in schedule {
        if cancellation.is_cancelled() {
            return Err(TranslationError::Cancelled);
        }

        let passes: Vec<_> = group
            .iter()
            .map(|name| {
                catalog.get(name).ok_or_else(|| {
                    TranslationError::internal(
                        "pass_runner",
                        format!("scheduled pass '{name}' missing from catalog"),
                    )
                })
            })
            .collect::<Result<_, _>>()?;

        let all_parallel_safe = passes.iter().all(|p| p.descriptor().parallel_safe);
        let run_in_parallel =
            context.config().flags.use_parallel_passes && passes.len() > 1 && all_parallel_safe;

        if run_in_parallel {
            trace!(group_size = passes.len(), "running pass group in parallel");
            let outcomes: Vec<Result<(), TranslationError>> = context.worker_pool().install(|| {
                passes
                    .par_iter()
                    .map(|pass| pass.accept(result, context))
                    .collect()
            });
            for outcome in outcomes {
                record_or_propagate(outcome, result)?;
            }
        } else {
            for pass in &passes {
                if cancellation.is_cancelled() {
                    return Err(TranslationError::Cancelled);
                }
                trace!(pass = %pass.descriptor().name, "running pass");
                record_or_propagate(pass.accept(result, context), result)?;
            }
        }
    }

    Ok(())
}

/// Internal invariant violations (`Internal`/`Cancelled`/`Configuration`)
/// always surface; everything else is recorded as a non-fatal
/// `ResolutionError` diagnostic (§7).
fn record_or_propagate(
    outcome: Result<(), TranslationError>,
    result: &TranslationResult,
) -> Result<(), TranslationError> {
    match outcome {
        Ok(()) => Ok(()),
        Err(err @ TranslationError::Internal { .. }) => Err(err),
        Err(err @ TranslationError::Cancelled) => Err(err),
        Err(err @ TranslationError::Configuration(_)) => Err(err),
        Err(err) => {
            result.add_diagnostic_from_resolution(ResolutionError::new("pass_runner", err.to_string()));
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TranslationConfigurationBuilder;
    use crate::pass::descriptor::PassName;
    use crate::pass::pass_trait::Pass;
    use crate::scope::{ScopeManager, TypeManager};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingPass {
        name: &'static str,
        parallel_safe: bool,
        counter: Arc<AtomicUsize>,
    }

    impl Pass for CountingPass {
        fn descriptor(&self) -> crate::pass::descriptor::PassDescriptor {
            let mut d = crate::pass::descriptor::PassDescriptor::new(self.name);
            d.parallel_safe = self.parallel_safe;
            d
        }

        fn accept(
            &self,
            _result: &TranslationResult,
            _context: &TranslationContext,
        ) -> Result<(), TranslationError> {
            self.counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn test_context() -> (TranslationContext, TranslationResult) {
        let config = TranslationConfigurationBuilder::new()
            .add_source("a.rs")
            .build()
            .unwrap();
        let result = TranslationResult::new();
        let context = TranslationContext::new(
            Arc::new(config),
            Arc::new(ScopeManager::new()),
            Arc::new(TypeManager::new()),
        );
        (context, result)
    }

    #[test]
    fn runs_every_pass_in_every_group() {
        let (context, result) = test_context();
        let counter = Arc::new(AtomicUsize::new(0));
        let mut catalog = PassCatalog::new();
        catalog.register(Arc::new(CountingPass {
            name: "a",
            parallel_safe: true,
            counter: counter.clone(),
        }));
        catalog.register(Arc::new(CountingPass {
            name: "b",
            parallel_safe: true,
            counter: counter.clone(),
        }));
        let schedule = vec![vec![PassName::new("a")], vec![PassName::new("b")]];
        let cancellation = CancellationToken::new();
        run(&schedule, &catalog, &result, &context, &cancellation).unwrap();
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn cancellation_before_a_group_stops_the_runner() {
        let (context, result) = test_context();
        let counter = Arc::new(AtomicUsize::new(0));
        let mut catalog = PassCatalog::new();
        catalog.register(Arc::new(CountingPass {
            name: "a",
            parallel_safe: true,
            counter: counter.clone(),
        }));
        let schedule = vec![vec![PassName::new("a")]];
        let cancellation = CancellationToken::new();
        cancellation.cancel();
        let err = run(&schedule, &catalog, &result, &context, &cancellation).unwrap_err();
        assert!(err.is_cancelled());
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }
}
