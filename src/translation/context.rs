//! `TranslationContext`: the per-translation bag shared by every frontend
//! and pass. Lifetime equals one `translate()` call.

use crate::config::TranslationConfiguration;
use crate::scope::{ScopeManager, TypeManager};
use crate::shared::constants::thread_pool;
use std::sync::Arc;

pub struct TranslationContext {
    config: Arc<TranslationConfiguration>,
    scope_manager: Arc<ScopeManager>,
    type_manager: Arc<TypeManager>,
    /// Backs both `useParallelFrontends` and `useParallelPasses` (§5): one
    /// pool per translation, sized from the host's core count rather than
    /// rayon's process-wide global pool, so a translation's parallelism is
    /// self-contained and doesn't compete with an embedding application's
    /// own rayon usage.
    worker_pool: Arc<rayon::ThreadPool>,
}

impl TranslationContext {
    pub fn new(
        config: Arc<TranslationConfiguration>,
        scope_manager: Arc<ScopeManager>,
        type_manager: Arc<TypeManager>,
    ) -> Self {
        let worker_pool = rayon::ThreadPoolBuilder::new()
            .num_threads(thread_pool::worker_count())
            .build()
            .map(Arc::new)
            .unwrap_or_else(|_| Arc::new(rayon::ThreadPoolBuilder::new().build().expect("default rayon pool")));
        Self {
            config,
            scope_manager,
            type_manager,
            worker_pool,
        }
    }

    pub fn config(&self) -> &TranslationConfiguration {
        &self.config
    }

    pub fn scopes(&self) -> &ScopeManager {
        &self.scope_manager
    }

    pub fn types(&self) -> &TypeManager {
        &self.type_manager
    }

    /// An owning handle to the scope manager, independent of this
    /// context's lifetime. Used to let a caller keep inspecting scope state
    /// after `translate()` returns, when `disableCleanup` is set.
    pub fn scope_manager_arc(&self) -> Arc<ScopeManager> {
        self.scope_manager.clone()
    }

    /// An owning handle to the type manager, independent of this context's
    /// lifetime. See `scope_manager_arc`.
    pub fn type_manager_arc(&self) -> Arc<TypeManager> {
        self.type_manager.clone()
    }

    /// The translation-scoped worker pool backing both parallelism toggles.
    pub fn worker_pool(&self) -> &rayon::ThreadPool {
        &self.worker_pool
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TranslationConfigurationBuilder;

    #[test]
    fn exposes_the_services_it_was_built_with() {
        let config = Arc::new(TranslationConfigurationBuilder::new().build().unwrap());
        let context = TranslationContext::new(config, Arc::new(ScopeManager::new()), Arc::new(TypeManager::new()));
        assert!(context.config().software_components.is_empty());
        let scope = crate::graph::NodeId(0);
        context.scopes().enter_scope(scope);
        assert_eq!(context.scopes().parent_of(scope), None);
    }
}
