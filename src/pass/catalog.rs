//! String-keyed pass catalog.
//!
//! Generalizes the string-keyed factory idiom the Language Registry uses for
//! dynamic language loading (Design Note, "dynamic language loading by
//! string FQN") to passes: the scheduler needs a way to pull in a hard
//! dependency the caller never registered (§4.E step 2), and a catalog
//! lookup replaces the original's reflection-based class instantiation.

use super::descriptor::PassName;
use super::pass_trait::Pass;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Default, Clone)]
pub struct PassCatalog {
    passes: HashMap<PassName, Arc<dyn Pass>>,
}

impl PassCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, pass: Arc<dyn Pass>) {
        let name = pass.descriptor().name;
        self.passes.insert(name, pass);
    }

    pub fn get(&self, name: &PassName) -> Option<Arc<dyn Pass>> {
        self.passes.get(name).cloned()
    }

    pub fn contains(&self, name: &PassName) -> bool {
        self.passes.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &PassName> {
        self.passes.keys()
    }

    pub fn len(&self) -> usize {
        self.passes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.passes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pass::descriptor::PassDescriptor;
    use crate::translation::{TranslationContext, TranslationResult};
    use crate::errors::TranslationError;

    struct Noop(&'static str);
    impl Pass for Noop {
        fn descriptor(&self) -> PassDescriptor {
            PassDescriptor::new(self.0)
        }
        fn accept(
            &self,
            _result: &TranslationResult,
            _context: &TranslationContext,
        ) -> Result<(), TranslationError> {
            Ok(())
        }
    }

    #[test]
    fn register_and_lookup_roundtrips() {
        let mut catalog = PassCatalog::new();
        catalog.register(Arc::new(Noop("a")));
        assert!(catalog.contains(&PassName::new("a")));
        assert!(!catalog.contains(&PassName::new("b")));
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn re_registering_the_same_name_is_idempotent() {
        let mut catalog = PassCatalog::new();
        catalog.register(Arc::new(Noop("a")));
        catalog.register(Arc::new(Noop("a")));
        assert_eq!(catalog.len(), 1);
    }
}
