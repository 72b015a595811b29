//! Declarative pass metadata.
//!
//! The original reads this metadata via runtime reflection over annotations
//! on each pass class. Per the static-registration design note, each pass
//! type instead exposes an explicit `PassDescriptor` — no reflection, no
//! macro-generated inventory, just a struct literal.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PassName(pub String);

impl PassName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

impl std::fmt::Display for PassName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PassName {
    fn from(s: &str) -> Self {
        PassName::new(s)
    }
}

/// Dependency and ordering metadata for one pass.
///
/// `hard_deps` force inclusion of the named pass even if the caller never
/// registered it (§4.E step 2); `soft_deps` only constrain ordering when the
/// dependency happens to be present. `parallel_safe` resolves Open Question
/// (b): a pass must opt in to running concurrently with its group-mates.
#[derive(Debug, Clone, Default)]
pub struct PassDescriptor {
    pub name: PassName,
    pub hard_deps: Vec<PassName>,
    pub soft_deps: Vec<PassName>,
    pub execute_before: Vec<PassName>,
    pub execute_first: bool,
    pub execute_last: bool,
    pub parallel_safe: bool,
}

impl PassDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: PassName::new(name),
            hard_deps: Vec::new(),
            soft_deps: Vec::new(),
            execute_before: Vec::new(),
            execute_first: false,
            execute_last: false,
            parallel_safe: true,
        }
    }

    pub fn depends_on(mut self, name: impl Into<String>) -> Self {
        self.hard_deps.push(PassName::new(name));
        self
    }

    pub fn soft_depends_on(mut self, name: impl Into<String>) -> Self {
        self.soft_deps.push(PassName::new(name));
        self
    }

    pub fn execute_before(mut self, name: impl Into<String>) -> Self {
        self.execute_before.push(PassName::new(name));
        self
    }

    pub fn first(mut self) -> Self {
        self.execute_first = true;
        self
    }

    pub fn last(mut self) -> Self {
        self.execute_last = true;
        self
    }

    pub fn not_parallel_safe(mut self) -> Self {
        self.parallel_safe = false;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_methods_compose() {
        let d = PassDescriptor::new("b")
            .depends_on("a")
            .soft_depends_on("c")
            .first();
        assert_eq!(d.name, PassName::new("b"));
        assert_eq!(d.hard_deps, vec![PassName::new("a")]);
        assert_eq!(d.soft_deps, vec![PassName::new("c")]);
        assert!(d.execute_first);
        assert!(d.parallel_safe);
    }
}
