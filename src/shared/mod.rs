//! Shared, dependency-light utilities used across the orchestration core.

#[macro_use]
pub mod macros;
pub mod cancellation;
pub mod constants;
pub mod id_allocator;
pub mod scope_stack;

pub use cancellation::CancellationToken;
pub use id_allocator::IdAllocator;
pub use scope_stack::ScopeStack;
