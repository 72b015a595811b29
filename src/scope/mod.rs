//! The Scope & Type Manager (§4.B): two translation-scoped, internally
//! synchronized services shared by every frontend and pass.

pub mod scope_manager;
pub mod type_manager;

pub use scope_manager::ScopeManager;
pub use type_manager::TypeManager;
