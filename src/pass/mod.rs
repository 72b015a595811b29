//! The Pass Execution Model: declarative pass metadata (§4.E, §6), the
//! scheduler that turns it into an ordered group list, and the runner that
//! executes that schedule.

pub mod catalog;
pub mod default_passes;
pub mod descriptor;
pub mod pass_trait;
pub mod runner;
pub mod scheduler;

pub use catalog::PassCatalog;
pub use descriptor::{PassDescriptor, PassName};
pub use pass_trait::Pass;
pub use scheduler::{schedule, Schedule};
