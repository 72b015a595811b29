//! Logging macros
//!
//! Gated behind the `trace` feature so hot paths (frontend parsing, pass
//! execution) pay nothing for logging in release builds that don't opt in.

#[cfg(not(feature = "trace"))]
#[macro_export]
macro_rules! debug { ($($arg:tt)*) => {}; }
#[cfg(not(feature = "trace"))]
#[macro_export]
macro_rules! info { ($($arg:tt)*) => {}; }
#[cfg(not(feature = "trace"))]
#[macro_export]
macro_rules! warn { ($($arg:tt)*) => {}; }
#[cfg(not(feature = "trace"))]
#[macro_export]
macro_rules! error { ($($arg:tt)*) => {}; }
#[cfg(not(feature = "trace"))]
#[macro_export]
macro_rules! trace { ($($arg:tt)*) => {}; }

#[cfg(feature = "trace")]
pub use tracing::{debug, error, info, trace, warn};
