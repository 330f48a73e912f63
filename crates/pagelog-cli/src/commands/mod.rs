//! Command implementations.
//!
//! - [`capture`] - process an event stream into a report and an outcome
//! - [`check`] - validate configuration only
//!
//! Configuration is always loaded before any event is read.

pub mod capture;
pub mod check;

pub use capture::execute as capture_execute;
pub use check::execute as check_execute;
