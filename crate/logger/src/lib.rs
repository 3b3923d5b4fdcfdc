//! Tracing setup shared by the `ssession` binary and the test suites.
//!
//! The tracing macros are re-exported so that crates log through this crate
//! without depending on `tracing` directly.

mod log_utils;

pub use log_utils::{DEFAULT_LOG_LEVEL, log_init};
pub use tracing::{debug, error, info, trace, warn};
