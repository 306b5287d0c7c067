//! Stock behavior implementations.
//!
//! Cross-cutting concerns live here, as behaviors plugged into the
//! chain — the dispatch engines themselves never retry, recover, or log.

pub mod logging;
pub mod retry;
#[cfg(feature = "timeout")]
pub mod timeout;

pub use logging::LoggingBehavior;
pub use retry::RetryBehavior;
#[cfg(feature = "timeout")]
pub use timeout::{TimeoutBehavior, TimeoutElapsed};
