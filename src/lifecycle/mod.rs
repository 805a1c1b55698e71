//! Lifecycle management subsystem.
//!
//! Startup order is fixed: config first, then observability, then the
//! listener. Shutdown is the reverse: stop accepting, drain in-flight
//! exchanges, exit.

pub mod shutdown;

pub use shutdown::Shutdown;
