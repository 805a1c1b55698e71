//! Observability subsystem.
//!
//! # Design Decisions
//! - Structured logging via tracing; the request ID flows through every
//!   log line of an exchange
//! - Metrics are cheap (atomic increments) and scraped separately from
//!   proxy traffic

pub mod logging;
pub mod metrics;
