//! HTTP hosting subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, body buffering)
//!     → proxy pipeline (classify → resolve → transform → execute → validate)
//!     → server.rs (relay response or render failure)
//!     → Send to client
//! ```
//!
//! This is the one hosting adapter shipped with the crate. The pipeline
//! itself is transport-neutral, so other environments (e.g. a serverless
//! event handler) can host it by building `InboundRequest` themselves.

pub mod request;
pub mod server;

pub use request::{RequestIdLayer, X_REQUEST_ID};
pub use server::HttpServer;
