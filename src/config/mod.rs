//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ProxyConfig (validated, immutable)
//!     → shared with the server at construction time
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the upstream endpoint map is fixed
//!   for the process lifetime, so there is no reload path
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use schema::ListenerConfig;
pub use schema::ObservabilityConfig;
pub use schema::ProxyConfig;
pub use schema::SecurityConfig;
pub use schema::TimeoutConfig;
pub use schema::UpstreamConfig;
