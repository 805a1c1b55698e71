//! OAuth2 grant-type forwarding proxy.
//!
//! Receives token exchange requests from an identity-consuming client,
//! classifies them by `grant_type`, rewrites them for the upstream
//! authorization server, forwards them, and relays back the response or a
//! typed failure.
//!
//! ```text
//!                    ┌──────────────────────────────────────────────┐
//!                    │                GRANT PROXY                    │
//!                    │                                               │
//!  Token Request     │  ┌────────┐   ┌──────────┐   ┌───────────┐   │
//!  ──────────────────┼─▶│  http  │──▶│ classify │──▶│  resolve  │   │
//!                    │  │ server │   │  grant   │   │ endpoint  │   │
//!                    │  └────────┘   └──────────┘   └─────┬─────┘   │
//!                    │                                     ▼         │
//!                    │  ┌────────┐   ┌──────────┐   ┌───────────┐   │     Authorization
//!  Token Response    │  │ relay/ │◀──│ validate │◀──│  execute  │◀──┼───▶ Server
//!  ◀─────────────────┼──│ render │   │ response │   │ transform │   │     (upstream)
//!                    │  └────────┘   └──────────┘   └───────────┘   │
//!                    │                                               │
//!                    │  config · lifecycle · observability           │
//!                    └──────────────────────────────────────────────┘
//! ```
//!
//! The pipeline holds no state across requests and performs no retries;
//! every failure is terminal for its request.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod proxy;

pub use config::ProxyConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
