//! Router middleware: authentication, CORS, observability and recovery.
//!
//! Each concern is exposed as an extension trait on [`Router`], applied from
//! the outermost layer inwards:
//!
//! ```rust,ignore
//! let app = routes(state)
//!     .with_cors(&cors_config)
//!     .with_observability()
//!     .with_recovery(request_timeout);
//! ```
//!
//! [`Router`]: axum::Router

mod authentication;
mod cors;
mod observability;
mod recovery;

pub use authentication::{RouterAuthExt, require_authentication};
pub use cors::{CorsConfig, RouterCorsExt, create_cors_layer};
pub use observability::{RouterObservabilityExt, log_request};
pub use recovery::RouterRecoveryExt;
