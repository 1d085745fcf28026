//! Request extractors that reject with the uniform error body.
//!
//! - [`AuthHeader`], [`AuthClaims`] and [`AuthState`] authenticate the caller.
//! - [`Json`], [`ValidateJson`], [`Path`] and [`Query`] replace their axum
//!   counterparts.

pub mod auth;
pub mod reject;

pub use crate::extract::auth::{AuthClaims, AuthHeader, AuthState};
pub use crate::extract::reject::{Json, Path, Query, ValidateJson};
