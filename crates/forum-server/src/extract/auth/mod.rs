//! Bearer token authentication.
//!
//! - [`AuthClaims`] are the signed JWT claims carried by every session token.
//! - [`AuthHeader`] decodes and verifies the `Authorization: Bearer` header.
//! - [`AuthState`] additionally confirms that the account still exists.

mod auth_state;
mod jwt_claims;
mod jwt_header;

pub use self::auth_state::AuthState;
pub use self::jwt_claims::AuthClaims;
pub use self::jwt_header::AuthHeader;
