//! Application state and dependency injection.

mod config;
mod security;

use forum_postgres::PgClient;

pub use crate::service::config::{ServiceConfig, ServiceConfigBuilder};
pub use crate::service::security::{PasswordHasher, SessionKeys, SessionKeysConfig};
#[cfg(test)]
pub(crate) use crate::service::security::write_test_keys;
pub use crate::{Error, Result};

/// Application state.
///
/// Used for the [`State`] extraction (dependency injection).
///
/// [`State`]: axum::extract::State
#[must_use = "state does nothing unless you use it"]
#[derive(Debug, Clone)]
pub struct ServiceState {
    // External services:
    pub postgres: PgClient,

    // Internal services:
    pub password_hasher: PasswordHasher,
    pub session_keys: SessionKeys,
}

impl ServiceState {
    /// Assembles the state from an existing pool and key pair.
    pub fn new(postgres: PgClient, session_keys: SessionKeys) -> Result<Self> {
        Ok(Self {
            postgres,
            password_hasher: PasswordHasher::new()?,
            session_keys,
        })
    }

    /// Initializes application state from configuration.
    ///
    /// Connects to Postgres, applies migrations and loads the session keys.
    pub async fn from_config(service_config: &ServiceConfig) -> Result<Self> {
        service_config.validate()?;

        let postgres = service_config.connect_postgres().await?;
        let session_keys = service_config.load_session_keys().await?;
        Self::new(postgres, session_keys)
    }
}

macro_rules! impl_di {
    ($($f:ident: $t:ty),+) => {$(
        impl axum::extract::FromRef<ServiceState> for $t {
            fn from_ref(state: &ServiceState) -> Self {
                state.$f.clone()
            }
        }
    )+};
}

// External services:
impl_di!(postgres: PgClient);

// Internal services:
impl_di!(password_hasher: PasswordHasher);
impl_di!(session_keys: SessionKeys);
