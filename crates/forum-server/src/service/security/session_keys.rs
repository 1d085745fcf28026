//! Ed25519 key pair used to sign and verify session tokens.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

#[cfg(feature = "config")]
use clap::Args;
use jsonwebtoken::{DecodingKey, EncodingKey};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Tracing target for key loading.
const TRACING_TARGET: &str = "forum_server::service::session_keys";

/// Shortest accepted token lifetime (one minute).
const MIN_TOKEN_TTL_SECS: u64 = 60;
/// Longest accepted token lifetime (thirty days).
const MAX_TOKEN_TTL_SECS: u64 = 30 * 24 * 60 * 60;

/// Key file locations and token lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct SessionKeysConfig {
    /// File path to the JWT decoding (public) key.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "AUTH_PUBLIC_PEM_FILEPATH", default_value = "./public.pem")
    )]
    #[serde(default = "SessionKeysConfig::default_decoding_key")]
    pub decoding_key: PathBuf,

    /// File path to the JWT encoding (private) key.
    #[cfg_attr(
        feature = "config",
        arg(long, env = "AUTH_PRIVATE_PEM_FILEPATH", default_value = "./private.pem")
    )]
    #[serde(default = "SessionKeysConfig::default_encoding_key")]
    pub encoding_key: PathBuf,

    /// Lifetime of issued tokens in seconds (60-2592000).
    #[cfg_attr(
        feature = "config",
        arg(long, env = "AUTH_TOKEN_TTL_SECS", default_value_t = 86400)
    )]
    #[serde(default = "SessionKeysConfig::default_token_ttl_secs")]
    pub token_ttl_secs: u64,
}

impl SessionKeysConfig {
    /// Creates a configuration with the default token lifetime.
    pub fn new(decoding_key: impl AsRef<Path>, encoding_key: impl AsRef<Path>) -> Self {
        Self {
            decoding_key: decoding_key.as_ref().to_path_buf(),
            encoding_key: encoding_key.as_ref().to_path_buf(),
            token_ttl_secs: Self::default_token_ttl_secs(),
        }
    }

    /// Sets the token lifetime.
    pub fn with_token_ttl_secs(mut self, secs: u64) -> Self {
        self.token_ttl_secs = secs;
        self
    }

    /// Returns the token lifetime.
    #[inline]
    pub fn token_ttl(&self) -> Duration {
        Duration::from_secs(self.token_ttl_secs)
    }

    /// Checks the token lifetime and that both key paths point to files.
    pub fn validate(&self) -> Result<()> {
        if !(MIN_TOKEN_TTL_SECS..=MAX_TOKEN_TTL_SECS).contains(&self.token_ttl_secs) {
            return Err(Error::config(format!(
                "Token lifetime must be between {MIN_TOKEN_TTL_SECS} and {MAX_TOKEN_TTL_SECS} seconds"
            )));
        }

        if !self.decoding_key.is_file() {
            return Err(Error::config(format!(
                "Decoding key {} is not a file",
                self.decoding_key.display()
            )));
        }

        if !self.encoding_key.is_file() {
            return Err(Error::config(format!(
                "Encoding key {} is not a file",
                self.encoding_key.display()
            )));
        }

        Ok(())
    }

    fn default_decoding_key() -> PathBuf {
        "./public.pem".into()
    }

    fn default_encoding_key() -> PathBuf {
        "./private.pem".into()
    }

    fn default_token_ttl_secs() -> u64 {
        86400
    }
}

/// Loaded key pair, shared across handlers.
#[derive(Clone)]
pub struct SessionKeys {
    inner: Arc<SessionKeysInner>,
}

struct SessionKeysInner {
    decoding_key: DecodingKey,
    encoding_key: EncodingKey,
    config: SessionKeysConfig,
}

impl SessionKeys {
    /// Validates the configuration and loads both PEM files.
    pub async fn from_config(config: &SessionKeysConfig) -> Result<Self> {
        config.validate()?;

        tracing::debug!(
            target: TRACING_TARGET,
            decoding_key_path = %config.decoding_key.display(),
            encoding_key_path = %config.encoding_key.display(),
            "loading session keys",
        );

        let decoding_pem = read_pem(&config.decoding_key).await?;
        let decoding_key = DecodingKey::from_ed_pem(&decoding_pem).map_err(|e| {
            tracing::error!(
                target: TRACING_TARGET,
                path = %config.decoding_key.display(),
                error = %e,
                "failed to parse decoding key",
            );
            Error::auth("invalid decoding key PEM format").with_source(e)
        })?;

        let encoding_pem = read_pem(&config.encoding_key).await?;
        let encoding_key = EncodingKey::from_ed_pem(&encoding_pem).map_err(|e| {
            tracing::error!(
                target: TRACING_TARGET,
                path = %config.encoding_key.display(),
                error = %e,
                "failed to parse encoding key",
            );
            Error::auth("invalid encoding key PEM format").with_source(e)
        })?;

        tracing::info!(
            target: TRACING_TARGET,
            token_ttl_secs = config.token_ttl_secs,
            "session keys loaded",
        );

        Ok(Self {
            inner: Arc::new(SessionKeysInner {
                decoding_key,
                encoding_key,
                config: config.clone(),
            }),
        })
    }

    /// Loads a key pair with the default token lifetime.
    pub async fn new(
        decoding_pem_key: impl AsRef<Path>,
        encoding_pem_key: impl AsRef<Path>,
    ) -> Result<Self> {
        Self::from_config(&SessionKeysConfig::new(decoding_pem_key, encoding_pem_key)).await
    }

    /// Key used to verify tokens.
    #[inline]
    pub fn decoding_key(&self) -> &DecodingKey {
        &self.inner.decoding_key
    }

    /// Key used to sign tokens.
    #[inline]
    pub fn encoding_key(&self) -> &EncodingKey {
        &self.inner.encoding_key
    }

    /// Lifetime of newly issued tokens.
    #[inline]
    pub fn token_ttl(&self) -> Duration {
        self.inner.config.token_ttl()
    }

    #[inline]
    pub fn config(&self) -> &SessionKeysConfig {
        &self.inner.config
    }
}

impl fmt::Debug for SessionKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionKeys")
            .field("config", &self.inner.config)
            .finish_non_exhaustive()
    }
}

async fn read_pem(path: &Path) -> Result<Vec<u8>> {
    tokio::fs::read(path).await.map_err(|e| {
        tracing::error!(
            target: TRACING_TARGET,
            path = %path.display(),
            error = %e,
            "failed to read key file",
        );
        Error::file_system(format!("failed to read key file {}", path.display())).with_source(e)
    })
}
