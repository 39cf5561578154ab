//! Ed25519 key pair used to sign and verify session tokens.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[cfg(feature = "config")]
use clap::Args;
use jsonwebtoken::{DecodingKey, EncodingKey};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Tracing target for key loading.
const TRACING_TARGET: &str = "posconf_server::service::session_keys";

/// PEM file locations of the session signing keys.
///
/// Both paths are required; there is no built-in key.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "config", derive(Args))]
pub struct SessionKeysConfig {
    /// File path to the Ed25519 public key used to verify session tokens.
    #[cfg_attr(
        feature = "config",
        arg(long = "auth-public-pem-filepath", env = "AUTH_PUBLIC_PEM_FILEPATH")
    )]
    pub decoding_key: PathBuf,

    /// File path to the Ed25519 private key used to sign session tokens.
    #[cfg_attr(
        feature = "config",
        arg(long = "auth-private-pem-filepath", env = "AUTH_PRIVATE_PEM_FILEPATH")
    )]
    pub encoding_key: PathBuf,
}

impl SessionKeysConfig {
    /// Creates a configuration from the two key paths.
    pub fn new(decoding_key: impl Into<PathBuf>, encoding_key: impl Into<PathBuf>) -> Self {
        Self {
            decoding_key: decoding_key.into(),
            encoding_key: encoding_key.into(),
        }
    }

    /// Validates that both key files exist and are regular files.
    fn validate(&self) -> Result<()> {
        if !self.decoding_key.is_file() {
            return Err(Error::config(format!(
                "public key file not found: {}",
                self.decoding_key.display()
            )));
        }

        if !self.encoding_key.is_file() {
            return Err(Error::config(format!(
                "private key file not found: {}",
                self.encoding_key.display()
            )));
        }

        Ok(())
    }
}

/// Signing and verification keys for session tokens.
///
/// Cheap to clone; the keys are shared.
#[derive(Clone)]
pub struct SessionKeys {
    inner: Arc<SessionKeysInner>,
}

struct SessionKeysInner {
    decoding_key: DecodingKey,
    encoding_key: EncodingKey,
}

impl SessionKeys {
    /// Loads the key pair from the configured PEM files.
    pub async fn from_config(config: &SessionKeysConfig) -> Result<Self> {
        config.validate()?;

        tracing::debug!(
            target: TRACING_TARGET,
            decoding_key_path = %config.decoding_key.display(),
            encoding_key_path = %config.encoding_key.display(),
            "loading session keys",
        );

        let public_pem = read_pem(&config.decoding_key).await?;
        let private_pem = read_pem(&config.encoding_key).await?;
        let keys = Self::from_pem(&public_pem, &private_pem)?;

        tracing::info!(target: TRACING_TARGET, "session keys loaded");
        Ok(keys)
    }

    /// Loads the key pair from two PEM files.
    pub async fn new(
        decoding_pem_key: impl AsRef<Path>,
        encoding_pem_key: impl AsRef<Path>,
    ) -> Result<Self> {
        let config = SessionKeysConfig::new(
            decoding_pem_key.as_ref(),
            encoding_pem_key.as_ref(),
        );
        Self::from_config(&config).await
    }

    /// Parses an Ed25519 key pair from PEM data.
    pub fn from_pem(public_pem: &[u8], private_pem: &[u8]) -> Result<Self> {
        let decoding_key = DecodingKey::from_ed_pem(public_pem).map_err(|e| {
            tracing::error!(target: TRACING_TARGET, error = %e, "invalid public key PEM");
            Error::auth("invalid public key PEM format").with_source(e)
        })?;

        let encoding_key = EncodingKey::from_ed_pem(private_pem).map_err(|e| {
            tracing::error!(target: TRACING_TARGET, error = %e, "invalid private key PEM");
            Error::auth("invalid private key PEM format").with_source(e)
        })?;

        Ok(Self {
            inner: Arc::new(SessionKeysInner {
                decoding_key,
                encoding_key,
            }),
        })
    }

    /// Returns the key used to verify tokens.
    #[inline]
    pub fn decoding_key(&self) -> &DecodingKey {
        &self.inner.decoding_key
    }

    /// Returns the key used to sign tokens.
    #[inline]
    pub fn encoding_key(&self) -> &EncodingKey {
        &self.inner.encoding_key
    }

    /// Checks that the two keys belong together by signing and verifying a
    /// short-lived probe token.
    pub fn validate_keys(&self) -> Result<()> {
        use jsonwebtoken::{Algorithm, Header, Validation, decode, encode};

        #[derive(Serialize, Deserialize)]
        struct Probe {
            sub: String,
            exp: i64,
        }

        let probe = Probe {
            sub: "probe".to_owned(),
            exp: jiff::Timestamp::now().as_second() + 300,
        };

        let token = encode(&Header::new(Algorithm::EdDSA), &probe, self.encoding_key())
            .map_err(|e| Error::auth("key validation encoding failed").with_source(e))?;

        let validation = Validation::new(Algorithm::EdDSA);
        decode::<Probe>(&token, self.decoding_key(), &validation).map_err(|e| {
            tracing::error!(
                target: TRACING_TARGET,
                error = %e,
                "public key does not match private key",
            );
            Error::auth("key validation decoding failed").with_source(e)
        })?;

        Ok(())
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
        Error::file_system(format!("failed to read key file: {}", path.display())).with_source(e)
    })
}

impl fmt::Debug for SessionKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionKeys").finish_non_exhaustive()
    }
}
