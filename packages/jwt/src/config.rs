//! Provider configuration: secret, issuer and audience
//!
//! Configuration is an explicit value handed to
//! [`TokenProvider::new`](crate::TokenProvider::new); nothing is read from
//! ambient process state after construction.

use crate::error::{ConfigError, ConfigResult};
use std::path::Path;
use zeroize::Zeroizing;

/// Environment prefix for configuration overrides (`JWT_SECRET_KEY`, ...)
pub const ENV_PREFIX: &str = "JWT";

/// Settings file table holding `secret_key`, `issuer` and `audience`
pub const SECTION: &str = "jwt";

/// Immutable provider configuration.
///
/// The secret is wiped from memory on drop and never appears in `Debug`
/// output or logs.
#[derive(Clone)]
pub struct ProviderConfig {
    secret_key: Zeroizing<Vec<u8>>,
    issuer: String,
    audience: String,
}

impl ProviderConfig {
    /// Build a configuration from explicit values
    ///
    /// # Errors
    /// Returns [`ConfigError`] if the secret, issuer or audience is empty.
    pub fn new(
        secret_key: impl AsRef<[u8]>,
        issuer: impl Into<String>,
        audience: impl Into<String>,
    ) -> ConfigResult<Self> {
        let secret_key = secret_key.as_ref();
        if secret_key.is_empty() {
            return Err(ConfigError::EmptySecret);
        }
        let issuer = issuer.into();
        if issuer.is_empty() {
            return Err(ConfigError::EmptyIssuer);
        }
        let audience = audience.into();
        if audience.is_empty() {
            return Err(ConfigError::EmptyAudience);
        }
        Ok(Self {
            secret_key: Zeroizing::new(secret_key.to_vec()),
            issuer,
            audience,
        })
    }

    /// Load configuration from an optional settings file, overridden by
    /// `JWT_SECRET_KEY`, `JWT_ISSUER` and `JWT_AUDIENCE`
    ///
    /// The file keeps its settings under a `jwt` table:
    ///
    /// ```yaml
    /// jwt:
    ///   secret_key: testing_secret
    ///   issuer: Foo
    ///   audience: Foo
    /// ```
    ///
    /// The file format is inferred from its extension (TOML, YAML, JSON, ...).
    ///
    /// # Errors
    /// Returns [`ConfigError::Load`] if the file cannot be read or a setting
    /// is missing, or a validation error from [`ProviderConfig::new`].
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        }
        builder = builder.add_source(config::Environment::with_prefix(ENV_PREFIX));
        Self::from_source(builder.build()?)
    }

    /// Build a configuration from an already assembled [`config::Config`]
    ///
    /// Each setting is read from a top-level key first (where environment
    /// overrides land), then from the `jwt` table.
    ///
    /// # Errors
    /// Returns [`ConfigError`] if a setting is missing or empty.
    pub fn from_source(source: config::Config) -> ConfigResult<Self> {
        let secret_key = Zeroizing::new(setting(&source, "secret_key")?);
        let issuer = setting(&source, "issuer")?;
        let audience = setting(&source, "audience")?;
        Self::new(secret_key.as_bytes(), issuer, audience)
    }

    /// Shared HMAC secret
    pub(crate) fn secret_key(&self) -> &[u8] {
        &self.secret_key
    }

    /// Expected `iss` claim
    #[must_use]
    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// Expected `aud` claim
    #[must_use]
    pub fn audience(&self) -> &str {
        &self.audience
    }
}

fn setting(source: &config::Config, key: &str) -> ConfigResult<String> {
    match source.get_string(key) {
        Ok(value) => Ok(value),
        Err(config::ConfigError::NotFound(_)) => {
            Ok(source.get_string(&format!("{SECTION}.{key}"))?)
        }
        Err(err) => Err(err.into()),
    }
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("secret_key", &"[REDACTED]")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .finish()
    }
}
