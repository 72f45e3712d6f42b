//! Claim set embedded in every token, and its builder.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;
use uuid::Uuid;

/// Role written into every issued token.
///
/// Inert: carried on the wire but never checked.
pub const ROLE_EVERYONE: &str = "everyone";

/// Validity window of an issued token in seconds, measured from `iat`
pub const DEFAULT_LIFETIME_SECS: i64 = 3_600;

/// Validity window of an issued token
#[must_use]
pub fn default_lifetime() -> Duration {
    Duration::seconds(DEFAULT_LIFETIME_SECS)
}

/// Typestate markers for the builder.
pub mod ts {
    /// Marker for a field that has been set.
    pub struct Set;
    /// Marker for a field that has not been set.
    pub struct Unset;
}

/// Assertions carried by a token.
///
/// Field order is the serialization order, which must stay stable: the
/// signature covers the encoded JSON text, not the parsed structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimSet {
    /// Authenticated principal. Also read from a capitalised `User` key.
    #[serde(alias = "User")]
    pub user: String,
    /// Role, always [`ROLE_EVERYONE`] for issued tokens.
    #[serde(alias = "Role")]
    pub role: String,
    /// Unique token id.
    pub jti: String,
    /// Issuer.
    pub iss: String,
    /// Audience.
    pub aud: String,
    /// Expiry (unix seconds).
    pub exp: i64,
    /// Not before (unix seconds).
    pub nbf: i64,
    /// Issued-at (unix seconds).
    pub iat: i64,
}

impl ClaimSet {
    /// Claims for a fresh issuance: `iat = nbf = now`, `exp = now + lifetime`
    #[must_use]
    pub fn new(
        subject: impl Into<String>,
        token_id: impl Into<String>,
        issuer: impl Into<String>,
        audience: impl Into<String>,
        now: i64,
        lifetime: Duration,
    ) -> Self {
        Self {
            user: subject.into(),
            role: ROLE_EVERYONE.to_string(),
            jti: token_id.into(),
            iss: issuer.into(),
            aud: audience.into(),
            exp: now.saturating_add(lifetime.num_seconds()),
            nbf: now,
            iat: now,
        }
    }

    /// Start building a claim set
    #[must_use]
    pub fn builder() -> ClaimSetBuilder {
        ClaimSetBuilder::new()
    }

    /// Authenticated principal
    #[must_use]
    pub fn subject(&self) -> &str {
        &self.user
    }

    /// Unique token id
    #[must_use]
    pub fn token_id(&self) -> &str {
        &self.jti
    }

    /// Issuer
    #[must_use]
    pub fn issuer(&self) -> &str {
        &self.iss
    }

    /// Audience
    #[must_use]
    pub fn audience(&self) -> &str {
        &self.aud
    }
}

/// Builder for arbitrary claim sets, including ones that will not validate.
///
/// Only the subject is required. Unset fields default the way issuance
/// does: role [`ROLE_EVERYONE`], a random v4 UUID id, `iat = now`,
/// `nbf = iat` and `exp = iat + DEFAULT_LIFETIME_SECS`.
pub struct ClaimSetBuilder<Sub = ts::Unset> {
    user: Option<String>,
    role: Option<String>,
    jti: Option<String>,
    iss: String,
    aud: String,
    exp: Option<i64>,
    nbf: Option<i64>,
    iat: Option<i64>,
    _phantom: PhantomData<Sub>,
}

impl ClaimSetBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            user: None,
            role: None,
            jti: None,
            iss: String::new(),
            aud: String::new(),
            exp: None,
            nbf: None,
            iat: None,
            _phantom: PhantomData,
        }
    }

    /// Set the subject (`user`) claim.
    #[must_use]
    pub fn subject(self, user: impl Into<String>) -> ClaimSetBuilder<ts::Set> {
        ClaimSetBuilder {
            user: Some(user.into()),
            role: self.role,
            jti: self.jti,
            iss: self.iss,
            aud: self.aud,
            exp: self.exp,
            nbf: self.nbf,
            iat: self.iat,
            _phantom: PhantomData,
        }
    }
}

impl Default for ClaimSetBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl<Sub> ClaimSetBuilder<Sub> {
    /// Set the role claim.
    #[must_use]
    pub fn role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    /// Set the token id (`jti`) claim.
    #[must_use]
    pub fn token_id(mut self, jti: impl Into<String>) -> Self {
        self.jti = Some(jti.into());
        self
    }

    /// Set the issuer (`iss`) claim.
    #[must_use]
    pub fn issuer(mut self, iss: impl Into<String>) -> Self {
        self.iss = iss.into();
        self
    }

    /// Set the audience (`aud`) claim.
    #[must_use]
    pub fn audience(mut self, aud: impl Into<String>) -> Self {
        self.aud = aud.into();
        self
    }

    /// Set the issued-at (`iat`) claim.
    #[must_use]
    pub fn issued_at(mut self, iat: i64) -> Self {
        self.iat = Some(iat);
        self
    }

    /// Set the not-before (`nbf`) claim.
    #[must_use]
    pub fn not_before(mut self, nbf: i64) -> Self {
        self.nbf = Some(nbf);
        self
    }

    /// Set the expiry (`exp`) claim.
    #[must_use]
    pub fn expires_at(mut self, exp: i64) -> Self {
        self.exp = Some(exp);
        self
    }
}

impl ClaimSetBuilder<ts::Set> {
    /// Build the claim set.
    #[must_use]
    pub fn build(self) -> ClaimSet {
        let iat = self.iat.unwrap_or_else(|| Utc::now().timestamp());
        ClaimSet {
            user: self.user.unwrap_or_else(|| {
                tracing::error!("ClaimSetBuilder: subject unexpectedly None despite type guarantees");
                String::new()
            }),
            role: self.role.unwrap_or_else(|| ROLE_EVERYONE.to_string()),
            jti: self.jti.unwrap_or_else(|| Uuid::new_v4().to_string()),
            iss: self.iss,
            aud: self.aud,
            exp: self
                .exp
                .unwrap_or_else(|| iat.saturating_add(DEFAULT_LIFETIME_SECS)),
            nbf: self.nbf.unwrap_or(iat),
            iat,
        }
    }
}
