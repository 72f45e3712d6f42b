//! Token provider: issuance and validation pipelines.

use crate::{
    claims::{ClaimSet, ClaimSetBuilder, default_lifetime, ts},
    codec,
    config::ProviderConfig,
    crypto::SigningKey,
    error::{Unauthorized, ValidationError, ValidationResult},
    serializer,
    traits::{Clock, SystemClock, TokenIdSource, UuidV4Source},
    types::Header,
    validation::Expectations,
};
use std::sync::Arc;

/// Scheme marker a presented credential must start with
pub const BEARER_PREFIX: &str = "Bearer ";

/// Issues and validates HS256 bearer tokens for one secret, issuer and
/// audience.
///
/// Configuration is fixed at construction. Every method takes `&self` and
/// touches no mutable state, so a provider can be shared across threads
/// (directly or behind an `Arc`) without locking.
#[derive(Clone)]
pub struct TokenProvider {
    key: SigningKey,
    issuer: String,
    audience: String,
    encoded_header: String,
    ids: Arc<dyn TokenIdSource>,
    clock: Arc<dyn Clock>,
}

impl TokenProvider {
    /// Create a provider backed by random v4 UUIDs and the system clock.
    #[must_use]
    pub fn new(config: ProviderConfig) -> Self {
        Self::with_capabilities(config, UuidV4Source, SystemClock)
    }

    /// Create a provider with explicit token-id and time sources.
    #[must_use]
    pub fn with_capabilities(
        config: ProviderConfig,
        ids: impl TokenIdSource + 'static,
        clock: impl Clock + 'static,
    ) -> Self {
        Self {
            key: SigningKey::new(config.secret_key()),
            issuer: config.issuer().to_string(),
            audience: config.audience().to_string(),
            encoded_header: serializer::encode_segment(&Header::hs256()),
            ids: Arc::new(ids),
            clock: Arc::new(clock),
        }
    }

    /// Configured issuer
    #[must_use]
    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// Configured audience
    #[must_use]
    pub fn audience(&self) -> &str {
        &self.audience
    }

    /// Claims a fresh token for `subject` would carry: a new id, configured
    /// issuer and audience, `iat = nbf = now` and a one hour lifetime.
    ///
    /// The builder can be adjusted before passing the result to
    /// [`sign_claims`](Self::sign_claims).
    #[must_use]
    pub fn claims(&self, subject: &str) -> ClaimSetBuilder<ts::Set> {
        let now = self.clock.now();
        ClaimSet::builder()
            .subject(subject)
            .token_id(self.ids.next_id())
            .issuer(self.issuer.as_str())
            .audience(self.audience.as_str())
            .issued_at(now)
            .not_before(now)
            .expires_at(now.saturating_add(default_lifetime().num_seconds()))
    }

    /// Issue a signed token for `subject`.
    #[must_use]
    pub fn issue(&self, subject: &str) -> String {
        let claims = self.claims(subject).build();
        tracing::debug!(user = %claims.user, jti = %claims.jti, exp = claims.exp, "issuing token");
        self.sign_claims(&claims)
    }

    /// Sign an arbitrary claim set.
    ///
    /// No semantic check is applied; expired or foreign claims produce a
    /// token that validation will reject.
    #[must_use]
    pub fn sign_claims(&self, claims: &ClaimSet) -> String {
        let encoded_claims = serializer::encode_segment(claims);
        let signing_input = serializer::signing_input(&self.encoded_header, &encoded_claims);
        let signature = self.key.sign(signing_input.as_bytes());
        serializer::assemble(
            &self.encoded_header,
            &encoded_claims,
            &codec::encode(&signature),
        )
    }

    /// Validate a presented credential of the form `Bearer <token>`.
    ///
    /// # Errors
    /// Returns [`ValidationError::MalformedFormat`] if the prefix is missing
    /// or followed by further whitespace, otherwise whatever
    /// [`validate_token`](Self::validate_token) returns.
    pub fn validate(&self, presented: &str) -> ValidationResult<ClaimSet> {
        let result = presented
            .strip_prefix(BEARER_PREFIX)
            .filter(|token| !token.starts_with(char::is_whitespace))
            .ok_or(ValidationError::MalformedFormat)
            .and_then(|token| self.verify(token));
        match &result {
            Ok(claims) => tracing::trace!(user = %claims.user, jti = %claims.jti, "token accepted"),
            Err(err) => tracing::debug!(reason = %err, "token rejected"),
        }
        result
    }

    /// Validate an unprefixed token.
    ///
    /// Checks run in a fixed order and stop at the first failure: segment
    /// count, signature encoding, signature, claims structure, issuer,
    /// audience, not-before, expiry. The claims segment is not decoded
    /// until the signature over it has been verified.
    ///
    /// # Errors
    /// Returns the [`ValidationError`] of the first failing check.
    pub fn validate_token(&self, token: &str) -> ValidationResult<ClaimSet> {
        let result = self.verify(token);
        if let Err(err) = &result {
            tracing::debug!(reason = %err, "token rejected");
        }
        result
    }

    fn verify(&self, token: &str) -> ValidationResult<ClaimSet> {
        let segments = serializer::split(token)?;
        let signature = codec::decode(segments.signature)?;
        if !self
            .key
            .verify(segments.signing_input().as_bytes(), &signature)
        {
            return Err(ValidationError::InvalidSignature);
        }
        let claims: ClaimSet = serializer::decode_segment(segments.claims)?;
        self.expectations().check(&claims, self.clock.now())?;
        Ok(claims)
    }

    /// Validate the credential a collaborator extracted from a request,
    /// collapsing every failure into an opaque [`Unauthorized`].
    ///
    /// # Errors
    /// Returns [`Unauthorized`] if no credential was presented or it fails
    /// validation. The specific reason is only logged at debug level.
    pub fn authorize(&self, credential: Option<&str>) -> Result<ClaimSet, Unauthorized> {
        let Some(credential) = credential else {
            tracing::debug!("no credential presented");
            return Err(Unauthorized);
        };
        self.validate(credential).map_err(Unauthorized::from)
    }

    fn expectations(&self) -> Expectations<'_> {
        Expectations {
            issuer: &self.issuer,
            audience: &self.audience,
        }
    }
}

impl std::fmt::Debug for TokenProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenProvider")
            .field("key", &self.key)
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .finish_non_exhaustive()
    }
}
