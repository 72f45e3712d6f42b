//! Error taxonomy for token validation and provider configuration

use thiserror::Error;

/// Result type for token validation
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Result type for provider configuration
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Reasons a presented token is rejected.
///
/// Every variant is terminal: retrying the same input can never succeed.
/// The variants are specific so the engine is testable; collaborators
/// facing untrusted clients should collapse them with
/// [`TokenProvider::authorize`](crate::TokenProvider::authorize).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Missing `Bearer ` prefix or wrong number of segments
    #[error("malformed token format")]
    MalformedFormat,

    /// A segment is not valid unpadded base64url
    #[error("malformed token encoding")]
    MalformedEncoding,

    /// The claims segment does not decode into a claim set
    #[error("malformed token claims")]
    MalformedClaims,

    /// Recomputed signature differs from the presented one
    #[error("invalid token signature")]
    InvalidSignature,

    /// `iss` does not match the configured issuer
    #[error("invalid token issuer")]
    InvalidIssuer,

    /// `aud` does not match the configured audience
    #[error("invalid token audience")]
    InvalidAudience,

    /// Current time precedes `nbf`
    #[error("token not valid before {not_before}")]
    NotYetValid {
        /// The token's `nbf` claim, Unix seconds
        not_before: i64,
    },

    /// Current time is past `exp`
    #[error("token expired at {expires_at}")]
    Expired {
        /// The token's `exp` claim, Unix seconds
        expires_at: i64,
    },
}

impl ValidationError {
    /// Create a not-yet-valid error
    #[inline]
    #[must_use]
    pub fn not_yet_valid(not_before: i64) -> Self {
        Self::NotYetValid { not_before }
    }

    /// Create an expired error
    #[inline]
    #[must_use]
    pub fn expired(expires_at: i64) -> Self {
        Self::Expired { expires_at }
    }

    /// Whether the token was structurally broken, as opposed to well formed
    /// but rejected
    #[must_use]
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            Self::MalformedFormat | Self::MalformedEncoding | Self::MalformedClaims
        )
    }
}

/// Provider configuration errors, raised once at construction time
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No secret key configured
    #[error("secret key must not be empty")]
    EmptySecret,

    /// No issuer configured
    #[error("issuer must not be empty")]
    EmptyIssuer,

    /// No audience configured
    #[error("audience must not be empty")]
    EmptyAudience,

    /// Configuration source could not be read or deserialized
    #[error("failed to load configuration: {0}")]
    Load(String),
}

impl ConfigError {
    /// Create a load error
    #[must_use]
    pub fn load(msg: impl Into<String>) -> Self {
        Self::Load(msg.into())
    }
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        Self::load(err.to_string())
    }
}

/// Opaque rejection handed to untrusted callers.
///
/// Carries no detail about which check failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unauthorized")]
pub struct Unauthorized;

impl From<ValidationError> for Unauthorized {
    fn from(_: ValidationError) -> Self {
        Unauthorized
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn malformed_classification() {
        assert!(ValidationError::MalformedFormat.is_malformed());
        assert!(ValidationError::MalformedEncoding.is_malformed());
        assert!(ValidationError::MalformedClaims.is_malformed());
        assert!(!ValidationError::InvalidSignature.is_malformed());
        assert!(!ValidationError::expired(0).is_malformed());
    }

    #[test]
    fn unauthorized_hides_reason() {
        let err: Unauthorized = ValidationError::InvalidIssuer.into();
        assert_eq!(err.to_string(), "unauthorized");
    }

    #[test]
    fn temporal_errors_report_bound() {
        assert_eq!(
            ValidationError::expired(42).to_string(),
            "token expired at 42"
        );
        assert_eq!(
            ValidationError::not_yet_valid(7).to_string(),
            "token not valid before 7"
        );
    }
}
