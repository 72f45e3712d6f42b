//! Semantic checks applied to an authenticated claim set.
//!
//! These run only after the signature has been verified. Order matters:
//! issuer, then audience, then the validity window.

use crate::claims::ClaimSet;
use crate::error::{ValidationError, ValidationResult};

/// Identity a claim set must assert to be accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expectations<'a> {
    /// Expected `iss`
    pub issuer: &'a str,
    /// Expected `aud`
    pub audience: &'a str,
}

impl Expectations<'_> {
    /// Check issuer, audience and the validity window at `now`
    ///
    /// # Errors
    /// Returns the first failing check, in the order issuer, audience,
    /// not-before, expiry.
    pub fn check(&self, claims: &ClaimSet, now: i64) -> ValidationResult<()> {
        self.check_identity(claims)?;
        check_window(claims, now)
    }

    /// Check `iss` then `aud`
    ///
    /// # Errors
    /// Returns [`ValidationError::InvalidIssuer`] or
    /// [`ValidationError::InvalidAudience`].
    pub fn check_identity(&self, claims: &ClaimSet) -> ValidationResult<()> {
        if claims.iss != self.issuer {
            return Err(ValidationError::InvalidIssuer);
        }
        if claims.aud != self.audience {
            return Err(ValidationError::InvalidAudience);
        }
        Ok(())
    }
}

/// Check `nbf <= now <= exp`.
///
/// Both bounds are checked independently; an inverted window (`nbf > exp`)
/// is never accepted.
///
/// # Errors
/// Returns [`ValidationError::NotYetValid`] or [`ValidationError::Expired`].
pub fn check_window(claims: &ClaimSet, now: i64) -> ValidationResult<()> {
    if now < claims.nbf {
        return Err(ValidationError::not_yet_valid(claims.nbf));
    }
    if now > claims.exp {
        return Err(ValidationError::expired(claims.exp));
    }
    Ok(())
}
