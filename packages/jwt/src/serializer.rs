//! Three-segment token format: `header.claims.signature`

use crate::codec;
use crate::error::{ValidationError, ValidationResult};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Segment separator
pub const SEPARATOR: char = '.';

/// Borrowed view of the three segments of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segments<'a> {
    /// Encoded header
    pub header: &'a str,
    /// Encoded claim set
    pub claims: &'a str,
    /// Encoded signature
    pub signature: &'a str,
    signing_input: &'a str,
}

impl<'a> Segments<'a> {
    /// The `header.claims` text the signature covers, borrowed from the token
    #[must_use]
    pub fn signing_input(&self) -> &'a str {
        self.signing_input
    }
}

/// Join encoded segments into a token
#[must_use]
pub fn assemble(header: &str, claims: &str, signature: &str) -> String {
    let mut token = String::with_capacity(header.len() + claims.len() + signature.len() + 2);
    token.push_str(header);
    token.push(SEPARATOR);
    token.push_str(claims);
    token.push(SEPARATOR);
    token.push_str(signature);
    token
}

/// Text covered by the signature
#[must_use]
pub fn signing_input(header: &str, claims: &str) -> String {
    format!("{header}{SEPARATOR}{claims}")
}

/// Split a token into exactly three non-empty segments
///
/// # Errors
/// Returns [`ValidationError::MalformedFormat`] for any other shape.
pub fn split(token: &str) -> ValidationResult<Segments<'_>> {
    let mut parts = token.split(SEPARATOR);
    let (Some(header), Some(claims), Some(signature), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(ValidationError::MalformedFormat);
    };
    if header.is_empty() || claims.is_empty() || signature.is_empty() {
        return Err(ValidationError::MalformedFormat);
    }
    let signing_input = token
        .get(..header.len() + 1 + claims.len())
        .ok_or(ValidationError::MalformedFormat)?;
    Ok(Segments {
        header,
        claims,
        signature,
        signing_input,
    })
}

/// Serialize a value to JSON and encode it as a segment
///
/// Headers and claim sets are plain strings and integers, which
/// `serde_json` always serializes.
pub(crate) fn encode_segment<T: Serialize>(value: &T) -> String {
    let json = serde_json::to_vec(value).unwrap_or_else(|err| {
        tracing::error!(error = %err, "segment serialization failed");
        Vec::new()
    });
    codec::encode(&json)
}

/// Decode a segment and parse it as JSON
///
/// # Errors
/// Returns [`ValidationError::MalformedClaims`] if either step fails.
pub(crate) fn decode_segment<T: DeserializeOwned>(segment: &str) -> ValidationResult<T> {
    let json = codec::decode(segment).map_err(|_| ValidationError::MalformedClaims)?;
    serde_json::from_slice(&json).map_err(|err| {
        tracing::trace!(error = %err, "rejected claims segment");
        ValidationError::MalformedClaims
    })
}
