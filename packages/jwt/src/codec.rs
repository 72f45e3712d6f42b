//! Unpadded base64url codec (RFC 4648 §5, no `=` padding)
//!
//! Decoding is strict: padding characters, bytes outside the URL-safe
//! alphabet, impossible lengths and non-zero trailing bits are all
//! rejected, so every accepted segment has exactly one encoding.

use crate::error::{ValidationError, ValidationResult};
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};

/// Encode bytes as unpadded base64url text
#[inline]
#[must_use]
pub fn encode(input: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(input)
}

/// Decode unpadded base64url text
///
/// # Errors
/// Returns [`ValidationError::MalformedEncoding`] if `input` is not
/// canonical unpadded base64url.
#[inline]
pub fn decode(input: &str) -> ValidationResult<Vec<u8>> {
    URL_SAFE_NO_PAD.decode(input).map_err(|err| {
        tracing::trace!(error = %err, "rejected base64url segment");
        ValidationError::MalformedEncoding
    })
}
