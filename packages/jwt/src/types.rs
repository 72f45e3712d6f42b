//! Token header

use serde::{Deserialize, Serialize};

/// Signing algorithm written into every header
pub const ALGORITHM: &str = "HS256";

/// Token type written into every header
pub const TOKEN_TYPE: &str = "JWT";

/// Token header.
///
/// Always `{"alg":"HS256","typ":"JWT"}`; it exists only because it is part
/// of the wire format and is covered by the signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    /// Signing algorithm
    pub alg: String,
    /// Token type
    pub typ: String,
}

impl Header {
    /// The fixed HS256 header
    #[must_use]
    pub fn hs256() -> Self {
        Self {
            alg: ALGORITHM.to_string(),
            typ: TOKEN_TYPE.to_string(),
        }
    }
}

impl Default for Header {
    fn default() -> Self {
        Self::hs256()
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn serializes_exactly() {
        let json = serde_json::to_string(&Header::hs256()).unwrap();
        assert_eq!(json, r#"{"alg":"HS256","typ":"JWT"}"#);
    }
}
