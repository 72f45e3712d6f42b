//! HS256 bearer token issuance and validation
//!
//! A [`TokenProvider`] owns one secret, issuer and audience and exposes two
//! operations:
//! - [`TokenProvider::issue`] mints a signed `header.claims.signature`
//!   token asserting a subject for one hour
//! - [`TokenProvider::validate`] checks a `Bearer <token>` credential for
//!   format, signature, issuer, audience and validity window
//!
//! ```
//! use bearer_jwt::{ProviderConfig, TokenProvider, ValidationError};
//!
//! let config = ProviderConfig::new("testing_secret", "Foo", "Foo")?;
//! let provider = TokenProvider::new(config);
//!
//! let token = provider.issue("alice");
//! let claims = provider.validate(&format!("Bearer {token}"))?;
//! assert_eq!(claims.subject(), "alice");
//!
//! let other = TokenProvider::new(ProviderConfig::new("testing_secret", "Bar", "Foo")?);
//! assert_eq!(
//!     other.validate(&format!("Bearer {token}")),
//!     Err(ValidationError::InvalidIssuer)
//! );
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod claims;
pub mod codec;
pub mod config;
pub mod crypto;
mod error;
mod provider;
pub mod serializer;
pub mod traits;
mod types;
pub mod validation;

pub use claims::{ClaimSet, ClaimSetBuilder, DEFAULT_LIFETIME_SECS, ROLE_EVERYONE};
pub use self::config::ProviderConfig;
pub use error::*;
pub use provider::{BEARER_PREFIX, TokenProvider};
pub use traits::{Clock, FixedClock, SystemClock, TokenIdSource, UuidV4Source};
pub use types::*;
