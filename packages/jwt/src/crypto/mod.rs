//! Token signing primitives

pub mod hmac_sha256;

pub use hmac_sha256::{SIGNATURE_LEN, SigningKey, sign, verify};
