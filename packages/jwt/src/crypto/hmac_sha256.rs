//! HMAC-SHA256 signing and constant-time verification

use hmac::digest::Key;
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

type HmacSha256 = Hmac<Sha256>;

/// Length of an HS256 signature in bytes
pub const SIGNATURE_LEN: usize = 32;

/// SHA-256 block size; HMAC keys are normalised to exactly one block
const BLOCK_LEN: usize = 64;

/// HMAC key prepared once from the configured secret.
///
/// Secrets longer than one block are hashed and shorter ones are
/// zero-padded, exactly as HMAC itself does (RFC 2104 §2), so keying the
/// MAC never fails. The block is wiped on drop.
#[derive(Clone)]
pub struct SigningKey {
    block: Zeroizing<[u8; BLOCK_LEN]>,
}

impl SigningKey {
    /// Prepare a signing key from raw secret bytes
    #[must_use]
    pub fn new(secret: &[u8]) -> Self {
        let mut block = Zeroizing::new([0u8; BLOCK_LEN]);
        if secret.len() > BLOCK_LEN {
            let digest = Sha256::digest(secret);
            block[..digest.len()].copy_from_slice(&digest);
        } else {
            block[..secret.len()].copy_from_slice(secret);
        }
        Self { block }
    }

    fn mac(&self) -> HmacSha256 {
        <HmacSha256 as Mac>::new(Key::<HmacSha256>::from_slice(&self.block[..]))
    }

    /// HMAC-SHA256 of `message`
    #[inline]
    #[must_use]
    pub fn sign(&self, message: &[u8]) -> [u8; SIGNATURE_LEN] {
        let mut mac = self.mac();
        mac.update(message);
        let mut out = [0u8; SIGNATURE_LEN];
        out.copy_from_slice(&mac.finalize().into_bytes());
        out
    }

    /// Recompute the signature of `message` and compare it with `signature`
    /// in constant time
    #[inline]
    #[must_use]
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> bool {
        let expected = self.sign(message);
        expected[..].ct_eq(signature).into()
    }
}

impl std::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SigningKey([REDACTED])")
    }
}

/// One-shot HMAC-SHA256 of `message` under `key`
#[must_use]
pub fn sign(message: &[u8], key: &[u8]) -> [u8; SIGNATURE_LEN] {
    SigningKey::new(key).sign(message)
}

/// One-shot constant-time verification of an HMAC-SHA256 signature
#[must_use]
pub fn verify(message: &[u8], signature: &[u8], key: &[u8]) -> bool {
    SigningKey::new(key).verify(message, signature)
}
