//! Payload checksums.

use sha2::{Digest, Sha256};

/// Hex-encoded SHA-256 of `bytes`.
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// True when `bytes` hash to `expected_hash`.
pub fn verify_sha256(bytes: &[u8], expected_hash: &str) -> bool {
    sha256_hex(bytes).eq_ignore_ascii_case(expected_hash)
}
