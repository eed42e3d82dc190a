//! Content hashing for stored strings.
//!
//! The SHA-256 hex digest of a value doubles as its identifier in the record
//! store, so two submissions of the same text always collide.
//!
//! ```text
//! SHA-256(value_utf8_bytes) -> lowercase hex
//! ```

use sha2::{Digest, Sha256};

/// Hash text with SHA-256 and return a lowercase hex digest.
///
/// # Examples
///
/// ```rust
/// use analysis::sha256_hex;
///
/// let hash = sha256_hex("racecar");
/// assert_eq!(hash.len(), 64);
/// assert_eq!(hash, sha256_hex("racecar"));
/// assert_ne!(hash, sha256_hex("Racecar"));
/// ```
pub fn sha256_hex(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hex::encode(hasher.finalize())
}
