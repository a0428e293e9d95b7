//! Constant-time digest comparison.

use ring::hmac;
use ring::rand::SystemRandom;
use tracing::warn;

/// Compare two digests in constant time.
///
/// Both sides are MACed under a fresh random key and the tags are checked
/// with `ring`'s constant-time verification, so the running time does not
/// depend on where the inputs first differ. Comparison is exact and
/// case-sensitive.
pub fn digests_match(expected: &str, candidate: &str) -> bool {
    let rng = SystemRandom::new();
    let key = match hmac::Key::generate(hmac::HMAC_SHA256, &rng) {
        Ok(key) => key,
        Err(_) => {
            warn!("Failed to generate comparison key, treating digests as different");
            return false;
        }
    };

    let tag = hmac::sign(&key, expected.as_bytes());
    hmac::verify(&key, candidate.as_bytes(), tag.as_ref()).is_ok()
}
