//! Session tokens for the admin API
//!
//! Tokens are stateless and server-verifiable: `issued_ms.nonce.sig` where
//! `sig = SHA-256(secret || '.' || issued_ms || '.' || nonce)`. A token is
//! valid for eight hours from issuance.

use rand::RngCore;
use sha2::{Digest, Sha256};

/// Session validity window: 8 hours
pub const SESSION_TTL_MS: i64 = 8 * 60 * 60 * 1000;

/// Generate a fresh signing secret
pub fn generate_secret() -> [u8; 32] {
    let mut secret = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut secret);
    secret
}

/// Check a candidate password against the configured one.
///
/// Both sides are hashed first so the byte comparison runs over fixed-length
/// digests rather than the raw inputs.
pub fn verify_password(candidate: &str, configured: &str) -> bool {
    let a: [u8; 32] = Sha256::digest(candidate.as_bytes()).into();
    let b: [u8; 32] = Sha256::digest(configured.as_bytes()).into();
    a == b
}

/// Issue a signed token carrying the given issue timestamp (unix millis)
pub fn issue_token(secret: &[u8; 32], issued_ms: i64) -> String {
    let mut nonce = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut nonce);
    let nonce = hex(&nonce);

    let sig = sign(secret, issued_ms, &nonce);
    format!("{}.{}.{}", issued_ms, nonce, sig)
}

/// Verify a token's signature and that `now_ms` falls inside its window
pub fn verify_token(secret: &[u8; 32], token: &str, now_ms: i64) -> bool {
    let mut parts = token.splitn(3, '.');
    let (Some(issued), Some(nonce), Some(sig)) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    let Ok(issued_ms) = issued.parse::<i64>() else {
        return false;
    };

    let expected = sign(secret, issued_ms, nonce);
    if sig != expected {
        return false;
    }

    let age = now_ms - issued_ms;
    (0..=SESSION_TTL_MS).contains(&age)
}

fn sign(secret: &[u8; 32], issued_ms: i64, nonce: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(secret);
    hasher.update(b".");
    hasher.update(issued_ms.to_string().as_bytes());
    hasher.update(b".");
    hasher.update(nonce.as_bytes());
    hex(hasher.finalize().as_slice())
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_password() {
        assert!(verify_password("hunter2", "hunter2"));
        assert!(!verify_password("hunter2", "hunter3"));
        assert!(!verify_password("", "hunter2"));
    }

    #[test]
    fn test_token_roundtrip() {
        let secret = generate_secret();
        let token = issue_token(&secret, 1_000_000);
        assert!(verify_token(&secret, &token, 1_000_000));
        assert!(verify_token(&secret, &token, 1_000_000 + SESSION_TTL_MS));
    }

    #[test]
    fn test_token_expires_after_eight_hours() {
        let secret = generate_secret();
        let token = issue_token(&secret, 1_000_000);
        assert!(!verify_token(&secret, &token, 1_000_000 + SESSION_TTL_MS + 1));
    }

    #[test]
    fn test_token_from_the_future_is_rejected() {
        let secret = generate_secret();
        let token = issue_token(&secret, 2_000_000);
        assert!(!verify_token(&secret, &token, 1_000_000));
    }

    #[test]
    fn test_tampered_token_is_rejected() {
        let secret = generate_secret();
        let token = issue_token(&secret, 1_000_000);
        let tampered = token.replacen('.', ".0", 1);
        assert!(!verify_token(&secret, &tampered, 1_000_000));
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = issue_token(&generate_secret(), 1_000_000);
        assert!(!verify_token(&generate_secret(), &token, 1_000_000));
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        let secret = generate_secret();
        assert!(!verify_token(&secret, "", 0));
        assert!(!verify_token(&secret, "not-a-token", 0));
        assert!(!verify_token(&secret, "1.2", 0));
    }
}
