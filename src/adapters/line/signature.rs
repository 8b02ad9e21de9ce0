//! LINE webhook signature verification.
//!
//! LINE signs each webhook delivery with HMAC-SHA256 over the raw request
//! body, keyed by the channel secret, and sends the base64-encoded digest
//! in the `X-Line-Signature` header.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Verifies a webhook delivery against its signature header.
///
/// Comparison is constant-time over the encoded digests.
pub fn validate_signature(channel_secret: &str, body: &[u8], signature: &str) -> bool {
    let mut mac = match HmacSha256::new_from_slice(channel_secret.as_bytes()) {
        Ok(mac) => mac,
        // HMAC accepts any key length; unreachable in practice.
        Err(_) => return false,
    };
    mac.update(body);

    let expected = STANDARD.encode(mac.finalize().into_bytes());
    expected.as_bytes().ct_eq(signature.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sign(secret: &str, body: &[u8]) -> String {
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(body);
        STANDARD.encode(mac.finalize().into_bytes())
    }

    #[test]
    fn valid_signature_is_accepted() {
        let body = br#"{"events":[]}"#;
        let signature = sign("secret", body);
        assert!(validate_signature("secret", body, &signature));
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let body = br#"{"events":[]}"#;
        let signature = sign("other-secret", body);
        assert!(!validate_signature("secret", body, &signature));
    }

    #[test]
    fn tampered_body_is_rejected() {
        let signature = sign("secret", br#"{"events":[]}"#);
        assert!(!validate_signature(
            "secret",
            br#"{"events":[{}]}"#,
            &signature
        ));
    }

    #[test]
    fn malformed_header_is_rejected() {
        assert!(!validate_signature("secret", b"body", "not-base64!!"));
    }
}
