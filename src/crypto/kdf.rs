//! Key derivation for the aesgcm content encoding.
//!
//! A deliberately restricted HKDF-SHA-256: extract, then a single expand
//! round. That caps the output at 32 bytes, which covers every derivation
//! the scheme needs (32-byte PRK, 16-byte content key, 12-byte nonce).
//! The context and info byte strings bind the derived keys to the exact
//! pair of public keys in this key agreement, so a key derived for one
//! session can never decrypt another.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::constants::{CONTEXT_LENGTH, PUBLIC_KEY_LENGTH, SHA256_LENGTH};
use crate::error::{Result, WebPushError};

type HmacSha256 = Hmac<Sha256>;

/// Info string for deriving the PRK from the auth secret.
pub const AUTH_INFO: &[u8] = b"Content-Encoding: auth\0";

fn hmac_sha256(key: &[u8], parts: &[&[u8]]) -> Vec<u8> {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC accepts any key size");
    for part in parts {
        mac.update(part);
    }
    mac.finalize().into_bytes().to_vec()
}

/// HMAC-based extract-and-expand key derivation, single-round form.
///
/// Extract: `PRK = HMAC-SHA-256(salt, ikm)`. Expand: the first block
/// `T(1) = HMAC-SHA-256(PRK, info || 0x01)`, truncated to `length`.
/// Deterministic — identical inputs yield identical bytes.
pub fn hkdf(salt: &[u8], ikm: &[u8], info: &[u8], length: usize) -> Result<Vec<u8>> {
    if length > SHA256_LENGTH {
        return Err(WebPushError::InvalidOutputLength(length));
    }

    let prk = hmac_sha256(salt, &[ikm]);
    let mut okm = hmac_sha256(&prk, &[info, &[0x01]]);
    okm.truncate(length);
    Ok(okm)
}

/// Serialize the two public keys into the 135-byte key-agreement context.
///
/// Layout: `0x00 || u16_be(65) || client key || u16_be(65) || server key`.
/// Key size is fixed by the curve, so anything but 65 bytes is a caller
/// bug surfaced as [`WebPushError::InvalidKeyLength`].
pub fn build_context(client_public: &[u8], server_public: &[u8]) -> Result<Vec<u8>> {
    let mut context = Vec::with_capacity(CONTEXT_LENGTH);
    context.push(0);
    for key in [client_public, server_public] {
        if key.len() != PUBLIC_KEY_LENGTH {
            return Err(WebPushError::InvalidKeyLength(key.len()));
        }
        context.extend_from_slice(&(PUBLIC_KEY_LENGTH as u16).to_be_bytes());
        context.extend_from_slice(key);
    }
    Ok(context)
}

/// Build the expand-phase info string for a derivation label.
///
/// `"Content-Encoding: " || label || 0x00 || "P-256" || context`, where
/// `label` is `"aesgcm"` for the content key and `"nonce"` for the nonce.
pub fn build_info(label: &str, context: &[u8]) -> Result<Vec<u8>> {
    if context.len() != CONTEXT_LENGTH {
        return Err(WebPushError::InvalidContextLength(context.len()));
    }

    let mut info = Vec::with_capacity(18 + label.len() + 6 + CONTEXT_LENGTH);
    info.extend_from_slice(b"Content-Encoding: ");
    info.extend_from_slice(label.as_bytes());
    info.push(0);
    info.extend_from_slice(b"P-256");
    info.extend_from_slice(context);
    Ok(info)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hkdf::Hkdf;

    #[test]
    fn test_hkdf_matches_rfc5869_test_case_1() {
        // RFC 5869 appendix A.1, truncated to one expand round (first 32
        // of the 42 OKM bytes).
        let ikm = [0x0b; 22];
        let salt: Vec<u8> = (0x00..=0x0c).collect();
        let info: Vec<u8> = (0xf0..=0xf9).collect();
        let expected = [
            0x3c, 0xb2, 0x5f, 0x25, 0xfa, 0xac, 0xd5, 0x7a, 0x90, 0x43, 0x4f, 0x64, 0xd0, 0x36,
            0x2f, 0x2a, 0x2d, 0x2d, 0x0a, 0x90, 0xcf, 0x1a, 0x5a, 0x4c, 0x5d, 0xb0, 0x2d, 0x56,
            0xec, 0xc4, 0xc5, 0xbf,
        ];

        let okm = hkdf(&salt, &ikm, &info, 32).expect("within one round");
        assert_eq!(okm, expected);
    }

    #[test]
    fn test_hkdf_matches_reference_implementation() {
        let salt = [0x11; 16];
        let ikm = [0x22; 32];
        let info = b"some application info";

        for length in [12, 16, 32] {
            let ours = hkdf(&salt, &ikm, info, length).expect("valid length");

            let reference = Hkdf::<Sha256>::new(Some(&salt), &ikm);
            let mut expected = vec![0u8; length];
            reference.expand(info, &mut expected).expect("valid length");

            assert_eq!(ours, expected, "length {length}");
        }
    }

    #[test]
    fn test_hkdf_is_deterministic() {
        let a = hkdf(b"salt", b"ikm", b"info", 16).expect("valid");
        let b = hkdf(b"salt", b"ikm", b"info", 16).expect("valid");
        assert_eq!(a, b);
    }

    #[test]
    fn test_hkdf_rejects_more_than_one_round() {
        assert!(matches!(
            hkdf(b"salt", b"ikm", b"info", 33),
            Err(WebPushError::InvalidOutputLength(33))
        ));
    }

    #[test]
    fn test_context_layout() {
        let client = [0xAA; 65];
        let server = [0xBB; 65];
        let context = build_context(&client, &server).expect("valid keys");

        assert_eq!(context.len(), CONTEXT_LENGTH);
        assert_eq!(context[0], 0);
        assert_eq!(&context[1..3], &[0, 65]);
        assert_eq!(&context[3..68], &client);
        assert_eq!(&context[68..70], &[0, 65]);
        assert_eq!(&context[70..135], &server);
    }

    #[test]
    fn test_context_rejects_wrong_key_length() {
        assert!(matches!(
            build_context(&[0xAA; 64], &[0xBB; 65]),
            Err(WebPushError::InvalidKeyLength(64))
        ));
        assert!(matches!(
            build_context(&[0xAA; 65], &[0xBB; 66]),
            Err(WebPushError::InvalidKeyLength(66))
        ));
    }

    #[test]
    fn test_info_layout() {
        let context = build_context(&[0xAA; 65], &[0xBB; 65]).expect("valid keys");
        let info = build_info("aesgcm", &context).expect("valid context");

        assert!(info.starts_with(b"Content-Encoding: aesgcm\0P-256"));
        assert_eq!(info.len(), 18 + 6 + 1 + 5 + CONTEXT_LENGTH);
        assert_eq!(&info[info.len() - CONTEXT_LENGTH..], &context[..]);
    }

    #[test]
    fn test_info_rejects_wrong_context_length() {
        assert!(matches!(
            build_info("nonce", &[0u8; 134]),
            Err(WebPushError::InvalidContextLength(134))
        ));
    }

    #[test]
    fn test_auth_info_constant() {
        assert_eq!(AUTH_INFO, b"Content-Encoding: auth\0");
    }
}
