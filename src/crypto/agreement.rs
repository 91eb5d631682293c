//! Ephemeral ECDH key agreement on P-256.
//!
//! Every encrypted message gets its own server key pair; nothing here is
//! cached or reused. The shared secret feeds the derivation chain in
//! [`kdf`](super::kdf).

use p256::ecdh::EphemeralSecret;
use p256::elliptic_curve::rand_core::OsRng;
use p256::{EncodedPoint, PublicKey};

use crate::constants::PUBLIC_KEY_LENGTH;
use crate::error::{Result, WebPushError};

/// One message's server-side key pair.
///
/// The private half never leaves this struct; the public half travels to
/// the browser in the `Crypto-Key: dh=` header as a 65-byte uncompressed
/// SEC1 point.
pub struct ServerKeys {
    secret: EphemeralSecret,
    public: EncodedPoint,
}

impl std::fmt::Debug for ServerKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerKeys")
            .field("public", &self.public)
            .finish_non_exhaustive()
    }
}

impl ServerKeys {
    /// Generate a fresh ephemeral key pair.
    pub fn generate() -> Self {
        let secret = EphemeralSecret::random(&mut OsRng);
        let public = EncodedPoint::from(PublicKey::from(&secret));
        Self { secret, public }
    }

    /// Uncompressed public key bytes (65 bytes, leading `0x04`).
    pub fn public_key_bytes(&self) -> &[u8] {
        self.public.as_bytes()
    }

    /// ECDH against the subscription's public key.
    ///
    /// Rejects anything that is not a 65-byte uncompressed point on the
    /// curve — a corrupt `p256dh` must fail here rather than silently
    /// derive garbage keys.
    pub fn shared_secret(&self, client_public: &[u8]) -> Result<Vec<u8>> {
        if client_public.len() != PUBLIC_KEY_LENGTH {
            return Err(WebPushError::InvalidClientKey);
        }
        let peer =
            PublicKey::from_sec1_bytes(client_public).map_err(|_| WebPushError::InvalidClientKey)?;
        let shared = self.secret.diffie_hellman(&peer);
        Ok(shared.raw_secret_bytes().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_public_key_is_uncompressed_point() {
        let keys = ServerKeys::generate();
        let public = keys.public_key_bytes();
        assert_eq!(public.len(), 65);
        assert_eq!(public[0], 0x04);
    }

    #[test]
    fn test_key_pairs_are_fresh_per_generate() {
        let a = ServerKeys::generate();
        let b = ServerKeys::generate();
        assert_ne!(a.public_key_bytes(), b.public_key_bytes());
    }

    #[test]
    fn test_shared_secret_agrees_between_parties() {
        let a = ServerKeys::generate();
        let b = ServerKeys::generate();

        let ab = a.shared_secret(b.public_key_bytes()).expect("valid peer");
        let ba = b.shared_secret(a.public_key_bytes()).expect("valid peer");
        assert_eq!(ab, ba);
        assert_eq!(ab.len(), 32);
    }

    #[test]
    fn test_rejects_wrong_length_peer_key() {
        let keys = ServerKeys::generate();
        assert!(matches!(
            keys.shared_secret(&[0x04; 33]),
            Err(WebPushError::InvalidClientKey)
        ));
        assert!(matches!(
            keys.shared_secret(&[]),
            Err(WebPushError::InvalidClientKey)
        ));
    }

    #[test]
    fn test_rejects_point_not_on_curve() {
        let keys = ServerKeys::generate();
        // Right length and prefix, but x/y are not a curve point.
        let mut bogus = vec![0x04u8];
        bogus.extend_from_slice(&[0xFF; 64]);
        assert!(matches!(
            keys.shared_secret(&bogus),
            Err(WebPushError::InvalidClientKey)
        ));
    }
}
