//! Authenticated payload encryption (AES-128-GCM with padding prefix).

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes128Gcm, Nonce};

use crate::constants::PAD_PREFIX_LENGTH;
use crate::error::{Result, WebPushError};

/// Pad and seal a plaintext record.
///
/// The record is a big-endian 2-byte padding length, `padding` zero bytes,
/// then the plaintext; AES-128-GCM appends its 16-byte tag. Padding
/// obscures the true message size from the push service — zero is the
/// minimal, non-obscuring form.
///
/// `key` must be 16 bytes and `nonce` 12; the derivation chain guarantees
/// both.
pub fn seal(plaintext: &[u8], padding: usize, key: &[u8], nonce: &[u8]) -> Result<Vec<u8>> {
    let mut record = Vec::with_capacity(PAD_PREFIX_LENGTH + padding + plaintext.len());
    record.extend_from_slice(&(padding as u16).to_be_bytes());
    record.resize(PAD_PREFIX_LENGTH + padding, 0);
    record.extend_from_slice(plaintext);

    let cipher = Aes128Gcm::new_from_slice(key).expect("valid key length");
    cipher
        .encrypt(Nonce::from_slice(nonce), record.as_ref())
        .map_err(|_| WebPushError::Encryption)
}
