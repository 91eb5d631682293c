//! The aesgcm payload encryption pipeline.
//!
//! Turns a plaintext message plus a browser subscription into the
//! ciphertext, salt, and ephemeral public key a push service needs.
//!
//! # Flow
//!
//! ```text
//! message + subscription keys
//!     ↓
//! ephemeral P-256 keypair → ECDH shared secret       (agreement)
//!     ↓
//! PRK → content key + nonce via restricted HKDF      (kdf)
//!     ↓
//! pad + AES-128-GCM seal                             (cipher)
//!     ↓
//! EncryptionResult { ciphertext, salt, server_public_key }
//! ```
//!
//! Everything here is synchronous and CPU-bound; the only side effect is
//! drawing the salt and the ephemeral key from the OS random source, so
//! independent calls may run concurrently without shared state.

pub mod agreement;
pub mod cipher;
pub mod kdf;

use p256::elliptic_curve::rand_core::{OsRng, RngCore};

use crate::constants::{CONTENT_KEY_LENGTH, MAX_PAYLOAD_LENGTH, NONCE_LENGTH, SALT_LENGTH, SHA256_LENGTH};
use crate::error::{Result, WebPushError};
use crate::subscription::Subscription;

pub use agreement::ServerKeys;

/// Output of one [`encrypt`] call.
///
/// Salt and ephemeral key pair are fresh on every call and must never be
/// reused across messages — reuse breaks the security of the scheme.
#[derive(Clone, Debug)]
pub struct EncryptionResult {
    /// Sealed record: padding prefix, padding, plaintext, 16-byte tag.
    pub ciphertext: Vec<u8>,
    /// Random salt the content key and nonce were derived under.
    pub salt: [u8; SALT_LENGTH],
    /// Ephemeral server public key (65-byte uncompressed point).
    pub server_public_key: Vec<u8>,
}

/// Encrypt a message for a subscription with no extra padding.
pub fn encrypt(message: &[u8], subscription: &Subscription) -> Result<EncryptionResult> {
    encrypt_with_padding(message, subscription, 0)
}

/// Encrypt a message for a subscription, padding the record by `padding`
/// extra zero bytes to obscure the message length.
///
/// Validation is fail-fast, first failing check wins:
/// 1. empty message;
/// 2. message plus padding over the payload ceiling;
/// 3. missing key material;
/// 4. auth secret of the wrong size;
/// 5. `p256dh` that is not a valid uncompressed P-256 point.
pub fn encrypt_with_padding(
    message: &[u8],
    subscription: &Subscription,
    padding: usize,
) -> Result<EncryptionResult> {
    if message.is_empty() {
        return Err(WebPushError::MissingMessage);
    }
    if message.len() + padding > MAX_PAYLOAD_LENGTH {
        return Err(WebPushError::PayloadTooLarge {
            max: MAX_PAYLOAD_LENGTH,
            actual: message.len(),
            padding,
        });
    }
    if !subscription.keys.is_complete() {
        return Err(WebPushError::MissingEncryptionKeys);
    }
    let auth_secret = subscription.keys.auth_secret()?;
    let client_public = subscription.keys.client_public_key()?;

    let server = ServerKeys::generate();
    let shared_secret = server.shared_secret(&client_public)?;

    let mut salt = [0u8; SALT_LENGTH];
    OsRng.fill_bytes(&mut salt);

    let prk = kdf::hkdf(&auth_secret, &shared_secret, kdf::AUTH_INFO, SHA256_LENGTH)?;
    let context = kdf::build_context(&client_public, server.public_key_bytes())?;
    let content_key = kdf::hkdf(
        &salt,
        &prk,
        &kdf::build_info("aesgcm", &context)?,
        CONTENT_KEY_LENGTH,
    )?;
    let nonce = kdf::hkdf(&salt, &prk, &kdf::build_info("nonce", &context)?, NONCE_LENGTH)?;

    let ciphertext = cipher::seal(message, padding, &content_key, &nonce)?;

    log::debug!(
        "[WebPush] encrypted {} byte message into {} byte record",
        message.len(),
        ciphertext.len()
    );

    Ok(EncryptionResult {
        ciphertext,
        salt,
        server_public_key: server.public_key_bytes().to_vec(),
    })
}
