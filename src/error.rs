//! Error types for encryption and delivery.

use thiserror::Error;

/// Errors surfaced by the encryption pipeline and the push sender.
///
/// Validation variants are detected synchronously before any I/O and are
/// never retried: they mean the caller handed over a structurally invalid
/// subscription or message. [`WebPushError::Transport`] wraps the HTTP
/// client error unchanged. An expired subscription is not an error — see
/// [`DeliveryOutcome::Expired`](crate::sender::DeliveryOutcome).
#[derive(Error, Debug)]
pub enum WebPushError {
    /// No message body was supplied.
    #[error("no message body to encrypt")]
    MissingMessage,

    /// Message plus requested padding exceeds what a push service accepts.
    #[error("payload too large: max {max} bytes, message is {actual} bytes with {padding} bytes of padding")]
    PayloadTooLarge {
        /// Maximum message-plus-padding bytes per push.
        max: usize,
        /// Actual message length.
        actual: usize,
        /// Requested padding length.
        padding: usize,
    },

    /// Subscription is missing its `p256dh` or `auth` key material.
    #[error("subscription has no encryption keys (p256dh and auth are required)")]
    MissingEncryptionKeys,

    /// The `auth` secret decoded to the wrong length.
    #[error("auth secret must be 16 bytes, got {0}")]
    InvalidAuthSecretLength(usize),

    /// The `p256dh` key is not a valid 65-byte uncompressed P-256 point.
    #[error("p256dh is not a valid uncompressed P-256 public key")]
    InvalidClientKey,

    /// A public key fed to the context builder had the wrong length.
    #[error("public key must be 65 bytes, got {0}")]
    InvalidKeyLength(usize),

    /// The key-agreement context had the wrong length.
    #[error("key context must be 135 bytes, got {0}")]
    InvalidContextLength(usize),

    /// More bytes were requested than one HKDF round can produce.
    #[error("cannot derive {0} bytes: single-round HKDF yields at most 32")]
    InvalidOutputLength(usize),

    /// Subscription key material was not valid base64url.
    #[error("subscription key is not valid base64url: {0}")]
    KeyDecode(#[from] base64::DecodeError),

    /// AES-GCM sealing failed.
    #[error("payload encryption failed")]
    Encryption,

    /// Subscription has no endpoint to deliver to.
    #[error("subscription has no endpoint")]
    MissingEndpoint,

    /// A legacy GCM endpoint needs an API key and none was registered.
    #[error("no auth token registered for GCM endpoint")]
    MissingAuthToken,

    /// The HTTP request itself failed (connect, TLS, read).
    #[error("push delivery failed: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Result type for encryption and delivery operations.
pub type Result<T> = std::result::Result<T, WebPushError>;
