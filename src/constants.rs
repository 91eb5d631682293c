//! Protocol constants for aesgcm Web Push encryption and delivery.
//!
//! This module centralizes the byte layouts and limits of the aesgcm
//! content encoding so the sizes the derivation chain depends on live in
//! one place. Constants are grouped by domain.
//!
//! # Categories
//!
//! - **Key material**: elliptic-curve and secret sizes
//! - **Derivation**: context/info layout and derived-key sizes
//! - **Payload**: padding prefix, tag, and payload ceiling
//! - **Delivery**: legacy gateway URLs and TTL

// ============================================================================
// Key material
// ============================================================================

/// Uncompressed P-256 public key length (`0x04 || x || y`).
///
/// Both the subscription's `p256dh` key and the ephemeral server key are
/// exchanged in this form; every context layout below assumes it.
pub const PUBLIC_KEY_LENGTH: usize = 65;

/// Subscription auth secret length.
///
/// Browsers generate exactly 16 random bytes for `keys.auth`; anything
/// else means the subscription is corrupt.
pub const AUTH_SECRET_LENGTH: usize = 16;

/// Salt length for content-key derivation. Freshly drawn per message.
pub const SALT_LENGTH: usize = 16;

// ============================================================================
// Key derivation
// ============================================================================

/// Length of the key-agreement context string.
///
/// `0x00` + two length-prefixed 65-byte public keys: 1 + (2 + 65) * 2.
pub const CONTEXT_LENGTH: usize = 135;

/// HMAC-SHA-256 output length; also the ceiling of the restricted HKDF.
pub const SHA256_LENGTH: usize = 32;

/// Derived AES-128-GCM content encryption key length.
pub const CONTENT_KEY_LENGTH: usize = 16;

/// Derived AES-GCM nonce length (96 bits).
pub const NONCE_LENGTH: usize = 12;

// ============================================================================
// Payload
// ============================================================================

/// Padding-length prefix prepended to every plaintext record.
pub const PAD_PREFIX_LENGTH: usize = 2;

/// GCM authentication tag appended to every ciphertext.
pub const TAG_LENGTH: usize = 16;

/// Maximum message bytes plus explicit padding per push.
///
/// Push services cap the encrypted record at 4096 bytes; subtracting the
/// 16-byte tag and the 2-byte padding prefix leaves 4078 for the message
/// and any requested padding.
pub const MAX_PAYLOAD_LENGTH: usize = 4078;

// ============================================================================
// Delivery
// ============================================================================

/// Legacy Google Cloud Messaging gateway base URL.
///
/// Chrome registrations created before the gateway spoke Web Push hand out
/// endpoints under this base; they need rewriting and an API key.
pub const GCM_ENDPOINT: &str = "https://android.googleapis.com/gcm/send";

/// Transitional Web-Push-compatible GCM base URL.
///
/// Accepts the standard Web Push wire format for registration ids issued
/// against [`GCM_ENDPOINT`].
pub const TEMP_GCM_ENDPOINT: &str = "https://gcm-http.googleapis.com/gcm";

/// Default `TTL` header value: four weeks, the longest push services honor.
pub const DEFAULT_TTL: u32 = 2_419_200;
