//! Encrypted Web Push message delivery (aesgcm content encoding).
//!
//! Encrypts an application payload so it can be delivered confidentially
//! to a browser-held push subscription, and optionally POSTs the result
//! to the subscription's push endpoint.
//!
//! # Architecture
//!
//! ```text
//! caller
//!     ↓
//! crypto::encrypt(message, subscription)
//!     ↓  ECDH (P-256) → restricted HKDF → AES-128-GCM
//! EncryptionResult { ciphertext, salt, server_public_key }
//!     ↓
//! PushSender::send → headers + endpoint rewrite + token lookup → HTTP POST
//!     ↓
//! DeliveryOutcome (delivered / subscription expired)
//! ```
//!
//! Encryption is pure computation — no I/O, fresh randomness per call —
//! and may run concurrently across calls. The POST inside
//! [`PushSender::send`] is the single async suspension point.
//!
//! # Modules
//!
//! - [`crypto`] - key agreement, key derivation, payload sealing
//! - [`sender`] - wire headers, endpoint rewriting, delivery classification
//! - [`registry`] - per-endpoint auth token lookup
//! - [`subscription`] - browser subscription types and key validation

// Rust guideline compliant 2026-02

pub mod constants;
pub mod crypto;
pub mod error;
pub mod registry;
pub mod sender;
pub mod subscription;

// Re-export commonly used types
pub use crypto::{encrypt, encrypt_with_padding, EncryptionResult};
pub use error::{Result, WebPushError};
pub use registry::{AuthTokenEntry, AuthTokenRegistry};
pub use sender::{DeliveryOutcome, PushResponse, PushSender};
pub use subscription::{Subscription, SubscriptionKeys};
