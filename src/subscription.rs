//! Browser push subscription types and key validation.
//!
//! A subscription is what `PushManager.subscribe()` hands the page: the
//! push service endpoint plus the browser's ECDH public key and shared
//! auth secret. The JSON shape here matches `PushSubscription.toJSON()`,
//! so a subscription forwarded by a page deserializes directly.

use base64::engine::general_purpose::{URL_SAFE, URL_SAFE_NO_PAD};
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::constants::{AUTH_SECRET_LENGTH, PUBLIC_KEY_LENGTH};
use crate::error::{Result, WebPushError};

/// A browser's push subscription.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Subscription {
    /// Push service endpoint URL. Required for delivery, not for
    /// encryption alone.
    #[serde(default)]
    pub endpoint: String,
    /// Key material the browser generated for this subscription.
    #[serde(default)]
    pub keys: SubscriptionKeys,
}

/// Encryption key material of a [`Subscription`].
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SubscriptionKeys {
    /// Browser's P-256 ECDH public key (base64url, 65 bytes uncompressed).
    #[serde(default)]
    pub p256dh: String,
    /// Shared auth secret (base64url, 16 bytes).
    #[serde(default)]
    pub auth: String,
}

impl Subscription {
    /// Build a subscription from its raw parts.
    pub fn new(
        endpoint: impl Into<String>,
        p256dh: impl Into<String>,
        auth: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            keys: SubscriptionKeys {
                p256dh: p256dh.into(),
                auth: auth.into(),
            },
        }
    }
}

/// Decode a base64url field, accepting both unpadded and padded input.
///
/// Browsers emit unpadded base64url, but subscriptions that went through
/// other tooling sometimes arrive with `=` padding restored.
fn decode_key(value: &str) -> Result<Vec<u8>> {
    URL_SAFE_NO_PAD
        .decode(value)
        .or_else(|_| URL_SAFE.decode(value))
        .map_err(WebPushError::from)
}

impl SubscriptionKeys {
    /// Whether both key fields are present.
    pub fn is_complete(&self) -> bool {
        !self.p256dh.is_empty() && !self.auth.is_empty()
    }

    /// Decode and validate the 16-byte auth secret.
    pub fn auth_secret(&self) -> Result<Vec<u8>> {
        let bytes = decode_key(&self.auth)?;
        if bytes.len() != AUTH_SECRET_LENGTH {
            return Err(WebPushError::InvalidAuthSecretLength(bytes.len()));
        }
        Ok(bytes)
    }

    /// Decode the `p256dh` key and check it is a 65-byte uncompressed point.
    ///
    /// Only the encoding is checked here; whether the point lies on the
    /// curve is the key-agreement layer's call.
    pub fn client_public_key(&self) -> Result<Vec<u8>> {
        let bytes = decode_key(&self.p256dh)?;
        if bytes.len() != PUBLIC_KEY_LENGTH || bytes[0] != 0x04 {
            return Err(WebPushError::InvalidClientKey);
        }
        Ok(bytes)
    }
}
