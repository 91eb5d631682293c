//! Push message delivery over HTTP.
//!
//! Runs the encryption pipeline, assembles the aesgcm wire headers, and
//! POSTs the ciphertext to the subscription's endpoint. One attempt per
//! call — retry policy belongs to the caller, as does any timeout around
//! the single HTTP suspension point.

use std::sync::Arc;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

use crate::constants::{DEFAULT_TTL, GCM_ENDPOINT, TEMP_GCM_ENDPOINT};
use crate::crypto;
use crate::error::{Result, WebPushError};
use crate::registry::AuthTokenRegistry;
use crate::subscription::Subscription;

/// What the push service answered.
#[derive(Clone, Debug)]
pub struct PushResponse {
    /// HTTP status code.
    pub status_code: u16,
    /// Canonical reason phrase for the status, if any.
    pub status_message: String,
    /// Response body, drained as text.
    pub body: String,
}

/// Classified result of one delivery attempt.
#[derive(Clone, Debug)]
pub enum DeliveryOutcome {
    /// The push service accepted the request (or answered with a status
    /// the caller should interpret itself — anything outside 4xx).
    Delivered(PushResponse),
    /// The push service answered 4xx: by protocol convention the
    /// subscription is no longer valid and the caller should drop it.
    /// Nothing is unregistered automatically.
    Expired(PushResponse),
}

impl DeliveryOutcome {
    /// Whether this outcome marks the subscription as gone.
    pub fn is_expired(&self) -> bool {
        matches!(self, Self::Expired(_))
    }

    /// The underlying push service response.
    pub fn response(&self) -> &PushResponse {
        match self {
            Self::Delivered(response) | Self::Expired(response) => response,
        }
    }
}

/// Rewrite a legacy GCM endpoint to the transitional Web-Push-compatible
/// base URL, preserving the registration id suffix byte-for-byte. Other
/// endpoints pass through unchanged.
fn rewrite_endpoint(endpoint: &str) -> String {
    match endpoint.strip_prefix(GCM_ENDPOINT) {
        Some(suffix) => format!("{TEMP_GCM_ENDPOINT}{suffix}"),
        None => endpoint.to_string(),
    }
}

/// Sends encrypted push messages to subscription endpoints.
///
/// Holds a [`reqwest::Client`] so repeated sends share connection pools,
/// and an [`AuthTokenRegistry`] for gateways that require API keys. Both
/// can be injected: pass a shared registry when several senders must
/// share tokens.
#[derive(Debug)]
pub struct PushSender {
    client: reqwest::Client,
    registry: Arc<AuthTokenRegistry>,
    ttl: u32,
}

impl Default for PushSender {
    fn default() -> Self {
        Self::new()
    }
}

impl PushSender {
    /// Create a sender with its own HTTP client and an empty registry.
    pub fn new() -> Self {
        Self::with_client(reqwest::Client::new())
    }

    /// Create a sender reusing an existing HTTP client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            client,
            registry: Arc::new(AuthTokenRegistry::new()),
            ttl: DEFAULT_TTL,
        }
    }

    /// Replace the token registry with a shared instance.
    pub fn with_registry(mut self, registry: Arc<AuthTokenRegistry>) -> Self {
        self.registry = registry;
        self
    }

    /// Override the `TTL` header value (seconds the push service may hold
    /// the message for an offline browser).
    pub fn with_ttl(mut self, seconds: u32) -> Self {
        self.ttl = seconds;
        self
    }

    /// Register an endpoint-pattern-to-token mapping.
    pub fn add_auth_token(&self, pattern: impl Into<String>, token: impl Into<String>) {
        self.registry.register(pattern, token);
    }

    /// The sender's token registry.
    pub fn registry(&self) -> &Arc<AuthTokenRegistry> {
        &self.registry
    }

    /// Encrypt `message` and deliver it to the subscription's endpoint.
    ///
    /// All validation and encryption happens before any I/O; the POST is
    /// the single suspension point. A 4xx answer is not an error — it
    /// comes back as [`DeliveryOutcome::Expired`] so the caller can drop
    /// the subscription.
    pub async fn send(
        &self,
        subscription: &Subscription,
        message: &[u8],
    ) -> Result<DeliveryOutcome> {
        if subscription.endpoint.is_empty() {
            return Err(WebPushError::MissingEndpoint);
        }

        let is_gcm = subscription.endpoint.starts_with(GCM_ENDPOINT);
        let url = rewrite_endpoint(&subscription.endpoint);

        let encrypted = crypto::encrypt(message, subscription)?;

        // Token lookup runs against the original endpoint, so patterns
        // written for the legacy gateway keep matching after the rewrite.
        let token = self.registry.resolve(&subscription.endpoint);
        if is_gcm && token.is_none() {
            return Err(WebPushError::MissingAuthToken);
        }

        let mut request = self
            .client
            .post(&url)
            .header("Content-Encoding", "aesgcm")
            .header(
                "Encryption",
                format!("salt={}", URL_SAFE_NO_PAD.encode(encrypted.salt)),
            )
            .header(
                "Crypto-Key",
                format!("dh={}", URL_SAFE_NO_PAD.encode(&encrypted.server_public_key)),
            )
            .header("TTL", self.ttl.to_string());

        if let Some(token) = token {
            request = request.header("Authorization", format!("key={token}"));
        }

        let response = request.body(encrypted.ciphertext).send().await?;

        let status = response.status();
        let reply = PushResponse {
            status_code: status.as_u16(),
            status_message: status
                .canonical_reason()
                .unwrap_or_default()
                .to_string(),
            body: response.text().await.unwrap_or_default(),
        };

        if (400..500).contains(&reply.status_code) {
            log::info!(
                "[WebPush] subscription rejected by push service (HTTP {})",
                reply.status_code
            );
            Ok(DeliveryOutcome::Expired(reply))
        } else {
            log::debug!("[WebPush] delivered (HTTP {})", reply.status_code);
            Ok(DeliveryOutcome::Delivered(reply))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gcm_endpoint_rewritten_with_suffix_preserved() {
        let rewritten =
            rewrite_endpoint("https://android.googleapis.com/gcm/send/reg-id-123/extra");
        assert_eq!(rewritten, "https://gcm-http.googleapis.com/gcm/reg-id-123/extra");
    }

    #[test]
    fn test_bare_gcm_endpoint_rewritten() {
        let rewritten = rewrite_endpoint("https://android.googleapis.com/gcm/send");
        assert_eq!(rewritten, "https://gcm-http.googleapis.com/gcm");
    }

    #[test]
    fn test_other_endpoints_pass_through() {
        let endpoint = "https://updates.push.services.mozilla.com/wpush/v2/token";
        assert_eq!(rewrite_endpoint(endpoint), endpoint);
    }

    #[test]
    fn test_sender_shares_registry() {
        let registry = Arc::new(AuthTokenRegistry::new());
        let sender = PushSender::new().with_registry(Arc::clone(&registry));

        sender.add_auth_token("gateway.example", "tok");
        assert_eq!(
            registry.resolve("https://gateway.example/x").as_deref(),
            Some("tok")
        );
    }
}
