//! Per-endpoint auth token registry.
//!
//! Some push gateways demand an API key in the `Authorization` header.
//! The registry maps endpoint URL patterns to bearer tokens so one sender
//! can serve subscriptions across several gateways. Matching is plain
//! case-sensitive substring containment — not a pattern language — and
//! the first registered match wins, so earlier registrations take
//! precedence over later ones.

use std::sync::RwLock;

/// One pattern-to-token mapping.
#[derive(Clone, Debug)]
pub struct AuthTokenEntry {
    /// Substring to match against an endpoint URL.
    pub pattern: String,
    /// Bearer credential sent as `Authorization: key=<token>`.
    pub token: String,
}

/// Ordered collection of [`AuthTokenEntry`] values.
///
/// Registrations append and resolution scans in registration order;
/// duplicate patterns are retained. Interior locking makes a shared
/// registry safe to read from concurrent sends while registrations
/// append. Entries live for the process — nothing expires them.
#[derive(Debug, Default)]
pub struct AuthTokenRegistry {
    entries: RwLock<Vec<AuthTokenEntry>>,
}

impl AuthTokenRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a pattern-to-token mapping.
    pub fn register(&self, pattern: impl Into<String>, token: impl Into<String>) {
        let entry = AuthTokenEntry {
            pattern: pattern.into(),
            token: token.into(),
        };
        self.entries
            .write()
            .expect("registry lock poisoned")
            .push(entry);
    }

    /// Token of the first entry whose pattern is a substring of `endpoint`.
    pub fn resolve(&self, endpoint: &str) -> Option<String> {
        self.entries
            .read()
            .expect("registry lock poisoned")
            .iter()
            .find(|entry| endpoint.contains(&entry.pattern))
            .map(|entry| entry.token.clone())
    }

    /// Number of registered entries.
    pub fn len(&self) -> usize {
        self.entries.read().expect("registry lock poisoned").len()
    }

    /// Whether the registry has no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_matching_pattern_wins() {
        let registry = AuthTokenRegistry::new();
        registry.register("googleapis.com", "first");
        registry.register("android.googleapis.com", "second");

        // Both patterns match; registration order decides.
        let token = registry.resolve("https://android.googleapis.com/gcm/send/reg1");
        assert_eq!(token.as_deref(), Some("first"));
    }

    #[test]
    fn test_no_match_returns_none() {
        let registry = AuthTokenRegistry::new();
        registry.register("example.org", "token");

        assert_eq!(registry.resolve("https://push.example.com/ep"), None);
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let registry = AuthTokenRegistry::new();
        registry.register("GoogleApis.com", "token");

        assert_eq!(registry.resolve("https://googleapis.com/gcm"), None);
    }

    #[test]
    fn test_duplicate_patterns_retained() {
        let registry = AuthTokenRegistry::new();
        registry.register("gateway", "old");
        registry.register("gateway", "new");

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.resolve("https://gateway/x").as_deref(), Some("old"));
    }

    #[test]
    fn test_empty_registry() {
        let registry = AuthTokenRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.resolve("https://anything"), None);
    }
}
