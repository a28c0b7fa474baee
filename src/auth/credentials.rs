//! API key handling for ThingSpeak authentication.

use secrecy::{ExposeSecret, SecretString};

/// A ThingSpeak API key.
///
/// Account keys, channel write keys and channel read keys all share this type.
/// The key is sent as the `api_key` request parameter.
#[derive(Clone)]
pub struct ApiKey {
    key: SecretString,
}

impl ApiKey {
    /// Create a new API key.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: SecretString::from(key.into()),
        }
    }

    /// Get the key text for the wire.
    ///
    /// This method exposes the secret - use carefully.
    pub fn expose_secret(&self) -> &str {
        self.key.expose_secret()
    }
}

impl From<&str> for ApiKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

impl From<String> for ApiKey {
    fn from(key: String) -> Self {
        Self::new(key)
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey([REDACTED])")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_debug_redacted() {
        let key = ApiKey::new("WRITE1234");
        let debug_str = format!("{:?}", key);
        assert!(!debug_str.contains("WRITE1234"));
        assert!(debug_str.contains("[REDACTED]"));
    }

    #[test]
    fn test_api_key_expose() {
        let key = ApiKey::from("READ5678");
        assert_eq!(key.expose_secret(), "READ5678");
    }
}
