use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque identifier for a remote host.
///
/// The pool never interprets the identifier; it is only used as a status
/// table key and as the value handed back by
/// [`HostPool::get`](crate::HostPool::get). Anything that names an endpoint
/// works: a `host:port` pair, a connection string, a URL.
///
/// Identifiers are compared verbatim. Two spellings of the same endpoint
/// (`"Example.com:80"` vs `"example.com:80"`) are two distinct hosts, so
/// callers should pick one canonical form up front.
///
/// # Examples
///
/// ```
/// use host_pool::Host;
///
/// let host = Host::from("10.0.0.1:4150");
/// assert_eq!(host.as_str(), "10.0.0.1:4150");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Host(String);

impl Host {
    /// Get the identifier as a string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get the identifier as an owned String
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<String> for Host {
    fn from(host: String) -> Self {
        Host(host)
    }
}

impl From<&str> for Host {
    fn from(host: &str) -> Self {
        Host(host.to_string())
    }
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_from_str() {
        let host = Host::from("example.com:6379");
        assert_eq!(host.as_str(), "example.com:6379");
        assert_eq!(host.clone().into_string(), "example.com:6379");
    }

    #[test]
    fn test_host_display() {
        let host = Host::from("10.0.0.1:4150");
        assert_eq!(format!("{host}"), "10.0.0.1:4150");
    }

    #[test]
    fn test_host_is_not_normalized() {
        // Identifiers are opaque; casing is preserved and significant.
        let upper = Host::from("EXAMPLE.COM:80");
        let lower = Host::from("example.com:80");
        assert_eq!(upper.as_str(), "EXAMPLE.COM:80");
        assert_ne!(upper, lower);
    }

    #[test]
    fn test_host_hash_equality() {
        use std::collections::HashMap;

        let key1 = Host::from("example.com");
        let key2 = Host::from(String::from("example.com"));

        let mut map = HashMap::new();
        map.insert(key1, "value");
        assert_eq!(map.get(&key2), Some(&"value"));
    }
}
