use thiserror::Error;

use crate::Host;

/// Possible errors when interacting with a [`HostPool`](crate::HostPool)
#[derive(Error, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The pool cannot be built from the given hosts or options
    #[error("invalid pool configuration: {0}")]
    InvalidConfiguration(String),
    /// Every host is dead and none is currently eligible for a retry.
    ///
    /// Only returned when
    /// [`reset_on_all_failed`](crate::PoolConfig::reset_on_all_failed) is
    /// disabled. Recoverable; callers should back off and ask the pool again
    /// later.
    #[error("no hosts available")]
    NoHostsAvailable,
    /// An outcome was reported for a host that was never added to the pool
    #[error("unknown host: {0}")]
    UnknownHost(Host),
}

/// The crate-wide result type
pub type Result<T> = std::result::Result<T, ErrorKind>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            ErrorKind::UnknownHost(Host::from("10.0.0.1:4150")).to_string(),
            "unknown host: 10.0.0.1:4150"
        );
        assert_eq!(ErrorKind::NoHostsAvailable.to_string(), "no hosts available");
        assert_eq!(
            ErrorKind::InvalidConfiguration("host list must not be empty".to_string()).to_string(),
            "invalid pool configuration: host list must not be empty"
        );
    }
}
