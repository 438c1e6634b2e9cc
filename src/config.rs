use serde::{Deserialize, Serialize};
use std::time::Duration;
use typed_builder::TypedBuilder;

/// Default cap on the exponentially growing retry delay, 15 minutes
const DEFAULT_MAX_RETRY_INTERVAL: Duration = Duration::from_secs(900);

/// Default delay before the first retry of a failed host, 30 seconds
const DEFAULT_INITIAL_RETRY_DELAY: Duration = Duration::from_secs(30);

/// Retry policy for a [`HostPool`](crate::HostPool).
///
/// All fields are optional; the defaults retry failed hosts forever with an
/// exponentially growing delay (30s, 60s, 120s, ... capped at 15 minutes)
/// and revive the whole pool rather than fail once every host is dead.
///
/// Durations deserialize from humantime strings, so embedding applications
/// can write `initial_retry_delay = "30s"` or `max_retry_interval = "15m"`
/// in their TOML configuration.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use host_pool::PoolConfig;
///
/// let config = PoolConfig::builder()
///     .retry_interval(Some(Duration::from_secs(10)))
///     .reset_on_all_failed(false)
///     .build();
/// assert_eq!(config.max_retries, None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TypedBuilder)]
#[builder(field_defaults(default, setter(into)))]
pub struct PoolConfig {
    /// Number of retry grants a dead host may receive before it is
    /// permanently excluded from rotation. `None` retries indefinitely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_retries: Option<usize>,

    /// Fixed delay between retries of a dead host. With `None`, the delay
    /// doubles after every retry grant instead, starting from
    /// [`initial_retry_delay`](Self::initial_retry_delay).
    #[serde(default, with = "humantime_serde", skip_serializing_if = "Option::is_none")]
    pub retry_interval: Option<Duration>,

    /// Cap on the exponentially growing retry delay. Ignored when
    /// [`retry_interval`](Self::retry_interval) pins the delay to a fixed
    /// value.
    #[serde(default = "default_max_retry_interval", with = "humantime_serde")]
    #[builder(default = DEFAULT_MAX_RETRY_INTERVAL)]
    pub max_retry_interval: Duration,

    /// Delay before the first retry after a host goes dead (exponential
    /// mode). A fresh failure in fixed-interval mode is retried immediately.
    #[serde(default = "default_initial_retry_delay", with = "humantime_serde")]
    #[builder(default = DEFAULT_INITIAL_RETRY_DELAY)]
    pub initial_retry_delay: Duration,

    /// When every host is dead and none is eligible for a retry, revive all
    /// of them instead of failing
    /// [`HostPool::get`](crate::HostPool::get).
    #[serde(default = "default_reset_on_all_failed")]
    #[builder(default = true)]
    pub reset_on_all_failed: bool,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_retries: None,
            retry_interval: None,
            max_retry_interval: DEFAULT_MAX_RETRY_INTERVAL,
            initial_retry_delay: DEFAULT_INITIAL_RETRY_DELAY,
            reset_on_all_failed: default_reset_on_all_failed(),
        }
    }
}

/// Default cap on the exponentially growing retry delay
const fn default_max_retry_interval() -> Duration {
    DEFAULT_MAX_RETRY_INTERVAL
}

/// Default delay before the first retry of a failed host
const fn default_initial_retry_delay() -> Duration {
    DEFAULT_INITIAL_RETRY_DELAY
}

/// By default the pool revives all hosts when everything is dead
const fn default_reset_on_all_failed() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pool_config() {
        let config = PoolConfig::default();
        assert_eq!(config.max_retries, None);
        assert_eq!(config.retry_interval, None);
        assert_eq!(config.max_retry_interval, Duration::from_secs(900));
        assert_eq!(config.initial_retry_delay, Duration::from_secs(30));
        assert!(config.reset_on_all_failed);
    }

    #[test]
    fn test_builder_matches_default() {
        assert_eq!(PoolConfig::builder().build(), PoolConfig::default());
    }

    #[test]
    fn test_builder_overrides() {
        let config = PoolConfig::builder()
            .max_retries(Some(5))
            .retry_interval(Some(Duration::from_secs(2)))
            .reset_on_all_failed(false)
            .build();
        assert_eq!(config.max_retries, Some(5));
        assert_eq!(config.retry_interval, Some(Duration::from_secs(2)));
        assert!(!config.reset_on_all_failed);
        // Untouched fields keep their defaults
        assert_eq!(config.initial_retry_delay, Duration::from_secs(30));
    }

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config: PoolConfig = toml::from_str("").unwrap();
        assert_eq!(config, PoolConfig::default());
    }

    #[test]
    fn test_humantime_durations() {
        let config: PoolConfig = toml::from_str(
            r#"
            retry_interval = "10s"
            max_retry_interval = "15m"
            initial_retry_delay = "500ms"
            "#,
        )
        .unwrap();
        assert_eq!(config.retry_interval, Some(Duration::from_secs(10)));
        assert_eq!(config.max_retry_interval, Duration::from_secs(900));
        assert_eq!(config.initial_retry_delay, Duration::from_millis(500));
    }

    #[test]
    fn test_config_serialization() {
        let config = PoolConfig::builder()
            .max_retries(Some(3))
            .initial_retry_delay(Duration::from_secs(5))
            .build();

        let toml = toml::to_string(&config).unwrap();
        let deserialized: PoolConfig = toml::from_str(&toml).unwrap();
        assert_eq!(config, deserialized);
    }
}
