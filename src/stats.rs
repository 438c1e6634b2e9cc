use serde::Serialize;

use crate::Host;

/// A point-in-time snapshot of a pool's per-host health, partitioned by the
/// quarantine flag.
///
/// Produced by [`HostPool::stats`](crate::HostPool::stats) under the pool
/// lock, so the three lists are consistent with each other. All lists keep
/// the construction order of the pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PoolStats {
    /// Hosts currently in normal rotation
    pub alive: Vec<Host>,
    /// Hosts currently quarantined after a reported failure
    pub dead: Vec<Host>,
    /// Every host of the pool, regardless of state
    pub hosts: Vec<Host>,
}

impl PoolStats {
    /// `true` when every host is quarantined
    #[must_use]
    pub fn all_dead(&self) -> bool {
        self.alive.is_empty()
    }

    /// Get a human-readable one-line summary of the snapshot
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{} alive, {} dead of {} hosts",
            self.alive.len(),
            self.dead.len(),
            self.hosts.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hosts(names: &[&str]) -> Vec<Host> {
        names.iter().copied().map(Host::from).collect()
    }

    #[test]
    fn test_all_dead() {
        let stats = PoolStats {
            alive: vec![],
            dead: hosts(&["a", "b"]),
            hosts: hosts(&["a", "b"]),
        };
        assert!(stats.all_dead());

        let stats = PoolStats {
            alive: hosts(&["a"]),
            dead: hosts(&["b"]),
            hosts: hosts(&["a", "b"]),
        };
        assert!(!stats.all_dead());
    }

    #[test]
    fn test_summary_formatting() {
        let stats = PoolStats {
            alive: hosts(&["a", "c"]),
            dead: hosts(&["b"]),
            hosts: hosts(&["a", "b", "c"]),
        };
        assert_eq!(stats.summary(), "2 alive, 1 dead of 3 hosts");
    }

    #[test]
    fn test_stats_serialization() {
        let stats = PoolStats {
            alive: hosts(&["a"]),
            dead: hosts(&["b"]),
            hosts: hosts(&["a", "b"]),
        };
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "alive": ["a"],
                "dead": ["b"],
                "hosts": ["a", "b"],
            })
        );
    }
}
