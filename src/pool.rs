use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::{ErrorKind, Host, PoolConfig, PoolStats, Result};

/// Per-host book-keeping.
///
/// Created once per host at pool construction and mutated for the pool's
/// lifetime; the table never gains or loses entries.
#[derive(Debug, Clone)]
struct HostState {
    /// Withheld from normal rotation while set
    dead: bool,
    /// Retry grants issued since the host last went dead
    retry_count: usize,
    /// Current backoff delay; grows on repeated grants in exponential mode
    retry_delay: Duration,
    /// Earliest time the next retry grant may be issued
    next_retry: Instant,
}

/// Mutable pool state. Guarded by a single lock so a `get` scan's
/// read-modify-write of host state plus the cursor advance is atomic
/// relative to all other calls.
#[derive(Debug)]
struct PoolState {
    /// One entry per host, parallel to the construction-ordered host list
    states: Vec<HostState>,
    /// Index where the next round-robin scan starts, always in
    /// `0..host_count`
    cursor: usize,
}

/// Tracks a fixed set of remote hosts and hands out one host per request in
/// round-robin order, quarantining hosts that recently failed.
///
/// The pool performs no I/O itself. Callers pick a host with
/// [`get`](Self::get), run their own request against it, and report the
/// outcome with [`success`](Self::success) or [`failed`](Self::failed); that
/// feedback drives which host the next `get` returns. A quarantined host is
/// withheld from rotation until its retry deadline passes, at which point a
/// single `get` hands it back as a probe while keeping it quarantined until
/// a `success` report arrives.
///
/// All operations are in-memory and bounded by the host count, so the pool
/// is safe to share (`Arc<HostPool>`) and call from latency-sensitive
/// request paths.
///
/// # Examples
///
/// ```
/// use host_pool::{HostPool, PoolConfig};
///
/// let pool = HostPool::new(["a:4150", "b:4150", "c:4150"], PoolConfig::default())?;
/// let first = pool.get()?;
/// let second = pool.get()?;
/// assert_ne!(first, second);
/// # Ok::<(), host_pool::ErrorKind>(())
/// ```
#[derive(Debug)]
pub struct HostPool {
    /// Host identifiers in construction order
    hosts: Vec<Host>,
    /// Identifier to table slot, fixed at construction
    index: HashMap<Host, usize>,
    config: PoolConfig,
    state: Mutex<PoolState>,
}

impl HostPool {
    /// Create a pool over the given hosts, all starting alive.
    ///
    /// The iteration order of `hosts` fixes the rotation order for the
    /// pool's lifetime.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidConfiguration`] if `hosts` is empty or
    /// contains the same identifier twice.
    pub fn new<I, H>(hosts: I, config: PoolConfig) -> Result<Self>
    where
        I: IntoIterator<Item = H>,
        H: Into<Host>,
    {
        let hosts: Vec<Host> = hosts.into_iter().map(Into::into).collect();
        if hosts.is_empty() {
            return Err(ErrorKind::InvalidConfiguration(
                "host list must not be empty".to_string(),
            ));
        }

        let mut index = HashMap::with_capacity(hosts.len());
        for (slot, host) in hosts.iter().enumerate() {
            if index.insert(host.clone(), slot).is_some() {
                return Err(ErrorKind::InvalidConfiguration(format!(
                    "duplicate host: {host}"
                )));
            }
        }

        let states = vec![
            HostState {
                dead: false,
                retry_count: 0,
                retry_delay: config.initial_retry_delay,
                next_retry: Instant::now(),
            };
            hosts.len()
        ];

        Ok(Self {
            hosts,
            index,
            config,
            state: Mutex::new(PoolState { states, cursor: 0 }),
        })
    }

    /// Get the next available host.
    ///
    /// Scans the host list in construction order starting at the round-robin
    /// cursor, wrapping around exactly once. The first alive host wins; a
    /// dead host whose retry deadline has passed is handed back as a retry
    /// probe instead (staying quarantined until [`success`](Self::success)
    /// is reported, with its backoff delay advanced). Dead hosts that have
    /// exhausted their retry budget are skipped permanently.
    ///
    /// When the scan comes up empty and
    /// [`reset_on_all_failed`](PoolConfig::reset_on_all_failed) is enabled,
    /// every host is revived and the one under the cursor is returned.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::NoHostsAvailable`] when every host is dead, none
    /// is eligible for a retry, and `reset_on_all_failed` is disabled.
    ///
    /// # Panics
    ///
    /// Panics if the pool lock is poisoned.
    pub fn get(&self) -> Result<Host> {
        self.get_at(Instant::now())
    }

    fn get_at(&self, now: Instant) -> Result<Host> {
        let mut state = self.state.lock().unwrap();
        let PoolState { states, cursor } = &mut *state;
        let count = self.hosts.len();

        for offset in 0..count {
            let slot = (*cursor + offset) % count;
            let status = &mut states[slot];

            if !status.dead {
                *cursor = (slot + 1) % count;
                return Ok(self.hosts[slot].clone());
            }

            if let Some(max) = self.config.max_retries {
                if status.retry_count > max {
                    log::debug!(
                        "host {} exceeded its retry budget of {max} (granted {}), skipping",
                        self.hosts[slot],
                        status.retry_count
                    );
                    continue;
                }
            }

            if now >= status.next_retry {
                status.retry_count += 1;
                status.retry_delay = match self.config.retry_interval {
                    Some(interval) => interval,
                    None => (status.retry_delay * 2).min(self.config.max_retry_interval),
                };
                status.next_retry = now + status.retry_delay;
                log::debug!(
                    "retrying dead host {} (attempt {}, next retry in {:?})",
                    self.hosts[slot],
                    status.retry_count,
                    status.retry_delay
                );
                *cursor = (slot + 1) % count;
                return Ok(self.hosts[slot].clone());
            }
        }

        if self.config.reset_on_all_failed {
            for status in states.iter_mut() {
                status.dead = false;
            }
            // The reset does not move the cursor, so the host returned is
            // the one the cursor pointed at before the reset.
            let slot = *cursor % count;
            *cursor = (slot + 1) % count;
            log::info!(
                "all hosts are dead; resetting pool and returning {}",
                self.hosts[slot]
            );
            return Ok(self.hosts[slot].clone());
        }

        Err(ErrorKind::NoHostsAvailable)
    }

    /// Report that a request against `host` succeeded, returning it to
    /// normal rotation.
    ///
    /// Idempotent: a no-op when the host is already alive. The host's
    /// backoff fields are left as-is; they are reinitialized by the next
    /// [`failed`](Self::failed) report.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::UnknownHost`] if `host` was not part of the pool
    /// at construction.
    ///
    /// # Panics
    ///
    /// Panics if the pool lock is poisoned.
    pub fn success(&self, host: &Host) -> Result<()> {
        let slot = self.slot(host)?;
        self.state.lock().unwrap().states[slot].dead = false;
        Ok(())
    }

    /// Report that a request against `host` failed, quarantining it.
    ///
    /// Only acts on an alive host: quarantines it, resets its retry count
    /// and sets its first retry deadline (`initial_retry_delay` away in
    /// exponential mode, immediately in fixed-interval mode). Reporting a
    /// failure for an already-dead host is a no-op so redundant reports
    /// cannot restart the backoff clock.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::UnknownHost`] if `host` was not part of the pool
    /// at construction.
    ///
    /// # Panics
    ///
    /// Panics if the pool lock is poisoned.
    pub fn failed(&self, host: &Host) -> Result<()> {
        self.failed_at(host, Instant::now())
    }

    fn failed_at(&self, host: &Host, now: Instant) -> Result<()> {
        let slot = self.slot(host)?;
        let mut state = self.state.lock().unwrap();
        let status = &mut state.states[slot];
        if status.dead {
            return Ok(());
        }

        status.dead = true;
        status.retry_count = 0;
        status.retry_delay = match self.config.retry_interval {
            // A fixed-interval pool probes a fresh failure right away
            Some(_) => Duration::ZERO,
            None => self.config.initial_retry_delay,
        };
        status.next_retry = now + status.retry_delay;
        log::debug!(
            "host {host} marked dead, first retry in {:?}",
            status.retry_delay
        );
        Ok(())
    }

    /// Put every host back into an alive state.
    ///
    /// Equivalent to reporting [`success`](Self::success) for each host, but
    /// under a single lock acquisition.
    ///
    /// # Panics
    ///
    /// Panics if the pool lock is poisoned.
    pub fn reset(&self) {
        let mut state = self.state.lock().unwrap();
        for status in &mut state.states {
            status.dead = false;
        }
    }

    /// Get a consistent snapshot of the pool's per-host health.
    ///
    /// Read-only; no side effects on selection or backoff state.
    ///
    /// # Panics
    ///
    /// Panics if the pool lock is poisoned.
    #[must_use]
    pub fn stats(&self) -> PoolStats {
        let state = self.state.lock().unwrap();
        let mut alive = Vec::new();
        let mut dead = Vec::new();
        for (slot, status) in state.states.iter().enumerate() {
            if status.dead {
                dead.push(self.hosts[slot].clone());
            } else {
                alive.push(self.hosts[slot].clone());
            }
        }
        PoolStats {
            alive,
            dead,
            hosts: self.hosts.clone(),
        }
    }

    /// Whether `host` is currently in normal rotation.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::UnknownHost`] if `host` was not part of the pool
    /// at construction.
    ///
    /// # Panics
    ///
    /// Panics if the pool lock is poisoned.
    pub fn is_alive(&self, host: &Host) -> Result<bool> {
        let slot = self.slot(host)?;
        Ok(!self.state.lock().unwrap().states[slot].dead)
    }

    /// The pool's hosts in rotation order
    #[must_use]
    pub fn hosts(&self) -> &[Host] {
        &self.hosts
    }

    /// Get the number of hosts in the pool
    #[must_use]
    pub fn host_count(&self) -> usize {
        self.hosts.len()
    }

    fn slot(&self, host: &Host) -> Result<usize> {
        self.index
            .get(host)
            .copied()
            .ok_or_else(|| ErrorKind::UnknownHost(host.clone()))
    }
}
