//! `host-pool` tracks a fixed set of remote hosts and hands out one host per
//! request in round-robin order. Callers report the outcome of their own I/O
//! against the chosen host, and the pool quarantines hosts that failed,
//! retrying them on an exponential (or fixed) backoff schedule.
//!
//! "Hello world" example:
//! ```
//! use host_pool::{HostPool, PoolConfig, Result};
//!
//! fn main() -> Result<()> {
//!     let pool = HostPool::new(["10.0.0.1:4150", "10.0.0.2:4150"], PoolConfig::default())?;
//!
//!     let host = pool.get()?;
//!     // ... perform a request against `host` ...
//!     pool.success(&host)?;
//!     Ok(())
//! }
//! ```
//!
//! For more specific use-cases you can configure the pool through
//! [`PoolConfig`], which grants full control over the retry policy:
//!
//! ```
//! use std::time::Duration;
//! use host_pool::{HostPool, PoolConfig, Result};
//!
//! fn main() -> Result<()> {
//!     let config = PoolConfig::builder()
//!         .max_retries(Some(3))
//!         .initial_retry_delay(Duration::from_secs(5))
//!         .reset_on_all_failed(false)
//!         .build();
//!     let pool = HostPool::new(["primary:6379", "replica:6379"], config)?;
//!
//!     let host = pool.get()?;
//!     // ... the request failed, quarantine the host ...
//!     pool.failed(&host)?;
//!     Ok(())
//! }
//! ```
#![warn(missing_docs)]

mod config;
mod error;
mod host;
mod pool;
mod stats;

pub use config::PoolConfig;
pub use error::{ErrorKind, Result};
pub use host::Host;
pub use pool::HostPool;
pub use stats::PoolStats;
