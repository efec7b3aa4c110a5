//! prefix-cache: a bounded least-frequently-used cache for phone-number
//! prefix records, plus the services that read through it.
//!
//! - [`policy::lfu`]: the [`FrequencyCache`] core and its shared
//!   [`ConcurrentFrequencyCache`] handle.
//! - [`builder`]: configuration and construction.
//! - [`service`]: prefix and country services over a pluggable store.
//! - `metrics` (feature `metrics`): counters, snapshots and a Prometheus
//!   text exporter.

pub mod builder;
pub mod error;

#[cfg(feature = "metrics")]
pub mod metrics;

pub mod policy;
pub mod prelude;
pub mod service;
pub mod traits;

pub use builder::{CacheBuilder, CacheConfig, DEFAULT_CAPACITY};
pub use error::{ConfigError, InvariantError};
pub use policy::lfu::{ConcurrentFrequencyCache, EntryId, FrequencyCache};
