//! Cache configuration and construction.
//!
//! [`CacheConfig`] carries the tunables of a prefix cache and
//! [`CacheBuilder`] turns them into a shared
//! [`ConcurrentFrequencyCache`](crate::policy::lfu::ConcurrentFrequencyCache).
//!
//! ## Example
//!
//! ```rust
//! use prefix_cache::builder::{CacheBuilder, CacheConfig};
//!
//! let cache = CacheBuilder::new(100).build::<String>();
//! cache.put(1, "hello".to_string());
//! assert_eq!(cache.get(1), Some("hello".to_string()));
//!
//! let config = CacheConfig::default();
//! let cache = CacheBuilder::from_config(&config).try_build::<String>().unwrap();
//! assert_eq!(cache.capacity(), 10);
//! ```

use crate::error::ConfigError;
use crate::policy::lfu::ConcurrentFrequencyCache;

/// Capacity used when none is configured.
pub const DEFAULT_CAPACITY: usize = 10;

/// Configuration for a frequency cache.
///
/// | Field      | Type    | Default | Description      |
/// |------------|---------|---------|------------------|
/// | `capacity` | `usize` | 10      | Maximum entries  |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    /// Maximum number of resident entries.
    pub capacity: usize,
}

impl CacheConfig {
    /// Creates a configuration with the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    /// Rejects configurations that would produce a cache unable to hold
    /// anything.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `capacity` is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::new("cache capacity must be greater than zero"));
        }
        Ok(())
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }
}

/// Builder for creating cache instances.
#[derive(Debug, Clone, Copy)]
pub struct CacheBuilder {
    config: CacheConfig,
}

impl CacheBuilder {
    /// Create a new cache builder with the specified capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            config: CacheConfig::new(capacity),
        }
    }

    /// Create a builder from an existing configuration.
    pub fn from_config(config: &CacheConfig) -> Self {
        Self { config: *config }
    }

    /// Override the capacity.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.config.capacity = capacity;
        self
    }

    /// Build a shared cache.
    ///
    /// A zero capacity is accepted and yields a cache that stores nothing.
    pub fn build<T>(self) -> ConcurrentFrequencyCache<T> {
        ConcurrentFrequencyCache::new(self.config.capacity)
    }

    /// Validate the configuration, then build a shared cache.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the configuration fails
    /// [`CacheConfig::validate`].
    pub fn try_build<T>(self) -> Result<ConcurrentFrequencyCache<T>, ConfigError> {
        self.config.validate()?;
        Ok(self.build())
    }
}

impl Default for CacheBuilder {
    fn default() -> Self {
        Self::from_config(&CacheConfig::default())
    }
}
