//! Error types for the prefix cache.
//!
//! ## Key Components
//!
//! - [`InvariantError`]: Returned by
//!   [`FrequencyCache::check_invariants`](crate::policy::lfu::FrequencyCache::check_invariants)
//!   when the entry map and its bookkeeping disagree.
//! - [`ConfigError`]: Returned when cache configuration is rejected by a
//!   fallible constructor (e.g. a zero capacity passed to `try_new`).
//!
//! Cache lookups never produce errors: a miss is `None`. Errors raised by the
//! prefix service live in [`crate::service::ServiceError`].
//!
//! ## Example Usage
//!
//! ```
//! use prefix_cache::error::ConfigError;
//! use prefix_cache::policy::lfu::FrequencyCache;
//!
//! let cache: Result<FrequencyCache<String>, ConfigError> = FrequencyCache::try_new(10);
//! assert!(cache.is_ok());
//!
//! let bad = FrequencyCache::<String>::try_new(0);
//! assert!(bad.is_err());
//! ```

use thiserror::Error;

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal cache invariants are violated.
///
/// Carries a human-readable description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Error returned when cache configuration parameters are invalid.
///
/// Produced by [`CacheConfig::validate`](crate::builder::CacheConfig::validate),
/// [`CacheBuilder::try_build`](crate::builder::CacheBuilder::try_build) and the
/// `try_new` constructors.
///
/// # Example
///
/// ```
/// use prefix_cache::policy::lfu::FrequencyCache;
///
/// let err = FrequencyCache::<u64>::try_new(0).unwrap_err();
/// assert!(err.to_string().contains("capacity"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ConfigError(String);

impl ConfigError {
    /// Creates a new `ConfigError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- InvariantError ---------------------------------------------------

    #[test]
    fn invariant_display_shows_message() {
        let err = InvariantError::new("entry 7 has frequency 0");
        assert_eq!(err.to_string(), "entry 7 has frequency 0");
    }

    #[test]
    fn invariant_message_accessor() {
        let err = InvariantError::new("len 3 exceeds capacity 2");
        assert_eq!(err.message(), "len 3 exceeds capacity 2");
    }

    #[test]
    fn invariant_clone_and_eq() {
        let a = InvariantError::new("x");
        let b = a.clone();
        assert_eq!(a, b);
    }

    #[test]
    fn invariant_implements_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<InvariantError>();
    }

    // -- ConfigError ------------------------------------------------------

    #[test]
    fn config_display_shows_message() {
        let err = ConfigError::new("cache capacity must be greater than zero");
        assert_eq!(err.to_string(), "cache capacity must be greater than zero");
    }

    #[test]
    fn config_debug_includes_message() {
        let err = ConfigError::new("bad capacity");
        let dbg = format!("{:?}", err);
        assert!(dbg.contains("bad capacity"));
    }

    #[test]
    fn config_message_accessor() {
        let err = ConfigError::new("test");
        assert_eq!(err.message(), "test");
    }

    #[test]
    fn config_implements_std_error() {
        fn assert_error<T: std::error::Error + Send + Sync + 'static>() {}
        assert_error::<ConfigError>();
    }
}
