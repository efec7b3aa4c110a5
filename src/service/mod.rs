//! Prefix and country services backed by a persistent store.
//!
//! ```text
//!   caller ──► PrefixService ──► PrefixCache (ConcurrentFrequencyCache)
//!                   │                  ▲
//!                   ▼                  │ invalidate
//!              PrefixStore ◄──── CountryService
//! ```
//!
//! [`PrefixService::get_by_id`] reads through the cache, updates write
//! through it, and deletes of a prefix or its country evict it. Both
//! services share one [`PrefixCache`] handle. [`VisitCounter`] counts
//! requests for the outer layer that serves them.

pub mod country;
pub mod error;
pub mod model;
pub mod prefix;
pub mod store;
pub mod visits;

pub use country::CountryService;
pub use error::{ServiceError, ServiceResult, StoreError};
pub use model::{Country, CountryRecord, CountryUpdate, NewPrefix, PhoneNumberPrefix, PrefixUpdate};
pub use prefix::{PrefixCache, PrefixService};
pub use store::{CountryStore, InMemoryStore, PrefixStore, StoreResult};
pub use visits::VisitCounter;
