pub use crate::builder::{CacheBuilder, CacheConfig};
pub use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::FrequencyMetricsSnapshot;
pub use crate::policy::lfu::{ConcurrentFrequencyCache, EntryId, FrequencyCache};
pub use crate::service::{
    Country, CountryRecord, CountryService, CountryStore, CountryUpdate, InMemoryStore, NewPrefix,
    PhoneNumberPrefix, PrefixCache, PrefixService, PrefixStore, PrefixUpdate, ServiceError,
    VisitCounter,
};
pub use crate::traits::{ConcurrentCache, CoreCache, LfuCacheTrait, MutableCache};
