use std::sync::Arc;

use tracing::{debug, info};

use crate::policy::lfu::{ConcurrentFrequencyCache, EntryId};
use crate::service::error::{ServiceError, ServiceResult};
use crate::service::model::{NewPrefix, PhoneNumberPrefix, PrefixUpdate};
use crate::service::store::{CountryStore, PrefixStore};

/// Shared cache of prefix records keyed by prefix id.
pub type PrefixCache = ConcurrentFrequencyCache<PhoneNumberPrefix>;

fn validate_id(id: EntryId) -> ServiceResult<()> {
    if id < 0 {
        return Err(ServiceError::InvalidId(id));
    }
    Ok(())
}

/// Prefix lookups with the cache in front of the store.
///
/// Reads go through the cache, updates write through it and deletes
/// invalidate it. Listing queries bypass the cache entirely.
pub struct PrefixService<S> {
    store: Arc<S>,
    cache: PrefixCache,
}

impl<S> Clone for PrefixService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            cache: self.cache.clone(),
        }
    }
}

impl<S> PrefixService<S>
where
    S: PrefixStore + CountryStore,
{
    pub fn new(store: Arc<S>, cache: PrefixCache) -> Self {
        Self { store, cache }
    }

    pub fn cache(&self) -> &PrefixCache {
        &self.cache
    }

    pub fn get_all(&self) -> ServiceResult<Vec<PhoneNumberPrefix>> {
        Ok(self.store.find_all_prefixes()?)
    }

    pub fn get_by_country_code(&self, code: &str) -> ServiceResult<Vec<PhoneNumberPrefix>> {
        Ok(self.store.find_prefixes_by_country_code(code)?)
    }

    pub fn get_by_country_name(&self, name: &str) -> ServiceResult<Vec<PhoneNumberPrefix>> {
        Ok(self.store.find_prefixes_by_country_name(name)?)
    }

    /// Returns the prefix with `id`, loading it into the cache on a miss.
    ///
    /// # Errors
    ///
    /// [`ServiceError::InvalidId`] for a negative id,
    /// [`ServiceError::PrefixNotFound`] if the store has no such prefix.
    pub fn get_by_id(&self, id: EntryId) -> ServiceResult<PhoneNumberPrefix> {
        validate_id(id)?;

        if let Some(cached) = self.cache.get(id) {
            return Ok(cached);
        }

        debug!(id, "prefix not cached, loading from store");
        let prefix = self
            .store
            .find_prefix(id)?
            .ok_or(ServiceError::PrefixNotFound(id))?;
        self.cache.put(id, prefix.clone());
        Ok(prefix)
    }

    /// Stores a new prefix. The cache is populated on first read, not here.
    pub fn create(&self, new: NewPrefix) -> ServiceResult<PhoneNumberPrefix> {
        if self
            .store
            .prefix_exists_for_country(&new.prefix, &new.country_code)?
        {
            return Err(ServiceError::DuplicatePrefix {
                prefix: new.prefix,
                country_code: new.country_code,
            });
        }
        if !self.store.country_exists(&new.country_code)? {
            return Err(ServiceError::UnknownCountry(new.country_code));
        }

        let created = self.store.insert_prefix(new)?;
        info!(id = created.id, country = %created.country_code, "created prefix");
        Ok(created)
    }

    /// Updates prefix text and region, then writes the result through to the
    /// cache.
    pub fn update(&self, id: EntryId, update: PrefixUpdate) -> ServiceResult<PhoneNumberPrefix> {
        validate_id(id)?;

        let mut existing = self
            .store
            .find_prefix(id)?
            .ok_or(ServiceError::PrefixNotFound(id))?;
        existing.prefix = update.prefix;
        existing.region_name = update.region_name;

        let saved = self.store.save_prefix(existing)?;
        self.cache.put(id, saved.clone());
        debug!(id, "updated prefix");
        Ok(saved)
    }

    /// Deletes the prefix, then drops it from the cache.
    pub fn delete(&self, id: EntryId) -> ServiceResult<()> {
        validate_id(id)?;

        if !self.store.prefix_exists(id)? {
            return Err(ServiceError::PrefixNotFound(id));
        }
        self.store.delete_prefix(id)?;
        self.cache.remove(id);
        info!(id, "deleted prefix");
        Ok(())
    }
}
