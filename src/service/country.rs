use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, info};

use crate::service::error::{ServiceError, ServiceResult};
use crate::service::model::{Country, CountryRecord, CountryUpdate};
use crate::service::prefix::PrefixCache;
use crate::service::store::{CountryStore, PrefixStore};

/// Country CRUD. Holds the prefix cache only to invalidate it when a
/// country's prefixes disappear with it.
pub struct CountryService<S> {
    store: Arc<S>,
    cache: PrefixCache,
}

impl<S> Clone for CountryService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            cache: self.cache.clone(),
        }
    }
}

impl<S> CountryService<S>
where
    S: CountryStore + PrefixStore,
{
    pub fn new(store: Arc<S>, cache: PrefixCache) -> Self {
        Self { store, cache }
    }

    fn record(&self, country: Country) -> ServiceResult<CountryRecord> {
        let prefixes = self.store.find_prefixes_by_country_code(&country.code)?;
        Ok(CountryRecord::new(country, prefixes))
    }

    pub fn get_all(&self) -> ServiceResult<Vec<CountryRecord>> {
        self.store
            .find_all_countries()?
            .into_iter()
            .map(|country| self.record(country))
            .collect()
    }

    pub fn get_by_code(&self, code: &str) -> ServiceResult<CountryRecord> {
        let country = self
            .store
            .find_country(code)?
            .ok_or_else(|| ServiceError::CountryNotFound(code.to_string()))?;
        self.record(country)
    }

    pub fn create(&self, country: Country) -> ServiceResult<CountryRecord> {
        if self.store.country_exists(&country.code)? {
            return Err(ServiceError::DuplicateCountry(country.code));
        }
        let saved = self.store.save_country(country)?;
        info!(code = %saved.code, "created country");
        Ok(CountryRecord::new(saved, Vec::new()))
    }

    /// Creates every country or none of them.
    ///
    /// A code that already exists, or appears twice in `countries`, rejects
    /// the whole batch before anything is written.
    pub fn create_all(&self, countries: Vec<Country>) -> ServiceResult<Vec<CountryRecord>> {
        {
            let mut seen = HashSet::with_capacity(countries.len());
            for country in &countries {
                if !seen.insert(country.code.as_str())
                    || self.store.country_exists(&country.code)?
                {
                    return Err(ServiceError::DuplicateCountry(country.code.clone()));
                }
            }
        }

        countries
            .into_iter()
            .map(|country| {
                let saved = self.store.save_country(country)?;
                Ok(CountryRecord::new(saved, Vec::new()))
            })
            .collect()
    }

    pub fn update(&self, code: &str, update: CountryUpdate) -> ServiceResult<CountryRecord> {
        let mut existing = self
            .store
            .find_country(code)?
            .ok_or_else(|| ServiceError::CountryNotFound(code.to_string()))?;
        existing.name = update.name;
        existing.phone_code = update.phone_code;

        let saved = self.store.save_country(existing)?;
        self.record(saved)
    }

    /// Finds the first country whose code or name equals `value` ignoring
    /// case, or whose phone code equals `value` exactly.
    pub fn lookup(&self, value: &str) -> ServiceResult<Option<CountryRecord>> {
        let found = self.store.find_all_countries()?.into_iter().find(|c| {
            c.code.eq_ignore_ascii_case(value)
                || c.name.to_lowercase() == value.to_lowercase()
                || c.phone_code == value
        });
        found.map(|country| self.record(country)).transpose()
    }

    /// Deletes the country with its prefixes and evicts each of those
    /// prefixes from the cache. Deleting an unknown code is a no-op.
    pub fn delete(&self, code: &str) -> ServiceResult<()> {
        let prefix_ids: Vec<_> = self
            .store
            .find_prefixes_by_country_code(code)?
            .into_iter()
            .map(|p| p.id)
            .collect();

        if !self.store.delete_country(code)? {
            debug!(code, "delete of unknown country ignored");
            return Ok(());
        }

        for id in &prefix_ids {
            self.cache.remove(*id);
        }
        info!(code, invalidated = prefix_ids.len(), "deleted country");
        Ok(())
    }
}
