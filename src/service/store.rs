//! The persistent store seam.
//!
//! Services only see [`PrefixStore`] and [`CountryStore`]. A database-backed
//! implementation lives with the web layer; [`InMemoryStore`] backs tests and
//! the demo.

use std::collections::BTreeMap;

use parking_lot::RwLock;

use crate::policy::lfu::EntryId;
use crate::service::error::StoreError;
use crate::service::model::{Country, NewPrefix, PhoneNumberPrefix};

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistent storage of phone-number prefixes.
pub trait PrefixStore: Send + Sync {
    fn find_all_prefixes(&self) -> StoreResult<Vec<PhoneNumberPrefix>>;

    fn find_prefix(&self, id: EntryId) -> StoreResult<Option<PhoneNumberPrefix>>;

    fn find_prefixes_by_country_code(&self, code: &str) -> StoreResult<Vec<PhoneNumberPrefix>>;

    /// Prefixes of every country whose name equals `name` exactly.
    fn find_prefixes_by_country_name(&self, name: &str) -> StoreResult<Vec<PhoneNumberPrefix>>;

    fn prefix_exists(&self, id: EntryId) -> StoreResult<bool>;

    fn prefix_exists_for_country(&self, prefix: &str, country_code: &str) -> StoreResult<bool>;

    /// Stores a new prefix and returns it with its assigned id.
    fn insert_prefix(&self, prefix: NewPrefix) -> StoreResult<PhoneNumberPrefix>;

    /// Overwrites an existing prefix.
    fn save_prefix(&self, prefix: PhoneNumberPrefix) -> StoreResult<PhoneNumberPrefix>;

    /// Returns `true` if a prefix was deleted.
    fn delete_prefix(&self, id: EntryId) -> StoreResult<bool>;
}

/// Persistent storage of countries.
pub trait CountryStore: Send + Sync {
    fn find_all_countries(&self) -> StoreResult<Vec<Country>>;

    fn find_country(&self, code: &str) -> StoreResult<Option<Country>>;

    fn country_exists(&self, code: &str) -> StoreResult<bool>;

    /// Inserts or overwrites a country.
    fn save_country(&self, country: Country) -> StoreResult<Country>;

    /// Deletes a country and every prefix that belongs to it.
    ///
    /// Returns `true` if the country existed.
    fn delete_country(&self, code: &str) -> StoreResult<bool>;
}

#[derive(Debug)]
struct StoreState {
    countries: BTreeMap<String, Country>,
    prefixes: BTreeMap<EntryId, PhoneNumberPrefix>,
    next_id: EntryId,
}

/// In-process store keeping both tables behind one `RwLock`.
///
/// Prefix ids are assigned from 1 upward and never reused.
#[derive(Debug)]
pub struct InMemoryStore {
    state: RwLock<StoreState>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(StoreState {
                countries: BTreeMap::new(),
                prefixes: BTreeMap::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PrefixStore for InMemoryStore {
    fn find_all_prefixes(&self) -> StoreResult<Vec<PhoneNumberPrefix>> {
        Ok(self.state.read().prefixes.values().cloned().collect())
    }

    fn find_prefix(&self, id: EntryId) -> StoreResult<Option<PhoneNumberPrefix>> {
        Ok(self.state.read().prefixes.get(&id).cloned())
    }

    fn find_prefixes_by_country_code(&self, code: &str) -> StoreResult<Vec<PhoneNumberPrefix>> {
        let state = self.state.read();
        Ok(state
            .prefixes
            .values()
            .filter(|p| p.country_code == code)
            .cloned()
            .collect())
    }

    fn find_prefixes_by_country_name(&self, name: &str) -> StoreResult<Vec<PhoneNumberPrefix>> {
        let state = self.state.read();
        Ok(state
            .prefixes
            .values()
            .filter(|p| {
                state
                    .countries
                    .get(&p.country_code)
                    .is_some_and(|c| c.name == name)
            })
            .cloned()
            .collect())
    }

    fn prefix_exists(&self, id: EntryId) -> StoreResult<bool> {
        Ok(self.state.read().prefixes.contains_key(&id))
    }

    fn prefix_exists_for_country(&self, prefix: &str, country_code: &str) -> StoreResult<bool> {
        let state = self.state.read();
        Ok(state
            .prefixes
            .values()
            .any(|p| p.prefix == prefix && p.country_code == country_code))
    }

    fn insert_prefix(&self, prefix: NewPrefix) -> StoreResult<PhoneNumberPrefix> {
        let mut state = self.state.write();
        let id = state.next_id;
        state.next_id += 1;
        let stored = prefix.with_id(id);
        state.prefixes.insert(id, stored.clone());
        Ok(stored)
    }

    fn save_prefix(&self, prefix: PhoneNumberPrefix) -> StoreResult<PhoneNumberPrefix> {
        let mut state = self.state.write();
        state.prefixes.insert(prefix.id, prefix.clone());
        Ok(prefix)
    }

    fn delete_prefix(&self, id: EntryId) -> StoreResult<bool> {
        Ok(self.state.write().prefixes.remove(&id).is_some())
    }
}

impl CountryStore for InMemoryStore {
    fn find_all_countries(&self) -> StoreResult<Vec<Country>> {
        Ok(self.state.read().countries.values().cloned().collect())
    }

    fn find_country(&self, code: &str) -> StoreResult<Option<Country>> {
        Ok(self.state.read().countries.get(code).cloned())
    }

    fn country_exists(&self, code: &str) -> StoreResult<bool> {
        Ok(self.state.read().countries.contains_key(code))
    }

    fn save_country(&self, country: Country) -> StoreResult<Country> {
        let mut state = self.state.write();
        state.countries.insert(country.code.clone(), country.clone());
        Ok(country)
    }

    fn delete_country(&self, code: &str) -> StoreResult<bool> {
        let mut state = self.state.write();
        if state.countries.remove(code).is_none() {
            return Ok(false);
        }
        state.prefixes.retain(|_, p| p.country_code != code);
        Ok(true)
    }
}
