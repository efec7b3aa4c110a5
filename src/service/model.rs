//! Records exchanged between the services, the store and the cache.

use crate::policy::lfu::EntryId;

/// A country and its international dialing code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Country {
    pub code: String,
    pub name: String,
    pub phone_code: String,
}

/// A phone-number prefix assigned to a region of a country.
///
/// This is the value type held by the prefix cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneNumberPrefix {
    pub id: EntryId,
    pub prefix: String,
    pub region_name: String,
    pub country_code: String,
}

/// Input for creating a prefix; the store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPrefix {
    pub prefix: String,
    pub region_name: String,
    pub country_code: String,
}

/// Mutable fields of an existing prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixUpdate {
    pub prefix: String,
    pub region_name: String,
}

/// Mutable fields of an existing country.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryUpdate {
    pub name: String,
    pub phone_code: String,
}

/// A country together with its prefixes, as returned to callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryRecord {
    pub code: String,
    pub name: String,
    pub phone_code: String,
    pub prefixes: Vec<PhoneNumberPrefix>,
}

impl CountryRecord {
    pub fn new(country: Country, prefixes: Vec<PhoneNumberPrefix>) -> Self {
        Self {
            code: country.code,
            name: country.name,
            phone_code: country.phone_code,
            prefixes,
        }
    }
}

impl NewPrefix {
    pub(crate) fn with_id(self, id: EntryId) -> PhoneNumberPrefix {
        PhoneNumberPrefix {
            id,
            prefix: self.prefix,
            region_name: self.region_name,
            country_code: self.country_code,
        }
    }
}
