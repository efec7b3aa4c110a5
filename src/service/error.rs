use thiserror::Error;

use crate::policy::lfu::EntryId;

/// Failure reported by a persistent store implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Errors returned by the prefix and country services.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    #[error("invalid id: {0}")]
    InvalidId(EntryId),

    #[error("prefix with id '{0}' not found")]
    PrefixNotFound(EntryId),

    #[error("country with code '{0}' not found")]
    CountryNotFound(String),

    #[error("prefix '{prefix}' already exists for country '{country_code}'")]
    DuplicatePrefix {
        prefix: String,
        country_code: String,
    },

    #[error("country with code '{0}' already exists")]
    DuplicateCountry(String),

    #[error("country with code '{0}' does not exist")]
    UnknownCountry(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
