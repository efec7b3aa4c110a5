use std::sync::Arc;

use prefix_cache::builder::{CacheBuilder, CacheConfig};
use prefix_cache::service::{
    Country, CountryService, InMemoryStore, NewPrefix, PrefixCache, PrefixService, ServiceError,
    VisitCounter,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), ServiceError> {
    // RUST_LOG=prefix_cache=debug shows hits, misses and evictions.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let store = Arc::new(InMemoryStore::new());
    let cache: PrefixCache = CacheBuilder::from_config(&CacheConfig::new(2)).build();
    let countries = CountryService::new(Arc::clone(&store), cache.clone());
    let prefixes = PrefixService::new(Arc::clone(&store), cache.clone());

    countries.create_all(vec![
        Country {
            code: "BY".into(),
            name: "Belarus".into(),
            phone_code: "+375".into(),
        },
        Country {
            code: "DE".into(),
            name: "Germany".into(),
            phone_code: "+49".into(),
        },
    ])?;

    let mut ids = Vec::new();
    for (prefix, region, country_code) in [
        ("17", "Minsk", "BY"),
        ("162", "Brest", "BY"),
        ("30", "Berlin", "DE"),
    ] {
        let created = prefixes.create(NewPrefix {
            prefix: prefix.into(),
            region_name: region.into(),
            country_code: country_code.into(),
        })?;
        ids.push(created.id);
    }

    // Minsk is read three times, Brest once, so Berlin pushes out Brest.
    let visits = VisitCounter::new();
    for &id in &[ids[0], ids[0], ids[0], ids[1], ids[2]] {
        visits.increment();
        prefixes.get_by_id(id)?;
    }

    for id in &ids {
        println!("prefix {} cached? {}", id, cache.contains(*id));
    }

    println!("lookups served: {}", visits.count());

    countries.delete("BY")?;
    println!("after deleting BY, cached entries: {}", cache.len());

    Ok(())
}

// Expected output:
// prefix 1 cached? true
// prefix 2 cached? false
// prefix 3 cached? true
// lookups served: 5
// after deleting BY, cached entries: 1
