//! Counters for the frequency cache, compiled in with the `metrics` feature.
//!
//! Recording lives in [`metrics_impl`], point-in-time copies in [`snapshot`],
//! and [`exporter`] writes snapshots for scraping.

pub mod exporter;
pub mod metrics_impl;
pub mod snapshot;
pub mod traits;
