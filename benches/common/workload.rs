//! Deterministic id streams for hit-rate benchmarks.

use prefix_cache::policy::lfu::EntryId;
use prefix_cache::traits::CoreCache;

#[derive(Debug, Clone, Copy)]
pub enum Workload {
    /// Uniform ids in `[0, universe)`.
    Uniform,
    /// A hot set of `hot_fraction * universe` ids receives `hot_prob` of reads.
    Hotset { hot_fraction: f64, hot_prob: f64 },
    /// Sequential scan in `[0, universe)`.
    Scan,
}

#[derive(Debug, Clone)]
pub struct WorkloadGenerator {
    universe: u64,
    workload: Workload,
    rng: XorShift64,
    scan_pos: u64,
}

impl WorkloadGenerator {
    pub fn new(universe: u64, workload: Workload, seed: u64) -> Self {
        Self {
            universe: universe.max(1),
            workload,
            rng: XorShift64::new(seed),
            scan_pos: 0,
        }
    }

    pub fn next_id(&mut self) -> EntryId {
        let id = match self.workload {
            Workload::Uniform => self.rng.next_u64() % self.universe,
            Workload::Hotset {
                hot_fraction,
                hot_prob,
            } => {
                let hot_size = ((self.universe as f64) * hot_fraction.clamp(0.0, 1.0)).round() as u64;
                let hot_size = hot_size.clamp(1, self.universe);
                if self.rng.next_f64() < hot_prob || hot_size == self.universe {
                    self.rng.next_u64() % hot_size
                } else {
                    hot_size + self.rng.next_u64() % (self.universe - hot_size)
                }
            },
            Workload::Scan => {
                let id = self.scan_pos;
                self.scan_pos = (self.scan_pos + 1) % self.universe;
                id
            },
        };
        id as EntryId
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HitRate {
    pub hits: u64,
    pub misses: u64,
}

impl HitRate {
    pub fn hit_rate(self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Drives `cache` the way the prefix service does: read, then load on miss.
pub fn run_hit_rate<C, V, F>(
    cache: &mut C,
    generator: &mut WorkloadGenerator,
    operations: usize,
    load: F,
) -> HitRate
where
    C: CoreCache<EntryId, V>,
    F: Fn(EntryId) -> V,
{
    let mut rate = HitRate::default();
    for _ in 0..operations {
        let id = generator.next_id();
        if cache.get(&id).is_some() {
            rate.hits += 1;
        } else {
            rate.misses += 1;
            cache.insert(id, load(id));
        }
    }
    rate
}

#[derive(Debug, Clone, Copy)]
struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    fn new(seed: u64) -> Self {
        Self { state: seed.max(1) }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() as f64) / (u64::MAX as f64)
    }
}
