use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Shared count of requests served. Clones share the same counter.
#[derive(Debug, Clone, Default)]
pub struct VisitCounter {
    count: Arc<AtomicU64>,
}

impl VisitCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one visit and returns the new total.
    pub fn increment(&self) -> u64 {
        self.count.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    pub fn reset(&self) {
        self.count.store(0, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;

    #[test]
    fn increments_from_zero_and_resets() {
        let visits = VisitCounter::new();
        assert_eq!(visits.count(), 0);

        assert_eq!(visits.increment(), 1);
        assert_eq!(visits.increment(), 2);

        visits.reset();
        assert_eq!(visits.count(), 0);
    }

    #[test]
    fn clones_count_into_the_same_total() {
        let visits = VisitCounter::new();
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let visits = visits.clone();
                thread::spawn(move || {
                    for _ in 0..250 {
                        visits.increment();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(visits.count(), 1000);
    }
}
