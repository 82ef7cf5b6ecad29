use activator_utils::sync::{AtomicU64, Ordering};
use serde::Serialize;
use std::time::Duration;

#[derive(Debug, Serialize, Clone, Copy, PartialEq)]
pub struct CacheStat {
    pub hits: u64,
    pub misses: u64,
    pub builds: u64,
    pub build_failures: u64,
    pub hit_rate: f64,
    pub build_time_total_us: u64,
    pub size: usize,
}

impl std::fmt::Display for CacheStat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Factory Cache Statistics:")?;
        writeln!(
            f,
            "  hits: {:>8}, misses: {:>8}, hit_rate: {:>6.2}%, size: {:>8}",
            self.hits,
            self.misses,
            self.hit_rate * 100.0,
            self.size
        )?;
        write!(
            f,
            "  builds: {:>6}, build_failures: {:>8}, build_time: {:>8}us",
            self.builds, self.build_failures, self.build_time_total_us
        )
    }
}

/// Factory cache counters.
///
/// All counters use `Ordering::Relaxed` because they are independent and do not
/// synchronize memory between threads.
#[derive(Debug, Default)]
pub struct ActivatorMetrics {
    pub factory_cache_hits: AtomicU64,
    pub factory_cache_misses: AtomicU64,
    /// Completed resolve+compile passes that produced a cached factory
    pub factory_builds: AtomicU64,
    /// Resolve+compile passes that failed and left nothing in the cache
    pub factory_build_failures: AtomicU64,
    /// Total time spent resolving and compiling (in microseconds)
    pub build_time_total_us: AtomicU64,
}

impl ActivatorMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn record_factory_cache_hit(&self) {
        self.factory_cache_hits.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_factory_cache_miss(&self) {
        self.factory_cache_misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_factory_build(&self, duration: Duration) {
        self.factory_builds.fetch_add(1, Ordering::Relaxed);
        self.build_time_total_us
            .fetch_add(duration.as_micros() as u64, Ordering::Relaxed);
    }

    pub fn record_factory_build_failure(&self) {
        self.factory_build_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn builds(&self) -> u64 {
        self.factory_builds.load(Ordering::Relaxed)
    }

    pub fn build_failures(&self) -> u64 {
        self.factory_build_failures.load(Ordering::Relaxed)
    }

    pub fn cache_statistics(&self, size: usize) -> CacheStat {
        let hits = self.factory_cache_hits.load(Ordering::Relaxed);
        let misses = self.factory_cache_misses.load(Ordering::Relaxed);
        let total = hits + misses;
        let hit_rate = if total == 0 {
            0.0
        } else {
            hits as f64 / total as f64
        };
        CacheStat {
            hits,
            misses,
            builds: self.builds(),
            build_failures: self.build_failures(),
            hit_rate,
            build_time_total_us: self.build_time_total_us.load(Ordering::Relaxed),
            size,
        }
    }
}
