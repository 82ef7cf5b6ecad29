use crate::{
    error::ActivationError, key::SignatureKey, metrics::ActivatorMetrics,
    resolver::CompiledFactory,
};
use activator_utils::sync::Arc;
use dashmap::DashMap;
use once_cell::sync::OnceCell;

type Slot = Arc<OnceCell<Arc<CompiledFactory>>>;

/// Process-lifetime map from call shape to compiled factory.
///
/// Each key owns a once-cell: the map shard is locked only long enough to
/// fetch or insert the cell, and the build runs outside it. Concurrent first
/// callers for one key block on that key's cell and share its result. Entries
/// are never evicted; a failed build leaves no entry behind.
#[derive(Default)]
pub struct FactoryCache {
    entries: DashMap<SignatureKey, Slot>,
}

impl FactoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_create<F>(
        &self,
        key: &SignatureKey,
        metrics: Option<&ActivatorMetrics>,
        build: F,
    ) -> Result<Arc<CompiledFactory>, ActivationError>
    where
        F: FnOnce(&SignatureKey) -> Result<CompiledFactory, ActivationError>,
    {
        let existing = self.entries.get(key).map(|e| e.value().clone());
        let slot = match existing {
            Some(slot) => slot,
            None => self.entries.entry(key.clone()).or_default().value().clone(),
        };

        if let Some(factory) = slot.get() {
            if let Some(metrics) = metrics {
                metrics.record_factory_cache_hit();
            }
            tracing::trace!("factory cache hit for {}", key);
            return Ok(factory.clone());
        }

        if let Some(metrics) = metrics {
            metrics.record_factory_cache_miss();
        }
        tracing::debug!("factory cache miss for {}", key);

        match slot.get_or_try_init(|| build(key).map(Arc::new)) {
            Ok(factory) => Ok(factory.clone()),
            Err(e) => {
                self.entries
                    .remove_if(key, |_, s| Arc::ptr_eq(s, &slot) && s.get().is_none());
                Err(e)
            }
        }
    }

    pub fn get(&self, key: &SignatureKey) -> Option<Arc<CompiledFactory>> {
        self.entries.get(key).and_then(|e| e.value().get().cloned())
    }

    pub fn contains(&self, key: &SignatureKey) -> bool {
        self.get(key).is_some()
    }

    /// Number of compiled factories. Keys whose first build is still running
    /// are not counted.
    pub fn len(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.value().get().is_some())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
