//! Prometheus metrics for node storage

use once_cell::sync::OnceCell;
use prometheus::{
    register_int_counter_with_registry, register_int_gauge_with_registry, IntCounter, IntGauge,
    Opts, Registry,
};
use std::sync::Arc;

use crate::Result;

/// Interning counters shared by every backend built with metrics enabled.
#[derive(Clone)]
pub struct StorageMetrics {
    pub intern_hits: IntCounter,
    pub intern_inserts: IntCounter,
    pub erased: IntCounter,
    pub registered_backends: IntGauge,
}

impl StorageMetrics {
    pub fn new(registry: &Registry) -> Result<Self> {
        Ok(Self {
            intern_hits: register_int_counter_with_registry!(
                Opts::new(
                    "rdfgraph_intern_hits_total",
                    "find_or_make calls answered by an existing entry"
                ),
                registry
            )?,
            intern_inserts: register_int_counter_with_registry!(
                Opts::new(
                    "rdfgraph_intern_inserts_total",
                    "find_or_make calls that interned a new entry"
                ),
                registry
            )?,
            erased: register_int_counter_with_registry!(
                Opts::new("rdfgraph_erased_total", "Entries erased from node storage"),
                registry
            )?,
            registered_backends: register_int_gauge_with_registry!(
                Opts::new(
                    "rdfgraph_registered_backends",
                    "Live backends reporting to this registry"
                ),
                registry
            )?,
        })
    }

    /// Process-wide instance registered in the prometheus default registry.
    pub fn global() -> Result<Arc<StorageMetrics>> {
        static GLOBAL: OnceCell<Arc<StorageMetrics>> = OnceCell::new();
        GLOBAL
            .get_or_try_init(|| StorageMetrics::new(prometheus::default_registry()).map(Arc::new))
            .cloned()
    }

    #[inline]
    pub fn record_intern(&self, inserted: bool) {
        if inserted {
            self.intern_inserts.inc();
        } else {
            self.intern_hits.inc();
        }
    }

    #[inline]
    pub fn record_erase(&self, erased: bool) {
        if erased {
            self.erased.inc();
        }
    }

    pub fn hit_rate(&self) -> f64 {
        let hits = self.intern_hits.get() as f64;
        let total = hits + self.intern_inserts.get() as f64;
        if total > 0.0 {
            hits / total
        } else {
            0.0
        }
    }
}

impl std::fmt::Debug for StorageMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageMetrics")
            .field("intern_hits", &self.intern_hits.get())
            .field("intern_inserts", &self.intern_inserts.get())
            .field("erased", &self.erased.get())
            .field("registered_backends", &self.registered_backends.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_hit_rate() {
        let registry = Registry::new();
        let metrics = StorageMetrics::new(&registry).unwrap();
        assert_eq!(metrics.hit_rate(), 0.0);

        metrics.record_intern(true);
        metrics.record_intern(false);
        metrics.record_intern(false);
        metrics.record_intern(false);
        assert!((metrics.hit_rate() - 0.75).abs() < f64::EPSILON);
    }

    #[test]
    fn test_erase_counts_only_hits() {
        let registry = Registry::new();
        let metrics = StorageMetrics::new(&registry).unwrap();
        metrics.record_erase(true);
        metrics.record_erase(false);
        assert_eq!(metrics.erased.get(), 1);
    }

    #[test]
    fn test_double_registration_is_metrics_error() {
        let registry = Registry::new();
        let _first = StorageMetrics::new(&registry).unwrap();
        let err = StorageMetrics::new(&registry).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Metrics);
    }

    #[test]
    fn test_global_is_shared() {
        let a = StorageMetrics::global().unwrap();
        let b = StorageMetrics::global().unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }
}
