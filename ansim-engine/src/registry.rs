//! Shared zone registry.
//!
//! The zone set is mutated by an external hazard feed from its own
//! execution context while the supervisor loop evaluates fixes. The loop
//! only ever takes snapshots, so feed writes never interleave with a
//! half-finished evaluation, and per-zone visit state survives set changes
//! because it is keyed by zone id.

use std::sync::Arc;

use tokio::sync::RwLock;

use ansim_core::zones::{DangerZone, ZoneId, ZoneRegistry};

/// Thread-safe handle to the zone registry. Clones share the same set.
#[derive(Debug, Clone, Default)]
pub struct SharedZones {
    zones: Arc<RwLock<ZoneRegistry>>,
}

impl SharedZones {
    /// Create an empty shared registry.
    pub fn new() -> Self {
        SharedZones {
            zones: Arc::new(RwLock::new(ZoneRegistry::new())),
        }
    }

    /// Create a shared registry seeded with zones.
    pub fn with_zones(zones: impl IntoIterator<Item = DangerZone>) -> Self {
        SharedZones {
            zones: Arc::new(RwLock::new(zones.into_iter().collect())),
        }
    }

    /// Add a zone, or replace the zone with the same id.
    pub async fn add_zone(&self, zone: DangerZone) {
        self.zones.write().await.add_zone(zone);
    }

    /// Remove a zone by id.
    pub async fn remove_zone(&self, id: ZoneId) -> bool {
        self.zones.write().await.remove_zone(id)
    }

    /// Get a copy of a zone by id.
    pub async fn get_zone(&self, id: ZoneId) -> Option<DangerZone> {
        self.zones.read().await.get_zone(id).cloned()
    }

    /// Clone the current zone list for one evaluation pass.
    pub async fn snapshot(&self) -> Vec<DangerZone> {
        self.zones.read().await.zones().to_vec()
    }

    /// Number of registered zones.
    pub async fn len(&self) -> usize {
        self.zones.read().await.len()
    }

    /// Whether the registry holds no zones.
    pub async fn is_empty(&self) -> bool {
        self.zones.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ansim_core::geo::Coordinate;

    fn zone(id: ZoneId) -> DangerZone {
        DangerZone::new(
            id,
            Coordinate::new(37.555841, 126.936913),
            100.0,
            format!("zone {}", id),
            "hazard",
        )
    }

    #[tokio::test]
    async fn test_feed_operations() {
        let shared = SharedZones::new();
        assert!(shared.is_empty().await);

        shared.add_zone(zone(1)).await;
        shared.add_zone(zone(2)).await;
        assert_eq!(shared.len().await, 2);
        assert!(shared.get_zone(1).await.is_some());

        assert!(shared.remove_zone(1).await);
        assert!(!shared.remove_zone(1).await);
        assert_eq!(shared.snapshot().await.len(), 1);
    }

    #[tokio::test]
    async fn test_clones_share_the_set() {
        let shared = SharedZones::with_zones([zone(1)]);
        let feed_handle = shared.clone();

        feed_handle.add_zone(zone(2)).await;
        assert_eq!(shared.len().await, 2);
    }
}
