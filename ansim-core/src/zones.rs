//! Hazard zone definitions and the zone registry.
//!
//! Zones are circular areas around a center coordinate. The registry owns
//! the zone set exclusively; detection code only ever reads it. A zone feed
//! may grow and shrink the set at any time, but a registered zone is never
//! mutated in place - reconfiguring a zone is remove + re-add under the
//! same id.

use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;

/// Stable identifier of a hazard zone, unique for the process lifetime.
pub type ZoneId = u32;

fn default_enabled() -> bool {
    true
}

/// A circular hazard zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DangerZone {
    /// Zone identifier
    pub id: ZoneId,
    /// Center of the zone
    pub center: Coordinate,
    /// Alerting radius in meters
    pub radius_m: f64,
    /// Short title shown to the user when the alert fires
    pub title: String,
    /// Longer description of the hazard
    pub description: String,
    /// Whether the zone takes part in detection
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl DangerZone {
    /// Create an enabled zone.
    pub fn new(
        id: ZoneId,
        center: Coordinate,
        radius_m: f64,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        DangerZone {
            id,
            center,
            radius_m,
            title: title.into(),
            description: description.into(),
            enabled: true,
        }
    }
}

/// Ordered set of hazard zones.
///
/// Iteration order is insertion order, which is also the order the detector
/// evaluates zones in - and therefore the order the first-match alerting
/// policy applies.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoneRegistry {
    zones: Vec<DangerZone>,
}

impl ZoneRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        ZoneRegistry { zones: Vec::new() }
    }

    /// Add a zone, or replace the zone with the same id.
    ///
    /// A replaced zone keeps its position in the evaluation order.
    pub fn add_zone(&mut self, zone: DangerZone) {
        match self.zones.iter_mut().find(|z| z.id == zone.id) {
            Some(existing) => *existing = zone,
            None => self.zones.push(zone),
        }
    }

    /// Remove a zone by id.
    pub fn remove_zone(&mut self, id: ZoneId) -> bool {
        let before = self.zones.len();
        self.zones.retain(|z| z.id != id);
        self.zones.len() != before
    }

    /// Get a zone by id.
    pub fn get_zone(&self, id: ZoneId) -> Option<&DangerZone> {
        self.zones.iter().find(|z| z.id == id)
    }

    /// All zones, in insertion order.
    pub fn zones(&self) -> &[DangerZone] {
        &self.zones
    }

    /// Number of registered zones.
    pub fn len(&self) -> usize {
        self.zones.len()
    }

    /// Whether the registry holds no zones.
    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}

impl FromIterator<DangerZone> for ZoneRegistry {
    fn from_iter<I: IntoIterator<Item = DangerZone>>(iter: I) -> Self {
        let mut registry = ZoneRegistry::new();
        for zone in iter {
            registry.add_zone(zone);
        }
        registry
    }
}
