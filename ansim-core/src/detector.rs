//! Entry/exit detection over the registered zones.
//!
//! Each position fix is classified against every enabled zone, and the
//! detector emits a transition wherever containment changed since the
//! previous fix. All memberships for a fix update in the same pass: the
//! returned transitions describe one atomic step, never a mix of pre- and
//! post-update state.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::geo::{distance_meters, Coordinate};
use crate::zones::{DangerZone, ZoneId};

/// A position fix from the location source.
///
/// Timestamps are monotonic milliseconds; they order fixes but carry no
/// calendar meaning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationFix {
    /// Position of the fix
    pub coordinate: Coordinate,
    /// Monotonic timestamp in milliseconds
    pub timestamp_ms: u64,
}

impl LocationFix {
    /// Create a fix.
    pub fn new(coordinate: Coordinate, timestamp_ms: u64) -> Self {
        LocationFix {
            coordinate,
            timestamp_ms,
        }
    }
}

/// Containment state of one zone, tracked across fixes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ZoneMembership {
    /// Whether the last evaluated fix was inside the zone
    pub inside: bool,
    /// Whether the current visit has already alerted
    pub alerted: bool,
}

/// Membership of every zone evaluated so far, keyed by zone id.
///
/// Keying by id rather than list position keeps a zone's visit state intact
/// while the zone feed adds and removes unrelated zones around it.
#[derive(Debug, Clone, Default)]
pub struct DetectionState {
    memberships: HashMap<ZoneId, ZoneMembership>,
}

impl DetectionState {
    /// Create an empty state.
    pub fn new() -> Self {
        DetectionState {
            memberships: HashMap::new(),
        }
    }

    /// Membership for a zone; zones never evaluated are outside.
    pub fn membership(&self, id: ZoneId) -> ZoneMembership {
        self.memberships.get(&id).copied().unwrap_or_default()
    }

    /// Whether the last fix was inside the zone.
    pub fn is_inside(&self, id: ZoneId) -> bool {
        self.membership(id).inside
    }

    /// Whether the zone's current visit has already alerted.
    pub fn has_alerted(&self, id: ZoneId) -> bool {
        self.membership(id).alerted
    }

    /// Mark the zone's current visit as alerted.
    ///
    /// The alerted flag is only meaningful while the membership is inside.
    pub(crate) fn mark_alerted(&mut self, id: ZoneId) {
        let membership = self.memberships.entry(id).or_default();
        debug_assert!(membership.inside);
        membership.alerted = true;
    }

    pub(crate) fn membership_mut(&mut self, id: ZoneId) -> &mut ZoneMembership {
        self.memberships.entry(id).or_default()
    }

    pub(crate) fn forget(&mut self, id: ZoneId) {
        self.memberships.remove(&id);
    }

    /// Drop all tracked memberships.
    pub fn clear(&mut self) {
        self.memberships.clear();
    }
}

/// A containment change produced by one fix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ZoneTransition {
    /// The position moved from outside to inside the zone
    Entered { zone_id: ZoneId },
    /// The position moved from inside to outside the zone
    Exited { zone_id: ZoneId },
}

impl ZoneTransition {
    /// The zone this transition belongs to.
    pub fn zone_id(&self) -> ZoneId {
        match self {
            ZoneTransition::Entered { zone_id } => *zone_id,
            ZoneTransition::Exited { zone_id } => *zone_id,
        }
    }
}

/// Evaluate one fix against the zone list, in list order.
///
/// A fix is inside a zone iff its distance to the center is strictly less
/// than the radius; a fix exactly on the boundary is outside. Exiting a
/// zone clears its alerted flag, re-arming it for the next entry.
///
/// Disabled zones are skipped and hold no membership, so a zone re-added
/// as enabled starts a fresh visit.
pub fn evaluate(
    fix: &LocationFix,
    zones: &[DangerZone],
    state: &mut DetectionState,
) -> Vec<ZoneTransition> {
    let mut transitions = Vec::new();

    for zone in zones {
        if !zone.enabled {
            state.forget(zone.id);
            continue;
        }

        let inside = distance_meters(fix.coordinate, zone.center) < zone.radius_m;
        let membership = state.membership_mut(zone.id);
        if inside == membership.inside {
            continue;
        }

        membership.inside = inside;
        if inside {
            transitions.push(ZoneTransition::Entered { zone_id: zone.id });
        } else {
            membership.alerted = false;
            transitions.push(ZoneTransition::Exited { zone_id: zone.id });
        }
    }

    transitions
}

#[cfg(test)]
mod tests {
    use super::*;

    const CENTER: Coordinate = Coordinate {
        latitude: 37.555841,
        longitude: 126.936913,
    };

    const FAR_AWAY: Coordinate = Coordinate {
        latitude: 37.5669,
        longitude: 126.978,
    };

    fn zone(id: ZoneId, center: Coordinate, radius_m: f64) -> DangerZone {
        DangerZone::new(id, center, radius_m, format!("zone {}", id), "hazard")
    }

    fn fix(coordinate: Coordinate) -> LocationFix {
        LocationFix::new(coordinate, 0)
    }

    /// A coordinate `meters` north of `from`.
    fn north_of(from: Coordinate, meters: f64) -> Coordinate {
        Coordinate::new(from.latitude + meters / 111_195.0, from.longitude)
    }

    #[test]
    fn test_enter_and_exit() {
        let zones = vec![zone(1, CENTER, 100.0)];
        let mut state = DetectionState::new();

        // Far away: outside, no transition
        let transitions = evaluate(&fix(FAR_AWAY), &zones, &mut state);
        assert!(transitions.is_empty());
        assert!(!state.is_inside(1));

        // At the center: entered
        let transitions = evaluate(&fix(CENTER), &zones, &mut state);
        assert_eq!(transitions, vec![ZoneTransition::Entered { zone_id: 1 }]);
        assert!(state.is_inside(1));

        // Still at the center: no transition
        let transitions = evaluate(&fix(CENTER), &zones, &mut state);
        assert!(transitions.is_empty());

        // Far away again: exited
        let transitions = evaluate(&fix(FAR_AWAY), &zones, &mut state);
        assert_eq!(transitions, vec![ZoneTransition::Exited { zone_id: 1 }]);
        assert!(!state.is_inside(1));
    }

    #[test]
    fn test_boundary_is_outside() {
        let mut state = DetectionState::new();

        // Set the radius to the exact measured distance so the comparison
        // really is distance == radius.
        let on_boundary = north_of(CENTER, 100.0);
        let mut zones = vec![zone(1, CENTER, 100.0)];
        zones[0].radius_m = distance_meters(on_boundary, CENTER);

        let transitions = evaluate(&fix(on_boundary), &zones, &mut state);
        assert!(transitions.is_empty());
        assert!(!state.is_inside(1));

        // Just inside the boundary does enter
        let just_inside = north_of(CENTER, 99.0);
        let transitions = evaluate(&fix(just_inside), &zones, &mut state);
        assert_eq!(transitions, vec![ZoneTransition::Entered { zone_id: 1 }]);
    }

    #[test]
    fn test_exit_clears_alerted_flag() {
        let zones = vec![zone(1, CENTER, 100.0)];
        let mut state = DetectionState::new();

        evaluate(&fix(CENTER), &zones, &mut state);
        state.mark_alerted(1);
        assert!(state.has_alerted(1));

        evaluate(&fix(FAR_AWAY), &zones, &mut state);
        assert!(!state.has_alerted(1));
    }

    #[test]
    fn test_multiple_zones_transition_together() {
        // Two overlapping zones around the same center
        let zones = vec![zone(1, CENTER, 100.0), zone(2, CENTER, 200.0)];
        let mut state = DetectionState::new();

        let transitions = evaluate(&fix(CENTER), &zones, &mut state);
        assert_eq!(
            transitions,
            vec![
                ZoneTransition::Entered { zone_id: 1 },
                ZoneTransition::Entered { zone_id: 2 },
            ]
        );
        let ids: Vec<ZoneId> = transitions.iter().map(|t| t.zone_id()).collect();
        assert_eq!(ids, vec![1, 2]);

        // 150 m out: inside zone 2 only
        let transitions = evaluate(&fix(north_of(CENTER, 150.0)), &zones, &mut state);
        assert_eq!(transitions, vec![ZoneTransition::Exited { zone_id: 1 }]);
        assert!(state.is_inside(2));
    }

    #[test]
    fn test_disabled_zone_is_skipped() {
        let mut disabled = zone(1, CENTER, 100.0);
        disabled.enabled = false;
        let zones = vec![disabled];
        let mut state = DetectionState::new();

        let transitions = evaluate(&fix(CENTER), &zones, &mut state);
        assert!(transitions.is_empty());
        assert!(!state.is_inside(1));
    }

    #[test]
    fn test_membership_keyed_by_id_not_position() {
        let mut zones = vec![zone(9, FAR_AWAY, 100.0), zone(1, CENTER, 100.0)];
        let mut state = DetectionState::new();

        evaluate(&fix(CENTER), &zones, &mut state);
        assert!(state.is_inside(1));

        // Dropping the unrelated zone shifts positions but not identity
        zones.remove(0);
        let transitions = evaluate(&fix(CENTER), &zones, &mut state);
        assert!(transitions.is_empty());
        assert!(state.is_inside(1));
    }
}
