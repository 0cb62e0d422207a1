//! Fix-by-fix monitoring: entry/exit detection plus per-visit alert dedup.
//!
//! The monitor owns the detection state and applies the alerting policy to
//! the transitions of each fix. Its guarantee is **at most one alert per
//! zone per continuous visit**: an entry alerts once, staying inside never
//! re-alerts, and only an exit re-arms the zone.

use serde::{Deserialize, Serialize};

use crate::detector::{evaluate, DetectionState, LocationFix, ZoneTransition};
use crate::zones::{DangerZone, ZoneId};

/// Alerting policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonitorSettings {
    /// Select at most one alert per fix: the first eligible zone in
    /// registry order wins and later zones stay silent for the rest of
    /// their visit. Limits alert volume when zones overlap.
    pub stop_at_first_match: bool,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        MonitorSettings {
            stop_at_first_match: true,
        }
    }
}

/// An alert selected for dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Alert {
    /// Zone that was entered
    pub zone_id: ZoneId,
    /// Zone title
    pub title: String,
    /// Zone description
    pub body: String,
}

/// Everything one fix produced.
#[derive(Debug, Clone, Default)]
pub struct FixOutcome {
    /// Containment changes, in registry order
    pub transitions: Vec<ZoneTransition>,
    /// Alerts that passed dedup and policy, ready for dispatch
    pub alerts: Vec<Alert>,
}

/// Stateful monitor combining entry/exit detection with alert dedup.
///
/// Owns the [`DetectionState`]; one monitor instance serves one location
/// stream, and each fix must be observed to completion before the next.
#[derive(Debug, Default)]
pub struct ZoneMonitor {
    settings: MonitorSettings,
    state: DetectionState,
}

impl ZoneMonitor {
    /// Create a monitor with the given policy.
    pub fn new(settings: MonitorSettings) -> Self {
        ZoneMonitor {
            settings,
            state: DetectionState::new(),
        }
    }

    /// Current policy.
    pub fn settings(&self) -> &MonitorSettings {
        &self.settings
    }

    /// Current membership state.
    pub fn state(&self) -> &DetectionState {
        &self.state
    }

    /// Run one fix through detection and alert selection.
    ///
    /// Only `Entered` transitions whose zone has not yet alerted this visit
    /// produce an alert; selecting one sets the zone's alerted flag. With
    /// `stop_at_first_match` the selection stops after the first alert.
    pub fn observe(&mut self, fix: &LocationFix, zones: &[DangerZone]) -> FixOutcome {
        let transitions = evaluate(fix, zones, &mut self.state);

        let mut alerts = Vec::new();
        for transition in &transitions {
            let ZoneTransition::Entered { zone_id } = *transition else {
                continue;
            };
            if self.state.has_alerted(zone_id) {
                continue;
            }
            let Some(zone) = zones.iter().find(|z| z.id == zone_id) else {
                continue;
            };

            self.state.mark_alerted(zone_id);
            alerts.push(Alert {
                zone_id,
                title: zone.title.clone(),
                body: zone.description.clone(),
            });

            if self.settings.stop_at_first_match {
                break;
            }
        }

        FixOutcome {
            transitions,
            alerts,
        }
    }

    /// Forget all membership state, as if no fix had been observed.
    pub fn reset(&mut self) {
        self.state.clear();
    }
}
