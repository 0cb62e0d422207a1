//! # Ansim Core
//!
//! Platform-independent danger-zone detection library for personal-safety
//! applications.
//!
//! This crate contains the pure alerting logic with **zero I/O
//! dependencies**: given a stream of position fixes and a set of registered
//! hazard zones, it decides *whether* and *when* an alert fires. How fixes
//! arrive and how alerts are presented is the business of the runtime layer
//! (`ansim-engine`) and the surrounding application.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  ansim-core (platform-independent, no tokio/async deps)     │
//! │  ├── geo/       (haversine distance)                        │
//! │  ├── zones/     (DangerZone, ZoneRegistry)                  │
//! │  ├── detector/  (entry/exit transitions, membership state)  │
//! │  └── monitor/   (per-visit alert dedup, first-match policy) │
//! └─────────────────────────────────────────────────────────────┘
//!                             ▲
//!                ┌────────────┴────────────┐
//!                │  ansim-engine           │
//!                │  (tokio supervisor,     │
//!                │   source + dispatcher)  │
//!                └─────────────────────────┘
//! ```
//!
//! ## Key Modules
//!
//! - [`geo`] - Coordinates and great-circle distance
//! - [`zones`] - Hazard zone definitions and the ordered registry
//! - [`detector`] - Per-fix entry/exit classification
//! - [`monitor`] - Stateful monitor with per-visit alert dedup
//!
//! ## Example: One Fix Through the Monitor
//!
//! ```rust
//! use ansim_core::geo::Coordinate;
//! use ansim_core::detector::LocationFix;
//! use ansim_core::monitor::{MonitorSettings, ZoneMonitor};
//! use ansim_core::zones::{DangerZone, ZoneRegistry};
//!
//! let mut registry = ZoneRegistry::new();
//! registry.add_zone(DangerZone::new(
//!     1,
//!     Coordinate::new(37.555841, 126.936913),
//!     100.0,
//!     "Traffic accident",
//!     "Large vehicle accident reported. Avoid the area.",
//! ));
//!
//! let mut monitor = ZoneMonitor::new(MonitorSettings::default());
//! let fix = LocationFix::new(Coordinate::new(37.555841, 126.936913), 0);
//! let outcome = monitor.observe(&fix, registry.zones());
//! assert_eq!(outcome.alerts.len(), 1);
//! ```

pub mod detector;
pub mod geo;
pub mod monitor;
pub mod zones;

pub use detector::{evaluate, DetectionState, LocationFix, ZoneMembership, ZoneTransition};
pub use geo::{distance_meters, Coordinate, EARTH_RADIUS_M};
pub use monitor::{Alert, FixOutcome, MonitorSettings, ZoneMonitor};
pub use zones::{DangerZone, ZoneId, ZoneRegistry};
