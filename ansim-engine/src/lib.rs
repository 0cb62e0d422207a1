//! # Ansim Engine
//!
//! Tokio runtime layer for the Ansim danger-zone alerting engine.
//!
//! This crate wires the pure detection logic of [`ansim_core`] to the
//! outside world: a position source feeding location fixes over a channel,
//! a shared zone registry a hazard feed can mutate at any time, and an
//! alert dispatcher responsible for user-visible notification.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                      ansim-engine                          │
//! │                                                            │
//! │  PositionSource ──mpsc──▶ StreamSupervisor                 │
//! │  (permission state,        ├─ sampling filter (min move)   │
//! │   fixes over channel)      ├─ ZoneMonitor (ansim-core)     │
//! │                            │    └─ reads SharedZones       │
//! │  Zone feed ──────────────▶ SharedZones (Arc<RwLock>)       │
//! │                            │                               │
//! │                            └──▶ AlertDispatcher            │
//! │                                 (fire-and-forget, logged)  │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Components
//!
//! - [`source::PositionSource`] - Subscription boundary to the platform's
//!   location service
//! - [`registry::SharedZones`] - Thread-safe zone registry shared with the
//!   zone feed
//! - [`supervisor::StreamSupervisor`] - Owns the single-consumer detection
//!   loop
//! - [`dispatch::AlertDispatcher`] - Notification boundary, best-effort
//!
//! ## Example: Running a Supervisor
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use ansim_engine::dispatch::LogDispatcher;
//! use ansim_engine::registry::SharedZones;
//! use ansim_engine::source::PositionSource;
//! use ansim_engine::supervisor::StreamSupervisor;
//!
//! async fn run(source: &dyn PositionSource) {
//!     let zones = SharedZones::new();
//!     let supervisor = StreamSupervisor::new(zones, Arc::new(LogDispatcher));
//!
//!     let handle = supervisor.spawn(source).await.expect("subscription failed");
//!     // ... the detection loop runs until shutdown or source closure
//!     handle.shutdown().await;
//! }
//! ```

pub mod dispatch;
pub mod error;
pub mod registry;
pub mod source;
pub mod supervisor;

pub use dispatch::{AlertDispatcher, LogDispatcher};
pub use error::{DispatchError, SubscribeError};
pub use registry::SharedZones;
pub use source::{AccuracyTier, FixReceiver, PositionSource, SourceConfig};
pub use supervisor::{StreamSupervisor, SupervisorHandle};
