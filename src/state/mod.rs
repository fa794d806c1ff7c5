pub mod clock;
pub mod events;

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::{
    config::AppConfig,
    dao::record_store::RecordStore,
    services::actuator::ActuatorHandle,
    state::{clock::ClockCell, events::EventHub},
};

/// Shared handle to the application state; cloning bumps the inner `Arc`.
pub type SharedState = Arc<AppState>;

/// Key identifying one user's attempts against one question.
pub type SubmissionKey = (String, Uuid);

/// Central application state shared by request handlers and stream tasks.
pub struct AppState {
    config: AppConfig,
    store: Arc<dyn RecordStore>,
    clock: ClockCell,
    events: EventHub,
    actuator: ActuatorHandle,
    submission_gates: DashMap<SubmissionKey, Arc<Mutex<()>>>,
}

impl AppState {
    /// Assemble the shared state around a record store backend and a running
    /// actuator task.
    pub fn new(
        config: AppConfig,
        store: Arc<dyn RecordStore>,
        actuator: ActuatorHandle,
    ) -> SharedState {
        let events = EventHub::new(config.event_capacity());
        Arc::new(Self {
            config,
            store,
            clock: ClockCell::new(),
            events,
            actuator,
            submission_gates: DashMap::new(),
        })
    }

    /// Runtime configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Handle to the record store backend.
    pub fn store(&self) -> Arc<dyn RecordStore> {
        self.store.clone()
    }

    /// The single-owner contest clock cell.
    pub fn clock(&self) -> &ClockCell {
        &self.clock
    }

    /// Multicast hub carrying submission and clock events.
    pub fn events(&self) -> &EventHub {
        &self.events
    }

    /// Fire-and-forget handle to the LED indicator task.
    pub fn actuator(&self) -> &ActuatorHandle {
        &self.actuator
    }

    /// Mutual-exclusion gate for one `(user, question)` pair.
    ///
    /// Unrelated keys run fully in parallel; holders of the same key
    /// serialize, which is what makes the award check-then-increment safe
    /// under concurrent duplicate submissions.
    pub fn submission_gate(&self, key: &SubmissionKey) -> Arc<Mutex<()>> {
        self.submission_gates
            .entry(key.clone())
            .or_default()
            .value()
            .clone()
    }
}
