use std::sync::{Arc, Mutex, MutexGuard};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::cancel::CancellationRegistry;
use super::error::{classify, ValidationError};
use super::state::{ViewDelta, ViewState};
use super::telemetry::{HistoryEventKind, RequestEventKind, TelemetryEvent, TelemetryRecorder, TelemetrySnapshot};

use crate::history::storage::KeyValueStore;
use crate::history::store::HistoryStore;
use crate::history::types::{HistoryRecord, IdeaInput};
use crate::services::validator::boundary::{BoundaryFailure, ValidationBoundary};

struct Inner<R> {
    registry: CancellationRegistry,
    history: HistoryStore<R>,
    telemetry: TelemetryRecorder,
}

/// Owns the single "current analysis".
///
/// **LAW**: only the most recently issued, unresolved submission may touch
/// observable state (view + history). Everything else resolves to
/// `ValidationError::Cancelled` for its own caller and is dropped.
///
/// All shared state sits behind one lock that is never held across an await.
pub struct Coordinator<B: ValidationBoundary> {
    boundary: B,
    inner: Mutex<Inner<B::Output>>,
    view: watch::Sender<ViewState<B::Output>>,
}

impl<B> Coordinator<B>
where
    B: ValidationBoundary,
    B::Output: Clone + Serialize + DeserializeOwned + Send + Sync,
{
    pub fn new(boundary: B, storage: Arc<dyn KeyValueStore>) -> Self {
        let (view, _) = watch::channel(ViewState::default());
        Self {
            boundary,
            inner: Mutex::new(Inner {
                registry: CancellationRegistry::new(),
                history: HistoryStore::load(storage),
                telemetry: TelemetryRecorder::new(),
            }),
            view,
        }
    }

    /// Supersedes whatever is in flight and validates `input`.
    ///
    /// On success the record is already in history when this returns.
    pub async fn submit(&self, input: IdeaInput) -> Result<B::Output, ValidationError> {
        let (generation, token) = {
            let mut inner = self.lock();
            let (generation, token, superseded) = inner.registry.supersede();
            if let Some(old) = superseded {
                debug!("Superseding request {:?}", old);
                inner.telemetry.record(TelemetryEvent::request(old, RequestEventKind::Superseded));
            }
            inner.telemetry.record(TelemetryEvent::request(generation, RequestEventKind::Submitted));
            self.apply(ViewDelta::Started);
            (generation, token)
        };
        info!("Submitted request {:?}", generation);

        let outcome = tokio::select! {
            biased;
            _ = token.cancelled() => Err(BoundaryFailure::Aborted),
            res = self.boundary.validate(&input, token.clone()) => res,
        };

        let mut inner = self.lock();

        // STALE REJECTION: a newer submit or a cancel() moved the generation on
        if !inner.registry.settle(generation) {
            debug!("Discarded stale response for {:?} (current {:?})", generation, inner.registry.current());
            inner.telemetry.record(TelemetryEvent::StaleDiscarded { generation });
            return Err(ValidationError::Cancelled);
        }

        match outcome {
            Ok(result) => {
                let before = inner.history.len();
                let record = inner.history.append(input, result.clone());
                let evicted = (before + 1).saturating_sub(inner.history.len());

                inner.telemetry.record(TelemetryEvent::request(generation, RequestEventKind::Completed));
                inner.telemetry.record(TelemetryEvent::HistoryEvent {
                    kind: HistoryEventKind::Appended,
                    evicted,
                });
                info!("Request {:?} completed, stored as {}", generation, record.id);

                self.apply(ViewDelta::Succeeded(result.clone()));
                Ok(result)
            }
            Err(failure) => {
                let error = classify(failure);
                warn!("Request {:?} failed: {}", generation, error);
                inner
                    .telemetry
                    .record(TelemetryEvent::request(generation, RequestEventKind::Failed(error.kind())));

                self.apply(ViewDelta::Failed(error.clone()));
                Err(error)
            }
        }
    }

    /// Cancels the live request. No-op when idle.
    pub fn cancel(&self) {
        let mut inner = self.lock();
        if let Some(generation) = inner.registry.cancel() {
            info!("Cancelled request {:?}", generation);
            inner.telemetry.record(TelemetryEvent::request(generation, RequestEventKind::Cancelled));
            self.apply(ViewDelta::Cancelled);
        }
    }

    /// Cancels anything live and clears the current result and error.
    pub fn reset(&self) {
        let mut inner = self.lock();
        if let Some(generation) = inner.registry.cancel() {
            inner.telemetry.record(TelemetryEvent::request(generation, RequestEventKind::Cancelled));
        }
        self.apply(ViewDelta::Reset);
    }

    /// Brings a past record back into view. No network involved.
    pub fn recall(&self, id: &str) -> Option<HistoryRecord<B::Output>> {
        let mut inner = self.lock();
        let record = inner.history.get(id)?;
        inner.telemetry.record(TelemetryEvent::history(HistoryEventKind::Recalled));
        self.apply(ViewDelta::Recalled(record.result.clone()));
        Some(record)
    }

    pub fn list(&self, limit: usize) -> Vec<HistoryRecord<B::Output>> {
        self.lock().history.list(limit)
    }

    pub fn recent(&self) -> Vec<HistoryRecord<B::Output>> {
        self.lock().history.recent()
    }

    pub fn get(&self, id: &str) -> Option<HistoryRecord<B::Output>> {
        self.lock().history.get(id)
    }

    pub fn clear(&self) {
        let mut inner = self.lock();
        let evicted = inner.history.len();
        inner.history.clear();
        inner.telemetry.record(TelemetryEvent::HistoryEvent {
            kind: HistoryEventKind::Cleared,
            evicted,
        });
        info!("History cleared ({} record(s))", evicted);
    }

    pub fn is_in_flight(&self) -> bool {
        self.lock().registry.is_in_flight()
    }

    pub fn view(&self) -> ViewState<B::Output> {
        self.view.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState<B::Output>> {
        self.view.subscribe()
    }

    pub fn telemetry(&self) -> TelemetrySnapshot {
        self.lock().telemetry.snapshot()
    }

    fn apply(&self, delta: ViewDelta<B::Output>) {
        self.view.send_modify(|view| view.reduce(delta));
    }

    fn lock(&self) -> MutexGuard<'_, Inner<B::Output>> {
        // nothing in Inner is left half-updated by a panic; keep serving
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
