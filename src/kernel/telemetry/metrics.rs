use std::collections::VecDeque;

use super::event::{HistoryEventKind, RequestEventKind, TelemetryEvent};
use crate::kernel::error::ErrorKind;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TelemetrySnapshot {
    pub request_stats: RequestStats,
    pub failure_stats: FailureStats,
    pub history_stats: HistoryStats,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestStats {
    pub submitted: u64,
    pub superseded: u64,
    pub completed: u64,
    pub failed: u64,
    pub cancelled: u64,
    pub stale_discarded: u64,
    /// completed / (completed + failed), 0.0 when nothing settled yet.
    pub success_ratio: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FailureStats {
    pub rate_limited: u64,
    pub server_faults: u64,
    pub client_faults: u64,
    pub unknown: u64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryStats {
    pub appended: u64,
    pub evicted: u64,
    pub recalled: u64,
    pub cleared: u64,
}

pub fn compute_snapshot(events: &VecDeque<TelemetryEvent>) -> TelemetrySnapshot {
    let mut snap = TelemetrySnapshot::default();

    for event in events {
        match event {
            TelemetryEvent::RequestLifecycle { event, .. } => match event {
                RequestEventKind::Submitted => snap.request_stats.submitted += 1,
                RequestEventKind::Superseded => snap.request_stats.superseded += 1,
                RequestEventKind::Completed => snap.request_stats.completed += 1,
                RequestEventKind::Cancelled => snap.request_stats.cancelled += 1,
                RequestEventKind::Failed(kind) => {
                    snap.request_stats.failed += 1;
                    match kind {
                        ErrorKind::RateLimited => snap.failure_stats.rate_limited += 1,
                        ErrorKind::ServerFault => snap.failure_stats.server_faults += 1,
                        ErrorKind::ClientFault => snap.failure_stats.client_faults += 1,
                        ErrorKind::Unknown => snap.failure_stats.unknown += 1,
                        // a current call that aborted on its own
                        ErrorKind::Cancelled => {}
                    }
                }
            },
            TelemetryEvent::StaleDiscarded { .. } => snap.request_stats.stale_discarded += 1,
            TelemetryEvent::HistoryEvent { kind, evicted } => {
                match kind {
                    HistoryEventKind::Appended => snap.history_stats.appended += 1,
                    HistoryEventKind::Recalled => snap.history_stats.recalled += 1,
                    HistoryEventKind::Cleared => snap.history_stats.cleared += 1,
                }
                snap.history_stats.evicted += *evicted as u64;
            }
        }
    }

    let settled = snap.request_stats.completed + snap.request_stats.failed;
    if settled > 0 {
        snap.request_stats.success_ratio = snap.request_stats.completed as f64 / settled as f64;
    }

    snap
}
