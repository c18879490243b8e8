use serde::{Deserialize, Serialize};

use crate::kernel::cancel::Generation;
use crate::kernel::error::ErrorKind;

// Allowed: generations, counts, enums
// Forbidden: idea text, critique text, record ids

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TelemetryEvent {
    RequestLifecycle {
        generation: Generation,
        event: RequestEventKind,
    },

    /// A response arrived after its generation stopped being current.
    StaleDiscarded {
        generation: Generation,
    },

    HistoryEvent {
        kind: HistoryEventKind,
        evicted: usize,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestEventKind {
    Submitted,
    Superseded,
    Completed,
    Failed(ErrorKind),
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HistoryEventKind {
    Appended,
    Recalled,
    Cleared,
}

impl TelemetryEvent {
    pub fn request(generation: Generation, event: RequestEventKind) -> Self {
        TelemetryEvent::RequestLifecycle { generation, event }
    }

    pub fn history(kind: HistoryEventKind) -> Self {
        TelemetryEvent::HistoryEvent { kind, evicted: 0 }
    }
}
