//! Request and history telemetry.
//!
//! # SAFETY INVARIANT
//! Telemetry is a READ-ONLY side-effect layer.
//! It must **NEVER** be read inside the coordinator's decision logic.
//!
//! # PRIVACY INVARIANT
//! Events must **NEVER** contain idea text, critique text or record ids.
//! Only generations, error kinds and counts are allowed.

pub mod event;
pub mod metrics;
pub mod recorder;

pub use event::*;
pub use metrics::*;
pub use recorder::*;
