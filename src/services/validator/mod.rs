pub mod boundary;
pub mod client;
pub mod types;

pub use boundary::{BoundaryFailure, ValidationBoundary};
pub use client::{failure_from_status, HttpValidator};
pub use types::*;
