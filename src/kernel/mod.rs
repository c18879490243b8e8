pub mod cancel;
pub mod coordinator;
pub mod error;
pub mod state;
pub mod telemetry;

pub use coordinator::Coordinator;
pub use error::{classify, ErrorKind, ValidationError};
pub use state::{ViewDelta, ViewState};
