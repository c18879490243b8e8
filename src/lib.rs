pub mod config;
pub mod history;
pub mod kernel;
pub mod services;

// Re-export specific items for convenient access
pub use history::{HistoryRecord, IdeaInput};
pub use kernel::{Coordinator, ValidationError, ViewState};
pub use services::validator::{HttpValidator, ValidationResult};
