pub mod types;
pub mod storage;
pub mod store;

pub use types::*;
pub use storage::*;
pub use store::*;
