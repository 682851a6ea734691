//! Domain-level building blocks shared by the storage and API crates.

pub mod error;
pub mod types;

pub use error::{AppError, AppResult, ErrorCode};
