// src/error/mod.rs
//
// Error types
//
// - AppError: internal failures (database, pool, io, ...)
// - ErrorMessage: the outward failure value every module and endpoint returns

pub mod message;
pub mod types;

pub use message::{ErrorMessage, ModuleResult};
pub use types::{AppError, AppResult};
