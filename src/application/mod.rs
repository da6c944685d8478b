// src/application/mod.rs
//
// Application Layer
//
// ARCHITECTURE:
// - This layer sits ABOVE the domain modules
// - It resolves request discriminators and forwards to one module call
// - It translates domain entities into DTOs and the response envelope
// - It never touches repositories directly

pub mod dispatch;
pub mod dto;
pub mod handler;
pub mod response;
pub mod state;

pub use dispatch::Endpoint;
pub use dto::*;
pub use handler::ApiHandler;
pub use response::{api_response, ApiResponse};
pub use state::AppState;
