//! Todo API Backend
//!
//! Registration, password login issuing bearer tokens, and owner-scoped todo
//! CRUD with an admin role. The binary in `main.rs` only wires these together.

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod state;
pub mod todos;

pub use api::create_router;
pub use config::Config;
pub use error::ApiError;
pub use state::AppState;
