//! Todo Items
//! Mission: Owner-scoped todo records

pub mod models;
pub mod store;

pub use models::{Todo, TodoRequest};
pub use store::{TodoStore, TodoStoreError};
