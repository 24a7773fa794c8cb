//! HTTP API
//! Mission: Route handlers over the todo and user stores

pub mod admin;
pub mod extract;
pub mod routes;
pub mod todos;
pub mod users;

pub use routes::create_router;

use crate::error::ApiError;

/// Path ids must be positive.
pub(crate) fn positive_id(id: i64) -> Result<i64, ApiError> {
    if id > 0 {
        Ok(id)
    } else {
        Err(ApiError::validation("id must be greater than 0"))
    }
}
