use crate::error::ApiError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub priority: i64,
    pub complete: bool,
    pub owner_id: i64,
}

/// Create/update body for a todo.
#[derive(Debug, Clone, Deserialize)]
pub struct TodoRequest {
    pub title: String,
    pub description: String,
    pub priority: i64,
    pub complete: bool,
}

impl TodoRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        if self.title.chars().count() < 3 {
            return Err(ApiError::validation("title must be at least 3 characters"));
        }
        let description_len = self.description.chars().count();
        if !(3..=100).contains(&description_len) {
            return Err(ApiError::validation(
                "description must be between 3 and 100 characters",
            ));
        }
        if !(1..=5).contains(&self.priority) {
            return Err(ApiError::validation("priority must be between 1 and 5"));
        }
        Ok(())
    }
}
