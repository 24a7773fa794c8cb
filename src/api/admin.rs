//! Admin endpoints. Role policy first, then unscoped access.

use crate::api::{extract::ValidPath, positive_id};
use crate::auth::{guard::require_admin, Principal};
use crate::db::DbConn;
use crate::error::{ApiError, TODO_NOT_FOUND};
use crate::todos::{Todo, TodoStore};
use axum::{http::StatusCode, Extension, Json};

/// GET /admin/todo
pub async fn read_all(
    Extension(principal): Extension<Principal>,
    DbConn(conn): DbConn,
) -> Result<Json<Vec<Todo>>, ApiError> {
    let admin = require_admin(&principal)?;
    Ok(Json(TodoStore::new(&conn).list_all(&admin)?))
}

/// DELETE /admin/todo/:todo_id
pub async fn delete_todo(
    Extension(principal): Extension<Principal>,
    DbConn(conn): DbConn,
    todo_id: Result<ValidPath<i64>, ApiError>,
) -> Result<StatusCode, ApiError> {
    let admin = require_admin(&principal)?;
    let ValidPath(todo_id) = todo_id?;
    let todo_id = positive_id(todo_id)?;

    if !TodoStore::new(&conn).delete_any(&admin, todo_id)? {
        return Err(ApiError::NotFound(TODO_NOT_FOUND));
    }
    Ok(StatusCode::NO_CONTENT)
}
