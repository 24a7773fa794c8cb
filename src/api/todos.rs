//! Todo endpoints. Every query is scoped to the caller's own rows.

use crate::api::{
    extract::{ValidJson, ValidPath},
    positive_id,
};
use crate::auth::{guard::owner_scope, Principal};
use crate::db::DbConn;
use crate::error::{ApiError, TODO_NOT_FOUND, USER_NOT_FOUND};
use crate::todos::{Todo, TodoRequest, TodoStore, TodoStoreError};
use axum::{http::StatusCode, Extension, Json};

impl From<TodoStoreError> for ApiError {
    fn from(err: TodoStoreError) -> Self {
        match err {
            TodoStoreError::UnknownOwner(_) => ApiError::NotFound(USER_NOT_FOUND),
            TodoStoreError::Other(e) => ApiError::Internal(e),
        }
    }
}

/// GET /
pub async fn read_all(
    Extension(principal): Extension<Principal>,
    DbConn(conn): DbConn,
) -> Result<Json<Vec<Todo>>, ApiError> {
    let scope = owner_scope(&principal);
    Ok(Json(TodoStore::new(&conn).list_for_owner(&scope)?))
}

/// GET /todo/:todo_id
pub async fn read_todo(
    Extension(principal): Extension<Principal>,
    DbConn(conn): DbConn,
    ValidPath(todo_id): ValidPath<i64>,
) -> Result<Json<Todo>, ApiError> {
    let todo_id = positive_id(todo_id)?;
    let scope = owner_scope(&principal);

    TodoStore::new(&conn)
        .get_for_owner(&scope, todo_id)?
        .map(Json)
        .ok_or(ApiError::NotFound(TODO_NOT_FOUND))
}

/// POST /todos
pub async fn create_todo(
    Extension(principal): Extension<Principal>,
    DbConn(conn): DbConn,
    ValidJson(req): ValidJson<TodoRequest>,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    req.validate()?;
    let scope = owner_scope(&principal);

    let todo = TodoStore::new(&conn).create(&scope, &req)?;
    Ok((StatusCode::CREATED, Json(todo)))
}

/// PUT /todos/:todo_id
pub async fn update_todo(
    Extension(principal): Extension<Principal>,
    DbConn(conn): DbConn,
    ValidPath(todo_id): ValidPath<i64>,
    ValidJson(req): ValidJson<TodoRequest>,
) -> Result<StatusCode, ApiError> {
    let todo_id = positive_id(todo_id)?;
    req.validate()?;
    let scope = owner_scope(&principal);

    if !TodoStore::new(&conn).update_for_owner(&scope, todo_id, &req)? {
        return Err(ApiError::NotFound(TODO_NOT_FOUND));
    }
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /todo/:todo_id
pub async fn delete_todo(
    Extension(principal): Extension<Principal>,
    DbConn(conn): DbConn,
    ValidPath(todo_id): ValidPath<i64>,
) -> Result<StatusCode, ApiError> {
    let todo_id = positive_id(todo_id)?;
    let scope = owner_scope(&principal);

    if !TodoStore::new(&conn).delete_for_owner(&scope, todo_id)? {
        return Err(ApiError::NotFound(TODO_NOT_FOUND));
    }
    Ok(StatusCode::NO_CONTENT)
}
