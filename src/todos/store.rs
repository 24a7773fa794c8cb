//! Todo Storage
//! Mission: Every owner-scoped statement binds (id, owner_id) together

use crate::auth::guard::{AdminScope, OwnerScope};
use crate::todos::models::{Todo, TodoRequest};
use anyhow::{Context, Result};
use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Row};
use thiserror::Error;
use tracing::{debug, info, warn};

const TODO_COLUMNS: &str = "id, title, description, priority, complete, owner_id";

#[derive(Debug, Error)]
pub enum TodoStoreError {
    /// The owner id has no `users` row.
    #[error("Unknown owner {0}")]
    UnknownOwner(i64),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub struct TodoStore<'c> {
    conn: &'c Connection,
}

impl<'c> TodoStore<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    fn map_row(row: &Row<'_>) -> rusqlite::Result<Todo> {
        Ok(Todo {
            id: row.get(0)?,
            title: row.get(1)?,
            description: row.get(2)?,
            priority: row.get(3)?,
            complete: row.get(4)?,
            owner_id: row.get(5)?,
        })
    }

    pub fn list_for_owner(&self, scope: &OwnerScope) -> Result<Vec<Todo>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {TODO_COLUMNS} FROM todos WHERE owner_id = ?1 ORDER BY id"))?;

        let todos = stmt
            .query_map(params![scope.owner_id()], Self::map_row)?
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to list todos")?;

        Ok(todos)
    }

    pub fn get_for_owner(&self, scope: &OwnerScope, todo_id: i64) -> Result<Option<Todo>> {
        self.conn
            .query_row(
                &format!("SELECT {TODO_COLUMNS} FROM todos WHERE id = ?1 AND owner_id = ?2"),
                params![todo_id, scope.owner_id()],
                Self::map_row,
            )
            .optional()
            .context("Failed to load todo")
    }

    pub fn create(&self, scope: &OwnerScope, req: &TodoRequest) -> Result<Todo, TodoStoreError> {
        let inserted = self.conn.execute(
            "INSERT INTO todos (title, description, priority, complete, owner_id)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                req.title,
                req.description,
                req.priority,
                req.complete,
                scope.owner_id()
            ],
        );

        match inserted {
            Ok(_) => {}
            Err(rusqlite::Error::SqliteFailure(e, _)) if e.code == ErrorCode::ConstraintViolation => {
                warn!("Todo rejected, owner {} has no user row", scope.owner_id());
                return Err(TodoStoreError::UnknownOwner(scope.owner_id()));
            }
            Err(e) => return Err(anyhow::Error::new(e).context("Failed to insert todo").into()),
        }

        let todo = Todo {
            id: self.conn.last_insert_rowid(),
            title: req.title.clone(),
            description: req.description.clone(),
            priority: req.priority,
            complete: req.complete,
            owner_id: scope.owner_id(),
        };

        info!("Created todo {} for owner {}", todo.id, todo.owner_id);
        Ok(todo)
    }

    /// Returns false when no row matches both the id and the owner.
    pub fn update_for_owner(
        &self,
        scope: &OwnerScope,
        todo_id: i64,
        req: &TodoRequest,
    ) -> Result<bool> {
        let rows = self
            .conn
            .execute(
                "UPDATE todos SET title = ?1, description = ?2, priority = ?3, complete = ?4
                 WHERE id = ?5 AND owner_id = ?6",
                params![
                    req.title,
                    req.description,
                    req.priority,
                    req.complete,
                    todo_id,
                    scope.owner_id()
                ],
            )
            .context("Failed to update todo")?;

        debug!("Update todo {} for owner {}: {} row(s)", todo_id, scope.owner_id(), rows);
        Ok(rows > 0)
    }

    /// Returns false when no row matches both the id and the owner.
    pub fn delete_for_owner(&self, scope: &OwnerScope, todo_id: i64) -> Result<bool> {
        let rows = self
            .conn
            .execute(
                "DELETE FROM todos WHERE id = ?1 AND owner_id = ?2",
                params![todo_id, scope.owner_id()],
            )
            .context("Failed to delete todo")?;

        debug!("Delete todo {} for owner {}: {} row(s)", todo_id, scope.owner_id(), rows);
        Ok(rows > 0)
    }

    pub fn list_all(&self, _admin: &AdminScope) -> Result<Vec<Todo>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {TODO_COLUMNS} FROM todos ORDER BY id"))?;

        let todos = stmt
            .query_map([], Self::map_row)?
            .collect::<Result<Vec<_>, _>>()
            .context("Failed to list todos")?;

        Ok(todos)
    }

    pub fn delete_any(&self, admin: &AdminScope, todo_id: i64) -> Result<bool> {
        let rows = self
            .conn
            .execute("DELETE FROM todos WHERE id = ?1", params![todo_id])
            .context("Failed to delete todo")?;

        if rows > 0 {
            info!("Admin {} deleted todo {}", admin.admin_id(), todo_id);
        }
        Ok(rows > 0)
    }
}
