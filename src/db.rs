//! SQLite Database Handle
//! Mission: Bootstrap the schema once, hand out one connection per request

use crate::error::ApiError;
use anyhow::{Context, Result};
use async_trait::async_trait;
use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use rusqlite::Connection;
use std::time::Duration;
use tracing::info;

const SCHEMA_SQL: &str = r#"
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    email TEXT UNIQUE,
    username TEXT UNIQUE,
    first_name TEXT,
    last_name TEXT,
    hashed_password TEXT,
    is_active INTEGER NOT NULL DEFAULT 1,
    role TEXT,
    phone_number TEXT
);

CREATE TABLE IF NOT EXISTS todos (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT,
    description TEXT,
    priority INTEGER,
    complete INTEGER NOT NULL DEFAULT 0,
    owner_id INTEGER REFERENCES users(id)
);

CREATE INDEX IF NOT EXISTS idx_todos_owner ON todos(owner_id, id);
"#;

/// Handle to the database file. Cheap to clone; holds no open connection.
#[derive(Debug, Clone)]
pub struct Database {
    db_path: String,
}

impl Database {
    /// Open (creating if needed) the database and apply the schema.
    pub fn new(db_path: &str) -> Result<Self> {
        let db = Self {
            db_path: db_path.to_string(),
        };
        let conn = db.connect()?;
        conn.execute_batch(SCHEMA_SQL)
            .context("Failed to apply schema")?;

        info!("Database ready at {}", db_path);
        Ok(db)
    }

    pub fn path(&self) -> &str {
        &self.db_path
    }

    /// Open a fresh connection. Closed when dropped.
    pub fn connect(&self) -> Result<Connection> {
        let conn = Connection::open(&self.db_path)
            .with_context(|| format!("Failed to open database {}", self.db_path))?;
        conn.busy_timeout(Duration::from_secs(5))?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        Ok(conn)
    }
}

/// Per-request connection. Opened when the handler's arguments are extracted and
/// closed when the request finishes, on success and on every error path.
pub struct DbConn(pub Connection);

#[async_trait]
impl<S> FromRequestParts<S> for DbConn
where
    Database: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(_parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let db = Database::from_ref(state);
        Ok(DbConn(db.connect()?))
    }
}
