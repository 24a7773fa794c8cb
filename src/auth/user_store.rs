//! User Storage
//! Mission: Credential Store over the `users` table

use crate::auth::{
    models::{CreateUserRequest, User},
    password::PasswordHasher,
    principal::UserRole,
};
use anyhow::Context;
use rusqlite::{params, Connection, ErrorCode, OptionalExtension, Row};
use thiserror::Error;
use tracing::{info, warn};

const USER_COLUMNS: &str =
    "id, email, username, first_name, last_name, hashed_password, is_active, role, phone_number";

#[derive(Debug, Error)]
pub enum UserStoreError {
    #[error("Username or email already exists")]
    Duplicate,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// User storage borrowing one request's connection.
pub struct UserStore<'c> {
    conn: &'c Connection,
}

impl<'c> UserStore<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    fn map_row(row: &Row<'_>) -> rusqlite::Result<User> {
        Ok(User {
            id: row.get(0)?,
            email: row.get(1)?,
            username: row.get(2)?,
            first_name: row.get(3)?,
            last_name: row.get(4)?,
            hashed_password: row.get(5)?,
            is_active: row.get(6)?,
            // A NULL role reads as the least-privileged one.
            role: row
                .get::<_, Option<String>>(7)?
                .map_or(UserRole::User, UserRole::from),
            phone_number: row.get(8)?,
        })
    }

    /// Create a user, storing only the bcrypt digest of the password.
    pub fn create_user(
        &self,
        hasher: &PasswordHasher,
        req: &CreateUserRequest,
    ) -> Result<User, UserStoreError> {
        let hashed_password = hasher.hash(&req.password)?;

        let inserted = self.conn.execute(
            "INSERT INTO users (email, username, first_name, last_name, hashed_password, is_active, role, phone_number)
             VALUES (?1, ?2, ?3, ?4, ?5, 1, ?6, ?7)",
            params![
                req.email,
                req.username,
                req.first_name,
                req.last_name,
                hashed_password,
                req.role.as_str(),
                req.phone_number,
            ],
        );

        match inserted {
            Ok(_) => {}
            Err(rusqlite::Error::SqliteFailure(e, _)) if e.code == ErrorCode::ConstraintViolation => {
                warn!("Registration rejected, duplicate username or email: {}", req.username);
                return Err(UserStoreError::Duplicate);
            }
            Err(e) => return Err(anyhow::Error::new(e).context("Failed to insert user").into()),
        }

        let user = User {
            id: self.conn.last_insert_rowid(),
            email: req.email.clone(),
            username: req.username.clone(),
            first_name: req.first_name.clone(),
            last_name: req.last_name.clone(),
            hashed_password,
            is_active: true,
            role: req.role.clone(),
            phone_number: req.phone_number.clone(),
        };

        info!("Created user: {} ({}, id {})", user.username, user.role, user.id);
        Ok(user)
    }

    pub fn get_user_by_username(&self, username: &str) -> anyhow::Result<Option<User>> {
        self.conn
            .query_row(
                &format!("SELECT {USER_COLUMNS} FROM users WHERE username = ?1"),
                params![username],
                Self::map_row,
            )
            .optional()
            .context("Failed to load user by username")
    }

    pub fn get_user_by_id(&self, user_id: i64) -> anyhow::Result<Option<User>> {
        self.conn
            .query_row(
                &format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"),
                params![user_id],
                Self::map_row,
            )
            .optional()
            .context("Failed to load user by id")
    }

    /// Look up `username` and check `password` against its digest.
    ///
    /// Unknown user and wrong password are both `Ok(None)`.
    pub fn authenticate(
        &self,
        hasher: &PasswordHasher,
        username: &str,
        password: &str,
    ) -> anyhow::Result<Option<User>> {
        let Some(user) = self.get_user_by_username(username)? else {
            return Ok(None);
        };

        if hasher.verify(password, &user.hashed_password) {
            Ok(Some(user))
        } else {
            Ok(None)
        }
    }

    /// Replace the stored digest. Returns false if no such user.
    pub fn update_password(&self, user_id: i64, hashed_password: &str) -> anyhow::Result<bool> {
        let rows = self
            .conn
            .execute(
                "UPDATE users SET hashed_password = ?1 WHERE id = ?2",
                params![hashed_password, user_id],
            )
            .context("Failed to update password")?;
        Ok(rows > 0)
    }

    pub fn update_phone_number(&self, user_id: i64, phone_number: &str) -> anyhow::Result<bool> {
        let rows = self
            .conn
            .execute(
                "UPDATE users SET phone_number = ?1 WHERE id = ?2",
                params![phone_number, user_id],
            )
            .context("Failed to update phone number")?;
        Ok(rows > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use tempfile::NamedTempFile;

    fn create_test_db() -> (Connection, NamedTempFile) {
        let temp_file = NamedTempFile::new().unwrap();
        let db = Database::new(temp_file.path().to_str().unwrap()).unwrap();
        (db.connect().unwrap(), temp_file)
    }

    fn request(username: &str, password: &str, role: &str) -> CreateUserRequest {
        CreateUserRequest {
            username: username.to_string(),
            email: format!("{username}@email.com"),
            first_name: "Lucas".to_string(),
            last_name: "Balbueno".to_string(),
            password: password.to_string(),
            role: UserRole::from(role),
            phone_number: Some("(111)-111-1111".to_string()),
        }
    }

    #[test]
    fn test_create_and_retrieve_user() {
        let (conn, _temp) = create_test_db();
        let store = UserStore::new(&conn);
        let hasher = PasswordHasher::new(4);

        let user = store
            .create_user(&hasher, &request("lucasb", "testpassword", "admin"))
            .unwrap();
        assert_eq!(user.id, 1);
        assert_ne!(user.hashed_password, "testpassword");

        let by_name = store.get_user_by_username("lucasb").unwrap().unwrap();
        assert_eq!(by_name.id, user.id);
        assert_eq!(by_name.role, UserRole::Admin);
        assert!(by_name.is_active);
        assert_eq!(by_name.phone_number.as_deref(), Some("(111)-111-1111"));

        let by_id = store.get_user_by_id(user.id).unwrap().unwrap();
        assert_eq!(by_id.username, "lucasb");
        assert!(store.get_user_by_id(42).unwrap().is_none());
    }

    #[test]
    fn test_duplicate_username_rejected() {
        let (conn, _temp) = create_test_db();
        let store = UserStore::new(&conn);
        let hasher = PasswordHasher::new(4);

        store
            .create_user(&hasher, &request("alice", "pw123", "user"))
            .unwrap();

        let mut dup = request("alice", "other", "user");
        dup.email = "different@email.com".to_string();
        assert!(matches!(
            store.create_user(&hasher, &dup),
            Err(UserStoreError::Duplicate)
        ));
    }

    #[test]
    fn test_authenticate() {
        let (conn, _temp) = create_test_db();
        let store = UserStore::new(&conn);
        let hasher = PasswordHasher::new(4);
        store
            .create_user(&hasher, &request("lucasb", "testpassword", "admin"))
            .unwrap();

        let ok = store.authenticate(&hasher, "lucasb", "testpassword").unwrap();
        assert_eq!(ok.map(|u| u.username).as_deref(), Some("lucasb"));

        assert!(store
            .authenticate(&hasher, "WrongUserName", "testpassword")
            .unwrap()
            .is_none());
        assert!(store
            .authenticate(&hasher, "lucasb", "wrongpassword")
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_null_role_reads_as_user() {
        let (conn, _temp) = create_test_db();
        let store = UserStore::new(&conn);
        let hasher = PasswordHasher::new(4);
        conn.execute(
            "INSERT INTO users (email, username, first_name, last_name, hashed_password, role)
             VALUES ('legacy@email.com', 'legacy', 'F', 'L', ?1, NULL)",
            params![hasher.hash("pw123").unwrap()],
        )
        .unwrap();

        let user = store.get_user_by_username("legacy").unwrap().unwrap();
        assert_eq!(user.role, UserRole::User);
        assert!(store.authenticate(&hasher, "legacy", "pw123").unwrap().is_some());
    }

    #[test]
    fn test_update_password_and_phone() {
        let (conn, _temp) = create_test_db();
        let store = UserStore::new(&conn);
        let hasher = PasswordHasher::new(4);
        let user = store
            .create_user(&hasher, &request("lucasb", "testpassword", "admin"))
            .unwrap();

        let new_digest = hasher.hash("newpassword").unwrap();
        assert!(store.update_password(user.id, &new_digest).unwrap());
        assert!(store.authenticate(&hasher, "lucasb", "newpassword").unwrap().is_some());
        assert!(store.authenticate(&hasher, "lucasb", "testpassword").unwrap().is_none());

        assert!(store.update_phone_number(user.id, "2222222222").unwrap());
        let reloaded = store.get_user_by_id(user.id).unwrap().unwrap();
        assert_eq!(reloaded.phone_number.as_deref(), Some("2222222222"));

        assert!(!store.update_phone_number(99, "2222222222").unwrap());
    }
}
