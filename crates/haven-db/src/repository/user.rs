//! # User Repository
//!
//! Database operations for users.
//!
//! ## Email Normalization
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                 Case-Insensitive Email Matching                     │
//! │                                                                     │
//! │  Sign-up form: "Ada@Example.COM"                                    │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  insert() lowercases → stored as "ada@example.com"                  │
//! │                                                                     │
//! │  Login form: "ADA@example.com"                                      │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  get_by_email() lowercases its input → "ada@example.com"            │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  Plain equality match. Both sides are lowercase, so matching is     │
//! │  case-insensitive without any collation tricks in the SQL.          │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;
use uuid::Uuid;

use crate::error::DbResult;
use haven_core::validation::validate_new_user;
use haven_core::{NewUser, User};

/// Repository for user database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = UserRepository::new(pool);
///
/// // Case-insensitive lookup
/// let user = repo.get_by_email("Guest@Example.com").await?;
///
/// // Register
/// let user = repo.insert(&new_user).await?;
/// ```
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Creates a new UserRepository.
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    /// Gets a user by email, matching case-insensitively.
    ///
    /// The input is trimmed and lowercased before the query; stored
    /// emails are always lowercase, so this is an exact match.
    ///
    /// ## Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user with that email
    pub async fn get_by_email(&self, email: &str) -> DbResult<Option<User>> {
        let email = email.trim().to_lowercase();

        debug!(email = %email, "Looking up user by email");

        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password, created_at
            FROM users
            WHERE email = ?1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Gets a user by their ID.
    ///
    /// ## Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - User not found
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password, created_at
            FROM users
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Registers a new user and returns the inserted row.
    ///
    /// The email is lowercased before storage so later lookups match
    /// regardless of casing. The password is stored as the opaque string
    /// the caller provided; this layer never interprets it.
    ///
    /// ## Returns
    /// * `Ok(User)` - The inserted row
    /// * `Err(DbError::Domain)` - A required field was empty or malformed
    /// * `Err(DbError::UniqueViolation)` - Email already registered
    pub async fn insert(&self, new_user: &NewUser) -> DbResult<User> {
        validate_new_user(new_user).map_err(haven_core::CoreError::from)?;

        let user = User {
            id: Uuid::new_v4().to_string(),
            name: new_user.name.trim().to_string(),
            email: new_user.email.trim().to_lowercase(),
            password: new_user.password.clone(),
            created_at: Utc::now(),
        };

        debug!(id = %user.id, email = %user.email, "Inserting user");

        sqlx::query(
            r#"
            INSERT INTO users (id, name, email, password, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password)
        .bind(user.created_at)
        .execute(&self.pool)
        .await?;

        Ok(user)
    }

    /// Counts registered users (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;
    use crate::pool::{Database, DbConfig};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn ada() -> NewUser {
        NewUser {
            name: "Ada Lovelace".to_string(),
            email: "Ada@Example.COM".to_string(),
            password: "correct-horse".to_string(),
        }
    }

    #[tokio::test]
    async fn test_email_lookup_is_case_insensitive() {
        let db = test_db().await;
        db.users().insert(&ada()).await.unwrap();

        for attempt in ["ada@example.com", "ADA@EXAMPLE.COM", "aDa@eXaMpLe.CoM"] {
            let found = db.users().get_by_email(attempt).await.unwrap();
            assert!(found.is_some(), "lookup failed for {attempt}");
            assert_eq!(found.unwrap().name, "Ada Lovelace");
        }
    }

    #[tokio::test]
    async fn test_insert_then_get_by_id_round_trips() {
        let db = test_db().await;
        let inserted = db.users().insert(&ada()).await.unwrap();

        let fetched = db.users().get_by_id(&inserted.id).await.unwrap().unwrap();
        assert_eq!(fetched.name, "Ada Lovelace");
        // Stored email is the lowercased form.
        assert_eq!(fetched.email, "ada@example.com");
    }

    #[tokio::test]
    async fn test_unknown_email_is_none_not_error() {
        let db = test_db().await;
        let found = db.users().get_by_email("nobody@example.com").await.unwrap();
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected() {
        let db = test_db().await;
        db.users().insert(&ada()).await.unwrap();

        // Same email, different casing: still the same stored value.
        let again = NewUser {
            name: "A. Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            password: "other".to_string(),
        };
        let err = db.users().insert(&again).await.unwrap_err();
        assert!(matches!(err, DbError::UniqueViolation { .. }));
    }

    #[tokio::test]
    async fn test_empty_name_is_rejected_before_query() {
        let db = test_db().await;
        let bad = NewUser {
            name: String::new(),
            email: "x@example.com".to_string(),
            password: "pw".to_string(),
        };
        let err = db.users().insert(&bad).await.unwrap_err();
        assert!(matches!(err, DbError::Domain(_)));
        assert_eq!(db.users().count().await.unwrap(), 0);
    }
}
