use async_trait::async_trait;

use super::{SqliteRepository, mapping::map_user_row};
use crate::repository::{StorageError, UserRecord, UserRepository};

fn conn_err(e: &sqlx::Error) -> StorageError {
    if let sqlx::Error::Database(db) = e {
        if db.is_unique_violation() {
            return StorageError::Conflict;
        }
    }
    StorageError::Connection(e.to_string())
}

#[async_trait]
impl UserRepository for SqliteRepository {
    async fn insert_user(&self, record: &UserRecord) -> Result<(), StorageError> {
        sqlx::query(
            r"
                INSERT INTO users (id, email, name, password, created_at)
                VALUES (?1, ?2, ?3, ?4, ?5)
            ",
        )
        .bind(record.id.value().to_string())
        .bind(&record.email)
        .bind(&record.name)
        .bind(&record.password)
        .bind(record.created_at)
        .execute(self.pool())
        .await
        .map_err(|e| conn_err(&e))?;

        Ok(())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, StorageError> {
        let row = sqlx::query(
            r"
                SELECT id, email, name, password, created_at
                FROM users
                WHERE email = ?1
            ",
        )
        .bind(email)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        row.as_ref().map(map_user_row).transpose()
    }
}
