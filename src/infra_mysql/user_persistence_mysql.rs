use super::util::is_dup_key;
use crate::domain_model::*;
use crate::domain_port::*;
use sqlx::mysql::MySqlRow;
use sqlx::{MySqlPool, Row};
use tracing::warn;

pub const USERS_TABLE_DDL: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id BIGINT UNSIGNED NOT NULL AUTO_INCREMENT,
    first_name VARCHAR(50) NOT NULL,
    last_name VARCHAR(50) NOT NULL,
    PRIMARY KEY (id)
)
"#;

pub struct MySqlUserPersistence {
    pool: MySqlPool,
}

impl MySqlUserPersistence {
    pub fn new(pool: MySqlPool) -> Self {
        MySqlUserPersistence { pool }
    }

    pub async fn ensure_schema(&self) -> Result<(), PersistenceError> {
        sqlx::query(USERS_TABLE_DDL)
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("create users table", e))?;

        Ok(())
    }

    fn row_to_user(row: MySqlRow) -> Result<User, PersistenceError> {
        let id: UserId = row
            .try_get("id")
            .map_err(|e| PersistenceError::Store(e.to_string()))?;
        let first_name: String = row
            .try_get("first_name")
            .map_err(|e| PersistenceError::Store(e.to_string()))?;
        let last_name: String = row
            .try_get("last_name")
            .map_err(|e| PersistenceError::Store(e.to_string()))?;

        Ok(User::stored(id, first_name, last_name))
    }
}

#[async_trait::async_trait]
impl UserPersistence for MySqlUserPersistence {
    async fn save(&self, user: User) -> Result<User, PersistenceError> {
        match user.id() {
            None => {
                let result = sqlx::query(
                    r#"
INSERT INTO users (first_name, last_name)
VALUES (?, ?)
"#,
                )
                .bind(user.first_name())
                .bind(user.last_name())
                .execute(&self.pool)
                .await
                .map_err(|e| map_sqlx_error("insert user", e))?;

                Ok(user.with_id(UserId(result.last_insert_id())))
            }
            Some(id) => {
                sqlx::query(
                    r#"
INSERT INTO users (id, first_name, last_name)
VALUES (?, ?, ?)
ON DUPLICATE KEY UPDATE first_name = VALUES(first_name), last_name = VALUES(last_name)
"#,
                )
                .bind(id)
                .bind(user.first_name())
                .bind(user.last_name())
                .execute(&self.pool)
                .await
                .map_err(|e| map_sqlx_error("upsert user", e))?;

                Ok(user)
            }
        }
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, PersistenceError> {
        let row = sqlx::query("SELECT id, first_name, last_name FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("query user", e))?;

        row.map(Self::row_to_user).transpose()
    }
}

fn map_sqlx_error(action: &str, err: sqlx::Error) -> PersistenceError {
    warn!("{action} failed: {err}");
    if is_dup_key(&err) {
        PersistenceError::Constraint(format!("{action}: {err}"))
    } else {
        PersistenceError::Store(format!("{action}: {err}"))
    }
}
