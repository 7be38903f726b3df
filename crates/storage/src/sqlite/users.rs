use std::str::FromStr as _;

use agora_core::{User, UserRole};
use chrono::{DateTime, Utc};
use rusqlite::{OptionalExtension as _, params};

use super::{Storage, parse_ts};
use crate::StorageError;

fn map_user(row: &rusqlite::Row<'_>) -> rusqlite::Result<User> {
    let role_str: String = row.get(3)?;
    let role = UserRole::from_str(&role_str)
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(e.into()))?;
    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        display_name: row.get(2)?,
        role,
        created_at: parse_ts(&row.get::<_, String>(4)?)?,
    })
}

impl Storage {
    pub fn create_user(
        &self,
        username: &str,
        display_name: &str,
        role: UserRole,
        now: DateTime<Utc>,
    ) -> Result<User, StorageError> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO users (username, display_name, role, created_at)
               VALUES (?1, ?2, ?3, ?4)",
            params![username, display_name, role.as_str(), now.to_rfc3339()],
        )?;
        Ok(User {
            id: conn.last_insert_rowid(),
            username: username.to_owned(),
            display_name: display_name.to_owned(),
            role,
            created_at: now,
        })
    }

    pub fn user_by_id(&self, id: i64) -> Result<Option<User>, StorageError> {
        let conn = self.conn()?;
        let user = conn
            .query_row(
                "SELECT id, username, display_name, role, created_at FROM users WHERE id = ?1",
                params![id],
                map_user,
            )
            .optional()?;
        Ok(user)
    }
}
