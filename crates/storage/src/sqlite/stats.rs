use super::{Storage, StorageStats};
use crate::StorageError;

impl Storage {
    pub fn get_stats(&self) -> Result<StorageStats, StorageError> {
        let conn = self.conn()?;
        let count = |table: &str| -> Result<i64, StorageError> {
            let n = conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |row| {
                row.get(0)
            })?;
            Ok(n)
        };
        Ok(StorageStats {
            room_count: count("rooms")?,
            user_count: count("users")?,
            post_count: count("posts")?,
            intervention_count: count("interventions")?,
        })
    }
}
