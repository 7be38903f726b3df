use agora_core::{Post, PostDraft};
use chrono::{DateTime, Utc};
use rusqlite::{OptionalExtension as _, params};

use super::{Storage, parse_ts, phase_from_sql, phase_to_sql};
use crate::StorageError;

fn map_post(row: &rusqlite::Row<'_>) -> rusqlite::Result<Post> {
    Ok(Post {
        id: row.get(0)?,
        room_id: row.get(1)?,
        author_id: row.get(2)?,
        author_name: row.get(3)?,
        content: row.get(4)?,
        created_at: parse_ts(&row.get::<_, String>(5)?)?,
        phase_index: phase_from_sql(row.get(6)?),
        activity_run_id: row.get(7)?,
        lacks_evidence: row.get(8)?,
    })
}

impl Storage {
    pub fn append_post(&self, draft: &PostDraft) -> Result<Post, StorageError> {
        let conn = self.conn()?;
        let author_name: String = conn
            .query_row(
                "SELECT display_name FROM users WHERE id = ?1",
                params![draft.author_id],
                |row| row.get(0),
            )
            .optional()?
            .ok_or(StorageError::NotFound {
                entity: "user",
                id: draft.author_id.to_string(),
            })?;
        conn.execute(
            "INSERT INTO posts
               (room_id, author_id, content, created_at, phase_index, activity_run_id, lacks_evidence)
               VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                draft.room_id,
                draft.author_id,
                draft.content,
                draft.created_at.to_rfc3339(),
                phase_to_sql(draft.phase_index),
                draft.activity_run_id,
                draft.lacks_evidence,
            ],
        )?;
        Ok(Post {
            id: conn.last_insert_rowid(),
            room_id: draft.room_id,
            author_id: draft.author_id,
            author_name,
            content: draft.content.clone(),
            created_at: draft.created_at,
            phase_index: draft.phase_index,
            activity_run_id: draft.activity_run_id.clone(),
            lacks_evidence: draft.lacks_evidence,
        })
    }

    pub fn posts_in_room(&self, room_id: i64) -> Result<Vec<Post>, StorageError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT p.id, p.room_id, p.author_id, u.display_name, p.content, p.created_at,
                    p.phase_index, p.activity_run_id, p.lacks_evidence
               FROM posts p
               JOIN users u ON u.id = p.author_id
              WHERE p.room_id = ?1
              ORDER BY p.created_at ASC, p.id ASC",
        )?;
        let posts = stmt
            .query_map(params![room_id], map_post)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(posts)
    }

    pub fn count_posts_in_phase(
        &self,
        room_id: i64,
        phase_index: Option<u32>,
    ) -> Result<i64, StorageError> {
        let conn = self.conn()?;
        let count = conn.query_row(
            "SELECT COUNT(*) FROM posts WHERE room_id = ?1 AND phase_index IS ?2",
            params![room_id, phase_to_sql(phase_index)],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    pub fn count_posts_by_author(
        &self,
        room_id: i64,
        phase_index: Option<u32>,
        author_id: i64,
    ) -> Result<i64, StorageError> {
        let conn = self.conn()?;
        let count = conn.query_row(
            "SELECT COUNT(*) FROM posts
              WHERE room_id = ?1 AND phase_index IS ?2 AND author_id = ?3",
            params![room_id, phase_to_sql(phase_index), author_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    pub fn author_posted_since(
        &self,
        room_id: i64,
        phase_index: Option<u32>,
        author_id: i64,
        since: DateTime<Utc>,
    ) -> Result<bool, StorageError> {
        let conn = self.conn()?;
        let exists = conn.query_row(
            "SELECT EXISTS(
                SELECT 1 FROM posts
                 WHERE room_id = ?1 AND phase_index IS ?2 AND author_id = ?3
                   AND created_at >= ?4)",
            params![room_id, phase_to_sql(phase_index), author_id, since.to_rfc3339()],
            |row| row.get(0),
        )?;
        Ok(exists)
    }
}
