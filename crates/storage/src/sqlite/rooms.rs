use agora_core::{Room, RoomMember};
use chrono::{DateTime, Utc};
use rusqlite::{OptionalExtension as _, params};
use uuid::Uuid;

use super::{Storage, parse_json, parse_ts};
use crate::StorageError;

const ROOM_COLUMNS: &str =
    "id, code, name, activity_run_id, activity_started_at, phase_durations, created_at";

fn map_room(row: &rusqlite::Row<'_>) -> rusqlite::Result<Room> {
    let started_at: Option<String> = row.get(4)?;
    let durations: String = row.get(5)?;
    Ok(Room {
        id: row.get(0)?,
        code: row.get(1)?,
        name: row.get(2)?,
        activity_run_id: row.get(3)?,
        activity_started_at: started_at.as_deref().map(parse_ts).transpose()?,
        phase_durations: parse_json(&durations)?,
        created_at: parse_ts(&row.get::<_, String>(6)?)?,
    })
}

impl Storage {
    pub fn create_room(
        &self,
        code: &str,
        name: &str,
        now: DateTime<Utc>,
    ) -> Result<Room, StorageError> {
        let conn = self.conn()?;
        let run_id = Uuid::new_v4().to_string();
        conn.execute(
            "INSERT INTO rooms (code, name, activity_run_id, phase_durations, created_at)
               VALUES (?1, ?2, ?3, '[]', ?4)",
            params![code, name, run_id, now.to_rfc3339()],
        )?;
        let id = conn.last_insert_rowid();
        Ok(Room {
            id,
            code: code.to_owned(),
            name: name.to_owned(),
            activity_run_id: run_id,
            activity_started_at: None,
            phase_durations: Vec::new(),
            created_at: now,
        })
    }

    pub fn room_by_code(&self, code: &str) -> Result<Option<Room>, StorageError> {
        let conn = self.conn()?;
        let room = conn
            .query_row(
                &format!("SELECT {ROOM_COLUMNS} FROM rooms WHERE code = ?1"),
                params![code],
                map_room,
            )
            .optional()?;
        Ok(room)
    }

    pub fn room_by_id(&self, id: i64) -> Result<Option<Room>, StorageError> {
        let conn = self.conn()?;
        let room = conn
            .query_row(
                &format!("SELECT {ROOM_COLUMNS} FROM rooms WHERE id = ?1"),
                params![id],
                map_room,
            )
            .optional()?;
        Ok(room)
    }

    /// Idempotent per `(room, user)`: re-joining keeps the original join
    /// timestamp, so the inactivity grace period cannot be reset.
    pub fn add_member(
        &self,
        room_id: i64,
        user_id: i64,
        now: DateTime<Utc>,
    ) -> Result<(), StorageError> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT OR IGNORE INTO memberships (room_id, user_id, joined_at)
               VALUES (?1, ?2, ?3)",
            params![room_id, user_id, now.to_rfc3339()],
        )?;
        Ok(())
    }

    pub fn members(&self, room_id: i64) -> Result<Vec<RoomMember>, StorageError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT m.user_id, u.display_name, m.joined_at
               FROM memberships m
               JOIN users u ON u.id = m.user_id
              WHERE m.room_id = ?1
              ORDER BY m.joined_at ASC, m.id ASC",
        )?;
        let members = stmt
            .query_map(params![room_id], |row| {
                Ok(RoomMember {
                    user_id: row.get(0)?,
                    display_name: row.get(1)?,
                    joined_at: parse_ts(&row.get::<_, String>(2)?)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(members)
    }

    /// (Re)start the activity. Regenerating the run id here is what scopes
    /// all prior posts, interventions, and nudge state as historical.
    pub fn start_activity(
        &self,
        room_id: i64,
        durations_secs: &[u32],
        now: DateTime<Utc>,
    ) -> Result<Room, StorageError> {
        let conn = self.conn()?;
        let run_id = Uuid::new_v4().to_string();
        let changed = conn.execute(
            "UPDATE rooms
                SET activity_run_id = ?1, activity_started_at = ?2, phase_durations = ?3
              WHERE id = ?4",
            params![run_id, now.to_rfc3339(), serde_json::to_string(durations_secs)?, room_id],
        )?;
        if changed == 0 {
            return Err(StorageError::NotFound { entity: "room", id: room_id.to_string() });
        }
        drop(conn);
        self.room_by_id(room_id)?
            .ok_or(StorageError::NotFound { entity: "room", id: room_id.to_string() })
    }

    pub fn activity_run_id(&self, room_id: i64) -> Result<String, StorageError> {
        let conn = self.conn()?;
        conn.query_row(
            "SELECT activity_run_id FROM rooms WHERE id = ?1",
            params![room_id],
            |row| row.get(0),
        )
        .optional()?
        .ok_or(StorageError::NotFound { entity: "room", id: room_id.to_string() })
    }
}
