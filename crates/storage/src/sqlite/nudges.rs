use agora_core::NudgeState;
use rusqlite::{OptionalExtension as _, params};

use super::{Storage, parse_ts, phase_from_sql, phase_to_sql};
use crate::StorageError;

impl Storage {
    pub fn nudge_state(
        &self,
        room_id: i64,
        user_id: i64,
        phase_index: Option<u32>,
    ) -> Result<Option<NudgeState>, StorageError> {
        let conn = self.conn()?;
        let state = conn
            .query_row(
                "SELECT room_id, user_id, phase_index, flagged_count, last_nudged_at
                   FROM nudge_state
                  WHERE room_id = ?1 AND user_id = ?2 AND phase_index IS ?3",
                params![room_id, user_id, phase_to_sql(phase_index)],
                |row| {
                    let last: Option<String> = row.get(4)?;
                    Ok(NudgeState {
                        room_id: row.get(0)?,
                        user_id: row.get(1)?,
                        phase_index: phase_from_sql(row.get(2)?),
                        flagged_count: row.get(3)?,
                        last_nudged_at: last.as_deref().map(parse_ts).transpose()?,
                    })
                },
            )
            .optional()?;
        Ok(state)
    }

    /// Update-then-insert keyed on the triple. The key includes a nullable
    /// phase, which SQLite UNIQUE indexes treat as distinct values, so the
    /// upsert is spelled out instead of relying on a constraint.
    pub fn save_nudge_state(&self, state: &NudgeState) -> Result<(), StorageError> {
        let conn = self.conn()?;
        let last = state.last_nudged_at.map(|t| t.to_rfc3339());
        let changed = conn.execute(
            "UPDATE nudge_state
                SET flagged_count = ?1, last_nudged_at = ?2
              WHERE room_id = ?3 AND user_id = ?4 AND phase_index IS ?5",
            params![
                state.flagged_count,
                last,
                state.room_id,
                state.user_id,
                phase_to_sql(state.phase_index),
            ],
        )?;
        if changed == 0 {
            conn.execute(
                "INSERT INTO nudge_state
                   (room_id, user_id, phase_index, flagged_count, last_nudged_at)
                   VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    state.room_id,
                    state.user_id,
                    phase_to_sql(state.phase_index),
                    state.flagged_count,
                    last,
                ],
            )?;
        }
        Ok(())
    }
}
