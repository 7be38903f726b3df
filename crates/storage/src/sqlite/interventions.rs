use agora_core::{Intervention, InterventionDraft};
use chrono::{DateTime, Utc};
use rusqlite::params;

use super::{Storage, parse_ts, phase_from_sql, phase_to_sql};
use crate::StorageError;

fn map_intervention(row: &rusqlite::Row<'_>) -> rusqlite::Result<Intervention> {
    Ok(Intervention {
        id: row.get(0)?,
        agent_name: row.get(1)?,
        room_id: row.get(2)?,
        rule_name: row.get(3)?,
        message: row.get(4)?,
        explanation: row.get(5)?,
        created_at: parse_ts(&row.get::<_, String>(6)?)?,
        phase_index: phase_from_sql(row.get(7)?),
        activity_run_id: row.get(8)?,
    })
}

impl Storage {
    pub fn append_intervention(
        &self,
        draft: &InterventionDraft,
    ) -> Result<Intervention, StorageError> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO interventions
               (agent_name, room_id, rule_name, message, explanation, created_at,
                phase_index, activity_run_id)
               VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                draft.agent_name,
                draft.room_id,
                draft.rule_name,
                draft.message,
                draft.explanation,
                draft.created_at.to_rfc3339(),
                phase_to_sql(draft.phase_index),
                draft.activity_run_id,
            ],
        )?;
        Ok(Intervention {
            id: conn.last_insert_rowid(),
            agent_name: draft.agent_name.clone(),
            room_id: draft.room_id,
            rule_name: draft.rule_name.clone(),
            message: draft.message.clone(),
            explanation: draft.explanation.clone(),
            created_at: draft.created_at,
            phase_index: draft.phase_index,
            activity_run_id: draft.activity_run_id.clone(),
        })
    }

    /// Cooldown lookup: exact `rule_name`, explicit null-safe phase match,
    /// trailing window.
    pub fn intervention_since(
        &self,
        room_id: i64,
        rule_name: &str,
        phase_index: Option<u32>,
        since: DateTime<Utc>,
    ) -> Result<bool, StorageError> {
        let conn = self.conn()?;
        let exists = conn.query_row(
            "SELECT EXISTS(
                SELECT 1 FROM interventions
                 WHERE room_id = ?1 AND rule_name = ?2 AND phase_index IS ?3
                   AND created_at >= ?4)",
            params![room_id, rule_name, phase_to_sql(phase_index), since.to_rfc3339()],
            |row| row.get(0),
        )?;
        Ok(exists)
    }

    pub fn interventions_in_room(&self, room_id: i64) -> Result<Vec<Intervention>, StorageError> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, agent_name, room_id, rule_name, message, explanation, created_at,
                    phase_index, activity_run_id
               FROM interventions
              WHERE room_id = ?1
              ORDER BY created_at ASC, id ASC",
        )?;
        let interventions = stmt
            .query_map(params![room_id], map_intervention)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(interventions)
    }
}
