//! Migration v2: the agent layer — interventions and nudge state

pub(super) const SQL: &str = "
CREATE TABLE IF NOT EXISTS interventions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    agent_name TEXT NOT NULL,
    room_id INTEGER NOT NULL REFERENCES rooms(id),
    rule_name TEXT NOT NULL,
    message TEXT NOT NULL,
    explanation TEXT NOT NULL,
    created_at TEXT NOT NULL,
    phase_index INTEGER,
    activity_run_id TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_interventions_dedup
    ON interventions(room_id, rule_name, created_at);
CREATE INDEX IF NOT EXISTS idx_interventions_room_created
    ON interventions(room_id, created_at);

CREATE TABLE IF NOT EXISTS nudge_state (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    room_id INTEGER NOT NULL REFERENCES rooms(id),
    user_id INTEGER NOT NULL REFERENCES users(id),
    phase_index INTEGER,
    flagged_count INTEGER NOT NULL DEFAULT 0,
    last_nudged_at TEXT
);

CREATE INDEX IF NOT EXISTS idx_nudge_state_key
    ON nudge_state(room_id, user_id, phase_index);

PRAGMA user_version = 2;
";
