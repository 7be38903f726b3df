//! Shared constants for agora.
//!
//! Centralizes the rule-engine windows and thresholds so evaluators and
//! tests agree on a single source.

/// Window for the individual-inactivity rule: a member counts as active if
/// they posted within this many seconds. The same window doubles as the
/// join grace period and the per-member cooldown.
pub const INACTIVITY_WINDOW_SECS: i64 = 120;

/// Cooldown for the equity rule, per member and phase.
pub const EQUITY_COOLDOWN_SECS: i64 = 300;

/// Minimum posts in a phase before the equity rule has enough signal.
pub const EQUITY_MIN_POSTS: i64 = 3;

/// Minimum room members before the equity rule has enough signal.
pub const EQUITY_MIN_MEMBERS: usize = 2;

/// Fraction of the expected per-member average below which a member is
/// flagged as under-participating.
pub const EQUITY_THRESHOLD_RATIO: f64 = 0.5;

/// Every Nth flagged post triggers an evidence nudge (count-based cadence).
pub const NUDGE_CADENCE: u32 = 3;

/// Time-based floor: a nudge fires when the last one is older than this,
/// even if the cadence has not come around.
pub const NUDGE_FLOOR_SECS: i64 = 90;

/// Minimum trimmed length for a message to be treated as a claim by the
/// evidence classifier.
pub const MIN_CLAIM_CHARS: usize = 20;

/// Length of generated room codes.
pub const ROOM_CODE_LEN: usize = 6;
