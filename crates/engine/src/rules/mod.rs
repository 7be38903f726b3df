//! Rule evaluators.
//!
//! Each rule consumes store state and conditionally appends interventions.
//! Rules are independent of one another; each returns the `rule_name` of
//! every intervention it wrote, for aggregation by the dispatcher.
//!
//! All writes stamp the room's *current* activity-run id, read at write
//! time — not the triggering post's stamped id. Under normal sequencing the
//! two coincide; when an activity restart races a dispatch the live value
//! wins.

pub(crate) mod equity;
pub(crate) mod evidence;
pub(crate) mod inactivity;
