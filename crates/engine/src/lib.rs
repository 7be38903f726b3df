//! Intervention rule engine for agora
//!
//! Stateful, time-aware heuristics that watch the stream of room activity
//! and inject synthetic facilitation messages when participation patterns
//! call for one. Sits between the HTTP handlers and storage; owns no
//! persistence of its own.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]
#![allow(clippy::min_ident_chars, reason = "Short error vars are idiomatic")]

mod dispatcher;
mod nudge_tracker;
mod rules;

#[cfg(test)]
mod tests;

pub use dispatcher::RuleEngine;
pub use nudge_tracker::record_and_should_nudge;
