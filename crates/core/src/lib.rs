//! Core types and traits for agora
//!
//! This crate contains the domain model shared across all other crates:
//! rooms, posts, interventions, nudge state, the agent registry, the
//! evidence classifier, phase resolution, and the store traits the rule
//! engine consumes.

mod agent;
mod constants;
mod evidence;
mod intervention;
mod nudge;
mod phase;
mod post;
mod room;
mod stores;
mod user;

pub use agent::*;
pub use constants::*;
pub use evidence::*;
pub use intervention::*;
pub use nudge::*;
pub use phase::*;
pub use post::*;
pub use room::*;
pub use stores::*;
pub use user::*;
