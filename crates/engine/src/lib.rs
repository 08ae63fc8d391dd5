//! Engine module - session orchestration over the core components
//!
//! This crate owns the per-game [`Session`]: it feeds observed tiles into
//! the scorer and context, asks the decision simulator for humanlike
//! choices, paces every operation on the injected clock, and journals each
//! decision.
//!
//! The collaborators that produce typed tiles (recognition) and consume
//! chosen tiles (input injection) live outside this workspace; the engine's
//! surface is plain data in, plain data out.

pub mod journal;
pub mod session;

pub use mahjong_pilot_core as core;
pub use mahjong_pilot_types as types;

// Re-export the session surface for convenience
pub use journal::{DecisionJournal, EntryKind, JournalEntry};
pub use session::{DiscardDecision, Session};
