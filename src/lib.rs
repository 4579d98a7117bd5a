//! Deterministic single-elimination tournament engine.
//!
//! A chain-side state machine that takes registrations with buy-ins, seeds a
//! bracket from per-block entropy, advances winners round by round, and
//! settles the prize pool — bit-exactly on every node. Alongside it lives
//! the indexer support layer: account-impact resolution over the full
//! operation set and change-notification dispatch over the host database's
//! undo journal.

pub mod bracket;
pub mod constants;
pub mod db;
pub mod error;
pub mod events;
pub mod impact;
pub mod lifecycle;
pub mod notify;
pub mod ops;
pub mod rng;
pub mod scheduler;
pub mod state;

pub use constants::*;
pub use error::{Result, TournamentError};
pub use state::*;
