//! Data models for extracted game logs.
//!
//! - [`ExtractionResult`] - Output of one pass over a log
//! - [`Match`] - A game session with its metadata and events
//! - [`Event`] / [`EventKind`] - Typed in-match occurrences
//! - [`Settings`] - Ordered server configuration pairs
//!
//! All models serialize with serde into the JSON shape consumers expect
//! (`lastLogTime`, `gameType`, `{"type", "data", "time"}` events).

pub mod event;
pub mod game;
pub mod settings;

pub use event::{CombatData, Event, EventKind, MessageData, PlayerData, WeaponChangeData};
pub use game::{ExtractionResult, Match};
pub use settings::Settings;
