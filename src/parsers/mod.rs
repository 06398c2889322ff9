//! Line-level decoders for game-server logs
//!
//! - [`line`] splits a raw line into its timestamp and payload columns
//! - [`settings`] decodes the key/value list announced by `InitGame`
//! - [`event`] decodes `;`-separated event payloads into typed events
//! - [`log`] reads a log file from disk and runs it through the extractor
//!
//! The decoders are infallible and degrade to zeros and empty strings on bad
//! input. Only file I/O in [`log`] returns errors, using `anyhow::Result`
//! with context.

pub mod event;
pub mod line;
pub mod log;
pub mod settings;

pub use event::parse_event;
pub use line::RawLine;
pub use log::parse_log_file;
pub use settings::parse_settings;
