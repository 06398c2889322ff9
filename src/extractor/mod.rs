//! Match extraction from game-server logs
//!
//! # Error Handling Strategy
//!
//! Extraction never fails. Server logs are best-effort and often partially
//! corrupt, so every malformed piece degrades instead of aborting the pass:
//!
//! - **Timestamps**: A non-numeric timestamp column reads as 0.
//! - **Payloads**: Short lines produce an empty payload; missing event fields
//!   decode as empty strings.
//! - **Unknown events**: Lines with an unrecognized tag are dropped silently.
//! - **Orphan lines**: Events or shutdowns before the first `InitGame` are
//!   dropped, since there is no match to attach them to.
//!
//! The extractor never logs. Counts of dropped lines are kept in
//! [`ExtractionStats`] for callers to report; rejecting bad lines is left to
//! them too.

pub mod log_extractor;

pub use log_extractor::{ExtractionStats, LogExtractor, parse_log};
