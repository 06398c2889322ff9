//! Black Ops Log Extractor - Turn game server logs into structured matches
//!
//! This library parses the newline-delimited log a game server writes into an
//! ordered list of matches. It supports:
//!
//! - Detecting match boundaries from `InitGame` / `ShutdownGame` lines
//! - Decoding server settings announced at match start
//! - Decoding kills, deaths, joins, weapon changes and chat messages
//! - Resuming from a timestamp, keeping boundaries of already-seen matches
//!
//! # Example
//!
//! ```
//! use blops_log_extractor::parse_log;
//!
//! let log = "1300000000 InitGame: \\g_gametype\\dm\\mapname\\mp_nuketown\n\
//!            1300000042 K;1;0;;Alice;2;1;;Bob;python_mp;90;MOD_PISTOL_BULLET;head";
//! let result = parse_log(log, 0);
//! assert_eq!(result.matches[0].events[0].kind.type_tag(), "kill");
//! ```

pub mod cli;
pub mod extractor;
pub mod models;
pub mod parsers;
pub mod utils;

// Re-export commonly used types
pub use extractor::{LogExtractor, parse_log};
pub use models::{Event, EventKind, ExtractionResult, Match, Settings};
pub use parsers::parse_log_file;
