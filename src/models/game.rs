use serde::Serialize;

use super::{Event, Settings};

/// One game session, opened by `InitGame` and closed by `ShutdownGame`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub began: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finished: Option<i64>,
    pub game_type: String,
    pub map: String,
    pub settings: Settings,
    pub skip: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<Event>,
}

impl Match {
    /// Seconds between start and shutdown, if the match was closed
    pub fn duration_secs(&self) -> Option<i64> {
        self.finished.map(|finished| finished - self.began)
    }
}

/// Output of a single extraction pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    /// Highest timestamp seen on any line, including skipped ones
    pub last_log_time: i64,
    pub matches: Vec<Match>,
}
