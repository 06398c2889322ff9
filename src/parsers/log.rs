use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::extractor::LogExtractor;
use crate::models::ExtractionResult;
use crate::utils::validate_file_size;

/// Read buffer for log files; server logs are large and append-only
const READ_BUFFER_BYTES: usize = 1024 * 1024;

/// Parse a server log file from disk
///
/// Streams the file line by line instead of loading it whole. Lines are split
/// on `\n` only and decoded as lossy UTF-8, so the result matches
/// [`crate::parse_log`] on the same text.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read, or if it is larger
/// than the accepted maximum. Malformed content never causes an error.
pub fn parse_log_file(path: &Path, skip_to: i64) -> Result<ExtractionResult> {
    let file =
        File::open(path).with_context(|| format!("Failed to open log file: {}", path.display()))?;
    validate_file_size(&file, path)?;

    let mut reader = BufReader::with_capacity(READ_BUFFER_BYTES, file);
    let mut extractor = LogExtractor::new(skip_to);
    let mut buf = Vec::new();

    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .with_context(|| format!("Failed to read line from log file: {}", path.display()))?;
        if read == 0 {
            break;
        }
        if buf.last() == Some(&b'\n') {
            buf.pop();
        }
        extractor.feed_line(&String::from_utf8_lossy(&buf));
    }

    let stats = extractor.stats();
    let result = extractor.finish();
    debug!(
        path = %path.display(),
        lines = stats.lines,
        dividers = stats.dividers,
        skipped = stats.skipped,
        dropped = stats.dropped,
        "Log extraction finished"
    );
    info!(
        path = %path.display(),
        matches = result.matches.len(),
        last_log_time = result.last_log_time,
        "Parsed log file"
    );

    Ok(result)
}
