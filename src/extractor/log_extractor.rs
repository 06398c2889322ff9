use crate::models::{Event, ExtractionResult, Match};
use crate::parsers::event::parse_event;
use crate::parsers::line::RawLine;
use crate::parsers::settings::parse_settings;

const INIT_GAME: &str = "InitGame";
const SHUTDOWN_GAME: &str = "ShutdownGame";
const GAME_TYPE_KEY: &str = "g_gametype";
const MAP_KEY: &str = "mapname";

/// Length of the dashed separator the server prints between matches
const DIVIDER_LEN: usize = 60;

/// Line counters gathered during a pass, for diagnostics only
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractionStats {
    pub lines: usize,
    pub dividers: usize,
    pub events: usize,
    /// Lines before the skip threshold that were fast-forwarded
    pub skipped: usize,
    /// Lines that decoded to nothing or had no match to belong to
    pub dropped: usize,
}

/// Streaming match extractor
///
/// Feed lines in log order with [`LogExtractor::feed_line`], then call
/// [`LogExtractor::finish`]. The last element of `matches` is the open match;
/// an empty list means no `InitGame` has been seen yet.
///
/// With a non-zero `skip_to`, matches that began before it are still listed
/// (with `skip: true` and their start/end times) but carry no events.
#[derive(Debug, Clone, Default)]
pub struct LogExtractor {
    skip_to: i64,
    last_log_time: i64,
    matches: Vec<Match>,
    stats: ExtractionStats,
}

impl LogExtractor {
    pub fn new(skip_to: i64) -> Self {
        Self { skip_to, ..Default::default() }
    }

    /// Highest timestamp seen so far
    pub fn last_log_time(&self) -> i64 {
        self.last_log_time
    }

    pub fn stats(&self) -> ExtractionStats {
        self.stats
    }

    /// Process one line (without its trailing `\n`)
    pub fn feed_line(&mut self, line: &str) {
        self.stats.lines += 1;

        let RawLine { time, payload } = RawLine::parse(line);
        self.last_log_time = self.last_log_time.max(time);

        if is_divider(payload) {
            self.stats.dividers += 1;
            return;
        }

        // Servers repeat InitGame with the same timestamp on map restarts
        if payload.starts_with(INIT_GAME) && self.matches.last().is_none_or(|m| m.began != time) {
            self.open_match(time, payload);
            return;
        }

        if payload.starts_with(SHUTDOWN_GAME) {
            match self.matches.last_mut() {
                Some(current) => current.finished = Some(time),
                None => self.stats.dropped += 1,
            }
            return;
        }

        if time < self.skip_to {
            self.stats.skipped += 1;
            return;
        }

        let kind = if payload.contains(';') { parse_event(payload) } else { None };
        match (kind, self.matches.last_mut()) {
            (Some(kind), Some(current)) => {
                current.events.push(Event { kind, time });
                self.stats.events += 1;
            }
            _ => self.stats.dropped += 1,
        }
    }

    fn open_match(&mut self, time: i64, payload: &str) {
        let mut settings = parse_settings(payload);
        let game_type = settings.remove(GAME_TYPE_KEY).unwrap_or_default();
        let map = settings.remove(MAP_KEY).unwrap_or_default();

        self.matches.push(Match {
            began: time,
            finished: None,
            game_type,
            map,
            settings,
            skip: time < self.skip_to,
            events: Vec::new(),
        });
    }

    /// Close the pass and produce the result
    pub fn finish(mut self) -> ExtractionResult {
        if self.skip_to != 0 {
            for game in self.matches.iter_mut().filter(|m| m.skip) {
                self.stats.events -= game.events.len();
                game.events.clear();
            }
        }

        ExtractionResult { last_log_time: self.last_log_time, matches: self.matches }
    }
}

fn is_divider(payload: &str) -> bool {
    payload.len() >= DIVIDER_LEN && payload.bytes().all(|b| b == b'-')
}

/// Parse a whole log held in memory
///
/// Lines are split on `\n` only; a `\r` stays part of its line.
///
/// # Examples
///
/// ```
/// use blops_log_extractor::parse_log;
///
/// let log = "1300000000 InitGame: \\g_gametype\\tdm\\mapname\\mp_array\n\
///            1300000005 J;1234;0;Alice\n\
///            1300000600 ShutdownGame:";
///
/// let result = parse_log(log, 0);
/// assert_eq!(result.last_log_time, 1300000600);
/// assert_eq!(result.matches.len(), 1);
/// assert_eq!(result.matches[0].map, "mp_array");
/// assert_eq!(result.matches[0].finished, Some(1300000600));
/// assert_eq!(result.matches[0].events.len(), 1);
/// ```
pub fn parse_log(text: &str, skip_to: i64) -> ExtractionResult {
    let mut extractor = LogExtractor::new(skip_to);
    for line in text.split('\n') {
        extractor.feed_line(line);
    }
    extractor.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EventKind;

    const INIT_A: &str = r"1000000000 InitGame: \g_gametype\tdm\mapname\mp_array\fraglimit\75";
    const INIT_B: &str = r"1000001000 InitGame: \g_gametype\dm\mapname\mp_cracked";

    fn log(lines: &[&str]) -> String {
        lines.join("\n")
    }

    #[test]
    fn test_empty_log() {
        let result = parse_log("", 0);
        assert_eq!(result.last_log_time, 0);
        assert!(result.matches.is_empty());
    }

    #[test]
    fn test_single_match_metadata() {
        let text = log(&[INIT_A, "1000000500 ShutdownGame:"]);
        let result = parse_log(&text, 0);

        assert_eq!(result.matches.len(), 1);
        let game = &result.matches[0];
        assert_eq!(game.began, 1000000000);
        assert_eq!(game.finished, Some(1000000500));
        assert_eq!(game.game_type, "tdm");
        assert_eq!(game.map, "mp_array");
        assert_eq!(game.settings.get("fraglimit"), Some("75"));
        assert_eq!(game.settings.get("g_gametype"), None);
        assert_eq!(game.settings.get("mapname"), None);
        assert!(!game.skip);
    }

    #[test]
    fn test_two_matches_in_order() {
        let text = log(&[INIT_A, "1000000500 ShutdownGame:", INIT_B, "1000001500 ShutdownGame:"]);
        let result = parse_log(&text, 0);

        assert_eq!(result.matches.len(), 2);
        assert_eq!(result.matches[0].map, "mp_array");
        assert_eq!(result.matches[1].map, "mp_cracked");
        assert_eq!(result.matches[1].finished, Some(1000001500));
    }

    #[test]
    fn test_repeated_init_game_same_time_opens_one_match() {
        let text = log(&[INIT_A, INIT_A, "1000000010 J;1;0;Alice"]);
        let result = parse_log(&text, 0);

        assert_eq!(result.matches.len(), 1);
        assert_eq!(result.matches[0].events.len(), 1);
    }

    #[test]
    fn test_shutdown_does_not_open_a_match() {
        let text = log(&[INIT_A, "1000000500 ShutdownGame:", "1000000600 ShutdownGame:"]);
        let result = parse_log(&text, 0);

        assert_eq!(result.matches.len(), 1);
        assert_eq!(result.matches[0].finished, Some(1000000600));
    }

    #[test]
    fn test_events_keep_source_order() {
        let text = log(&[
            INIT_A,
            "1000000010 J;1;0;Alice",
            "1000000020 Weapon;1;0;Alice;ak47_mp",
            "1000000030 K;1;0;allies;Alice;2;1;axis;Bob;ak47_mp;100;MOD_HEAD_SHOT;head",
            "1000000040 say;2;1;Bob;nice shot",
        ]);
        let result = parse_log(&text, 0);

        let tags: Vec<&str> = result.matches[0].events.iter().map(|e| e.kind.type_tag()).collect();
        assert_eq!(tags, vec!["join", "weaponchange", "kill", "message"]);
        let times: Vec<i64> = result.matches[0].events.iter().map(|e| e.time).collect();
        assert_eq!(times, vec![1000000010, 1000000020, 1000000030, 1000000040]);
    }

    #[test]
    fn test_unrecognized_lines_are_dropped() {
        let text = log(&[
            INIT_A,
            "1000000010 Foo;1;2",
            "1000000011 ExitLevel: executed",
            "1000000012 J;1;0;Alice",
        ]);
        let mut extractor = LogExtractor::new(0);
        for line in text.split('\n') {
            extractor.feed_line(line);
        }
        assert_eq!(extractor.stats().dropped, 2);

        let result = extractor.finish();
        assert_eq!(result.matches[0].events.len(), 1);
        assert_eq!(result.last_log_time, 1000000012);
    }

    #[test]
    fn test_lines_before_first_init_game_are_dropped() {
        let text = log(&["0999999990 J;1;0;Early", "0999999995 ShutdownGame:", INIT_A]);
        let result = parse_log(&text, 0);

        assert_eq!(result.matches.len(), 1);
        assert!(result.matches[0].events.is_empty());
        assert_eq!(result.matches[0].finished, None);
    }

    #[test]
    fn test_divider_lines_only_count_time() {
        let divider = format!("1000000099 {}", "-".repeat(60));
        let text = log(&[INIT_A, &divider]);
        let result = parse_log(&text, 0);

        assert_eq!(result.last_log_time, 1000000099);
        assert!(result.matches[0].events.is_empty());
    }

    #[test]
    fn test_last_log_time_includes_skipped_lines() {
        let text = log(&[INIT_A, "1000000900 Foo;bar", "1000000500 ShutdownGame:"]);
        let result = parse_log(&text, 2000000000);
        assert_eq!(result.last_log_time, 1000000900);
    }

    #[test]
    fn test_skip_marks_old_matches_and_strips_their_events() {
        let text = log(&[
            INIT_A,
            "1000000010 J;1;0;Alice",
            // Still inside the old match but after the threshold
            "1000000900 J;2;1;Bob",
            "1000000950 ShutdownGame:",
            INIT_B,
            "1000001010 K;1;0;allies;Alice;2;1;axis;Bob;ak47_mp;100;MOD_RIFLE_BULLET;torso",
            "1000001500 ShutdownGame:",
        ]);
        let result = parse_log(&text, 1000000800);

        assert_eq!(result.matches.len(), 2);

        let old = &result.matches[0];
        assert!(old.skip);
        assert_eq!(old.began, 1000000000);
        assert_eq!(old.finished, Some(1000000950));
        assert!(old.events.is_empty());

        let new = &result.matches[1];
        assert!(!new.skip);
        assert_eq!(new.events.len(), 1);
        assert!(matches!(new.events[0].kind, EventKind::Kill(_)));
    }

    #[test]
    fn test_skip_threshold_equal_to_began_is_not_skipped() {
        let text = log(&[INIT_A, "1000000010 J;1;0;Alice"]);
        let result = parse_log(&text, 1000000000);

        assert!(!result.matches[0].skip);
        assert_eq!(result.matches[0].events.len(), 1);
    }

    #[test]
    fn test_missing_game_type_and_map_are_empty() {
        let text = r"1000000000 InitGame: \fraglimit\20";
        let result = parse_log(text, 0);

        assert_eq!(result.matches[0].game_type, "");
        assert_eq!(result.matches[0].map, "");
        assert_eq!(result.matches[0].settings.len(), 1);
    }

    #[test]
    fn test_parse_is_repeatable() {
        let text = log(&[INIT_A, "1000000010 J;1;0;Alice", "1000000500 ShutdownGame:", INIT_B]);
        assert_eq!(parse_log(&text, 0), parse_log(&text, 0));
        assert_eq!(parse_log(&text, 1000000800), parse_log(&text, 1000000800));
    }

    #[test]
    fn test_streaming_matches_in_memory_parse() {
        let text = log(&[INIT_A, "1000000010 J;1;0;Alice", "1000000500 ShutdownGame:"]);

        let mut extractor = LogExtractor::new(0);
        for line in text.lines() {
            extractor.feed_line(line);
        }
        assert_eq!(extractor.last_log_time(), 1000000500);
        assert_eq!(extractor.finish(), parse_log(&text, 0));
    }

    #[test]
    fn test_extraction_emits_no_log_records() {
        use std::io;
        use std::sync::{Arc, Mutex};

        struct Captured(Arc<Mutex<Vec<u8>>>);

        impl io::Write for Captured {
            fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
                self.0.lock().unwrap().extend_from_slice(buf);
                Ok(buf.len())
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let buffer = Arc::new(Mutex::new(Vec::new()));
        let writer = Arc::clone(&buffer);
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_writer(move || Captured(Arc::clone(&writer)))
            .finish();

        let text = log(&[INIT_A, "1000000010 Foo;1", "1000000020 J;1;0;Alice", INIT_B]);
        let result =
            tracing::subscriber::with_default(subscriber, || parse_log(&text, 1000000500));

        assert_eq!(result.matches.len(), 2);
        assert!(buffer.lock().unwrap().is_empty());
    }
}
