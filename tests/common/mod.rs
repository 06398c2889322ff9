//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// The dashed separator servers print between matches
pub fn divider() -> String {
    "-".repeat(60)
}

/// Builder for server log text
///
/// Each call appends one `TTTTTTTTTT <payload>` line.
pub struct LogBuilder {
    lines: Vec<String>,
}

impl LogBuilder {
    pub fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Append a line with a zero-padded 10 digit timestamp
    pub fn line(mut self, time: i64, payload: &str) -> Self {
        self.lines.push(format!("{:010} {}", time, payload));
        self
    }

    /// Append a line verbatim
    pub fn raw(mut self, line: &str) -> Self {
        self.lines.push(line.to_string());
        self
    }

    /// Append an InitGame line announcing the given game type and map
    pub fn init_game(self, time: i64, game_type: &str, map: &str) -> Self {
        let payload = format!(
            "InitGame: \\g_compassShowEnemies\\0\\g_gametype\\{}\\gamename\\Call of Duty: Black Ops\\mapname\\{}\\protocol\\2117\\scr_team_fftype\\1\\sv_hostname\\Test Server",
            game_type, map
        );
        self.line(time, &payload)
    }

    pub fn shutdown(self, time: i64) -> Self {
        self.line(time, "ShutdownGame:")
    }

    pub fn divider(self, time: i64) -> Self {
        let divider = divider();
        self.line(time, &divider)
    }

    pub fn join(self, time: i64, id: &str, slot: &str, name: &str) -> Self {
        self.line(time, &format!("J;{};{};{}", id, slot, name))
    }

    pub fn kill(self, time: i64, killer: &str, victim: &str, weapon: &str) -> Self {
        self.line(
            time,
            &format!(
                "K;100;0;allies;{};200;1;axis;{};{};100;MOD_RIFLE_BULLET;torso_upper",
                killer, victim, weapon
            ),
        )
    }

    pub fn say(self, time: i64, name: &str, message: &str) -> Self {
        self.line(time, &format!("say;100;0;{};{}", name, message))
    }

    pub fn build(&self) -> String {
        self.lines.join("\n")
    }

    /// Write the log to `games_mp.log` inside a fresh temp directory
    pub fn write_to_temp(&self) -> (TempDir, PathBuf) {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("games_mp.log");
        write_log(&path, &self.build());
        (dir, path)
    }
}

impl Default for LogBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn write_log(path: &Path, content: &str) {
    fs::write(path, content).expect("Failed to write log file");
}

/// A realistic two-match session with a restart and a divider
pub fn realistic_log() -> String {
    LogBuilder::new()
        .line(1300000000, "------------------------------------------------------------")
        .init_game(1300000001, "tdm", "mp_array")
        .init_game(1300000001, "tdm", "mp_array")
        .join(1300000010, "1111", "0", "Alice")
        .join(1300000012, "2222", "1", "Bob")
        .line(1300000015, "Weapon;1111;0;Alice;famas_mp")
        .kill(1300000030, "Alice", "Bob", "famas_mp")
        .line(
            1300000031,
            "D;200;1;axis;Bob;100;0;allies;Alice;famas_mp;100;MOD_RIFLE_BULLET;torso_upper",
        )
        .say(1300000040, "Bob", "gg")
        .line(1300000050, "Q;2222;1;Bob")
        .line(1300000600, "ExitLevel: executed")
        .shutdown(1300000600)
        .divider(1300000600)
        .init_game(1300000700, "sd", "mp_cracked")
        .join(1300000710, "1111", "0", "Alice")
        .shutdown(1300001200)
        .build()
}
