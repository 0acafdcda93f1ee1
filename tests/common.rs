#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Isolated HOME plus a database path inside it.
pub struct TestEnv {
    pub home: TempDir,
    pub db: String,
}

impl TestEnv {
    pub fn new() -> Self {
        let home = tempfile::tempdir().expect("temp home");
        let db = home.path().join("worktime.sqlite").to_string_lossy().to_string();
        Self { home, db }
    }

    /// Command bound to this environment's HOME and database.
    pub fn rwt(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("rworktime");
        cmd.env("HOME", self.home.path())
            .env("NO_COLOR", "1")
            .env_remove("RWORKTIME_LOG")
            .args(["--db", &self.db]);
        cmd
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.home.path().join(name)
    }

    pub fn init(&self) {
        self.rwt().args(["--test", "init"]).assert().success();
    }

    pub fn add(&self, date: &str, start: &str, end: &str, lunch: &str) {
        self.rwt()
            .args(["add", date, "--in", start, "--out", end, "--lunch", lunch])
            .assert()
            .success();
    }

    /// Initialized database with three working times over two days.
    pub fn with_data() -> Self {
        let env = Self::new();
        env.init();
        env.add("2025-09-01", "09:00", "17:00", "30");
        env.add("2025-09-15", "08:10", "12:00", "0");
        env.add("2025-09-15", "13:00", "17:10", "0");
        env
    }
}

pub fn read(path: &Path) -> String {
    std::fs::read_to_string(path).expect("read output file")
}
