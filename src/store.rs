use std::fs;
use std::path::PathBuf;

use chrono::Local;
use tracing::info;

use crate::config::AppConfig;
use crate::error::Result;
use crate::schedule::Schedule;

const EVENTS_FILE: &str = "events.txt";
const BACKUPS_DIR: &str = "backups";

/// Flat-file persistence for the schedule: one events file plus a folder of
/// timestamped backups, all under a single data directory.
#[derive(Debug, Clone)]
pub struct Store {
    data_dir: PathBuf,
}

impl Store {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self { data_dir: data_dir.into() }
    }

    /// Data directory from `SCHEDULER_DATA_LOCATION` (config or env), default
    /// "./data".
    pub fn from_config(config: &AppConfig) -> Self {
        let dir = config
            .get("SCHEDULER_DATA_LOCATION")
            .unwrap_or_else(|| "./data".to_string());
        Self::new(dir)
    }

    pub fn events_path(&self) -> PathBuf {
        self.data_dir.join(EVENTS_FILE)
    }

    /// Load the schedule from the events file. `Ok(None)` means the file does
    /// not exist yet, which is a fresh start rather than an error.
    pub fn load(&self) -> Result<Option<Schedule>> {
        let path = self.events_path();
        if !path.is_file() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path)?;
        let lines: Vec<String> = content.lines().map(str::to_string).collect();
        let schedule = Schedule::from_lines(&lines)?;
        info!(events = schedule.len(), path = %path.display(), "schedule loaded");
        Ok(Some(schedule))
    }

    /// Write the events file and take a backup of what was written.
    pub fn save(&self, schedule: &Schedule) -> Result<()> {
        fs::create_dir_all(&self.data_dir)?;
        let path = self.events_path();
        fs::write(&path, Self::file_body(schedule))?;
        info!(events = schedule.len(), path = %path.display(), "schedule saved");
        self.backup(schedule, "")
    }

    /// Write a timestamped copy under the backups folder. A non-empty prefix
    /// marks what triggered the backup (e.g. "WIPE_SCHEDULE").
    pub fn backup(&self, schedule: &Schedule, prefix: &str) -> Result<()> {
        let dir = self.data_dir.join(BACKUPS_DIR);
        fs::create_dir_all(&dir)?;
        // colons are not portable in file names
        let stamp = Local::now().format("%Y-%m-%d %H.%M.%S%.6f");
        let name = if prefix.is_empty() {
            format!("{stamp}.txt")
        } else {
            format!("{prefix} {stamp}.txt")
        };
        let path = dir.join(name);
        fs::write(&path, Self::file_body(schedule))?;
        info!(path = %path.display(), "backup written");
        Ok(())
    }

    fn file_body(schedule: &Schedule) -> String {
        let mut body = schedule.to_lines().join("\n");
        if !body.is_empty() {
            body.push('\n');
        }
        body
    }
}
