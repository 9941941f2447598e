use std::collections::HashMap;
use std::env;
use std::fs;

use crate::error::{Result, SchedulerError};

/// Flat KEY=VALUE config, the same shape a shell env file has. Lines may be
/// commented with `#`, carry an `export ` prefix, or quote their value.
#[derive(Debug, Default, Clone)]
pub struct AppConfig {
    values: HashMap<String, String>,
}

impl AppConfig {
    pub fn from_file(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| SchedulerError::Config(format!("{path}: {e}")))?;
        let mut values = HashMap::new();
        for (index, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let trimmed = trimmed.strip_prefix("export ").unwrap_or(trimmed);
            let Some((key, value)) = trimmed.split_once('=') else {
                return Err(SchedulerError::Config(format!(
                    "invalid line {} in {path}: {line}",
                    index + 1
                )));
            };
            let mut value = value.trim();
            if (value.starts_with('"') && value.ends_with('"') && value.len() >= 2)
                || (value.starts_with('\'') && value.ends_with('\'') && value.len() >= 2)
            {
                value = &value[1..value.len() - 1];
            }
            values.insert(key.trim().to_string(), value.to_string());
        }
        Ok(Self { values })
    }

    /// A config value, falling back to the environment variable of the same name.
    pub fn get(&self, key: &str) -> Option<String> {
        self.values
            .get(key)
            .cloned()
            .or_else(|| env::var(key).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(name: &str, content: &str) -> String {
        let path = env::temp_dir().join(format!("scheduler_cfg_{}_{name}", std::process::id()));
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path.to_string_lossy().into_owned()
    }

    #[test]
    fn parses_comments_exports_and_quotes() {
        let path = write_config(
            "basic",
            "# a comment\nexport SCHEDULER_DATA_LOCATION=\"/tmp/sched\"\nBLANKS='5'\n\n",
        );
        let config = AppConfig::from_file(&path).unwrap();
        assert_eq!(
            config.get("SCHEDULER_DATA_LOCATION").as_deref(),
            Some("/tmp/sched")
        );
        assert_eq!(config.get("BLANKS").as_deref(), Some("5"));
        fs::remove_file(path).ok();
    }

    #[test]
    fn rejects_lines_without_equals() {
        let path = write_config("broken", "JUSTAWORD\n");
        assert!(AppConfig::from_file(&path).is_err());
        fs::remove_file(path).ok();
    }
}
