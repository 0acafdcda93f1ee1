use crate::errors::{AppError, AppResult};
use crate::models::Location;
use crate::store::DEFAULT_LOAD_TIMEOUT;
use crate::utils::path::expand_tilde;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

/// Where `list` and `export` load working times from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    #[default]
    Sqlite,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_position")]
    pub default_position: String,
    #[serde(default = "default_load_timeout")]
    pub load_timeout_secs: u64,
    #[serde(default = "default_calendar")]
    pub working_time_calendar: bool,
    #[serde(default)]
    pub source: SourceKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json_file: Option<String>,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}
fn default_position() -> String {
    "O".to_string()
}
fn default_load_timeout() -> u64 {
    DEFAULT_LOAD_TIMEOUT.as_secs()
}
fn default_calendar() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            default_position: default_position(),
            load_timeout_secs: default_load_timeout(),
            working_time_calendar: default_calendar(),
            source: SourceKind::default(),
            json_file: None,
        }
    }
}

impl Config {
    /// Return the standard configuration directory (`~/.rworktime`)
    pub fn config_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".rworktime")
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rworktime.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rworktime.sqlite")
    }

    /// Load configuration from file, or return defaults if not found.
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)
            .map_err(|e| AppError::Config(format!("cannot read {}: {e}", path.display())))?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> AppResult<Self> {
        let cfg: Config = serde_yaml::from_str(content)
            .map_err(|e| AppError::Config(format!("invalid configuration: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn to_yaml(&self) -> AppResult<String> {
        serde_yaml::to_string(self).map_err(|e| AppError::Config(e.to_string()))
    }

    fn validate(&self) -> AppResult<()> {
        if self.load_timeout_secs == 0 {
            return Err(AppError::Config("load_timeout_secs must be at least 1".into()));
        }
        if Location::from_code(&self.default_position).is_none() {
            return Err(AppError::Config(format!(
                "default_position '{}' is not a valid location code",
                self.default_position
            )));
        }
        Ok(())
    }

    pub fn load_timeout(&self) -> Duration {
        Duration::from_secs(self.load_timeout_secs)
    }

    pub fn default_location(&self) -> Location {
        Location::from_code(&self.default_position).unwrap_or_default()
    }

    /// Resolve a user-supplied database name against the config directory.
    pub fn resolve_database(name: &str) -> PathBuf {
        let p = expand_tilde(name);
        if p.is_absolute() { p } else { Self::config_dir().join(p) }
    }

    /// Initialize configuration and database files.
    /// Returns the database path that was set up.
    pub fn init_all(custom_name: Option<&str>, is_test: bool) -> AppResult<String> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        let db_path = match custom_name {
            Some(name) => Self::resolve_database(name),
            None => Self::database_file(),
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        if !is_test {
            let yaml = config.to_yaml()?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
        }

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }

        Ok(config.database)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let cfg = Config::from_yaml("database: /tmp/x.sqlite\n").unwrap();
        assert_eq!(cfg.database, "/tmp/x.sqlite");
        assert_eq!(cfg.load_timeout_secs, 30);
        assert!(cfg.working_time_calendar);
        assert_eq!(cfg.source, SourceKind::Sqlite);
        assert_eq!(cfg.default_location(), Location::Office);
    }

    #[test]
    fn parses_json_source() {
        let cfg = Config::from_yaml(
            "source: json\njson_file: /tmp/wt.json\nworking_time_calendar: false\n",
        )
        .unwrap();
        assert_eq!(cfg.source, SourceKind::Json);
        assert_eq!(cfg.json_file.as_deref(), Some("/tmp/wt.json"));
        assert!(!cfg.working_time_calendar);
    }

    #[test]
    fn rejects_zero_timeout_and_bad_position() {
        assert!(Config::from_yaml("load_timeout_secs: 0\n").is_err());
        assert!(Config::from_yaml("default_position: Z\n").is_err());
    }
}
