use crate::core::calculator::duration::OvernightPolicy;
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

pub mod migrate;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_store_name")]
    pub store_name: String,
    #[serde(default = "default_store_name")]
    pub calendar_location: String,
    #[serde(default = "default_timezone")]
    pub calendar_timezone: String,
    #[serde(default)]
    pub overnight_policy: OvernightPolicy,
    #[serde(default = "default_currency")]
    pub currency_symbol: String,
    #[serde(default = "default_min_password")]
    pub min_password_length: usize,
}

fn default_store_name() -> String {
    "Paprika".to_string()
}
fn default_timezone() -> String {
    "Europe/Amsterdam".to_string()
}
fn default_currency() -> String {
    "€".to_string()
}
fn default_min_password() -> usize {
    6
}

impl Default for Config {
    fn default() -> Self {
        Self::with_database(Self::database_file().to_string_lossy().to_string())
    }
}

impl Config {
    pub fn with_database(database: String) -> Self {
        Self {
            database,
            store_name: default_store_name(),
            calendar_location: default_store_name(),
            calendar_timezone: default_timezone(),
            overnight_policy: OvernightPolicy::default(),
            currency_symbol: default_currency(),
            min_password_length: default_min_password(),
        }
    }

    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("paprika")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".paprika")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("paprika.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("paprika.sqlite")
    }

    /// Load configuration from file, or return defaults if not found.
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("cannot read {}: {e}", path.display())))?;
        serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("cannot parse {}: {e}", path.display())))
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(self)?;
        let mut file = fs::File::create(path)?;
        file.write_all(yaml.as_bytes())?;
        Ok(())
    }

    /// Initialize configuration and database files, returning the DB path.
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> AppResult<String> {
        let dir = Self::config_dir();

        let db_path = match custom_db {
            Some(name) => {
                let p = Path::new(&name);
                if p.is_absolute() {
                    p.to_path_buf()
                } else {
                    dir.join(p)
                }
            }
            None => Self::database_file(),
        };

        if !is_test {
            fs::create_dir_all(&dir)?;
            let config = Config::with_database(db_path.to_string_lossy().to_string());
            config.save_to(&Self::config_file())?;
        }

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }

        Ok(db_path.to_string_lossy().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_takes_defaults() {
        let cfg: Config = serde_yaml::from_str("database: /tmp/x.sqlite\n").unwrap();
        assert_eq!(cfg.database, "/tmp/x.sqlite");
        assert_eq!(cfg.min_password_length, 6);
        assert_eq!(cfg.overnight_policy, OvernightPolicy::Rollover);
        assert_eq!(cfg.calendar_timezone, "Europe/Amsterdam");
    }

    #[test]
    fn policy_is_spelled_in_kebab_case() {
        let cfg: Config =
            serde_yaml::from_str("database: a.sqlite\novernight_policy: same-day\n").unwrap();
        assert_eq!(cfg.overnight_policy, OvernightPolicy::SameDay);
    }
}
