//! Configuration upgrades: detect keys an older file lacks and fill them in
//! with their defaults, keeping every value the user already set.

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

fn default_mapping(cfg: &Config) -> AppResult<Mapping> {
    match serde_yaml::to_value(cfg)? {
        Value::Mapping(m) => Ok(m),
        _ => Err(AppError::Config("default configuration is not a mapping".into())),
    }
}

fn read_mapping(path: &Path) -> AppResult<Mapping> {
    let content = fs::read_to_string(path)?;
    match serde_yaml::from_str::<Value>(&content)? {
        Value::Mapping(m) => Ok(m),
        Value::Null => Ok(Mapping::new()),
        _ => Err(AppError::Config(format!(
            "{} does not contain a YAML mapping",
            path.display()
        ))),
    }
}

/// Keys present in the current schema but absent from the file.
pub fn missing_keys(path: &Path, defaults: &Config) -> AppResult<Vec<String>> {
    let current = read_mapping(path)?;
    let expected = default_mapping(defaults)?;

    Ok(expected
        .keys()
        .filter(|k| !current.contains_key(*k))
        .filter_map(|k| k.as_str().map(str::to_string))
        .collect())
}

/// Writes the missing keys with default values back into the file.
/// Returns the keys that were added (empty when nothing changed).
pub fn fill_missing(path: &Path, defaults: &Config) -> AppResult<Vec<String>> {
    let mut current = read_mapping(path)?;
    let expected = default_mapping(defaults)?;
    let mut added = Vec::new();

    for (k, v) in expected {
        if !current.contains_key(&k) {
            if let Some(name) = k.as_str() {
                added.push(name.to_string());
            }
            current.insert(k, v);
        }
    }

    if !added.is_empty() {
        fs::write(path, serde_yaml::to_string(&Value::Mapping(current))?)?;
    }

    Ok(added)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn fills_only_absent_keys() {
        let path = env::temp_dir().join("paprika_cfg_migrate_test.conf");
        fs::write(&path, "database: /tmp/keep.sqlite\nstore_name: Zemun\n").unwrap();

        let defaults = Config::with_database("/tmp/other.sqlite".into());
        let missing = missing_keys(&path, &defaults).unwrap();
        assert!(missing.contains(&"currency_symbol".to_string()));
        assert!(!missing.contains(&"store_name".to_string()));

        let added = fill_missing(&path, &defaults).unwrap();
        assert_eq!(added, missing);

        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.database, "/tmp/keep.sqlite");
        assert_eq!(cfg.store_name, "Zemun");
        assert!(missing_keys(&path, &defaults).unwrap().is_empty());

        fs::remove_file(&path).ok();
    }
}
