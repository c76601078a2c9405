//! Configuration file and resolution.
//!
//! An optional TOML file at `~/.config/weekly-diet/config.toml`, resolved with
//! the chain: CLI flag > env var > config file > default.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::planner::DEFAULT_DAILY_WATER_CUPS;

pub const DATA_DIR_ENV: &str = "WEEKLY_DIET_DATA_DIR";
pub const CATALOG_ENV: &str = "WEEKLY_DIET_CATALOG";

const APP_DIR: &str = "weekly-diet";
const DEFAULT_CATALOG_FILE: &str = "catalog.json";

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub storage: StorageSection,
    #[serde(default)]
    pub catalog: CatalogSection,
    #[serde(default)]
    pub water: WaterSection,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct StorageSection {
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CatalogSection {
    pub path: Option<PathBuf>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WaterSection {
    #[serde(default = "default_daily_goal")]
    pub daily_goal_cups: u32,
}

impl Default for WaterSection {
    fn default() -> Self {
        Self {
            daily_goal_cups: default_daily_goal(),
        }
    }
}

fn default_daily_goal() -> u32 {
    DEFAULT_DAILY_WATER_CUPS
}

/// Config directory: `$XDG_CONFIG_HOME/weekly-diet` or `~/.config/weekly-diet`.
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join(APP_DIR);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join(APP_DIR)
}

pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Parse a config file. A missing file is the default config.
pub fn load_config_from(path: &Path) -> Result<ConfigFile> {
    match fs::read_to_string(path) {
        Ok(contents) => Ok(toml::from_str(&contents)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no config file, using defaults");
            Ok(ConfigFile::default())
        }
        Err(e) => Err(e.into()),
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from(".weekly-diet"))
}

/// Fully resolved settings.
#[derive(Debug, Clone, PartialEq)]
pub struct DietConfig {
    pub data_dir: PathBuf,
    pub catalog_path: PathBuf,
    pub daily_water_cups: u32,
}

impl DietConfig {
    /// Resolve from CLI flags, the environment, and the default config file.
    pub fn resolve(cli_data_dir: Option<&Path>, cli_catalog: Option<&Path>) -> Result<Self> {
        let file = load_config_from(&config_path())?;
        Ok(Self::resolve_with(
            cli_data_dir,
            cli_catalog,
            std::env::var_os(DATA_DIR_ENV).map(PathBuf::from),
            std::env::var_os(CATALOG_ENV).map(PathBuf::from),
            file,
        ))
    }

    /// Resolution chain with every input passed in explicitly.
    pub fn resolve_with(
        cli_data_dir: Option<&Path>,
        cli_catalog: Option<&Path>,
        env_data_dir: Option<PathBuf>,
        env_catalog: Option<PathBuf>,
        file: ConfigFile,
    ) -> Self {
        let data_dir = cli_data_dir
            .map(Path::to_path_buf)
            .or(env_data_dir)
            .or(file.storage.data_dir)
            .unwrap_or_else(default_data_dir);

        let catalog_path = cli_catalog
            .map(Path::to_path_buf)
            .or(env_catalog)
            .or(file.catalog.path)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CATALOG_FILE));

        Self {
            data_dir,
            catalog_path,
            daily_water_cups: file.water.daily_goal_cups.max(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = load_config_from(&tmp.path().join("config.toml")).unwrap();
        assert!(config.storage.data_dir.is_none());
        assert_eq!(config.water.daily_goal_cups, 8);
    }

    #[test]
    fn test_parse_partial_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "[water]\ndaily_goal_cups = 10\n").unwrap();

        let config = load_config_from(&path).unwrap();
        assert_eq!(config.water.daily_goal_cups, 10);
        assert!(config.catalog.path.is_none());
    }

    #[test]
    fn test_malformed_file_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "[water\n").unwrap();
        assert!(load_config_from(&path).is_err());
    }

    #[test]
    fn test_resolution_order() {
        let file = || ConfigFile {
            storage: StorageSection {
                data_dir: Some(PathBuf::from("/from/file")),
            },
            catalog: CatalogSection {
                path: Some(PathBuf::from("/file/catalog.json")),
            },
            water: WaterSection::default(),
        };

        let cli = DietConfig::resolve_with(
            Some(Path::new("/from/cli")),
            None,
            Some(PathBuf::from("/from/env")),
            None,
            file(),
        );
        assert_eq!(cli.data_dir, PathBuf::from("/from/cli"));
        assert_eq!(cli.catalog_path, PathBuf::from("/file/catalog.json"));

        let env = DietConfig::resolve_with(None, None, Some(PathBuf::from("/from/env")), None, file());
        assert_eq!(env.data_dir, PathBuf::from("/from/env"));

        let from_file = DietConfig::resolve_with(None, None, None, None, file());
        assert_eq!(from_file.data_dir, PathBuf::from("/from/file"));

        let defaults = DietConfig::resolve_with(None, None, None, None, ConfigFile::default());
        assert_eq!(defaults.catalog_path, PathBuf::from("catalog.json"));
        assert_eq!(defaults.daily_water_cups, 8);
    }
}
