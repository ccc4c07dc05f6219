use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use plated_core::models::CalorieRange;

const CONFIG_FILE: &str = "config.json";
const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    catalog: Option<PathBuf>,
    calorie_range: Option<[u32; 2]>,
    log_level: Option<String>,
}

pub struct Config {
    pub config_dir: PathBuf,
    /// Recipe catalog to load instead of the built-in one.
    pub catalog: Option<PathBuf>,
    pub calorie_range: CalorieRange,
    pub log_level: String,
}

impl Config {
    pub fn load() -> Result<Self> {
        let proj_dirs =
            ProjectDirs::from("", "", "plated").context("Could not determine home directory")?;
        Self::load_from(proj_dirs.config_dir())
    }

    /// Read `config.json` from `dir`. A missing file means defaults.
    pub fn load_from(dir: &Path) -> Result<Self> {
        let path = dir.join(CONFIG_FILE);
        let file = if path.exists() {
            let data = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config: {}", path.display()))?;
            serde_json::from_str::<ConfigFile>(&data)
                .with_context(|| format!("Invalid config: {}", path.display()))?
        } else {
            ConfigFile::default()
        };

        // Relative catalog paths are resolved against the config directory
        let catalog = file.catalog.map(|p| if p.is_relative() { dir.join(p) } else { p });

        let calorie_range = file
            .calorie_range
            .map_or_else(CalorieRange::default, |[low, high]| {
                CalorieRange::from_slider(low, high)
            });

        Ok(Config {
            config_dir: dir.to_path_buf(),
            catalog,
            calorie_range,
            log_level: file
                .log_level
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        })
    }
}
