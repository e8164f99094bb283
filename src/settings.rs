use anyhow::{Context, Result};
use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::models::StatisticsPeriod;

const SETTINGS_FILE: &str = "settings.json";
const DATA_DIR_ENV: &str = "WALLETUI_DATA_DIR";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct Settings {
    #[serde(default = "default_currency_symbol")]
    pub(crate) currency_symbol: String,
    /// chrono strftime pattern used for every displayed date.
    #[serde(default = "default_date_format")]
    pub(crate) date_format: String,
    /// "1m", "6m" or "1y"
    #[serde(default = "default_period")]
    pub(crate) default_period: String,
}

fn default_currency_symbol() -> String {
    "€".to_string()
}

fn default_date_format() -> String {
    "%d.%m.%Y".to_string()
}

fn default_period() -> String {
    StatisticsPeriod::default().as_str().to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency_symbol: default_currency_symbol(),
            date_format: default_date_format(),
            default_period: default_period(),
        }
    }
}

impl Settings {
    pub(crate) fn period(&self) -> StatisticsPeriod {
        StatisticsPeriod::parse(&self.default_period).unwrap_or_default()
    }

    /// Replace values that would break rendering with their defaults.
    fn sanitized(mut self) -> Self {
        if !is_valid_date_format(&self.date_format) {
            tracing::warn!(format = %self.date_format, "invalid date_format in settings, using default");
            self.date_format = default_date_format();
        }
        if StatisticsPeriod::parse(&self.default_period).is_none() {
            tracing::warn!(period = %self.default_period, "invalid default_period in settings, using default");
            self.default_period = default_period();
        }
        self
    }
}

fn is_valid_date_format(fmt: &str) -> bool {
    !fmt.is_empty() && StrftimeItems::new(fmt).all(|item| !matches!(item, Item::Error))
}

/// Directory holding the database, settings and log file.
/// `WALLETUI_DATA_DIR` overrides the platform default.
pub(crate) fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os(DATA_DIR_ENV) {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => directories::ProjectDirs::from("com", "walletui", "WalleTUI")
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?
            .data_dir()
            .to_path_buf(),
    };
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create data directory: {}", dir.display()))?;
    Ok(dir)
}

/// Missing or unreadable settings fall back to defaults.
pub(crate) fn load_settings(dir: &Path) -> Settings {
    let path = dir.join(SETTINGS_FILE);
    let Ok(content) = std::fs::read_to_string(&path) else {
        return Settings::default();
    };
    match serde_json::from_str::<Settings>(&content) {
        Ok(settings) => settings.sanitized(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "malformed settings file, using defaults");
            Settings::default()
        }
    }
}

pub(crate) fn save_settings(dir: &Path, settings: &Settings) -> Result<()> {
    let json = serde_json::to_string_pretty(settings).context("Failed to serialize settings")?;
    let path = dir.join(SETTINGS_FILE);
    std::fs::write(&path, format!("{json}\n"))
        .with_context(|| format!("Failed to write settings: {}", path.display()))?;
    Ok(())
}

/// Loads settings, writing a default file on first run so it can be edited.
pub(crate) fn load_or_init(dir: &Path) -> Result<Settings> {
    if !dir.join(SETTINGS_FILE).exists() {
        let settings = Settings::default();
        save_settings(dir, &settings)?;
        tracing::info!(dir = %dir.display(), "wrote default settings");
        return Ok(settings);
    }
    Ok(load_settings(dir))
}
