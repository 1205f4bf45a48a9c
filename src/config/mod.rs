//! Persisted client preferences: theme choice and the cached day-cycle location.
//!
//! The manager is constructed explicitly and handed to whoever needs it. Load
//! once at start-up; every mutation through the manager is saved immediately.

use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};
use tracing::info;

use crate::{
    daycycle::{Coordinate, ThemePreference},
    errors::Result,
    utils::{app_data_dir, config_file_in},
};

const TMP_SUFFIX: &str = "tmp";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub theme: ThemePreference,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daycycle_location: Option<Coordinate>,
}

#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    /// Manager rooted at `EXPENSE_CORE_HOME` or `~/.expense_core`.
    pub fn new() -> Result<Self> {
        Self::with_base_dir(app_data_dir())
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base)?;
        Ok(Self {
            path: config_file_in(&base),
        })
    }

    pub fn load(&self) -> Result<Config> {
        if self.path.exists() {
            let data = fs::read_to_string(&self.path)?;
            Ok(serde_json::from_str(&data)?)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn set_theme(&self, config: &mut Config, theme: ThemePreference) -> Result<()> {
        self.update(config, |next| next.theme = theme)?;
        info!(%theme, "theme preference saved");
        Ok(())
    }

    pub fn cache_location(&self, config: &mut Config, coordinate: Coordinate) -> Result<()> {
        self.update(config, |next| next.daycycle_location = Some(coordinate))?;
        info!("day-cycle location cached");
        Ok(())
    }

    /// Forgets the cached location so the next day-cycle start asks for it again.
    pub fn clear_location(&self, config: &mut Config) -> Result<()> {
        self.update(config, |next| next.daycycle_location = None)?;
        info!("day-cycle location cleared");
        Ok(())
    }

    /// Applies `change` to a copy, saves it, and only then replaces `config`.
    fn update<F>(&self, config: &mut Config, change: F) -> Result<()>
    where
        F: FnOnce(&mut Config),
    {
        let mut next = config.clone();
        change(&mut next);
        self.save(&next)?;
        *config = next;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
