use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{daycycle::slot::Slot, errors::TrackerError};

/// Theme chosen by the user.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    Light,
    Dark,
    System,
    #[default]
    DayCycle,
}

/// What the presentation layer should actually render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Appearance {
    Light,
    Dark,
    DayCycle(Slot),
}

impl ThemePreference {
    /// Resolves the preference. `current_slot` is only consulted for the day-cycle theme.
    pub fn resolve<F>(self, system_prefers_dark: bool, current_slot: F) -> Appearance
    where
        F: FnOnce() -> Slot,
    {
        match self {
            ThemePreference::Light => Appearance::Light,
            ThemePreference::Dark => Appearance::Dark,
            ThemePreference::System if system_prefers_dark => Appearance::Dark,
            ThemePreference::System => Appearance::Light,
            ThemePreference::DayCycle => Appearance::DayCycle(current_slot()),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ThemePreference::Light => "light",
            ThemePreference::Dark => "dark",
            ThemePreference::System => "system",
            ThemePreference::DayCycle => "daycycle",
        }
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemePreference {
    type Err = TrackerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(ThemePreference::Light),
            "dark" => Ok(ThemePreference::Dark),
            "system" => Ok(ThemePreference::System),
            "daycycle" => Ok(ThemePreference::DayCycle),
            other => Err(TrackerError::InvalidInput(format!(
                "unknown theme `{}`",
                other
            ))),
        }
    }
}
