use std::{fmt, str::FromStr};

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};

use crate::{daycycle::sun_times::SunTimes, errors::TrackerError};

/// Named segment of the day driving the time-sensitive theme.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    Night,
    Dawn,
    Morning,
    Day,
    Evening,
    Dusk,
}

impl Slot {
    pub const ALL: [Slot; 6] = [
        Slot::Night,
        Slot::Dawn,
        Slot::Morning,
        Slot::Day,
        Slot::Evening,
        Slot::Dusk,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Slot::Night => "night",
            Slot::Dawn => "dawn",
            Slot::Morning => "morning",
            Slot::Day => "day",
            Slot::Evening => "evening",
            Slot::Dusk => "dusk",
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Slot {
    type Err = TrackerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        Slot::ALL
            .into_iter()
            .find(|slot| slot.id().eq_ignore_ascii_case(value))
            .ok_or_else(|| TrackerError::InvalidInput(format!("unknown slot `{}`", value)))
    }
}

/// One `[start, end)` row of the fixed-hour table; `start > end` wraps midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HourRange {
    pub slot: Slot,
    pub start: u32,
    pub end: u32,
}

impl HourRange {
    pub const fn new(slot: Slot, start: u32, end: u32) -> Self {
        Self { slot, start, end }
    }

    pub fn contains(&self, hour: u32) -> bool {
        if self.start > self.end {
            hour >= self.start || hour < self.end
        } else {
            hour >= self.start && hour < self.end
        }
    }
}

/// Slot boundaries used when no location is available.
pub const FIXED_HOUR_SLOTS: [HourRange; 6] = [
    HourRange::new(Slot::Night, 22, 5),
    HourRange::new(Slot::Dawn, 5, 7),
    HourRange::new(Slot::Morning, 7, 10),
    HourRange::new(Slot::Day, 10, 17),
    HourRange::new(Slot::Evening, 17, 20),
    HourRange::new(Slot::Dusk, 20, 22),
];

/// Resolves a slot from the local hour using [`FIXED_HOUR_SLOTS`].
pub fn slot_from_hour(hour: u32) -> Slot {
    FIXED_HOUR_SLOTS
        .iter()
        .find(|range| range.contains(hour))
        .map(|range| range.slot)
        .unwrap_or(Slot::Day)
}

/// Resolves a slot from astronomical sun events.
///
/// Returns `None` when any boundary event is missing (polar day or night), so
/// the caller can fall back to [`slot_from_hour`].
pub fn slot_from_sun_times<Tz: TimeZone>(now: &DateTime<Tz>, sun: &SunTimes) -> Option<Slot> {
    let dawn = sun.dawn?;
    let sunrise = sun.sunrise?;
    let golden_hour_end = sun.golden_hour_end?;
    let golden_hour = sun.golden_hour?;
    let sunset = sun.sunset?;
    let dusk = sun.dusk?;

    let t = now.timestamp_millis();
    let slot = if t < dawn.timestamp_millis() || t >= dusk.timestamp_millis() {
        Slot::Night
    } else if t < sunrise.timestamp_millis() {
        Slot::Dawn
    } else if t < golden_hour_end.timestamp_millis() {
        Slot::Morning
    } else if t < golden_hour.timestamp_millis() {
        Slot::Day
    } else if t < sunset.timestamp_millis() {
        Slot::Evening
    } else {
        Slot::Dusk
    };
    Some(slot)
}
