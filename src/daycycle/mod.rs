//! Time-of-day slot resolution for the day-cycle theme.
//!
//! Two paths resolve a [`Slot`]: real sun events for a known location, and a
//! fixed-hour table used when no location is available or the sun never
//! crosses the needed altitudes.

pub mod refresh;
pub mod slot;
pub mod sun_times;
pub mod theme;
pub mod tracker;

pub use refresh::{spawn_slot_refresh, RefreshHandle, DEFAULT_REFRESH_INTERVAL};
pub use slot::{slot_from_hour, slot_from_sun_times, HourRange, Slot, FIXED_HOUR_SLOTS};
pub use sun_times::{Coordinate, SunTimes};
pub use theme::{Appearance, ThemePreference};
pub use tracker::{Clock, DayCycle, FixedClock, SystemClock};
