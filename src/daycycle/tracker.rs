use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, FixedOffset, Local, NaiveDate, TimeZone, Timelike};
use tracing::{debug, info, warn};

use crate::{
    config::Config,
    daycycle::{
        slot::{slot_from_hour, slot_from_sun_times, Slot},
        sun_times::{Coordinate, SunTimes},
    },
};

/// Source of the current local time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Host wall clock in the local time zone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        let now = Local::now();
        now.with_timezone(now.offset())
    }
}

/// Manually driven clock for tests and replays.
#[derive(Debug)]
pub struct FixedClock {
    now: Mutex<DateTime<FixedOffset>>,
}

impl FixedClock {
    pub fn new(now: DateTime<FixedOffset>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn set(&self, now: DateTime<FixedOffset>) {
        match self.now.lock() {
            Ok(mut guard) => *guard = now,
            Err(poisoned) => *poisoned.into_inner() = now,
        }
    }

    pub fn advance(&self, by: Duration) {
        let next = self.now() + by;
        self.set(next);
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        match self.now.lock() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }
}

impl<C: Clock + ?Sized> Clock for Arc<C> {
    fn now(&self) -> DateTime<FixedOffset> {
        (**self).now()
    }
}

#[derive(Debug, Clone, Copy)]
struct CachedSunTimes {
    date: NaiveDate,
    coordinate: Coordinate,
    times: SunTimes,
}

/// Chooses between the astronomical and fixed-hour slot paths and caches the
/// sun times of the current day.
///
/// Sun times are recomputed when the local calendar date rolls over or the
/// coordinate changes. Without a coordinate only the fixed-hour table is used.
#[derive(Debug, Clone, Default)]
pub struct DayCycle {
    location: Option<Coordinate>,
    cached: Option<CachedSunTimes>,
}

impl DayCycle {
    pub fn new(location: Option<Coordinate>) -> Self {
        Self {
            location,
            cached: None,
        }
    }

    /// Seeds the coordinate from persisted preferences.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.daycycle_location)
    }

    pub fn location(&self) -> Option<Coordinate> {
        self.location
    }

    pub fn set_location(&mut self, coordinate: Coordinate) {
        info!(lat = coordinate.lat, lng = coordinate.lng, "day-cycle location set");
        self.location = Some(coordinate);
        self.cached = None;
    }

    /// Forgets the coordinate; slots come from the fixed-hour table until a new one is set.
    pub fn clear_location(&mut self) {
        self.location = None;
        self.cached = None;
    }

    /// Sun times for `date`, computing them if the cache is stale.
    pub fn sun_times_for(&mut self, date: NaiveDate) -> Option<&SunTimes> {
        let coordinate = self.location?;
        let stale = match &self.cached {
            Some(cached) => cached.date != date || cached.coordinate != coordinate,
            None => true,
        };
        if stale {
            debug!(%date, "computing sun times");
            let times = SunTimes::compute(date, coordinate);
            if !times.is_complete() {
                warn!(%date, lat = coordinate.lat, "sun never crosses a slot boundary today");
            }
            self.cached = Some(CachedSunTimes {
                date,
                coordinate,
                times,
            });
        }
        self.cached.as_ref().map(|cached| &cached.times)
    }

    /// Current slot for `now`, preferring real sun times when a location is known.
    pub fn resolve<Tz: TimeZone>(&mut self, now: &DateTime<Tz>) -> Slot {
        let date = now.date_naive();
        if let Some(times) = self.sun_times_for(date) {
            if let Some(slot) = slot_from_sun_times(now, times) {
                return slot;
            }
        }
        slot_from_hour(now.hour())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(rfc3339: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(rfc3339).unwrap()
    }

    fn london() -> Coordinate {
        Coordinate::new(51.5074, -0.1278).unwrap()
    }

    #[test]
    fn system_clock_reports_local_time() {
        let before = Local::now();
        let now = SystemClock.now();
        let after = Local::now();
        assert_eq!(now.offset().local_minus_utc(), after.offset().local_minus_utc());
        assert!(now.timestamp_millis() >= before.timestamp_millis());
        assert!(now.timestamp_millis() <= after.timestamp_millis());

        let mut cycle = DayCycle::default();
        assert_eq!(cycle.resolve(&now), slot_from_hour(now.hour()));
    }

    #[test]
    fn without_location_uses_fixed_hours() {
        let mut cycle = DayCycle::default();
        assert_eq!(cycle.resolve(&at("2024-06-21T06:30:00+00:00")), Slot::Dawn);
        assert_eq!(cycle.resolve(&at("2024-06-21T23:10:00+00:00")), Slot::Night);
        assert!(cycle.sun_times_for(NaiveDate::from_ymd_opt(2024, 6, 21).unwrap()).is_none());
    }

    #[test]
    fn with_location_uses_sun_times() {
        let mut cycle = DayCycle::new(Some(london()));
        // Fixed table says dawn at 06:30, but midsummer London is past golden hour.
        assert_eq!(cycle.resolve(&at("2024-06-21T06:30:00+00:00")), Slot::Day);
        assert_eq!(cycle.resolve(&at("2024-06-21T03:10:00+00:00")), Slot::Dawn);
        assert_eq!(cycle.resolve(&at("2024-06-21T20:40:00+00:00")), Slot::Dusk);
    }

    #[test]
    fn recomputes_when_date_rolls_over() {
        let mut cycle = DayCycle::new(Some(london()));
        let first = *cycle
            .sun_times_for(NaiveDate::from_ymd_opt(2024, 6, 21).unwrap())
            .unwrap();
        let again = *cycle
            .sun_times_for(NaiveDate::from_ymd_opt(2024, 6, 21).unwrap())
            .unwrap();
        assert_eq!(first, again);
        let next = *cycle
            .sun_times_for(NaiveDate::from_ymd_opt(2024, 6, 22).unwrap())
            .unwrap();
        assert_ne!(first.sunrise, next.sunrise);
    }

    #[test]
    fn polar_day_falls_back_to_fixed_hours() {
        let tromso = Coordinate::new(69.6492, 18.9553).unwrap();
        let mut cycle = DayCycle::new(Some(tromso));
        assert_eq!(cycle.resolve(&at("2024-06-21T23:30:00+02:00")), Slot::Night);
        assert_eq!(cycle.resolve(&at("2024-06-21T12:00:00+02:00")), Slot::Day);
    }

    #[test]
    fn clearing_location_drops_cache() {
        let mut cycle = DayCycle::new(Some(london()));
        cycle.resolve(&at("2024-06-21T12:00:00+00:00"));
        cycle.clear_location();
        assert!(cycle.location().is_none());
        assert_eq!(cycle.resolve(&at("2024-06-21T06:30:00+00:00")), Slot::Dawn);
    }

    #[test]
    fn fixed_clock_advances() {
        let clock = FixedClock::new(at("2024-06-21T12:00:00+00:00"));
        clock.advance(Duration::minutes(90));
        assert_eq!(clock.now(), at("2024-06-21T13:30:00+00:00"));
    }
}
