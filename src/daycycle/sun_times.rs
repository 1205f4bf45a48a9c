//! Sun event times for a calendar day and location.
//!
//! Uses the low-precision solar model (mean anomaly, ecliptic longitude,
//! Julian transit) which is accurate to about a minute away from the poles.

use std::f64::consts::PI;

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::TrackerError;

const RAD: f64 = PI / 180.0;
const DAY_MS: f64 = 86_400_000.0;
const J1970: f64 = 2_440_588.0;
const J2000: f64 = 2_451_545.0;
const J0: f64 = 0.0009;
const OBLIQUITY: f64 = RAD * 23.4397;
/// `num_days_from_ce` of 2000-01-01.
const J2000_DAYS_FROM_CE: i32 = 730_120;

const SUNRISE_ALTITUDE: f64 = -0.833;
const SUNRISE_END_ALTITUDE: f64 = -0.3;
const DAWN_ALTITUDE: f64 = -6.0;
const GOLDEN_HOUR_ALTITUDE: f64 = 6.0;

/// Geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "RawCoordinate")]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Deserialize)]
struct RawCoordinate {
    lat: f64,
    lng: f64,
}

impl TryFrom<RawCoordinate> for Coordinate {
    type Error = TrackerError;

    fn try_from(raw: RawCoordinate) -> Result<Self, Self::Error> {
        Coordinate::new(raw.lat, raw.lng)
    }
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Result<Self, TrackerError> {
        if !lat.is_finite() || !(-90.0..=90.0).contains(&lat) {
            return Err(TrackerError::InvalidInput(format!(
                "latitude {} out of range",
                lat
            )));
        }
        if !lng.is_finite() || !(-180.0..=180.0).contains(&lng) {
            return Err(TrackerError::InvalidInput(format!(
                "longitude {} out of range",
                lng
            )));
        }
        Ok(Self { lat, lng })
    }
}

/// Sun events of one day. An event the sun never reaches that day is `None`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SunTimes {
    pub dawn: Option<DateTime<Utc>>,
    pub sunrise: Option<DateTime<Utc>>,
    pub sunrise_end: Option<DateTime<Utc>>,
    pub golden_hour_end: Option<DateTime<Utc>>,
    pub solar_noon: Option<DateTime<Utc>>,
    /// Start of the evening golden hour.
    pub golden_hour: Option<DateTime<Utc>>,
    pub sunset_start: Option<DateTime<Utc>>,
    pub sunset: Option<DateTime<Utc>>,
    pub dusk: Option<DateTime<Utc>>,
}

impl SunTimes {
    /// Computes the events of `date` at `coordinate`, evaluated at 12:00 UTC.
    pub fn compute(date: NaiveDate, coordinate: Coordinate) -> Self {
        let solar = SolarDay::new(date, coordinate);
        let (dawn, dusk) = solar.event_pair(DAWN_ALTITUDE);
        let (sunrise, sunset) = solar.event_pair(SUNRISE_ALTITUDE);
        let (sunrise_end, sunset_start) = solar.event_pair(SUNRISE_END_ALTITUDE);
        let (golden_hour_end, golden_hour) = solar.event_pair(GOLDEN_HOUR_ALTITUDE);
        Self {
            dawn,
            sunrise,
            sunrise_end,
            golden_hour_end,
            solar_noon: from_julian(solar.j_noon),
            golden_hour,
            sunset_start,
            sunset,
            dusk,
        }
    }

    /// True when every event used for slot resolution is present.
    pub fn is_complete(&self) -> bool {
        [
            self.dawn,
            self.sunrise,
            self.golden_hour_end,
            self.golden_hour,
            self.sunset,
            self.dusk,
        ]
        .iter()
        .all(Option::is_some)
    }
}

struct SolarDay {
    lw: f64,
    phi: f64,
    dec: f64,
    n: f64,
    m: f64,
    l: f64,
    j_noon: f64,
}

impl SolarDay {
    fn new(date: NaiveDate, coordinate: Coordinate) -> Self {
        let lw = RAD * -coordinate.lng;
        let phi = RAD * coordinate.lat;
        let d = f64::from(date.num_days_from_ce() - J2000_DAYS_FROM_CE);
        let n = (d - J0 - lw / (2.0 * PI)).round();
        let ds = approx_transit(0.0, lw, n);
        let m = solar_mean_anomaly(ds);
        let l = ecliptic_longitude(m);
        let dec = declination(l);
        let j_noon = solar_transit(ds, m, l);
        Self {
            lw,
            phi,
            dec,
            n,
            m,
            l,
            j_noon,
        }
    }

    /// Morning and evening crossings of `altitude` degrees.
    fn event_pair(&self, altitude: f64) -> (Option<DateTime<Utc>>, Option<DateTime<Utc>>) {
        let h = altitude * RAD;
        let cos_w = (h.sin() - self.phi.sin() * self.dec.sin())
            / (self.phi.cos() * self.dec.cos());
        if !(-1.0..=1.0).contains(&cos_w) {
            return (None, None);
        }
        let w = cos_w.acos();
        let j_set = solar_transit(approx_transit(w, self.lw, self.n), self.m, self.l);
        let j_rise = self.j_noon - (j_set - self.j_noon);
        (from_julian(j_rise), from_julian(j_set))
    }
}

fn approx_transit(ht: f64, lw: f64, n: f64) -> f64 {
    J0 + (ht + lw) / (2.0 * PI) + n
}

fn solar_mean_anomaly(d: f64) -> f64 {
    RAD * (357.5291 + 0.985_600_28 * d)
}

fn ecliptic_longitude(m: f64) -> f64 {
    let center = RAD * (1.9148 * m.sin() + 0.02 * (2.0 * m).sin() + 0.0003 * (3.0 * m).sin());
    let perihelion = RAD * 102.9372;
    m + center + perihelion + PI
}

fn declination(l: f64) -> f64 {
    (l.sin() * OBLIQUITY.sin()).asin()
}

fn solar_transit(ds: f64, m: f64, l: f64) -> f64 {
    J2000 + ds + 0.0053 * m.sin() - 0.0069 * (2.0 * l).sin()
}

fn from_julian(j: f64) -> Option<DateTime<Utc>> {
    let millis = ((j + 0.5 - J1970) * DAY_MS).round();
    if !millis.is_finite() {
        return None;
    }
    Utc.timestamp_millis_opt(millis as i64).single()
}
