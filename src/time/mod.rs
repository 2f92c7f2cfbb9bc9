//! Time module for astrometric epochs
//!
//! An [`Epoch`] is an immutable Julian date tagged with the timescale it is
//! expressed in. Proper motion intervals and the precession/nutation series
//! are all driven by Julian years or centuries of a dynamical timescale, so
//! every epoch can be read back as TT (and TDB) regardless of how it was
//! constructed.
//!
//! `Epoch` is `Copy`: handing one to a [`FixedStarPosition`](crate::FixedStarPosition)
//! or reading it back always produces an independent value, so a caller can
//! never alias the epoch held inside a calculator.

use crate::constants::{
    B1900, BESSELIAN_YEAR_DAYS, DAY_S, GREGORIAN_START, J2000, JULIAN_CENTURY_DAYS,
    JULIAN_YEAR_DAYS, MAX_JD, MIN_JD, TT_MINUS_TAI,
};
use crate::{FixedStarError, Result};
use chrono::{Datelike, NaiveDateTime, Timelike};
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

lazy_static! {
    static ref EPOCH_YEAR: Regex = Regex::new(r"^([JjBb])\s*([+-]?\d+(?:\.\d*)?)$").unwrap();
    static ref JULIAN_DATE: Regex =
        Regex::new(r"^(?:(?i:jde?)\s*)?([+-]?\d+(?:\.\d*)?)$").unwrap();
}

/// Timescales an epoch can be expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Timescale {
    /// Terrestrial Time
    TT,
    /// Barycentric Dynamical Time
    TDB,
    /// International Atomic Time
    TAI,
}

impl fmt::Display for Timescale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Timescale::TT => "TT",
            Timescale::TDB => "TDB",
            Timescale::TAI => "TAI",
        };
        f.write_str(name)
    }
}

/// Calendar tuple for representing a date and time
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarTuple {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: f64,
}

/// A moment in time: a Julian date in a named timescale
///
/// Constructors only accept Julian dates in [`MIN_JD`], [`MAX_JD`];
/// deserialized epochs go through the same check as [`Epoch::new`].
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "EpochRepr")]
pub struct Epoch {
    jd: f64,
    timescale: Timescale,
}

/// Unchecked wire form of [`Epoch`]
#[derive(serde::Deserialize)]
struct EpochRepr {
    jd: f64,
    timescale: Timescale,
}

impl TryFrom<EpochRepr> for Epoch {
    type Error = FixedStarError;

    fn try_from(repr: EpochRepr) -> Result<Self> {
        Epoch::new(repr.jd, repr.timescale)
    }
}

impl Epoch {
    /// Create an epoch from a Julian date in the given timescale
    pub fn new(jd: f64, timescale: Timescale) -> Result<Self> {
        if !jd.is_finite() {
            return Err(FixedStarError::InvalidEpoch(format!(
                "Julian date must be finite, got {}",
                jd
            )));
        }
        if !(MIN_JD..=MAX_JD).contains(&jd) {
            return Err(FixedStarError::InvalidEpoch(format!(
                "Julian date {} outside [{}, {:e}]",
                jd, MIN_JD, MAX_JD
            )));
        }
        Ok(Epoch { jd, timescale })
    }

    /// Create an epoch from a TT Julian date
    pub fn tt(jd: f64) -> Result<Self> {
        Self::new(jd, Timescale::TT)
    }

    /// Create an epoch from a TDB Julian date
    pub fn tdb(jd: f64) -> Result<Self> {
        Self::new(jd, Timescale::TDB)
    }

    /// The standard reference epoch J2000.0 (JD 2451545.0 TT)
    pub fn j2000() -> Self {
        Epoch {
            jd: J2000,
            timescale: Timescale::TT,
        }
    }

    /// Create an epoch from a Julian epoch year, e.g. 2028.87 for J2028.87
    pub fn from_julian_year(year: f64) -> Result<Self> {
        Self::tt(J2000 + (year - 2000.0) * JULIAN_YEAR_DAYS)
    }

    /// Create an epoch from a Besselian epoch year, e.g. 1950.0 for B1950.0
    pub fn from_besselian_year(year: f64) -> Result<Self> {
        Self::tt(B1900 + (year - 1900.0) * BESSELIAN_YEAR_DAYS)
    }

    /// Create an epoch from a calendar date and time in the given timescale
    ///
    /// Dates from 1582-10-15 onward are Gregorian, earlier ones Julian. The
    /// ten days 1582-10-05 to 1582-10-14 do not exist and are rejected.
    pub fn from_calendar(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: f64,
        timescale: Timescale,
    ) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(FixedStarError::InvalidEpoch(format!(
                "month {} outside 1..=12",
                month
            )));
        }
        let last = days_in_month(year, month);
        if !(1..=last).contains(&day) {
            return Err(FixedStarError::InvalidEpoch(format!(
                "day {} outside 1..={} for {:04}-{:02}",
                day, last, year, month
            )));
        }
        if year == 1582 && month == 10 && (5..15).contains(&day) {
            return Err(FixedStarError::InvalidEpoch(format!(
                "1582-10-{:02} falls in the Gregorian calendar gap",
                day
            )));
        }
        if hour > 23 || minute > 59 || !(0.0..61.0).contains(&second) {
            return Err(FixedStarError::InvalidEpoch(format!(
                "time of day {:02}:{:02}:{} is not valid",
                hour, minute, second
            )));
        }

        let day_number = julian_day(year, month, day) as f64;
        let day_fraction = (hour as f64 + minute as f64 / 60.0 + second / 3600.0) / 24.0;

        // Julian days begin at noon
        Self::new(day_number - 0.5 + day_fraction, timescale)
    }

    /// Create an epoch from a chrono date-time read in the given timescale
    pub fn from_datetime(datetime: NaiveDateTime, timescale: Timescale) -> Result<Self> {
        let second = datetime.second() as f64 + datetime.nanosecond() as f64 / 1_000_000_000.0;
        let day_number = julian_day(datetime.year(), datetime.month(), datetime.day()) as f64;
        let day_fraction =
            (datetime.hour() as f64 + datetime.minute() as f64 / 60.0 + second / 3600.0) / 24.0;

        Self::new(day_number - 0.5 + day_fraction, timescale)
    }

    /// The Julian date as given, in this epoch's own timescale
    pub fn jd(&self) -> f64 {
        self.jd
    }

    pub fn timescale(&self) -> Timescale {
        self.timescale
    }

    /// Julian date in Terrestrial Time
    pub fn tt_jd(&self) -> f64 {
        match self.timescale {
            Timescale::TT => self.jd,
            Timescale::TAI => self.jd + TT_MINUS_TAI,
            // The periodic terms are evaluated at TDB instead of TT; the
            // difference is far below their own accuracy
            Timescale::TDB => self.jd - tdb_minus_tt(self.jd) / DAY_S,
        }
    }

    /// Julian date in Barycentric Dynamical Time
    pub fn tdb_jd(&self) -> f64 {
        match self.timescale {
            Timescale::TDB => self.jd,
            _ => {
                let tt = self.tt_jd();
                tt + tdb_minus_tt(tt) / DAY_S
            }
        }
    }

    /// Julian date in International Atomic Time
    pub fn tai_jd(&self) -> f64 {
        match self.timescale {
            Timescale::TAI => self.jd,
            _ => self.tt_jd() - TT_MINUS_TAI,
        }
    }

    /// This epoch re-expressed in another timescale
    pub fn in_timescale(&self, timescale: Timescale) -> Epoch {
        let jd = match timescale {
            Timescale::TT => self.tt_jd(),
            Timescale::TDB => self.tdb_jd(),
            Timescale::TAI => self.tai_jd(),
        };
        Epoch { jd, timescale }
    }

    /// Julian centuries of TT since J2000.0
    pub fn julian_centuries(&self) -> f64 {
        (self.tt_jd() - J2000) / JULIAN_CENTURY_DAYS
    }

    /// Julian epoch year (TT), e.g. 2028.87
    pub fn julian_year(&self) -> f64 {
        2000.0 + (self.tt_jd() - J2000) / JULIAN_YEAR_DAYS
    }

    /// Signed Julian years of TT elapsed from `earlier` to this epoch
    pub fn julian_years_since(&self, earlier: &Epoch) -> f64 {
        (self.tt_jd() - earlier.tt_jd()) / JULIAN_YEAR_DAYS
    }

    /// Calendar date of this epoch in its own timescale
    pub fn to_calendar(&self) -> CalendarTuple {
        let jd_plus_half = self.jd + 0.5;
        let z = jd_plus_half.floor();
        let f = jd_plus_half - z;

        let (year, month, day) = julian_day_to_calendar_date(z as i64);

        let seconds_in_day = f * DAY_S;
        let hour = (seconds_in_day / 3600.0).floor() as u32;
        let minute = ((seconds_in_day - hour as f64 * 3600.0) / 60.0).floor() as u32;
        let second = seconds_in_day - hour as f64 * 3600.0 - minute as f64 * 60.0;

        CalendarTuple {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }
}

impl Default for Epoch {
    fn default() -> Self {
        Epoch::j2000()
    }
}

impl FromStr for Epoch {
    type Err = FixedStarError;

    /// Parses `J2000`, `J2028.87`, `B1950.0`, or a bare TT Julian date such
    /// as `2462088.69` (optionally prefixed with `JD`/`JDE`).
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();

        if let Some(caps) = EPOCH_YEAR.captures(s) {
            let year: f64 = caps[2]
                .parse()
                .map_err(|_| FixedStarError::InvalidEpoch(s.to_string()))?;
            return match &caps[1] {
                "J" | "j" => Epoch::from_julian_year(year),
                _ => Epoch::from_besselian_year(year),
            };
        }

        if let Some(caps) = JULIAN_DATE.captures(s) {
            let jd: f64 = caps[1]
                .parse()
                .map_err(|_| FixedStarError::InvalidEpoch(s.to_string()))?;
            return Epoch::tt(jd);
        }

        Err(FixedStarError::InvalidEpoch(format!(
            "'{}' is not a Julian date or J/B epoch",
            s
        )))
    }
}

impl fmt::Display for Epoch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cal = self.to_calendar();
        write!(
            f,
            "JD {:.5} {} ({:04}-{:02}-{:02} {:02}:{:02}:{:06.3})",
            self.jd, self.timescale, cal.year, cal.month, cal.day, cal.hour, cal.minute, cal.second
        )
    }
}

/// TDB - TT in seconds, USNO Circular 179 eq. 2.6
fn tdb_minus_tt(jd: f64) -> f64 {
    let t = (jd - J2000) / JULIAN_CENTURY_DAYS;

    0.001657 * f64::sin(628.3076 * t + 6.2401)
        + 0.000022 * f64::sin(575.3385 * t + 4.2970)
        + 0.000014 * f64::sin(1256.6152 * t + 6.1969)
        + 0.000005 * f64::sin(606.9777 * t + 4.0212)
        + 0.000005 * f64::sin(52.9691 * t + 0.4444)
        + 0.000002 * f64::sin(21.3299 * t + 5.5431)
        + 0.000010 * t * f64::sin(628.3076 * t + 4.2490)
}

/// Julian day number of a calendar date.
///
/// Explanatory Supplement to the Astronomical Almanac 15.11.
fn julian_day(year: i32, month: u32, day: u32) -> i64 {
    let janfeb = month <= 2;
    let g = year as i64 + 4716 - if janfeb { 1 } else { 0 };
    let f = ((month + 9) % 12) as i64;
    let e = 1461 * g / 4 + day as i64 - 1402;
    let mut j = e + (153 * f + 2) / 5;

    if j >= GREGORIAN_START {
        j += 38 - (g + 184) / 100 * 3 / 4;
    }

    j
}

/// Calendar date of a Julian day number, inverse of [`julian_day`]
fn julian_day_to_calendar_date(jd: i64) -> (i32, u32, u32) {
    let mut f = jd + 1401;

    if jd >= GREGORIAN_START {
        f += (4 * jd + 274277) / 146097 * 3 / 4 - 38;
    }

    let e = 4 * f + 3;
    let g = (e % 1461) / 4;
    let h = 5 * g + 2;

    let day = (h % 153) / 5 + 1;
    let month = ((h / 153) + 2) % 12 + 1;
    let year = e / 1461 - 4716 + (12 + 2 - month) / 12;

    (year as i32, month as u32, day as u32)
}

/// Days in `month` of `year`: Gregorian leap rule after 1582, Julian before
fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        4 | 6 | 9 | 11 => 30,
        2 => {
            let leap = if year > 1582 {
                year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
            } else {
                year.rem_euclid(4) == 0
            };
            if leap {
                29
            } else {
                28
            }
        }
        _ => 31,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;
    use rstest::rstest;

    #[test]
    fn test_non_finite_julian_date_is_rejected() {
        assert!(matches!(
            Epoch::tt(f64::NAN),
            Err(FixedStarError::InvalidEpoch(_))
        ));
        assert!(Epoch::new(f64::INFINITY, Timescale::TDB).is_err());
        assert!(Epoch::tt(2462088.69).is_ok());
    }

    #[test]
    fn test_calendar_to_julian_date() {
        // J2000.0 is 2000-01-01T12:00:00 TT
        let j2000 = Epoch::from_calendar(2000, 1, 1, 12, 0, 0.0, Timescale::TT).unwrap();
        assert_relative_eq!(j2000.jd(), J2000, epsilon = 1e-9);

        // Meeus example 23.a: 2028 November 13.19 TD
        let epoch = Epoch::from_calendar(2028, 11, 13, 4, 33, 36.0, Timescale::TT).unwrap();
        assert_relative_eq!(epoch.jd(), 2462088.69, epsilon = 1e-8);

        // Last day of the Julian calendar
        let julian = Epoch::from_calendar(1582, 10, 4, 12, 0, 0.0, Timescale::TT).unwrap();
        assert_relative_eq!(julian.jd(), 2299160.0, epsilon = 1e-9);
    }

    #[test]
    fn test_calendar_round_trip() {
        let epoch = Epoch::from_calendar(2028, 11, 13, 4, 33, 36.0, Timescale::TT).unwrap();
        let cal = epoch.to_calendar();
        assert_eq!((cal.year, cal.month, cal.day), (2028, 11, 13));
        assert_eq!((cal.hour, cal.minute), (4, 33));
        assert_relative_eq!(cal.second, 36.0, epsilon = 1e-3);
    }

    #[test]
    fn test_invalid_calendar_fields() {
        assert!(Epoch::from_calendar(2020, 13, 1, 0, 0, 0.0, Timescale::TT).is_err());
        assert!(Epoch::from_calendar(2020, 1, 0, 0, 0, 0.0, Timescale::TT).is_err());
        assert!(Epoch::from_calendar(2020, 1, 1, 24, 0, 0.0, Timescale::TT).is_err());
        assert!(Epoch::from_calendar(2020, 1, 1, 0, 0, -1.0, Timescale::TT).is_err());
    }

    #[rstest]
    #[case(2021, 2, 31)]
    #[case(2021, 4, 31)]
    #[case(2021, 2, 29)]
    #[case(1900, 2, 29)]
    #[case(2023, 11, 31)]
    #[case(1582, 10, 10)]
    fn test_day_past_end_of_month_is_rejected(
        #[case] year: i32,
        #[case] month: u32,
        #[case] day: u32,
    ) {
        assert!(matches!(
            Epoch::from_calendar(year, month, day, 0, 0, 0.0, Timescale::TT),
            Err(FixedStarError::InvalidEpoch(_))
        ));
    }

    #[rstest]
    #[case(2000, 2, 29)]
    #[case(2024, 2, 29)]
    #[case(1500, 2, 29)]
    #[case(2021, 1, 31)]
    #[case(2021, 12, 31)]
    fn test_last_day_of_month_is_accepted(
        #[case] year: i32,
        #[case] month: u32,
        #[case] day: u32,
    ) {
        let epoch = Epoch::from_calendar(year, month, day, 12, 0, 0.0, Timescale::TT).unwrap();
        let cal = epoch.to_calendar();
        assert_eq!((cal.year, cal.month, cal.day), (year, month, day));
    }

    #[test]
    fn test_julian_date_out_of_range_is_rejected() {
        for jd in [1.0e9, -1.0, MAX_JD + 1.0, -1.0e12] {
            assert!(matches!(
                Epoch::tt(jd),
                Err(FixedStarError::InvalidEpoch(_))
            ));
        }
        assert!(Epoch::tt(MIN_JD).is_ok());
        assert!(Epoch::new(MAX_JD, Timescale::TAI).is_ok());
    }

    #[test]
    fn test_far_calendar_years_are_rejected() {
        assert!(matches!(
            Epoch::from_calendar(2_000_000, 1, 1, 0, 0, 0.0, Timescale::TT),
            Err(FixedStarError::InvalidEpoch(_))
        ));
        assert!(matches!(
            Epoch::from_calendar(i32::MAX, 12, 31, 0, 0, 0.0, Timescale::TT),
            Err(FixedStarError::InvalidEpoch(_))
        ));
        assert!(Epoch::from_calendar(-10_000, 3, 1, 0, 0, 0.0, Timescale::TT).is_err());
        assert!(matches!(
            Epoch::from_julian_year(1.0e9),
            Err(FixedStarError::InvalidEpoch(_))
        ));
    }

    #[test]
    fn test_display_at_the_ends_of_the_range() {
        let late = Epoch::tt(MAX_JD).unwrap();
        let cal = late.to_calendar();
        assert!(cal.year > 260_000);
        assert!(late.to_string().starts_with("JD 100000000.00000 TT"));

        let early = Epoch::tt(MIN_JD).unwrap();
        let cal = early.to_calendar();
        assert_eq!((cal.year, cal.month, cal.day, cal.hour), (-4712, 1, 1, 12));
    }

    #[test]
    fn test_deserialize_checks_the_range() {
        let epoch: Epoch =
            serde_json::from_str(r#"{"jd": 2451545.0, "timescale": "TT"}"#).unwrap();
        assert_eq!(epoch, Epoch::j2000());

        assert!(serde_json::from_str::<Epoch>(r#"{"jd": 1e9, "timescale": "TT"}"#).is_err());
        assert!(serde_json::from_str::<Epoch>(r#"{"jd": -5.0, "timescale": "TDB"}"#).is_err());
    }

    #[test]
    fn test_from_datetime_matches_calendar() {
        let dt = NaiveDate::from_ymd_opt(2028, 11, 13)
            .unwrap()
            .and_hms_opt(4, 33, 36)
            .unwrap();
        let epoch = Epoch::from_datetime(dt, Timescale::TT).unwrap();
        assert_relative_eq!(epoch.jd(), 2462088.69, epsilon = 1e-8);

        // chrono reaches dates this crate does not
        let far = NaiveDate::from_ymd_opt(-200_000, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert!(matches!(
            Epoch::from_datetime(far, Timescale::TT),
            Err(FixedStarError::InvalidEpoch(_))
        ));
    }

    #[test]
    fn test_time_scales() {
        let t = Epoch::j2000();
        assert_eq!(t.tt_jd(), J2000);
        assert_relative_eq!(J2000 - t.tai_jd(), TT_MINUS_TAI, epsilon = 1e-9);

        // TDB - TT never exceeds about 1.7 ms
        assert!((t.tdb_jd() - t.tt_jd()).abs() * DAY_S < 0.002);

        let tai = Epoch::new(J2000, Timescale::TAI).unwrap();
        assert_relative_eq!(tai.tt_jd() - J2000, TT_MINUS_TAI, epsilon = 1e-9);

        let tdb = t.in_timescale(Timescale::TDB);
        assert_eq!(tdb.timescale(), Timescale::TDB);
        assert_relative_eq!(tdb.tt_jd(), J2000, epsilon = 1e-8);
    }

    #[test]
    fn test_julian_intervals() {
        let epoch = Epoch::tt(2462088.69).unwrap();
        let years = epoch.julian_years_since(&Epoch::j2000());
        assert_relative_eq!(years, (2462088.69 - J2000) / 365.25, epsilon = 1e-12);
        assert_relative_eq!(epoch.julian_centuries(), years / 100.0, epsilon = 1e-12);
        assert_relative_eq!(epoch.julian_year(), 2000.0 + years, epsilon = 1e-9);

        let past = Epoch::from_julian_year(1990.0).unwrap();
        assert_relative_eq!(past.julian_years_since(&Epoch::j2000()), -10.0, epsilon = 1e-12);
    }

    #[rstest]
    #[case("J2000", J2000)]
    #[case("J2000.0", J2000)]
    #[case("j2010.5", J2000 + 10.5 * 365.25)]
    #[case("B1950", 2_433_282.423_459_05)]
    #[case("2462088.69", 2462088.69)]
    #[case("JD 2451545.5", 2451545.5)]
    #[case("  JDE2462088.69 ", 2462088.69)]
    fn test_parse_epoch(#[case] input: &str, #[case] expected_tt: f64) {
        let epoch: Epoch = input.parse().unwrap();
        assert_relative_eq!(epoch.tt_jd(), expected_tt, epsilon = 1e-6);
    }

    #[rstest]
    #[case("")]
    #[case("123abc")]
    #[case("K2000")]
    #[case("J")]
    #[case("yesterday")]
    fn test_parse_epoch_rejects(#[case] input: &str) {
        assert!(matches!(
            input.parse::<Epoch>(),
            Err(FixedStarError::InvalidEpoch(_))
        ));
    }

    #[test]
    fn test_copy_semantics() {
        let mut original = Epoch::tt(2462088.69).unwrap();
        let held = original;
        original = Epoch::j2000();
        assert_eq!(held.jd(), 2462088.69);
        assert_eq!(original.jd(), J2000);
    }

    #[test]
    fn test_display() {
        let epoch = Epoch::j2000();
        assert_eq!(
            epoch.to_string(),
            "JD 2451545.00000 TT (2000-01-01 12:00:00.000)"
        );
    }
}
