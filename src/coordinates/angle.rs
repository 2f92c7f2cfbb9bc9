//! # Angle Representation Module
//!
//! `Angle` keeps an angular value in the unit it was produced in (degrees or
//! radians) and converts only when asked. Reduced star positions are
//! returned as angles so callers can read them in either unit, or format
//! them in sexagesimal notation the way catalogs and almanacs print them.
//!
//! ## Examples
//!
//! ```rust
//! use fixedstar::coordinates::angle::Angle;
//!
//! let ra = Angle::from_degrees(41.5599646);
//! assert_eq!(ra.format_hms(2), "02h46m14.39s");
//!
//! let dec = Angle::from_degrees(49.3520685);
//! assert_eq!(dec.format_dms(1), "+49°21'07.4\"");
//! ```

use serde::{Serialize, Serializer};
use std::f64::consts::PI;
use std::fmt;

/// Internal representation format for angle values
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AngleFormat {
    /// Angle stored in degrees
    Degrees(f64),
    /// Angle stored in radians
    Radians(f64),
}

/// Sexagesimal breakdown of an angle: sign, whole units, minutes, seconds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sexagesimal {
    pub negative: bool,
    pub units: u32,
    pub minutes: u32,
    pub seconds: f64,
}

impl Sexagesimal {
    /// Splits a non-negative magnitude into units, minutes and seconds,
    /// rounding the seconds to `places` decimals and carrying overflow.
    fn split(value: f64, places: usize) -> Self {
        let negative = value < 0.0;
        let scale = 10f64.powi(places as i32);
        let total_seconds = (value.abs() * 3600.0 * scale).round() / scale;

        let mut units = (total_seconds / 3600.0).floor();
        let mut minutes = ((total_seconds - units * 3600.0) / 60.0).floor();
        let mut seconds = total_seconds - units * 3600.0 - minutes * 60.0;

        // Guard against 59.9999 rounding up to 60
        if seconds >= 60.0 - 0.5 / scale {
            seconds = 0.0;
            minutes += 1.0;
        }
        if minutes >= 60.0 {
            minutes = 0.0;
            units += 1.0;
        }

        Sexagesimal {
            negative,
            units: units as u32,
            minutes: minutes as u32,
            seconds,
        }
    }
}

/// Represents an angular measurement with exact precision preservation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Angle {
    /// Internal storage maintaining original format and value
    angle: AngleFormat,
}

impl Angle {
    /// Creates an angle from a value in degrees
    pub fn from_degrees(degrees: f64) -> Self {
        Angle {
            angle: AngleFormat::Degrees(degrees),
        }
    }

    /// Creates an angle from a value in radians
    pub fn from_radians(radians: f64) -> Self {
        Angle {
            angle: AngleFormat::Radians(radians),
        }
    }

    /// Creates an angle from a value in arcseconds
    pub fn from_arcseconds(arcseconds: f64) -> Self {
        Angle::from_degrees(arcseconds / 3600.0)
    }

    /// Returns the angle value in degrees
    ///
    /// Exact when the angle was constructed from degrees.
    pub fn to_degrees(&self) -> f64 {
        match self.angle {
            AngleFormat::Degrees(deg) => deg,
            AngleFormat::Radians(rad) => rad * (180.0 / PI),
        }
    }

    /// Returns the angle value in radians
    ///
    /// Exact when the angle was constructed from radians.
    pub fn to_radians(&self) -> f64 {
        match self.angle {
            AngleFormat::Degrees(deg) => deg * (PI / 180.0),
            AngleFormat::Radians(rad) => rad,
        }
    }

    pub fn to_arcseconds(&self) -> f64 {
        self.to_degrees() * 3600.0
    }

    /// Returns the angle value in hours (15° per hour)
    pub fn to_hours(&self) -> f64 {
        self.to_degrees() / 15.0
    }

    pub fn format(&self) -> AngleFormat {
        self.angle
    }

    /// Sexagesimal degrees, arcminutes and arcseconds
    pub fn to_dms(&self, places: usize) -> Sexagesimal {
        Sexagesimal::split(self.to_degrees(), places)
    }

    /// Sexagesimal hours, minutes and seconds of time
    pub fn to_hms(&self, places: usize) -> Sexagesimal {
        Sexagesimal::split(self.to_hours(), places)
    }

    /// Formats as `HHhMMmSS.sss` with the given number of decimals
    pub fn format_hms(&self, places: usize) -> String {
        let hms = self.to_hms(places);
        let sign = if hms.negative { "-" } else { "" };
        format!(
            "{}{:02}h{:02}m{}s",
            sign,
            hms.units,
            hms.minutes,
            pad_seconds(hms.seconds, places)
        )
    }

    /// Formats as signed `±DD°MM'SS.ss"` with the given number of decimals
    pub fn format_dms(&self, places: usize) -> String {
        let dms = self.to_dms(places);
        let sign = if dms.negative { '-' } else { '+' };
        format!(
            "{}{:02}°{:02}'{}\"",
            sign,
            dms.units,
            dms.minutes,
            pad_seconds(dms.seconds, places)
        )
    }
}

fn pad_seconds(seconds: f64, places: usize) -> String {
    let width = if places == 0 { 2 } else { places + 3 };
    format!("{:0width$.places$}", seconds, width = width, places = places)
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.7}°", self.to_degrees())
    }
}

impl Serialize for Angle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.to_degrees())
    }
}
