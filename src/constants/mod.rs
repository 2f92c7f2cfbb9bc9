//! Constants module for astrometric reductions

use std::f64::consts::PI;

// Astronomical distances
/// Astronomical Unit in kilometers
pub const AU_KM: f64 = 149_597_870.700;

// Time constants
/// Seconds in a day
pub const DAY_S: f64 = 86_400.0;
/// Days in a Julian year
pub const JULIAN_YEAR_DAYS: f64 = 365.25;
/// Days in a Julian century
pub const JULIAN_CENTURY_DAYS: f64 = 36_525.0;
/// Days in a Besselian (tropical) year at B1900
pub const BESSELIAN_YEAR_DAYS: f64 = 365.242_198_781;
/// J2000.0 epoch as Julian date
pub const J2000: f64 = 2_451_545.0;
/// B1900.0 epoch as Julian date
pub const B1900: f64 = 2_415_020.313_52;
/// TT minus TAI in seconds
pub const TT_MINUS_TAI_S: f64 = 32.184;
/// TT minus TAI in days
pub const TT_MINUS_TAI: f64 = TT_MINUS_TAI_S / DAY_S;

// Angles
/// Arcseconds in a complete circle
pub const ASEC360: f64 = 1_296_000.0;
/// Arcseconds to radians conversion factor
pub const ASEC2RAD: f64 = 4.848_136_811_095_36e-6;
/// Tau (2*PI) for full circle
pub const TAU: f64 = 2.0 * PI;

// Physics
/// One AU per Julian year expressed in km/s
pub const AU_PER_YEAR_KMS: f64 = AU_KM / (JULIAN_YEAR_DAYS * DAY_S);
/// Constant of annual aberration in arcseconds
pub const ABERRATION_CONSTANT: f64 = 20.495_52;

// Calendar constants
/// First day of Gregorian calendar in Julian day number (1582-10-15)
pub const GREGORIAN_START: i64 = 2_299_161;
/// Earliest accepted Julian date, -4712 January 1.5 (Julian calendar)
pub const MIN_JD: f64 = 0.0;
/// Latest accepted Julian date, in the year 269 078
pub const MAX_JD: f64 = 1.0e8;
