//! Instants and time scales
//!
//! An [`Instant`] is stored as integer TAI nanoseconds since J2000
//! (2000-01-01T12:00:00 TAI), so it can key hash maps exactly. Conversions to
//! Julian dates are provided for the scales the frame providers need:
//! TT for precession/nutation polynomials and UTC (plus an external UT1-UTC
//! offset) for Earth rotation.

mod leap_seconds;

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime};

use crate::constants::{
    DAY_S, J2000, MJD_OFFSET, NANOS_PER_DAY, NANOS_PER_SEC, TAI_GPS_OFFSET_NS, TT_TAI_OFFSET_NS,
};
use crate::errors::{FrameError, Result};

pub use leap_seconds::{tai_minus_utc_at_tai, tai_minus_utc_at_utc};

/// Time scales an [`Instant`] can be expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scale {
    /// International Atomic Time
    TAI,
    /// Terrestrial Time
    TT,
    /// Coordinated Universal Time
    UTC,
    /// GPS time
    GPS,
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Scale::TAI => "TAI",
            Scale::TT => "TT",
            Scale::UTC => "UTC",
            Scale::GPS => "GPS",
        };
        f.write_str(label)
    }
}

/// An instant in time, internally stored as TAI nanoseconds since J2000
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Instant {
    tai_ns: i128,
}

/// Calendar origin every scale counts from: 2000-01-01T12:00:00 in that scale
fn calendar_origin() -> Result<NaiveDateTime> {
    NaiveDate::from_ymd_opt(2000, 1, 1)
        .and_then(|d| d.and_hms_opt(12, 0, 0))
        .ok_or(FrameError::InvalidDateTime("J2000 calendar origin".into()))
}

impl Instant {
    /// Create an instant from raw TAI nanoseconds since J2000
    pub const fn from_tai_ns(tai_ns: i128) -> Self {
        Self { tai_ns }
    }

    /// The J2000.0 epoch, 2000-01-01T12:00:00 TT
    pub const fn j2000() -> Self {
        Self {
            tai_ns: -TT_TAI_OFFSET_NS,
        }
    }

    /// Create an instant from nanoseconds since 2000-01-01T12:00:00 of the given scale
    pub fn from_scale_ns(scale_ns: i128, scale: Scale) -> Self {
        let tai_ns = match scale {
            Scale::TAI => scale_ns,
            Scale::TT => scale_ns - TT_TAI_OFFSET_NS,
            Scale::GPS => scale_ns + TAI_GPS_OFFSET_NS,
            Scale::UTC => scale_ns + tai_minus_utc_at_utc(scale_ns),
        };
        Self { tai_ns }
    }

    /// Create an instant from a calendar date and time read in the given scale
    pub fn from_date_time(date_time: &NaiveDateTime, scale: Scale) -> Result<Self> {
        let elapsed = *date_time - calendar_origin()?;
        let scale_ns = elapsed
            .num_nanoseconds()
            .ok_or_else(|| FrameError::InvalidDateTime(date_time.to_string()))?;
        Ok(Self::from_scale_ns(scale_ns as i128, scale))
    }

    /// Create an instant from UTC calendar fields
    ///
    /// # Arguments
    /// * `year`, `month`, `day` - Gregorian calendar date
    /// * `hour`, `minute` - time of day
    /// * `second` - seconds including fraction, in `[0, 60)`
    pub fn from_utc(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: f64,
    ) -> Result<Self> {
        Self::from_calendar(year, month, day, hour, minute, second, Scale::UTC)
    }

    /// Create an instant from calendar fields read in the given scale
    pub fn from_calendar(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: f64,
        scale: Scale,
    ) -> Result<Self> {
        let describe = || format!("{year:04}-{month:02}-{day:02}T{hour:02}:{minute:02}:{second}");

        if !(0.0..60.0).contains(&second) {
            return Err(FrameError::InvalidDateTime(describe()));
        }

        let whole = second.trunc();
        let nanos = ((second - whole) * 1e9).round() as u32;
        let date_time = NaiveDate::from_ymd_opt(year, month, day)
            .and_then(|d| d.and_hms_nano_opt(hour, minute, whole as u32, nanos.min(999_999_999)))
            .ok_or_else(|| FrameError::InvalidDateTime(describe()))?;

        Self::from_date_time(&date_time, scale)
    }

    /// Create an instant from a Julian date in the given scale
    pub fn from_julian_date(jd: f64, scale: Scale) -> Self {
        let scale_ns = ((jd - J2000) * NANOS_PER_DAY as f64).round() as i128;
        Self::from_scale_ns(scale_ns, scale)
    }

    /// Create an instant from a modified Julian date in the given scale
    pub fn from_modified_julian_date(mjd: f64, scale: Scale) -> Self {
        let scale_ns = ((mjd + MJD_OFFSET - J2000) * NANOS_PER_DAY as f64).round() as i128;
        Self::from_scale_ns(scale_ns, scale)
    }

    /// Raw TAI nanoseconds since J2000
    pub const fn as_tai_ns(&self) -> i128 {
        self.tai_ns
    }

    /// Nanoseconds since 2000-01-01T12:00:00 of the given scale
    pub fn scale_ns(&self, scale: Scale) -> i128 {
        match scale {
            Scale::TAI => self.tai_ns,
            Scale::TT => self.tai_ns + TT_TAI_OFFSET_NS,
            Scale::GPS => self.tai_ns - TAI_GPS_OFFSET_NS,
            Scale::UTC => self.tai_ns - tai_minus_utc_at_tai(self.tai_ns),
        }
    }

    /// Julian date in the given scale
    pub fn julian_date(&self, scale: Scale) -> f64 {
        let (whole, fraction) = self.julian_date_split(scale);
        whole + fraction
    }

    /// Julian date split into a whole-day part (noon-based) and a day fraction in `[0, 1)`
    ///
    /// Keeps sub-microsecond resolution for algorithms that accept
    /// two-part dates, such as the Earth rotation angle.
    pub fn julian_date_split(&self, scale: Scale) -> (f64, f64) {
        let ns = self.scale_ns(scale);
        let days = ns.div_euclid(NANOS_PER_DAY);
        let remainder = ns.rem_euclid(NANOS_PER_DAY);
        (
            J2000 + days as f64,
            remainder as f64 / NANOS_PER_DAY as f64,
        )
    }

    /// Modified Julian date in the given scale
    pub fn modified_julian_date(&self, scale: Scale) -> f64 {
        let (whole, fraction) = self.julian_date_split(scale);
        (whole - MJD_OFFSET) + fraction
    }

    /// Calendar date and time in the given scale
    pub fn to_date_time(&self, scale: Scale) -> Result<NaiveDateTime> {
        let ns = i64::try_from(self.scale_ns(scale))
            .map_err(|_| FrameError::InvalidDateTime(format!("{} ns (TAI)", self.tai_ns)))?;
        calendar_origin()?
            .checked_add_signed(chrono::Duration::nanoseconds(ns))
            .ok_or_else(|| FrameError::InvalidDateTime(format!("{} ns (TAI)", self.tai_ns)))
    }

    /// ISO 8601 representation in the given scale, e.g. `2020-01-01T00:00:00.000000000 [TT]`
    pub fn to_string_in(&self, scale: Scale) -> String {
        match self.to_date_time(scale) {
            Ok(date_time) => format!("{} [{scale}]", date_time.format("%Y-%m-%dT%H:%M:%S%.9f")),
            Err(_) => format!("{:.9} s past J2000 [TAI]", self.tai_ns as f64 / 1e9),
        }
    }

    /// Seconds elapsed from `other` to `self`
    pub fn seconds_since(&self, other: &Instant) -> f64 {
        (self.tai_ns - other.tai_ns) as f64 / NANOS_PER_SEC as f64
    }

    /// A new instant shifted by a number of SI seconds
    ///
    /// # Errors
    /// `InvalidDateTime` if `seconds` is not finite or the shifted instant
    /// does not fit the nanosecond counter.
    pub fn add_seconds(&self, seconds: f64) -> Result<Self> {
        let shift_ns = (seconds * NANOS_PER_SEC as f64).round();
        let out_of_range = || {
            FrameError::InvalidDateTime(format!(
                "{} shifted by {seconds} s",
                self.to_string_in(Scale::TAI)
            ))
        };

        // `as` saturates, so reject anything it would clamp
        if !shift_ns.is_finite() || shift_ns.abs() >= i128::MAX as f64 {
            return Err(out_of_range());
        }
        self.tai_ns
            .checked_add(shift_ns as i128)
            .map(Self::from_tai_ns)
            .ok_or_else(out_of_range)
    }

    /// UT1 as a split Julian date, given UT1 - UTC in seconds
    pub fn ut1_julian_date_split(&self, ut1_minus_utc: f64) -> (f64, f64) {
        let (whole, fraction) = self.julian_date_split(Scale::UTC);
        (whole, fraction + ut1_minus_utc / DAY_S)
    }
}

impl fmt::Display for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_string_in(Scale::UTC))
    }
}

impl std::ops::Sub for Instant {
    type Output = f64;

    /// Elapsed SI seconds
    fn sub(self, rhs: Self) -> f64 {
        self.seconds_since(&rhs)
    }
}
