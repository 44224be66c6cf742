//! TAI - UTC offsets from the IERS leap-second history
//!
//! Offsets are tabulated from 1972-01-01, when UTC adopted whole-second
//! steps. Earlier instants use the initial 10 s offset.

use chrono::NaiveDate;
use once_cell::sync::Lazy;

use crate::constants::NANOS_PER_SEC;

/// (year, month, TAI - UTC in seconds) effective from the first day of the month at 00:00 UTC
const LEAP_SECOND_HISTORY: [(i32, u32, i64); 28] = [
    (1972, 1, 10),
    (1972, 7, 11),
    (1973, 1, 12),
    (1974, 1, 13),
    (1975, 1, 14),
    (1976, 1, 15),
    (1977, 1, 16),
    (1978, 1, 17),
    (1979, 1, 18),
    (1980, 1, 19),
    (1981, 7, 20),
    (1982, 7, 21),
    (1983, 7, 22),
    (1985, 7, 23),
    (1988, 1, 24),
    (1990, 1, 25),
    (1991, 1, 26),
    (1992, 7, 27),
    (1993, 7, 28),
    (1994, 7, 29),
    (1996, 1, 30),
    (1997, 7, 31),
    (1999, 1, 32),
    (2006, 1, 33),
    (2009, 1, 34),
    (2012, 7, 35),
    (2015, 7, 36),
    (2017, 1, 37),
];

/// One step of the table, as UTC nanoseconds since 2000-01-01T12:00:00 UTC
#[derive(Debug, Clone, Copy)]
struct LeapStep {
    utc_ns: i128,
    offset_s: i64,
}

static LEAP_STEPS: Lazy<Vec<LeapStep>> = Lazy::new(|| {
    let reference = NaiveDate::from_ymd_opt(2000, 1, 1).and_then(|d| d.and_hms_opt(12, 0, 0));

    LEAP_SECOND_HISTORY
        .iter()
        .filter_map(|&(year, month, offset_s)| {
            let start = NaiveDate::from_ymd_opt(year, month, 1)?.and_hms_opt(0, 0, 0)?;
            let utc_ns = (start - reference?).num_nanoseconds()? as i128;
            Some(LeapStep { utc_ns, offset_s })
        })
        .collect()
});

const PRE_1972_OFFSET_S: i64 = 10;

/// TAI - UTC in nanoseconds for an instant given as UTC nanoseconds since J2000 noon
pub fn tai_minus_utc_at_utc(utc_ns: i128) -> i128 {
    LEAP_STEPS
        .iter()
        .rev()
        .find(|step| utc_ns >= step.utc_ns)
        .map_or(PRE_1972_OFFSET_S, |step| step.offset_s) as i128
        * NANOS_PER_SEC
}

/// TAI - UTC in nanoseconds for an instant given as TAI nanoseconds since J2000 noon
pub fn tai_minus_utc_at_tai(tai_ns: i128) -> i128 {
    LEAP_STEPS
        .iter()
        .rev()
        .find(|step| tai_ns >= step.utc_ns + step.offset_s as i128 * NANOS_PER_SEC)
        .map_or(PRE_1972_OFFSET_S, |step| step.offset_s) as i128
        * NANOS_PER_SEC
}
