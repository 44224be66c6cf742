//! Astronomical and unit-conversion constants shared across the crate

use std::f64::consts::PI;

/// Julian date of the J2000.0 epoch (2000-01-01T12:00:00 TT)
pub const J2000: f64 = 2451545.0;

/// Offset between Julian date and modified Julian date
pub const MJD_OFFSET: f64 = 2400000.5;

/// Days per Julian century
pub const DAYS_PER_CENTURY: f64 = 36525.0;

/// Seconds per day
pub const DAY_S: f64 = 86400.0;

/// Full turn in radians
pub const TAU: f64 = 2.0 * PI;

/// Arcseconds to radians
pub const ASEC2RAD: f64 = 4.848136811095359935899141e-6;

/// Seconds of time to radians
pub const SEC2RAD: f64 = 7.272205216643039903848712e-5;

/// Nanoseconds per second
pub const NANOS_PER_SEC: i128 = 1_000_000_000;

/// Nanoseconds per day
pub const NANOS_PER_DAY: i128 = 86_400 * NANOS_PER_SEC;

/// TT - TAI, in nanoseconds
pub const TT_TAI_OFFSET_NS: i128 = 32_184_000_000;

/// TAI - GPS, in nanoseconds
pub const TAI_GPS_OFFSET_NS: i128 = 19 * NANOS_PER_SEC;

/// Nominal Earth rotation rate in rad/s (IERS, for a standard day)
pub const EARTH_ROTATION_RATE: f64 = 7.2921151467064e-5;

/// Julian centuries of TT elapsed since J2000.0 for a TT Julian date
pub fn julian_centuries(jd_tt: f64) -> f64 {
    (jd_tt - J2000) / DAYS_PER_CENTURY
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_arcsecond_conversion() {
        assert_relative_eq!(ASEC2RAD * 3600.0 * 180.0, PI, epsilon = 1e-15);
    }

    #[test]
    fn test_second_of_time_conversion() {
        assert_relative_eq!(SEC2RAD * DAY_S, TAU, epsilon = 1e-12);
    }

    #[test]
    fn test_julian_centuries() {
        assert_eq!(julian_centuries(J2000), 0.0);
        assert_relative_eq!(julian_centuries(J2000 + DAYS_PER_CENTURY), 1.0);
    }
}
