//! Earth orientation parameters
//!
//! Providers that depend on the Earth's actual rotation (ERA, polar motion,
//! sidereal time) query an [`EarthOrientationSource`] by instant. A source
//! either supplies a value or reports that it has none; [`EarthOrientation`]
//! then applies the strict/lenient policy.
//!
//! Parsing IERS bulletins is left to callers: [`TabulatedEarthOrientation`]
//! takes records that are already in memory.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use tracing::debug;

use crate::errors::{FrameError, Result};
use crate::time::{Instant, Scale};

/// Behaviour when a source cannot supply a parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EopMode {
    /// Fail with `MissingEarthOrientationData`
    Strict,
    /// Substitute zero and carry on
    #[default]
    Lenient,
}

impl FromStr for EopMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(EopMode::Strict),
            "lenient" => Ok(EopMode::Lenient),
            _ => Err("expected 'strict' or 'lenient'".to_string()),
        }
    }
}

impl fmt::Display for EopMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EopMode::Strict => f.write_str("strict"),
            EopMode::Lenient => f.write_str("lenient"),
        }
    }
}

/// Instant → optional Earth-orientation values
///
/// Units follow the IERS bulletins: seconds for UT1-UTC, arcseconds for the
/// pole coordinates, milliseconds for the excess length of day.
pub trait EarthOrientationSource: Send + Sync + fmt::Debug {
    /// UT1 - UTC in seconds
    fn ut1_minus_utc_at(&self, instant: &Instant) -> Option<f64>;

    /// Pole coordinates (x_p, y_p) in arcseconds
    fn polar_motion_at(&self, instant: &Instant) -> Option<(f64, f64)>;

    /// Excess length of day in milliseconds
    fn length_of_day_at(&self, instant: &Instant) -> Option<f64>;
}

/// A source that never has data
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEarthOrientation;

impl EarthOrientationSource for NoEarthOrientation {
    fn ut1_minus_utc_at(&self, _instant: &Instant) -> Option<f64> {
        None
    }

    fn polar_motion_at(&self, _instant: &Instant) -> Option<(f64, f64)> {
        None
    }

    fn length_of_day_at(&self, _instant: &Instant) -> Option<f64> {
        None
    }
}

/// Fixed values at every instant
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ConstantEarthOrientation {
    pub ut1_minus_utc: f64,
    pub x_p: f64,
    pub y_p: f64,
    pub length_of_day: f64,
}

impl EarthOrientationSource for ConstantEarthOrientation {
    fn ut1_minus_utc_at(&self, _instant: &Instant) -> Option<f64> {
        Some(self.ut1_minus_utc)
    }

    fn polar_motion_at(&self, _instant: &Instant) -> Option<(f64, f64)> {
        Some((self.x_p, self.y_p))
    }

    fn length_of_day_at(&self, _instant: &Instant) -> Option<f64> {
        Some(self.length_of_day)
    }
}

/// One row of an Earth orientation table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EopRecord {
    /// Modified Julian date (UTC)
    pub mjd_utc: f64,
    /// Pole x coordinate, arcseconds
    pub x_p: f64,
    /// Pole y coordinate, arcseconds
    pub y_p: f64,
    /// UT1 - UTC, seconds
    pub ut1_minus_utc: f64,
    /// Excess length of day, milliseconds
    pub length_of_day: f64,
}

/// Linear interpolation over daily (or any spacing) records
///
/// Queries outside the first and last record return `None`.
/// UT1-UTC is interpolated as given, so a table that spans a leap second
/// should carry the step on whole-day boundaries.
#[derive(Debug, Clone)]
pub struct TabulatedEarthOrientation {
    records: Vec<EopRecord>,
}

impl TabulatedEarthOrientation {
    /// Build a table from records sorted by strictly increasing MJD
    pub fn new(records: Vec<EopRecord>) -> Result<Self> {
        if records.is_empty() {
            return Err(FrameError::InvalidEarthOrientationTable(
                "no records".to_string(),
            ));
        }

        if let Some(bad) = records.iter().find(|r| {
            ![r.mjd_utc, r.x_p, r.y_p, r.ut1_minus_utc, r.length_of_day]
                .iter()
                .all(|v| v.is_finite())
        }) {
            return Err(FrameError::InvalidEarthOrientationTable(format!(
                "non-finite value in record at MJD {}",
                bad.mjd_utc
            )));
        }

        if let Some(pair) = records.windows(2).find(|w| w[1].mjd_utc <= w[0].mjd_utc) {
            return Err(FrameError::InvalidEarthOrientationTable(format!(
                "MJD {} does not follow MJD {}",
                pair[1].mjd_utc, pair[0].mjd_utc
            )));
        }

        Ok(Self { records })
    }

    pub fn records(&self) -> &[EopRecord] {
        &self.records
    }

    /// First and last MJD (UTC) covered by the table
    pub fn coverage(&self) -> (f64, f64) {
        let first = self.records.first().map_or(f64::NAN, |r| r.mjd_utc);
        let last = self.records.last().map_or(f64::NAN, |r| r.mjd_utc);
        (first, last)
    }

    /// Interpolate one field at an instant
    fn interpolate(&self, instant: &Instant, field: impl Fn(&EopRecord) -> f64) -> Option<f64> {
        let mjd = instant.modified_julian_date(Scale::UTC);
        let (first, last) = self.coverage();
        if !(first..=last).contains(&mjd) {
            return None;
        }

        // Index of the first record strictly after `mjd`
        let upper = self.records.partition_point(|r| r.mjd_utc <= mjd);
        if upper == self.records.len() {
            return self.records.last().map(&field);
        }
        let lo = &self.records[upper - 1];
        let hi = &self.records[upper];

        let fraction = (mjd - lo.mjd_utc) / (hi.mjd_utc - lo.mjd_utc);
        Some(field(lo) + fraction * (field(hi) - field(lo)))
    }
}

impl EarthOrientationSource for TabulatedEarthOrientation {
    fn ut1_minus_utc_at(&self, instant: &Instant) -> Option<f64> {
        self.interpolate(instant, |r| r.ut1_minus_utc)
    }

    fn polar_motion_at(&self, instant: &Instant) -> Option<(f64, f64)> {
        let x = self.interpolate(instant, |r| r.x_p)?;
        let y = self.interpolate(instant, |r| r.y_p)?;
        Some((x, y))
    }

    fn length_of_day_at(&self, instant: &Instant) -> Option<f64> {
        self.interpolate(instant, |r| r.length_of_day)
    }
}

/// A shared source together with the policy applied to gaps
#[derive(Debug, Clone)]
pub struct EarthOrientation {
    source: Arc<dyn EarthOrientationSource>,
    mode: EopMode,
}

impl EarthOrientation {
    pub fn new(source: Arc<dyn EarthOrientationSource>, mode: EopMode) -> Self {
        Self { source, mode }
    }

    /// No data at all; lenient mode therefore yields the zero model
    pub fn none(mode: EopMode) -> Self {
        Self::new(Arc::new(NoEarthOrientation), mode)
    }

    pub fn mode(&self) -> EopMode {
        self.mode
    }

    pub fn source(&self) -> &Arc<dyn EarthOrientationSource> {
        &self.source
    }

    /// Same source, different policy
    pub fn with_mode(&self, mode: EopMode) -> Self {
        Self {
            source: Arc::clone(&self.source),
            mode,
        }
    }

    /// True when both facades share the same source object and mode
    pub fn same_as(&self, other: &EarthOrientation) -> bool {
        self.mode == other.mode
            && std::ptr::eq(
                Arc::as_ptr(&self.source) as *const (),
                Arc::as_ptr(&other.source) as *const (),
            )
    }

    fn resolve<T>(&self, value: Option<T>, default: T, parameter: &'static str, instant: &Instant) -> Result<T> {
        match (value, self.mode) {
            (Some(v), _) => Ok(v),
            (None, EopMode::Lenient) => {
                debug!("Earth orientation data [{}] missing at {}, using zero", parameter, instant);
                Ok(default)
            }
            (None, EopMode::Strict) => Err(FrameError::MissingEarthOrientationData {
                parameter,
                mjd_utc: instant.modified_julian_date(Scale::UTC),
            }),
        }
    }

    /// UT1 - UTC in seconds
    pub fn ut1_minus_utc(&self, instant: &Instant) -> Result<f64> {
        self.resolve(self.source.ut1_minus_utc_at(instant), 0.0, "UT1-UTC", instant)
    }

    /// Pole coordinates (x_p, y_p) in arcseconds
    pub fn polar_motion(&self, instant: &Instant) -> Result<(f64, f64)> {
        self.resolve(self.source.polar_motion_at(instant), (0.0, 0.0), "polar motion", instant)
    }

    /// Excess length of day in milliseconds
    pub fn length_of_day(&self, instant: &Instant) -> Result<f64> {
        self.resolve(self.source.length_of_day_at(instant), 0.0, "length of day", instant)
    }
}

impl Default for EarthOrientation {
    fn default() -> Self {
        Self::none(EopMode::Lenient)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn table() -> TabulatedEarthOrientation {
        TabulatedEarthOrientation::new(vec![
            EopRecord {
                mjd_utc: 58849.0,
                x_p: 0.076,
                y_p: 0.282,
                ut1_minus_utc: -0.177,
                length_of_day: 0.3,
            },
            EopRecord {
                mjd_utc: 58850.0,
                x_p: 0.078,
                y_p: 0.284,
                ut1_minus_utc: -0.178,
                length_of_day: 0.5,
            },
        ])
        .unwrap()
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!("STRICT".parse::<EopMode>(), Ok(EopMode::Strict));
        assert_eq!(" lenient ".parse::<EopMode>(), Ok(EopMode::Lenient));
        assert!("loose".parse::<EopMode>().is_err());
    }

    #[test]
    fn test_tabulated_interpolates_midpoint() {
        let t = Instant::from_modified_julian_date(58849.5, Scale::UTC);
        let eop = table();
        assert_relative_eq!(eop.ut1_minus_utc_at(&t).unwrap(), -0.1775, epsilon = 1e-9);
        assert_relative_eq!(eop.length_of_day_at(&t).unwrap(), 0.4, epsilon = 1e-9);
        let (x, y) = eop.polar_motion_at(&t).unwrap();
        assert_relative_eq!(x, 0.077, epsilon = 1e-9);
        assert_relative_eq!(y, 0.283, epsilon = 1e-9);
    }

    #[test]
    fn test_tabulated_endpoints_and_outside() {
        let eop = table();
        let last = Instant::from_modified_julian_date(58850.0, Scale::UTC);
        assert_relative_eq!(eop.length_of_day_at(&last).unwrap(), 0.5, epsilon = 1e-9);

        let after = Instant::from_modified_julian_date(58851.0, Scale::UTC);
        assert_eq!(eop.ut1_minus_utc_at(&after), None);
        let before = Instant::from_modified_julian_date(58800.0, Scale::UTC);
        assert_eq!(eop.polar_motion_at(&before), None);
    }

    #[test]
    fn test_table_validation() {
        assert!(TabulatedEarthOrientation::new(vec![]).is_err());

        let mut rows = table().records().to_vec();
        rows.swap(0, 1);
        assert!(matches!(
            TabulatedEarthOrientation::new(rows),
            Err(FrameError::InvalidEarthOrientationTable(_))
        ));
    }

    #[test]
    fn test_lenient_substitutes_zero() {
        let eop = EarthOrientation::none(EopMode::Lenient);
        let t = Instant::j2000();
        assert_eq!(eop.ut1_minus_utc(&t), Ok(0.0));
        assert_eq!(eop.polar_motion(&t), Ok((0.0, 0.0)));
        assert_eq!(eop.length_of_day(&t), Ok(0.0));
    }

    #[test]
    fn test_strict_reports_missing_parameter() {
        let eop = EarthOrientation::new(Arc::new(table()), EopMode::Strict);
        let t = Instant::from_modified_julian_date(60000.0, Scale::UTC);
        match eop.polar_motion(&t) {
            Err(FrameError::MissingEarthOrientationData { parameter, mjd_utc }) => {
                assert_eq!(parameter, "polar motion");
                assert_relative_eq!(mjd_utc, 60000.0, epsilon = 1e-6);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_same_as_compares_source_identity() {
        let source: Arc<dyn EarthOrientationSource> = Arc::new(ConstantEarthOrientation::default());
        let a = EarthOrientation::new(Arc::clone(&source), EopMode::Strict);
        let b = EarthOrientation::new(source, EopMode::Strict);
        let c = EarthOrientation::new(Arc::new(ConstantEarthOrientation::default()), EopMode::Strict);
        assert!(a.same_as(&b));
        assert!(!a.same_as(&c));
        assert!(!a.same_as(&a.with_mode(EopMode::Lenient)));
    }
}
