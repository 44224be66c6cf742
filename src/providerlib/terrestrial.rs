//! CIO-based and Earth-fixed providers
//!
//! GCRF → CIRF → TIRF → ITRF follows the IERS 2003 CIO-based chain.
//! TEME hangs off ITRF through the IAU 1982 sidereal time, as SGP4 expects.

use std::fmt;

use nalgebra::Vector3;

use crate::constants::{ASEC2RAD, TAU};
use crate::earthlib::{
    celestial_to_intermediate_matrix, cio_locator, cip_xy, earth_angular_velocity,
    earth_rotation_angle, equation_of_the_equinoxes, gmst1982, polar_motion_matrix,
    polar_motion_matrix_1980, tio_locator,
};
use crate::eoplib::EarthOrientation;
use crate::errors::Result;
use crate::framelib::frame_rotations::{quaternion_from_dcm, rot_z};
use crate::precessionlib::Theory;
use crate::time::{Instant, Scale};
use crate::transformlib::Transform;

use super::TransformProvider;

/// GCRF to the celestial intermediate reference frame
///
/// The CIP comes from the bias-precession-nutation matrix of `theory`, the
/// CIO locator from the matching IERS series.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CelestialIntermediateProvider {
    theory: Theory,
}

impl CelestialIntermediateProvider {
    pub fn new(theory: Theory) -> Self {
        Self { theory }
    }

    pub fn theory(&self) -> Theory {
        self.theory
    }
}

impl TransformProvider for CelestialIntermediateProvider {
    fn transform_at(&self, instant: &Instant) -> Result<Transform> {
        let jd_tt = instant.julian_date(Scale::TT);
        let (x, y) = cip_xy(self.theory, jd_tt);
        let s = cio_locator(self.theory, jd_tt, x, y);
        let q = quaternion_from_dcm(&celestial_to_intermediate_matrix(x, y, s));
        Ok(Transform::rotation(*instant, q, Vector3::zeros()))
    }
}

/// CIRF to the terrestrial intermediate reference frame, by the Earth rotation angle
#[derive(Debug, Clone)]
pub struct EarthRotationProvider {
    earth_orientation: EarthOrientation,
}

impl EarthRotationProvider {
    pub fn new(earth_orientation: EarthOrientation) -> Self {
        Self { earth_orientation }
    }

    pub fn earth_orientation(&self) -> &EarthOrientation {
        &self.earth_orientation
    }
}

impl PartialEq for EarthRotationProvider {
    fn eq(&self, other: &Self) -> bool {
        self.earth_orientation.same_as(&other.earth_orientation)
    }
}

impl TransformProvider for EarthRotationProvider {
    fn transform_at(&self, instant: &Instant) -> Result<Transform> {
        let ut1_minus_utc = self.earth_orientation.ut1_minus_utc(instant)?;
        let length_of_day = self.earth_orientation.length_of_day(instant)?;

        let (jd_ut1, fraction_ut1) = instant.ut1_julian_date_split(ut1_minus_utc);
        let era = earth_rotation_angle(jd_ut1, fraction_ut1) * TAU;

        Ok(Transform::rotation(
            *instant,
            quaternion_from_dcm(&rot_z(era)),
            earth_angular_velocity(length_of_day),
        ))
    }
}

/// TIRF to ITRF, by the pole coordinates and the TIO locator
#[derive(Debug, Clone)]
pub struct PolarMotionProvider {
    earth_orientation: EarthOrientation,
}

impl PolarMotionProvider {
    pub fn new(earth_orientation: EarthOrientation) -> Self {
        Self { earth_orientation }
    }

    pub fn earth_orientation(&self) -> &EarthOrientation {
        &self.earth_orientation
    }
}

impl PartialEq for PolarMotionProvider {
    fn eq(&self, other: &Self) -> bool {
        self.earth_orientation.same_as(&other.earth_orientation)
    }
}

impl TransformProvider for PolarMotionProvider {
    fn transform_at(&self, instant: &Instant) -> Result<Transform> {
        let (x_p, y_p) = self.earth_orientation.polar_motion(instant)?;
        let s_prime = tio_locator(instant.julian_date(Scale::TT));
        let w = polar_motion_matrix(x_p * ASEC2RAD, y_p * ASEC2RAD, s_prime);
        Ok(Transform::rotation(*instant, quaternion_from_dcm(&w), Vector3::zeros()))
    }
}

/// Sidereal angle used to go from the pseudo-Earth-fixed frame to TEME
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SiderealModel {
    /// Greenwich mean sidereal time, IAU 1982 (the SGP4 convention)
    #[default]
    Gmst1982,
    /// GMST 1982 plus the equation of the equinoxes
    Gast1994,
}

impl fmt::Display for SiderealModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiderealModel::Gmst1982 => f.write_str("GMST 1982"),
            SiderealModel::Gast1994 => f.write_str("GAST 1994"),
        }
    }
}

/// ITRF to the true equator, mean equinox frame
///
/// Polar motion uses the IAU 1980 matrix and the spin rate follows the
/// length of day, as in Vallado's TEME reduction.
#[derive(Debug, Clone)]
pub struct SiderealTimeProvider {
    earth_orientation: EarthOrientation,
    model: SiderealModel,
}

impl SiderealTimeProvider {
    pub fn new(earth_orientation: EarthOrientation, model: SiderealModel) -> Self {
        Self {
            earth_orientation,
            model,
        }
    }

    pub fn model(&self) -> SiderealModel {
        self.model
    }

    pub fn earth_orientation(&self) -> &EarthOrientation {
        &self.earth_orientation
    }
}

impl PartialEq for SiderealTimeProvider {
    fn eq(&self, other: &Self) -> bool {
        self.model == other.model && self.earth_orientation.same_as(&other.earth_orientation)
    }
}

impl TransformProvider for SiderealTimeProvider {
    fn transform_at(&self, instant: &Instant) -> Result<Transform> {
        let ut1_minus_utc = self.earth_orientation.ut1_minus_utc(instant)?;
        let (x_p, y_p) = self.earth_orientation.polar_motion(instant)?;
        let length_of_day = self.earth_orientation.length_of_day(instant)?;

        let (jd_ut1, fraction_ut1) = instant.ut1_julian_date_split(ut1_minus_utc);
        let (gmst, _) = gmst1982(jd_ut1, fraction_ut1);
        let angle = match self.model {
            SiderealModel::Gmst1982 => gmst,
            SiderealModel::Gast1994 => gmst + equation_of_the_equinoxes(instant.julian_date(Scale::TT)),
        };

        // TEME -> ITRF is W * R3(angle); this provider goes the other way
        let teme_to_itrf = polar_motion_matrix_1980(x_p * ASEC2RAD, y_p * ASEC2RAD) * rot_z(angle);
        let q = quaternion_from_dcm(&teme_to_itrf.transpose());

        Ok(Transform::rotation(*instant, q, -earth_angular_velocity(length_of_day)))
    }
}
