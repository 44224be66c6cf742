//! Equinox-based celestial providers: frame bias, mean of date, true of date

use nalgebra::Vector3;

use crate::constants::ASEC2RAD;
use crate::errors::Result;
use crate::framelib::frame_rotations::quaternion_from_dcm;
use crate::precessionlib::{fk5_precession_matrix, Theory};
use crate::time::{Instant, Scale};
use crate::transformlib::Transform;

use super::TransformProvider;

/// GCRF to mean J2000 (dynamical) frame, by the frame bias of a theory
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameBiasProvider {
    theory: Theory,
}

impl FrameBiasProvider {
    pub fn new(theory: Theory) -> Self {
        Self { theory }
    }

    pub fn theory(&self) -> Theory {
        self.theory
    }
}

impl TransformProvider for FrameBiasProvider {
    fn transform_at(&self, instant: &Instant) -> Result<Transform> {
        let q = quaternion_from_dcm(&self.theory.frame_bias());
        Ok(Transform::rotation(*instant, q, Vector3::zeros()))
    }
}

/// Mean J2000 to the mean equator and equinox of a fixed epoch (IAU-76/FK5)
///
/// The rotation is evaluated at the bound epoch; the query instant only
/// timestamps the result.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeanOfDateProvider {
    epoch: Instant,
}

impl MeanOfDateProvider {
    pub fn new(epoch: Instant) -> Self {
        Self { epoch }
    }

    pub fn epoch(&self) -> Instant {
        self.epoch
    }
}

impl TransformProvider for MeanOfDateProvider {
    fn transform_at(&self, instant: &Instant) -> Result<Transform> {
        let p = fk5_precession_matrix(self.epoch.julian_date(Scale::TT));
        Ok(Transform::rotation(*instant, quaternion_from_dcm(&p), Vector3::zeros()))
    }
}

/// Corrections added to the modelled nutation angles, radians
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NutationCorrection {
    /// Added to nutation in longitude
    pub d_psi: f64,
    /// Added to nutation in obliquity
    pub d_eps: f64,
}

impl NutationCorrection {
    /// Corrections given in arcseconds, as published in IERS bulletins
    pub fn from_arcseconds(d_psi: f64, d_eps: f64) -> Self {
        Self {
            d_psi: d_psi * ASEC2RAD,
            d_eps: d_eps * ASEC2RAD,
        }
    }
}

/// Mean of date to true equator and equinox of the same epoch
///
/// The parent is the FK5 mean-of-date frame hung off the IAU 2000 J2000
/// frame. The rotation is chosen so that GCRF to this frame is exactly the
/// bias-precession-nutation matrix of `theory` at the bound epoch, with the
/// correction added to the modelled nutation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrueOfDateProvider {
    epoch: Instant,
    theory: Theory,
    correction: NutationCorrection,
}

impl TrueOfDateProvider {
    pub fn new(epoch: Instant, theory: Theory, correction: NutationCorrection) -> Self {
        Self {
            epoch,
            theory,
            correction,
        }
    }

    pub fn epoch(&self) -> Instant {
        self.epoch
    }

    pub fn theory(&self) -> Theory {
        self.theory
    }

    pub fn correction(&self) -> NutationCorrection {
        self.correction
    }
}

impl TransformProvider for TrueOfDateProvider {
    fn transform_at(&self, instant: &Instant) -> Result<Transform> {
        let jd_tt = self.epoch.julian_date(Scale::TT);
        let gcrf_to_tod =
            self.theory
                .bias_precession_nutation(jd_tt, self.correction.d_psi, self.correction.d_eps);
        let gcrf_to_mod = fk5_precession_matrix(jd_tt) * Theory::Iau2000B.frame_bias();
        let q = quaternion_from_dcm(&(gcrf_to_tod * gcrf_to_mod.transpose()));
        Ok(Transform::rotation(*instant, q, Vector3::zeros()))
    }
}
