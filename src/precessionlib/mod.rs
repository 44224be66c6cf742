//! Precession matrix computation
//!
//! Three models are available:
//! - IAU-76/FK5 three-angle precession (zeta, theta, z), used by the
//!   mean-of-date frame;
//! - IAU 2000 precession: the Lieske angles with the IAU 2000 rate
//!   corrections, preceded by the IAU 2000 frame bias;
//! - IAU 2006 precession in the Fukushima-Williams four-angle form
//!   (Capitaine et al. 2003, Astronomy and Astrophysics 412, 567-586).
//!
//! [`Theory`] pairs a precession model with its nutation and builds the
//! full GCRF to true-of-date matrix.

use std::fmt;

use crate::constants::{julian_centuries, ASEC2RAD, J2000};
use crate::framelib::frame_rotations::{rot_x, rot_y, rot_z};
use crate::nutationlib::{
    build_nutation_matrix, iau2000b_nutation, iau2006_nutation, mean_obliquity, mean_obliquity_1980,
};
use nalgebra::Matrix3;

/// Mean obliquity at J2000.0 in arcseconds, IAU 1980
const EPS0_1980: f64 = 84381.448;

/// IAU-76/FK5 precession angles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fk5PrecessionAngles {
    /// radians
    pub zeta: f64,
    /// radians
    pub theta: f64,
    /// radians
    pub z: f64,
}

/// FK5 precession angles accumulated from J2000.0 to a TT Julian date
///
/// Reference: Vallado, Fundamentals of Astrodynamics and Applications (2013),
/// equation 3-88.
pub fn fk5_precession_angles(jd_tt: f64) -> Fk5PrecessionAngles {
    let t = julian_centuries(jd_tt);

    // arcseconds
    let zeta = ((0.017998 * t + 0.30188) * t + 2306.2181) * t;
    let theta = ((-0.041833 * t - 0.42665) * t + 2004.3109) * t;
    let z = ((0.018203 * t + 1.09468) * t + 2306.2181) * t;

    Fk5PrecessionAngles {
        zeta: zeta * ASEC2RAD,
        theta: theta * ASEC2RAD,
        z: z * ASEC2RAD,
    }
}

/// FK5 precession matrix, mean J2000 to mean equator and equinox of date
///
/// P = R3(-z) * R2(theta) * R3(-zeta)
pub fn fk5_precession_matrix(jd_tt: f64) -> Matrix3<f64> {
    let angles = fk5_precession_angles(jd_tt);
    rot_z(-angles.z) * rot_y(angles.theta) * rot_z(-angles.zeta)
}

/// IAU 2000 frame bias matrix, GCRF to mean J2000
///
/// Built from the bias in longitude and obliquity and the ICRS right
/// ascension offset (Chapront et al. 2002).
pub fn frame_bias_2000() -> Matrix3<f64> {
    let d_psi_bias = -0.041775 * ASEC2RAD;
    let d_eps_bias = -0.0068192 * ASEC2RAD;
    let d_ra0 = -0.0146 * ASEC2RAD;
    rot_x(-d_eps_bias) * rot_y(d_psi_bias * (EPS0_1980 * ASEC2RAD).sin()) * rot_z(d_ra0)
}

/// IAU 2000 corrections to the IAU 1976 precession rates, radians
///
/// Returns `(d_psi, d_eps)`, the corrections in longitude and obliquity.
pub fn precession_rate_corrections(jd_tt: f64) -> (f64, f64) {
    let t = julian_centuries(jd_tt);
    (-0.29965 * t * ASEC2RAD, -0.02524 * t * ASEC2RAD)
}

/// IAU 2000 precession matrix, mean J2000 to mean equator and equinox of date
///
/// P = R3(chi_a) * R1(-omega_a) * R3(-psi_a) * R1(eps_0), from the Lieske
/// (1977) angles with the IAU 2000 rate corrections.
pub fn precession_2000(jd_tt: f64) -> Matrix3<f64> {
    let t = julian_centuries(jd_tt);
    let (d_psi, d_eps) = precession_rate_corrections(jd_tt);

    let psi_a = (5038.7784 + (-1.07259 - 0.001147 * t) * t) * t * ASEC2RAD + d_psi;
    let omega_a = (EPS0_1980 + (0.05127 - 0.007726 * t) * t * t) * ASEC2RAD + d_eps;
    let chi_a = (10.5526 + (-2.38064 - 0.001125 * t) * t) * t * ASEC2RAD;

    rot_z(chi_a) * rot_x(-omega_a) * rot_z(-psi_a) * rot_x(EPS0_1980 * ASEC2RAD)
}

/// Fukushima-Williams precession angles, IAU 2006, radians
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FukushimaWilliamsAngles {
    /// F-W angle gamma_bar
    pub gamma_bar: f64,
    /// F-W angle phi_bar
    pub phi_bar: f64,
    /// F-W angle psi_bar
    pub psi_bar: f64,
    /// mean obliquity of date
    pub eps_a: f64,
}

/// IAU 2006 Fukushima-Williams angles at a TT Julian date, bias included
pub fn fukushima_williams_angles(jd_tt: f64) -> FukushimaWilliamsAngles {
    let t = julian_centuries(jd_tt);

    let gamma_bar = -0.052928
        + (10.556378 + (0.4932044 + (-0.00031238 + (-0.000002788 + 0.0000000260 * t) * t) * t) * t)
            * t;
    let phi_bar = 84381.412819
        + (-46.811016 + (0.0511268 + (0.00053289 + (-0.000000440 - 0.0000000176 * t) * t) * t) * t)
            * t;
    let psi_bar = -0.041775
        + (5038.481484 + (1.5584175 + (-0.00018522 + (-0.000026452 - 0.0000000148 * t) * t) * t) * t)
            * t;

    FukushimaWilliamsAngles {
        gamma_bar: gamma_bar * ASEC2RAD,
        phi_bar: phi_bar * ASEC2RAD,
        psi_bar: psi_bar * ASEC2RAD,
        eps_a: mean_obliquity(jd_tt),
    }
}

/// Rotation from the four Fukushima-Williams angles
///
/// R = R1(-eps) * R3(-psi) * R1(phi_bar) * R3(gamma_bar). With the bare
/// angles this is bias-precession; adding the nutation to `psi` and `eps`
/// gives bias-precession-nutation.
pub fn fukushima_williams_matrix(gamma_bar: f64, phi_bar: f64, psi: f64, eps: f64) -> Matrix3<f64> {
    rot_x(-eps) * rot_z(-psi) * rot_x(phi_bar) * rot_z(gamma_bar)
}

/// IAU 2006 frame bias matrix, GCRF to mean J2000
pub fn frame_bias_2006() -> Matrix3<f64> {
    let angles = fukushima_williams_angles(J2000);
    fukushima_williams_matrix(angles.gamma_bar, angles.phi_bar, angles.psi_bar, angles.eps_a)
}

/// Precession-nutation theory behind the equinox-based frames
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Theory {
    /// IAU 2000 bias and precession, IAU 2000B nutation
    Iau2000B,
    /// IAU 2006 bias and precession, IAU 2000B nutation rescaled for 2006
    #[default]
    Iau2006,
}

impl Theory {
    /// Frame bias matrix, GCRF to mean J2000
    pub fn frame_bias(&self) -> Matrix3<f64> {
        match self {
            Theory::Iau2000B => frame_bias_2000(),
            Theory::Iau2006 => frame_bias_2006(),
        }
    }

    /// Nutation in longitude and obliquity, radians
    pub fn nutation(&self, jd_tt: f64) -> (f64, f64) {
        match self {
            Theory::Iau2000B => iau2000b_nutation(jd_tt),
            Theory::Iau2006 => iau2006_nutation(jd_tt),
        }
    }

    /// Mean obliquity of date consistent with the precession model, radians
    pub fn mean_obliquity(&self, jd_tt: f64) -> f64 {
        match self {
            Theory::Iau2000B => mean_obliquity_1980(jd_tt) + precession_rate_corrections(jd_tt).1,
            Theory::Iau2006 => mean_obliquity(jd_tt),
        }
    }

    /// Bias-precession matrix, GCRF to mean equator and equinox of date
    pub fn bias_precession(&self, jd_tt: f64) -> Matrix3<f64> {
        match self {
            Theory::Iau2000B => precession_2000(jd_tt) * frame_bias_2000(),
            Theory::Iau2006 => {
                let fw = fukushima_williams_angles(jd_tt);
                fukushima_williams_matrix(fw.gamma_bar, fw.phi_bar, fw.psi_bar, fw.eps_a)
            }
        }
    }

    /// Bias-precession-nutation matrix, GCRF to true equator and equinox of date
    ///
    /// `d_psi_offset` and `d_eps_offset` are added to the modelled nutation.
    pub fn bias_precession_nutation(
        &self,
        jd_tt: f64,
        d_psi_offset: f64,
        d_eps_offset: f64,
    ) -> Matrix3<f64> {
        let (d_psi, d_eps) = self.nutation(jd_tt);
        let (d_psi, d_eps) = (d_psi + d_psi_offset, d_eps + d_eps_offset);
        match self {
            Theory::Iau2000B => {
                build_nutation_matrix(self.mean_obliquity(jd_tt), d_psi, d_eps)
                    * self.bias_precession(jd_tt)
            }
            Theory::Iau2006 => {
                let fw = fukushima_williams_angles(jd_tt);
                fukushima_williams_matrix(fw.gamma_bar, fw.phi_bar, fw.psi_bar + d_psi, fw.eps_a + d_eps)
            }
        }
    }
}

impl fmt::Display for Theory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theory::Iau2000B => f.write_str("IAU 2000B"),
            Theory::Iau2006 => f.write_str("IAU 2006"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::MJD_OFFSET;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn assert_orthonormal(m: &Matrix3<f64>) {
        let product = m.transpose() * m;
        assert_relative_eq!(product, Matrix3::identity(), epsilon = 1e-14);
        assert_relative_eq!(m.determinant(), 1.0, epsilon = 1e-14);
    }

    fn assert_matrix_near(m: &Matrix3<f64>, expected: [[f64; 3]; 3], epsilon: f64) {
        for (i, row) in expected.iter().enumerate() {
            for (j, value) in row.iter().enumerate() {
                assert_abs_diff_eq!(m[(i, j)], *value, epsilon = epsilon);
            }
        }
    }

    #[test]
    fn test_precession_2000_at_j2000_is_identity() {
        assert_relative_eq!(precession_2000(J2000), Matrix3::identity(), epsilon = 1e-15);
    }

    #[test]
    fn test_precession_orthogonality() {
        assert_orthonormal(&precession_2000(J2000 + 3652.5));
        assert_orthonormal(&fk5_precession_matrix(J2000 + 3652.5));
        assert_orthonormal(&Theory::Iau2006.bias_precession_nutation(J2000 + 3652.5, 0.0, 0.0));
    }

    #[test]
    fn test_fk5_angles_vanish_at_j2000() {
        let angles = fk5_precession_angles(J2000);
        assert_eq!(angles.zeta, 0.0);
        assert_eq!(angles.theta, 0.0);
        assert_eq!(angles.z, 0.0);
        assert_eq!(fk5_precession_matrix(J2000), Matrix3::identity());
    }

    #[test]
    fn test_fk5_angles_one_century() {
        let angles = fk5_precession_angles(J2000 + 36525.0);
        assert_relative_eq!(angles.zeta / ASEC2RAD, 2306.2181 + 0.30188 + 0.017998, epsilon = 1e-9);
        assert_relative_eq!(angles.theta / ASEC2RAD, 2004.3109 - 0.42665 - 0.041833, epsilon = 1e-9);
        assert_relative_eq!(angles.z / ASEC2RAD, 2306.2181 + 1.09468 + 0.018203, epsilon = 1e-9);
    }

    #[test]
    fn test_fk5_and_iau2000_agree_over_decades() {
        // The IAU 2000 precession-rate correction is about 0.3 arcsec per century
        let jd = J2000 + 20.0 * 365.25;
        let diff = fk5_precession_matrix(jd) - precession_2000(jd);
        assert!(diff.amax() < 1e-6, "max difference {}", diff.amax());
        assert!(diff.amax() > 1e-8, "max difference {}", diff.amax());
    }

    #[test]
    fn test_fk5_equinox_drift() {
        // The J2000 equinox gains right ascension and declination of date
        let p = fk5_precession_matrix(J2000 + 3652.5);
        let x_date = p * nalgebra::Vector3::x();
        assert!(x_date.y > 0.0);
        assert!(x_date.z > 0.0);
    }

    #[test]
    fn test_iau2000b_matches_sofa_pnm00b() {
        // SOFA t_sofa_c reference for iauPnm00b
        let rbpn = Theory::Iau2000B.bias_precession_nutation(MJD_OFFSET + 50123.9999, 0.0, 0.0);
        assert_matrix_near(
            &rbpn,
            [
                [0.9999995832776208280, 0.8372401264429654837e-3, 0.3639691681450271771e-3],
                [-0.8372552234147137424e-3, 0.9999996486477686123, 0.4132832190946052890e-4],
                [-0.3639344385341866407e-3, -0.4163303977421522785e-4, 0.9999999329092049734],
            ],
            1e-12,
        );
    }

    #[test]
    fn test_fukushima_williams_angles_match_sofa_pfw06() {
        // SOFA t_sofa_c reference for iauPfw06
        let fw = fukushima_williams_angles(MJD_OFFSET + 50123.9999);
        assert_abs_diff_eq!(fw.gamma_bar, -0.2243387670997995690e-5, epsilon = 1e-16);
        assert_abs_diff_eq!(fw.phi_bar, 0.4091014602391312808, epsilon = 1e-12);
        assert_abs_diff_eq!(fw.psi_bar, -0.9501954178013031895e-3, epsilon = 1e-14);
        assert_abs_diff_eq!(fw.eps_a, 0.4091014316587367491, epsilon = 1e-12);
    }

    #[test]
    fn test_theories_agree_to_nutation_model_accuracy() {
        // IAU 2000 and IAU 2006 differ by well under a milliarcsecond near J2000
        let jd = MJD_OFFSET + 53736.0;
        let a = Theory::Iau2000B.bias_precession_nutation(jd, 0.0, 0.0);
        let b = Theory::Iau2006.bias_precession_nutation(jd, 0.0, 0.0);
        let diff = (a - b).amax();
        assert!(diff < 5e-9, "max difference {diff}");
        assert!(diff > 1e-12, "max difference {diff}");
    }

    #[test]
    fn test_frame_biases_are_distinct() {
        let b00 = frame_bias_2000();
        let b06 = frame_bias_2006();
        assert_orthonormal(&b00);
        assert_orthonormal(&b06);
        // Same to a few microarcseconds, but not identical
        assert!((b00 - b06).amax() < 1e-11);
        assert!((b00 - b06).amax() > 1e-13);
        assert_relative_eq!(Theory::Iau2006.bias_precession(J2000), b06, epsilon = 1e-15);
        assert_relative_eq!(Theory::Iau2000B.bias_precession(J2000), b00, epsilon = 1e-15);
    }

    #[test]
    fn test_nutation_offsets_enter_the_matrix() {
        let jd = J2000 + 7000.0;
        for theory in [Theory::Iau2000B, Theory::Iau2006] {
            let plain = theory.bias_precession_nutation(jd, 0.0, 0.0);
            let shifted = theory.bias_precession_nutation(jd, 1e-6, 0.0);
            let delta = shifted * plain.transpose();
            // A longitude shift turns about the true pole by d_psi cos(eps)
            let expected = -1e-6 * (theory.mean_obliquity(jd) + theory.nutation(jd).1).cos();
            assert_abs_diff_eq!(delta[(0, 1)], expected, epsilon = 1e-11);
        }
    }

    #[test]
    fn test_theory_display() {
        assert_eq!(Theory::Iau2000B.to_string(), "IAU 2000B");
        assert_eq!(Theory::Iau2006.to_string(), "IAU 2006");
        assert_eq!(Theory::default(), Theory::Iau2006);
    }
}
