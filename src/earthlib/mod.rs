//! Earth rotation, sidereal time, and polar motion
//!
//! Implements the Earth Rotation Angle (ERA) per IAU 2000 Resolution B1.8,
//! Greenwich Mean Sidereal Time per the IAU 1982 model (as used by SGP4/TEME),
//! the equation of the equinoxes, the celestial intermediate pole (CIP)
//! coordinates and CIO locator, and the IERS 2003 polar-motion matrix.
//!
//! Matrices follow the SOFA convention: they rotate coordinate axes, so
//! `v_child = M * v_parent`.

use nalgebra::{Matrix3, Vector3};

use crate::constants::{julian_centuries, ASEC2RAD, DAY_S, J2000, TAU};
use crate::framelib::frame_rotations::{rot_x, rot_y, rot_z};
use crate::nutationlib::{
    equation_of_the_equinoxes_complementary_terms, fundamental_arguments, iau2000b_nutation,
};
use crate::precessionlib::Theory;

/// Microarcseconds to radians
const MICRO_ASEC2RAD: f64 = ASEC2RAD * 1e-6;

/// Compute the Earth Rotation Angle (ERA) for a UT1 date
///
/// Uses the expression from IAU Resolution B1.8 of 2000.
/// Returns a fraction between 0.0 and 1.0 representing whole rotations.
///
/// # Arguments
/// * `jd_ut1` - UT1 Julian date (whole part)
/// * `fraction_ut1` - UT1 Julian date (fractional part)
pub fn earth_rotation_angle(jd_ut1: f64, fraction_ut1: f64) -> f64 {
    let th = 0.7790572732640 + 0.00273781191135448 * (jd_ut1 - J2000 + fraction_ut1);
    (th.rem_euclid(1.0) + jd_ut1.rem_euclid(1.0) + fraction_ut1).rem_euclid(1.0)
}

/// Greenwich Mean Sidereal Time, IAU 1982 model
///
/// Returns `(theta, theta_dot)`: the angle in radians within `[0, 2π)`
/// and its rate in radians per day.
///
/// # Arguments
/// * `jd_ut1` - UT1 Julian date (whole part)
/// * `frac_ut1` - UT1 Julian date (fractional part)
pub fn gmst1982(jd_ut1: f64, frac_ut1: f64) -> (f64, f64) {
    // Julian centuries from J2000 (using UT1)
    let t = (jd_ut1 - J2000 + frac_ut1) / 36525.0;

    // GMST polynomial coefficients (seconds of time)
    // From AIAA 2006-6753 / Vallado
    let g = 67310.54841 + (8640184.812866 + (0.093104 + (-6.2e-6) * t) * t) * t;

    // Time derivative of g (for velocity transformation)
    let dg = 8640184.812866 + (0.093104 * 2.0 + (-6.2e-6 * 3.0) * t) * t;

    // The fractional day contributes directly to the rotation
    let theta = (jd_ut1.rem_euclid(1.0) + frac_ut1 + g / DAY_S).rem_euclid(1.0) * TAU;

    // Angular velocity in radians/day
    let theta_dot = (1.0 + dg / (DAY_S * 36525.0)) * TAU;

    (theta, theta_dot)
}

/// Equation of the equinoxes in radians, IAU 2000B
///
/// Nutation in longitude projected on the mean equator of date, plus the
/// IERS complementary terms.
///
/// # Arguments
/// * `jd_tt` - TT Julian date
pub fn equation_of_the_equinoxes(jd_tt: f64) -> f64 {
    let (d_psi, _) = iau2000b_nutation(jd_tt);
    let eps_a = Theory::Iau2000B.mean_obliquity(jd_tt);
    d_psi * eps_a.cos() + equation_of_the_equinoxes_complementary_terms(jd_tt)
}

/// TIO locator s' in radians, IERS 2003 linear approximation
pub fn tio_locator(jd_tt: f64) -> f64 {
    -47e-6 * julian_centuries(jd_tt) * ASEC2RAD
}

/// Polar-motion matrix (TIRS to ITRS)
///
/// W = R1(-y_p) * R2(-x_p) * R3(s')
///
/// # Arguments
/// * `x_p`, `y_p` - pole coordinates in radians
/// * `s_prime` - TIO locator in radians
pub fn polar_motion_matrix(x_p: f64, y_p: f64, s_prime: f64) -> Matrix3<f64> {
    rot_x(-y_p) * rot_y(-x_p) * rot_z(s_prime)
}

/// Polar-motion matrix of the IAU 1980 theory, without the TIO locator
///
/// Maps pseudo-Earth-fixed coordinates to ITRF for the TEME chain.
pub fn polar_motion_matrix_1980(x_p: f64, y_p: f64) -> Matrix3<f64> {
    let (sx, cx) = x_p.sin_cos();
    let (sy, cy) = y_p.sin_cos();

    #[rustfmt::skip]
    let w = Matrix3::new(
        cx,  sx * sy, sx * cy,
        0.0, cy,      -sy,
        -sx, cx * sy, cx * cy,
    );

    w
}

/// Celestial intermediate pole coordinates (X, Y) in radians
///
/// Read off the bias-precession-nutation matrix of `theory`: the CIP is its
/// third row.
pub fn cip_xy(theory: Theory, jd_tt: f64) -> (f64, f64) {
    let rbpn = theory.bias_precession_nutation(jd_tt, 0.0, 0.0);
    (rbpn[(2, 0)], rbpn[(2, 1)])
}

/// One periodic term of the CIO locator series
///
/// Multipliers of (l, l', F, D, Omega, L_Ve, L_E, p_A) and sine/cosine
/// amplitudes in microarcseconds.
type CioTerm = ([i8; 8], f64, f64);

/// Polynomial coefficients and periodic terms of s + XY/2
struct CioSeries {
    polynomial: [f64; 6],
    terms: [&'static [CioTerm]; 5],
}

/// Terms independent of time
#[rustfmt::skip]
const CIO_TERMS_0: [CioTerm; 33] = [
    ([ 0,  0,  0,  0,  1,  0,  0,  0], -2640.73, 0.39),
    ([ 0,  0,  0,  0,  2,  0,  0,  0], -63.53, 0.02),
    ([ 0,  0,  2, -2,  3,  0,  0,  0], -11.75, -0.01),
    ([ 0,  0,  2, -2,  1,  0,  0,  0], -11.21, -0.01),
    ([ 0,  0,  2, -2,  2,  0,  0,  0], 4.57, 0.00),
    ([ 0,  0,  2,  0,  3,  0,  0,  0], -2.02, 0.00),
    ([ 0,  0,  2,  0,  1,  0,  0,  0], -1.98, 0.00),
    ([ 0,  0,  0,  0,  3,  0,  0,  0], 1.72, 0.00),
    ([ 0,  1,  0,  0,  1,  0,  0,  0], 1.41, 0.01),
    ([ 0,  1,  0,  0, -1,  0,  0,  0], 1.26, 0.01),
    ([ 1,  0,  0,  0, -1,  0,  0,  0], 0.63, 0.00),
    ([ 1,  0,  0,  0,  1,  0,  0,  0], 0.63, 0.00),
    ([ 0,  1,  2, -2,  3,  0,  0,  0], -0.46, 0.00),
    ([ 0,  1,  2, -2,  1,  0,  0,  0], -0.45, 0.00),
    ([ 0,  0,  4, -4,  4,  0,  0,  0], -0.36, 0.00),
    ([ 0,  0,  1, -1,  1, -8, 12,  0], 0.24, 0.12),
    ([ 0,  0,  2,  0,  0,  0,  0,  0], -0.32, 0.00),
    ([ 0,  0,  2,  0,  2,  0,  0,  0], -0.28, 0.00),
    ([ 1,  0,  2,  0,  3,  0,  0,  0], -0.27, 0.00),
    ([ 1,  0,  2,  0,  1,  0,  0,  0], -0.26, 0.00),
    ([ 0,  0,  2, -2,  0,  0,  0,  0], 0.21, 0.00),
    ([ 0,  1, -2,  2, -3,  0,  0,  0], -0.19, 0.00),
    ([ 0,  1, -2,  2, -1,  0,  0,  0], -0.18, 0.00),
    ([ 0,  0,  0,  0,  0,  8, -13, -1], 0.10, -0.05),
    ([ 0,  0,  0,  2,  0,  0,  0,  0], -0.15, 0.00),
    ([ 2,  0, -2,  0, -1,  0,  0,  0], 0.14, 0.00),
    ([ 0,  1,  2, -2,  2,  0,  0,  0], 0.14, 0.00),
    ([ 1,  0,  0, -2,  1,  0,  0,  0], -0.14, 0.00),
    ([ 1,  0,  0, -2, -1,  0,  0,  0], -0.14, 0.00),
    ([ 0,  0,  4, -2,  4,  0,  0,  0], -0.13, 0.00),
    ([ 0,  0,  2, -2,  4,  0,  0,  0], 0.11, 0.00),
    ([ 1,  0, -2,  0, -3,  0,  0,  0], -0.11, 0.00),
    ([ 1,  0, -2,  0, -1,  0,  0,  0], -0.11, 0.00),
];

/// Terms multiplied by t, IAU 2006
#[rustfmt::skip]
const CIO_TERMS_1_2006: [CioTerm; 3] = [
    ([ 0,  0,  0,  0,  2,  0,  0,  0], -0.07, 3.57),
    ([ 0,  0,  0,  0,  1,  0,  0,  0], 1.73, -0.03),
    ([ 0,  0,  2, -2,  3,  0,  0,  0], 0.00, 0.48),
];

/// Terms multiplied by t, IAU 2000
#[rustfmt::skip]
const CIO_TERMS_1_2000: [CioTerm; 3] = [
    ([ 0,  0,  0,  0,  2,  0,  0,  0], -0.07, 3.57),
    ([ 0,  0,  0,  0,  1,  0,  0,  0], 1.71, -0.03),
    ([ 0,  0,  2, -2,  3,  0,  0,  0], 0.00, 0.48),
];

/// Terms multiplied by t^2, IAU 2006
#[rustfmt::skip]
const CIO_TERMS_2_2006: [CioTerm; 25] = [
    ([ 0,  0,  0,  0,  1,  0,  0,  0], 743.52, -0.17),
    ([ 0,  0,  2, -2,  2,  0,  0,  0], 56.91, 0.06),
    ([ 0,  0,  2,  0,  2,  0,  0,  0], 9.84, -0.01),
    ([ 0,  0,  0,  0,  2,  0,  0,  0], -8.85, 0.01),
    ([ 0,  1,  0,  0,  0,  0,  0,  0], -6.38, -0.05),
    ([ 1,  0,  0,  0,  0,  0,  0,  0], -3.07, 0.00),
    ([ 0,  1,  2, -2,  2,  0,  0,  0], 2.23, 0.00),
    ([ 0,  0,  2,  0,  1,  0,  0,  0], 1.67, 0.00),
    ([ 1,  0,  2,  0,  2,  0,  0,  0], 1.30, 0.00),
    ([ 0,  1, -2,  2, -2,  0,  0,  0], 0.93, 0.00),
    ([ 1,  0,  0, -2,  0,  0,  0,  0], 0.68, 0.00),
    ([ 0,  0,  2, -2,  1,  0,  0,  0], -0.55, 0.00),
    ([ 1,  0, -2,  0, -2,  0,  0,  0], 0.53, 0.00),
    ([ 0,  0,  0,  2,  0,  0,  0,  0], -0.27, 0.00),
    ([ 1,  0,  0,  0,  1,  0,  0,  0], -0.27, 0.00),
    ([ 1,  0, -2, -2, -2,  0,  0,  0], -0.26, 0.00),
    ([ 1,  0,  0,  0, -1,  0,  0,  0], -0.25, 0.00),
    ([ 1,  0,  2,  0,  1,  0,  0,  0], 0.22, 0.00),
    ([ 2,  0,  0, -2,  0,  0,  0,  0], -0.21, 0.00),
    ([ 2,  0, -2,  0, -1,  0,  0,  0], 0.20, 0.00),
    ([ 0,  0,  2,  2,  2,  0,  0,  0], 0.17, 0.00),
    ([ 2,  0,  2,  0,  2,  0,  0,  0], 0.13, 0.00),
    ([ 2,  0,  0,  0,  0,  0,  0,  0], -0.13, 0.00),
    ([ 1,  0,  2, -2,  2,  0,  0,  0], -0.12, 0.00),
    ([ 0,  0,  2,  0,  0,  0,  0,  0], -0.11, 0.00),
];

/// Terms multiplied by t^2, IAU 2000
#[rustfmt::skip]
const CIO_TERMS_2_2000: [CioTerm; 25] = [
    ([ 0,  0,  0,  0,  1,  0,  0,  0], 743.53, -0.17),
    ([ 0,  0,  2, -2,  2,  0,  0,  0], 56.91, 0.06),
    ([ 0,  0,  2,  0,  2,  0,  0,  0], 9.84, -0.01),
    ([ 0,  0,  0,  0,  2,  0,  0,  0], -8.85, 0.01),
    ([ 0,  1,  0,  0,  0,  0,  0,  0], -6.38, -0.05),
    ([ 1,  0,  0,  0,  0,  0,  0,  0], -3.07, 0.00),
    ([ 0,  1,  2, -2,  2,  0,  0,  0], 2.23, 0.00),
    ([ 0,  0,  2,  0,  1,  0,  0,  0], 1.67, 0.00),
    ([ 1,  0,  2,  0,  2,  0,  0,  0], 1.30, 0.00),
    ([ 0,  1, -2,  2, -2,  0,  0,  0], 0.93, 0.00),
    ([ 1,  0,  0, -2,  0,  0,  0,  0], 0.68, 0.00),
    ([ 0,  0,  2, -2,  1,  0,  0,  0], -0.55, 0.00),
    ([ 1,  0, -2,  0, -2,  0,  0,  0], 0.53, 0.00),
    ([ 0,  0,  0,  2,  0,  0,  0,  0], -0.27, 0.00),
    ([ 1,  0,  0,  0,  1,  0,  0,  0], -0.27, 0.00),
    ([ 1,  0, -2, -2, -2,  0,  0,  0], -0.26, 0.00),
    ([ 1,  0,  0,  0, -1,  0,  0,  0], -0.25, 0.00),
    ([ 1,  0,  2,  0,  1,  0,  0,  0], 0.22, 0.00),
    ([ 2,  0,  0, -2,  0,  0,  0,  0], -0.21, 0.00),
    ([ 2,  0, -2,  0, -1,  0,  0,  0], 0.20, 0.00),
    ([ 0,  0,  2,  2,  2,  0,  0,  0], 0.17, 0.00),
    ([ 2,  0,  2,  0,  2,  0,  0,  0], 0.13, 0.00),
    ([ 2,  0,  0,  0,  0,  0,  0,  0], -0.13, 0.00),
    ([ 1,  0,  2, -2,  2,  0,  0,  0], -0.12, 0.00),
    ([ 0,  0,  2,  0,  0,  0,  0,  0], -0.11, 0.00),
];

/// Terms multiplied by t^3, IAU 2006
#[rustfmt::skip]
const CIO_TERMS_3_2006: [CioTerm; 4] = [
    ([ 0,  0,  0,  0,  1,  0,  0,  0], 0.30, -23.42),
    ([ 0,  0,  2, -2,  2,  0,  0,  0], -0.03, -1.46),
    ([ 0,  0,  2,  0,  2,  0,  0,  0], -0.01, -0.25),
    ([ 0,  0,  0,  0,  2,  0,  0,  0], 0.00, 0.23),
];

/// Terms multiplied by t^3, IAU 2000
#[rustfmt::skip]
const CIO_TERMS_3_2000: [CioTerm; 4] = [
    ([ 0,  0,  0,  0,  1,  0,  0,  0], 0.30, -23.51),
    ([ 0,  0,  2, -2,  2,  0,  0,  0], -0.03, -1.39),
    ([ 0,  0,  2,  0,  2,  0,  0,  0], -0.01, -0.24),
    ([ 0,  0,  0,  0,  2,  0,  0,  0], 0.00, 0.22),
];

/// Terms multiplied by t^4
#[rustfmt::skip]
const CIO_TERMS_4: [CioTerm; 1] = [
    ([ 0,  0,  0,  0,  1,  0,  0,  0], -0.26, -0.01),
];

/// IERS Conventions 2003, Table 5.2c, as revised for IAU 2006
const CIO_SERIES_2006: CioSeries = CioSeries {
    polynomial: [94.00, 3808.65, -122.68, -72574.11, 27.98, 15.62],
    terms: [&CIO_TERMS_0, &CIO_TERMS_1_2006, &CIO_TERMS_2_2006, &CIO_TERMS_3_2006, &CIO_TERMS_4],
};

/// IERS Conventions 2003, Table 5.2c
const CIO_SERIES_2000: CioSeries = CioSeries {
    polynomial: [94.00, 3808.35, -119.94, -72574.09, 27.70, 15.61],
    terms: [&CIO_TERMS_0, &CIO_TERMS_1_2000, &CIO_TERMS_2_2000, &CIO_TERMS_3_2000, &CIO_TERMS_4],
};

fn sum_cio_terms(terms: &[CioTerm], fa: &[f64; 8]) -> f64 {
    terms
        .iter()
        .rev()
        .map(|(multipliers, sin_amp, cos_amp)| {
            let arg: f64 = multipliers
                .iter()
                .zip(fa.iter())
                .map(|(&n, &a)| n as f64 * a)
                .sum();
            sin_amp * arg.sin() + cos_amp * arg.cos()
        })
        .sum()
}

/// CIO locator s in radians, given the CIP coordinates at the same date
///
/// Full series of the IERS Conventions for the chosen theory.
pub fn cio_locator(theory: Theory, jd_tt: f64, x: f64, y: f64) -> f64 {
    let series = match theory {
        Theory::Iau2000B => &CIO_SERIES_2000,
        Theory::Iau2006 => &CIO_SERIES_2006,
    };
    let t = julian_centuries(jd_tt);
    let fa = fundamental_arguments(t);

    let mut w = series.polynomial;
    for (coefficient, terms) in w.iter_mut().zip(series.terms.iter()) {
        *coefficient += sum_cio_terms(terms, &fa);
    }

    let s_plus_xy_half = w[0] + (w[1] + (w[2] + (w[3] + (w[4] + w[5] * t) * t) * t) * t) * t;
    s_plus_xy_half * MICRO_ASEC2RAD - x * y / 2.0
}

/// Celestial-to-intermediate matrix (GCRS to CIRS) from X, Y and s
///
/// Q = R3(-(E + s)) * R2(d) * R3(E), with E and d the spherical angles of the CIP.
pub fn celestial_to_intermediate_matrix(x: f64, y: f64, s: f64) -> Matrix3<f64> {
    let r2 = x * x + y * y;
    let e = if r2 > 0.0 { y.atan2(x) } else { 0.0 };
    let d = (r2 / (1.0 - r2)).sqrt().atan();
    rot_z(-(e + s)) * rot_y(d) * rot_z(e)
}

/// Earth angular velocity in the terrestrial intermediate frame, rad/s
///
/// # Arguments
/// * `length_of_day_ms` - excess length of day in milliseconds
pub fn earth_angular_velocity(length_of_day_ms: f64) -> Vector3<f64> {
    Vector3::new(0.0, 0.0, (72921151.467064 - 0.843994809 * length_of_day_ms) * 1e-12)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{EARTH_ROTATION_RATE, MJD_OFFSET};
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_era_at_j2000() {
        let era = earth_rotation_angle(J2000, 0.0);
        assert_relative_eq!(era, 0.7790572732640, epsilon = 1e-10);
    }

    #[test]
    fn test_era_range() {
        for offset in &[-1000.0, -100.0, 0.0, 100.0, 1000.0] {
            let era = earth_rotation_angle(J2000 + offset, 0.0);
            assert!(
                (0.0..1.0).contains(&era),
                "ERA out of range for offset {offset}: {era}"
            );
        }
    }

    #[test]
    fn test_era_matches_sofa() {
        // SOFA t_sofa_c reference for iauEra00
        let era = earth_rotation_angle(MJD_OFFSET, 54388.0) * TAU;
        assert_abs_diff_eq!(era, 0.4022837240028158102, epsilon = 1e-11);
    }

    #[test]
    fn test_gmst1982_matches_sofa() {
        // SOFA t_sofa_c reference for iauGmst82
        let (theta, _) = gmst1982(MJD_OFFSET, 53736.0);
        assert_abs_diff_eq!(theta, 1.754174981860675096, epsilon = 1e-10);
    }

    #[test]
    fn test_gmst1982_split_invariance() {
        let (a, _) = gmst1982(J2000 + 1234.0, 0.37);
        let (b, _) = gmst1982(J2000, 1234.37);
        assert_abs_diff_eq!(a, b, epsilon = 1e-9);
    }

    #[test]
    fn test_gmst1982_rate() {
        let (_, theta_dot) = gmst1982(J2000, 0.0);
        assert_relative_eq!(theta_dot / DAY_S, EARTH_ROTATION_RATE, max_relative = 1e-6);
    }

    #[test]
    fn test_equation_of_the_equinoxes_bounded() {
        // |Δψ cos ε| never exceeds about 1.2 seconds of time
        for offset in [-3000.0, 0.0, 1500.0, 9000.0] {
            let eqeq = equation_of_the_equinoxes(J2000 + offset);
            assert!(eqeq.abs() < 18.0 * ASEC2RAD, "eqeq = {eqeq}");
        }
    }

    #[test]
    fn test_tio_locator_matches_sofa() {
        // SOFA t_sofa_c reference for iauSp00
        let sp = tio_locator(MJD_OFFSET + 52541.0);
        assert_abs_diff_eq!(sp, -0.6216698469981019309e-11, epsilon = 1e-18);
    }

    #[test]
    fn test_polar_motion_matrix_matches_sofa() {
        // SOFA t_sofa_c reference for iauPom00
        let w = polar_motion_matrix(2.55060238e-7, 1.860359247e-6, -0.1367174580728891460e-10);
        assert_abs_diff_eq!(w[(0, 0)], 0.9999999999999674721, epsilon = 1e-12);
        assert_abs_diff_eq!(w[(0, 1)], -0.1367174580728846989e-10, epsilon = 1e-16);
        assert_abs_diff_eq!(w[(0, 2)], 0.2550602379999972345e-6, epsilon = 1e-16);
        assert_abs_diff_eq!(w[(1, 0)], 0.1414624947957029801e-10, epsilon = 1e-16);
        assert_abs_diff_eq!(w[(1, 2)], -0.1860359246998866389e-5, epsilon = 1e-16);
        assert_abs_diff_eq!(w[(2, 0)], -0.2550602379741215021e-6, epsilon = 1e-16);
        assert_abs_diff_eq!(w[(2, 1)], 0.1860359247002414021e-5, epsilon = 1e-16);
    }

    #[test]
    fn test_polar_motion_1980_agrees_for_small_angles() {
        let (xp, yp) = (0.2 * ASEC2RAD, 0.35 * ASEC2RAD);
        let w80 = polar_motion_matrix_1980(xp, yp);
        let w = polar_motion_matrix(xp, yp, 0.0);
        assert_relative_eq!(w80, w, epsilon = 1e-11);
    }

    #[test]
    fn test_cip_xy_matches_sofa_xys00b() {
        // SOFA t_sofa_c reference for iauXys00b
        let jd = MJD_OFFSET + 53736.0;
        let (x, y) = cip_xy(Theory::Iau2000B, jd);
        assert_abs_diff_eq!(x, 0.5791301929950208873e-3, epsilon = 1e-14);
        assert_abs_diff_eq!(y, 0.4020553681373720832e-4, epsilon = 1e-14);
        let s = cio_locator(Theory::Iau2000B, jd, x, y);
        assert_abs_diff_eq!(s, -0.1220027377285083189e-7, epsilon = 1e-18);
    }

    #[test]
    fn test_cip_xy_2006_within_nutation_model_accuracy() {
        // SOFA t_sofa_c reference for iauXy06; the IAU 2000B series stays
        // within a milliarcsecond of the 2000A pole used there
        let (x, y) = cip_xy(Theory::Iau2006, MJD_OFFSET + 53736.0);
        assert_abs_diff_eq!(x, 0.5791308482835292617e-3, epsilon = 1e-9);
        assert_abs_diff_eq!(y, 0.4020580099454020310e-4, epsilon = 1e-9);
    }

    #[test]
    fn test_cio_locator_matches_sofa() {
        // SOFA t_sofa_c references for iauS06 and iauS00
        let (jd, x, y) = (MJD_OFFSET + 53736.0, 0.5791308486706011000e-3, 0.4020579816732961219e-4);
        let s06 = cio_locator(Theory::Iau2006, jd, x, y);
        assert_abs_diff_eq!(s06, -0.1220032213076463117e-7, epsilon = 1e-18);
        let s00 = cio_locator(Theory::Iau2000B, jd, x, y);
        assert_abs_diff_eq!(s00, -0.1220036263270905693e-7, epsilon = 1e-18);
    }

    #[test]
    fn test_equation_of_the_equinoxes_matches_sofa_ee00b() {
        // SOFA t_sofa_c reference for iauEe00b
        let eqeq = equation_of_the_equinoxes(MJD_OFFSET + 53736.0);
        assert_abs_diff_eq!(eqeq, -0.8835700060003032831e-5, epsilon = 1e-15);
    }

    #[test]
    fn test_celestial_to_terrestrial_matches_sofa_c2t00b() {
        // SOFA t_sofa_c reference for iauC2t00b, with TT and UT1 both at
        // MJD 53736.0 and no TIO locator
        let jd = MJD_OFFSET + 53736.0;
        let (x, y) = cip_xy(Theory::Iau2000B, jd);
        let s = cio_locator(Theory::Iau2000B, jd, x, y);
        let era = earth_rotation_angle(MJD_OFFSET, 53736.0) * TAU;
        let rc2t = polar_motion_matrix(2.55060238e-7, 1.860359247e-6, 0.0)
            * rot_z(era)
            * celestial_to_intermediate_matrix(x, y, s);

        #[rustfmt::skip]
        let expected = Matrix3::new(
            -0.1810332128439678965, 0.9834769806913872359, 0.6555565082458415611e-4,
            -0.9834768134115435923, -0.1810332203784001946, 0.5749793922030017230e-3,
            0.5773467471863534901e-3, 0.3961790411549945020e-4, 0.9999998325505635738,
        );
        assert_relative_eq!(rc2t, expected, epsilon = 1e-12);
    }

    #[test]
    fn test_celestial_to_intermediate_maps_cip_to_pole() {
        let (x, y) = (0.5791308486706011000e-3, 0.4020579816732961219e-4);
        let q = celestial_to_intermediate_matrix(x, y, -0.1220040848472271978e-7);
        let z = (1.0 - x * x - y * y).sqrt();

        assert_relative_eq!(q * Vector3::new(x, y, z), Vector3::z(), epsilon = 1e-15);
        assert_abs_diff_eq!(q[(0, 0)], 0.9999998323037157138, epsilon = 1e-12);
        assert_abs_diff_eq!(q[(1, 1)], 0.9999999991917468964, epsilon = 1e-12);
        assert_relative_eq!(q.transpose() * q, Matrix3::identity(), epsilon = 1e-15);
    }

    #[test]
    fn test_celestial_to_intermediate_at_pole() {
        assert_relative_eq!(
            celestial_to_intermediate_matrix(0.0, 0.0, 0.0),
            Matrix3::identity(),
            epsilon = 1e-15
        );
    }

    #[test]
    fn test_earth_angular_velocity() {
        let w = earth_angular_velocity(0.0);
        assert_relative_eq!(w.z, EARTH_ROTATION_RATE, epsilon = 1e-18);
        assert!(earth_angular_velocity(2.0).z < w.z);
        assert_eq!(w.x, 0.0);
        assert_eq!(w.y, 0.0);
    }
}
