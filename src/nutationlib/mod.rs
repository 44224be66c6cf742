//! Nutation computations based on the IAU 2000B model
//!
//! Implements nutation in longitude (delta-psi) and obliquity (delta-epsilon),
//! with its IAU 2006 rescaling, mean obliquity of the ecliptic (IAU 1980 and
//! IAU 2006), the nutation rotation matrix, and the complementary terms of
//! the equation of equinoxes.

use crate::constants::{ASEC2RAD, J2000, TAU};
use nalgebra::Matrix3;

/// Conversion factor from 0.1 microarcsecond to radians
const TENTH_USEC_2_RAD: f64 = ASEC2RAD / 1e7;

/// Fundamental argument polynomial coefficients
///
/// Each row: [constant, t^1, t^2, t^3, t^4] in arcseconds
/// From IERS Conventions (2003), Chapter 5
#[rustfmt::skip]
const FA_COEFFS: [[f64; 5]; 5] = [
    // Mean Anomaly of the Moon (l)
    [485868.249036, 1717915923.2178, 31.8792, 0.051635, -0.00024470],
    // Mean Anomaly of the Sun (l')
    [1287104.793048, 129596581.0481, -0.5532, 0.000136, -0.00001149],
    // Mean Longitude of Moon - Ascending Node (F)
    [335779.526232, 1739527262.8478, -12.7512, -0.001037, 0.00000417],
    // Mean Elongation of Moon from Sun (D)
    [1072260.703692, 1602961601.2090, -6.3706, 0.006593, -0.00003169],
    // Mean Longitude of Ascending Node of Moon (Omega)
    [450160.398036, -6962890.5431, 7.4722, 0.007702, -0.00005939],
];

/// Compute the fundamental arguments in radians
///
/// The five Delaunay variables (l, l', F, D, Omega), then the mean
/// longitudes of Venus and the Earth and the general accumulated
/// precession in longitude. Each is reduced modulo a full turn, keeping its
/// sign; callers reduce the combined argument.
///
/// # Arguments
/// * `t` - TDB/TT time in Julian centuries since J2000.0
pub fn fundamental_arguments(t: f64) -> [f64; 8] {
    let mut fa = [0.0f64; 8];
    for (i, coeffs) in FA_COEFFS.iter().enumerate() {
        let val = coeffs[0] + (coeffs[1] + (coeffs[2] + (coeffs[3] + coeffs[4] * t) * t) * t) * t;
        fa[i] = (val % ASEC_PER_TURN) * ASEC2RAD;
    }
    fa[5] = (3.176146697 + 1021.3285546211 * t) % TAU;
    fa[6] = (1.753470314 + 628.3075849991 * t) % TAU;
    fa[7] = (0.024381750 + 0.00000538691 * t) * t;
    fa
}

/// Arcseconds in a full turn
const ASEC_PER_TURN: f64 = 1_296_000.0;

/// Delaunay arguments of the IAU 2000B series, linear in time (Simon et al. 1994)
fn iau2000b_delaunay_arguments(t: f64) -> [f64; 5] {
    [
        485868.249036 + 1717915923.2178 * t,
        1287104.79305 + 129596581.0481 * t,
        335779.526232 + 1739527262.8478 * t,
        1072260.70369 + 1602961601.2090 * t,
        450160.398036 - 6962890.5431 * t,
    ]
    .map(|arcsec| (arcsec % ASEC_PER_TURN) * ASEC2RAD)
}

/// Lunisolar terms of IAU 2000B (McCarthy & Luzum 2003), largest first
///
/// Each row: multipliers of (l, l', F, D, Omega), then longitude
/// coefficients (sin, sin * t, cos) and obliquity coefficients
/// (cos, cos * t, sin), in units of 0.1 microarcsecond.
#[rustfmt::skip]
const LUNISOLAR_TERMS: [([i8; 5], [f64; 3], [f64; 3]); 77] = [
    ([ 0,  0,  0,  0,  1], [-172064161.0,    -174666.0,      33386.0], [ 92052331.0,      9086.0,     15377.0]),
    ([ 0,  0,  2, -2,  2], [ -13170906.0,      -1675.0,     -13696.0], [  5730336.0,     -3015.0,     -4587.0]),
    ([ 0,  0,  2,  0,  2], [  -2276413.0,       -234.0,       2796.0], [   978459.0,      -485.0,      1374.0]),
    ([ 0,  0,  0,  0,  2], [   2074554.0,        207.0,       -698.0], [  -897492.0,       470.0,      -291.0]),
    ([ 0,  1,  0,  0,  0], [   1475877.0,      -3633.0,      11817.0], [    73871.0,      -184.0,     -1924.0]),
    ([ 0,  1,  2, -2,  2], [   -516821.0,       1226.0,       -524.0], [   224386.0,      -677.0,      -174.0]),
    ([ 1,  0,  0,  0,  0], [    711159.0,         73.0,       -872.0], [    -6750.0,         0.0,       358.0]),
    ([ 0,  0,  2,  0,  1], [   -387298.0,       -367.0,        380.0], [   200728.0,        18.0,       318.0]),
    ([ 1,  0,  2,  0,  2], [   -301461.0,        -36.0,        816.0], [   129025.0,       -63.0,       367.0]),
    ([ 0, -1,  2, -2,  2], [    215829.0,       -494.0,        111.0], [   -95929.0,       299.0,       132.0]),
    ([ 0,  0,  2, -2,  1], [    128227.0,        137.0,        181.0], [   -68982.0,        -9.0,        39.0]),
    ([-1,  0,  2,  0,  2], [    123457.0,         11.0,         19.0], [   -53311.0,        32.0,        -4.0]),
    ([-1,  0,  0,  2,  0], [    156994.0,         10.0,       -168.0], [    -1235.0,         0.0,        82.0]),
    ([ 1,  0,  0,  0,  1], [     63110.0,         63.0,         27.0], [   -33228.0,         0.0,        -9.0]),
    ([-1,  0,  0,  0,  1], [    -57976.0,        -63.0,       -189.0], [    31429.0,         0.0,       -75.0]),
    ([-1,  0,  2,  2,  2], [    -59641.0,        -11.0,        149.0], [    25543.0,       -11.0,        66.0]),
    ([ 1,  0,  2,  0,  1], [    -51613.0,        -42.0,        129.0], [    26366.0,         0.0,        78.0]),
    ([-2,  0,  2,  0,  1], [     45893.0,         50.0,         31.0], [   -24236.0,       -10.0,        20.0]),
    ([ 0,  0,  0,  2,  0], [     63384.0,         11.0,       -150.0], [    -1220.0,         0.0,        29.0]),
    ([ 0,  0,  2,  2,  2], [    -38571.0,         -1.0,        158.0], [    16452.0,       -11.0,        68.0]),
    ([ 0, -2,  2, -2,  2], [     32481.0,          0.0,          0.0], [   -13870.0,         0.0,         0.0]),
    ([-2,  0,  0,  2,  0], [    -47722.0,          0.0,        -18.0], [      477.0,         0.0,       -25.0]),
    ([ 2,  0,  2,  0,  2], [    -31046.0,         -1.0,        131.0], [    13238.0,       -11.0,        59.0]),
    ([ 1,  0,  2, -2,  2], [     28593.0,          0.0,         -1.0], [   -12338.0,        10.0,        -3.0]),
    ([-1,  0,  2,  0,  1], [     20441.0,         21.0,         10.0], [   -10758.0,         0.0,        -3.0]),
    ([ 2,  0,  0,  0,  0], [     29243.0,          0.0,        -74.0], [     -609.0,         0.0,        13.0]),
    ([ 0,  0,  2,  0,  0], [     25887.0,          0.0,        -66.0], [     -550.0,         0.0,        11.0]),
    ([ 0,  1,  0,  0,  1], [    -14053.0,        -25.0,         79.0], [     8551.0,        -2.0,       -45.0]),
    ([-1,  0,  0,  2,  1], [     15164.0,         10.0,         11.0], [    -8001.0,         0.0,        -1.0]),
    ([ 0,  2,  2, -2,  2], [    -15794.0,         72.0,        -16.0], [     6850.0,       -42.0,        -5.0]),
    ([ 0,  0, -2,  2,  0], [     21783.0,          0.0,         13.0], [     -167.0,         0.0,        13.0]),
    ([ 1,  0,  0, -2,  1], [    -12873.0,        -10.0,        -37.0], [     6953.0,         0.0,       -14.0]),
    ([ 0, -1,  0,  0,  1], [    -12654.0,         11.0,         63.0], [     6415.0,         0.0,        26.0]),
    ([-1,  0,  2,  2,  1], [    -10204.0,          0.0,         25.0], [     5222.0,         0.0,        15.0]),
    ([ 0,  2,  0,  0,  0], [     16707.0,        -85.0,        -10.0], [      168.0,        -1.0,        10.0]),
    ([ 1,  0,  2,  2,  2], [     -7691.0,          0.0,         44.0], [     3268.0,         0.0,        19.0]),
    ([-2,  0,  2,  0,  0], [    -11024.0,          0.0,        -14.0], [      104.0,         0.0,         2.0]),
    ([ 0,  1,  2,  0,  2], [      7566.0,        -21.0,        -11.0], [    -3250.0,         0.0,        -5.0]),
    ([ 0,  0,  2,  2,  1], [     -6637.0,        -11.0,         25.0], [     3353.0,         0.0,        14.0]),
    ([ 0, -1,  2,  0,  2], [     -7141.0,         21.0,          8.0], [     3070.0,         0.0,         4.0]),
    ([ 0,  0,  0,  2,  1], [     -6302.0,        -11.0,          2.0], [     3272.0,         0.0,         4.0]),
    ([ 1,  0,  2, -2,  1], [      5800.0,         10.0,          2.0], [    -3045.0,         0.0,        -1.0]),
    ([ 2,  0,  2, -2,  2], [      6443.0,          0.0,         -7.0], [    -2768.0,         0.0,        -4.0]),
    ([-2,  0,  0,  2,  1], [     -5774.0,        -11.0,        -15.0], [     3041.0,         0.0,        -5.0]),
    ([ 2,  0,  2,  0,  1], [     -5350.0,          0.0,         21.0], [     2695.0,         0.0,        12.0]),
    ([ 0, -1,  2, -2,  1], [     -4752.0,        -11.0,         -3.0], [     2719.0,         0.0,        -3.0]),
    ([ 0,  0,  0, -2,  1], [     -4940.0,        -11.0,        -21.0], [     2720.0,         0.0,        -9.0]),
    ([-1, -1,  0,  2,  0], [      7350.0,          0.0,         -8.0], [      -51.0,         0.0,         4.0]),
    ([ 2,  0,  0, -2,  1], [      4065.0,          0.0,          6.0], [    -2206.0,         0.0,         1.0]),
    ([ 1,  0,  0,  2,  0], [      6579.0,          0.0,        -24.0], [     -199.0,         0.0,         2.0]),
    ([ 0,  1,  2, -2,  1], [      3579.0,          0.0,          5.0], [    -1900.0,         0.0,         1.0]),
    ([ 1, -1,  0,  0,  0], [      4725.0,          0.0,         -6.0], [      -41.0,         0.0,         3.0]),
    ([-2,  0,  2,  0,  2], [     -3075.0,          0.0,         -2.0], [     1313.0,         0.0,        -1.0]),
    ([ 3,  0,  2,  0,  2], [     -2904.0,          0.0,         15.0], [     1233.0,         0.0,         7.0]),
    ([ 0, -1,  0,  2,  0], [      4348.0,          0.0,        -10.0], [      -81.0,         0.0,         2.0]),
    ([ 1, -1,  2,  0,  2], [     -2878.0,          0.0,          8.0], [     1232.0,         0.0,         4.0]),
    ([ 0,  0,  0,  1,  0], [     -4230.0,          0.0,          5.0], [      -20.0,         0.0,        -2.0]),
    ([-1, -1,  2,  2,  2], [     -2819.0,          0.0,          7.0], [     1207.0,         0.0,         3.0]),
    ([-1,  0,  2,  0,  0], [     -4056.0,          0.0,          5.0], [       40.0,         0.0,        -2.0]),
    ([ 0, -1,  2,  2,  2], [     -2647.0,          0.0,         11.0], [     1129.0,         0.0,         5.0]),
    ([-2,  0,  0,  0,  1], [     -2294.0,          0.0,        -10.0], [     1266.0,         0.0,        -4.0]),
    ([ 1,  1,  2,  0,  2], [      2481.0,          0.0,         -7.0], [    -1062.0,         0.0,        -3.0]),
    ([ 2,  0,  0,  0,  1], [      2179.0,          0.0,         -2.0], [    -1129.0,         0.0,        -2.0]),
    ([-1,  1,  0,  1,  0], [      3276.0,          0.0,          1.0], [       -9.0,         0.0,         0.0]),
    ([ 1,  1,  0,  0,  0], [     -3389.0,          0.0,          5.0], [       35.0,         0.0,        -2.0]),
    ([ 1,  0,  2,  0,  0], [      3339.0,          0.0,        -13.0], [     -107.0,         0.0,         1.0]),
    ([-1,  0,  2, -2,  1], [     -1987.0,          0.0,         -6.0], [     1073.0,         0.0,        -2.0]),
    ([ 1,  0,  0,  0,  2], [     -1981.0,          0.0,          0.0], [      854.0,         0.0,         0.0]),
    ([-1,  0,  0,  1,  0], [      4026.0,          0.0,       -353.0], [     -553.0,         0.0,      -139.0]),
    ([ 0,  0,  2,  1,  2], [      1660.0,          0.0,         -5.0], [     -710.0,         0.0,        -2.0]),
    ([-1,  0,  2,  4,  2], [     -1521.0,          0.0,          9.0], [      647.0,         0.0,         4.0]),
    ([-1,  1,  0,  1,  1], [      1314.0,          0.0,          0.0], [     -700.0,         0.0,         0.0]),
    ([ 0, -2,  2, -2,  1], [     -1283.0,          0.0,          0.0], [      672.0,         0.0,         0.0]),
    ([ 1,  0,  2,  2,  1], [     -1331.0,          0.0,          8.0], [      663.0,         0.0,         4.0]),
    ([-2,  0,  2,  2,  2], [      1383.0,          0.0,         -2.0], [     -594.0,         0.0,        -2.0]),
    ([-1,  0,  0,  0,  2], [      1405.0,          0.0,          4.0], [     -610.0,         0.0,         2.0]),
    ([ 1,  1,  2, -2,  2], [      1290.0,          0.0,          0.0], [     -556.0,         0.0,         0.0]),
];

/// Fixed offsets standing in for the planetary terms (IAU 2000B), arcseconds
const PLANETARY_D_PSI: f64 = -0.135e-3;
const PLANETARY_D_EPS: f64 = 0.388e-3;

/// Compute nutation angles (delta-psi, delta-epsilon) in radians
///
/// IAU 2000B model: all 77 lunisolar terms plus the fixed planetary
/// offsets. Agrees with IAU 2000A to 1 milliarcsecond over 1995-2050.
///
/// # Arguments
/// * `tt_jd` - TT Julian date
///
/// # Returns
/// * `(d_psi, d_eps)` - nutation in longitude and obliquity, in radians
pub fn iau2000b_nutation(tt_jd: f64) -> (f64, f64) {
    let t = (tt_jd - J2000) / 36525.0;
    let fa = iau2000b_delaunay_arguments(t);

    let mut d_psi = 0.0;
    let mut d_eps = 0.0;

    // Sum smallest terms first
    for (multipliers, longitude, obliquity) in LUNISOLAR_TERMS.iter().rev() {
        let arg = multipliers
            .iter()
            .zip(fa.iter())
            .map(|(&n, &a)| n as f64 * a)
            .sum::<f64>()
            % TAU;
        let (sin_arg, cos_arg) = arg.sin_cos();

        d_psi += (longitude[0] + longitude[1] * t) * sin_arg + longitude[2] * cos_arg;
        d_eps += (obliquity[0] + obliquity[1] * t) * cos_arg + obliquity[2] * sin_arg;
    }

    (
        d_psi * TENTH_USEC_2_RAD + PLANETARY_D_PSI * ASEC2RAD,
        d_eps * TENTH_USEC_2_RAD + PLANETARY_D_EPS * ASEC2RAD,
    )
}

/// IAU 2000B nutation rescaled for use with the IAU 2006 precession
///
/// Applies the P03 adjustments for the J2 secular rate and the 2006
/// obliquity (Wallace & Capitaine 2006).
///
/// # Arguments
/// * `tt_jd` - TT Julian date
pub fn iau2006_nutation(tt_jd: f64) -> (f64, f64) {
    let t = (tt_jd - J2000) / 36525.0;
    let fj2 = -2.7774e-6 * t;
    let (d_psi, d_eps) = iau2000b_nutation(tt_jd);
    (d_psi * (1.0 + 0.4697e-6 + fj2), d_eps * (1.0 + fj2))
}

/// Compute the mean obliquity of the ecliptic in radians
///
/// From Capitaine et al. (2003), Astronomy and Astrophysics 412, 567-586.
/// This is the IAU 2006 value.
///
/// # Arguments
/// * `jd_tdb` - TDB Julian date
pub fn mean_obliquity(jd_tdb: f64) -> f64 {
    let t = (jd_tdb - J2000) / 36525.0;

    let epsilon = ((((-0.0000000434 * t - 0.000000576) * t + 0.00200340) * t - 0.0001831) * t
        - 46.836769)
        * t
        + 84381.406;

    epsilon * ASEC2RAD
}

/// Mean obliquity of the ecliptic, IAU 1980 model, in radians
pub fn mean_obliquity_1980(jd_tt: f64) -> f64 {
    let t = (jd_tt - J2000) / 36525.0;
    (84381.448 + (-46.8150 + (-0.00059 + 0.001813 * t) * t) * t) * ASEC2RAD
}

/// Build the nutation rotation matrix
///
/// Built from the mean obliquity, the true obliquity
/// and the nutation in longitude (d_psi), all as positive angles.
///
/// # Arguments
/// * `mean_obliquity_rad` - mean obliquity of ecliptic in radians
/// * `d_psi` - nutation in longitude in radians
/// * `d_eps` - nutation in obliquity in radians
pub fn build_nutation_matrix(mean_obliquity_rad: f64, d_psi: f64, d_eps: f64) -> Matrix3<f64> {
    let eps_mean = mean_obliquity_rad;
    let eps_true = eps_mean + d_eps;

    let (sobm, cobm) = eps_mean.sin_cos();
    let (sobt, cobt) = eps_true.sin_cos();
    let (spsi, cpsi) = d_psi.sin_cos();

    #[rustfmt::skip]
    let n = Matrix3::new(
        cpsi,          -spsi * cobm,                      -spsi * sobm,
        spsi * cobt,    cpsi * cobm * cobt + sobm * sobt,  cpsi * sobm * cobt - cobm * sobt,
        spsi * sobt,    cpsi * cobm * sobt - sobm * cobt,  cpsi * sobm * sobt + cobm * cobt,
    );

    n
}

/// Number of complementary terms for equation of equinoxes
const N_EQEQ_TERMS: usize = 33;

/// Complementary terms argument multipliers (14 fundamental arguments each)
#[rustfmt::skip]
const KE0: [[i32; 14]; N_EQEQ_TERMS] = [
    [  0,   0,   0,   0,   1,   0,   0,   0,   0,   0,   0,   0,   0,   0],
    [  0,   0,   0,   0,   2,   0,   0,   0,   0,   0,   0,   0,   0,   0],
    [  0,   0,   2,  -2,   3,   0,   0,   0,   0,   0,   0,   0,   0,   0],
    [  0,   0,   2,  -2,   1,   0,   0,   0,   0,   0,   0,   0,   0,   0],
    [  0,   0,   2,  -2,   2,   0,   0,   0,   0,   0,   0,   0,   0,   0],
    [  0,   0,   2,   0,   3,   0,   0,   0,   0,   0,   0,   0,   0,   0],
    [  0,   0,   2,   0,   1,   0,   0,   0,   0,   0,   0,   0,   0,   0],
    [  0,   0,   0,   0,   3,   0,   0,   0,   0,   0,   0,   0,   0,   0],
    [  0,   1,   0,   0,   1,   0,   0,   0,   0,   0,   0,   0,   0,   0],
    [  0,   1,   0,   0,  -1,   0,   0,   0,   0,   0,   0,   0,   0,   0],
    [  1,   0,   0,   0,  -1,   0,   0,   0,   0,   0,   0,   0,   0,   0],
    [  1,   0,   0,   0,   1,   0,   0,   0,   0,   0,   0,   0,   0,   0],
    [  0,   1,   2,  -2,   3,   0,   0,   0,   0,   0,   0,   0,   0,   0],
    [  0,   1,   2,  -2,   1,   0,   0,   0,   0,   0,   0,   0,   0,   0],
    [  0,   0,   4,  -4,   4,   0,   0,   0,   0,   0,   0,   0,   0,   0],
    [  0,   0,   1,  -1,   1,   0,  -8,  12,   0,   0,   0,   0,   0,   0],
    [  0,   0,   2,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0],
    [  0,   0,   2,   0,   2,   0,   0,   0,   0,   0,   0,   0,   0,   0],
    [  1,   0,   2,   0,   3,   0,   0,   0,   0,   0,   0,   0,   0,   0],
    [  1,   0,   2,   0,   1,   0,   0,   0,   0,   0,   0,   0,   0,   0],
    [  0,   0,   2,  -2,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0],
    [  0,   1,  -2,   2,  -3,   0,   0,   0,   0,   0,   0,   0,   0,   0],
    [  0,   1,  -2,   2,  -1,   0,   0,   0,   0,   0,   0,   0,   0,   0],
    [  0,   0,   0,   0,   0,   0,   8, -13,   0,   0,   0,   0,   0,  -1],
    [  0,   0,   0,   2,   0,   0,   0,   0,   0,   0,   0,   0,   0,   0],
    [  2,   0,  -2,   0,  -1,   0,   0,   0,   0,   0,   0,   0,   0,   0],
    [  1,   0,   0,  -2,   1,   0,   0,   0,   0,   0,   0,   0,   0,   0],
    [  0,   1,   2,  -2,   2,   0,   0,   0,   0,   0,   0,   0,   0,   0],
    [  1,   0,   0,  -2,  -1,   0,   0,   0,   0,   0,   0,   0,   0,   0],
    [  0,   0,   4,  -2,   4,   0,   0,   0,   0,   0,   0,   0,   0,   0],
    [  0,   0,   2,  -2,   4,   0,   0,   0,   0,   0,   0,   0,   0,   0],
    [  1,   0,  -2,   0,  -3,   0,   0,   0,   0,   0,   0,   0,   0,   0],
    [  1,   0,  -2,   0,  -1,   0,   0,   0,   0,   0,   0,   0,   0,   0],
];

/// Complementary terms sine coefficients (arcseconds)
#[rustfmt::skip]
const SE0_SIN: [f64; N_EQEQ_TERMS] = [
    2.640960e-03, 6.352000e-05, 1.175000e-05, 1.121000e-05, -4.550000e-06,
    2.020000e-06, 1.980000e-06, -1.720000e-06, -1.410000e-06, -1.260000e-06,
    -6.300000e-07, -6.300000e-07, 4.600000e-07, 4.500000e-07, 3.600000e-07,
    -2.400000e-07, 3.200000e-07, 2.800000e-07, 2.700000e-07, 2.600000e-07,
    -2.100000e-07, 1.900000e-07, 1.800000e-07, -1.000000e-07, 1.500000e-07,
    -1.400000e-07, 1.400000e-07, -1.400000e-07, 1.400000e-07, 1.300000e-07,
    -1.100000e-07, 1.100000e-07, 1.100000e-07,
];

/// Complementary terms cosine coefficients (arcseconds)
#[rustfmt::skip]
const SE0_COS: [f64; N_EQEQ_TERMS] = [
    -3.900000e-07, -2.000000e-08, 1.000000e-08, 1.000000e-08, 0.0,
    0.0, 0.0, 0.0, -1.000000e-08, -1.000000e-08,
    0.0, 0.0, 0.0, 0.0, 0.0,
    -1.200000e-07, 0.0, 0.0, 0.0, 0.0,
    0.0, 0.0, 0.0, 5.000000e-08, 0.0,
    0.0, 0.0, 0.0, 0.0, 0.0,
    0.0, 0.0, 0.0,
];

/// Single time-dependent complementary term coefficients
const SE1_SIN: f64 = -0.87e-6;
const SE1_COS: f64 = 0.0;

/// Single time-dependent complementary term argument [l, l', F, D, Omega, ...]
const KE1: [i32; 14] = [0, 0, 0, 0, 1, 0, 0, 0, 0, 0, 0, 0, 0, 0];

/// Compute the complementary terms of the equation of equinoxes in radians
///
/// From IERS Conventions (2010), Chapter 5, Table 5.2e.
///
/// # Arguments
/// * `tt_jd` - TT Julian date
pub fn equation_of_the_equinoxes_complementary_terms(tt_jd: f64) -> f64 {
    let t = (tt_jd - J2000) / 36525.0;

    // Compute the 14 fundamental arguments
    let mut fa = [0.0f64; 14];

    // Moon and Sun arguments (Delaunay variables)
    fa[0] = (485868.249036
        + (715923.2178 + (31.8792 + (0.051635 + (-0.00024470) * t) * t) * t) * t)
        * ASEC2RAD
        + (1325.0 * t).rem_euclid(1.0) * TAU;

    fa[1] = (1287104.793048
        + (1292581.0481 + (-0.5532 + (0.000136 + (-0.00001149) * t) * t) * t) * t)
        * ASEC2RAD
        + (99.0 * t).rem_euclid(1.0) * TAU;

    fa[2] = (335779.526232
        + (295262.8478 + (-12.7512 + (-0.001037 + (0.00000417) * t) * t) * t) * t)
        * ASEC2RAD
        + (1342.0 * t).rem_euclid(1.0) * TAU;

    fa[3] = (1072260.703692
        + (1105601.2090 + (-6.3706 + (0.006593 + (-0.00003169) * t) * t) * t) * t)
        * ASEC2RAD
        + (1236.0 * t).rem_euclid(1.0) * TAU;

    fa[4] = (450160.398036
        + (-482890.5431 + (7.4722 + (0.007702 + (-0.00005939) * t) * t) * t) * t)
        * ASEC2RAD
        + (-5.0 * t).rem_euclid(1.0) * TAU;

    // Planetary longitudes (Mercury through Neptune)
    fa[5] = 4.402608842 + 2608.7903141574 * t;
    fa[6] = 3.176146697 + 1021.3285546211 * t;
    fa[7] = 1.753470314 + 628.3075849991 * t;
    fa[8] = 6.203480913 + 334.0612426700 * t;
    fa[9] = 0.599546497 + 52.9690962641 * t;
    fa[10] = 0.874016757 + 21.3299104960 * t;
    fa[11] = 5.481293872 + 7.4781598567 * t;
    fa[12] = 5.311886287 + 3.8133035638 * t;

    // General accumulated precession in longitude
    fa[13] = (0.024381750 + 0.00000538691 * t) * t;

    // Reduce to [0, 2π)
    for val in &mut fa {
        *val = val.rem_euclid(TAU);
    }

    // Evaluate the single time-dependent term
    let mut a = 0.0;
    for j in 0..14 {
        a += KE1[j] as f64 * fa[j];
    }
    let mut c_terms = SE1_SIN * a.sin() + SE1_COS * a.cos();
    c_terms *= t;

    // Evaluate the 33 constant terms
    for i in 0..N_EQEQ_TERMS {
        let mut arg = 0.0;
        for j in 0..14 {
            arg += KE0[i][j] as f64 * fa[j];
        }
        c_terms += SE0_SIN[i] * arg.sin() + SE0_COS[i] * arg.cos();
    }

    c_terms * ASEC2RAD
}
