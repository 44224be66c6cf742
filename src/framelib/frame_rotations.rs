//! Elementary frame rotations
//!
//! All matrices here rotate the coordinate *axes* (the IAU/SOFA convention):
//! `v_new = R * v_old` for a frame turned by `angle` about the given axis.

use nalgebra::{Matrix3, Rotation3, UnitQuaternion};

use crate::transformlib::rectify;

pub fn rot_x(angle: f64) -> Matrix3<f64> {
    let (s, c) = angle.sin_cos();
    Matrix3::new(1.0, 0.0, 0.0, 0.0, c, s, 0.0, -s, c)
}

pub fn rot_y(angle: f64) -> Matrix3<f64> {
    let (s, c) = angle.sin_cos();
    Matrix3::new(c, 0.0, -s, 0.0, 1.0, 0.0, s, 0.0, c)
}

pub fn rot_z(angle: f64) -> Matrix3<f64> {
    let (s, c) = angle.sin_cos();
    Matrix3::new(c, s, 0.0, -s, c, 0.0, 0.0, 0.0, 1.0)
}

/// Quaternion equivalent of a direction cosine matrix, scalar part non-negative
///
/// The result is renormalized, so products of series-evaluated matrices
/// that are orthonormal only to rounding are accepted.
pub fn quaternion_from_dcm(dcm: &Matrix3<f64>) -> UnitQuaternion<f64> {
    let q = UnitQuaternion::from_rotation_matrix(&Rotation3::from_matrix_unchecked(*dcm));
    rectify(UnitQuaternion::new_normalize(q.into_inner()))
}
