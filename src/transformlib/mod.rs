//! Rigid-body transforms between reference frames
//!
//! A [`Transform`] from frame A to frame B re-expresses coordinates given in A
//! into B (passive convention):
//!
//! ```text
//! x_B = q * (x_A + t)
//! v_B = q * (v_A + v) - ω × x_B
//! ```
//!
//! where `t` is the offset of A's origin from B's origin expressed in A axes,
//! `v` its rate of change, `q` the rotation taking A components to B
//! components and `ω` the angular velocity of B relative to A expressed in B.
//!
//! Composition follows function composition: `t_bc.compose(&t_ab)` is the
//! transform A→C that applies `t_ab` first.

use std::fmt;

use nalgebra::{Quaternion, UnitQuaternion, Vector3};

use crate::errors::{FrameError, Result};
use crate::time::{Instant, Scale};

/// Translation/velocity tolerance used by [`Transform::is_identity`]
pub const LINEAR_TOLERANCE: f64 = 1e-9;

/// Rotation-angle tolerance used by [`Transform::is_identity`], in radians
pub const ANGULAR_TOLERANCE: f64 = 1e-12;

/// How the fields handed to [`Transform::new`] are to be read
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformKind {
    /// The fields describe a motion of points; stored as its inverse
    Active,
    /// The fields describe a change of coordinates; stored as given
    Passive,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Kinematics {
    instant: Instant,
    translation: Vector3<f64>,
    velocity: Vector3<f64>,
    orientation: UnitQuaternion<f64>,
    angular_velocity: Vector3<f64>,
}

impl Kinematics {
    fn inverse(&self) -> Self {
        let q = self.orientation;
        let translation = -(q * self.translation);
        Self {
            instant: self.instant,
            translation,
            velocity: self.angular_velocity.cross(&(q * self.translation)) - q * self.velocity,
            orientation: q.inverse(),
            angular_velocity: -(q.inverse() * self.angular_velocity),
        }
    }

    /// `self ∘ first`, where `first` maps A→B and `self` maps B→C
    fn after(&self, first: &Kinematics) -> Self {
        let q1_inv = first.orientation.inverse();
        Self {
            instant: self.instant,
            translation: first.translation + q1_inv * self.translation,
            velocity: first.velocity
                + q1_inv * (self.velocity + first.angular_velocity.cross(&self.translation)),
            orientation: self.orientation * first.orientation,
            angular_velocity: self.angular_velocity + self.orientation * first.angular_velocity,
        }
    }
}

/// Flip the quaternion to the hemisphere with a non-negative scalar part
pub fn rectify(q: UnitQuaternion<f64>) -> UnitQuaternion<f64> {
    if q.scalar() < 0.0 {
        UnitQuaternion::new_unchecked(-q.into_inner())
    } else {
        q
    }
}

/// Rotation angle of a unit quaternion, accurate for very small angles
pub fn rotation_angle(q: &UnitQuaternion<f64>) -> f64 {
    let quaternion: &Quaternion<f64> = q.as_ref();
    2.0 * quaternion.imag().norm().atan2(quaternion.scalar().abs())
}

/// A timestamped rigid-body relationship between two frames, or the undefined sentinel
#[derive(Debug, Clone, Copy)]
pub struct Transform {
    kinematics: Option<Kinematics>,
}

impl Transform {
    /// Build a transform of the given kind
    ///
    /// # Arguments
    /// * `instant` - instant the relationship holds at
    /// * `translation` - origin offset, in the source frame axes
    /// * `velocity` - rate of change of `translation`
    /// * `orientation` - rotation from source to destination components
    /// * `angular_velocity` - angular velocity of the destination relative to the source, in destination axes
    pub fn new(
        kind: TransformKind,
        instant: Instant,
        translation: Vector3<f64>,
        velocity: Vector3<f64>,
        orientation: UnitQuaternion<f64>,
        angular_velocity: Vector3<f64>,
    ) -> Self {
        let kinematics = Kinematics {
            instant,
            translation,
            velocity,
            orientation,
            angular_velocity,
        };
        let kinematics = match kind {
            TransformKind::Passive => kinematics,
            TransformKind::Active => kinematics.inverse(),
        };
        Self {
            kinematics: Some(kinematics),
        }
    }

    /// Passive transform: the fields re-express coordinates as given
    pub fn passive(
        instant: Instant,
        translation: Vector3<f64>,
        velocity: Vector3<f64>,
        orientation: UnitQuaternion<f64>,
        angular_velocity: Vector3<f64>,
    ) -> Self {
        Self::new(
            TransformKind::Passive,
            instant,
            translation,
            velocity,
            orientation,
            angular_velocity,
        )
    }

    /// Active transform: the fields move points, so the stored coordinate change is the inverse
    pub fn active(
        instant: Instant,
        translation: Vector3<f64>,
        velocity: Vector3<f64>,
        orientation: UnitQuaternion<f64>,
        angular_velocity: Vector3<f64>,
    ) -> Self {
        Self::new(
            TransformKind::Active,
            instant,
            translation,
            velocity,
            orientation,
            angular_velocity,
        )
    }

    /// Pure rotation (passive) with an angular rate, no translation
    pub fn rotation(
        instant: Instant,
        orientation: UnitQuaternion<f64>,
        angular_velocity: Vector3<f64>,
    ) -> Self {
        Self::passive(
            instant,
            Vector3::zeros(),
            Vector3::zeros(),
            orientation,
            angular_velocity,
        )
    }

    /// Identity transform at an instant
    pub fn identity(instant: Instant) -> Self {
        Self::rotation(instant, UnitQuaternion::identity(), Vector3::zeros())
    }

    /// The undefined sentinel
    pub const fn undefined() -> Self {
        Self { kinematics: None }
    }

    pub fn is_defined(&self) -> bool {
        self.kinematics.is_some()
    }

    fn defined(&self) -> Result<&Kinematics> {
        self.kinematics
            .as_ref()
            .ok_or(FrameError::UndefinedOperand("Transform"))
    }

    pub fn instant(&self) -> Result<Instant> {
        Ok(self.defined()?.instant)
    }

    pub fn translation(&self) -> Result<Vector3<f64>> {
        Ok(self.defined()?.translation)
    }

    pub fn velocity(&self) -> Result<Vector3<f64>> {
        Ok(self.defined()?.velocity)
    }

    pub fn orientation(&self) -> Result<UnitQuaternion<f64>> {
        Ok(self.defined()?.orientation)
    }

    pub fn angular_velocity(&self) -> Result<Vector3<f64>> {
        Ok(self.defined()?.angular_velocity)
    }

    /// The same relationship stamped with another instant
    pub fn at_instant(&self, instant: Instant) -> Result<Self> {
        let mut kinematics = *self.defined()?;
        kinematics.instant = instant;
        Ok(Self {
            kinematics: Some(kinematics),
        })
    }

    /// Compose `self ∘ first`: with `first` mapping A→B and `self` mapping B→C, the result maps A→C
    ///
    /// Both operands must be defined and hold at the same instant.
    pub fn compose(&self, first: &Transform) -> Result<Transform> {
        let second = self.defined()?;
        let first = first.defined()?;

        if second.instant != first.instant {
            return Err(FrameError::InstantMismatch {
                left: second.instant.to_string_in(Scale::UTC),
                right: first.instant.to_string_in(Scale::UTC),
            });
        }

        Ok(Self {
            kinematics: Some(second.after(first)),
        })
    }

    /// The transform going the other way, B→A
    pub fn inverse(&self) -> Result<Transform> {
        Ok(Self {
            kinematics: Some(self.defined()?.inverse()),
        })
    }

    /// Re-express a position
    pub fn apply_to_position(&self, position: &Vector3<f64>) -> Result<Vector3<f64>> {
        let k = self.defined()?;
        Ok(k.orientation * (position + k.translation))
    }

    /// Re-express the velocity of a point located at `position`
    pub fn apply_to_velocity(
        &self,
        position: &Vector3<f64>,
        velocity: &Vector3<f64>,
    ) -> Result<Vector3<f64>> {
        let k = self.defined()?;
        let position_out = k.orientation * (position + k.translation);
        Ok(k.orientation * (velocity + k.velocity) - k.angular_velocity.cross(&position_out))
    }

    /// Re-express a free vector (rotation only)
    pub fn apply_to_vector(&self, vector: &Vector3<f64>) -> Result<Vector3<f64>> {
        Ok(self.defined()?.orientation * vector)
    }

    /// True when every linear term vanishes and the rotation is the identity, within tolerance
    ///
    /// The undefined sentinel is never the identity.
    pub fn is_identity(&self) -> bool {
        self.kinematics.as_ref().is_some_and(|k| {
            k.translation.norm() < LINEAR_TOLERANCE
                && k.velocity.norm() < LINEAR_TOLERANCE
                && k.angular_velocity.norm() < ANGULAR_TOLERANCE
                && rotation_angle(&k.orientation) < ANGULAR_TOLERANCE
        })
    }
}

impl PartialEq for Transform {
    /// Exact field equality; undefined transforms are never equal
    fn eq(&self, other: &Self) -> bool {
        match (&self.kinematics, &other.kinematics) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(k) = &self.kinematics else {
            return f.write_str("Transform(undefined)");
        };
        let q = k.orientation.as_ref();
        write!(
            f,
            "Transform(instant: {}, translation: [{:.12}, {:.12}, {:.12}], velocity: [{:.12}, {:.12}, {:.12}], \
             orientation: [{:.15}, {:.15}, {:.15}, {:.15}], angular velocity: [{:.15e}, {:.15e}, {:.15e}])",
            k.instant,
            k.translation.x,
            k.translation.y,
            k.translation.z,
            k.velocity.x,
            k.velocity.y,
            k.velocity.z,
            q.i,
            q.j,
            q.k,
            q.w,
            k.angular_velocity.x,
            k.angular_velocity.y,
            k.angular_velocity.z,
        )
    }
}
