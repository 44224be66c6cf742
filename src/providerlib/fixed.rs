//! Time-independent providers

use nalgebra::{UnitQuaternion, Vector3};

use crate::errors::Result;
use crate::time::Instant;
use crate::transformlib::Transform;

use super::TransformProvider;

/// A fixed relationship to the parent, valid at every instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StaticProvider {
    translation: Vector3<f64>,
    velocity: Vector3<f64>,
    orientation: UnitQuaternion<f64>,
    angular_velocity: Vector3<f64>,
}

impl StaticProvider {
    /// Passive fields, as in [`Transform::passive`]
    pub fn new(
        translation: Vector3<f64>,
        velocity: Vector3<f64>,
        orientation: UnitQuaternion<f64>,
        angular_velocity: Vector3<f64>,
    ) -> Self {
        Self {
            translation,
            velocity,
            orientation,
            angular_velocity,
        }
    }

    pub fn identity() -> Self {
        Self::new(
            Vector3::zeros(),
            Vector3::zeros(),
            UnitQuaternion::identity(),
            Vector3::zeros(),
        )
    }

    /// Pure constant rotation
    pub fn rotation(orientation: UnitQuaternion<f64>) -> Self {
        Self::new(Vector3::zeros(), Vector3::zeros(), orientation, Vector3::zeros())
    }

    /// Freeze a computed transform; its instant is discarded
    pub fn from_transform(transform: &Transform) -> Result<Self> {
        Ok(Self::new(
            transform.translation()?,
            transform.velocity()?,
            transform.orientation()?,
            transform.angular_velocity()?,
        ))
    }
}

impl TransformProvider for StaticProvider {
    fn transform_at(&self, instant: &Instant) -> Result<Transform> {
        Ok(Transform::passive(
            *instant,
            self.translation,
            self.velocity,
            self.orientation,
            self.angular_velocity,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_identity_provider() {
        let t = Instant::j2000().add_seconds(120.0).unwrap();
        let transform = StaticProvider::identity().transform_at(&t).unwrap();
        assert!(transform.is_identity());
        assert_eq!(transform.instant().unwrap(), t);
    }

    #[test]
    fn test_from_transform_restamps() {
        let q = UnitQuaternion::from_axis_angle(&Vector3::z_axis(), 0.3);
        let source = Transform::passive(
            Instant::j2000(),
            Vector3::new(1.0, 2.0, 3.0),
            Vector3::new(0.1, 0.0, 0.0),
            q,
            Vector3::zeros(),
        );
        let provider = StaticProvider::from_transform(&source).unwrap();

        let later = Instant::j2000().add_seconds(3600.0).unwrap();
        let out = provider.transform_at(&later).unwrap();
        assert_eq!(out.instant().unwrap(), later);
        assert_eq!(out, source.at_instant(later).unwrap());
        assert_relative_eq!(out.translation().unwrap(), Vector3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_from_undefined_transform_fails() {
        assert!(StaticProvider::from_transform(&Transform::undefined()).is_err());
    }
}
