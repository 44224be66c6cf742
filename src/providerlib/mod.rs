//! Transform providers
//!
//! A provider computes the passive transform from a frame's parent to the
//! frame itself at a requested instant. The standard families are variants
//! of the closed [`Provider`] enum; anything else plugs in through
//! [`Provider::Custom`].

mod equinox;
mod fixed;
mod terrestrial;

use std::fmt;
use std::sync::Arc;

use crate::errors::Result;
use crate::time::Instant;
use crate::transformlib::Transform;

pub use equinox::{FrameBiasProvider, MeanOfDateProvider, NutationCorrection, TrueOfDateProvider};
pub use fixed::StaticProvider;
pub use terrestrial::{
    CelestialIntermediateProvider, EarthRotationProvider, PolarMotionProvider, SiderealModel,
    SiderealTimeProvider,
};

/// Computes a frame's transform relative to its parent
///
/// Implementations must be pure functions of the instant: the result is
/// cached by frame identity and instant.
pub trait TransformProvider: Send + Sync + fmt::Debug {
    /// Passive transform parent → frame, stamped with `instant`
    fn transform_at(&self, instant: &Instant) -> Result<Transform>;
}

/// The provider attached to a frame
#[derive(Debug, Clone)]
pub enum Provider {
    /// Constant relationship (including the identity)
    Static(StaticProvider),
    /// GCRF → mean J2000
    FrameBias(FrameBiasProvider),
    /// Mean J2000 → mean of a bound epoch
    MeanOfDate(MeanOfDateProvider),
    /// Mean of date → true of the same epoch
    TrueOfDate(TrueOfDateProvider),
    /// GCRF → CIRF
    CelestialIntermediate(CelestialIntermediateProvider),
    /// CIRF → TIRF
    EarthRotation(EarthRotationProvider),
    /// TIRF → ITRF
    PolarMotion(PolarMotionProvider),
    /// ITRF → TEME
    SiderealTime(SiderealTimeProvider),
    /// Caller-supplied implementation, compared by identity
    Custom(Arc<dyn TransformProvider>),
}

impl Provider {
    pub fn identity() -> Self {
        Provider::Static(StaticProvider::identity())
    }

    pub fn custom(provider: impl TransformProvider + 'static) -> Self {
        Provider::Custom(Arc::new(provider))
    }

    /// Short label for logs
    pub fn kind(&self) -> &'static str {
        match self {
            Provider::Static(_) => "static",
            Provider::FrameBias(_) => "frame bias",
            Provider::MeanOfDate(_) => "mean of date",
            Provider::TrueOfDate(_) => "true of date",
            Provider::CelestialIntermediate(_) => "celestial intermediate",
            Provider::EarthRotation(_) => "earth rotation",
            Provider::PolarMotion(_) => "polar motion",
            Provider::SiderealTime(_) => "sidereal time",
            Provider::Custom(_) => "custom",
        }
    }
}

impl TransformProvider for Provider {
    fn transform_at(&self, instant: &Instant) -> Result<Transform> {
        match self {
            Provider::Static(p) => p.transform_at(instant),
            Provider::FrameBias(p) => p.transform_at(instant),
            Provider::MeanOfDate(p) => p.transform_at(instant),
            Provider::TrueOfDate(p) => p.transform_at(instant),
            Provider::CelestialIntermediate(p) => p.transform_at(instant),
            Provider::EarthRotation(p) => p.transform_at(instant),
            Provider::PolarMotion(p) => p.transform_at(instant),
            Provider::SiderealTime(p) => p.transform_at(instant),
            Provider::Custom(p) => p.transform_at(instant),
        }
    }
}

impl PartialEq for Provider {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Provider::Static(a), Provider::Static(b)) => a == b,
            (Provider::FrameBias(a), Provider::FrameBias(b)) => a == b,
            (Provider::MeanOfDate(a), Provider::MeanOfDate(b)) => a == b,
            (Provider::TrueOfDate(a), Provider::TrueOfDate(b)) => a == b,
            (Provider::CelestialIntermediate(a), Provider::CelestialIntermediate(b)) => a == b,
            (Provider::EarthRotation(a), Provider::EarthRotation(b)) => a == b,
            (Provider::PolarMotion(a), Provider::PolarMotion(b)) => a == b,
            (Provider::SiderealTime(a), Provider::SiderealTime(b)) => a == b,
            (Provider::Custom(a), Provider::Custom(b)) => std::ptr::eq(
                Arc::as_ptr(a) as *const (),
                Arc::as_ptr(b) as *const (),
            ),
            _ => false,
        }
    }
}

impl From<StaticProvider> for Provider {
    fn from(p: StaticProvider) -> Self {
        Provider::Static(p)
    }
}

impl From<Arc<dyn TransformProvider>> for Provider {
    fn from(p: Arc<dyn TransformProvider>) -> Self {
        Provider::Custom(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::precessionlib::Theory;
    use nalgebra::{UnitQuaternion, Vector3};

    #[derive(Debug)]
    struct Shifted(f64);

    impl TransformProvider for Shifted {
        fn transform_at(&self, instant: &Instant) -> Result<Transform> {
            Ok(Transform::passive(
                *instant,
                Vector3::new(self.0, 0.0, 0.0),
                Vector3::zeros(),
                UnitQuaternion::identity(),
                Vector3::zeros(),
            ))
        }
    }

    #[test]
    fn test_dispatch_to_custom() {
        let provider = Provider::custom(Shifted(4.0));
        let transform = provider.transform_at(&Instant::j2000()).unwrap();
        assert_eq!(transform.translation().unwrap(), Vector3::new(4.0, 0.0, 0.0));
        assert_eq!(provider.kind(), "custom");
    }

    #[test]
    fn test_custom_equality_is_identity() {
        let shared: Arc<dyn TransformProvider> = Arc::new(Shifted(1.0));
        let a = Provider::from(Arc::clone(&shared));
        let b = Provider::from(shared);
        let c = Provider::custom(Shifted(1.0));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_value_equality_for_standard_variants() {
        let epoch = Instant::j2000().add_seconds(1e6).unwrap();
        assert_eq!(
            Provider::MeanOfDate(MeanOfDateProvider::new(epoch)),
            Provider::MeanOfDate(MeanOfDateProvider::new(epoch))
        );
        assert_ne!(
            Provider::MeanOfDate(MeanOfDateProvider::new(epoch)),
            Provider::MeanOfDate(MeanOfDateProvider::new(Instant::j2000()))
        );
        assert_ne!(Provider::identity(), Provider::FrameBias(FrameBiasProvider::new(Theory::Iau2000B)));
        assert_ne!(
            Provider::TrueOfDate(TrueOfDateProvider::new(epoch, Theory::Iau2000B, NutationCorrection::default())),
            Provider::TrueOfDate(TrueOfDateProvider::new(epoch, Theory::Iau2006, NutationCorrection::default()))
        );
    }
}
