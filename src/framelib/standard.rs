//! Well-known frames
//!
//! ```text
//! GCRF ─┬─ J2000 (IAU 2000B) ── MOD @ epoch ─┬─ TOD @ epoch (IAU 2000B)
//!       │                                    └─ TOD @ epoch (IAU 2006)
//!       ├─ J2000 (IAU 2006)
//!       ├─ CIRF ── TIRF ── ITRF ── TEME
//!       └─ TEMEOfEpoch @ epoch
//! ```
//!
//! Each constructor builds its ancestors first, so asking for `ITRF` on an
//! empty manager registers the whole chain down from `GCRF`. Earth-fixed
//! frames read the manager's Earth-orientation data.

use std::sync::Arc;

use crate::errors::Result;
use crate::precessionlib::Theory;
use crate::providerlib::{
    CelestialIntermediateProvider, EarthRotationProvider, FrameBiasProvider,
    MeanOfDateProvider, NutationCorrection, PolarMotionProvider, Provider, SiderealModel,
    SiderealTimeProvider, StaticProvider, TrueOfDateProvider,
};
use crate::time::{Instant, Scale};

use super::{Frame, Manager};

pub const GCRF: &str = "GCRF";
pub const CIRF: &str = "CIRF";
pub const TIRF: &str = "TIRF";
pub const ITRF: &str = "ITRF";
pub const TEME: &str = "TEME";

impl Frame {
    /// Geocentric celestial reference frame, the root of the standard tree
    pub fn gcrf(manager: &Manager) -> Result<Arc<Frame>> {
        Frame::construct(manager, GCRF, true, None, Provider::identity())
    }

    /// Mean equator and equinox of J2000, offset from GCRF by the frame bias of `theory`
    pub fn j2000(manager: &Manager, theory: Theory) -> Result<Arc<Frame>> {
        let gcrf = Frame::gcrf(manager)?;
        Frame::construct(
            manager,
            &format!("J2000 ({})", theory),
            true,
            Some(&gcrf),
            Provider::FrameBias(FrameBiasProvider::new(theory)),
        )
    }

    /// Mean equator and equinox of `epoch` (IAU-76/FK5 precession)
    pub fn mod_at(manager: &Manager, epoch: &Instant) -> Result<Arc<Frame>> {
        let j2000 = Frame::j2000(manager, Theory::Iau2000B)?;
        Frame::construct(
            manager,
            &format!("MOD @ {}", epoch.to_string_in(Scale::TT)),
            true,
            Some(&j2000),
            Provider::MeanOfDate(MeanOfDateProvider::new(*epoch)),
        )
    }

    /// True equator and equinox of `epoch` under `theory`, nutation shifted by `correction`
    ///
    /// GCRF to this frame is the theory's bias-precession-nutation matrix at
    /// `epoch`; the frame hangs off `MOD @ epoch`.
    pub fn tod_at(
        manager: &Manager,
        epoch: &Instant,
        theory: Theory,
        correction: NutationCorrection,
    ) -> Result<Arc<Frame>> {
        let mean_of_date = Frame::mod_at(manager, epoch)?;
        Frame::construct(
            manager,
            &format!("TOD @ {} ({})", epoch.to_string_in(Scale::TT), theory),
            true,
            Some(&mean_of_date),
            Provider::TrueOfDate(TrueOfDateProvider::new(*epoch, theory, correction)),
        )
    }

    /// Celestial intermediate reference frame (IAU 2006)
    pub fn cirf(manager: &Manager) -> Result<Arc<Frame>> {
        let gcrf = Frame::gcrf(manager)?;
        Frame::construct(
            manager,
            CIRF,
            false,
            Some(&gcrf),
            Provider::CelestialIntermediate(CelestialIntermediateProvider::new(Theory::Iau2006)),
        )
    }

    /// Terrestrial intermediate reference frame
    pub fn tirf(manager: &Manager) -> Result<Arc<Frame>> {
        let cirf = Frame::cirf(manager)?;
        Frame::construct(
            manager,
            TIRF,
            false,
            Some(&cirf),
            Provider::EarthRotation(EarthRotationProvider::new(
                manager.earth_orientation().clone(),
            )),
        )
    }

    /// International terrestrial reference frame
    pub fn itrf(manager: &Manager) -> Result<Arc<Frame>> {
        let tirf = Frame::tirf(manager)?;
        Frame::construct(
            manager,
            ITRF,
            false,
            Some(&tirf),
            Provider::PolarMotion(PolarMotionProvider::new(manager.earth_orientation().clone())),
        )
    }

    /// True equator, mean equinox frame used by SGP4
    ///
    /// Flagged quasi-inertial like TOD: its axes only drift with precession
    /// and nutation, even though it is defined from ITRF.
    pub fn teme(manager: &Manager) -> Result<Arc<Frame>> {
        let itrf = Frame::itrf(manager)?;
        Frame::construct(
            manager,
            TEME,
            true,
            Some(&itrf),
            Provider::SiderealTime(SiderealTimeProvider::new(
                manager.earth_orientation().clone(),
                SiderealModel::Gmst1982,
            )),
        )
    }

    /// TEME frozen at `epoch`, hung directly off GCRF
    ///
    /// # Errors
    /// Fails like any GCRF → TEME resolution at `epoch`, for instance with
    /// missing Earth-orientation data in strict mode.
    pub fn teme_of_epoch(manager: &Manager, epoch: &Instant) -> Result<Arc<Frame>> {
        let gcrf = Frame::gcrf(manager)?;
        let teme = Frame::teme(manager)?;
        let snapshot = gcrf.transform_to(&teme, epoch, manager)?;

        Frame::construct(
            manager,
            &format!("TEMEOfEpoch @ {}", epoch.to_string_in(Scale::TT)),
            true,
            Some(&gcrf),
            Provider::Static(StaticProvider::rotation(snapshot.orientation()?)),
        )
    }
}
