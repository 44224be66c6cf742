//! # starframes
//!
//! Reference frames for spaceflight dynamics: a tree of named frames rooted
//! at GCRF, the passive transforms between any two of them at an instant,
//! and a bounded cache of resolved transforms shared across threads.
//!
//! ```no_run
//! use starframes::{Frame, Instant, Manager, ManagerConfig};
//! use nalgebra::Vector3;
//!
//! let manager = Manager::new(ManagerConfig::default());
//! let gcrf = Frame::gcrf(&manager).unwrap();
//! let itrf = Frame::itrf(&manager).unwrap();
//!
//! let t = Instant::from_utc(2024, 3, 20, 3, 6, 0.0).unwrap();
//! let transform = gcrf.transform_to(&itrf, &t, &manager).unwrap();
//! let r_itrf = transform.apply_to_position(&Vector3::new(7000e3, 0.0, 0.0)).unwrap();
//! # let _ = r_itrf;
//! ```

pub mod config;
pub mod constants;
pub mod earthlib;
pub mod eoplib;
pub mod errors;
pub mod framelib;
pub mod nutationlib;
pub mod precessionlib;
pub mod providerlib;
pub mod time;
pub mod transformlib;

pub use config::ManagerConfig;
pub use eoplib::{
    ConstantEarthOrientation, EarthOrientation, EarthOrientationSource, EopMode, EopRecord,
    NoEarthOrientation, TabulatedEarthOrientation,
};
pub use errors::{FrameError, Result};
pub use framelib::{Axes, Frame, FrameId, Manager};
pub use precessionlib::Theory;
pub use providerlib::{Provider, TransformProvider};
pub use time::{Instant, Scale};
pub use transformlib::{Transform, TransformKind};
