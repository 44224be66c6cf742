//! Reference frames and the frame tree
//!
//! A [`Frame`] is a named node holding its parent and the [`Provider`] that
//! relates it to that parent. Frames are only created through
//! [`Frame::construct`] (or the well-known constructors such as
//! [`Frame::gcrf`]), which registers them with a [`Manager`] and hands back
//! the canonical instance for the name.

mod cache;
pub mod frame_rotations;
mod manager;
mod resolve;
mod standard;

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use nalgebra::Vector3;

use crate::errors::{FrameError, Result};
use crate::providerlib::Provider;
use crate::time::Instant;
use crate::transformlib::Transform;

pub use cache::{Eviction, TransformCache};
pub use manager::Manager;
pub use standard::{CIRF, GCRF, ITRF, TEME, TIRF};

/// Process-unique frame handle, never reused
///
/// Cache entries are keyed by this id rather than by name, so a frame removed
/// and re-added under the same name never sees the old entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameId(u64);

static NEXT_FRAME_ID: AtomicU64 = AtomicU64::new(1);

impl FrameId {
    pub(crate) fn next() -> Self {
        FrameId(NEXT_FRAME_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Unit axes of one frame expressed in another, at an instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Axes {
    pub x: Vector3<f64>,
    pub y: Vector3<f64>,
    pub z: Vector3<f64>,
    pub instant: Instant,
}

/// A named reference frame
#[derive(Debug)]
pub struct Frame {
    id: FrameId,
    name: String,
    quasi_inertial: bool,
    parent: Option<Arc<Frame>>,
    provider: Provider,
}

impl Frame {
    /// Register a frame, or return the one already registered identically under `name`
    ///
    /// # Arguments
    /// * `manager` - registry the frame lives in
    /// * `name` - unique frame name
    /// * `quasi_inertial` - whether the frame is suitable for inertial dynamics
    /// * `parent` - frame the provider is relative to; `None` for a root candidate
    /// * `provider` - computes the transform parent → this frame
    ///
    /// # Errors
    /// `UndefinedOperand` for an empty name, `AlreadyExists` if `name` is
    /// registered with a different parent, provider or quasi-inertial flag.
    pub fn construct(
        manager: &Manager,
        name: &str,
        quasi_inertial: bool,
        parent: Option<&Arc<Frame>>,
        provider: Provider,
    ) -> Result<Arc<Frame>> {
        if name.is_empty() {
            return Err(FrameError::UndefinedOperand("Frame name"));
        }

        let frame = Frame {
            id: FrameId::next(),
            name: name.to_string(),
            quasi_inertial,
            parent: parent.cloned(),
            provider,
        };

        manager.add_frame(Arc::new(frame))
    }

    /// The frame registered under `name`
    pub fn with_name(manager: &Manager, name: &str) -> Result<Arc<Frame>> {
        manager
            .access_frame_with_name(name)
            .ok_or_else(|| FrameError::NoFrameWithName(name.to_string()))
    }

    pub fn exists(manager: &Manager, name: &str) -> bool {
        manager.has_frame_with_name(name)
    }

    /// Unregister the frame named `name` and purge its cached transforms
    ///
    /// Handles still held elsewhere stay valid as values, but no longer resolve.
    pub fn destruct(manager: &Manager, name: &str) -> Result<()> {
        manager.remove_frame_with_name(name).map(|_| ())
    }

    pub fn id(&self) -> FrameId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_quasi_inertial(&self) -> bool {
        self.quasi_inertial
    }

    pub fn has_parent(&self) -> bool {
        self.parent.is_some()
    }

    pub fn parent(&self) -> Option<&Arc<Frame>> {
        self.parent.as_ref()
    }

    pub fn provider(&self) -> &Provider {
        &self.provider
    }

    /// This frame followed by each of its ancestors
    pub(crate) fn lineage(&self) -> Vec<&Frame> {
        std::iter::successors(Some(self), |frame| frame.parent.as_deref()).collect()
    }

    /// Number of ancestors
    pub fn depth(&self) -> usize {
        self.lineage().len() - 1
    }

    /// Ancestor `degree` levels up; 0 is the frame itself
    pub fn ancestor(&self, degree: usize) -> Result<&Frame> {
        let lineage = self.lineage();
        let depth = lineage.len() - 1;
        lineage
            .get(degree)
            .copied()
            .ok_or(FrameError::AncestorOutOfRange { degree, depth })
    }

    /// Same parent, provider and quasi-inertial flag
    pub(crate) fn same_definition(&self, other: &Frame) -> bool {
        self.quasi_inertial == other.quasi_inertial
            && self.parent.as_ref().map(|p| p.id) == other.parent.as_ref().map(|p| p.id)
            && self.provider == other.provider
    }

    /// Passive transform re-expressing coordinates from this frame in `target`
    ///
    /// # Errors
    /// `NoPathToRoot` when either frame's ancestor chain is not registered up
    /// to the root, or whatever a provider on the path reports.
    pub fn transform_to(
        &self,
        target: &Frame,
        instant: &Instant,
        manager: &Manager,
    ) -> Result<Transform> {
        resolve::resolve(manager, self, target, instant)
    }

    /// Position of this frame's origin, in `frame`
    pub fn origin_in(&self, frame: &Frame, instant: &Instant, manager: &Manager) -> Result<Vector3<f64>> {
        self.transform_to(frame, instant, manager)?
            .apply_to_position(&Vector3::zeros())
    }

    /// Velocity of this frame's origin, in `frame`
    pub fn velocity_in(&self, frame: &Frame, instant: &Instant, manager: &Manager) -> Result<Vector3<f64>> {
        self.transform_to(frame, instant, manager)?
            .apply_to_velocity(&Vector3::zeros(), &Vector3::zeros())
    }

    /// This frame's unit axes, in `frame`
    pub fn axes_in(&self, frame: &Frame, instant: &Instant, manager: &Manager) -> Result<Axes> {
        let transform = self.transform_to(frame, instant, manager)?;
        Ok(Axes {
            x: transform.apply_to_vector(&Vector3::x())?,
            y: transform.apply_to_vector(&Vector3::y())?,
            z: transform.apply_to_vector(&Vector3::z())?,
            instant: *instant,
        })
    }
}

impl PartialEq for Frame {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Frame {}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.name)
    }
}
