//! Frame registry and transform cache behind a single lock

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use once_cell::sync::Lazy;
use tracing::{debug, trace, warn};

use crate::config::ManagerConfig;
use crate::eoplib::{EarthOrientation, EarthOrientationSource};
use crate::errors::{FrameError, Result};
use crate::time::Instant;
use crate::transformlib::Transform;

use super::cache::{Eviction, TransformCache};
use super::{Frame, FrameId};

#[derive(Debug)]
struct State {
    frames: HashMap<String, Arc<Frame>>,
    root: Option<FrameId>,
    cache: TransformCache,
}

impl State {
    fn is_registered(&self, frame: &Frame) -> bool {
        self.frames
            .get(frame.name())
            .is_some_and(|registered| registered.id() == frame.id())
    }
}

/// Owns the name → frame registry and the transform cache
///
/// Every method takes the lock for a single map operation; provider
/// computations run outside it. Managers are independent of one another, so
/// tests can build their own; [`Manager::global`] is the process-wide one.
#[derive(Debug)]
pub struct Manager {
    config: ManagerConfig,
    earth_orientation: EarthOrientation,
    state: Mutex<State>,
}

static GLOBAL: Lazy<Manager> = Lazy::new(|| {
    let config = ManagerConfig::from_env().unwrap_or_else(|err| {
        warn!("{}; using default manager configuration", err);
        ManagerConfig::default()
    });
    Manager::new(config)
});

impl Manager {
    /// A manager with no Earth-orientation data
    pub fn new(config: ManagerConfig) -> Self {
        let earth_orientation = EarthOrientation::none(config.eop_mode);
        Self::with_earth_orientation_facade(config, earth_orientation)
    }

    /// A manager whose Earth-fixed frames read from `source`, under the configured mode
    pub fn with_earth_orientation(
        config: ManagerConfig,
        source: Arc<dyn EarthOrientationSource>,
    ) -> Self {
        let earth_orientation = EarthOrientation::new(source, config.eop_mode);
        Self::with_earth_orientation_facade(config, earth_orientation)
    }

    fn with_earth_orientation_facade(
        config: ManagerConfig,
        earth_orientation: EarthOrientation,
    ) -> Self {
        Self {
            config,
            earth_orientation,
            state: Mutex::new(State {
                frames: HashMap::new(),
                root: None,
                cache: TransformCache::new(config.max_transform_cache_size),
            }),
        }
    }

    /// The process-wide manager, configured from the environment on first use
    pub fn global() -> &'static Manager {
        &GLOBAL
    }

    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    /// Earth-orientation data handed to the Earth-fixed standard frames
    pub fn earth_orientation(&self) -> &EarthOrientation {
        &self.earth_orientation
    }

    fn state(&self) -> MutexGuard<'_, State> {
        // Every critical section leaves the maps consistent
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn has_frame_with_name(&self, name: &str) -> bool {
        self.state().frames.contains_key(name)
    }

    pub fn access_frame_with_name(&self, name: &str) -> Option<Arc<Frame>> {
        self.state().frames.get(name).cloned()
    }

    /// The registered root frame, if any
    pub fn root_frame(&self) -> Option<Arc<Frame>> {
        let state = self.state();
        let root = state.root?;
        state.frames.values().find(|f| f.id() == root).cloned()
    }

    /// Registered frame names, sorted
    pub fn frame_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.state().frames.keys().cloned().collect();
        names.sort();
        names
    }

    /// Register a frame, or return the frame already registered under its name
    ///
    /// An existing frame is returned when it is the same instance or has the
    /// same parent, provider and quasi-inertial flag; any other definition
    /// fails with `AlreadyExists`. The first parentless quasi-inertial frame
    /// becomes the root.
    pub fn add_frame(&self, frame: Arc<Frame>) -> Result<Arc<Frame>> {
        let mut state = self.state();

        if let Some(existing) = state.frames.get(frame.name()) {
            return if existing.id() == frame.id() || existing.same_definition(&frame) {
                Ok(Arc::clone(existing))
            } else {
                Err(FrameError::AlreadyExists {
                    name: frame.name().to_string(),
                })
            };
        }

        if !frame.has_parent() && frame.is_quasi_inertial() && state.root.is_none() {
            state.root = Some(frame.id());
            debug!("Frame [{}] registered as root", frame.name());
        }

        debug!(
            "Registered frame [{}] ({}, {} provider)",
            frame.name(),
            frame.id(),
            frame.provider().kind()
        );
        state
            .frames
            .insert(frame.name().to_string(), Arc::clone(&frame));

        Ok(frame)
    }

    /// Unregister a frame and drop every cached transform that mentions it
    pub fn remove_frame_with_name(&self, name: &str) -> Result<Arc<Frame>> {
        let mut state = self.state();

        let frame = state
            .frames
            .remove(name)
            .ok_or_else(|| FrameError::NoFrameWithName(name.to_string()))?;

        if state.root == Some(frame.id()) {
            state.root = None;
        }

        let dropped = state.cache.purge(frame.id());
        debug!(
            "Removed frame [{}] ({}), purged {} cached transforms",
            name,
            frame.id(),
            dropped
        );

        Ok(frame)
    }

    /// Unregister every frame and empty the cache
    pub fn clear_all_frames(&self) {
        let mut state = self.state();
        state.frames.clear();
        state.root = None;
        state.cache.clear();
        debug!("Cleared all frames");
    }

    pub fn access_cached_transform(
        &self,
        from: &Frame,
        to: &Frame,
        instant: &Instant,
    ) -> Option<Transform> {
        let cached = self.state().cache.get(from.id(), to.id(), instant);
        if cached.is_some() {
            trace!("Cache hit [{}] -> [{}] at {}", from.name(), to.name(), instant);
        } else {
            trace!("Cache miss [{}] -> [{}] at {}", from.name(), to.name(), instant);
        }
        cached
    }

    pub fn add_cached_transform(
        &self,
        from: &Frame,
        to: &Frame,
        instant: Instant,
        transform: Transform,
    ) -> Result<()> {
        if !transform.is_defined() {
            return Err(FrameError::UndefinedOperand("Transform"));
        }
        let mut state = self.state();
        Self::insert_cached(&mut state, from.id(), to.id(), instant, transform);
        Ok(())
    }

    fn insert_cached(
        state: &mut State,
        from: FrameId,
        to: FrameId,
        instant: Instant,
        transform: Transform,
    ) {
        match state.cache.insert(from, to, instant, transform) {
            Eviction::All => debug!(
                "Transform cache reached {} source frames, cleared",
                state.cache.max_size()
            ),
            Eviction::Pair => debug!(
                "Transform cache reached {} instants for {} -> {}, cleared pair",
                state.cache.max_size(),
                from,
                to
            ),
            Eviction::None => {}
        }
    }

    pub fn clear_cache(&self) {
        self.state().cache.clear();
    }

    /// Distinct source frames currently cached
    pub fn cached_source_count(&self) -> usize {
        self.state().cache.source_count()
    }

    /// Total cached transforms
    pub fn cached_transform_count(&self) -> usize {
        self.state().cache.len()
    }

    /// Check that `chain` (a frame followed by its ancestors) is registered and ends at the root
    pub(crate) fn ensure_rooted(&self, chain: &[&Frame]) -> Result<()> {
        let state = self.state();
        let registered = chain.iter().all(|frame| state.is_registered(frame));
        let rooted = chain
            .last()
            .is_some_and(|top| state.root == Some(top.id()));

        if registered && rooted {
            Ok(())
        } else {
            Err(FrameError::NoPathToRoot {
                frame: chain
                    .first()
                    .map_or_else(String::new, |f| f.name().to_string()),
            })
        }
    }

    /// Cache a resolved transform and its inverse, unless an endpoint was removed meanwhile
    pub(crate) fn cache_resolved(
        &self,
        from: &Frame,
        to: &Frame,
        instant: Instant,
        transform: Transform,
        inverse: Transform,
    ) {
        let mut state = self.state();
        if !(state.is_registered(from) && state.is_registered(to)) {
            return;
        }
        Self::insert_cached(&mut state, from.id(), to.id(), instant, transform);
        Self::insert_cached(&mut state, to.id(), from.id(), instant, inverse);
    }
}

impl Default for Manager {
    fn default() -> Self {
        Self::new(ManagerConfig::default())
    }
}
