//! Bounded memo of resolved transforms
//!
//! Entries are grouped by source frame, then destination frame, then instant.
//! Two bounds apply:
//! - when a new source frame would exceed the maximum bucket count, the whole
//!   cache is cleared;
//! - when a new instant would exceed the same maximum for one (source,
//!   destination) pair, that pair is cleared.
//!
//! The cache is never a source of truth, so dropping entries only costs
//! recomputation.

use std::collections::HashMap;

use crate::time::Instant;
use crate::transformlib::Transform;

use super::FrameId;

/// What an insertion had to drop to respect the bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eviction {
    None,
    /// Every entry was dropped
    All,
    /// The instants of one (source, destination) pair were dropped
    Pair,
}

type InstantMap = HashMap<Instant, Transform>;

#[derive(Debug, Clone)]
pub struct TransformCache {
    buckets: HashMap<FrameId, HashMap<FrameId, InstantMap>>,
    max_size: usize,
}

impl TransformCache {
    /// `max_size` is clamped to at least 1
    pub fn new(max_size: usize) -> Self {
        Self {
            buckets: HashMap::new(),
            max_size: max_size.max(1),
        }
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    pub fn get(&self, from: FrameId, to: FrameId, instant: &Instant) -> Option<Transform> {
        self.buckets.get(&from)?.get(&to)?.get(instant).copied()
    }

    pub fn insert(
        &mut self,
        from: FrameId,
        to: FrameId,
        instant: Instant,
        transform: Transform,
    ) -> Eviction {
        let mut eviction = Eviction::None;

        if !self.buckets.contains_key(&from) && self.buckets.len() >= self.max_size {
            self.buckets.clear();
            eviction = Eviction::All;
        }

        let instants = self.buckets.entry(from).or_default().entry(to).or_default();
        if !instants.contains_key(&instant) && instants.len() >= self.max_size {
            instants.clear();
            if eviction == Eviction::None {
                eviction = Eviction::Pair;
            }
        }

        instants.insert(instant, transform);
        eviction
    }

    /// Drop every entry with `id` as either endpoint; returns how many were dropped
    pub fn purge(&mut self, id: FrameId) -> usize {
        let mut dropped = self
            .buckets
            .remove(&id)
            .map_or(0, |pairs| pairs.values().map(HashMap::len).sum());

        for pairs in self.buckets.values_mut() {
            if let Some(instants) = pairs.remove(&id) {
                dropped += instants.len();
            }
        }
        self.buckets.retain(|_, pairs| !pairs.is_empty());

        dropped
    }

    pub fn clear(&mut self) {
        self.buckets.clear();
    }

    /// Number of distinct source frames
    pub fn source_count(&self) -> usize {
        self.buckets.len()
    }

    /// Total number of cached transforms
    pub fn len(&self) -> usize {
        self.buckets
            .values()
            .flat_map(|pairs| pairs.values())
            .map(HashMap::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}
