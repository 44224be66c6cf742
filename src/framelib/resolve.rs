//! Frame-to-frame transform resolution
//!
//! Both ancestor chains are checked against the registry, the part they share
//! is dropped, and the remaining hops are composed outward from their lowest
//! common ancestor:
//!
//! ```text
//! from → to = (ancestor → to) ∘ (ancestor → from)⁻¹
//! ```
//!
//! Provider calls happen without holding the manager lock. Two threads racing
//! on the same miss both compute and both insert the same value.

use crate::errors::Result;
use crate::providerlib::TransformProvider;
use crate::time::Instant;
use crate::transformlib::Transform;

use super::{Frame, Manager};

pub(crate) fn resolve(
    manager: &Manager,
    from: &Frame,
    to: &Frame,
    instant: &Instant,
) -> Result<Transform> {
    if from.id() == to.id() {
        return Ok(Transform::identity(*instant));
    }

    // Rootedness is checked before the cache: removing an ancestor only
    // purges entries that name it, not those of its descendants
    let from_chain = from.lineage();
    let to_chain = to.lineage();
    manager.ensure_rooted(&from_chain)?;
    manager.ensure_rooted(&to_chain)?;

    if let Some(cached) = manager.access_cached_transform(from, to, instant) {
        return Ok(cached);
    }

    // Compose from the older frame to the newer one and invert for the other
    // order, so both directions are bit-identical however the cache was filled
    let ascending = from.id() < to.id();
    let (low, high, low_chain, high_chain) = if ascending {
        (from, to, &from_chain, &to_chain)
    } else {
        (to, from, &to_chain, &from_chain)
    };

    let forward = between(low_chain, high_chain, instant)?;
    let backward = forward.inverse()?;
    manager.cache_resolved(low, high, *instant, forward, backward);

    Ok(if ascending { forward } else { backward })
}

/// Transform from the head of `from_chain` to the head of `to_chain`
fn between(from_chain: &[&Frame], to_chain: &[&Frame], instant: &Instant) -> Result<Transform> {
    let shared = from_chain
        .iter()
        .rev()
        .zip(to_chain.iter().rev())
        .take_while(|(a, b)| a.id() == b.id())
        .count();

    let ancestor_to_from = compose_hops(&from_chain[..from_chain.len() - shared], instant)?;
    let ancestor_to_to = compose_hops(&to_chain[..to_chain.len() - shared], instant)?;

    ancestor_to_to.compose(&ancestor_to_from.inverse()?)
}

/// Compose the providers of `hops` (a frame then its ancestors) into one transform
///
/// The result maps the parent of the last hop to the first hop.
fn compose_hops(hops: &[&Frame], instant: &Instant) -> Result<Transform> {
    hops.iter()
        .try_fold(Transform::identity(*instant), |acc, frame| {
            acc.compose(&frame.provider().transform_at(instant)?)
        })
}
