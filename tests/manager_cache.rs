//! Registry canonicalization, cache behavior and concurrent resolution

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use approx::assert_relative_eq;
use nalgebra::{UnitQuaternion, Vector3};

use starframes::providerlib::StaticProvider;
use starframes::{
    Frame, FrameError, Instant, Manager, ManagerConfig, Provider, Result, Transform,
    TransformProvider,
};

/// Spins about z at a fixed rate and counts its evaluations
#[derive(Debug, Default)]
struct CountingProvider {
    calls: AtomicUsize,
}

impl CountingProvider {
    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TransformProvider for CountingProvider {
    fn transform_at(&self, instant: &Instant) -> Result<Transform> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let angle = 1e-4 * instant.seconds_since(&Instant::j2000());
        Ok(Transform::passive(
            *instant,
            Vector3::new(1.0, 2.0, 3.0),
            Vector3::zeros(),
            UnitQuaternion::from_axis_angle(&Vector3::z_axis(), angle),
            Vector3::new(0.0, 0.0, 1e-4),
        ))
    }
}

fn root(manager: &Manager) -> Arc<Frame> {
    Frame::construct(manager, "R", true, None, Provider::identity()).unwrap()
}

fn offset(x: f64) -> Provider {
    Provider::Static(StaticProvider::new(
        Vector3::new(x, 0.0, 0.0),
        Vector3::zeros(),
        UnitQuaternion::identity(),
        Vector3::zeros(),
    ))
}

#[test]
fn test_cache_is_transparent() {
    let m = Manager::new(ManagerConfig::default());
    let r = root(&m);
    let counter = Arc::new(CountingProvider::default());
    let shared: Arc<dyn TransformProvider> = counter.clone();
    let p = Frame::construct(&m, "P", false, Some(&r), Provider::from(shared)).unwrap();
    let t = Instant::j2000().add_seconds(60.0).unwrap();

    let first = r.transform_to(&p, &t, &m).unwrap();
    assert_eq!(counter.calls(), 1);
    let second = r.transform_to(&p, &t, &m).unwrap();
    assert_eq!(counter.calls(), 1);
    assert_eq!(first, second);

    // The reverse direction was cached alongside
    let back = p.transform_to(&r, &t, &m).unwrap();
    assert_eq!(counter.calls(), 1);
    assert_eq!(back, first.inverse().unwrap());

    // Another instant is a miss
    r.transform_to(&p, &t.add_seconds(1.0).unwrap(), &m).unwrap();
    assert_eq!(counter.calls(), 2);
}

#[test]
fn test_eviction_keeps_results_correct() {
    let config = ManagerConfig::default().with_max_transform_cache_size(2).unwrap();
    let m = Manager::new(config);
    let r = root(&m);
    let frames: Vec<Arc<Frame>> = (0..6)
        .map(|i| Frame::construct(&m, &format!("F{i}"), true, Some(&r), offset(i as f64)).unwrap())
        .collect();

    let t = Instant::j2000();
    for round in 0..3 {
        for a in &frames {
            for b in &frames {
                let a_to_b = a.transform_to(b, &t, &m).unwrap();
                let b_to_a = b.transform_to(a, &t, &m).unwrap();
                assert!(b_to_a.compose(&a_to_b).unwrap().is_identity(), "round {round}");
                assert!(a.transform_to(a, &t, &m).unwrap().is_identity());
            }
            assert!(m.cached_source_count() <= 2);
        }
    }

    // Per-pair instants are bounded by the same limit
    m.clear_cache();
    let (a, b) = (&frames[0], &frames[1]);
    for i in 0..10 {
        let ti = t.add_seconds(i as f64).unwrap();
        let transform = a.transform_to(b, &ti, &m).unwrap();
        assert_relative_eq!(
            transform.translation().unwrap(),
            Vector3::new(1.0, 0.0, 0.0),
            epsilon = 1e-15
        );
    }
    assert!(m.cached_transform_count() <= 4);
}

#[test]
fn test_named_factory_canonicalizes() {
    let m = Manager::new(ManagerConfig::default());
    let r = root(&m);
    let counter = Arc::new(CountingProvider::default());
    let shared: Arc<dyn TransformProvider> = counter.clone();

    let first = Frame::construct(&m, "P", false, Some(&r), Provider::from(shared.clone())).unwrap();
    let again = Frame::construct(&m, "P", false, Some(&r), Provider::from(shared)).unwrap();
    let looked_up = Frame::with_name(&m, "P").unwrap();
    assert!(Arc::ptr_eq(&first, &again));
    assert!(Arc::ptr_eq(&first, &looked_up));

    // Cache entries written through one handle are seen through another
    let t = Instant::j2000();
    r.transform_to(&first, &t, &m).unwrap();
    r.transform_to(&looked_up, &t, &m).unwrap();
    assert_eq!(counter.calls(), 1);

    let conflict = Frame::construct(&m, "P", false, Some(&r), Provider::identity()).unwrap_err();
    assert_eq!(conflict, FrameError::AlreadyExists { name: "P".into() });
    let conflict = Frame::construct(&m, "P", true, Some(&r), first.provider().clone()).unwrap_err();
    assert!(matches!(conflict, FrameError::AlreadyExists { .. }));
}

#[test]
fn test_frame_without_path_to_root_fails() {
    let m = Manager::new(ManagerConfig::default());
    let r = root(&m);
    let t = Instant::j2000();

    // Parent never registered with this manager
    let elsewhere = Manager::new(ManagerConfig::default());
    let orphan_parent = Frame::construct(&elsewhere, "Q", true, None, Provider::identity()).unwrap();
    let x = Frame::construct(&m, "X", false, Some(&orphan_parent), offset(1.0)).unwrap();

    assert_eq!(
        x.transform_to(&r, &t, &m).unwrap_err(),
        FrameError::NoPathToRoot { frame: "X".into() }
    );
    assert_eq!(
        r.transform_to(&x, &t, &m).unwrap_err(),
        FrameError::NoPathToRoot { frame: "X".into() }
    );

    // A second parentless frame is not the root
    let island = Frame::construct(&m, "Island", true, None, Provider::identity()).unwrap();
    assert!(matches!(
        island.transform_to(&r, &t, &m),
        Err(FrameError::NoPathToRoot { .. })
    ));
}

#[test]
fn test_readded_frame_does_not_see_stale_cache() {
    let m = Manager::new(ManagerConfig::default());
    let r = root(&m);
    let t = Instant::j2000();

    let old = Frame::construct(&m, "P", false, Some(&r), offset(1.0)).unwrap();
    let before = r.transform_to(&old, &t, &m).unwrap();
    assert_eq!(m.cached_transform_count(), 2);

    Frame::destruct(&m, "P").unwrap();
    assert_eq!(m.cached_transform_count(), 0);

    let new = Frame::construct(&m, "P", false, Some(&r), offset(5.0)).unwrap();
    assert_ne!(old.id(), new.id());
    let after = r.transform_to(&new, &t, &m).unwrap();
    assert_ne!(before, after);
    assert_relative_eq!(after.translation().unwrap(), Vector3::new(5.0, 0.0, 0.0));

    // The removed handle no longer resolves
    assert!(matches!(
        r.transform_to(&old, &t, &m),
        Err(FrameError::NoPathToRoot { .. })
    ));
}

#[test]
fn test_removed_ancestor_breaks_warm_and_cold_paths_alike() {
    let m = Manager::new(ManagerConfig::default());
    let r = root(&m);
    let a = Frame::construct(&m, "A", false, Some(&r), offset(1.0)).unwrap();
    let b = Frame::construct(&m, "B", false, Some(&a), offset(2.0)).unwrap();
    let t = Instant::j2000();

    assert_relative_eq!(
        b.transform_to(&r, &t, &m).unwrap().translation().unwrap(),
        Vector3::new(-3.0, 0.0, 0.0)
    );
    Frame::destruct(&m, "A").unwrap();

    let warm = b.transform_to(&r, &t, &m).unwrap_err();
    m.clear_cache();
    let cold = b.transform_to(&r, &t, &m).unwrap_err();
    assert_eq!(warm, FrameError::NoPathToRoot { frame: "B".into() });
    assert_eq!(warm, cold);
}

#[test]
fn test_root_removal_and_clear() {
    let m = Manager::new(ManagerConfig::default());
    let r = root(&m);
    let p = Frame::construct(&m, "P", false, Some(&r), offset(1.0)).unwrap();
    assert_eq!(m.root_frame().map(|f| f.id()), Some(r.id()));

    m.clear_all_frames();
    assert!(m.root_frame().is_none());
    assert!(m.frame_names().is_empty());
    assert!(p.transform_to(&r, &Instant::j2000(), &m).is_err());
}

#[test]
fn test_manual_cache_access() {
    let m = Manager::new(ManagerConfig::default());
    let r = root(&m);
    let p = Frame::construct(&m, "P", false, Some(&r), offset(1.0)).unwrap();
    let t = Instant::j2000();

    assert!(m.access_cached_transform(&r, &p, &t).is_none());
    assert_eq!(
        m.add_cached_transform(&r, &p, t, Transform::undefined()),
        Err(FrameError::UndefinedOperand("Transform"))
    );

    let planted = Transform::identity(t);
    m.add_cached_transform(&r, &p, t, planted).unwrap();
    assert_eq!(m.access_cached_transform(&r, &p, &t), Some(planted));
    assert_eq!(m.cached_source_count(), 1);

    m.clear_cache();
    assert_eq!(m.cached_transform_count(), 0);
}

#[test]
fn test_concurrent_resolution_agrees() {
    let m = Manager::new(ManagerConfig::default().with_max_transform_cache_size(3).unwrap());
    let r = root(&m);
    let counter = Arc::new(CountingProvider::default());
    let shared: Arc<dyn TransformProvider> = counter.clone();
    let p = Frame::construct(&m, "P", false, Some(&r), Provider::from(shared)).unwrap();
    let q = Frame::construct(&m, "Q", true, Some(&p), offset(2.0)).unwrap();
    let expected: Vec<Transform> = (0..50)
        .map(|i| {
            let t = Instant::j2000().add_seconds(i as f64).unwrap();
            let manager = Manager::new(ManagerConfig::default());
            let r = root(&manager);
            let provider = Provider::custom(CountingProvider::default());
            let p = Frame::construct(&manager, "P", false, Some(&r), provider).unwrap();
            let q = Frame::construct(&manager, "Q", true, Some(&p), offset(2.0)).unwrap();
            r.transform_to(&q, &t, &manager).unwrap()
        })
        .collect();

    thread::scope(|scope| {
        for _ in 0..8 {
            scope.spawn(|| {
                for (i, want) in expected.iter().enumerate() {
                    let t = Instant::j2000().add_seconds(i as f64).unwrap();
                    let got = r.transform_to(&q, &t, &m).unwrap();
                    assert_eq!(&got, want);
                    let back = q.transform_to(&r, &t, &m).unwrap();
                    assert!(back.compose(&got).unwrap().is_identity());
                }
            });
        }
    });

    assert!(counter.calls() >= 50);
}
