//! Invalidation marshalling and the stale-signal race.

use super::test_utils::{init_tracing, GatedSource, SharedSource};
use listwindow::engine::LoadInitialRequest;
use listwindow::factory::GenerationFactory;
use listwindow::types::GenerationId;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn test_signal_lands_on_generation_captured_at_enqueue_time() {
    init_tracing();
    let source = SharedSource::with_len(100);
    let factory = GenerationFactory::new(move || source.clone());

    // Test double recording which generation received the signal.
    let signalled: Arc<Mutex<Vec<GenerationId>>> = Arc::new(Mutex::new(Vec::new()));

    let g1 = factory.create_generation();
    let recorder = tokio::spawn({
        let g1 = g1.clone();
        let signalled = Arc::clone(&signalled);
        async move {
            g1.invalidated().await;
            signalled.lock().push(g1.id());
        }
    });

    // Enqueue targets g1; installing g2 before delivery must not retarget it.
    factory.invalidate();
    let g2 = factory.create_generation();

    recorder.await.unwrap();
    tokio::time::sleep(Duration::from_millis(10)).await;

    assert_eq!(*signalled.lock(), vec![g1.id()]);
    assert!(g1.is_invalidated());
    assert!(!g2.is_invalidated());
}

#[tokio::test]
async fn test_invalidate_from_worker_context_mid_load() {
    init_tracing();
    let source = GatedSource::with_len(100);
    let factory = Arc::new(GenerationFactory::new({
        let source = source.clone();
        move || source.clone()
    }));

    let g1 = factory.create_generation();
    let in_flight = tokio::spawn({
        let g1 = g1.clone();
        async move {
            g1.load_initial(LoadInitialRequest {
                requested_start_position: 0,
                requested_load_size: 20,
                page_size: 20,
                placeholders_enabled: true,
            })
            .await
        }
    });

    // Invalidate from a worker task while the load is parked in the source.
    let invalidator = tokio::spawn({
        let factory = Arc::clone(&factory);
        async move { factory.invalidate() }
    });
    invalidator.await.unwrap();
    g1.invalidated().await;

    // The in-flight load still completes; the consumer drops it because its
    // generation was signalled, not because the call failed.
    source.release(1);
    let late = in_flight.await.unwrap().unwrap();
    assert_eq!(late.generation, g1.id());
    assert!(g1.is_invalidated());
}

#[tokio::test]
async fn test_repeated_invalidations_are_harmless() {
    init_tracing();
    let source = SharedSource::with_len(100);
    let factory = GenerationFactory::new(move || source.clone());
    let generation = factory.create_generation();

    factory.invalidate();
    factory.invalidate();
    factory.invalidate();
    generation.invalidated().await;
    assert!(generation.is_invalidated());
}

#[tokio::test]
async fn test_each_generation_gets_a_fresh_source() {
    init_tracing();
    let constructed = Arc::new(AtomicUsize::new(0));
    let factory = GenerationFactory::new({
        let constructed = Arc::clone(&constructed);
        move || {
            constructed.fetch_add(1, Ordering::SeqCst);
            SharedSource::with_len(10)
        }
    });

    let _g1 = factory.create_generation();
    let _g2 = factory.create_generation();
    let _g3 = factory.create_generation();
    assert_eq!(constructed.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_no_signal_without_invalidate() {
    init_tracing();
    let source = SharedSource::with_len(100);
    let factory = GenerationFactory::new(move || source.clone());
    let generation = factory.create_generation();

    tokio::time::sleep(Duration::from_millis(10)).await;
    assert!(!generation.is_invalidated());
}
