use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use gen4ids::{
    search, Gen4Generator, IdGenerator, IdPair, IdResult, SearchError, SearchParameters, SearchSpace,
};

// ---------------------------------------------------------------------------
// Test helpers
// ---------------------------------------------------------------------------

/// A generator that sleeps on every seed, so a run lasts long enough to be
/// observed and cancelled mid-flight.
struct SlowGenerator;

impl IdGenerator for SlowGenerator {
    fn generate(&self, seed: u32) -> IdPair {
        thread::sleep(Duration::from_micros(20));
        IdPair::from_u32(seed.rotate_left(7))
    }
}

/// Reference enumeration, written independently of the engine.
fn expected_matches(min: u32, max: u32, tids: &[u16], sids: &[u16]) -> Vec<IdResult> {
    let mut out = Vec::new();
    for delay in min..max {
        for ab in 0u32..256 {
            for hour in 0u32..24 {
                let seed = ((ab << 24) | (hour << 16)) + delay;
                let pair = Gen4Generator.generate(seed);
                if (tids.is_empty() || tids.contains(&pair.tid))
                    && (sids.is_empty() || sids.contains(&pair.sid))
                {
                    out.push(IdResult { seed, tid: pair.tid, sid: pair.sid, delay });
                }
            }
        }
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn finds_known_gen4_seed() {
    let results = search()
        .tid_filter([44235])
        .bounded(600, 602)
        .run()
        .unwrap();

    assert_eq!(
        results.results,
        vec![IdResult { seed: 600, tid: 44235, sid: 8907, delay: 600 }]
    );
    assert_eq!(results.progress, 2 * 256 * 24);
    assert!(!results.cancelled);
}

#[test]
fn matches_reference_enumeration_in_order() {
    let sids: Vec<u16> = (0..1000).collect();
    let results = search()
        .sid_filter(sids.iter().copied())
        .bounded(600, 602)
        .run()
        .unwrap();

    let expected = expected_matches(600, 602, &[], &sids);
    assert_eq!(expected.len(), 171);
    assert_eq!(results.results, expected);
    assert_eq!(
        results.results[0],
        IdResult { seed: 34_996_824, tid: 43570, sid: 319, delay: 600 }
    );
}

#[test]
fn every_result_passes_both_filters() {
    let tids = [1000, 2000, 3000, 40000, 50000];
    let sids: Vec<u16> = (0..=u16::MAX).filter(|s| s % 3 == 0).collect();
    let results = search()
        .tid_filter(tids)
        .sid_filter(sids.iter().copied())
        .bounded(0, 40)
        .run()
        .unwrap();

    for r in &results.results {
        assert!(tids.contains(&r.tid));
        assert_eq!(r.sid % 3, 0);
        assert_eq!(Gen4Generator.generate(r.seed), IdPair { tid: r.tid, sid: r.sid });
    }
}

#[test]
fn empty_filters_match_everything() {
    let results = search().bounded(5, 6).run().unwrap();
    assert_eq!(results.results.len(), 256 * 24);
    assert_eq!(results.results, expected_matches(5, 6, &[], &[]));
}

#[test]
fn zero_width_range_completes_immediately() {
    let results = search().bounded(0, 0).run().unwrap();
    assert_eq!(results.max_progress, 0);
    assert_eq!(results.progress, 0);
    assert!(results.results.is_empty());
    assert!(!results.cancelled);
}

#[test]
fn inverted_range_runs_zero_iterations() {
    let results = search().bounded(10, 5).run().unwrap();
    assert_eq!(results.max_progress, 0);
    assert_eq!(results.stats.seeds, 0);
}

#[test]
fn max_progress_follows_space() {
    let params = SearchParameters::from_text("", "", "5", "10", false).unwrap();
    assert_eq!(params.max_progress(), 30720);

    let handle = search().parameters(params).start().unwrap();
    assert_eq!(handle.max_progress(), 30720);
    let results = handle.wait().unwrap();
    assert_eq!(results.progress, 30720);
}

#[test]
fn identical_runs_are_deterministic() {
    let run = || {
        search()
            .tid_filter((0..2000).collect::<Vec<u16>>())
            .bounded(700, 703)
            .run()
            .unwrap()
            .results
    };
    let first = run();
    assert!(!first.is_empty());
    assert_eq!(first, run());
}

#[test]
fn progress_is_monotonic_and_bounded() {
    let handle = search()
        .generator(SlowGenerator)
        .bounded(0, 1)
        .start()
        .unwrap();

    let max = handle.max_progress();
    let mut last = 0;
    while !handle.is_finished() {
        let now = handle.current_progress();
        assert!(now >= last, "progress went backwards: {last} -> {now}");
        assert!(now <= max);
        last = now;
        thread::sleep(Duration::from_millis(1));
    }
    assert_eq!(handle.current_progress(), max);
}

#[test]
fn partial_results_are_prefixes() {
    let full = search()
        .generator(|seed: u32| IdPair::from_u32(seed.rotate_left(7)))
        .bounded(0, 1)
        .run()
        .unwrap()
        .results;

    let handle = search().generator(SlowGenerator).bounded(0, 1).start().unwrap();
    let mut seen = Vec::new();
    handle.watch(Duration::from_millis(5), |snap| seen.push(snap.results.clone()));

    assert!(seen.last().unwrap().len() == full.len());
    for partial in &seen {
        assert_eq!(partial.as_slice(), &full[..partial.len()]);
    }
}

#[test]
fn cancellation_keeps_a_prefix_of_the_full_run() {
    let full = search()
        .generator(|seed: u32| IdPair::from_u32(seed.rotate_left(7)))
        .bounded(0, 2)
        .run()
        .unwrap();

    let handle = search().generator(SlowGenerator).bounded(0, 2).start().unwrap();
    thread::sleep(Duration::from_millis(100));
    let seen_before = handle.current_progress();
    let observed_at_cancel = handle.cancel_search();
    let cancelled = handle.wait().unwrap();

    assert!(cancelled.cancelled);
    assert!(observed_at_cancel >= seen_before);
    assert!(cancelled.progress <= observed_at_cancel);
    assert!(cancelled.progress < full.progress);
    assert_eq!(cancelled.stats.seeds, cancelled.progress);
    assert_eq!(
        cancelled.results.as_slice(),
        &full.results[..cancelled.results.len()]
    );
}

#[test]
fn progress_stays_frozen_after_cancel() {
    let handle = search().generator(SlowGenerator).bounded(0, 2).start().unwrap();
    thread::sleep(Duration::from_millis(30));
    let observed_at_cancel = handle.cancel_search();

    // the worker may still be inside one point; it must not be counted
    thread::sleep(Duration::from_millis(20));
    assert_eq!(handle.current_progress(), observed_at_cancel);

    let results = handle.wait().unwrap();
    assert_eq!(results.progress, observed_at_cancel);
    assert_eq!(results.results.len() as u64, observed_at_cancel);
}

#[test]
fn panicking_generator_still_signals_completion() {
    let (tx, rx) = std::sync::mpsc::channel();
    let handle = search()
        .generator(|seed: u32| {
            assert!(seed <= 100, "generator failure");
            IdPair::from_u32(seed)
        })
        .unbounded()
        .start()
        .unwrap();

    let watcher = thread::spawn(move || {
        let mut last = None;
        handle.watch(Duration::from_millis(10), |snap| last = Some(snap.clone()));
        tx.send(last).unwrap();
        handle
    });

    let last = rx
        .recv_timeout(Duration::from_secs(3))
        .expect("watch did not return after the worker panicked")
        .unwrap();
    assert!(last.finished);
    assert_eq!(last.progress, 101);

    let handle = watcher.join().unwrap();
    assert!(handle.is_finished());
    assert!(matches!(handle.wait(), Err(SearchError::WorkerPanicked)));
}

#[test]
fn cancelled_unbounded_search_stops_quickly() {
    let handle = search().sid_filter([1, 2, 3]).unbounded().start().unwrap();
    assert_eq!(handle.max_progress(), 1 << 32);
    handle.cancel_search();

    let results = handle.wait().unwrap();
    assert!(results.cancelled);
    assert!(results.progress < results.max_progress);
    assert!(results.results.iter().all(|r| (1..=3).contains(&r.sid)));
}

#[test]
fn finished_callback_fires_once() {
    let calls = Arc::new(AtomicUsize::new(0));
    let seen = Arc::new(Mutex::new(None));

    let handle = {
        let calls = Arc::clone(&calls);
        let seen = Arc::clone(&seen);
        search()
            .tid_filter([44235])
            .bounded(600, 601)
            .on_finished(move |r| {
                calls.fetch_add(1, Ordering::SeqCst);
                *seen.lock().unwrap() = Some(r.results.len());
            })
            .start()
            .unwrap()
    };
    handle.cancel_search();
    handle.wait().unwrap();

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert!(seen.lock().unwrap().is_some());
}

#[test]
fn watch_ends_with_a_finished_snapshot() {
    let handle = search().bounded(0, 3).start().unwrap();
    let mut last = None;
    let mut ticks = 0;
    handle.watch(Duration::from_millis(1), |snap| {
        ticks += 1;
        last = Some(snap.clone());
    });

    let last = last.unwrap();
    assert!(ticks >= 1);
    assert!(last.finished);
    assert_eq!(last.progress, 3 * 256 * 24);
    assert_eq!(last.percent(), 100.0);
}

#[test]
fn dropping_the_handle_cancels() {
    let calls = Arc::new(AtomicUsize::new(0));
    let flag = Arc::clone(&calls);
    let handle = search()
        .unbounded()
        .tid_filter([0])
        .on_finished(move |r| {
            assert!(r.cancelled);
            flag.fetch_add(1, Ordering::SeqCst);
        })
        .start()
        .unwrap();
    drop(handle);

    for _ in 0..500 {
        if calls.load(Ordering::SeqCst) == 1 {
            return;
        }
        thread::sleep(Duration::from_millis(10));
    }
    panic!("worker did not stop after the handle was dropped");
}

#[test]
fn unbounded_space_reports_low_delay_bits() {
    let space = SearchSpace::Unbounded;
    let point = space.point(0x1234_5678);
    assert_eq!(point.seed, 0x1234_5678);
    assert_eq!(point.delay, 0x5678);
}
