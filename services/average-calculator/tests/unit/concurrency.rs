//! Serializability of concurrent window merges

use average_calculator::{
    AverageAggregator, NumberKind, NumberProvider, WindowStore, window::merge_window,
};
use async_trait::async_trait;
use futures::future::join_all;
use rustc_hash::FxHashSet;
use std::{sync::Arc, time::Duration};

fn permutations(items: &[Vec<i64>]) -> Vec<Vec<Vec<i64>>> {
    if items.len() <= 1 {
        return vec![items.to_vec()];
    }
    let mut result = Vec::new();
    for i in 0..items.len() {
        let mut rest = items.to_vec();
        let head = rest.remove(i);
        for mut tail in permutations(&rest) {
            tail.insert(0, head.clone());
            result.push(tail);
        }
    }
    result
}

fn sequential_outcomes(inputs: &[Vec<i64>], capacity: usize) -> FxHashSet<Vec<i64>> {
    permutations(inputs)
        .into_iter()
        .map(|order| {
            order
                .iter()
                .fold(Vec::new(), |window, incoming| merge_window(&window, incoming, capacity))
        })
        .collect()
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_merges_match_some_sequential_order() {
    let inputs = vec![
        vec![1, 2, 3],
        vec![3, 4, 5, 6],
        vec![6, 7, 1],
        vec![8, 2, 9, 10],
    ];
    let capacity = 5;
    let allowed = sequential_outcomes(&inputs, capacity);

    for _ in 0..200 {
        let store = Arc::new(WindowStore::new(capacity));
        let handles = inputs.iter().cloned().map(|incoming| {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.merge(&incoming) })
        });
        for result in join_all(handles).await {
            result.unwrap();
        }

        let final_state = store.snapshot();
        assert!(
            allowed.contains(&final_state),
            "{final_state:?} is not reachable by any sequential order"
        );
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_no_merge_is_lost() {
    let store = Arc::new(WindowStore::new(100));
    let handles = (0..20_i64).map(|task| {
        let store = Arc::clone(&store);
        tokio::spawn(async move {
            let block: Vec<i64> = (task * 5..task * 5 + 5).collect();
            store.merge(&block)
        })
    });
    for result in join_all(handles).await {
        let transition = result.unwrap();
        assert!(transition.curr.len() <= 100);
    }

    let final_state = store.snapshot();
    assert_eq!(final_state.len(), 100);

    // Each task's block must appear whole and contiguous
    for task in 0..20_i64 {
        let start = final_state.iter().position(|&v| v == task * 5).unwrap();
        let expected: Vec<i64> = (task * 5..task * 5 + 5).collect();
        assert_eq!(&final_state[start..start + 5], expected.as_slice());
    }
}

/// Answers after a delay so requests overlap inside the provider call
struct SlowProvider;

#[async_trait]
impl NumberProvider for SlowProvider {
    async fn fetch(&self, _kind: NumberKind, known: &[i64]) -> Vec<i64> {
        tokio::time::sleep(Duration::from_millis(20)).await;
        let next = known.iter().max().copied().unwrap_or(0);
        vec![next + 1, next + 2]
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_requests_keep_window_invariants() {
    let store = Arc::new(WindowStore::new(10));
    let aggregator = AverageAggregator::new(Arc::clone(&store), Arc::new(SlowProvider));

    let handles = (0..32).map(|_| {
        let aggregator = aggregator.clone();
        tokio::spawn(async move { aggregator.aggregate(NumberKind::Even).await })
    });

    for result in join_all(handles).await {
        let response = result.unwrap();
        for state in [&response.window_prev_state, &response.window_curr_state] {
            let distinct: FxHashSet<_> = state.iter().collect();
            assert!(state.len() <= 10);
            assert_eq!(distinct.len(), state.len());
        }
    }
}

#[tokio::test]
async fn test_cancelled_request_leaves_window_untouched() {
    let store = Arc::new(WindowStore::new(10));
    store.merge(&[1, 2, 3]);
    let aggregator = AverageAggregator::new(Arc::clone(&store), Arc::new(SlowProvider));

    let outcome = tokio::time::timeout(
        Duration::from_millis(1),
        aggregator.aggregate(NumberKind::Primes),
    )
    .await;

    assert!(outcome.is_err());
    assert_eq!(store.snapshot(), vec![1, 2, 3]);
}
