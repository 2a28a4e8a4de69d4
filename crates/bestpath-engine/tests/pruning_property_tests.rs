use bestpath_engine::reference::{enumerate_all, enumerate_top_k};
use bestpath_engine::{BestPath, ChainRows, EdgeRow};
use proptest::prelude::*;

const MAX_ROWS: usize = 12;

fn edge_row_strategy(keys: i32) -> impl Strategy<Value = EdgeRow> {
    (
        prop::option::weighted(0.92, 0..keys),
        prop::option::weighted(0.92, 0..keys),
        prop::option::weighted(0.92, -20i32..=20),
    )
        .prop_map(|(from, to, weight)| EdgeRow::new(from, to, weight))
}

/// Small instances over few distinct keys, so many paths share
/// intermediate keys and per-key pruning is exercised hard.
fn chain_strategy() -> impl Strategy<Value = ChainRows> {
    (1i32..=5)
        .prop_flat_map(|keys| {
            let rows = move || prop::collection::vec(edge_row_strategy(keys), 0..MAX_ROWS);
            (rows(), rows(), rows(), rows())
        })
        .prop_map(|(seed, s, t, u)| ChainRows::new(seed, [s, t, u]))
}

fn weights(paths: &[BestPath]) -> Vec<i64> {
    paths.iter().map(|p| p.sum_w).collect()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        failure_persistence: None,
        ..ProptestConfig::default()
    })]

    #[test]
    fn top_k_weights_match_exhaustive_enumeration(rows in chain_strategy(), k in 1i64..=6) {
        let got = rows.top_k(k).unwrap();
        let expected = enumerate_top_k(&rows, k as usize);
        prop_assert_eq!(weights(&got), weights(&expected));
    }

    #[test]
    fn results_are_real_paths_best_first_and_at_most_k(rows in chain_strategy(), k in 1i64..=6) {
        let got = rows.top_k(k).unwrap();
        prop_assert!(got.len() <= k as usize);
        prop_assert!(got.windows(2).all(|w| w[0].sum_w >= w[1].sum_w));

        // Multiset containment: every result (null-free by construction of the
        // enumeration) is a distinct full path of the join.
        let mut pool = enumerate_all(&rows);
        for p in &got {
            let Some(i) = pool.iter().position(|q| q == p) else {
                return Err(TestCaseError::fail(format!("{p:?} is not a path of the join")));
            };
            pool.swap_remove(i);
        }
    }

    #[test]
    fn k_one_finds_the_maximum_total_weight(rows in chain_strategy()) {
        let got = rows.top_k(1).unwrap();
        let best = enumerate_all(&rows).iter().map(|p| p.sum_w).max();
        prop_assert_eq!(got.first().map(|p| p.sum_w), best);
    }

    #[test]
    fn identical_inputs_give_identical_outputs(rows in chain_strategy(), k in 1i64..=6) {
        let first = rows.top_k(k).unwrap();
        let second = rows.clone().top_k(k).unwrap();
        prop_assert_eq!(first, second);
    }
}
