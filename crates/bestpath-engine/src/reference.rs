//! Exhaustive reference: enumerate every full path of the join and sort.
//!
//! Exponential in the fan-out of each join; only meant for verification on
//! small inputs.

use std::collections::HashMap;

use crate::engine::ChainRows;
use crate::path::{BestPath, EdgeRow};

/// Every complete path, best first; ties keep enumeration order.
pub fn enumerate_all(rows: &ChainRows) -> Vec<BestPath> {
    let [s, t, u] = &rows.edges;
    let s = group_by_from(s);
    let t = group_by_from(t);
    let u = group_by_from(u);

    let mut out = Vec::new();
    for (a, b, w1) in rows.seed.iter().filter_map(|r| r.complete()) {
        for &(c, w2) in s.get(&b).into_iter().flatten() {
            for &(d, w3) in t.get(&c).into_iter().flatten() {
                for &(e, w4) in u.get(&d).into_iter().flatten() {
                    let sum_w = [w1, w2, w3, w4].into_iter().map(i64::from).sum();
                    out.push(BestPath {
                        a,
                        b,
                        c,
                        d,
                        e,
                        sum_w,
                    });
                }
            }
        }
    }

    // Stable: equal weights stay in enumeration order.
    out.sort_by(|x, y| y.sum_w.cmp(&x.sum_w));
    out
}

/// The first `k` of [`enumerate_all`].
pub fn enumerate_top_k(rows: &ChainRows, k: usize) -> Vec<BestPath> {
    let mut all = enumerate_all(rows);
    all.truncate(k);
    all
}

fn group_by_from(rows: &[EdgeRow]) -> HashMap<i32, Vec<(i32, i32)>> {
    let mut grouped: HashMap<i32, Vec<(i32, i32)>> = HashMap::new();
    for (from, to, weight) in rows.iter().filter_map(|r| r.complete()) {
        grouped.entry(from).or_default().push((to, weight));
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enumerates_the_full_cross_product_of_matches() {
        let rows = ChainRows::new(
            vec![EdgeRow::of(1, 10, 1), EdgeRow::of(2, 10, 2)],
            [
                vec![EdgeRow::of(10, 20, 10), EdgeRow::of(10, 21, 20)],
                vec![EdgeRow::of(20, 30, 0), EdgeRow::of(21, 30, 0)],
                vec![EdgeRow::of(30, 40, 100), EdgeRow::new(Some(30), None, Some(5))],
            ],
        );
        let all = enumerate_all(&rows);
        let weights: Vec<i64> = all.iter().map(|p| p.sum_w).collect();
        assert_eq!(weights, vec![122, 121, 112, 111]);
        assert_eq!(all[0].positions(), [2, 10, 21, 30, 40]);
        assert_eq!(enumerate_top_k(&rows, 2).len(), 2);
    }
}
