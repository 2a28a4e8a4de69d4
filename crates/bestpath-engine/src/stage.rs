//! Pipeline stages: Seed, Rekey, Extend and GlobalMerge.
//!
//! ```text
//! seed rows ─► Seed ─► content(a,b) ─► Rekey ─► join(b) ─┐
//!                                                          ├─► Extend ─► content(..c) ─► Rekey ─► ...
//!                                          edge rows (b,c) ┘
//! ... ─► content(..e) ─► GlobalMerge ─► top K, best first
//! ```
//!
//! Pruning to K per key is lossless because every later extension of a path
//! depends only on that path's frontier position, never on its history: the
//! K best states at a frontier value dominate every state dropped there.
//! Content layers are therefore grouped by frontier, which is also the key
//! the following Rekey regroups by.

use std::num::NonZeroUsize;

use serde::Serialize;
use tracing::debug;

use crate::layer::{Layer, LayerKind};
use crate::path::{EdgeRow, PathState};
use crate::topk::BoundedTopK;

/// Column names of the path template, by position.
pub const POSITION_NAMES: [&str; 5] = ["a", "b", "c", "d", "e"];

fn position_name(index: usize) -> &'static str {
    POSITION_NAMES.get(index).copied().unwrap_or("?")
}

/// Counters for one stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StageStats {
    pub stage: String,
    /// Rows (Seed/Extend) or path states (Rekey/GlobalMerge) consumed.
    pub rows_in: usize,
    /// Rows dropped for a null key or weight.
    pub skipped: usize,
    /// Edge rows whose join key had no surviving paths.
    pub unmatched: usize,
    /// Distinct keys in the produced layer.
    pub keys: usize,
    /// Path states in the produced layer (or result length).
    pub paths: usize,
}

impl StageStats {
    fn new(stage: impl Into<String>) -> Self {
        Self {
            stage: stage.into(),
            ..Self::default()
        }
    }

    fn finish(mut self, keys: usize, paths: usize) -> Self {
        self.keys = keys;
        self.paths = paths;
        debug!(
            stage = %self.stage,
            rows_in = self.rows_in,
            skipped = self.skipped,
            unmatched = self.unmatched,
            keys = self.keys,
            paths = self.paths,
            "stage complete"
        );
        self
    }
}

/// Build the first content layer from seed rows `(a, b, w1)`.
pub fn seed<I>(rows: I, k: NonZeroUsize) -> (Layer, StageStats)
where
    I: IntoIterator<Item = EdgeRow>,
{
    let mut layer = Layer::new(LayerKind::Content, 2, k);
    let mut stats = StageStats::new("seed(a,b)");

    for row in rows {
        stats.rows_in += 1;
        let Some((a, b, w1)) = row.complete() else {
            stats.skipped += 1;
            continue;
        };
        layer.index_mut().insert(b, PathState::seed(a, b, w1));
    }

    let stats = stats.finish(layer.key_count(), layer.path_count());
    (layer, stats)
}

/// Regroup a content layer into a join layer keyed by each state's frontier.
///
/// Path states are carried over unchanged; the top-K rule still applies at
/// the new key, where paths from several old keys may converge.
pub fn rekey(content: Layer) -> (Layer, StageStats) {
    debug_assert_eq!(content.kind(), LayerKind::Content);

    let depth = content.depth();
    let mut join = Layer::new(LayerKind::Join, depth, content.k());
    let mut stats = StageStats::new(format!("rekey({})", position_name(depth - 1)));

    for entry in content.into_index().into_entries() {
        for path in entry.into_paths().into_arrival_vec() {
            stats.rows_in += 1;
            match path.frontier() {
                Some(key) => {
                    join.index_mut().insert(key, path);
                }
                None => stats.skipped += 1,
            }
        }
    }

    let stats = stats.finish(join.key_count(), join.path_count());
    (join, stats)
}

/// Extend every path at a matching join key by one edge row
/// `(key, next, weight)`. Rows without surviving paths are skipped.
pub fn extend<I>(join: Layer, rows: I) -> (Layer, StageStats)
where
    I: IntoIterator<Item = EdgeRow>,
{
    debug_assert_eq!(join.kind(), LayerKind::Join);

    let depth = join.depth() + 1;
    let mut content = Layer::new(LayerKind::Content, depth, join.k());
    let mut stats = StageStats::new(format!("extend({})", position_name(depth - 1)));

    for row in rows {
        stats.rows_in += 1;
        let Some((key, next, weight)) = row.complete() else {
            stats.skipped += 1;
            continue;
        };
        let Some(entry) = join.index().find(key) else {
            stats.unmatched += 1;
            continue;
        };
        for path in entry.iter() {
            content
                .index_mut()
                .insert(next, path.extended(next, weight));
        }
    }
    drop(join);

    let stats = stats.finish(content.key_count(), content.path_count());
    (content, stats)
}

/// Reduce the last content layer to the overall K best, best first.
pub fn global_merge(content: Layer) -> (Vec<PathState>, StageStats) {
    let mut top = BoundedTopK::new(content.k());
    let mut stats = StageStats::new("merge");

    for entry in content.into_index().into_entries() {
        for path in entry.into_paths().into_arrival_vec() {
            stats.rows_in += 1;
            top.insert(path);
        }
    }

    let results = top.into_sorted_vec();
    let stats = stats.finish(0, results.len());
    (results, stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn k(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn seed_groups_by_frontier_and_skips_nulls() {
        let rows = vec![
            EdgeRow::of(1, 10, 5),
            EdgeRow::of(1, 11, 1),
            EdgeRow::new(None, Some(10), Some(3)),
            EdgeRow::new(Some(2), Some(10), None),
        ];
        let (layer, stats) = seed(rows, k(1));

        assert_eq!(layer.kind(), LayerKind::Content);
        assert_eq!(layer.depth(), 2);
        assert_eq!(stats.rows_in, 4);
        assert_eq!(stats.skipped, 2);
        // Same `a`, different `b`: both survive with K = 1.
        assert_eq!(layer.key_count(), 2);
        assert_eq!(layer.path_count(), 2);
    }

    #[test]
    fn rekey_converging_paths_keeps_k_best() {
        let (content, _) = seed(
            vec![
                EdgeRow::of(1, 10, 5),
                EdgeRow::of(2, 10, 9),
                EdgeRow::of(3, 10, 7),
            ],
            k(2),
        );
        let (join, stats) = rekey(content);

        assert_eq!(join.kind(), LayerKind::Join);
        assert_eq!(stats.rows_in, 2);
        let mut weights: Vec<i64> = join
            .index()
            .find(10)
            .unwrap()
            .iter()
            .map(PathState::sum_w)
            .collect();
        weights.sort();
        assert_eq!(weights, vec![7, 9]);
    }

    #[test]
    fn extend_counts_unmatched_rows() {
        let (content, _) = seed(vec![EdgeRow::of(1, 10, 5)], k(3));
        let (join, _) = rekey(content);
        let (next, stats) = extend(
            join,
            vec![
                EdgeRow::of(10, 20, 3),
                EdgeRow::of(10, 21, -1),
                EdgeRow::of(99, 22, 100),
                EdgeRow::new(Some(10), None, Some(1)),
            ],
        );

        assert_eq!(next.depth(), 3);
        assert_eq!(stats.unmatched, 1);
        assert_eq!(stats.skipped, 1);
        assert_eq!(next.key_count(), 2);
        let at_21: Vec<PathState> = next.index().find(21).unwrap().iter().copied().collect();
        assert_eq!(at_21.len(), 1);
        assert_eq!(at_21[0].sum_w(), 4);
        assert_eq!(at_21[0].frontier(), Some(21));
    }

    #[test]
    fn merge_sorts_best_first() {
        let (content, _) = seed(
            vec![
                EdgeRow::of(1, 10, 5),
                EdgeRow::of(2, 11, 9),
                EdgeRow::of(3, 12, 7),
                EdgeRow::of(4, 13, 1),
            ],
            k(3),
        );
        let (results, stats) = global_merge(content);
        let weights: Vec<i64> = results.iter().map(PathState::sum_w).collect();
        assert_eq!(weights, vec![9, 7, 5]);
        assert_eq!(stats.rows_in, 4);
        assert_eq!(stats.paths, 3);
    }
}
