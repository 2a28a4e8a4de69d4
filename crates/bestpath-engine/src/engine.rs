//! The best-path engine: drives Seed → (Rekey → Extend) × 3 → GlobalMerge.

use anyhow::bail;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::path::{BestPath, EdgeRow};
use crate::query::{ChainQuery, RelationReader, RelationRequest};
use crate::stage::{self, StageStats};

/// Default relation names, in chain order.
pub const DEFAULT_RELATIONS: [&str; 4] = ["r", "s", "t", "u"];
/// Default join columns between consecutive relations.
pub const DEFAULT_JOIN_COLUMNS: [&str; 3] = ["b", "c", "d"];

/// Results of one run plus per-stage counters.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    pub results: Vec<BestPath>,
    pub stages: Vec<StageStats>,
}

pub struct BestPathEngine<R> {
    reader: R,
}

impl<R: RelationReader> BestPathEngine<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    pub fn reader(&self) -> &R {
        &self.reader
    }

    /// The K best complete paths, best first.
    pub fn run(&self, query: &ChainQuery) -> Result<Vec<BestPath>> {
        Ok(self.run_with_report(query)?.results)
    }

    pub fn run_with_report(&self, query: &ChainQuery) -> Result<RunReport> {
        let k = query.capacity()?;
        let mut stages = Vec::with_capacity(8);

        let rows = self.read(&query.seed_request())?;
        let (mut content, stats) = stage::seed(rows, k);
        stages.push(stats);

        for request in query.edge_requests() {
            let (join, stats) = stage::rekey(content);
            stages.push(stats);

            let rows = self.read(&request)?;
            let (next, stats) = stage::extend(join, rows);
            stages.push(stats);
            content = next;
        }

        let (states, stats) = stage::global_merge(content);
        stages.push(stats);

        let results = states
            .into_iter()
            .map(BestPath::try_from)
            .collect::<Result<Vec<_>>>()?;

        info!(
            k = k.get(),
            results = results.len(),
            best = results.first().map(|p| p.sum_w),
            "best-path run complete"
        );
        Ok(RunReport { results, stages })
    }

    fn read(&self, request: &RelationRequest) -> Result<Vec<EdgeRow>> {
        let rows = self
            .reader
            .read_relation(request)
            .map_err(|err| Error::data_source(&request.relation, err))?;
        debug!(
            relation = %request.relation,
            columns = ?request.columns,
            rows = rows.len(),
            "relation read"
        );
        Ok(rows)
    }
}

/// Relation contents that are already in memory, in chain order.
///
/// Answers requests for [`DEFAULT_RELATIONS`]; handy for tests, generators
/// and the reference enumerator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChainRows {
    pub seed: Vec<EdgeRow>,
    pub edges: [Vec<EdgeRow>; 3],
}

impl ChainRows {
    pub fn new(seed: Vec<EdgeRow>, edges: [Vec<EdgeRow>; 3]) -> Self {
        Self { seed, edges }
    }

    /// The default query over these rows.
    pub fn query(k: i64) -> ChainQuery {
        ChainQuery::new(DEFAULT_RELATIONS, DEFAULT_JOIN_COLUMNS, k)
    }

    /// Run the engine over these rows.
    pub fn top_k(&self, k: i64) -> Result<Vec<BestPath>> {
        BestPathEngine::new(self).run(&Self::query(k))
    }
}

impl RelationReader for ChainRows {
    fn read_relation(&self, request: &RelationRequest) -> anyhow::Result<Vec<EdgeRow>> {
        let rows = match DEFAULT_RELATIONS
            .iter()
            .position(|name| *name == request.relation)
        {
            Some(0) => &self.seed,
            Some(i) => &self.edges[i - 1],
            None => bail!("unknown relation `{}`", request.relation),
        };
        Ok(rows.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingReader;

    impl RelationReader for FailingReader {
        fn read_relation(&self, request: &RelationRequest) -> anyhow::Result<Vec<EdgeRow>> {
            bail!("relation `{}` is not readable", request.relation)
        }
    }

    #[test]
    fn reader_failure_aborts_with_data_source_error() {
        let engine = BestPathEngine::new(FailingReader);
        let err = engine.run(&ChainRows::query(3)).unwrap_err();
        match err {
            Error::DataSource { relation, source } => {
                assert_eq!(relation, "r");
                assert!(source.to_string().contains("not readable"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn report_lists_every_stage_in_order() {
        let rows = ChainRows::new(
            vec![EdgeRow::of(1, 10, 5)],
            [
                vec![EdgeRow::of(10, 20, 3)],
                vec![EdgeRow::of(20, 30, 2)],
                vec![EdgeRow::of(30, 40, 1)],
            ],
        );
        let report = BestPathEngine::new(&rows)
            .run_with_report(&ChainRows::query(1))
            .unwrap();
        let names: Vec<&str> = report.stages.iter().map(|s| s.stage.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "seed(a,b)",
                "rekey(b)",
                "extend(c)",
                "rekey(c)",
                "extend(d)",
                "rekey(d)",
                "extend(e)",
                "merge"
            ]
        );
        assert_eq!(report.results.len(), 1);
    }
}
