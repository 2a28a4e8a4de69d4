//! Cross-check the engine against exhaustive enumeration of the join.

use anyhow::{bail, Result};
use bestpath_engine::reference::enumerate_top_k;
use bestpath_engine::{BestPath, BestPathEngine, ChainQuery, ChainRows, RelationReader};
use colored::Colorize;
use tracing::info;

#[derive(Debug)]
pub(crate) struct Verdict {
    pub(crate) engine: Vec<BestPath>,
    pub(crate) reference: Vec<BestPath>,
}

impl Verdict {
    /// Equal weight sequences. Paths may differ where weights tie.
    pub(crate) fn agrees(&self) -> bool {
        self.engine.len() == self.reference.len()
            && self
                .engine
                .iter()
                .zip(&self.reference)
                .all(|(a, b)| a.sum_w == b.sum_w)
    }
}

pub(crate) fn verify<R: RelationReader>(reader: &R, query: &ChainQuery) -> Result<Verdict> {
    let k = query.capacity()?;
    let engine = BestPathEngine::new(reader).run(query)?;

    let [s, t, u] = query.edge_requests();
    let rows = ChainRows::new(
        reader.read_relation(&query.seed_request())?,
        [
            reader.read_relation(&s)?,
            reader.read_relation(&t)?,
            reader.read_relation(&u)?,
        ],
    );
    let reference = enumerate_top_k(&rows, k.get());
    info!(
        engine = engine.len(),
        reference = reference.len(),
        "verification complete"
    );

    Ok(Verdict { engine, reference })
}

pub(crate) fn report(verdict: &Verdict) -> Result<()> {
    if verdict.agrees() {
        eprintln!(
            "{} engine matches exhaustive enumeration ({} paths)",
            "ok".green().bold(),
            verdict.engine.len()
        );
        return Ok(());
    }

    for (i, (a, b)) in verdict.engine.iter().zip(&verdict.reference).enumerate() {
        if a.sum_w != b.sum_w {
            eprintln!(
                "{} rank {i}: engine {:?} vs reference {:?}",
                "mismatch".red().bold(),
                a,
                b
            );
        }
    }
    bail!(
        "engine disagrees with exhaustive enumeration ({} vs {} paths)",
        verdict.engine.len(),
        verdict.reference.len()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth::{generate, SynthOptions};

    #[test]
    fn synthetic_instances_verify() {
        for seed in 1..=5 {
            let rows = generate(&SynthOptions {
                rows: 25,
                keys: 3,
                seed,
                null_rate: 0.1,
                ..SynthOptions::default()
            })
            .unwrap();
            let verdict = verify(&rows, &ChainRows::query(5)).unwrap();
            assert!(verdict.agrees(), "seed {seed}: {verdict:?}");
        }
    }
}
