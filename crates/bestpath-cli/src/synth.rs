//! Deterministic synthetic relations for demos, perf runs and `verify`.
//!
//! Keys are drawn from a small range per position so joins are many-to-many
//! and many paths converge on the same intermediate keys.

use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use bestpath_engine::query::{FIRST_POSITION_COLUMN, LAST_POSITION_COLUMN, WEIGHT_COLUMNS};
use bestpath_engine::{ChainRows, EdgeRow, DEFAULT_JOIN_COLUMNS, DEFAULT_RELATIONS};
use bestpath_ingest::{JsonDirReader, Table};
use tracing::info;

use crate::config::JobConfig;

#[derive(Debug, Clone)]
pub(crate) struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    pub(crate) fn new(seed: u64) -> Self {
        // Avoid the degenerate all-zero state.
        let state = if seed == 0 { 0x9e3779b97f4a7c15 } else { seed };
        Self { state }
    }

    pub(crate) fn next_u64(&mut self) -> u64 {
        // xorshift64*
        let mut x = self.state;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.state = x;
        x.wrapping_mul(0x2545_f491_4f6c_dd1d)
    }

    /// Uniform in `[0, upper)`; 0 when `upper == 0`.
    pub(crate) fn gen_below(&mut self, upper: u64) -> u64 {
        if upper == 0 {
            return 0;
        }
        self.next_u64() % upper
    }

    /// Uniform in `[0, 1)`.
    pub(crate) fn gen_unit(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

#[derive(Debug, Clone)]
pub(crate) struct SynthOptions {
    pub(crate) rows: usize,
    pub(crate) keys: u32,
    pub(crate) seed: u64,
    pub(crate) null_rate: f64,
    pub(crate) min_weight: i32,
    pub(crate) max_weight: i32,
}

impl Default for SynthOptions {
    fn default() -> Self {
        Self {
            rows: 200,
            keys: 20,
            seed: 1,
            null_rate: 0.0,
            min_weight: -10,
            max_weight: 100,
        }
    }
}

/// Generate seed and edge rows. Position `i` takes keys in
/// `[i * keys, (i + 1) * keys)` so values stay distinguishable per column.
pub(crate) fn generate(opts: &SynthOptions) -> Result<ChainRows> {
    if opts.keys == 0 {
        return Err(anyhow!("--keys must be > 0"));
    }
    if opts.min_weight > opts.max_weight {
        return Err(anyhow!("min weight exceeds max weight"));
    }
    if !(0.0..=1.0).contains(&opts.null_rate) {
        return Err(anyhow!("--null-rate must be within [0, 1]"));
    }

    let mut rng = XorShift64::new(opts.seed);
    let span = (i64::from(opts.max_weight) - i64::from(opts.min_weight) + 1) as u64;

    let relation = |edge: usize, rng: &mut XorShift64| -> Vec<EdgeRow> {
        (0..opts.rows)
            .map(|_| {
                let from = key_for(edge, opts.keys, rng);
                let to = key_for(edge + 1, opts.keys, rng);
                let weight = (i64::from(opts.min_weight) + rng.gen_below(span) as i64) as i32;
                let mut row = EdgeRow::of(from, to, weight);
                if rng.gen_unit() < opts.null_rate {
                    match rng.gen_below(3) {
                        0 => row.from = None,
                        1 => row.to = None,
                        _ => row.weight = None,
                    }
                }
                row
            })
            .collect()
    };

    let seed = relation(0, &mut rng);
    let s = relation(1, &mut rng);
    let t = relation(2, &mut rng);
    let u = relation(3, &mut rng);
    Ok(ChainRows::new(seed, [s, t, u]))
}

fn key_for(position: usize, keys: u32, rng: &mut XorShift64) -> i32 {
    let base = position as i64 * i64::from(keys);
    (base + rng.gen_below(u64::from(keys)) as i64) as i32
}

/// Column headers of the default chain, per relation.
pub(crate) fn default_columns() -> [[&'static str; 3]; 4] {
    let [b, c, d] = DEFAULT_JOIN_COLUMNS;
    [
        [FIRST_POSITION_COLUMN, b, WEIGHT_COLUMNS[0]],
        [b, c, WEIGHT_COLUMNS[1]],
        [c, d, WEIGHT_COLUMNS[2]],
        [d, LAST_POSITION_COLUMN, WEIGHT_COLUMNS[3]],
    ]
}

/// Write the four relations and a `job.json` pointing at them.
pub(crate) fn write_dataset(out: &Path, rows: &ChainRows, k: i64) -> Result<()> {
    fs::create_dir_all(out).with_context(|| format!("creating {}", out.display()))?;
    let writer = JsonDirReader::new(out);

    let relations = std::iter::once(&rows.seed).chain(rows.edges.iter());
    for ((name, columns), data) in DEFAULT_RELATIONS
        .iter()
        .zip(default_columns())
        .zip(relations)
    {
        let path = writer.write_table(name, &Table::from_edge_rows(columns, data))?;
        info!(path = %path.display(), rows = data.len(), "wrote relation");
    }

    let job = JobConfig {
        data_dir: Some(".".into()),
        relations: Some(DEFAULT_RELATIONS.map(str::to_string).to_vec()),
        join_columns: Some(DEFAULT_JOIN_COLUMNS.map(str::to_string).to_vec()),
        k: Some(k),
        allowed_relations: None,
    };
    let job_path = out.join("job.json");
    fs::write(&job_path, serde_json::to_string_pretty(&job)?)
        .with_context(|| format!("writing {}", job_path.display()))?;
    Ok(())
}
