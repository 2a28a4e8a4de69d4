//! Result and statistics formatting.

use std::io::{self, Write};

use anyhow::Result;
use bestpath_engine::{BestPath, StageStats};
use colored::Colorize;

pub(crate) fn write_table(out: &mut impl Write, results: &[BestPath]) -> Result<()> {
    writeln!(
        out,
        "{}",
        format!(
            "{:>11} {:>11} {:>11} {:>11} {:>11} {:>20}",
            "a", "b", "c", "d", "e", "sumw"
        )
        .bold()
    )?;
    for p in results {
        writeln!(
            out,
            "{:>11} {:>11} {:>11} {:>11} {:>11} {:>20}",
            p.a, p.b, p.c, p.d, p.e, p.sum_w
        )?;
    }
    writeln!(out, "({} row{})", results.len(), if results.len() == 1 { "" } else { "s" })?;
    Ok(())
}

/// One JSON object per line.
pub(crate) fn write_json_lines(out: &mut impl Write, results: &[BestPath]) -> Result<()> {
    for p in results {
        serde_json::to_writer(&mut *out, p)?;
        writeln!(out)?;
    }
    Ok(())
}

pub(crate) fn print_stats(stages: &[StageStats]) -> Result<()> {
    let mut err = io::stderr().lock();
    writeln!(
        err,
        "{}",
        format!(
            "{:<12} {:>10} {:>9} {:>10} {:>9} {:>10}",
            "stage", "rows_in", "skipped", "unmatched", "keys", "paths"
        )
        .bold()
    )?;
    for s in stages {
        writeln!(
            err,
            "{:<12} {:>10} {:>9} {:>10} {:>9} {:>10}",
            s.stage, s.rows_in, s.skipped, s.unmatched, s.keys, s.paths
        )?;
    }
    Ok(())
}
