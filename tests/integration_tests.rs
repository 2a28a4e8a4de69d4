//! End-to-end: JSON tables on disk → reader → engine.

use std::path::Path;

use anyhow::Result;
use bestpath_engine::reference::enumerate_top_k;
use bestpath_engine::{BestPath, BestPathEngine, ChainQuery, ChainRows, EdgeRow, Error};
use bestpath_ingest::{AllowList, JsonDirReader, MemoryReader, Table};

fn write(dir: &Path, name: &str, json: &str) -> Result<()> {
    std::fs::write(dir.join(format!("{name}.json")), json)?;
    Ok(())
}

/// Relations with non-default names and join columns, extra columns, and a
/// null in the second relation.
fn scenario_dir() -> Result<tempfile::TempDir> {
    let dir = tempfile::tempdir()?;
    write(
        dir.path(),
        "people",
        r#"{ "columns": ["id", "A", "City", "W1"], "rows": [[100, 1, 10, 5], [101, 2, 10, 9]] }"#,
    )?;
    write(
        dir.path(),
        "roads",
        r#"{ "columns": ["city", "depot", "w2"], "rows": [[10, 20, 3], [10, null, 50]] }"#,
    )?;
    write(
        dir.path(),
        "depots",
        r#"{ "columns": ["depot", "hub", "w3"], "rows": [[20, 30, 2]] }"#,
    )?;
    write(
        dir.path(),
        "hubs",
        r#"{ "columns": ["hub", "e", "w4"], "rows": [[30, 40, 1], [31, 41, 1000]] }"#,
    )?;
    Ok(dir)
}

fn scenario_query(k: i64) -> ChainQuery {
    ChainQuery::new(
        ["people", "roads", "depots", "hubs"],
        ["city", "depot", "hub"],
        k,
    )
}

#[test]
fn json_tables_produce_the_best_paths() -> Result<()> {
    let dir = scenario_dir()?;
    let engine = BestPathEngine::new(JsonDirReader::new(dir.path()));

    let got = engine.run(&scenario_query(2))?;
    assert_eq!(
        got,
        vec![
            BestPath {
                a: 2,
                b: 10,
                c: 20,
                d: 30,
                e: 40,
                sum_w: 15
            },
            BestPath {
                a: 1,
                b: 10,
                c: 20,
                d: 30,
                e: 40,
                sum_w: 11
            },
        ]
    );

    let best = engine.run(&scenario_query(1))?;
    assert_eq!(best.len(), 1);
    assert_eq!(best[0].a, 2);
    Ok(())
}

#[test]
fn repeated_runs_serialize_identically() -> Result<()> {
    let dir = scenario_dir()?;
    let engine = BestPathEngine::new(JsonDirReader::new(dir.path()));

    let first = serde_json::to_string(&engine.run(&scenario_query(5))?)?;
    let second = serde_json::to_string(&engine.run(&scenario_query(5))?)?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn a_disallowed_relation_aborts_the_whole_run() -> Result<()> {
    let dir = scenario_dir()?;
    let reader = JsonDirReader::new(dir.path())
        .with_allow_list(AllowList::only(["people", "roads", "depots"])?);
    let err = BestPathEngine::new(reader)
        .run(&scenario_query(3))
        .unwrap_err();
    assert!(matches!(err, Error::DataSource { ref relation, .. } if relation == "hubs"));
    Ok(())
}

#[test]
fn injected_column_names_never_reach_a_table() -> Result<()> {
    let dir = scenario_dir()?;
    let query = ChainQuery::new(
        ["people", "roads", "depots", "hubs"],
        ["city", "depot; DROP TABLE hubs", "hub"],
        3,
    );
    let err = BestPathEngine::new(JsonDirReader::new(dir.path()))
        .run(&query)
        .unwrap_err();
    // The seed relation does not use the bad column; the first edge does.
    assert!(matches!(err, Error::DataSource { ref relation, .. } if relation == "roads"));
    Ok(())
}

#[test]
fn memory_and_json_readers_agree_with_enumeration() -> Result<()> {
    let rows = ChainRows::new(
        vec![
            EdgeRow::of(1, 10, 4),
            EdgeRow::of(2, 11, 6),
            EdgeRow::of(3, 10, -2),
            EdgeRow::new(Some(4), None, Some(9)),
        ],
        [
            vec![
                EdgeRow::of(10, 20, 1),
                EdgeRow::of(10, 21, 7),
                EdgeRow::of(11, 20, 3),
            ],
            vec![
                EdgeRow::of(20, 30, 5),
                EdgeRow::of(21, 30, -1),
                EdgeRow::of(21, 31, 2),
            ],
            vec![EdgeRow::of(30, 40, 1), EdgeRow::of(31, 41, 0)],
        ],
    );
    let columns = [
        ["a", "b", "w1"],
        ["b", "c", "w2"],
        ["c", "d", "w3"],
        ["d", "e", "w4"],
    ];
    let names = ["r", "s", "t", "u"];
    let data = std::iter::once(&rows.seed).chain(rows.edges.iter());

    let dir = tempfile::tempdir()?;
    let json = JsonDirReader::new(dir.path());
    let mut memory = MemoryReader::new();
    for ((name, cols), data) in names.iter().zip(columns).zip(data) {
        let table = Table::from_edge_rows(cols, data);
        json.write_table(name, &table)?;
        memory.insert(name, table)?;
    }

    for k in 1..=6 {
        let query = ChainRows::query(k);
        let from_json = BestPathEngine::new(&json).run(&query)?;
        let from_memory = BestPathEngine::new(&memory).run(&query)?;
        assert_eq!(from_json, from_memory);

        let expected: Vec<i64> = enumerate_top_k(&rows, k as usize)
            .iter()
            .map(|p| p.sum_w)
            .collect();
        let got: Vec<i64> = from_json.iter().map(|p| p.sum_w).collect();
        assert_eq!(got, expected, "k = {k}");
    }
    Ok(())
}
