//! Tables: named integer columns with nullable cells, stored as JSON.
//!
//! ```json
//! { "columns": ["a", "b", "w1"], "rows": [[1, 10, 5], [2, null, 9]] }
//! ```

use std::fs;
use std::path::Path;

use bestpath_engine::EdgeRow;
use serde::{Deserialize, Serialize};

use crate::error::{IngestError, Result};
use crate::identifier::Identifier;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Option<i64>>>,
}

impl Table {
    pub fn new<S: AsRef<str>>(columns: &[S]) -> Self {
        Self {
            columns: columns.iter().map(|c| c.as_ref().to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// A three-column table holding `rows` as `(from, to, weight)`.
    pub fn from_edge_rows(columns: [&str; 3], rows: &[EdgeRow]) -> Self {
        let mut table = Self::new(&columns);
        table.rows = rows
            .iter()
            .map(|r| {
                vec![
                    r.from.map(i64::from),
                    r.to.map(i64::from),
                    r.weight.map(i64::from),
                ]
            })
            .collect();
        table
    }

    pub fn push_row(&mut self, row: Vec<Option<i64>>) {
        self.rows.push(row);
    }

    /// Position of `column`, compared case-insensitively.
    pub fn column_position(&self, relation: &str, column: &Identifier) -> Result<usize> {
        let mut matches = self
            .columns
            .iter()
            .enumerate()
            .filter(|(_, name)| name.eq_ignore_ascii_case(column.as_str()))
            .map(|(i, _)| i);

        match (matches.next(), matches.next()) {
            (Some(i), None) => Ok(i),
            (None, _) => Err(IngestError::UnknownColumn {
                relation: relation.to_string(),
                column: column.to_string(),
            }),
            (Some(_), Some(_)) => Err(IngestError::AmbiguousColumn {
                relation: relation.to_string(),
                column: column.to_string(),
            }),
        }
    }

    /// Project onto `(from, to, weight)`. Missing cells read as null.
    pub fn project(&self, relation: &str, columns: &[Identifier; 3]) -> Result<Vec<EdgeRow>> {
        let positions = [
            self.column_position(relation, &columns[0])?,
            self.column_position(relation, &columns[1])?,
            self.column_position(relation, &columns[2])?,
        ];

        let mut out = Vec::with_capacity(self.rows.len());
        for (row_no, row) in self.rows.iter().enumerate() {
            let mut cells = [None; 3];
            for (slot, (&pos, column)) in cells.iter_mut().zip(positions.iter().zip(columns)) {
                let Some(value) = row.get(pos).copied().flatten() else {
                    continue;
                };
                let narrowed =
                    i32::try_from(value).map_err(|_| IngestError::ValueOutOfRange {
                        relation: relation.to_string(),
                        row: row_no,
                        column: column.to_string(),
                        value,
                    })?;
                *slot = Some(narrowed);
            }
            let [from, to, weight] = cells;
            out.push(EdgeRow::new(from, to, weight));
        }
        Ok(out)
    }

    pub fn read_json(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn write_json(&self, path: &Path) -> Result<()> {
        let text = serde_json::to_string(self)?;
        fs::write(path, text)?;
        Ok(())
    }
}
