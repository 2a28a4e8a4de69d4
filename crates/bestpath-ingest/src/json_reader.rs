//! Reads relations from a directory of JSON tables, one `<relation>.json`
//! per relation.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use bestpath_engine::{EdgeRow, RelationReader, RelationRequest};
use tracing::debug;

use crate::error::IngestError;
use crate::identifier::{AllowList, Identifier, ValidatedRequest};
use crate::table::Table;

#[derive(Debug, Clone)]
pub struct JsonDirReader {
    dir: PathBuf,
    allow: AllowList,
}

impl JsonDirReader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            allow: AllowList::any(),
        }
    }

    pub fn with_allow_list(mut self, allow: AllowList) -> Self {
        self.allow = allow;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing `relation`. The name is already validated, so it cannot
    /// leave `dir`.
    pub fn table_path(&self, relation: &Identifier) -> PathBuf {
        self.dir.join(format!("{relation}.json"))
    }

    pub fn write_table(&self, relation: &str, table: &Table) -> Result<PathBuf> {
        let relation = Identifier::parse(relation)?;
        let path = self.table_path(&relation);
        table
            .write_json(&path)
            .with_context(|| format!("writing {}", path.display()))?;
        Ok(path)
    }
}

impl RelationReader for JsonDirReader {
    fn read_relation(&self, request: &RelationRequest) -> Result<Vec<EdgeRow>> {
        let request = ValidatedRequest::parse(request)?;
        self.allow.check(&request.relation)?;

        let path = self.table_path(&request.relation);
        if !path.is_file() {
            return Err(IngestError::UnknownRelation(request.relation.to_string()).into());
        }

        let table =
            Table::read_json(&path).with_context(|| format!("reading {}", path.display()))?;
        let rows = table.project(request.relation.as_str(), &request.columns)?;
        debug!(
            path = %path.display(),
            rows = rows.len(),
            "loaded relation"
        );
        Ok(rows)
    }
}
