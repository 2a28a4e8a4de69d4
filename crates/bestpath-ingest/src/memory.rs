//! In-memory relations, keyed by validated name.

use std::collections::HashMap;

use anyhow::Result;
use bestpath_engine::{EdgeRow, RelationReader, RelationRequest};

use crate::error::IngestError;
use crate::identifier::{AllowList, Identifier, ValidatedRequest};
use crate::table::Table;

#[derive(Debug, Clone, Default)]
pub struct MemoryReader {
    tables: HashMap<Identifier, Table>,
    allow: AllowList,
}

impl MemoryReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_allow_list(mut self, allow: AllowList) -> Self {
        self.allow = allow;
        self
    }

    /// Add or replace a relation.
    pub fn insert(&mut self, relation: &str, table: Table) -> Result<()> {
        self.tables.insert(Identifier::parse(relation)?, table);
        Ok(())
    }

    pub fn get(&self, relation: &str) -> Option<&Table> {
        let relation = Identifier::parse(relation).ok()?;
        self.tables.get(&relation)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Identifier, &Table)> + '_ {
        self.tables.iter()
    }
}

impl RelationReader for MemoryReader {
    fn read_relation(&self, request: &RelationRequest) -> Result<Vec<EdgeRow>> {
        let request = ValidatedRequest::parse(request)?;
        self.allow.check(&request.relation)?;

        let table = self
            .tables
            .get(&request.relation)
            .ok_or_else(|| IngestError::UnknownRelation(request.relation.to_string()))?;
        Ok(table.project(request.relation.as_str(), &request.columns)?)
    }
}
