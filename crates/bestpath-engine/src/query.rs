//! Invocation parameters and the relation-reader boundary.
//!
//! The engine never interprets identifiers. A [`ChainQuery`] turns the four
//! relation names and three join-column names into positional
//! [`RelationRequest`]s; resolving (and allow-listing) them is the reader's job.

use std::num::NonZeroUsize;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::path::EdgeRow;

/// Source column of the first position, read from the seed relation.
pub const FIRST_POSITION_COLUMN: &str = "a";
/// Source column of the last position, read from the last edge relation.
pub const LAST_POSITION_COLUMN: &str = "e";
/// Weight columns of the four edges, in chain order.
pub const WEIGHT_COLUMNS: [&str; 4] = ["w1", "w2", "w3", "w4"];

/// A request for one relation projected onto three columns, in row order
/// `(from, to, weight)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationRequest {
    pub relation: String,
    pub columns: [String; 3],
}

impl RelationRequest {
    pub fn new(relation: &str, from: &str, to: &str, weight: &str) -> Self {
        Self {
            relation: relation.to_string(),
            columns: [from.to_string(), to.to_string(), weight.to_string()],
        }
    }
}

/// Delivers the full, already-materialized rows of one relation.
///
/// Rows with null fields are returned as-is; the engine skips them.
pub trait RelationReader {
    fn read_relation(&self, request: &RelationRequest) -> Result<Vec<EdgeRow>>;
}

impl<R: RelationReader + ?Sized> RelationReader for &R {
    fn read_relation(&self, request: &RelationRequest) -> Result<Vec<EdgeRow>> {
        (**self).read_relation(request)
    }
}

impl<R: RelationReader + ?Sized> RelationReader for Box<R> {
    fn read_relation(&self, request: &RelationRequest) -> Result<Vec<EdgeRow>> {
        (**self).read_relation(request)
    }
}

/// One best-path invocation: four relations, three join columns and K.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainQuery {
    pub relations: [String; 4],
    pub join_columns: [String; 3],
    pub k: i64,
}

impl ChainQuery {
    pub fn new(relations: [&str; 4], join_columns: [&str; 3], k: i64) -> Self {
        Self {
            relations: relations.map(str::to_string),
            join_columns: join_columns.map(str::to_string),
            k,
        }
    }

    /// K as a capacity, or `InvalidArgument` when `k <= 0`.
    pub fn capacity(&self) -> Result<NonZeroUsize, Error> {
        usize::try_from(self.k)
            .ok()
            .and_then(NonZeroUsize::new)
            .ok_or_else(|| Error::InvalidArgument(format!("k must be positive, got {}", self.k)))
    }

    /// Seed request: `(a, <join 1>, w1)` from the first relation.
    pub fn seed_request(&self) -> RelationRequest {
        RelationRequest::new(
            &self.relations[0],
            FIRST_POSITION_COLUMN,
            &self.join_columns[0],
            WEIGHT_COLUMNS[0],
        )
    }

    /// Edge requests for relations 2..=4, in chain order:
    /// `(<join 1>, <join 2>, w2)`, `(<join 2>, <join 3>, w3)`, `(<join 3>, e, w4)`.
    pub fn edge_requests(&self) -> [RelationRequest; 3] {
        let [j1, j2, j3] = &self.join_columns;
        [
            RelationRequest::new(&self.relations[1], j1, j2, WEIGHT_COLUMNS[1]),
            RelationRequest::new(&self.relations[2], j2, j3, WEIGHT_COLUMNS[2]),
            RelationRequest::new(&self.relations[3], j3, LAST_POSITION_COLUMN, WEIGHT_COLUMNS[3]),
        ]
    }
}
