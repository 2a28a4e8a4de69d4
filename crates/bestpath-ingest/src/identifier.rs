//! Identifier allow-listing.
//!
//! Relation and column names reach a reader from callers (CLI flags, job
//! files). Only plain identifiers are accepted; they are folded to lower case
//! the way unquoted SQL identifiers are, so `W1` and `w1` name the same column.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::OnceLock;

use bestpath_engine::RelationRequest;
use regex::Regex;

use crate::error::{IngestError, Result};

const IDENTIFIER_PATTERN: &str = r"^[A-Za-z_][A-Za-z0-9_]{0,62}$";

fn identifier_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(IDENTIFIER_PATTERN).expect("identifier pattern is valid"))
}

/// A validated, case-folded identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Identifier(String);

impl Identifier {
    pub fn parse(raw: &str) -> Result<Self> {
        if identifier_regex().is_match(raw) {
            Ok(Self(raw.to_ascii_lowercase()))
        } else {
            Err(IngestError::InvalidIdentifier(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A relation request whose every identifier passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRequest {
    pub relation: Identifier,
    pub columns: [Identifier; 3],
}

impl ValidatedRequest {
    pub fn parse(request: &RelationRequest) -> Result<Self> {
        let [from, to, weight] = &request.columns;
        Ok(Self {
            relation: Identifier::parse(&request.relation)?,
            columns: [
                Identifier::parse(from)?,
                Identifier::parse(to)?,
                Identifier::parse(weight)?,
            ],
        })
    }
}

/// Optional explicit set of readable relations. Empty means "any".
#[derive(Debug, Clone, Default)]
pub struct AllowList {
    relations: Option<BTreeSet<Identifier>>,
}

impl AllowList {
    pub fn any() -> Self {
        Self::default()
    }

    pub fn only<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let relations = names
            .into_iter()
            .map(|name| Identifier::parse(name.as_ref()))
            .collect::<Result<BTreeSet<_>>>()?;
        Ok(Self {
            relations: Some(relations),
        })
    }

    pub fn check(&self, relation: &Identifier) -> Result<()> {
        match &self.relations {
            Some(allowed) if !allowed.contains(relation) => {
                Err(IngestError::RelationNotAllowed(relation.to_string()))
            }
            _ => Ok(()),
        }
    }
}
