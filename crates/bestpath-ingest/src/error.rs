use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("invalid identifier `{0}` (expected [A-Za-z_][A-Za-z0-9_]*, at most 63 characters)")]
    InvalidIdentifier(String),

    #[error("relation `{0}` does not exist")]
    UnknownRelation(String),

    #[error("relation `{0}` is not in the allow-list")]
    RelationNotAllowed(String),

    #[error("relation `{relation}` has no column `{column}`")]
    UnknownColumn { relation: String, column: String },

    #[error("relation `{relation}` has more than one column named `{column}`")]
    AmbiguousColumn { relation: String, column: String },

    #[error("relation `{relation}` row {row} column `{column}`: {value} does not fit in a 32-bit integer")]
    ValueOutOfRange {
        relation: String,
        row: usize,
        column: String,
        value: i64,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, IngestError>;
