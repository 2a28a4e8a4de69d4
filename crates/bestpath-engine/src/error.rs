use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// Caller-supplied parameters are unusable; nothing was computed.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A relation reader failed to deliver rows; the run is aborted.
    #[error("failed to read relation `{relation}`")]
    DataSource {
        relation: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },

    /// A path state was converted to a result before reaching the last position.
    #[error("path is incomplete (depth {depth})")]
    IncompletePath { depth: usize },
}

impl Error {
    pub(crate) fn data_source(relation: &str, err: anyhow::Error) -> Self {
        Error::DataSource {
            relation: relation.to_string(),
            source: err.into(),
        }
    }
}
