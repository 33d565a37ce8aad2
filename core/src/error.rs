use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A lexically malformed query. Recovered per query: the caller reports
    /// the message and asks again.
    #[error("cannot parse query at `{token}`: {reason}")]
    QueryParse { token: String, reason: String },

    /// A document that could not be read. Recovered per document: the build
    /// skips it and continues.
    #[error("cannot read document {path}: {source}")]
    DocumentRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Internal invariant violation. Never recovered: a broken index must
    /// abort rather than serve wrong rankings.
    #[error("index consistency violation: {0}")]
    IndexConsistency(String),

    #[error("index format version {found} unsupported (expected {expected})")]
    VersionMismatch { found: u32, expected: u32 },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Codec(#[from] bincode::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn query_parse(token: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::QueryParse { token: token.into(), reason: reason.into() }
    }
}
