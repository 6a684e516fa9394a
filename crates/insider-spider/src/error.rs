use thiserror::Error;

pub type Result<T> = std::result::Result<T, SpiderError>;

/// Every failure the spider can produce.
///
/// Errors raised while bootstrapping a run (ticker lookup, the filer's listing) are fatal;
/// the same errors raised inside a pipeline step only cost that one step.
#[derive(Debug, Error)]
pub enum SpiderError {
    /// The archive answered with a non-2xx status.
    #[error("unexpected response status {status} at {url}")]
    Http { status: u16, url: String },

    /// The request never produced a response (connection, TLS, body read).
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// A body that should have been JSON was not.
    #[error("failed to decode JSON from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    /// The document root is not `<ownershipDocument>`.
    #[error("not an ownership document (root <{root}>)")]
    Schema { root: String },

    /// A required leaf is missing or unreadable.
    #[error("missing or malformed field `{0}`")]
    Field(String),

    #[error("malformed XML: {0}")]
    Xml(String),

    /// An ownership document of a form we do not model (5, 3/A, ...).
    #[error("unsupported form type {0}")]
    Unsupported(String),

    #[error("snapshot codec error: {0}")]
    Snapshot(#[from] bincode::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ticker {0} not found")]
    UnknownTicker(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl SpiderError {
    /// Skips that happen routinely and should not be reported as failures.
    pub fn is_expected_skip(&self) -> bool {
        matches!(self, SpiderError::Schema { .. } | SpiderError::Unsupported(_))
    }
}

impl From<quick_xml::Error> for SpiderError {
    fn from(err: quick_xml::Error) -> Self {
        SpiderError::Xml(err.to_string())
    }
}

impl From<quick_xml::DeError> for SpiderError {
    fn from(err: quick_xml::DeError) -> Self {
        SpiderError::Xml(err.to_string())
    }
}
