use reqwest::StatusCode;

/// Error from a record-store request.
///
/// The store's REST interface reports every failure as a non-2xx status
/// with no structured body, so the useful distinction for callers is
/// transport vs. status vs. a body we could not decode. "Zero matching
/// rows" is never an error — reads return an empty vec.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Connection failure or timeout before a status line arrived.
    #[error("record store unreachable: {0}")]
    Transport(#[from] reqwest::Error),

    /// The store answered with a non-2xx status.
    #[error("record store returned HTTP {status} for `{collection}`")]
    Status {
        collection: String,
        status: StatusCode,
        body: String,
    },

    /// 2xx response whose body did not decode as the expected rows.
    #[error("malformed record in `{collection}`: {source}")]
    Decode {
        collection: String,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    /// Whether retrying the same request could plausibly succeed.
    ///
    /// Lets callers distinguish a store outage from a request the store
    /// rejected, without surfacing that distinction to end users.
    pub fn is_transient(&self) -> bool {
        match self {
            StoreError::Transport(_) => true,
            StoreError::Status { status, .. } => status.is_server_error(),
            StoreError::Decode { .. } => false,
        }
    }
}
