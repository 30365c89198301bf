/// Error types shared by the ternary plot crates.
///
/// These cover data loading (local files, HTTP fetches, JSON decoding) and
/// schema validation. Application-specific errors should be defined in each
/// binary crate and wrap `CommonError` via `#[from]`.

#[derive(Debug, thiserror::Error)]
pub enum CommonError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("failed to fetch {location} ({status})")]
    Status { location: String, status: u16 },

    #[error("failed to read {path}: {error}")]
    Io {
        path: String,
        #[source]
        error: std::io::Error,
    },

    #[error("invalid JSON in {location}: {error}")]
    Json {
        location: String,
        #[source]
        error: serde_json::Error,
    },

    #[error("schema error in vision '{id}': {message}")]
    Schema { id: String, message: String },
}
