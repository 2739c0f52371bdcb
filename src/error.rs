use thiserror::Error;

#[derive(Debug, Error)]
pub enum AtomError {
    /// The requested name is not in the element catalog.
    #[error("unknown element: {0}")]
    UnknownElement(String),

    #[error("failed to read config file {path}: {source}")]
    ConfigRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    ConfigParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
