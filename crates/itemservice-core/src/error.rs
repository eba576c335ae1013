use thiserror::Error;

/// Top-level error type for the item service.
#[derive(Debug, Error)]
pub enum ItemServiceError {
    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// Message catalog could not be loaded.
    #[error("catalog error: {0}")]
    Catalog(String),
}
