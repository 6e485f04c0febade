use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Persisted catalog under key '{key}' is corrupt: {source}")]
    CorruptPersistedState {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid seed dataset: {0}")]
    InvalidSeed(#[source] serde_json::Error),

    #[error("Could not serialize catalog: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid storage key: {0}")]
    InvalidStorageKey(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Movie not found: {0}")]
    MovieNotFound(String),

    #[error("Unknown person code '{0}', expected one of O, M, L")]
    InvalidPerson(String),
}

pub type Result<T> = std::result::Result<T, CatalogError>;
