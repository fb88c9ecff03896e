use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Element #{0} not found on this page")]
    MissingElement(&'static str),

    #[error("Missing query parameter: {0}")]
    MissingParameter(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;
