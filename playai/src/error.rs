use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid private key: {0}")]
    PrivateKey(#[from] alloy::signers::local::LocalSignerError),

    #[error("Failed to sign message: {0}")]
    Sign(#[from] alloy::signers::Error),

    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Response error ({status}): {message}")]
    Api { status: StatusCode, message: String },

    #[error("Failed to parse JSON: {0}")]
    JsonParsing(#[from] serde_json::Error),

    #[error("Couldn't convert query to string: {0}")]
    HttpQuery(#[from] serde_qs::Error),
}
