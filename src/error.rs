use std::path::PathBuf;
use thiserror::Error;

/// Errors returned by Stable Diffusion WebUI operations.
#[derive(Error, Debug)]
pub enum SdError {
    /// The submitted prompt was empty or whitespace-only. No request is sent.
    #[error("Prompt is empty — describe the image you want to generate")]
    EmptyPrompt,

    /// The requested style name is not present in the loaded configuration.
    #[error("Unknown style '{0}'")]
    UnknownStyle(String),

    /// Network-level request failure with context.
    #[error("{context}: {source}")]
    Network {
        context: String,
        source: reqwest::Error,
    },

    /// The WebUI returned a non-success HTTP status.
    #[error("Stable Diffusion WebUI returned HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The response from the WebUI was missing expected fields.
    #[error("{0}")]
    InvalidResponse(String),

    /// The response carried an empty `images` array.
    #[error("Generation response contained no images")]
    NoImages,

    /// The image payload was not valid base64.
    #[error("Malformed base64 image payload: {0}")]
    Decode(#[from] base64::DecodeError),

    /// Failed to create the output directory or write the image file.
    #[error("Failed to persist image: {0}")]
    Io(#[from] std::io::Error),

    /// The config file exists but is not valid JSON.
    #[error("Malformed config file {path}: {source}")]
    Config {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, SdError>;
