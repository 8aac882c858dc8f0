use thiserror::Error;

#[derive(Error, Debug)]
pub enum AtlasError {
    #[error("{0}")]
    InvalidFilename(String),

    #[error("{0}")]
    InvalidJson(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("A file named {0} already exists. Use the save endpoint to update it.")]
    FileExists(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Missing {0}")]
    MissingField(String),

    #[error("Unsupported content type: {0}")]
    UnsupportedContentType(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, AtlasError>;
