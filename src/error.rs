use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngredientSearchError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("File watch error: {0}")]
    Watch(#[from] notify::Error),

    #[error("Clipboard error: {0}")]
    Clipboard(#[from] arboard::Error),

    #[error("No config directory available on this platform")]
    NoConfigDir,
}

pub type Result<T> = std::result::Result<T, IngredientSearchError>;
