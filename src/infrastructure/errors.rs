use thiserror::Error;

#[derive(Debug, Error)]
pub enum InfraError {
    #[error("Invalid seed data: {0}")]
    Seed(#[from] serde_json::Error),
    #[error("{0}")]
    Csv(#[from] csv::Error),
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("Clipboard unavailable: {0}")]
    Clipboard(#[from] arboard::Error),
}
